//! CRA Policy: Transparent, Additive Change Risk Scoring
//!
//! A change is scored by evaluating a fixed sequence of rules against it.
//! Every triggered rule adds its points once; the total is bucketed into a
//! [`RiskLevel`].
//!
//! # Architecture
//!
//! ```text
//! Change + System catalog + now → RuleContext → RuleCode::ORDER → RuleTable lookup
//!                                                      ↓
//!                                     RiskAssessment { total, level, reasons }
//! ```
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use cra_core::{Change, ChangeStatus, CustomerImpact, LocalTimestamp, System};
//! use cra_policy::{assess, RiskLevel};
//!
//! let now = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap().and_hms_opt(9, 0, 0).unwrap();
//! let systems = vec![System::new(1, "Core DNS", 3, "DNS hosting")];
//!
//! let change = Change {
//!     id: 1,
//!     title: "Flip DNS records".to_string(),
//!     change_type: "dns".to_string(),
//!     requester: "ops".to_string(),
//!     planned_start: LocalTimestamp::new("2026-06-01T10:00"),
//!     planned_end: LocalTimestamp::new("2026-06-01T13:00"),
//!     customer_impact: CustomerImpact::High,
//!     status: ChangeStatus::Submitted,
//!     systems: vec![1],
//!     rollback_plan: "revert".to_string(),
//!     test_plan: "dig".to_string(),
//!     steps: String::new(),
//! };
//!
//! let assessment = assess(&change, &systems, now);
//! assert_eq!(assessment.total, 93);
//! assert_eq!(assessment.level, RiskLevel::Critical);
//! println!("{}", assessment.summary());
//! ```

pub mod risk;
pub mod rule;

pub use risk::{assess, score, RiskAssessment, RiskLevel, RiskReason, RiskScorer};
pub use rule::{
    reference_catalog, resolve_systems, RuleCode, RuleContext, RuleTable, LONG_DURATION_HOURS,
    MIN_PLAN_CHARS, SHORT_NOTICE_HOURS,
};
