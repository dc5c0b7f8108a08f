//! Individual risk rules
//!
//! Each built-in check is identified by a [`RuleCode`]; points and messages
//! come from the injected rule table so the catalog can be swapped.

use chrono::NaiveDateTime;
use cra_core::{hours_between, Change, CustomerImpact, RiskRule, System};
use std::fmt;
use std::str::FromStr;

/// Plans shorter than this (after trimming) count as missing
pub const MIN_PLAN_CHARS: usize = 40;

/// Upper bound, inclusive, of the short-notice window
pub const SHORT_NOTICE_HOURS: f64 = 24.0;

/// Durations strictly above this are long
pub const LONG_DURATION_HOURS: f64 = 2.0;

/// The built-in checks, in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleCode {
    Tier3System,
    HighImpact,
    NoRollback,
    NoTest,
    ShortNotice,
    LongDuration,
}

impl RuleCode {
    /// Evaluation order, which is also the order of reasons
    pub const ORDER: [RuleCode; 6] = [
        RuleCode::Tier3System,
        RuleCode::HighImpact,
        RuleCode::NoRollback,
        RuleCode::NoTest,
        RuleCode::ShortNotice,
        RuleCode::LongDuration,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RuleCode::Tier3System => "TIER3_SYSTEM",
            RuleCode::HighImpact => "HIGH_IMPACT",
            RuleCode::NoRollback => "NO_ROLLBACK",
            RuleCode::NoTest => "NO_TEST",
            RuleCode::ShortNotice => "SHORT_NOTICE",
            RuleCode::LongDuration => "LONG_DURATION",
        }
    }

    /// Check whether this rule fires for the given facts
    pub fn triggers(&self, context: &RuleContext) -> bool {
        match self {
            RuleCode::Tier3System => context.touches_tier3,
            RuleCode::HighImpact => context.customer_impact == CustomerImpact::High,
            RuleCode::NoRollback => context.rollback_chars < MIN_PLAN_CHARS,
            RuleCode::NoTest => context.test_chars < MIN_PLAN_CHARS,
            RuleCode::ShortNotice => context
                .hours_until_start
                .map_or(false, |h| (0.0..=SHORT_NOTICE_HOURS).contains(&h)),
            RuleCode::LongDuration => context
                .duration_hours
                .map_or(false, |h| h > LONG_DURATION_HOURS),
        }
    }

    /// The reference catalog row for this code
    pub fn reference_rule(&self) -> RiskRule {
        let (points, message) = match self {
            RuleCode::Tier3System => (25, "Tier 3 system included"),
            RuleCode::HighImpact => (20, "Customer impact is high"),
            RuleCode::NoRollback => (15, "Rollback plan is too short"),
            RuleCode::NoTest => (15, "Test plan is too short"),
            RuleCode::ShortNotice => (10, "Planned start is within 24 hours"),
            RuleCode::LongDuration => (8, "Planned duration is longer than 2 hours"),
        };
        RiskRule::new(self.as_str(), points, message)
    }
}

impl fmt::Display for RuleCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RuleCode::ORDER
            .into_iter()
            .find(|code| code.as_str() == s)
            .ok_or_else(|| format!("unknown rule code: {}", s))
    }
}

/// The six-rule reference catalog
pub fn reference_catalog() -> Vec<RiskRule> {
    RuleCode::ORDER.iter().map(RuleCode::reference_rule).collect()
}

/// Read-only view over an ordered rule catalog
#[derive(Debug, Clone, Copy)]
pub struct RuleTable<'a> {
    rules: &'a [RiskRule],
}

impl<'a> RuleTable<'a> {
    pub fn new(rules: &'a [RiskRule]) -> Self {
        Self { rules }
    }

    /// Look up a rule by code; codes missing from the table contribute nothing
    pub fn find(&self, code: RuleCode) -> Option<&'a RiskRule> {
        self.rules.iter().find(|r| r.code == code.as_str())
    }

    pub fn rules(&self) -> &'a [RiskRule] {
        self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Facts about a change that the rules are evaluated against
#[derive(Debug, Clone, PartialEq)]
pub struct RuleContext {
    pub touches_tier3: bool,
    pub customer_impact: CustomerImpact,
    pub rollback_chars: usize,
    pub test_chars: usize,
    /// `None` when the planned start does not parse
    pub hours_until_start: Option<f64>,
    /// `None` when either planned bound does not parse
    pub duration_hours: Option<f64>,
}

impl RuleContext {
    pub fn from_change(change: &Change, systems: &[System], now: NaiveDateTime) -> Self {
        let start = change.planned_start.parse();
        let end = change.planned_end.parse();

        Self {
            touches_tier3: resolve_systems(&change.systems, systems).any(System::is_critical),
            customer_impact: change.customer_impact,
            rollback_chars: change.rollback_plan.trim().chars().count(),
            test_chars: change.test_plan.trim().chars().count(),
            hours_until_start: start.map(|s| hours_between(now, s)),
            duration_hours: start.zip(end).map(|(s, e)| hours_between(s, e)),
        }
    }
}

/// Resolve system ids against the catalog, silently skipping unknown ids
pub fn resolve_systems<'a>(
    ids: &'a [u32],
    catalog: &'a [System],
) -> impl Iterator<Item = &'a System> + 'a {
    ids.iter()
        .filter_map(move |id| catalog.iter().find(|s| s.id == *id))
}
