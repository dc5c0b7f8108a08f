//! Data Model: System, Change, Incident, RiskRule, AppState
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::timestamp::LocalTimestamp;

/// A piece of infrastructure a change may impact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct System {
    /// Stable identifier referenced by changes and incidents
    pub id: u32,
    /// Display name
    pub name: String,
    /// Criticality tier, 1 (low) to 3 (high)
    pub tier: u8,
    /// Free-text description; older slots store it as `desc`
    #[serde(default, alias = "desc")]
    pub description: String,
}

impl System {
    pub fn new(id: u32, name: impl Into<String>, tier: u8, description: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            tier,
            description: description.into(),
        }
    }

    /// Tier 3 systems add risk to every change touching them
    pub fn is_critical(&self) -> bool {
        self.tier == 3
    }
}

/// One row of the risk rule catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskRule {
    /// Unique rule code, e.g. `TIER3_SYSTEM`
    pub code: String,
    /// Points added when the rule triggers
    pub points: u32,
    /// Explanation shown next to the score
    pub message: String,
}

impl RiskRule {
    pub fn new(code: impl Into<String>, points: u32, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            points,
            message: message.into(),
        }
    }
}

/// Expected customer impact of a change
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CustomerImpact {
    None,
    #[default]
    Low,
    Medium,
    High,
}

impl CustomerImpact {
    pub const ALL: [CustomerImpact; 4] = [
        CustomerImpact::None,
        CustomerImpact::Low,
        CustomerImpact::Medium,
        CustomerImpact::High,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerImpact::None => "none",
            CustomerImpact::Low => "low",
            CustomerImpact::Medium => "medium",
            CustomerImpact::High => "high",
        }
    }
}

impl fmt::Display for CustomerImpact {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CustomerImpact {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CustomerImpact::ALL
            .into_iter()
            .find(|impact| impact.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown customer impact: {}", s))
    }
}

/// Lifecycle status of a change.
///
/// Statuses are a configurable lookup list, so values outside the known set
/// are carried through as [`ChangeStatus::Other`] instead of failing the load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum ChangeStatus {
    #[default]
    Draft,
    Submitted,
    InReview,
    Approved,
    Rejected,
    Scheduled,
    Implemented,
    PostReview,
    Closed,
    /// A status from a substituted lookup list, kept verbatim
    Other(String),
}

impl ChangeStatus {
    /// The known statuses, in workflow order
    pub const ALL: [ChangeStatus; 9] = [
        ChangeStatus::Draft,
        ChangeStatus::Submitted,
        ChangeStatus::InReview,
        ChangeStatus::Approved,
        ChangeStatus::Rejected,
        ChangeStatus::Scheduled,
        ChangeStatus::Implemented,
        ChangeStatus::PostReview,
        ChangeStatus::Closed,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            ChangeStatus::Draft => "draft",
            ChangeStatus::Submitted => "submitted",
            ChangeStatus::InReview => "in_review",
            ChangeStatus::Approved => "approved",
            ChangeStatus::Rejected => "rejected",
            ChangeStatus::Scheduled => "scheduled",
            ChangeStatus::Implemented => "implemented",
            ChangeStatus::PostReview => "post_review",
            ChangeStatus::Closed => "closed",
            ChangeStatus::Other(status) => status,
        }
    }

    /// False for statuses outside the known set
    pub fn is_known(&self) -> bool {
        !matches!(self, ChangeStatus::Other(_))
    }
}

impl From<String> for ChangeStatus {
    fn from(status: String) -> Self {
        ChangeStatus::ALL
            .into_iter()
            .find(|known| known.as_str() == status)
            .unwrap_or(ChangeStatus::Other(status))
    }
}

impl From<ChangeStatus> for String {
    fn from(status: ChangeStatus) -> Self {
        match status {
            ChangeStatus::Other(status) => status,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ChangeStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A proposed operational change
///
/// Narrative fields default to empty so hand-edited or older slots still
/// load; the scoring engine treats empty plans as too short.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Change {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub change_type: String,
    #[serde(default)]
    pub requester: String,
    #[serde(default)]
    pub planned_start: LocalTimestamp,
    #[serde(default)]
    pub planned_end: LocalTimestamp,
    #[serde(default)]
    pub customer_impact: CustomerImpact,
    #[serde(default)]
    pub status: ChangeStatus,
    /// Ids of impacted systems
    #[serde(default)]
    pub systems: Vec<u32>,
    #[serde(default)]
    pub rollback_plan: String,
    #[serde(default)]
    pub test_plan: String,
    #[serde(default)]
    pub steps: String,
}

/// Historical outage record, display only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    pub id: u32,
    pub title: String,
    /// 1 is the most severe, 4 the least
    pub severity: u8,
    pub started_at: LocalTimestamp,
    pub resolved_at: LocalTimestamp,
    #[serde(default)]
    pub systems: Vec<u32>,
    #[serde(default)]
    pub notes: String,
}

/// Position of the guided product tour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TourState {
    /// Whether the tour is currently running
    pub active: bool,
    /// Index into the tour steps
    pub step: usize,
}

/// Everything persisted in the state slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AppState {
    #[serde(default)]
    pub systems: Vec<System>,
    #[serde(default)]
    pub changes: Vec<Change>,
    #[serde(default)]
    pub incidents: Vec<Incident>,
    #[serde(default)]
    pub demo: TourState,
}

impl AppState {
    /// Look up a system by id
    pub fn system(&self, id: u32) -> Option<&System> {
        self.systems.iter().find(|s| s.id == id)
    }

    /// Look up a change by id
    pub fn change(&self, id: u32) -> Option<&Change> {
        self.changes.iter().find(|c| c.id == id)
    }
}
