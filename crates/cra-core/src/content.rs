//! Static content injected into the core: brand, lookups, rules, seed data
//!
//! Nothing here is mutated at runtime. The reference configuration is built
//! by [`AppContent::reference`]; substitutes can be loaded from YAML or JSON
//! so tests can swap the rule table or the lookup lists.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::data_model::{ChangeStatus, CustomerImpact, RiskRule, System};
use crate::error::ContentError;

/// Storage key of the persisted state slot
pub const STORAGE_KEY: &str = "change_risk_autopilot_v1";

/// Product identity shown in the header
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brand {
    /// Product name
    pub name: String,
    /// One-line description under the name
    pub tagline: String,
    /// Default requester for new changes
    pub owner: String,
}

/// One entry of the navigation bar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
    /// View identifier, e.g. `dashboard`
    pub id: String,
    /// Label shown to the user
    pub label: String,
}

/// Option lists offered by the change form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lookups {
    /// Allowed `Change::change_type` values
    pub change_types: Vec<String>,
    /// Impact levels the form offers
    pub customer_impact: Vec<CustomerImpact>,
    /// Statuses shown in filters, in workflow order
    pub status: Vec<ChangeStatus>,
}

/// Offset from the seeding instant: `days * 24h + hours`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct RelativeTime {
    /// Whole or fractional days; negative is the past
    #[serde(default)]
    pub days: f64,
    /// Added after the day offset
    #[serde(default)]
    pub hours: f64,
}

impl RelativeTime {
    pub fn days_from_now(days: f64, hours: f64) -> Self {
        Self { days, hours }
    }

    /// `days` in the past, then `hours` forward from there
    pub fn days_ago(days: f64, hours: f64) -> Self {
        Self { days: -days, hours }
    }

    /// Apply the offset to `now`; offsets outside chrono's range leave `now`
    pub fn resolve(&self, now: NaiveDateTime) -> NaiveDateTime {
        let millis = ((self.days * 24.0 + self.hours) * 3_600_000.0).round() as i64;
        Duration::try_milliseconds(millis)
            .and_then(|offset| now.checked_add_signed(offset))
            .unwrap_or(now)
    }
}

/// Seed change with timestamps relative to the seeding instant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedChange {
    pub id: u32,
    pub title: String,
    pub change_type: String,
    pub requester: String,
    pub planned_start: RelativeTime,
    pub planned_end: RelativeTime,
    pub customer_impact: CustomerImpact,
    pub status: ChangeStatus,
    pub systems: Vec<u32>,
    pub rollback_plan: String,
    pub test_plan: String,
    pub steps: String,
}

/// Seed incident with timestamps relative to the seeding instant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedIncident {
    pub id: u32,
    pub title: String,
    pub severity: u8,
    pub started_at: RelativeTime,
    pub resolved_at: RelativeTime,
    pub systems: Vec<u32>,
    pub notes: String,
}

/// Template for a freshly seeded state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DemoData {
    #[serde(default)]
    pub systems: Vec<System>,
    #[serde(default)]
    pub incidents: Vec<SeedIncident>,
    #[serde(default)]
    pub changes: Vec<SeedChange>,
}

/// Full content configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppContent {
    pub brand: Brand,
    /// Views in navigation order; also the tour order
    #[serde(default)]
    pub nav: Vec<NavItem>,
    pub lookups: Lookups,
    /// Ordered rule catalog used for scoring
    pub risk_rules: Vec<RiskRule>,
    /// Template for first-run and reset seeding
    #[serde(default)]
    pub demo_data: DemoData,
}

impl AppContent {
    /// Load content from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self, ContentError> {
        let content: Self = serde_yaml::from_str(yaml)?;
        content.validate()?;
        Ok(content)
    }

    /// Load content from JSON
    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        let content: Self = serde_json::from_str(json)?;
        content.validate()?;
        Ok(content)
    }

    /// Load content from a file; `.json` is read as JSON, anything else as YAML
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ContentError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ContentError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json(&raw),
            _ => Self::from_yaml(&raw),
        }
    }

    /// Rule codes and system ids must be unique
    pub fn validate(&self) -> Result<(), ContentError> {
        let mut codes = HashSet::new();
        for rule in &self.risk_rules {
            if !codes.insert(rule.code.as_str()) {
                return Err(ContentError::DuplicateRule(rule.code.clone()));
            }
        }
        let mut ids = HashSet::new();
        for system in &self.demo_data.systems {
            if !ids.insert(system.id) {
                return Err(ContentError::DuplicateSystem(system.id));
            }
        }
        Ok(())
    }

    /// Swap the rule table, keeping everything else
    pub fn with_risk_rules(mut self, rules: Vec<RiskRule>) -> Self {
        self.risk_rules = rules;
        self
    }

    /// Swap the seed template
    pub fn with_demo_data(mut self, demo_data: DemoData) -> Self {
        self.demo_data = demo_data;
        self
    }

    /// The reference configuration of the demo
    pub fn reference() -> Self {
        Self {
            brand: Brand {
                name: "Change Risk Autopilot".to_string(),
                tagline: "Change management that learns from outages".to_string(),
                owner: "J Roque".to_string(),
            },
            nav: [
                ("dashboard", "Dashboard"),
                ("new_change", "New Change"),
                ("changes", "Changes"),
                ("incidents", "Incidents"),
                ("about", "About"),
            ]
            .into_iter()
            .map(|(id, label)| NavItem {
                id: id.to_string(),
                label: label.to_string(),
            })
            .collect(),
            lookups: Lookups {
                change_types: [
                    "patch",
                    "config",
                    "release",
                    "network",
                    "dns",
                    "access",
                    "maintenance",
                    "other",
                ]
                .into_iter()
                .map(String::from)
                .collect(),
                customer_impact: CustomerImpact::ALL.to_vec(),
                status: ChangeStatus::ALL.to_vec(),
            },
            risk_rules: vec![
                RiskRule::new("TIER3_SYSTEM", 25, "Tier 3 system included"),
                RiskRule::new("HIGH_IMPACT", 20, "Customer impact is high"),
                RiskRule::new("NO_ROLLBACK", 15, "Rollback plan is too short"),
                RiskRule::new("NO_TEST", 15, "Test plan is too short"),
                RiskRule::new("SHORT_NOTICE", 10, "Planned start is within 24 hours"),
                RiskRule::new("LONG_DURATION", 8, "Planned duration is longer than 2 hours"),
            ],
            demo_data: DemoData::reference(),
        }
    }
}

impl DemoData {
    /// Seed dataset of the reference configuration
    pub fn reference() -> Self {
        Self {
            systems: vec![
                System::new(1, "Core DNS", 3, "Internal and external DNS hosting"),
                System::new(2, "VPN Gateway", 3, "Remote access VPN"),
                System::new(3, "Customer Portal", 2, "Public web portal"),
                System::new(4, "File Share", 1, "Internal SMB file services"),
            ],
            incidents: vec![
                SeedIncident {
                    id: 101,
                    title: "Customer portal outage after release".to_string(),
                    severity: 2,
                    started_at: RelativeTime::days_ago(21.0, 0.0),
                    resolved_at: RelativeTime::days_ago(21.0, 0.75),
                    systems: vec![3],
                    notes: "Rollback restored service. Root cause was a bad config in deployment."
                        .to_string(),
                },
                SeedIncident {
                    id: 102,
                    title: "VPN authentication failures".to_string(),
                    severity: 1,
                    started_at: RelativeTime::days_ago(45.0, 0.0),
                    resolved_at: RelativeTime::days_ago(45.0, 2.0),
                    systems: vec![2],
                    notes: "Expired cert. Renewed cert and restarted service.".to_string(),
                },
            ],
            changes: vec![
                SeedChange {
                    id: 201,
                    title: "Patch VPN gateway OpenSSL".to_string(),
                    change_type: "patch".to_string(),
                    requester: "E. Engineer".to_string(),
                    planned_start: RelativeTime::days_from_now(2.0, 0.0),
                    planned_end: RelativeTime::days_from_now(2.0, 1.5),
                    customer_impact: CustomerImpact::Medium,
                    status: ChangeStatus::Submitted,
                    systems: vec![2],
                    rollback_plan: "Rollback: restore snapshot, reinstall previous package, restart VPN services, validate login.".to_string(),
                    test_plan: "Test: validate VPN login from test account, check logs, run smoke test from two networks.".to_string(),
                    steps: "1) Notify 2) Snapshot 3) Patch 4) Restart 5) Validate 6) Monitor".to_string(),
                },
                SeedChange {
                    id: 202,
                    title: "DNS record cleanup for legacy app".to_string(),
                    change_type: "dns".to_string(),
                    requester: "J Roque".to_string(),
                    planned_start: RelativeTime::days_from_now(0.25, 0.0),
                    planned_end: RelativeTime::days_from_now(0.25, 0.5),
                    customer_impact: CustomerImpact::High,
                    status: ChangeStatus::InReview,
                    systems: vec![1],
                    rollback_plan: "Rollback: revert DNS records to previous values and flush caches.".to_string(),
                    test_plan: "Test: nslookup internal and external, confirm app reachability.".to_string(),
                    steps: "1) Export zone 2) Update records 3) Validate 4) Monitor 30 min".to_string(),
                },
            ],
        }
    }
}
