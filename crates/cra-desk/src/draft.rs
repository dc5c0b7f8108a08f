//! Change drafts: raw form input validated into a `Change`
use chrono::{Duration, NaiveDateTime};
use cra_core::{
    parse_local, AppContent, Change, ChangeStatus, CustomerImpact, LocalTimestamp,
    ValidationError,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Change type used when the form leaves it blank
pub const FALLBACK_CHANGE_TYPE: &str = "other";

/// Form defaults: start two days out, one hour long
pub fn default_window(now: NaiveDateTime) -> (LocalTimestamp, LocalTimestamp) {
    let start = now + Duration::hours(48);
    let end = start + Duration::hours(1);
    (LocalTimestamp::from_datetime(start), LocalTimestamp::from_datetime(end))
}

/// Unvalidated input for a new change, as submitted by a form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChangeDraft {
    pub title: String,
    pub change_type: Option<String>,
    pub customer_impact: Option<CustomerImpact>,
    pub planned_start: String,
    pub planned_end: String,
    pub systems: Vec<u32>,
    pub rollback_plan: String,
    pub test_plan: String,
    pub steps: String,
    /// Defaults to the brand owner
    pub requester: Option<String>,
}

impl ChangeDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// A draft pre-filled with the default planning window
    pub fn blank(now: NaiveDateTime) -> Self {
        let (start, end) = default_window(now);
        Self {
            planned_start: start.as_str().to_string(),
            planned_end: end.as_str().to_string(),
            ..Default::default()
        }
    }

    pub fn change_type(mut self, change_type: impl Into<String>) -> Self {
        self.change_type = Some(change_type.into());
        self
    }

    pub fn impact(mut self, impact: CustomerImpact) -> Self {
        self.customer_impact = Some(impact);
        self
    }

    pub fn window(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.planned_start = start.into();
        self.planned_end = end.into();
        self
    }

    pub fn systems(mut self, ids: impl IntoIterator<Item = u32>) -> Self {
        self.systems = ids.into_iter().collect();
        self
    }

    pub fn rollback_plan(mut self, plan: impl Into<String>) -> Self {
        self.rollback_plan = plan.into();
        self
    }

    pub fn test_plan(mut self, plan: impl Into<String>) -> Self {
        self.test_plan = plan.into();
        self
    }

    pub fn steps(mut self, steps: impl Into<String>) -> Self {
        self.steps = steps.into();
        self
    }

    pub fn requester(mut self, requester: impl Into<String>) -> Self {
        self.requester = Some(requester.into());
        self
    }

    /// Validate against the lookups and build a submitted change with `id`
    pub fn into_change(self, id: u32, content: &AppContent) -> Result<Change, ValidationError> {
        let mut systems = self.systems;
        let mut seen = HashSet::new();
        systems.retain(|sys| seen.insert(*sys));
        if systems.is_empty() {
            return Err(ValidationError::NoSystems);
        }

        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::MissingField("title"));
        }

        let start = required_timestamp("plannedStart", &self.planned_start)?;
        let end = required_timestamp("plannedEnd", &self.planned_end)?;
        if end < start {
            return Err(ValidationError::EndBeforeStart {
                start: self.planned_start.trim().to_string(),
                end: self.planned_end.trim().to_string(),
            });
        }

        let change_type = match self.change_type.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => t.to_string(),
            _ => FALLBACK_CHANGE_TYPE.to_string(),
        };
        if !content.lookups.change_types.contains(&change_type) {
            return Err(ValidationError::UnknownChangeType(change_type));
        }

        let customer_impact = self.customer_impact.unwrap_or_default();
        if !content.lookups.customer_impact.contains(&customer_impact) {
            return Err(ValidationError::ImpactNotOffered(customer_impact));
        }

        let requester = match self.requester {
            Some(r) if !r.trim().is_empty() => r.trim().to_string(),
            _ => content.brand.owner.clone(),
        };

        Ok(Change {
            id,
            title: title.to_string(),
            change_type,
            requester,
            planned_start: LocalTimestamp::from_datetime(start),
            planned_end: LocalTimestamp::from_datetime(end),
            customer_impact,
            status: ChangeStatus::Submitted,
            systems,
            rollback_plan: self.rollback_plan.trim().to_string(),
            test_plan: self.test_plan.trim().to_string(),
            steps: self.steps.trim().to_string(),
        })
    }
}

fn required_timestamp(field: &'static str, raw: &str) -> Result<NaiveDateTime, ValidationError> {
    if raw.trim().is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    parse_local(raw).ok_or_else(|| ValidationError::MalformedTimestamp {
        field,
        value: raw.to_string(),
    })
}
