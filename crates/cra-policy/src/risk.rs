//! Risk scoring for changes
//!
//! Sums the points of every triggered rule and buckets the total.

use chrono::NaiveDateTime;
use cra_core::{Change, RiskRule, System};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::rule::{reference_catalog, RuleCode, RuleContext, RuleTable};

static REFERENCE_RULES: Lazy<Vec<RiskRule>> = Lazy::new(reference_catalog);

/// Risk level of a change
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// 0-14
    #[default]
    Low = 0,
    /// 15-29
    Medium = 1,
    /// 30-49
    High = 2,
    /// 50 and above
    Critical = 3,
}

impl RiskLevel {
    /// Bucket a point total; each lower bound is inclusive
    pub fn from_total(total: u32) -> Self {
        match total {
            50.. => RiskLevel::Critical,
            30..=49 => RiskLevel::High,
            15..=29 => RiskLevel::Medium,
            _ => RiskLevel::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        }
    }

    /// Smallest total that lands in this level
    pub fn floor(&self) -> u32 {
        match self {
            RiskLevel::Low => 0,
            RiskLevel::Medium => 15,
            RiskLevel::High => 30,
            RiskLevel::Critical => 50,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A triggered rule, copied from the rule table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskReason {
    pub code: String,
    pub points: u32,
    pub message: String,
}

impl From<&RiskRule> for RiskReason {
    fn from(rule: &RiskRule) -> Self {
        Self {
            code: rule.code.clone(),
            points: rule.points,
            message: rule.message.clone(),
        }
    }
}

/// Derived risk of a change; recomputed on every read, never persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RiskAssessment {
    pub total: u32,
    pub level: RiskLevel,
    /// Triggered rules in evaluation order
    pub reasons: Vec<RiskReason>,
}

impl RiskAssessment {
    pub fn new(reasons: Vec<RiskReason>) -> Self {
        // Saturates at u32::MAX for oversized injected tables
        let total = reasons
            .iter()
            .fold(0u32, |total, r| total.saturating_add(r.points));
        Self {
            total,
            level: RiskLevel::from_total(total),
            reasons,
        }
    }

    /// Label such as `critical • 93`
    pub fn summary(&self) -> String {
        format!("{} • {}", self.level, self.total)
    }

    pub fn codes(&self) -> Vec<&str> {
        self.reasons.iter().map(|r| r.code.as_str()).collect()
    }

    pub fn has(&self, code: RuleCode) -> bool {
        self.reasons.iter().any(|r| r.code == code.as_str())
    }
}

/// Scores changes against a fixed rule table
#[derive(Debug, Clone, Copy)]
pub struct RiskScorer<'a> {
    table: RuleTable<'a>,
}

impl<'a> RiskScorer<'a> {
    pub fn new(rules: &'a [RiskRule]) -> Self {
        Self {
            table: RuleTable::new(rules),
        }
    }

    /// Score with the reference catalog
    pub fn reference() -> RiskScorer<'static> {
        RiskScorer::new(REFERENCE_RULES.as_slice())
    }

    /// Evaluate every rule once, in order, and sum the triggered points.
    ///
    /// Never fails: unknown system ids are skipped and unparseable
    /// timestamps leave the time-based rules untriggered.
    pub fn score(&self, change: &Change, systems: &[System], now: NaiveDateTime) -> RiskAssessment {
        let context = RuleContext::from_change(change, systems, now);

        let reasons: Vec<RiskReason> = RuleCode::ORDER
            .iter()
            .filter(|code| code.triggers(&context))
            .filter_map(|code| self.table.find(*code))
            .map(RiskReason::from)
            .collect();

        let assessment = RiskAssessment::new(reasons);
        debug!(
            change_id = change.id,
            total = assessment.total,
            level = %assessment.level,
            "scored change"
        );
        assessment
    }
}

/// Score a change against a system catalog and rule table at `now`
pub fn score(
    change: &Change,
    systems: &[System],
    rules: &[RiskRule],
    now: NaiveDateTime,
) -> RiskAssessment {
    RiskScorer::new(rules).score(change, systems, now)
}

/// Convenience function to score with the reference rule table
pub fn assess(change: &Change, systems: &[System], now: NaiveDateTime) -> RiskAssessment {
    RiskScorer::reference().score(change, systems, now)
}
