//! Symptom triage. Bleeding, pain and discharge changes outrank visible bumps.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Urgency of a clinic visit, ordered from least to most urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriageLevel {
    Routine,
    Soon,
    UrgentSameWeek,
}

impl TriageLevel {
    pub const fn label(self) -> &'static str {
        match self {
            TriageLevel::UrgentSameWeek => "urgent_same_week",
            TriageLevel::Soon => "soon",
            TriageLevel::Routine => "routine",
        }
    }

    pub const fn message(self) -> &'static str {
        match self {
            TriageLevel::UrgentSameWeek => "Please contact a clinic this week for evaluation.",
            TriageLevel::Soon => "Consider scheduling a clinic visit soon.",
            TriageLevel::Routine => "No urgent symptoms detected. Continue with routine care.",
        }
    }
}

/// Self-reported symptoms. Unanswered questions count as "no".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SymptomReport {
    pub genital_anal_bumps: bool,
    pub unusual_bleeding: bool,
    pub pain_during_sex: bool,
    pub pelvic_pain: bool,
    pub discharge_changes: bool,
}

struct TriageRule {
    name: &'static str,
    applies: fn(&SymptomReport) -> bool,
    level: TriageLevel,
}

const TRIAGE_RULES: [TriageRule; 2] = [
    TriageRule {
        name: "bleeding_pain_or_discharge",
        applies: has_urgent_symptom,
        level: TriageLevel::UrgentSameWeek,
    },
    TriageRule {
        name: "genital_anal_bumps",
        applies: has_bumps,
        level: TriageLevel::Soon,
    },
];

fn has_urgent_symptom(report: &SymptomReport) -> bool {
    report.unusual_bleeding || report.pelvic_pain || report.pain_during_sex || report.discharge_changes
}

fn has_bumps(report: &SymptomReport) -> bool {
    report.genital_anal_bumps
}

/// First matching rule wins; no match is routine care.
pub fn classify(symptoms: &SymptomReport) -> TriageLevel {
    match TRIAGE_RULES.iter().find(|rule| (rule.applies)(symptoms)) {
        Some(rule) => {
            debug!(rule = rule.name, level = rule.level.label(), "triage rule matched");
            rule.level
        }
        None => TriageLevel::Routine,
    }
}
