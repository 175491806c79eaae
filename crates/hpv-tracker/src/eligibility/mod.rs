//! Eligibility screening: medical contraindications first, then program age and sex rules.
//!
//! Rules are held in ordered tables (see `rules`) and the first match wins, so the priority
//! order can be audited and tested rule by rule.

pub mod age;
mod domain;
mod policy;
mod rules;

#[cfg(test)]
mod tests;

pub use age::AgeError;
pub use domain::{Profile, ScreeningAnswers, Sex};
pub use policy::EligibilityStatus;

use crate::program::{ProgramConfig, ProgramConfigError};
use chrono::NaiveDate;
use rules::{first_match, ProgramFacts, Rule};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum EligibilityError {
    #[error("cannot determine age: {0}")]
    Age(#[from] AgeError),
    #[error("invalid program configuration: {0}")]
    Config(#[from] ProgramConfigError),
}

/// Status together with the rule that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EligibilityDecision {
    pub status: EligibilityStatus,
    pub rule: &'static str,
}

impl EligibilityDecision {
    fn from_rule<F>(rule: &Rule<F>) -> Self {
        Self {
            status: rule.status,
            rule: rule.name,
        }
    }

    pub fn message(&self) -> &'static str {
        self.status.message()
    }
}

/// Stateless evaluator bound to one validated program configuration.
#[derive(Debug, Clone)]
pub struct EligibilityEngine {
    config: ProgramConfig,
}

impl EligibilityEngine {
    pub fn new(config: ProgramConfig) -> Result<Self, ProgramConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ProgramConfig {
        &self.config
    }

    /// Evaluate one screening event as of `today`.
    ///
    /// Age is only resolved once the medical rules have passed, so a bad date of birth
    /// never masks a contraindication.
    pub fn evaluate(
        &self,
        profile: &Profile,
        screening: &ScreeningAnswers,
        today: NaiveDate,
    ) -> Result<EligibilityDecision, EligibilityError> {
        if let Some(rule) = first_match(&rules::SCREENING_RULES, screening) {
            return Ok(self.decided(rule));
        }

        let Some(age) = resolve_age(profile, today)? else {
            return Ok(self.decided(&rules::UNRESOLVED_AGE_RULE));
        };

        let facts = ProgramFacts::new(age, profile.sex, &self.config);
        let rule = first_match(&rules::PROGRAM_RULES, &facts).unwrap_or(&rules::ELIGIBLE_RULE);
        Ok(self.decided(rule))
    }

    fn decided<F>(&self, rule: &Rule<F>) -> EligibilityDecision {
        let decision = EligibilityDecision::from_rule(rule);
        debug!(
            rule = decision.rule,
            status = decision.status.label(),
            "eligibility rule matched"
        );
        decision
    }
}

/// Resolve a profile's age: an explicit `age_years` wins, otherwise derive it from the
/// date of birth. `Ok(None)` when neither is present or the date of birth is blank.
pub fn resolve_age(profile: &Profile, today: NaiveDate) -> Result<Option<u32>, AgeError> {
    if let Some(age) = profile.age_years {
        return Ok(Some(age));
    }

    age::age_from_date_of_birth_on(profile.date_of_birth.as_deref(), today)
}

/// One-shot evaluation against today's date.
pub fn evaluate_eligibility(
    profile: &Profile,
    screening: &ScreeningAnswers,
    config: &ProgramConfig,
) -> Result<EligibilityStatus, EligibilityError> {
    let engine = EligibilityEngine::new(config.clone())?;
    let decision = engine.evaluate(profile, screening, age::today())?;
    Ok(decision.status)
}
