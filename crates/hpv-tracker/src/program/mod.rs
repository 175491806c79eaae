//! Program policy parameters supplied whole to the decision engines.

mod clinics;

pub use clinics::{Clinic, ClinicDirectory, ClinicDirectoryError};

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Which sexes the program currently vaccinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SexEligibility {
    All,
    FemaleOnly,
}

/// Dosing policy the program follows when a series is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchedulePolicy {
    /// Two doses under 15 unless immunocompromised, three otherwise.
    #[serde(rename = "cdc_style_2_or_3")]
    CdcStyle2Or3,
    /// Every vaccinee receives three doses.
    #[serde(rename = "fixed_3_dose")]
    Fixed3Dose,
}

/// Read-only program configuration.
/// Every listed key is required; extra keys in the document are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramConfig {
    pub min_age_years: u32,
    pub routine_age_max_years: u32,
    pub sex_eligibility: SexEligibility,
    pub schedule_policy: SchedulePolicy,
    pub dose2_months_after_dose1: u32,
    pub allow_catchup_age_max_years: u32,
    /// Presentation-only copy variant tag.
    pub copy_variant: String,
}

impl ProgramConfig {
    /// Routine 9-14 program with catch-up through 45, open to all sexes.
    pub fn standard() -> Self {
        Self {
            min_age_years: 9,
            routine_age_max_years: 14,
            sex_eligibility: SexEligibility::All,
            schedule_policy: SchedulePolicy::CdcStyle2Or3,
            dose2_months_after_dose1: 6,
            allow_catchup_age_max_years: 45,
            copy_variant: "default".to_string(),
        }
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ProgramConfigError> {
        let config: Self = serde_json::from_str(raw).map_err(ProgramConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ProgramConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ProgramConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Reject configurations that would silently skew eligibility decisions.
    pub fn validate(&self) -> Result<(), ProgramConfigError> {
        if self.min_age_years > self.routine_age_max_years {
            return Err(ProgramConfigError::MinAgeAboveRoutineMax {
                min_age_years: self.min_age_years,
                routine_age_max_years: self.routine_age_max_years,
            });
        }

        if self.dose2_months_after_dose1 == 0 {
            return Err(ProgramConfigError::ZeroDoseInterval);
        }

        Ok(())
    }
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProgramConfigError {
    #[error("failed to read program config at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("program config is malformed: {0}")]
    Parse(#[source] serde_json::Error),
    #[error(
        "min_age_years ({min_age_years}) exceeds routine_age_max_years ({routine_age_max_years})"
    )]
    MinAgeAboveRoutineMax {
        min_age_years: u32,
        routine_age_max_years: u32,
    },
    #[error("dose2_months_after_dose1 must be at least one month")]
    ZeroDoseInterval,
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"{
        "min_age_years": 9,
        "routine_age_max_years": 14,
        "sex_eligibility": "female_only",
        "schedule_policy": "cdc_style_2_or_3",
        "dose2_months_after_dose1": 6,
        "allow_catchup_age_max_years": 26,
        "copy_variant": "sw-KE"
    }"#;

    #[test]
    fn parses_complete_document() {
        let config = ProgramConfig::from_json_str(VALID).expect("config parses");
        assert_eq!(config.sex_eligibility, SexEligibility::FemaleOnly);
        assert_eq!(config.schedule_policy, SchedulePolicy::CdcStyle2Or3);
        assert_eq!(config.allow_catchup_age_max_years, 26);
        assert_eq!(config.copy_variant, "sw-KE");
    }

    #[test]
    fn ignores_keys_outside_the_program_fields() {
        let raw = VALID.replace(
            r#""copy_variant": "sw-KE""#,
            r#""copy_variant": "sw-KE", "updated_by": "admin@example.org""#,
        );
        let config = ProgramConfig::from_json_str(&raw).expect("extra keys ignored");
        assert_eq!(config, ProgramConfig::from_json_str(VALID).expect("config parses"));
    }

    #[test]
    fn accepts_fixed_three_dose_policy() {
        let raw = VALID.replace("cdc_style_2_or_3", "fixed_3_dose");
        let config = ProgramConfig::from_json_str(&raw).expect("config parses");
        assert_eq!(config.schedule_policy, SchedulePolicy::Fixed3Dose);
    }

    #[test]
    fn rejects_missing_field() {
        let raw = VALID.replace(r#""copy_variant": "sw-KE""#, r#""unused": 1"#);
        match ProgramConfig::from_json_str(&raw) {
            Err(ProgramConfigError::Parse(_)) => {}
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_sex_rule() {
        let raw = VALID.replace("female_only", "boys_only");
        assert!(matches!(
            ProgramConfig::from_json_str(&raw),
            Err(ProgramConfigError::Parse(_))
        ));
    }

    #[test]
    fn rejects_inverted_age_window() {
        let mut config = ProgramConfig::standard();
        config.min_age_years = 20;
        match config.validate() {
            Err(ProgramConfigError::MinAgeAboveRoutineMax {
                min_age_years,
                routine_age_max_years,
            }) => {
                assert_eq!(min_age_years, 20);
                assert_eq!(routine_age_max_years, 14);
            }
            other => panic!("expected inverted window error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_zero_month_interval() {
        let mut config = ProgramConfig::standard();
        config.dose2_months_after_dose1 = 0;
        assert!(matches!(
            config.validate(),
            Err(ProgramConfigError::ZeroDoseInterval)
        ));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = ProgramConfig::from_path("/nonexistent/program.json").expect_err("missing file");
        assert!(err.to_string().contains("/nonexistent/program.json"));
    }
}
