use chrono::NaiveDate;
use hpv_tracker::eligibility::age;
use hpv_tracker::eligibility::{EligibilityEngine, Sex};
use hpv_tracker::error::AppError;
use hpv_tracker::program::{ClinicDirectory, ProgramConfig, ProgramConfigError};
use hpv_tracker::schedule::{DoseNumber, ScheduleType, VaccineDose};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Program-wide, read-only inputs shared by every request.
#[derive(Debug, Clone)]
pub(crate) struct ProgramState {
    pub(crate) engine: EligibilityEngine,
    pub(crate) clinics: ClinicDirectory,
}

impl ProgramState {
    pub(crate) fn new(
        config: ProgramConfig,
        clinics: ClinicDirectory,
    ) -> Result<Self, ProgramConfigError> {
        Ok(Self {
            engine: EligibilityEngine::new(config)?,
            clinics,
        })
    }

    pub(crate) fn config(&self) -> &ProgramConfig {
        self.engine.config()
    }
}

/// A stored schedule type wins; otherwise derive one from the age at the first dose.
pub(crate) fn resolve_schedule_type(
    stored: Option<ScheduleType>,
    age_at_first_dose: Option<u32>,
    immunocompromised: bool,
    config: &ProgramConfig,
) -> Result<ScheduleType, AppError> {
    if let Some(schedule_type) = stored {
        return Ok(schedule_type);
    }

    age_at_first_dose
        .map(|age| config.schedule_policy.schedule_type(age, immunocompromised))
        .ok_or_else(|| {
            AppError::InvalidInput("schedule_type or age_at_first_dose is required".to_string())
        })
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    age::parse_date(raw).map_err(|err| err.to_string())
}

pub(crate) fn parse_sex(raw: &str) -> Result<Sex, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "female" | "f" => Ok(Sex::Female),
        "male" | "m" => Ok(Sex::Male),
        other => Err(format!("'{other}' is not a recognised sex (female|male)")),
    }
}

pub(crate) fn parse_schedule_type(raw: &str) -> Result<ScheduleType, String> {
    match raw.trim().to_ascii_lowercase().replace('-', "_").as_str() {
        "two_dose" | "2" => Ok(ScheduleType::TwoDose),
        "three_dose" | "3" => Ok(ScheduleType::ThreeDose),
        other => Err(format!("'{other}' is not a schedule type (two_dose|three_dose)")),
    }
}

/// Parses `N:YYYY-MM-DD`, e.g. `1:2024-01-10`.
pub(crate) fn parse_dose(raw: &str) -> Result<VaccineDose, String> {
    let (number, date) = raw
        .split_once(':')
        .ok_or_else(|| format!("'{raw}' must look like N:YYYY-MM-DD"))?;
    let number: u8 = number
        .trim()
        .parse()
        .map_err(|_| format!("'{number}' is not a dose number"))?;
    let dose_number = DoseNumber::try_from(number).map_err(|err| err.to_string())?;
    Ok(VaccineDose::new(dose_number, parse_date(date)?))
}

pub(crate) fn deserialize_optional_date<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.map(|value| parse_date(&value).map_err(serde::de::Error::custom))
        .transpose()
}
