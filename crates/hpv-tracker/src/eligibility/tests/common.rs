use chrono::NaiveDate;

use crate::eligibility::{EligibilityEngine, Profile, ScreeningAnswers, Sex};
use crate::program::{ProgramConfig, SchedulePolicy, SexEligibility};

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn evaluation_day() -> NaiveDate {
    date(2024, 1, 10)
}

pub(super) fn program_config() -> ProgramConfig {
    ProgramConfig {
        min_age_years: 9,
        routine_age_max_years: 14,
        sex_eligibility: SexEligibility::All,
        schedule_policy: SchedulePolicy::CdcStyle2Or3,
        dose2_months_after_dose1: 6,
        allow_catchup_age_max_years: 45,
        copy_variant: "default".to_string(),
    }
}

pub(super) fn girls_only_config() -> ProgramConfig {
    ProgramConfig {
        sex_eligibility: SexEligibility::FemaleOnly,
        allow_catchup_age_max_years: 14,
        ..program_config()
    }
}

pub(super) fn engine() -> EligibilityEngine {
    EligibilityEngine::new(program_config()).expect("valid config")
}

pub(super) fn clear_screening() -> ScreeningAnswers {
    ScreeningAnswers::default()
}

pub(super) fn profile(age_years: u32, sex: Sex) -> Profile {
    Profile {
        display_name: Some("Amina".to_string()),
        age_years: Some(age_years),
        sex: Some(sex),
        ..Profile::default()
    }
}
