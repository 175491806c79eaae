//! Dose scheduling: schedule type, next dose, due dates and milestone progress.

mod doses;
pub mod reminders;

#[cfg(test)]
mod tests;

pub use doses::{DoseHistory, DoseHistoryError, DoseNumber, VaccineDose};
pub use reminders::{reminder_plan, Reminder, ReminderKind};

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::program::SchedulePolicy;

/// Age (in completed years) from which a first dose puts someone on three doses.
pub const THREE_DOSE_AGE_THRESHOLD: u32 = 15;

/// Default spacing between dose 1 and dose 2 on the two-dose schedule.
pub const DEFAULT_MONTHS_AFTER_DOSE1: u32 = 6;

/// Regimen followed by a series. Fixed once the series has started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleType {
    TwoDose,
    ThreeDose,
}

impl ScheduleType {
    pub const fn total_doses(self) -> usize {
        match self {
            ScheduleType::TwoDose => 2,
            ScheduleType::ThreeDose => 3,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ScheduleType::TwoDose => "two_dose",
            ScheduleType::ThreeDose => "three_dose",
        }
    }
}

/// Series status as stored alongside the schedule type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesStatus {
    NotStarted,
    #[serde(rename = "dose_1_complete")]
    Dose1Complete,
    #[serde(rename = "dose_2_complete")]
    Dose2Complete,
    /// Loaded from stored records; a third dose completes both current schedules.
    #[serde(rename = "dose_3_complete")]
    Dose3Complete,
    SeriesComplete,
}

/// Two doses only for people under 15 who are not immunocompromised.
///
/// Call this once, with the age at the first dose, and store the result with the series;
/// later birthdays or changes in immune status must not move an open series.
pub fn determine_schedule_type(age_at_first_dose: u32, immunocompromised: bool) -> ScheduleType {
    if age_at_first_dose < THREE_DOSE_AGE_THRESHOLD && !immunocompromised {
        ScheduleType::TwoDose
    } else {
        ScheduleType::ThreeDose
    }
}

impl SchedulePolicy {
    pub fn schedule_type(self, age_at_first_dose: u32, immunocompromised: bool) -> ScheduleType {
        match self {
            SchedulePolicy::CdcStyle2Or3 => {
                determine_schedule_type(age_at_first_dose, immunocompromised)
            }
            SchedulePolicy::Fixed3Dose => ScheduleType::ThreeDose,
        }
    }
}

/// `None` once every dose in the schedule has been given.
pub fn next_dose_number(history: &DoseHistory, schedule_type: ScheduleType) -> Option<DoseNumber> {
    let completed = history.len();
    if completed >= schedule_type.total_doses() {
        return None;
    }

    u8::try_from(completed + 1)
        .ok()
        .and_then(|next| DoseNumber::try_from(next).ok())
}

/// Due date of the next dose, anchored on the date of dose 1.
///
/// Two-dose series use `months_after_dose1`. Three-dose series always use 2 and 6 months
/// after dose 1, regardless of `months_after_dose1`.
pub fn calculate_due_date(
    history: &DoseHistory,
    schedule_type: ScheduleType,
    months_after_dose1: u32,
) -> Option<NaiveDate> {
    let anchor = history.first()?.date_administered;
    let last = history.last()?.dose_number;

    let months = match (schedule_type, last) {
        (ScheduleType::TwoDose, DoseNumber::First) => months_after_dose1,
        (ScheduleType::ThreeDose, DoseNumber::First) => 2,
        (ScheduleType::ThreeDose, DoseNumber::Second) => 6,
        _ => return None,
    };

    anchor.checked_add_months(Months::new(months))
}

/// Milestone progress percentage: 0, 25, 50, 75 or 100.
///
/// Starting the series is weighted more than later doses, so dose 1 of a two-dose
/// series jumps straight to 75.
pub fn calculate_progress(
    history: &DoseHistory,
    schedule_type: ScheduleType,
    eligibility_complete: bool,
    clinic_found: bool,
) -> u8 {
    if !eligibility_complete {
        return 0;
    }
    if !clinic_found {
        return 25;
    }

    match (schedule_type, history.len()) {
        (_, 0) => 25,
        (ScheduleType::TwoDose, 1) => 75,
        (ScheduleType::TwoDose, _) => 100,
        (ScheduleType::ThreeDose, 1) => 50,
        (ScheduleType::ThreeDose, 2) => 75,
        (ScheduleType::ThreeDose, _) => 100,
    }
}

pub fn series_status(history: &DoseHistory, schedule_type: ScheduleType) -> SeriesStatus {
    if history.len() >= schedule_type.total_doses() {
        return SeriesStatus::SeriesComplete;
    }

    match history.last().map(|dose| dose.dose_number) {
        None => SeriesStatus::NotStarted,
        Some(DoseNumber::First) => SeriesStatus::Dose1Complete,
        Some(DoseNumber::Second) => SeriesStatus::Dose2Complete,
        Some(DoseNumber::Third) => SeriesStatus::Dose3Complete,
    }
}

/// Everything a dashboard needs about a series at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesSnapshot {
    pub schedule_type: ScheduleType,
    pub doses_completed: usize,
    pub next_dose: Option<DoseNumber>,
    pub due_date: Option<NaiveDate>,
    pub progress: u8,
    pub status: SeriesStatus,
}

impl SeriesSnapshot {
    pub fn compute(
        history: &DoseHistory,
        schedule_type: ScheduleType,
        months_after_dose1: u32,
        eligibility_complete: bool,
        clinic_found: bool,
    ) -> Self {
        Self {
            schedule_type,
            doses_completed: history.len(),
            next_dose: next_dose_number(history, schedule_type),
            due_date: calculate_due_date(history, schedule_type, months_after_dose1),
            progress: calculate_progress(
                history,
                schedule_type,
                eligibility_complete,
                clinic_found,
            ),
            status: series_status(history, schedule_type),
        }
    }
}
