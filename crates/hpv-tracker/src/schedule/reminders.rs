//! Reminder plans for an upcoming dose. Delivery belongs to the caller.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::DoseNumber;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReminderKind {
    #[serde(rename = "30_days")]
    ThirtyDays,
    #[serde(rename = "7_days")]
    SevenDays,
    #[serde(rename = "1_day")]
    OneDay,
    #[serde(rename = "due_today")]
    DueToday,
}

impl ReminderKind {
    pub const fn ordered() -> [Self; 4] {
        [Self::ThirtyDays, Self::SevenDays, Self::OneDay, Self::DueToday]
    }

    pub const fn days_before_due(self) -> i64 {
        match self {
            Self::ThirtyDays => 30,
            Self::SevenDays => 7,
            Self::OneDay => 1,
            Self::DueToday => 0,
        }
    }

    const fn phrase(self) -> &'static str {
        match self {
            Self::ThirtyDays => "due in 30 days",
            Self::SevenDays => "due in 7 days",
            Self::OneDay => "due tomorrow",
            Self::DueToday => "due today",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub dose_number: DoseNumber,
    pub kind: ReminderKind,
    pub scheduled_date: NaiveDate,
    pub title: String,
    pub body: String,
}

/// Reminders 30, 7 and 1 day(s) ahead of `due_date` plus one on the day itself.
///
/// Only reminders scheduled strictly after `today` are returned, earliest first.
pub fn reminder_plan(
    dose_number: DoseNumber,
    due_date: NaiveDate,
    profile_name: &str,
    today: NaiveDate,
) -> Vec<Reminder> {
    ReminderKind::ordered()
        .into_iter()
        .filter_map(|kind| {
            let scheduled_date =
                due_date.checked_sub_signed(Duration::days(kind.days_before_due()))?;
            (scheduled_date > today).then(|| Reminder {
                dose_number,
                kind,
                scheduled_date,
                title: format!("Dose {dose_number} Reminder"),
                body: format!(
                    "{profile_name}'s dose {dose_number} is {}. Please visit a clinic to get vaccinated.",
                    kind.phrase()
                ),
            })
        })
        .collect()
}
