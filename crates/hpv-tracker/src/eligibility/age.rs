//! Completed-years age arithmetic over calendar dates.

use chrono::{Datelike, Local, NaiveDate};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AgeError {
    #[error("'{value}' is not a valid calendar date (expected YYYY-MM-DD)")]
    InvalidDate { value: String },
    #[error("date of birth {date_of_birth} is after {today}")]
    BornInFuture {
        date_of_birth: NaiveDate,
        today: NaiveDate,
    },
}

/// The local calendar date. Ages derived from it change over time and must not be cached.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, AgeError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| AgeError::InvalidDate {
        value: raw.to_string(),
    })
}

/// Whole years completed between `date_of_birth` and `today`.
///
/// A person turns N on the Nth anniversary of their birth month/day, never before.
/// Someone born on 29 February turns a year older on 1 March in common years.
pub fn age_on(date_of_birth: NaiveDate, today: NaiveDate) -> Result<u32, AgeError> {
    if date_of_birth > today {
        return Err(AgeError::BornInFuture {
            date_of_birth,
            today,
        });
    }

    let mut age = today.year() - date_of_birth.year();
    if (today.month(), today.day()) < (date_of_birth.month(), date_of_birth.day()) {
        age -= 1;
    }

    Ok(age as u32)
}

/// Age from an optional ISO date string, relative to the current date.
///
/// `Ok(None)` means no date of birth was supplied; a blank string counts as missing.
pub fn age_from_date_of_birth(date_of_birth: Option<&str>) -> Result<Option<u32>, AgeError> {
    age_from_date_of_birth_on(date_of_birth, today())
}

pub fn age_from_date_of_birth_on(
    date_of_birth: Option<&str>,
    today: NaiveDate,
) -> Result<Option<u32>, AgeError> {
    match date_of_birth.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => {
            let date_of_birth = parse_date(raw)?;
            age_on(date_of_birth, today).map(Some)
        }
    }
}
