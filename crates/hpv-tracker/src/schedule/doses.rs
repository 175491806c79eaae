use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DoseHistoryError {
    #[error("dose number {0} is outside the 1-3 range")]
    InvalidDoseNumber(u8),
    #[error("dose {0} is recorded more than once")]
    DuplicateDose(DoseNumber),
    #[error("dose {0} is missing from the series")]
    MissingDose(DoseNumber),
    #[error("dose {dose} on {date} predates the previous dose on {previous}")]
    OutOfOrder {
        dose: DoseNumber,
        date: NaiveDate,
        previous: NaiveDate,
    },
}

/// Position of a dose within a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum DoseNumber {
    First = 1,
    Second = 2,
    Third = 3,
}

impl DoseNumber {
    pub const fn get(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for DoseNumber {
    type Error = DoseHistoryError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(DoseNumber::First),
            2 => Ok(DoseNumber::Second),
            3 => Ok(DoseNumber::Third),
            other => Err(DoseHistoryError::InvalidDoseNumber(other)),
        }
    }
}

impl From<DoseNumber> for u8 {
    fn from(value: DoseNumber) -> Self {
        value.get()
    }
}

impl fmt::Display for DoseNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// A completed dose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaccineDose {
    pub dose_number: DoseNumber,
    pub date_administered: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

impl VaccineDose {
    pub fn new(dose_number: DoseNumber, date_administered: NaiveDate) -> Self {
        Self {
            dose_number,
            date_administered,
            photo_url: None,
        }
    }
}

/// Doses keyed by dose number.
///
/// Construction guarantees the numbers run 1..=n without gaps or duplicates and that
/// administration dates never run backwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(into = "Vec<VaccineDose>")]
pub struct DoseHistory {
    doses: BTreeMap<DoseNumber, VaccineDose>,
}

impl DoseHistory {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(doses: impl IntoIterator<Item = VaccineDose>) -> Result<Self, DoseHistoryError> {
        let mut by_number = BTreeMap::new();
        for dose in doses {
            let number = dose.dose_number;
            if by_number.insert(number, dose).is_some() {
                return Err(DoseHistoryError::DuplicateDose(number));
            }
        }

        let mut previous: Option<NaiveDate> = None;
        for (expected, (number, dose)) in (1u8..).zip(by_number.iter()) {
            if number.get() != expected {
                let missing = DoseNumber::try_from(expected)?;
                return Err(DoseHistoryError::MissingDose(missing));
            }

            if let Some(previous) = previous {
                if dose.date_administered < previous {
                    return Err(DoseHistoryError::OutOfOrder {
                        dose: *number,
                        date: dose.date_administered,
                        previous,
                    });
                }
            }
            previous = Some(dose.date_administered);
        }

        Ok(Self { doses: by_number })
    }

    /// A new history with `dose` appended; the original is left untouched.
    pub fn with_dose(&self, dose: VaccineDose) -> Result<Self, DoseHistoryError> {
        Self::new(self.doses.values().cloned().chain(std::iter::once(dose)))
    }

    pub fn len(&self) -> usize {
        self.doses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doses.is_empty()
    }

    pub fn get(&self, number: DoseNumber) -> Option<&VaccineDose> {
        self.doses.get(&number)
    }

    pub fn first(&self) -> Option<&VaccineDose> {
        self.doses.values().next()
    }

    /// The dose with the highest dose number.
    pub fn last(&self) -> Option<&VaccineDose> {
        self.doses.values().next_back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &VaccineDose> {
        self.doses.values()
    }
}

impl From<DoseHistory> for Vec<VaccineDose> {
    fn from(history: DoseHistory) -> Self {
        history.doses.into_values().collect()
    }
}

impl TryFrom<Vec<VaccineDose>> for DoseHistory {
    type Error = DoseHistoryError;

    fn try_from(doses: Vec<VaccineDose>) -> Result<Self, Self::Error> {
        Self::new(doses)
    }
}

impl<'de> Deserialize<'de> for DoseHistory {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let doses = Vec::<VaccineDose>::deserialize(deserializer)?;
        Self::new(doses).map_err(serde::de::Error::custom)
    }
}
