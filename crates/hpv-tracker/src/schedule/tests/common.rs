use chrono::NaiveDate;

use crate::schedule::{DoseHistory, DoseNumber, VaccineDose};

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn dose(number: u8, administered: NaiveDate) -> VaccineDose {
    VaccineDose::new(
        DoseNumber::try_from(number).expect("dose number in range"),
        administered,
    )
}

/// History with `count` doses, the first on 2024-01-10 and one month apart after that.
pub(super) fn history(count: u8) -> DoseHistory {
    let doses = (1..=count).map(|number| {
        let administered = date(2024, u32::from(number), 10);
        dose(number, administered)
    });
    DoseHistory::new(doses).expect("valid history")
}
