use super::common::*;
use crate::program::SchedulePolicy;
use crate::schedule::{
    calculate_due_date, determine_schedule_type, next_dose_number, DoseHistory, DoseNumber,
    ScheduleType, DEFAULT_MONTHS_AFTER_DOSE1,
};

#[test]
fn schedule_type_depends_on_age_and_immune_status() {
    assert_eq!(determine_schedule_type(9, false), ScheduleType::TwoDose);
    assert_eq!(determine_schedule_type(14, false), ScheduleType::TwoDose);
    assert_eq!(determine_schedule_type(15, false), ScheduleType::ThreeDose);
    assert_eq!(determine_schedule_type(10, true), ScheduleType::ThreeDose);
    assert_eq!(determine_schedule_type(30, true), ScheduleType::ThreeDose);
}

#[test]
fn fixed_policy_always_uses_three_doses() {
    assert_eq!(
        SchedulePolicy::Fixed3Dose.schedule_type(10, false),
        ScheduleType::ThreeDose
    );
    assert_eq!(
        SchedulePolicy::CdcStyle2Or3.schedule_type(10, false),
        ScheduleType::TwoDose
    );
}

#[test]
fn next_dose_counts_up_and_stops_at_series_end() {
    assert_eq!(next_dose_number(&DoseHistory::empty(), ScheduleType::TwoDose), Some(DoseNumber::First));
    assert_eq!(next_dose_number(&history(1), ScheduleType::TwoDose), Some(DoseNumber::Second));
    assert_eq!(next_dose_number(&history(2), ScheduleType::TwoDose), None);
    assert_eq!(next_dose_number(&history(3), ScheduleType::TwoDose), None);

    assert_eq!(next_dose_number(&history(2), ScheduleType::ThreeDose), Some(DoseNumber::Third));
    assert_eq!(next_dose_number(&history(3), ScheduleType::ThreeDose), None);
}

#[test]
fn no_due_date_without_an_anchor_dose() {
    for schedule_type in [ScheduleType::TwoDose, ScheduleType::ThreeDose] {
        assert_eq!(
            calculate_due_date(&DoseHistory::empty(), schedule_type, DEFAULT_MONTHS_AFTER_DOSE1),
            None
        );
    }
}

#[test]
fn two_dose_series_uses_configured_interval() {
    let one = history(1);
    assert_eq!(
        calculate_due_date(&one, ScheduleType::TwoDose, 6),
        Some(date(2024, 7, 10))
    );
    assert_eq!(
        calculate_due_date(&one, ScheduleType::TwoDose, 12),
        Some(date(2025, 1, 10))
    );
    assert_eq!(calculate_due_date(&history(2), ScheduleType::TwoDose, 6), None);
}

#[test]
fn three_dose_series_ignores_configured_interval() {
    for months in [6, 12] {
        assert_eq!(
            calculate_due_date(&history(1), ScheduleType::ThreeDose, months),
            Some(date(2024, 3, 10))
        );
        assert_eq!(
            calculate_due_date(&history(2), ScheduleType::ThreeDose, months),
            Some(date(2024, 7, 10))
        );
    }
    assert_eq!(calculate_due_date(&history(3), ScheduleType::ThreeDose, 6), None);
}

#[test]
fn month_addition_clamps_to_end_of_shorter_months() {
    let history = DoseHistory::new(vec![dose(1, date(2023, 8, 31))]).expect("valid history");
    assert_eq!(
        calculate_due_date(&history, ScheduleType::TwoDose, 6),
        Some(date(2024, 2, 29))
    );

    let december = DoseHistory::new(vec![dose(1, date(2024, 12, 31))]).expect("valid history");
    assert_eq!(
        calculate_due_date(&december, ScheduleType::ThreeDose, 6),
        Some(date(2025, 2, 28))
    );
}
