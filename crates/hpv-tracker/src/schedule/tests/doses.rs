use super::common::*;
use crate::schedule::{DoseHistory, DoseHistoryError, DoseNumber, VaccineDose};

#[test]
fn history_orders_doses_by_number_not_input_order() {
    let history = DoseHistory::new(vec![
        dose(2, date(2024, 7, 10)),
        dose(1, date(2024, 1, 10)),
    ])
    .expect("valid history");

    let numbers: Vec<u8> = history.iter().map(|dose| dose.dose_number.get()).collect();
    assert_eq!(numbers, vec![1, 2]);
    assert_eq!(history.first().map(|dose| dose.date_administered), Some(date(2024, 1, 10)));
    assert_eq!(history.last().map(|dose| dose.dose_number), Some(DoseNumber::Second));
}

#[test]
fn duplicate_dose_numbers_are_rejected() {
    let result = DoseHistory::new(vec![
        dose(1, date(2024, 1, 10)),
        dose(1, date(2024, 2, 10)),
    ]);
    assert_eq!(result, Err(DoseHistoryError::DuplicateDose(DoseNumber::First)));
}

#[test]
fn gaps_in_the_series_are_rejected() {
    let result = DoseHistory::new(vec![
        dose(1, date(2024, 1, 10)),
        dose(3, date(2024, 7, 10)),
    ]);
    assert_eq!(result, Err(DoseHistoryError::MissingDose(DoseNumber::Second)));

    let without_first = DoseHistory::new(vec![dose(2, date(2024, 7, 10))]);
    assert_eq!(without_first, Err(DoseHistoryError::MissingDose(DoseNumber::First)));
}

#[test]
fn dates_running_backwards_are_rejected() {
    let result = DoseHistory::new(vec![
        dose(1, date(2024, 7, 10)),
        dose(2, date(2024, 1, 10)),
    ]);
    match result {
        Err(DoseHistoryError::OutOfOrder { dose, date: given, previous }) => {
            assert_eq!(dose, DoseNumber::Second);
            assert_eq!(given, date(2024, 1, 10));
            assert_eq!(previous, date(2024, 7, 10));
        }
        other => panic!("expected out-of-order error, got {other:?}"),
    }
}

#[test]
fn same_day_doses_are_accepted() {
    let history = DoseHistory::new(vec![
        dose(1, date(2024, 1, 10)),
        dose(2, date(2024, 1, 10)),
    ]);
    assert!(history.is_ok());
}

#[test]
fn out_of_range_dose_numbers_are_rejected() {
    assert_eq!(DoseNumber::try_from(0), Err(DoseHistoryError::InvalidDoseNumber(0)));
    assert_eq!(DoseNumber::try_from(4), Err(DoseHistoryError::InvalidDoseNumber(4)));

    let parsed: Result<VaccineDose, _> =
        serde_json::from_str(r#"{"dose_number": 4, "date_administered": "2024-01-10"}"#);
    assert!(parsed.is_err());
}

#[test]
fn appending_leaves_original_untouched() {
    let original = history(1);
    let extended = original
        .with_dose(dose(2, date(2024, 7, 10)))
        .expect("dose 2 appends");

    assert_eq!(original.len(), 1);
    assert_eq!(extended.len(), 2);
    assert!(original.with_dose(dose(1, date(2024, 2, 1))).is_err());
}

#[test]
fn history_deserializes_from_a_validated_json_list() {
    let history: DoseHistory = serde_json::from_str(
        r#"[
            {"dose_number": 2, "date_administered": "2024-07-10"},
            {"dose_number": 1, "date_administered": "2024-01-10", "photo_url": "cards/1.jpg"}
        ]"#,
    )
    .expect("history parses");
    assert_eq!(history.len(), 2);
    assert_eq!(
        history.get(DoseNumber::First).and_then(|dose| dose.photo_url.as_deref()),
        Some("cards/1.jpg")
    );

    let gap: Result<DoseHistory, _> =
        serde_json::from_str(r#"[{"dose_number": 2, "date_administered": "2024-07-10"}]"#);
    assert!(gap.is_err());

    let json = serde_json::to_value(&history).expect("history serializes");
    assert_eq!(json[0]["dose_number"], 1);
    assert_eq!(json[1]["date_administered"], "2024-07-10");
}
