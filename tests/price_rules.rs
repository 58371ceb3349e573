use adega_price_api::services::price_service::{format_value, mean, parse_price_value};
use rust_decimal::Decimal;

#[test]
fn accepts_plain_and_two_decimal_values() {
    for raw in ["0", "12", "12.9", "12.90", "0.01", "199.99"] {
        assert!(parse_price_value(raw).is_ok(), "expected {raw} to parse");
    }
}

#[test]
fn rejects_malformed_values() {
    for raw in ["", "-1", "1.999", "12,90", "abc", "1.2.3", ".5", "1.", "+3", " 12"] {
        assert!(parse_price_value(raw).is_err(), "expected {raw} to be rejected");
    }
}

#[test]
fn parsed_value_round_trips_with_two_decimals() {
    let value = parse_price_value("12.9").unwrap();
    assert_eq!(format_value(value), "12.90");

    let value = parse_price_value("7").unwrap();
    assert_eq!(format_value(value), "7.00");
}

#[test]
fn mean_of_three_prices() {
    let values = [
        Decimal::new(1000, 2),
        Decimal::new(1100, 2),
        Decimal::new(1050, 2),
    ];
    assert_eq!(mean(&values).map(format_value), Some("10.50".to_string()));
}

#[test]
fn mean_of_nothing_is_none() {
    assert_eq!(mean(&[]), None);
}

#[test]
fn mean_renders_with_two_decimals_after_division() {
    // 12.90 and 13.50 average to 13.20 exactly
    let values = [Decimal::new(1290, 2), Decimal::new(1350, 2)];
    assert_eq!(mean(&values).map(format_value), Some("13.20".to_string()));

    // 11.90 and 13.50 average to 12.70
    let values = [Decimal::new(1190, 2), Decimal::new(1350, 2)];
    assert_eq!(mean(&values).map(format_value), Some("12.70".to_string()));
}
