use adega_price_api::entity::price_history::ChangeType;
use adega_price_api::entity::{competitors, price_history, prices, products};
use adega_price_api::services::history_service::project_history;
use adega_price_api::services::price_service::build_comparison;
use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use rust_decimal::Decimal;

fn at(day: u32, hour: u32) -> DateTime<FixedOffset> {
    Utc.with_ymd_and_hms(2026, 8, day, hour, 0, 0).unwrap().into()
}

fn product(id: i32, name: &str) -> products::Model {
    products::Model {
        id,
        name: name.to_string(),
        description: None,
        category: Some("RTD".to_string()),
        created_by: 1,
        created_at: at(1, 8),
        updated_at: at(1, 8),
    }
}

fn competitor(id: i32, name: &str, code: &str) -> competitors::Model {
    competitors::Model {
        id,
        name: name.to_string(),
        code: code.to_string(),
        created_at: at(1, 8),
    }
}

fn fixed_competitors() -> Vec<competitors::Model> {
    vec![
        competitor(1, "Dinho", "DINHO"),
        competitor(2, "Adega Brasil", "ADEGA_BRASIL"),
        competitor(3, "Franco", "FRANCO"),
        competitor(4, "Diversos", "DIVERSOS"),
    ]
}

fn price(
    id: i32,
    product_id: i32,
    competitor_id: i32,
    cents: i64,
    updated: DateTime<FixedOffset>,
) -> prices::Model {
    prices::Model {
        id,
        product_id,
        competitor_id,
        value: Decimal::new(cents, 2),
        registered_by: 1,
        registered_at: updated,
        updated_at: updated,
    }
}

#[test]
fn cells_follow_competitor_order_with_nulls_for_missing_pairs() {
    let rows = build_comparison(
        vec![product(1, "Smirnoff Ice")],
        &fixed_competitors(),
        &[
            price(1, 1, 1, 1290, at(2, 10)),
            price(2, 1, 3, 1350, at(3, 9)),
        ],
    );

    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.product_name, "Smirnoff Ice");

    let codes: Vec<&str> = row
        .prices
        .iter()
        .map(|c| c.competitor_code.as_str())
        .collect();
    assert_eq!(codes, ["DINHO", "ADEGA_BRASIL", "FRANCO", "DIVERSOS"]);

    assert_eq!(row.prices[0].value.as_deref(), Some("12.90"));
    assert_eq!(row.prices[1].value, None);
    assert_eq!(row.prices[2].value.as_deref(), Some("13.50"));
    assert_eq!(row.prices[3].value, None);
}

#[test]
fn average_and_last_updated_cover_present_cells_only() {
    let rows = build_comparison(
        vec![product(1, "Smirnoff Ice")],
        &fixed_competitors(),
        &[
            price(1, 1, 1, 1290, at(2, 10)),
            price(2, 1, 2, 1350, at(5, 16)),
        ],
    );

    let row = &rows[0];
    assert_eq!(row.average.as_deref(), Some("13.20"));
    assert_eq!(row.last_updated, Some(at(5, 16).with_timezone(&Utc)));
}

#[test]
fn product_without_prices_has_no_average_and_no_last_updated() {
    let rows = build_comparison(
        vec![product(1, "Smirnoff Ice")],
        &fixed_competitors(),
        &[],
    );

    let row = &rows[0];
    assert!(row.prices.iter().all(|c| c.value.is_none()));
    assert_eq!(row.average, None);
    assert_eq!(row.last_updated, None);
}

#[test]
fn row_order_follows_product_input_order() {
    let rows = build_comparison(
        vec![product(1, "Campari"), product(2, "Smirnoff Ice")],
        &fixed_competitors(),
        &[],
    );
    let names: Vec<&str> = rows.iter().map(|r| r.product_name.as_str()).collect();
    assert_eq!(names, ["Campari", "Smirnoff Ice"]);
}

fn history_row(
    id: i32,
    product_id: i32,
    change_type: ChangeType,
    previous: Option<i64>,
    new: Option<i64>,
) -> price_history::Model {
    price_history::Model {
        id,
        product_id,
        competitor_id: 1,
        previous_value: previous.map(|cents| Decimal::new(cents, 2)),
        new_value: new.map(|cents| Decimal::new(cents, 2)),
        changed_by: 1,
        change_type,
        changed_at: at(4, 12),
    }
}

#[test]
fn history_projection_resolves_names_and_values() {
    let entries = project_history(
        vec![history_row(1, 1, ChangeType::Updated, Some(1290), Some(1190))],
        &[product(1, "Smirnoff Ice")],
        &fixed_competitors(),
    );

    let entry = &entries[0];
    assert_eq!(entry.product_name, "Smirnoff Ice");
    assert_eq!(entry.competitor_name, "Dinho");
    assert_eq!(entry.previous_value.as_deref(), Some("12.90"));
    assert_eq!(entry.new_value.as_deref(), Some("11.90"));
    assert_eq!(entry.change_type, ChangeType::Updated);
}

#[test]
fn deletion_entries_carry_no_new_value() {
    let entries = project_history(
        vec![history_row(1, 1, ChangeType::Deleted, Some(1290), None)],
        &[product(1, "Smirnoff Ice")],
        &fixed_competitors(),
    );

    let entry = &entries[0];
    assert_eq!(entry.previous_value.as_deref(), Some("12.90"));
    assert_eq!(entry.new_value, None);
    assert_eq!(entry.change_type.label(), "Removido");
}

#[test]
fn audit_rows_survive_product_deletion_with_placeholder_name() {
    let entries = project_history(
        vec![history_row(1, 99, ChangeType::Created, None, Some(1290))],
        &[product(1, "Smirnoff Ice")],
        &fixed_competitors(),
    );

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].product_name, "produto removido");
}
