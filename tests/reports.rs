use adega_price_api::entity::price_history::ChangeType;
use adega_price_api::models::{ComparisonCell, ComparisonRow, HistoryEntry};
use adega_price_api::report::{excel, pdf};
use chrono::{TimeZone, Utc};

fn generated_at() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 5, 14, 30, 0).unwrap()
}

fn sample_rows() -> Vec<ComparisonRow> {
    let cell = |id: i32, name: &str, code: &str, value: Option<&str>| ComparisonCell {
        competitor_id: id,
        competitor_code: code.to_string(),
        competitor_name: name.to_string(),
        value: value.map(|v| v.to_string()),
        updated_at: value.map(|_| generated_at()),
    };

    vec![ComparisonRow {
        product_id: 1,
        product_name: "Smirnoff Ice".to_string(),
        category: Some("RTD".to_string()),
        prices: vec![
            cell(1, "Dinho", "DINHO", Some("12.90")),
            cell(2, "Adega Brasil", "ADEGA_BRASIL", Some("13.50")),
            cell(3, "Franco", "FRANCO", None),
            cell(4, "Diversos", "DIVERSOS", None),
        ],
        average: Some("13.20".to_string()),
        last_updated: Some(generated_at()),
    }]
}

fn sample_history() -> Vec<HistoryEntry> {
    vec![
        HistoryEntry {
            id: 2,
            product_id: 1,
            product_name: "Smirnoff Ice".to_string(),
            competitor_id: 1,
            competitor_name: "Dinho".to_string(),
            previous_value: Some("12.90".to_string()),
            new_value: None,
            changed_by: 1,
            change_type: ChangeType::Deleted,
            changed_at: generated_at(),
        },
        HistoryEntry {
            id: 1,
            product_id: 1,
            product_name: "Smirnoff Ice".to_string(),
            competitor_id: 1,
            competitor_name: "Dinho".to_string(),
            previous_value: None,
            new_value: Some("12.90".to_string()),
            changed_by: 1,
            change_type: ChangeType::Created,
            changed_at: generated_at(),
        },
    ]
}

#[test]
fn comparison_pdf_renders_rows() {
    let bytes = pdf::comparison_pdf(&sample_rows(), generated_at()).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn comparison_pdf_handles_empty_input() {
    let bytes = pdf::comparison_pdf(&[], generated_at()).unwrap();
    assert!(!bytes.is_empty());
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn history_pdf_renders_entries() {
    let bytes = pdf::history_pdf(&sample_history(), generated_at()).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn history_pdf_handles_empty_input() {
    let bytes = pdf::history_pdf(&[], generated_at()).unwrap();
    assert!(!bytes.is_empty());
}

#[test]
fn comparison_excel_is_a_zip_container() {
    let bytes = excel::comparison_excel(&sample_rows(), generated_at()).unwrap();
    assert!(bytes.starts_with(b"PK"));
}

#[test]
fn comparison_excel_handles_empty_input() {
    let bytes = excel::comparison_excel(&[], generated_at()).unwrap();
    assert!(bytes.starts_with(b"PK"));
}

#[test]
fn history_excel_is_a_zip_container() {
    let bytes = excel::history_excel(&sample_history(), generated_at()).unwrap();
    assert!(bytes.starts_with(b"PK"));
}

#[test]
fn history_excel_handles_empty_input() {
    let bytes = excel::history_excel(&[], generated_at()).unwrap();
    assert!(bytes.starts_with(b"PK"));
}

#[test]
fn many_rows_paginate_without_error() {
    let mut rows = Vec::new();
    for i in 0..80 {
        let mut row = sample_rows().remove(0);
        row.product_id = i;
        row.product_name = format!("Produto {i}");
        rows.push(row);
    }
    let bytes = pdf::comparison_pdf(&rows, generated_at()).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}
