use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::str::FromStr;

use crate::models::{ComparisonRow, HistoryEntry};
use crate::services::price_service::{format_value, mean};

use super::{
    COMPARISON_TITLE, DEFAULT_COMPETITORS, HISTORY_TITLE, REPORT_BRAND, date_br, datetime_br,
    money_or_dash, time_br,
};

/// Single-worksheet workbook mirroring the comparison matrix: summary block,
/// then one row per product with the competitor columns in fixed order.
pub fn comparison_excel(
    rows: &[ComparisonRow],
    generated_at: DateTime<Utc>,
) -> anyhow::Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Comparação")?;

    let competitor_names: Vec<String> = match rows.first() {
        Some(row) => row
            .prices
            .iter()
            .map(|cell| cell.competitor_name.clone())
            .collect(),
        None => DEFAULT_COMPETITORS.iter().map(|s| s.to_string()).collect(),
    };

    let mut r: u32 = 0;
    r = write_title(sheet, &bold, r, COMPARISON_TITLE, generated_at)?;

    let averages: Vec<Decimal> = rows
        .iter()
        .filter_map(|row| row.average.as_deref())
        .filter_map(|a| Decimal::from_str(a).ok())
        .collect();
    let overall = mean(&averages).map(format_value);

    sheet.write_string_with_format(r, 0, "Resumo Executivo", &bold)?;
    r += 1;
    sheet.write_string(r, 0, "Total de Produtos")?;
    sheet.write_number(r, 1, rows.len() as f64)?;
    r += 1;
    sheet.write_string(r, 0, "Preço Médio Geral")?;
    sheet.write_string(r, 1, money_or_dash(overall.as_ref()))?;
    r += 1;
    sheet.write_string(r, 0, "Data do Relatório")?;
    sheet.write_string(r, 1, date_br(generated_at))?;
    r += 2;

    sheet.write_string_with_format(r, 0, "Produto", &bold)?;
    for (idx, name) in competitor_names.iter().enumerate() {
        sheet.write_string_with_format(r, idx as u16 + 1, name, &bold)?;
    }
    let avg_col = competitor_names.len() as u16 + 1;
    sheet.write_string_with_format(r, avg_col, "Média", &bold)?;
    sheet.write_string_with_format(r, avg_col + 1, "Última Atualização", &bold)?;
    r += 1;

    for row in rows {
        sheet.write_string(r, 0, &row.product_name)?;
        for (idx, cell) in row.prices.iter().enumerate() {
            sheet.write_string(r, idx as u16 + 1, money_or_dash(cell.value.as_ref()))?;
        }
        sheet.write_string(r, avg_col, money_or_dash(row.average.as_ref()))?;
        let updated = row
            .last_updated
            .map(date_br)
            .unwrap_or_else(|| "-".to_string());
        sheet.write_string(r, avg_col + 1, updated)?;
        r += 1;
    }

    sheet.set_column_width(0, 25)?;
    for col in 1..=avg_col {
        sheet.set_column_width(col, 15)?;
    }
    sheet.set_column_width(avg_col + 1, 18)?;

    Ok(workbook.save_to_buffer()?)
}

/// Single-worksheet workbook of the audit trail, newest first.
pub fn history_excel(
    entries: &[HistoryEntry],
    generated_at: DateTime<Utc>,
) -> anyhow::Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Histórico")?;

    let mut r: u32 = 0;
    r = write_title(sheet, &bold, r, HISTORY_TITLE, generated_at)?;

    sheet.write_string_with_format(r, 0, "Resumo Executivo", &bold)?;
    r += 1;
    sheet.write_string(r, 0, "Total de Alterações")?;
    sheet.write_number(r, 1, entries.len() as f64)?;
    r += 1;
    if let (Some(oldest), Some(newest)) = (entries.last(), entries.first()) {
        sheet.write_string(r, 0, "Período")?;
        sheet.write_string(
            r,
            1,
            format!(
                "{} a {}",
                date_br(oldest.changed_at),
                date_br(newest.changed_at)
            ),
        )?;
        r += 1;
    }
    r += 1;

    let headers = [
        "Produto",
        "Concorrente",
        "Tipo de Alteração",
        "Valor Anterior",
        "Novo Valor",
        "Data e Hora",
    ];
    for (idx, header) in headers.iter().enumerate() {
        sheet.write_string_with_format(r, idx as u16, *header, &bold)?;
    }
    r += 1;

    for entry in entries {
        sheet.write_string(r, 0, &entry.product_name)?;
        sheet.write_string(r, 1, &entry.competitor_name)?;
        sheet.write_string(r, 2, entry.change_type.label())?;
        sheet.write_string(r, 3, money_or_dash(entry.previous_value.as_ref()))?;
        sheet.write_string(r, 4, money_or_dash(entry.new_value.as_ref()))?;
        sheet.write_string(r, 5, datetime_br(entry.changed_at))?;
        r += 1;
    }

    let widths: [f64; 6] = [25.0, 20.0, 18.0, 15.0, 15.0, 20.0];
    for (idx, width) in widths.iter().enumerate() {
        sheet.set_column_width(idx as u16, *width)?;
    }

    Ok(workbook.save_to_buffer()?)
}

fn write_title(
    sheet: &mut Worksheet,
    bold: &Format,
    mut r: u32,
    title: &str,
    generated_at: DateTime<Utc>,
) -> anyhow::Result<u32> {
    sheet.write_string_with_format(r, 0, format!("{REPORT_BRAND} - {title}"), bold)?;
    r += 1;
    sheet.write_string(
        r,
        0,
        format!(
            "Gerado em: {} às {}",
            date_br(generated_at),
            time_br(generated_at)
        ),
    )?;
    r += 2;
    Ok(r)
}
