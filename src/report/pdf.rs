use chrono::{DateTime, Utc};
use printpdf::{
    BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
    Point,
};
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::models::{ComparisonRow, HistoryEntry};
use crate::services::price_service::{format_value, mean};

use super::{
    COMPARISON_TITLE, DEFAULT_COMPETITORS, HISTORY_TITLE, REPORT_BRAND, date_br, datetime_br,
    money_or_dash, time_br,
};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 15.0;
const ROW_STEP: f32 = 6.0;
const BOTTOM_LIMIT: f32 = 20.0;

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

/// A4 fixed-layout table of the comparison matrix: one row per product,
/// competitor columns in the fixed order, then average and last update.
pub fn comparison_pdf(
    rows: &[ComparisonRow],
    generated_at: DateTime<Utc>,
) -> anyhow::Result<Vec<u8>> {
    let (doc, page, layer) = PdfDocument::new(
        COMPARISON_TITLE,
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "Camada 1",
    );
    let fonts = Fonts {
        regular: doc.add_builtin_font(BuiltinFont::Helvetica)?,
        bold: doc.add_builtin_font(BuiltinFont::HelveticaBold)?,
    };
    let mut layer = doc.get_page(page).get_layer(layer);

    let competitor_names = competitor_headers(rows);
    // Produto | four competitors | Média | Atualizado
    let mut columns: Vec<(String, f32, usize)> = vec![("Produto".to_string(), MARGIN, 24)];
    let mut x = 57.0;
    for name in &competitor_names {
        columns.push((name.clone(), x, 12));
        x += 21.0;
    }
    columns.push(("Média".to_string(), x, 12));
    columns.push(("Atualizado".to_string(), x + 21.0, 18));

    let mut y = write_report_header(&layer, &fonts, COMPARISON_TITLE, generated_at);

    let averages: Vec<Decimal> = rows
        .iter()
        .filter_map(|r| r.average.as_deref())
        .filter_map(|a| Decimal::from_str(a).ok())
        .collect();
    let overall = mean(&averages).map(format_value);

    y = write_summary(
        &layer,
        &fonts,
        y,
        &[
            format!("Total de Produtos: {}", rows.len()),
            format!("Preço Médio Geral: {}", money_or_dash(overall.as_ref())),
            format!("Data do Relatório: {}", date_br(generated_at)),
        ],
    );

    write_table_header(&layer, &fonts, y, &columns);
    y -= ROW_STEP + 2.0;

    for row in rows {
        if y < BOTTOM_LIMIT {
            layer = next_page(&doc);
            y = PAGE_HEIGHT - MARGIN;
            write_table_header(&layer, &fonts, y, &columns);
            y -= ROW_STEP + 2.0;
        }

        layer.use_text(
            clip(&row.product_name, columns[0].2),
            8.0,
            Mm(columns[0].1),
            Mm(y),
            &fonts.regular,
        );
        for (idx, cell) in row.prices.iter().take(competitor_names.len()).enumerate() {
            let text = money_or_dash(cell.value.as_ref());
            let (_, col_x, width) = &columns[idx + 1];
            layer.use_text(clip(&text, *width), 8.0, Mm(*col_x), Mm(y), &fonts.regular);
        }
        let avg_col = &columns[competitor_names.len() + 1];
        layer.use_text(
            money_or_dash(row.average.as_ref()),
            8.0,
            Mm(avg_col.1),
            Mm(y),
            &fonts.regular,
        );
        let updated_col = &columns[competitor_names.len() + 2];
        let updated = row
            .last_updated
            .map(date_br)
            .unwrap_or_else(|| "-".to_string());
        layer.use_text(updated, 8.0, Mm(updated_col.1), Mm(y), &fonts.regular);

        y -= ROW_STEP;
    }

    write_footer(&layer, &fonts);

    Ok(doc.save_to_bytes()?)
}

/// A4 table of the audit trail, newest first: product, competitor, localized
/// change label, previous and new values, timestamp.
pub fn history_pdf(
    entries: &[HistoryEntry],
    generated_at: DateTime<Utc>,
) -> anyhow::Result<Vec<u8>> {
    let (doc, page, layer) = PdfDocument::new(
        HISTORY_TITLE,
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "Camada 1",
    );
    let fonts = Fonts {
        regular: doc.add_builtin_font(BuiltinFont::Helvetica)?,
        bold: doc.add_builtin_font(BuiltinFont::HelveticaBold)?,
    };
    let mut layer = doc.get_page(page).get_layer(layer);

    let columns: [(&str, f32, usize); 6] = [
        ("Produto", MARGIN, 22),
        ("Concorrente", 55.0, 16),
        ("Tipo", 85.0, 12),
        ("Valor Anterior", 107.0, 13),
        ("Novo Valor", 132.0, 13),
        ("Data e Hora", 157.0, 18),
    ];

    let mut y = write_report_header(&layer, &fonts, HISTORY_TITLE, generated_at);

    let period = match (entries.last(), entries.first()) {
        (Some(oldest), Some(newest)) => {
            format!(
                "Período: {} a {}",
                date_br(oldest.changed_at),
                date_br(newest.changed_at)
            )
        }
        _ => "Período: N/A".to_string(),
    };
    y = write_summary(
        &layer,
        &fonts,
        y,
        &[format!("Total de Alterações: {}", entries.len()), period],
    );

    let owned: Vec<(String, f32, usize)> = columns
        .iter()
        .map(|(name, x, w)| ((*name).to_string(), *x, *w))
        .collect();
    write_table_header(&layer, &fonts, y, &owned);
    y -= ROW_STEP + 2.0;

    for entry in entries {
        if y < BOTTOM_LIMIT {
            layer = next_page(&doc);
            y = PAGE_HEIGHT - MARGIN;
            write_table_header(&layer, &fonts, y, &owned);
            y -= ROW_STEP + 2.0;
        }

        let cells = [
            clip(&entry.product_name, columns[0].2),
            clip(&entry.competitor_name, columns[1].2),
            entry.change_type.label().to_string(),
            money_or_dash(entry.previous_value.as_ref()),
            money_or_dash(entry.new_value.as_ref()),
            datetime_br(entry.changed_at),
        ];
        for (idx, text) in cells.into_iter().enumerate() {
            layer.use_text(text, 8.0, Mm(columns[idx].1), Mm(y), &fonts.regular);
        }

        y -= ROW_STEP;
    }

    write_footer(&layer, &fonts);

    Ok(doc.save_to_bytes()?)
}

fn competitor_headers(rows: &[ComparisonRow]) -> Vec<String> {
    match rows.first() {
        Some(row) => row
            .prices
            .iter()
            .map(|cell| cell.competitor_name.clone())
            .collect(),
        None => DEFAULT_COMPETITORS.iter().map(|s| s.to_string()).collect(),
    }
}

fn write_report_header(
    layer: &PdfLayerReference,
    fonts: &Fonts,
    title: &str,
    generated_at: DateTime<Utc>,
) -> f32 {
    let mut y = PAGE_HEIGHT - MARGIN;
    layer.use_text(REPORT_BRAND, 18.0, Mm(MARGIN), Mm(y), &fonts.bold);
    y -= 9.0;
    layer.use_text(title, 13.0, Mm(MARGIN), Mm(y), &fonts.bold);
    y -= 7.0;
    layer.use_text(
        format!(
            "Gerado em: {} às {}",
            date_br(generated_at),
            time_br(generated_at)
        ),
        9.0,
        Mm(MARGIN),
        Mm(y),
        &fonts.regular,
    );
    y - 10.0
}

fn write_summary(
    layer: &PdfLayerReference,
    fonts: &Fonts,
    mut y: f32,
    lines: &[String],
) -> f32 {
    layer.use_text("Resumo Executivo", 11.0, Mm(MARGIN), Mm(y), &fonts.bold);
    y -= 6.0;
    for line in lines {
        layer.use_text(line.as_str(), 9.0, Mm(MARGIN), Mm(y), &fonts.regular);
        y -= 5.0;
    }
    y - 5.0
}

fn write_table_header(
    layer: &PdfLayerReference,
    fonts: &Fonts,
    y: f32,
    columns: &[(String, f32, usize)],
) {
    for (name, x, width) in columns {
        layer.use_text(clip(name, *width), 9.0, Mm(*x), Mm(y), &fonts.bold);
    }
    let underline_y = y - 2.0;
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(MARGIN), Mm(underline_y)), false),
            (Point::new(Mm(PAGE_WIDTH - MARGIN), Mm(underline_y)), false),
        ],
        is_closed: false,
    });
}

fn write_footer(layer: &PdfLayerReference, fonts: &Fonts) {
    layer.use_text(
        format!("Relatório confidencial - {REPORT_BRAND}"),
        8.0,
        Mm(MARGIN),
        Mm(10.0),
        &fonts.regular,
    );
}

fn next_page(doc: &PdfDocumentReference) -> PdfLayerReference {
    let (page, layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Camada 1");
    doc.get_page(page).get_layer(layer)
}

fn clip(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}
