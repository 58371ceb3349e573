use chrono::{DateTime, Utc};

pub mod excel;
pub mod pdf;

pub const REPORT_BRAND: &str = "Adega Mufs";
pub const COMPARISON_TITLE: &str = "Relatório de Comparação de Preços";
pub const HISTORY_TITLE: &str = "Relatório de Histórico de Preços";

/// Column headers follow the data when present so the renderers never have
/// to know the competitor set; the fallback covers the empty-input case.
pub const DEFAULT_COMPETITORS: [&str; 4] = ["Dinho", "Adega Brasil", "Franco", "Diversos"];

pub(crate) fn money(value: &str) -> String {
    format!("R$ {}", value.replace('.', ","))
}

pub(crate) fn money_or_dash(value: Option<&String>) -> String {
    match value {
        Some(v) => money(v),
        None => "-".to_string(),
    }
}

pub(crate) fn date_br(at: DateTime<Utc>) -> String {
    at.format("%d/%m/%Y").to_string()
}

pub(crate) fn time_br(at: DateTime<Utc>) -> String {
    at.format("%H:%M:%S").to_string()
}

pub(crate) fn datetime_br(at: DateTime<Utc>) -> String {
    at.format("%d/%m/%Y %H:%M").to_string()
}
