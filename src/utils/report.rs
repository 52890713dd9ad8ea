// src/utils/report.rs

use crate::{error::AppError, models::evaluation::Evaluation};

/// Column order of the exported report. Kept stable for spreadsheet imports.
pub const CSV_HEADERS: [&str; 8] = [
    "ID",
    "First Name",
    "Last Name",
    "Email",
    "Score",
    "Total",
    "Percentage",
    "Date",
];

pub const CSV_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One decimal place with a trailing percent sign, e.g. `90.0%`.
pub fn format_percentage(percentage: f64) -> String {
    format!("{:.1}%", percentage)
}

/// Renders evaluations as CSV: a header row, then one row per evaluation in
/// the given order. Fields containing commas or quotes are quoted.
pub fn evaluations_to_csv(evaluations: &[Evaluation]) -> Result<String, AppError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADERS)?;

    for e in evaluations {
        writer.write_record([
            e.id.to_string(),
            e.first_name.clone(),
            e.last_name.clone(),
            e.email.clone().unwrap_or_default(),
            e.score.to_string(),
            e.total.to_string(),
            format_percentage(e.percentage),
            e.created_at.format(CSV_DATE_FORMAT).to_string(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| AppError::InternalServerError(e.to_string()))
}

/// File name offered to the browser, e.g. `evaluations_2025-03-01.csv`.
pub fn export_file_name(now: chrono::DateTime<chrono::Utc>) -> String {
    format!("evaluations_{}.csv", now.format("%Y-%m-%d"))
}
