//! Statement date extraction.

use chrono::NaiveDate;
use tracing::debug;

use super::patterns::STATEMENT_DATE;
use crate::error::ExtractionError;

/// Format of the date printed after the "Statement Date" label.
pub const STATEMENT_DATE_FORMAT: &str = "%d %b %Y";

/// Find the "Statement Date D[D] MMM YYYY" field in the page text.
pub fn extract_statement_date(text: &str) -> Result<NaiveDate, ExtractionError> {
    let caps = STATEMENT_DATE
        .captures(text)
        .ok_or(ExtractionError::StatementDateNotFound)?;

    let raw = normalize_spaces(&caps[1]);
    let date = NaiveDate::parse_from_str(&raw, STATEMENT_DATE_FORMAT).map_err(|e| {
        debug!("Rejected statement date '{}': {}", raw, e);
        ExtractionError::StatementDateNotFound
    })?;

    debug!("Statement date: {}", date);
    Ok(date)
}

fn normalize_spaces(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
