//! Aggregate totals extraction.

use std::str::FromStr;

use regex::Regex;
use rust_decimal::Decimal;

use super::patterns::{COUNT_CREDITS, COUNT_DEBITS, TOTAL_CREDITS, TOTAL_DEBITS};
use crate::error::ExtractionError;
use crate::models::statement::Totals;

pub const FIELD_TOTAL_DEBITS: &str = "Total Debits";
pub const FIELD_TOTAL_CREDITS: &str = "Total Credits";
pub const FIELD_COUNT_DEBITS: &str = "Debits count";
pub const FIELD_COUNT_CREDITS: &str = "Credits count";

/// Extract the four totals fields. Each is matched independently and a
/// missing one is reported by name.
pub fn extract_totals(text: &str) -> Result<Totals, ExtractionError> {
    Ok(Totals {
        total_debit: find_amount(text, &TOTAL_DEBITS, FIELD_TOTAL_DEBITS)?,
        total_credit: find_amount(text, &TOTAL_CREDITS, FIELD_TOTAL_CREDITS)?,
        count_debit: find_count(text, &COUNT_DEBITS, FIELD_COUNT_DEBITS)?,
        count_credit: find_count(text, &COUNT_CREDITS, FIELD_COUNT_CREDITS)?,
    })
}

/// Parse a statement amount such as "1,234.56".
pub fn parse_amount(s: &str) -> Option<Decimal> {
    Decimal::from_str(&strip_separators(s)).ok()
}

fn find_amount(text: &str, pattern: &Regex, field: &str) -> Result<Decimal, ExtractionError> {
    pattern
        .captures(text)
        .and_then(|caps| parse_amount(&caps[1]))
        .ok_or_else(|| ExtractionError::TotalsFieldNotFound(field.to_string()))
}

fn find_count(text: &str, pattern: &Regex, field: &str) -> Result<u32, ExtractionError> {
    pattern
        .captures(text)
        .and_then(|caps| strip_separators(&caps[1]).parse().ok())
        .ok_or_else(|| ExtractionError::TotalsFieldNotFound(field.to_string()))
}

fn strip_separators(s: &str) -> String {
    s.chars().filter(|c| *c != ',').collect()
}
