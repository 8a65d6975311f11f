//! Common regex patterns for bank statement extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // "<word> BANK" marker, e.g. "PUBLIC BANK BERHAD"
    pub static ref BANK_NAME: Regex = Regex::new(
        r"(?i)\b(\w+)\b\s+BANK"
    ).unwrap();

    // "Statement Date 05 Jan 2024"
    pub static ref STATEMENT_DATE: Regex = Regex::new(
        r"(?i)Statement\s+Date[\s:]*(\d{1,2}\s+(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)\s+\d{4})\b"
    ).unwrap();

    // Totals: "Total Debits 1,234.56" and "No. of Debits 7"
    pub static ref TOTAL_DEBITS: Regex = Regex::new(
        r"Total\s+Debits[\s:]*((?:\d{1,3}(?:,\d{3})+|\d+)\.\d{2})\b"
    ).unwrap();

    pub static ref TOTAL_CREDITS: Regex = Regex::new(
        r"Total\s+Credits[\s:]*((?:\d{1,3}(?:,\d{3})+|\d+)\.\d{2})\b"
    ).unwrap();

    pub static ref COUNT_DEBITS: Regex = Regex::new(
        r"No\.\s*of\s+Debits[\s:]*(\d{1,3}(?:,\d{3})+|\d+)(?:[^\d,]|$)"
    ).unwrap();

    pub static ref COUNT_CREDITS: Regex = Regex::new(
        r"No\.\s*of\s+Credits[\s:]*(\d{1,3}(?:,\d{3})+|\d+)(?:[^\d,]|$)"
    ).unwrap();

    // Whole-token patterns for the transaction table
    pub static ref COMPACT_DATE: Regex = Regex::new(
        r"^(\d{2})/(\d{2})$"
    ).unwrap();

    pub static ref AMOUNT_TOKEN: Regex = Regex::new(
        r"^(?:\d{1,3}(?:,\d{3})+|\d+)\.\d{2}$"
    ).unwrap();
}
