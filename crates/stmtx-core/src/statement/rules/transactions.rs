//! Transaction table reconstruction from token geometry.
//!
//! Amount tokens are classified into the debit or credit column by fixed
//! pixel windows. Each amount takes its date from a `DD/MM` token on the same
//! line, or else from the nearest preceding line that carries one: in a
//! multi-line ledger entry only the first line repeats the date. The year
//! comes from the statement date, so a page that crosses a year boundary
//! gets the wrong year for its earlier rows.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use tracing::debug;

use super::patterns::{AMOUNT_TOKEN, COMPACT_DATE};
use super::search::nearest_below;
use super::totals::parse_amount;
use crate::models::config::PageLayout;
use crate::models::statement::Transaction;
use crate::ocr::{OcrToken, TokenTable, Window};

/// Which amount column a token sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Debit,
    Credit,
}

/// Debit and credit column windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub debit: Window,
    pub credit: Window,
}

impl ColumnLayout {
    pub fn new(debit: Window, credit: Window) -> Self {
        Self { debit, credit }
    }

    /// Column of a token, or `None` if it lies outside both windows.
    ///
    /// If the windows overlap, the debit window takes precedence.
    pub fn classify(&self, token: &OcrToken) -> Option<Column> {
        if self.debit.contains(token) {
            Some(Column::Debit)
        } else if self.credit.contains(token) {
            Some(Column::Credit)
        } else {
            None
        }
    }
}

impl From<&PageLayout> for ColumnLayout {
    fn from(layout: &PageLayout) -> Self {
        Self::new(layout.debit_window, layout.credit_window)
    }
}

/// Sparse index from line number to the `DD/MM` token on that line.
#[derive(Debug)]
pub struct DateAnchors<'a> {
    by_line: BTreeMap<u32, &'a OcrToken>,
    lines: Vec<u32>,
}

impl<'a> DateAnchors<'a> {
    /// Index every compact date token. When a line holds more than one, the
    /// first in table order is kept.
    pub fn build(tokens: &'a TokenTable) -> Self {
        let mut by_line = BTreeMap::new();
        for token in tokens.iter().filter(|t| COMPACT_DATE.is_match(&t.text)) {
            by_line.entry(token.line_num).or_insert(token);
        }
        let lines = by_line.keys().copied().collect();

        Self { by_line, lines }
    }

    /// Sorted line numbers that carry a date.
    pub fn lines(&self) -> &[u32] {
        &self.lines
    }

    /// The date token for a line: the line's own, else the nearest line above.
    pub fn resolve(&self, line: u32) -> Option<&'a OcrToken> {
        if let Some(token) = self.by_line.get(&line) {
            return Some(*token);
        }
        let above = nearest_below(&self.lines, line)?;
        self.by_line.get(&above).copied()
    }
}

/// Reconstructed transactions plus counters for what was left out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedTransactions {
    /// Debits in page order, then credits in page order.
    pub transactions: Vec<Transaction>,

    /// Amount tokens with no resolvable date.
    pub dropped_rows: usize,

    /// Tokens inside a column window that are not amounts.
    pub skipped_tokens: usize,
}

/// Rebuild the signed, dated transaction list for one page.
///
/// Pure in its inputs: the same tokens, date and layout always give the same
/// ordered output.
pub fn extract_transactions(
    tokens: &TokenTable,
    statement_date: NaiveDate,
    layout: &ColumnLayout,
) -> ExtractedTransactions {
    let anchors = DateAnchors::build(tokens);
    let year = statement_date.year();

    let mut debits = Vec::new();
    let mut credits = Vec::new();
    let mut dropped_rows = 0;
    let mut skipped_tokens = 0;

    for token in tokens {
        let Some(column) = layout.classify(token) else {
            continue;
        };

        let Some(amount) = parse_token_amount(&token.text) else {
            skipped_tokens += 1;
            continue;
        };

        let date = anchors
            .resolve(token.line_num)
            .and_then(|anchor| compose_date(&anchor.text, year));
        let Some(date) = date else {
            debug!(
                "Dropping {:?} amount {} on line {}: no date",
                column, token.text, token.line_num
            );
            dropped_rows += 1;
            continue;
        };

        match column {
            Column::Debit => debits.push(Transaction::new(date, -amount)),
            Column::Credit => credits.push(Transaction::new(date, amount)),
        }
    }

    debug!(
        "Reconstructed {} debits and {} credits from {} date anchors ({} dropped, {} skipped)",
        debits.len(),
        credits.len(),
        anchors.lines().len(),
        dropped_rows,
        skipped_tokens
    );

    debits.extend(credits);

    ExtractedTransactions {
        transactions: debits,
        dropped_rows,
        skipped_tokens,
    }
}

fn parse_token_amount(text: &str) -> Option<Decimal> {
    if !AMOUNT_TOKEN.is_match(text) {
        return None;
    }
    parse_amount(text)
}

/// Combine a `DD/MM` token with a year, parsed strictly as day/month/year.
fn compose_date(day_month: &str, year: i32) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}/{}", day_month, year), "%d/%m/%Y").ok()
}
