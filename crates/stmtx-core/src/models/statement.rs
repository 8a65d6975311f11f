//! Statement data models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Aggregate totals printed on a statement page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Totals {
    /// Sum of all debits (non-negative).
    pub total_debit: Decimal,

    /// Sum of all credits (non-negative).
    pub total_credit: Decimal,

    /// Number of debit transactions.
    pub count_debit: u32,

    /// Number of credit transactions.
    pub count_credit: u32,
}

/// A single dated ledger movement.
///
/// Negative amounts are debits, positive amounts are credits. A zero debit
/// keeps its negative sign so it still counts as a debit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub amount: Decimal,
}

impl Transaction {
    pub fn new(date: NaiveDate, amount: Decimal) -> Self {
        Self { date, amount }
    }

    pub fn is_debit(&self) -> bool {
        self.amount.is_sign_negative()
    }

    pub fn is_credit(&self) -> bool {
        !self.is_debit()
    }
}

/// A fully extracted bank statement page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    /// Raw text of the postal address block.
    pub address: String,

    /// Upper-cased bank name, e.g. "PUBLIC".
    pub bank_name: String,

    /// Statement date.
    pub statement_date: NaiveDate,

    /// Printed totals.
    pub totals: Totals,

    /// Transactions: debits first, then credits, each in page order.
    pub transactions: Vec<Transaction>,
}

impl Statement {
    pub fn debits(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter().filter(|t| t.is_debit())
    }

    pub fn credits(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter().filter(|t| t.is_credit())
    }

    /// Check the transactions against the printed totals.
    ///
    /// Returns a list of human-readable discrepancies. A mismatch usually
    /// means a misplaced column window or a dropped row, so these are
    /// reported rather than treated as errors.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        let debit_count = self.debits().count();
        if debit_count != self.totals.count_debit as usize {
            issues.push(format!(
                "Found {} debit transactions but statement lists {}",
                debit_count, self.totals.count_debit
            ));
        }

        let credit_count = self.credits().count();
        if credit_count != self.totals.count_credit as usize {
            issues.push(format!(
                "Found {} credit transactions but statement lists {}",
                credit_count, self.totals.count_credit
            ));
        }

        let debit_sum: Decimal = self.debits().map(|t| -t.amount).sum();
        if debit_sum != self.totals.total_debit {
            issues.push(format!(
                "Debit sum {} doesn't match total debits {}",
                debit_sum, self.totals.total_debit
            ));
        }

        let credit_sum: Decimal = self.credits().map(|t| t.amount).sum();
        if credit_sum != self.totals.total_credit {
            issues.push(format!(
                "Credit sum {} doesn't match total credits {}",
                credit_sum, self.totals.total_credit
            ));
        }

        issues
    }
}
