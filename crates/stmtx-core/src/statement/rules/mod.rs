//! Rule-based field extractors for bank statements.

pub mod address;
pub mod dates;
pub mod patterns;
pub mod search;
pub mod totals;
pub mod transactions;

pub use address::extract_address;
pub use dates::extract_statement_date;
pub use search::nearest_below;
pub use totals::{extract_totals, parse_amount};
pub use transactions::{
    extract_transactions, Column, ColumnLayout, DateAnchors, ExtractedTransactions,
};
