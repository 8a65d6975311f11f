//! Per-bank extraction profiles.
//!
//! Each supported bank is a variant of [`BankProfile`] holding its own
//! extraction behaviour. Banks that are known but not yet handled are
//! registered as [`BankProfile::Unimplemented`], which fails every
//! capability with [`ExtractionError::UnimplementedProfile`].

mod public;

pub use public::PublicBank;

use chrono::NaiveDate;
use image::DynamicImage;

use crate::error::{Capability, ExtractionError, StmtxError};
use crate::models::statement::Totals;
use crate::ocr::{TextRecognizer, TokenTable};
use crate::statement::rules::ExtractedTransactions;

/// Extraction behaviour for one statement layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BankProfile {
    /// Public Bank Berhad.
    Public(PublicBank),
    /// Registered bank with no extraction support.
    Unimplemented { bank: String },
}

impl BankProfile {
    pub fn unimplemented(bank: impl Into<String>) -> Self {
        Self::Unimplemented {
            bank: bank.into().to_uppercase(),
        }
    }

    /// Upper-cased bank name.
    pub fn bank_name(&self) -> &str {
        match self {
            Self::Public(_) => PublicBank::NAME,
            Self::Unimplemented { bank } => bank.as_str(),
        }
    }

    pub fn is_implemented(&self) -> bool {
        !matches!(self, Self::Unimplemented { .. })
    }

    /// Text of the postal address block.
    pub fn extract_address<R>(
        &self,
        page: &DynamicImage,
        recognizer: &R,
    ) -> Result<String, StmtxError>
    where
        R: TextRecognizer + ?Sized,
    {
        match self {
            Self::Public(profile) => Ok(profile.extract_address(page, recognizer)?),
            Self::Unimplemented { bank } => Err(unimplemented(Capability::Address, bank).into()),
        }
    }

    pub fn extract_statement_date(&self, text: &str) -> Result<NaiveDate, ExtractionError> {
        match self {
            Self::Public(profile) => profile.extract_statement_date(text),
            Self::Unimplemented { bank } => Err(unimplemented(Capability::StatementDate, bank)),
        }
    }

    pub fn extract_totals(&self, text: &str) -> Result<Totals, ExtractionError> {
        match self {
            Self::Public(profile) => profile.extract_totals(text),
            Self::Unimplemented { bank } => Err(unimplemented(Capability::Totals, bank)),
        }
    }

    pub fn extract_transactions(
        &self,
        text: &str,
        tokens: &TokenTable,
        statement_date: NaiveDate,
    ) -> Result<ExtractedTransactions, ExtractionError> {
        match self {
            Self::Public(profile) => Ok(profile.extract_transactions(text, tokens, statement_date)),
            Self::Unimplemented { bank } => Err(unimplemented(Capability::Transactions, bank)),
        }
    }
}

fn unimplemented(capability: Capability, bank: &str) -> ExtractionError {
    ExtractionError::UnimplementedProfile {
        capability,
        bank: bank.to_string(),
    }
}
