//! Error types for the stmtx-core library.

use std::fmt;

use thiserror::Error;

/// Main error type for the stmtx library.
#[derive(Error, Debug)]
pub enum StmtxError {
    /// OCR boundary error (recognizer or token table ingestion).
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// Statement extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Image processing error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised at the OCR boundary.
#[derive(Error, Debug)]
pub enum OcrError {
    /// Text recognition failed.
    #[error("text recognition failed: {0}")]
    Recognition(String),

    /// Invalid image format or dimensions.
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// A token table row could not be ingested.
    #[error("malformed token table at line {line}: {reason}")]
    TokenTable { line: usize, reason: String },

    /// The external OCR engine could not be run.
    #[error("OCR engine failed: {0}")]
    Engine(String),
}

/// A bank profile capability, used to name what an unimplemented profile
/// was asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    ProfileSelection,
    Address,
    StatementDate,
    Totals,
    Transactions,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ProfileSelection => "profile selection",
            Self::Address => "address extraction",
            Self::StatementDate => "statement date extraction",
            Self::Totals => "totals extraction",
            Self::Transactions => "transaction extraction",
        };
        f.write_str(name)
    }
}

/// Errors related to statement field extraction.
///
/// All variants are hard failures: the assembly in progress is aborted and
/// no partial statement is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// No "<word> BANK" marker found in the page text.
    #[error("unable to detect the bank name from the statement")]
    BankNotDetected,

    /// A bank was detected but is not in the supported set.
    #[error("statements from {0} BANK are not supported")]
    UnsupportedBank(String),

    /// The detected bank has no registered profile.
    #[error("no profile registered for {0} BANK")]
    ProfileNotRegistered(String),

    /// The profile is registered but has no implementation.
    #[error("{capability} is not implemented for {bank} BANK")]
    UnimplementedProfile { capability: Capability, bank: String },

    /// The "Statement Date" label or its date token is missing.
    #[error("statement date not found")]
    StatementDateNotFound,

    /// One of the four totals fields is missing.
    #[error("totals field not found: {0}")]
    TotalsFieldNotFound(String),
}

/// Result type for the stmtx library.
pub type Result<T> = std::result::Result<T, StmtxError>;
