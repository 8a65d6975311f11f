//! Core library for bank statement extraction from OCR output.
//!
//! This crate provides:
//! - The OCR boundary: token tables (TSV/JSON), page regions and column
//!   windows, and the [`TextRecognizer`] seam
//! - Bank detection and a registry of per-bank profiles
//! - Rule-based extraction of address, statement date, totals and
//!   transactions
//! - Statement data models with totals validation

pub mod error;
pub mod models;
pub mod ocr;
pub mod statement;

pub use error::{Capability, ExtractionError, OcrError, Result, StmtxError};
pub use models::config::StmtxConfig;
pub use models::statement::{Statement, Totals, Transaction};
pub use ocr::{OcrResult, OcrToken, Region, TextRecognizer, TokenRecognizer, TokenTable, Window};
#[cfg(feature = "tesseract")]
pub use ocr::TesseractRecognizer;
pub use statement::{
    BankDetector, BankProfile, ExtractionResult, PageInput, ProfileRegistry, StatementAssembler,
};
