//! Bank statement extraction.
//!
//! A page goes through bank detection, profile selection and the profile's
//! field extractors; [`StatementAssembler`] runs the stages in order.

mod assembler;
pub mod detector;
pub mod profiles;
pub mod registry;
pub mod rules;

pub use assembler::{ExtractionResult, PageInput, StatementAssembler};
pub use detector::BankDetector;
pub use profiles::{BankProfile, PublicBank};
pub use registry::ProfileRegistry;

use crate::error::ExtractionError;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;
