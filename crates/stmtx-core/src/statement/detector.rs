//! Bank detection from page text.

use std::collections::BTreeSet;

use tracing::debug;

use super::rules::patterns::BANK_NAME;
use crate::error::ExtractionError;

/// First "<word> BANK" candidate in document order, as written.
pub fn find_bank_candidate(text: &str) -> Option<&str> {
    BANK_NAME
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Detects which bank issued a statement.
#[derive(Debug, Clone)]
pub struct BankDetector {
    supported: BTreeSet<String>,
}

impl BankDetector {
    /// Create a detector accepting the given bank names (case-insensitive).
    pub fn new<I, S>(supported: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            supported: supported
                .into_iter()
                .map(|s| s.as_ref().to_uppercase())
                .collect(),
        }
    }

    /// Upper-cased names this detector accepts.
    pub fn supported(&self) -> impl Iterator<Item = &str> {
        self.supported.iter().map(String::as_str)
    }

    /// Detect the bank and return its upper-cased name.
    pub fn detect(&self, text: &str) -> Result<String, ExtractionError> {
        let candidate = find_bank_candidate(text).ok_or(ExtractionError::BankNotDetected)?;
        let name = candidate.to_uppercase();

        if !self.supported.contains(&name) {
            debug!("Detected unsupported bank '{}'", candidate);
            return Err(ExtractionError::UnsupportedBank(name));
        }

        debug!("Detected bank {}", name);
        Ok(name)
    }
}
