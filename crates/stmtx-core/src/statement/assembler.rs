//! Statement assembly: runs the extraction stages in order and packages the
//! result.

use std::time::Instant;

use image::DynamicImage;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::detector::BankDetector;
use super::registry::ProfileRegistry;
use crate::models::config::StmtxConfig;
use crate::models::statement::Statement;
use crate::ocr::{OcrResult, TextRecognizer, TokenTable};
use crate::Result;

/// Everything the OCR stage produced for one page.
#[derive(Debug, Clone, Copy)]
pub struct PageInput<'a> {
    /// Page image, used for region re-recognition.
    pub image: &'a DynamicImage,
    /// Full page text.
    pub text: &'a str,
    /// Word-level token table.
    pub tokens: &'a TokenTable,
}

impl<'a> PageInput<'a> {
    pub fn new(image: &'a DynamicImage, text: &'a str, tokens: &'a TokenTable) -> Self {
        Self {
            image,
            text,
            tokens,
        }
    }

    pub fn from_ocr(image: &'a DynamicImage, ocr: &'a OcrResult) -> Self {
        Self::new(image, &ocr.text, &ocr.tokens)
    }
}

/// Result of statement extraction.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionResult {
    /// Extracted statement.
    pub statement: Statement,
    /// Non-fatal issues found during extraction.
    pub warnings: Vec<String>,
    /// Amount tokens dropped for lack of a date.
    pub dropped_rows: usize,
    /// Non-amount tokens found inside a column window.
    pub skipped_tokens: usize,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Orchestrates detection, profile selection and field extraction.
#[derive(Debug, Clone)]
pub struct StatementAssembler {
    detector: BankDetector,
    registry: ProfileRegistry,
    validate_totals: bool,
}

impl StatementAssembler {
    pub fn new(detector: BankDetector, registry: ProfileRegistry) -> Self {
        Self {
            detector,
            registry,
            validate_totals: true,
        }
    }

    /// Assembler wired from configuration.
    pub fn from_config(config: &StmtxConfig) -> Self {
        Self::new(
            BankDetector::new(&config.extraction.supported_banks),
            ProfileRegistry::from_config(config),
        )
        .with_totals_validation(config.extraction.validate_totals)
    }

    /// Set totals validation.
    pub fn with_totals_validation(mut self, validate: bool) -> Self {
        self.validate_totals = validate;
        self
    }

    /// Extract a statement from one page.
    ///
    /// Stages run in a fixed order and the first failure aborts; no partial
    /// statement is ever returned.
    pub fn assemble<R>(&self, page: &PageInput<'_>, recognizer: &R) -> Result<ExtractionResult>
    where
        R: TextRecognizer + ?Sized,
    {
        let start = Instant::now();

        let bank_name = self.detector.detect(page.text)?;
        let profile = self.registry.select(&bank_name)?;
        info!("Extracting {} BANK statement", bank_name);

        let address = profile.extract_address(page.image, recognizer)?;

        let totals = profile.extract_totals(page.text)?;
        let statement_date = profile.extract_statement_date(page.text)?;
        info!("Statement date {}", statement_date);

        let extracted = profile.extract_transactions(page.text, page.tokens, statement_date)?;
        debug!(
            "{} transactions, {} dropped rows, {} skipped tokens",
            extracted.transactions.len(),
            extracted.dropped_rows,
            extracted.skipped_tokens
        );

        let statement = Statement {
            address,
            bank_name,
            statement_date,
            totals,
            transactions: extracted.transactions,
        };

        let mut warnings = Vec::new();
        if extracted.dropped_rows > 0 {
            warnings.push(format!(
                "Dropped {} amount(s) with no resolvable date",
                extracted.dropped_rows
            ));
        }
        if self.validate_totals {
            warnings.extend(statement.validate());
        }
        for warning in &warnings {
            warn!("{}", warning);
        }

        let processing_time_ms = start.elapsed().as_millis() as u64;
        info!(
            "Extracted {} transactions in {}ms",
            statement.transactions.len(),
            processing_time_ms
        );

        Ok(ExtractionResult {
            statement,
            warnings,
            dropped_rows: extracted.dropped_rows,
            skipped_tokens: extracted.skipped_tokens,
            processing_time_ms,
        })
    }
}

impl Default for StatementAssembler {
    fn default() -> Self {
        Self::from_config(&StmtxConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Capability, ExtractionError, StmtxError};
    use crate::ocr::{OcrToken, TokenRecognizer};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    const PAGE_TEXT: &str = "PUBLIC BANK BERHAD\n\
        Statement Date 31 Jan 2024\n\
        Total Debits 150.00 No. of Debits 2\n\
        Total Credits 1,000.00 No. of Credits 1\n";

    fn tokens() -> TokenTable {
        TokenTable::new(vec![
            OcrToken::new("PUBLIC", 100, 80, 120, 30, 1, 1),
            OcrToken::new("BANK", 230, 80, 90, 30, 1, 2),
            OcrToken::new("MR", 150, 450, 40, 22, 4, 1),
            OcrToken::new("TAN", 200, 450, 60, 22, 4, 2),
            OcrToken::new("KUALA", 150, 490, 90, 22, 5, 1),
            OcrToken::new("LUMPUR", 250, 490, 110, 22, 5, 2),
            OcrToken::new("03/01", 90, 1200, 70, 22, 10, 1),
            OcrToken::new("100.00", 1500, 1200, 90, 22, 10, 3),
            OcrToken::new("DR", 1600, 1200, 30, 22, 10, 4),
            OcrToken::new("50.00", 1500, 1240, 80, 22, 11, 1),
            OcrToken::new("15/01", 90, 1300, 70, 22, 12, 1),
            OcrToken::new("1,000.00", 1820, 1300, 110, 22, 12, 3),
        ])
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn assemble(assembler: &StatementAssembler, text: &str) -> Result<ExtractionResult> {
        let image = DynamicImage::new_luma8(1, 1);
        let tokens = tokens();
        let recognizer = TokenRecognizer::new(&tokens);
        assembler.assemble(&PageInput::new(&image, text, &tokens), &recognizer)
    }

    fn extraction_error(result: Result<ExtractionResult>) -> ExtractionError {
        match result {
            Err(StmtxError::Extraction(err)) => err,
            other => panic!("expected extraction error, got {other:?}"),
        }
    }

    #[test]
    fn test_assemble_public_statement() {
        let result = assemble(&StatementAssembler::default(), PAGE_TEXT).unwrap();
        let statement = &result.statement;

        assert_eq!(statement.bank_name, "PUBLIC");
        assert_eq!(statement.address, "MR TAN\nKUALA LUMPUR");
        assert_eq!(statement.statement_date, date(31));
        assert_eq!(statement.totals.total_debit, dec("150.00"));
        assert_eq!(statement.totals.count_credit, 1);

        let rows: Vec<(NaiveDate, Decimal)> = statement
            .transactions
            .iter()
            .map(|t| (t.date, t.amount))
            .collect();
        assert_eq!(
            rows,
            vec![
                (date(3), dec("-100.00")),
                (date(3), dec("-50.00")),
                (date(15), dec("1000.00")),
            ]
        );

        assert!(result.warnings.is_empty(), "{:?}", result.warnings);
        assert_eq!(result.dropped_rows, 0);
        assert_eq!(result.skipped_tokens, 1);
    }

    #[test]
    fn test_totals_mismatch_is_a_warning() {
        let text = PAGE_TEXT.replace("No. of Debits 2", "No. of Debits 3");

        let result = assemble(&StatementAssembler::default(), &text).unwrap();
        assert_eq!(result.statement.totals.count_debit, 3);
        assert_eq!(
            result.warnings,
            vec!["Found 2 debit transactions but statement lists 3".to_string()]
        );

        let quiet = StatementAssembler::default().with_totals_validation(false);
        assert!(assemble(&quiet, &text).unwrap().warnings.is_empty());
    }

    #[test]
    fn test_no_bank_marker_aborts() {
        let text = PAGE_TEXT.replace("PUBLIC BANK", "PUBLIC");

        assert_eq!(
            extraction_error(assemble(&StatementAssembler::default(), &text)),
            ExtractionError::BankNotDetected
        );
    }

    #[test]
    fn test_unsupported_bank_aborts() {
        let text = PAGE_TEXT.replace("PUBLIC BANK", "ACME BANK");

        assert_eq!(
            extraction_error(assemble(&StatementAssembler::default(), &text)),
            ExtractionError::UnsupportedBank("ACME".to_string())
        );
    }

    #[test]
    fn test_unimplemented_bank_fails_at_selection() {
        let mut config = StmtxConfig::default();
        config.extraction.supported_banks.push("RHB".to_string());
        let text = PAGE_TEXT.replace("PUBLIC BANK", "RHB BANK");

        assert_eq!(
            extraction_error(assemble(&StatementAssembler::from_config(&config), &text)),
            ExtractionError::UnimplementedProfile {
                capability: Capability::ProfileSelection,
                bank: "RHB".to_string(),
            }
        );
    }

    #[test]
    fn test_supported_but_unregistered_bank() {
        let mut config = StmtxConfig::default();
        config.extraction.supported_banks.push("ACME".to_string());
        let text = PAGE_TEXT.replace("PUBLIC BANK", "ACME BANK");

        assert_eq!(
            extraction_error(assemble(&StatementAssembler::from_config(&config), &text)),
            ExtractionError::ProfileNotRegistered("ACME".to_string())
        );
    }

    #[test]
    fn test_missing_statement_date_aborts() {
        let text = PAGE_TEXT.replace("Statement Date 31 Jan 2024", "");

        assert_eq!(
            extraction_error(assemble(&StatementAssembler::default(), &text)),
            ExtractionError::StatementDateNotFound
        );
    }

    #[test]
    fn test_totals_are_read_before_the_date() {
        let text = PAGE_TEXT
            .replace("Statement Date 31 Jan 2024", "")
            .replace("No. of Credits 1", "");

        assert_eq!(
            extraction_error(assemble(&StatementAssembler::default(), &text)),
            ExtractionError::TotalsFieldNotFound("Credits count".to_string())
        );
    }

    #[test]
    fn test_dropped_rows_are_reported() {
        let image = DynamicImage::new_luma8(1, 1);
        let tokens: TokenTable = tokens()
            .iter()
            .filter(|t| t.text != "03/01")
            .cloned()
            .collect();
        let recognizer = TokenRecognizer::new(&tokens);
        let assembler = StatementAssembler::default().with_totals_validation(false);

        let result = assembler
            .assemble(&PageInput::new(&image, PAGE_TEXT, &tokens), &recognizer)
            .unwrap();

        assert_eq!(result.dropped_rows, 2);
        assert_eq!(result.statement.transactions.len(), 1);
        assert_eq!(
            result.warnings,
            vec!["Dropped 2 amount(s) with no resolvable date".to_string()]
        );
    }

    #[test]
    fn test_address_recognition_failure_aborts() {
        struct Failing;
        impl TextRecognizer for Failing {
            fn recognize(&self, _image: &DynamicImage) -> std::result::Result<String, crate::error::OcrError> {
                Err(crate::error::OcrError::Recognition("engine down".into()))
            }
        }

        let image = DynamicImage::new_luma8(2000, 1000);
        let tokens = tokens();
        let result = StatementAssembler::default()
            .assemble(&PageInput::new(&image, PAGE_TEXT, &tokens), &Failing);

        assert!(matches!(result, Err(StmtxError::Ocr(_))));
    }
}
