//! Public Bank statement profile.

use chrono::NaiveDate;
use image::DynamicImage;

use crate::error::{ExtractionError, OcrError};
use crate::models::config::PageLayout;
use crate::models::statement::Totals;
use crate::ocr::{TextRecognizer, TokenTable};
use crate::statement::rules::{self, ColumnLayout, ExtractedTransactions};

/// Public Bank Berhad single-page statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicBank {
    layout: PageLayout,
}

impl PublicBank {
    pub const NAME: &'static str = "PUBLIC";

    pub fn new(layout: PageLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    pub fn extract_address<R>(&self, page: &DynamicImage, recognizer: &R) -> Result<String, OcrError>
    where
        R: TextRecognizer + ?Sized,
    {
        rules::extract_address(page, &self.layout.address_region, recognizer)
    }

    pub fn extract_statement_date(&self, text: &str) -> Result<NaiveDate, ExtractionError> {
        rules::extract_statement_date(text)
    }

    pub fn extract_totals(&self, text: &str) -> Result<Totals, ExtractionError> {
        rules::extract_totals(text)
    }

    /// Public Bank rows are read from the token geometry alone; the page text
    /// is not consulted.
    pub fn extract_transactions(
        &self,
        _text: &str,
        tokens: &TokenTable,
        statement_date: NaiveDate,
    ) -> ExtractedTransactions {
        rules::extract_transactions(tokens, statement_date, &ColumnLayout::from(&self.layout))
    }
}

impl Default for PublicBank {
    fn default() -> Self {
        Self::new(PageLayout::PUBLIC_BANK)
    }
}
