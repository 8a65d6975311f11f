//! Recognizer that answers from an existing token table.

use image::DynamicImage;

use super::{join_lines, Region, TextRecognizer, TokenTable};
use crate::error::OcrError;

/// Answers recognition requests from tokens already produced for the page,
/// instead of running an OCR engine again.
///
/// A region's text is built from the tokens whose origin lies inside it.
pub struct TokenRecognizer<'a> {
    tokens: &'a TokenTable,
}

impl<'a> TokenRecognizer<'a> {
    pub fn new(tokens: &'a TokenTable) -> Self {
        Self { tokens }
    }
}

impl TextRecognizer for TokenRecognizer<'_> {
    fn recognize(&self, _image: &DynamicImage) -> Result<String, OcrError> {
        Ok(join_lines(self.tokens))
    }

    fn recognize_region(&self, _page: &DynamicImage, region: &Region) -> Result<String, OcrError> {
        Ok(join_lines(self.tokens.region(region)))
    }
}
