//! OCR boundary: token table, page geometry, and text recognizers.
//!
//! The OCR engine itself is an external collaborator. This module fixes the
//! shape of what it must hand over (full text plus a token table with
//! `text, left, top, width, height, line_num, word_num`) and the
//! [`TextRecognizer`] seam used to re-run recognition on a cropped region.

mod token_recognizer;
mod tsv;

#[cfg(feature = "tesseract")]
mod tesseract;

pub use token_recognizer::TokenRecognizer;

#[cfg(feature = "tesseract")]
pub use tesseract::TesseractRecognizer;

use image::{DynamicImage, GenericImageView};
use serde::{Deserialize, Serialize};

use crate::error::OcrError;

/// A single recognized word with its page-pixel bounding box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OcrToken {
    /// Recognized text.
    pub text: String,
    /// Left edge in pixels.
    pub left: u32,
    /// Top edge in pixels.
    pub top: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Line number as reported by the OCR engine.
    pub line_num: u32,
    /// Word number within the line.
    pub word_num: u32,
}

impl OcrToken {
    /// Create a token.
    pub fn new(
        text: impl Into<String>,
        left: u32,
        top: u32,
        width: u32,
        height: u32,
        line_num: u32,
        word_num: u32,
    ) -> Self {
        Self {
            text: text.into(),
            left,
            top,
            width,
            height,
            line_num,
            word_num,
        }
    }

    /// Right edge in pixels.
    pub fn right(&self) -> u32 {
        self.left.saturating_add(self.width)
    }

    /// Bottom edge in pixels.
    pub fn bottom(&self) -> u32 {
        self.top.saturating_add(self.height)
    }
}

/// A pixel rectangle on the page, used for cropping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub const fn new(left: u32, top: u32, width: u32, height: u32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Whether a point lies inside the region (right and bottom edges exclusive).
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.left
            && y >= self.top
            && x < self.left.saturating_add(self.width)
            && y < self.top.saturating_add(self.height)
    }

    /// Crop this region out of a page image.
    ///
    /// The crop is clamped to the image bounds; a region entirely outside the
    /// image is an error.
    pub fn crop(&self, page: &DynamicImage) -> Result<DynamicImage, OcrError> {
        let (width, height) = page.dimensions();
        if self.left >= width || self.top >= height {
            return Err(OcrError::InvalidImage(format!(
                "crop origin ({}, {}) outside {}x{} page",
                self.left, self.top, width, height
            )));
        }
        Ok(page.crop_imm(self.left, self.top, self.width, self.height))
    }
}

/// A column window: inclusive bounds on a token's `left` and `top`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    pub left_min: u32,
    pub left_max: u32,
    pub top_min: u32,
    pub top_max: u32,
}

impl Window {
    pub const fn new(left_min: u32, left_max: u32, top_min: u32, top_max: u32) -> Self {
        Self {
            left_min,
            left_max,
            top_min,
            top_max,
        }
    }

    /// Whether the token's origin falls within the window.
    pub fn contains(&self, token: &OcrToken) -> bool {
        (self.left_min..=self.left_max).contains(&token.left)
            && (self.top_min..=self.top_max).contains(&token.top)
    }
}

/// Ordered view over OCR tokens.
///
/// Reading order is kept exactly as supplied; nothing here re-sorts tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenTable {
    tokens: Vec<OcrToken>,
}

impl TokenTable {
    pub fn new(tokens: Vec<OcrToken>) -> Self {
        Self { tokens }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, OcrToken> {
        self.tokens.iter()
    }

    pub fn tokens(&self) -> &[OcrToken] {
        &self.tokens
    }

    /// Tokens matching a predicate, in table order.
    pub fn filter<F>(&self, predicate: F) -> Vec<&OcrToken>
    where
        F: Fn(&OcrToken) -> bool,
    {
        self.tokens.iter().filter(|t| predicate(t)).collect()
    }

    /// Tokens whose origin lies in a column window.
    pub fn window(&self, window: &Window) -> Vec<&OcrToken> {
        self.filter(|t| window.contains(t))
    }

    /// Tokens whose origin lies in a page region.
    pub fn region(&self, region: &Region) -> Vec<&OcrToken> {
        self.filter(|t| region.contains(t.left, t.top))
    }

    /// Load a token table from JSON (an array of tokens).
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl<'a> IntoIterator for &'a TokenTable {
    type Item = &'a OcrToken;
    type IntoIter = std::slice::Iter<'a, OcrToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

impl FromIterator<OcrToken> for TokenTable {
    fn from_iter<I: IntoIterator<Item = OcrToken>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Join tokens into text: words on the same consecutive line are separated
/// by a space, lines by a newline.
pub fn join_lines<'a, I>(tokens: I) -> String
where
    I: IntoIterator<Item = &'a OcrToken>,
{
    let mut text = String::new();
    let mut current_line: Option<u32> = None;

    for token in tokens {
        match current_line {
            Some(line) if line == token.line_num => text.push(' '),
            Some(_) => text.push('\n'),
            None => {}
        }
        text.push_str(&token.text);
        current_line = Some(token.line_num);
    }

    text
}

/// OCR output for one page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrResult {
    /// Full recognized text of the page.
    pub text: String,

    /// Word-level tokens with geometry.
    pub tokens: TokenTable,

    /// Processing time in milliseconds.
    pub processing_time_ms: u64,

    /// Image dimensions (width, height).
    pub image_size: (u32, u32),
}

/// Boundary trait for the external text recognizer.
pub trait TextRecognizer {
    /// Recognize all text in an image.
    fn recognize(&self, image: &DynamicImage) -> Result<String, OcrError>;

    /// Recognize the text inside one region of a page.
    ///
    /// The default crops the page and runs [`TextRecognizer::recognize`] on
    /// the crop.
    fn recognize_region(&self, page: &DynamicImage, region: &Region) -> Result<String, OcrError> {
        let cropped = region.crop(page)?;
        self.recognize(&cropped)
    }
}

impl<T: TextRecognizer + ?Sized> TextRecognizer for &T {
    fn recognize(&self, image: &DynamicImage) -> Result<String, OcrError> {
        (**self).recognize(image)
    }

    fn recognize_region(&self, page: &DynamicImage, region: &Region) -> Result<String, OcrError> {
        (**self).recognize_region(page, region)
    }
}
