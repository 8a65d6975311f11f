//! Address block extraction.

use image::DynamicImage;
use tracing::debug;

use crate::error::OcrError;
use crate::ocr::{Region, TextRecognizer};

/// Re-run recognition over the fixed address rectangle of the page.
///
/// The recognized text is returned as-is. There is no fallback when the
/// layout shifts and the rectangle misses the address block.
pub fn extract_address<R>(
    page: &DynamicImage,
    region: &Region,
    recognizer: &R,
) -> Result<String, OcrError>
where
    R: TextRecognizer + ?Sized,
{
    let address = recognizer.recognize_region(page, region)?;
    debug!("Address block: {} chars from {:?}", address.len(), region);
    Ok(address)
}
