//! Bridge to the external `tesseract` command-line OCR engine.

use std::process::Command;
use std::time::Instant;

use image::{DynamicImage, GenericImageView};
use tracing::{debug, info};

use super::{OcrResult, TextRecognizer, TokenTable};
use crate::error::OcrError;
use crate::models::config::OcrConfig;

/// Text recognizer that shells out to a local `tesseract` binary.
///
/// Images are written to a temporary PNG for each call; the temp directory
/// is removed when the call returns.
pub struct TesseractRecognizer {
    config: OcrConfig,
}

impl TesseractRecognizer {
    pub fn new(config: OcrConfig) -> Self {
        Self { config }
    }

    /// Run OCR over a full page, producing both the page text and its token
    /// table.
    pub fn run_page(&self, image: &DynamicImage) -> Result<OcrResult, OcrError> {
        let start = Instant::now();
        let (width, height) = image.dimensions();

        info!("Running tesseract on {}x{} page", width, height);

        let text = self.run(image, None)?;
        let tsv = self.run(image, Some("tsv"))?;
        let tokens = TokenTable::from_tsv(&tsv)?;

        let processing_time_ms = start.elapsed().as_millis() as u64;
        debug!(
            "tesseract produced {} chars and {} tokens in {}ms",
            text.len(),
            tokens.len(),
            processing_time_ms
        );

        Ok(OcrResult {
            text,
            tokens,
            processing_time_ms,
            image_size: (width, height),
        })
    }

    fn run(&self, image: &DynamicImage, output_config: Option<&str>) -> Result<String, OcrError> {
        let dir = tempfile::tempdir()
            .map_err(|e| OcrError::Engine(format!("failed to create temp dir: {}", e)))?;
        let path = dir.path().join("page.png");
        image
            .save(&path)
            .map_err(|e| OcrError::InvalidImage(format!("failed to write temp image: {}", e)))?;

        let mut command = Command::new(&self.config.tesseract_path);
        command
            .arg(&path)
            .arg("stdout")
            .arg("-l")
            .arg(&self.config.language);
        if let Some(psm) = self.config.page_segmentation_mode {
            command.arg("--psm").arg(psm.to_string());
        }
        if let Some(output_config) = output_config {
            command.arg(output_config);
        }

        let output = command.output().map_err(|e| {
            OcrError::Engine(format!(
                "failed to run {}: {}",
                self.config.tesseract_path.display(),
                e
            ))
        })?;

        if !output.status.success() {
            return Err(OcrError::Engine(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        String::from_utf8(output.stdout)
            .map_err(|e| OcrError::Recognition(format!("non UTF-8 output: {}", e)))
    }
}

impl TextRecognizer for TesseractRecognizer {
    fn recognize(&self, image: &DynamicImage) -> Result<String, OcrError> {
        self.run(image, None)
    }
}
