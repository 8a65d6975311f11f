//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::ocr::{Region, Window};

/// Main configuration for the stmtx pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StmtxConfig {
    /// External OCR engine configuration.
    pub ocr: OcrConfig,

    /// Statement extraction configuration.
    pub extraction: ExtractionConfig,

    /// Per-bank page layouts.
    pub layouts: LayoutConfig,
}

/// External OCR engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Path to (or name of) the tesseract binary.
    pub tesseract_path: PathBuf,

    /// Recognition language passed to tesseract.
    pub language: String,

    /// Page segmentation mode (`--psm`), engine default when unset.
    pub page_segmentation_mode: Option<u8>,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            tesseract_path: PathBuf::from("tesseract"),
            language: "eng".to_string(),
            page_segmentation_mode: None,
        }
    }
}

/// Statement extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Upper-cased bank names accepted by the detector.
    pub supported_banks: Vec<String>,

    /// Check transaction counts and sums against the printed totals.
    pub validate_totals: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            supported_banks: vec!["PUBLIC".to_string()],
            validate_totals: true,
        }
    }
}

/// Fixed page geometry of one bank's statement layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLayout {
    /// Rectangle bounding the postal address block.
    pub address_region: Region,

    /// Debit amount column.
    pub debit_window: Window,

    /// Credit amount column.
    pub credit_window: Window,
}

impl PageLayout {
    /// Public Bank statement page rendered at 300 DPI (A4, 2480x3508).
    pub const PUBLIC_BANK: PageLayout = PageLayout {
        address_region: Region::new(120, 420, 1100, 380),
        debit_window: Window::new(1480, 1760, 1150, 3150),
        credit_window: Window::new(1800, 2080, 1150, 3150),
    };
}

/// Page layouts for each implemented bank profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Public Bank layout.
    pub public: PageLayout,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            public: PageLayout::PUBLIC_BANK,
        }
    }
}

impl StmtxConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: StmtxConfig =
            serde_json::from_str(r#"{"extraction": {"supported_banks": ["PUBLIC", "RHB"]}}"#)
                .unwrap();

        assert_eq!(config.extraction.supported_banks, vec!["PUBLIC", "RHB"]);
        assert!(config.extraction.validate_totals);
        assert_eq!(config.layouts.public, PageLayout::PUBLIC_BANK);
        assert_eq!(config.ocr.language, "eng");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = StmtxConfig::default();
        config.ocr.page_segmentation_mode = Some(6);
        config.save(&path).unwrap();

        let loaded = StmtxConfig::from_file(&path).unwrap();
        assert_eq!(loaded.ocr.page_segmentation_mode, Some(6));
    }
}
