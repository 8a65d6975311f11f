//! Token table ingestion from tesseract's TSV output.
//!
//! ```text
//! level page_num block_num par_num line_num word_num left top width height conf text
//! ```
//!
//! Columns are located by header name, so extra or reordered columns are
//! tolerated. Rows without text (page/block/paragraph/line levels) are skipped.

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Deserialize;
use tracing::debug;

use super::{OcrToken, TokenTable};
use crate::error::OcrError;

const REQUIRED_COLUMNS: [&str; 7] = [
    "text", "left", "top", "width", "height", "line_num", "word_num",
];

/// One TSV word row; unknown columns such as `conf` are ignored.
#[derive(Debug, Deserialize)]
struct TsvRow {
    text: String,
    left: u32,
    top: u32,
    width: u32,
    height: u32,
    line_num: u32,
    word_num: u32,
}

impl From<TsvRow> for OcrToken {
    fn from(row: TsvRow) -> Self {
        OcrToken::new(
            row.text,
            row.left,
            row.top,
            row.width,
            row.height,
            row.line_num,
            row.word_num,
        )
    }
}

impl TokenTable {
    /// Parse a tesseract TSV table.
    pub fn from_tsv(tsv: &str) -> Result<Self, OcrError> {
        let mut rdr = ReaderBuilder::new()
            .delimiter(b'\t')
            .quoting(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(tsv.as_bytes());

        let headers = rdr.headers().map_err(|e| row_error(e, None, 1))?.clone();
        if let Some(missing) = REQUIRED_COLUMNS
            .iter()
            .find(|name| !headers.iter().any(|h| h == **name))
        {
            return Err(OcrError::TokenTable {
                line: 1,
                reason: format!("missing column '{}'", missing),
            });
        }
        let text_col = headers.iter().position(|h| h == "text").unwrap_or_default();

        let mut tokens = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(|e| row_error(e, Some(&headers), 0))?;
            let line = record.position().map_or(0, |p| p.line() as usize);

            // Page, block and line rows carry no text, sometimes not even the cell.
            if record.get(text_col).is_none_or(str::is_empty) {
                continue;
            }

            let row: TsvRow = record
                .deserialize(Some(&headers))
                .map_err(|e| row_error(e, Some(&headers), line))?;
            tokens.push(OcrToken::from(row));
        }

        debug!("Ingested {} tokens from TSV", tokens.len());

        Ok(TokenTable::new(tokens))
    }
}

/// Map a reader error to the line it occurred on, naming the bad column.
fn row_error(err: csv::Error, headers: Option<&StringRecord>, fallback_line: usize) -> OcrError {
    let line = err.position().map_or(fallback_line, |p| p.line() as usize);

    let reason = match err.kind() {
        csv::ErrorKind::Deserialize { err: de, .. } => {
            let column = de
                .field()
                .and_then(|idx| headers.and_then(|h| h.get(idx as usize)));
            match column {
                Some(name) => format!("invalid {} value: {}", name, de.kind()),
                None => de.to_string(),
            }
        }
        _ => err.to_string(),
    };

    OcrError::TokenTable { line, reason }
}
