//! Process command - extract a statement from a single page image.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use stmtx_core::models::config::StmtxConfig;
use stmtx_core::ocr::{TesseractRecognizer, TokenRecognizer, TokenTable};
use stmtx_core::statement::{ExtractionResult, PageInput, StatementAssembler};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input page image
    #[arg(required = true)]
    input: PathBuf,

    /// Full page text from an earlier OCR run
    #[arg(long)]
    text: Option<PathBuf>,

    /// Token table from an earlier OCR run (.tsv or .json)
    #[arg(long)]
    tokens: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Print totals validation warnings
    #[arg(long)]
    validate: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output, one row per transaction
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = super::load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?,
    );
    pb.set_message("Extracting statement...");

    let assembler = StatementAssembler::from_config(&config);
    let result = extract_page(
        &args.input,
        args.text.as_deref(),
        args.tokens.as_deref(),
        &assembler,
        &config,
    );
    pb.finish_and_clear();
    let result = result?;

    if args.validate && !result.warnings.is_empty() {
        eprintln!("{}", style("Validation issues:").yellow());
        for warning in &result.warnings {
            eprintln!("  - {}", warning);
        }
    }

    let output = format_result(&result, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Run the extraction pipeline over one page.
///
/// When both the page text and the token table are supplied the OCR engine is
/// not started at all; otherwise tesseract produces whatever is missing.
pub fn extract_page(
    image_path: &Path,
    text_path: Option<&Path>,
    tokens_path: Option<&Path>,
    assembler: &StatementAssembler,
    config: &StmtxConfig,
) -> anyhow::Result<ExtractionResult> {
    let image = image::open(image_path)?;

    if let (Some(text_path), Some(tokens_path)) = (text_path, tokens_path) {
        let text = fs::read_to_string(text_path)?;
        let tokens = load_tokens(tokens_path)?;
        debug!("Loaded {} tokens from {}", tokens.len(), tokens_path.display());

        let recognizer = TokenRecognizer::new(&tokens);
        return Ok(assembler.assemble(&PageInput::new(&image, &text, &tokens), &recognizer)?);
    }

    let recognizer = TesseractRecognizer::new(config.ocr.clone());
    let mut ocr = recognizer.run_page(&image)?;
    debug!(
        "OCR found {} tokens in {}ms",
        ocr.tokens.len(),
        ocr.processing_time_ms
    );

    if let Some(text_path) = text_path {
        ocr.text = fs::read_to_string(text_path)?;
    }
    if let Some(tokens_path) = tokens_path {
        ocr.tokens = load_tokens(tokens_path)?;
    }

    Ok(assembler.assemble(&PageInput::from_ocr(&image, &ocr), &recognizer)?)
}

/// Read a token table, choosing the parser by file extension.
pub fn load_tokens(path: &Path) -> anyhow::Result<TokenTable> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    let content = fs::read_to_string(path)?;

    match extension.as_str() {
        "tsv" => Ok(TokenTable::from_tsv(&content)?),
        "json" => Ok(TokenTable::from_json(&content)?),
        _ => anyhow::bail!("Unsupported token table format: {}", path.display()),
    }
}

pub fn format_result(result: &ExtractionResult, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Csv => format_csv(result),
        OutputFormat::Text => Ok(format_text(result)),
    }
}

fn format_csv(result: &ExtractionResult) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["bank", "statement_date", "date", "type", "amount"])?;

    let statement = &result.statement;
    for transaction in &statement.transactions {
        let kind = if transaction.is_debit() { "debit" } else { "credit" };
        wtr.write_record([
            statement.bank_name.as_str(),
            &statement.statement_date.to_string(),
            &transaction.date.to_string(),
            kind,
            &transaction.amount.to_string(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(result: &ExtractionResult) -> String {
    let statement = &result.statement;
    let mut output = String::new();

    output.push_str(&format!("Bank: {} BANK\n", statement.bank_name));
    output.push_str(&format!("Statement date: {}\n", statement.statement_date));
    output.push('\n');

    output.push_str("Address:\n");
    for line in statement.address.lines() {
        output.push_str(&format!("  {}\n", line));
    }
    output.push('\n');

    output.push_str("Totals:\n");
    output.push_str(&format!(
        "  Debits:  {} ({})\n",
        statement.totals.total_debit, statement.totals.count_debit
    ));
    output.push_str(&format!(
        "  Credits: {} ({})\n",
        statement.totals.total_credit, statement.totals.count_credit
    ));
    output.push('\n');

    output.push_str(&format!("Transactions ({}):\n", statement.transactions.len()));
    for transaction in &statement.transactions {
        output.push_str(&format!("  {}  {:>12}\n", transaction.date, transaction.amount));
    }

    if result.dropped_rows > 0 {
        output.push_str(&format!("\nDropped rows: {}\n", result.dropped_rows));
    }

    output
}
