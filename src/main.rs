//! hotel-codes-xlsx CLI - converts the hotel code markdown table to Excel

use anyhow::{Context, Result};
use clap::Parser;
use hotel_codes_xlsx::{ConversionConfig, ConversionSummary, ConverterBuilder, ExtraCellPolicy};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hotel-codes-xlsx")]
#[command(
    author,
    version,
    about = "Convert the hotel code table in a markdown document to a styled Excel workbook"
)]
struct Cli {
    /// Input markdown file (default: HOTEL_CODES_LIST.md)
    input: Option<PathBuf>,

    /// Output Excel file (default: input path with .xlsx extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Text encoding of the input (default: utf-8)
    #[arg(long)]
    encoding: Option<String>,

    /// Worksheet title (default: "Hotel Codes List")
    #[arg(long)]
    sheet_name: Option<String>,

    /// Rows with more than five cells: pass-through, truncate or reject
    #[arg(long, value_name = "POLICY")]
    extra_cells: Option<ExtraCellPolicy>,

    /// Fail when the document has no hotel code table
    #[arg(long)]
    strict: bool,

    /// JSON configuration file (command-line flags take precedence)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the conversion summary as JSON
    #[arg(long)]
    json: bool,

    /// Read the written workbook back and check it against the extracted rows
    #[arg(long)]
    verify: bool,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = load_config(&cli)?;
    let converter = ConverterBuilder::from_config(config)
        .build()
        .context("Invalid configuration")?;

    let input = converter.config().input_path.clone();
    let summary = converter
        .convert()
        .with_context(|| format!("Failed to convert '{}'", input.display()))?;

    print_summary(&summary, cli.json)
}

/// ログはstderrへ出力し、stdoutはサマリー専用にする
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// 設定ファイルを読み込み、コマンドライン引数で上書きする
fn load_config(cli: &Cli) -> Result<ConversionConfig> {
    let mut config = match &cli.config {
        Some(path) => ConversionConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config '{}'", path.display()))?,
        None => ConversionConfig::default(),
    };

    if let Some(input) = &cli.input {
        config.input_path = input.clone();
    }
    if let Some(output) = &cli.output {
        config.output_path = Some(output.clone());
    }
    if let Some(encoding) = &cli.encoding {
        config.encoding = encoding.clone();
    }
    if let Some(sheet_name) = &cli.sheet_name {
        config.sheet_name = sheet_name.clone();
    }
    if let Some(policy) = cli.extra_cells {
        config.extra_cells = policy;
    }
    if cli.strict {
        config.require_table = true;
    }
    if cli.verify {
        config.verify_output = true;
    }

    Ok(config)
}

fn print_summary(summary: &ConversionSummary, json: bool) -> Result<()> {
    if json {
        let text =
            serde_json::to_string_pretty(summary).context("Failed to serialize summary")?;
        println!("{}", text);
    } else {
        println!(
            "Excel file created successfully: {}",
            summary.output_path.display()
        );
        println!("Total hotels: {}", summary.total_rows);
    }
    Ok(())
}
