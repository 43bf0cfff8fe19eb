//! mcqsplit CLI
//!
//! 入力ディレクトリ内の`.xlsx`ファイルをすべて処理し、
//! `{名前}_processed_{日付}.xlsx`として出力ディレクトリに書き出します。

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::Parser;
use mcqsplit::{BatchReport, BatchRunner, FormulaMode, McqSplitError, ProcessorBuilder, SheetSelector};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "mcqsplit",
    version,
    about = "Split question-and-options cells in .xlsx files into structured rows"
)]
struct Cli {
    /// Directory containing the .xlsx files to process
    #[arg(long, default_value = "input")]
    input_dir: PathBuf,

    /// Directory the processed workbooks are written to (created if missing)
    #[arg(long, default_value = "output")]
    output_dir: PathBuf,

    /// Date used in output file names (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Read the sheet at this index (0-based) instead of the first sheet
    #[arg(long, conflicts_with = "sheet_name")]
    sheet_index: Option<usize>,

    /// Read the sheet with this name instead of the first sheet
    #[arg(long)]
    sheet_name: Option<String>,

    /// Read cached formula results instead of formula text
    #[arg(long)]
    cached_values: bool,

    /// Number of header rows to skip at the top of the sheet
    #[arg(long, default_value_t = 1)]
    header_rows: u32,

    /// Maximum input file size in bytes
    #[arg(long)]
    max_input_size: Option<u64>,

    /// Print the batch report as JSON instead of plain text
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn sheet_selector(&self) -> SheetSelector {
        match (&self.sheet_index, &self.sheet_name) {
            (Some(index), _) => SheetSelector::Index(*index),
            (None, Some(name)) => SheetSelector::Name(name.clone()),
            (None, None) => SheetSelector::First,
        }
    }

    fn run(&self) -> Result<BatchReport, McqSplitError> {
        let formula_mode = if self.cached_values {
            FormulaMode::CachedValue
        } else {
            FormulaMode::Formula
        };

        let mut builder = ProcessorBuilder::new()
            .with_sheet_selector(self.sheet_selector())
            .with_formula_mode(formula_mode)
            .with_header_rows(self.header_rows);
        if let Some(bytes) = self.max_input_size {
            builder = builder.with_max_input_size(bytes);
        }

        let mut runner = BatchRunner::new(builder.build()?, &self.input_dir, &self.output_dir);
        if let Some(date) = self.date {
            runner = runner.with_date(date);
        }

        runner.run()
    }
}

fn print_report(report: &BatchReport) {
    for file in &report.files {
        match &file.error {
            None => {
                println!("Processed data saved to: {}", file.output.display());
                println!("Processed rows: {}", file.processed);
                println!("Skipped rows: {}", file.skipped);
            }
            Some(message) => {
                eprintln!("Failed to process {}: {}", file.input.display(), message);
            }
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mcqsplit=info")),
        )
        .init();

    let cli = Cli::parse();

    let report = match cli.run() {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let McqSplitError::Io(_) = e {
                eprintln!(
                    "Please check that {} exists and {} is writable.",
                    cli.input_dir.display(),
                    cli.output_dir.display()
                );
            }
            return ExitCode::FAILURE;
        }
    };

    if cli.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: {}", McqSplitError::from(e));
                return ExitCode::FAILURE;
            }
        }
    } else {
        print_report(&report);
    }

    if report.has_failures() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
