//! mcqsplit - Split combined question-and-options spreadsheet cells into structured rows
//!
//! 問題文と4つの選択肢が1つのセルにまとめて書かれたワークブックを読み込み、
//! 問題文・選択肢A〜Dに分割した行と、分割できなかった行（スキップ行）に振り分けます。
//!
//! # Quick Start
//!
//! ```rust
//! use mcqsplit::segment;
//!
//! let parts = segment("What is 2+2? a. 3 b. 4 c. 5 d. 6").unwrap();
//! assert_eq!(parts.question, "What is 2+2?");
//! assert_eq!(parts.options[1], "b. 4");
//! ```
//!
//! # Workbook Conversion
//!
//! ```rust,no_run
//! use std::fs::File;
//! use mcqsplit::ProcessorBuilder;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let processor = ProcessorBuilder::new().build()?;
//!
//!     let input = File::open("questions.xlsx")?;
//!     let output = File::create("questions_processed.xlsx")?;
//!     let outcome = processor.convert(input, output)?;
//!
//!     println!("Processed rows: {}", outcome.processed_count());
//!     println!("Skipped rows: {}", outcome.skipped_count());
//!     Ok(())
//! }
//! ```
//!
//! # Directory Batch
//!
//! ```rust,no_run
//! use mcqsplit::{BatchRunner, ProcessorBuilder};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let processor = ProcessorBuilder::new().build()?;
//!     let report = BatchRunner::new(processor, "input", "output").run()?;
//!
//!     for file in &report.files {
//!         println!("{}: {} processed, {} skipped", file.input.display(), file.processed, file.skipped);
//!     }
//!     Ok(())
//! }
//! ```

mod api;
mod batch;
mod builder;
mod error;
mod output;
mod parser;
mod security;
mod segmenter;
mod types;

// 公開API
pub use api::{FormulaMode, SheetSelector};
pub use batch::{output_file_name, BatchReport, BatchRunner, FileReport};
pub use builder::{Processor, ProcessorBuilder};
pub use error::{McqSplitError, RowError};
pub use segmenter::{segment, starts_with_marker, Segmented, OPTION_COUNT, OPTION_MARKERS};
pub use types::{CellValue, ParsedRecord, ProcessOutcome, RawRow, SkippedRecord};
