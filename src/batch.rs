//! Batch Module
//!
//! 入力ディレクトリ内のワークブックをまとめて処理するモジュール。
//! ファイルはファイル名順に1つずつ処理するため、メモリ上に保持する入力は常に1ファイル分です。

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::{error, info};

use crate::builder::Processor;
use crate::error::McqSplitError;

/// 処理対象とする入力ファイルの拡張子（大文字小文字を区別）
const INPUT_EXTENSION: &str = ".xlsx";

/// 入力ファイル名から出力ファイル名を生成する
///
/// 形式: `{拡張子を除いた名前}_processed_{YYYY-MM-DD}.xlsx`
///
/// ```rust
/// use chrono::NaiveDate;
/// use mcqsplit::output_file_name;
///
/// let date = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
/// assert_eq!(output_file_name("quiz.xlsx", date), "quiz_processed_2025-03-09.xlsx");
/// ```
pub fn output_file_name(input_name: &str, date: NaiveDate) -> String {
    let stem = Path::new(input_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{}_processed_{}.xlsx", stem, date.format("%Y-%m-%d"))
}

/// 1ファイル分の処理レポート
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub processed: usize,
    pub skipped: usize,
    /// スキップ理由ごとの件数
    pub skip_reasons: BTreeMap<String, usize>,
    /// ファイル単位の処理に失敗した場合のエラーメッセージ
    pub error: Option<String>,
}

impl FileReport {
    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

/// バッチ全体のレポート
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReport {
    pub files: Vec<FileReport>,
    pub total_processed: usize,
    pub total_skipped: usize,
    pub failed: usize,
}

impl BatchReport {
    fn from_files(files: Vec<FileReport>) -> Self {
        Self {
            total_processed: files.iter().map(|f| f.processed).sum(),
            total_skipped: files.iter().map(|f| f.skipped).sum(),
            failed: files.iter().filter(|f| f.is_failed()).count(),
            files,
        }
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

/// ディレクトリ単位のバッチ処理
///
/// # 使用例
///
/// ```rust,no_run
/// use mcqsplit::{BatchRunner, ProcessorBuilder};
///
/// # fn main() -> Result<(), mcqsplit::McqSplitError> {
/// let processor = ProcessorBuilder::new().build()?;
/// let report = BatchRunner::new(processor, "input", "output").run()?;
/// println!("{} rows processed", report.total_processed);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct BatchRunner {
    processor: Processor,
    input_dir: PathBuf,
    output_dir: PathBuf,
    date: NaiveDate,
}

impl BatchRunner {
    /// 出力ファイル名の日付に本日（ローカル時刻）を使うランナーを生成する
    pub fn new(
        processor: Processor,
        input_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            processor,
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            date: Local::now().date_naive(),
        }
    }

    /// 出力ファイル名に使う日付を指定する
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    /// 入力ディレクトリから処理対象のファイルを列挙する（ファイル名順）
    pub fn discover(&self) -> Result<Vec<PathBuf>, McqSplitError> {
        let mut files = Vec::new();
        for entry in fs::read_dir(&self.input_dir)? {
            let path = entry?.path();
            let is_input = path
                .file_name()
                .is_some_and(|name| name.to_string_lossy().ends_with(INPUT_EXTENSION));
            if is_input && path.is_file() {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    /// 入力ファイルの出力先パス
    pub fn output_path(&self, input: &Path) -> PathBuf {
        let name = input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.output_dir.join(output_file_name(&name, self.date))
    }

    /// バッチを実行する
    ///
    /// 個々のファイルの失敗はレポートに記録して処理を続けます。
    /// 入力ディレクトリの読み込みと出力ディレクトリの作成に失敗した場合のみエラーを返します。
    pub fn run(&self) -> Result<BatchReport, McqSplitError> {
        fs::create_dir_all(&self.output_dir)?;
        let inputs = self.discover()?;

        info!(
            input_dir = %self.input_dir.display(),
            files = inputs.len(),
            "starting batch"
        );

        let files: Vec<FileReport> = inputs.iter().map(|input| self.run_file(input)).collect();

        Ok(BatchReport::from_files(files))
    }

    fn run_file(&self, input: &Path) -> FileReport {
        let output = self.output_path(input);

        match self.processor.convert_file(input, &output) {
            Ok(outcome) => {
                info!(
                    input = %input.display(),
                    output = %output.display(),
                    processed = outcome.processed_count(),
                    skipped = outcome.skipped_count(),
                    "file processed"
                );
                FileReport {
                    input: input.to_path_buf(),
                    output,
                    processed: outcome.processed_count(),
                    skipped: outcome.skipped_count(),
                    skip_reasons: outcome.skip_reasons(),
                    error: None,
                }
            }
            Err(e) => {
                error!(input = %input.display(), error = %e, "failed to process file");
                FileReport {
                    input: input.to_path_buf(),
                    output,
                    processed: 0,
                    skipped: 0,
                    skip_reasons: BTreeMap::new(),
                    error: Some(e.to_string()),
                }
            }
        }
    }
}
