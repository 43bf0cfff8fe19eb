//! Builder Module
//!
//! Fluent Builder APIを提供し、`Processor`インスタンスを段階的に構築する。
//! `Processor`は1つのワークブックについて、読み込み、行の振り分け、書き出しを担当します。

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use tracing::debug;

use crate::api::{FormulaMode, SheetSelector};
use crate::error::{McqSplitError, RowError};
use crate::output::OutcomeWriter;
use crate::parser::WorkbookParser;
use crate::security::SecurityConfig;
use crate::segmenter::{segment, Segmented};
use crate::types::{CellValue, ParsedRecord, ProcessOutcome, RawRow, SkippedRecord};

/// Excelの最大行数
const MAX_SHEET_ROWS: u32 = 1_048_576;

/// 処理の設定を保持する内部構造体
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ProcessorConfig {
    /// シート選択方式
    pub sheet_selector: SheetSelector,

    /// 数式セルの読み込みモード
    pub formula_mode: FormulaMode,

    /// 読み飛ばすヘッダー行数
    pub header_rows: u32,

    /// 入力に対するリソース制限
    pub security: SecurityConfig,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            sheet_selector: SheetSelector::First,
            formula_mode: FormulaMode::Formula,
            header_rows: 1,
            security: SecurityConfig::default(),
        }
    }
}

/// Fluent Builder APIを提供する構造体
///
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみをオーバーライドできます。
///
/// # 使用例
///
/// ```rust,no_run
/// use mcqsplit::{ProcessorBuilder, SheetSelector};
///
/// # fn main() -> Result<(), mcqsplit::McqSplitError> {
/// let processor = ProcessorBuilder::new()
///     .with_sheet_selector(SheetSelector::Name("Questions".to_string()))
///     .with_header_rows(2)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ProcessorBuilder {
    config: ProcessorConfig,
}

impl ProcessorBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - シート選択: 先頭のシート
    /// - 数式モード: 数式文字列を読み込む
    /// - ヘッダー行数: 1（データはシートの2行目から）
    /// - 入力サイズ上限: 2GB
    pub fn new() -> Self {
        Self::default()
    }

    /// 読み込むシートを選択する
    pub fn with_sheet_selector(mut self, selector: SheetSelector) -> Self {
        self.config.sheet_selector = selector;
        self
    }

    /// 数式セルの読み込みモードを指定する
    pub fn with_formula_mode(mut self, mode: FormulaMode) -> Self {
        self.config.formula_mode = mode;
        self
    }

    /// 読み飛ばすヘッダー行数を指定する
    pub fn with_header_rows(mut self, rows: u32) -> Self {
        self.config.header_rows = rows;
        self
    }

    /// 入力ファイルの最大サイズ（バイト）を指定する
    pub fn with_max_input_size(mut self, bytes: u64) -> Self {
        self.config.security.max_input_file_size = bytes;
        self
    }

    /// 設定を検証し、`Processor`インスタンスを生成する
    ///
    /// # 発生し得るエラー
    ///
    /// * `McqSplitError::Config(String)`:
    ///   * ヘッダー行数がシートの最大行数を超えている
    ///   * 入力サイズ上限が0
    pub fn build(self) -> Result<Processor, McqSplitError> {
        if self.config.header_rows > MAX_SHEET_ROWS {
            return Err(McqSplitError::Config(format!(
                "Invalid header rows: {} (max: {})",
                self.config.header_rows, MAX_SHEET_ROWS
            )));
        }

        if self.config.security.max_input_file_size == 0 {
            return Err(McqSplitError::Config(
                "Maximum input size must be greater than 0".to_string(),
            ));
        }

        Ok(Processor {
            config: self.config,
        })
    }
}

/// ワークブック単位の処理のファサード
///
/// # 使用例
///
/// ```rust,no_run
/// use mcqsplit::ProcessorBuilder;
/// use std::fs::File;
///
/// # fn main() -> Result<(), mcqsplit::McqSplitError> {
/// let processor = ProcessorBuilder::new().build()?;
/// let input = File::open("questions.xlsx")?;
/// let output = File::create("questions_processed.xlsx")?;
/// let outcome = processor.convert(input, output)?;
/// println!("Processed rows: {}", outcome.processed_count());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Processor {
    config: ProcessorConfig,
}

impl Processor {
    /// 1行の振り分けを判定する（副作用なし）
    ///
    /// 判定は次の順で行います。
    ///
    /// 1. 識別子が`=`で始まるテキストなら`PreExcluded`（説明文は見ない）
    /// 2. 説明文が空なら`EmptyDescription`
    /// 3. 説明文がテキストでなければ`NonTextDescription`
    /// 4. 説明文を[`segment`]で分割
    pub fn classify(row: &RawRow) -> Result<Segmented, RowError> {
        if row.is_pre_excluded() {
            return Err(RowError::PreExcluded);
        }

        if row.description.is_falsy() {
            return Err(RowError::EmptyDescription);
        }

        let text = match &row.description {
            CellValue::Text(s) | CellValue::Error(s) => s.as_str(),
            _ => return Err(RowError::NonTextDescription),
        };

        segment(text)
    }

    /// 1行を処理し、処理済みかスキップのどちらか一方に追加する
    pub fn handle_row(&self, row: RawRow, outcome: &mut ProcessOutcome) {
        match Self::classify(&row) {
            Ok(Segmented { question, options }) => outcome.processed.push(ParsedRecord {
                identifier: row.identifier,
                question,
                options,
                level: row.level,
                code: row.code,
                subject: row.subject,
            }),
            Err(reason) => {
                debug!(row = row.row_number, reason = %reason, "skipping row");
                outcome.skipped.push(SkippedRecord {
                    identifier: row.identifier,
                    description: row.description,
                    reason,
                });
            }
        }
    }

    /// 行のシーケンスを処理する
    pub fn process_rows<I>(&self, rows: I) -> ProcessOutcome
    where
        I: IntoIterator<Item = RawRow>,
    {
        let mut outcome = ProcessOutcome::new();
        for row in rows {
            self.handle_row(row, &mut outcome);
        }
        outcome
    }

    /// ワークブックを読み込み、選択したシートの行を処理する
    ///
    /// # 戻り値
    ///
    /// * `Ok(ProcessOutcome)` - 処理結果（行単位の失敗はスキップとして含まれる）
    /// * `Err(McqSplitError)` - ワークブックの読み込みやシート選択に失敗した場合
    pub fn process<R: Read>(&self, input: R) -> Result<ProcessOutcome, McqSplitError> {
        let mut parser = WorkbookParser::open(input, &self.config.security)?;
        let sheet_name = parser.select_sheet(&self.config.sheet_selector)?;
        let rows = parser.read_rows(&sheet_name, &self.config)?;

        debug!(sheet = %sheet_name, rows = rows.len(), "read rows");

        Ok(self.process_rows(rows))
    }

    /// ワークブックを処理し、結果のワークブックを書き出す
    ///
    /// # 引数
    ///
    /// * `input` - 入力ワークブックのリーダー
    /// * `output` - 出力ワークブック（XLSX）の書き込み先
    pub fn convert<R: Read, W: Write>(
        &self,
        input: R,
        output: W,
    ) -> Result<ProcessOutcome, McqSplitError> {
        let outcome = self.process(input)?;
        OutcomeWriter::write_to(&outcome, output)?;
        Ok(outcome)
    }

    /// ファイルからファイルへ変換する
    ///
    /// 出力は全体を生成してから書き込むため、途中で失敗した場合は出力ファイルを作成しません。
    pub fn convert_file(
        &self,
        input: &Path,
        output: &Path,
    ) -> Result<ProcessOutcome, McqSplitError> {
        let outcome = self.process(File::open(input)?)?;
        let buffer = OutcomeWriter::render(&outcome)?;
        fs::write(output, buffer)?;
        Ok(outcome)
    }
}
