//! Output Module
//!
//! 処理結果をXLSXワークブックとして書き出すモジュール。
//! `rust_xlsxwriter`を使用します。

mod sheets;

use std::io::Write;

use rust_xlsxwriter::Workbook;

use crate::error::McqSplitError;
use crate::types::ProcessOutcome;

/// 処理結果のワークブック書き出し
///
/// - `Processed Data`シート: 常に作成
/// - `Skipped Data`シート: スキップ行が1件以上ある場合のみ作成
#[derive(Debug, Clone, Copy)]
pub(crate) struct OutcomeWriter;

impl OutcomeWriter {
    /// 処理結果をXLSXのバイト列として生成する
    pub fn render(outcome: &ProcessOutcome) -> Result<Vec<u8>, McqSplitError> {
        let mut workbook = Workbook::new();

        sheets::write_processed(workbook.add_worksheet(), &outcome.processed)?;

        if !outcome.skipped.is_empty() {
            sheets::write_skipped(workbook.add_worksheet(), &outcome.skipped)?;
        }

        Ok(workbook.save_to_buffer()?)
    }

    /// 処理結果をXLSXとしてライターに書き出す
    pub fn write_to<W: Write>(outcome: &ProcessOutcome, mut writer: W) -> Result<(), McqSplitError> {
        let buffer = Self::render(outcome)?;
        writer.write_all(&buffer)?;
        writer.flush()?;
        Ok(())
    }
}
