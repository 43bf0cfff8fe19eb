//! Output Sheets
//!
//! 処理済みシートとスキップシートの書き込みを提供するモジュール。

use rust_xlsxwriter::{Format, Worksheet, XlsxError};

use crate::types::{CellValue, ParsedRecord, SkippedRecord};

pub(crate) const PROCESSED_SHEET: &str = "Processed Data";
pub(crate) const SKIPPED_SHEET: &str = "Skipped Data";

pub(crate) const PROCESSED_HEADERS: [&str; 9] = [
    "Qno", "Question", "Option A", "Option B", "Option C", "Option D", "Level", "Code", "Subject",
];
pub(crate) const SKIPPED_HEADERS: [&str; 2] = ["Qno", "Description"];

/// 日時セルの表示形式
const DATETIME_NUM_FORMAT: &str = "yyyy-mm-dd h:mm:ss";

/// 処理済みの行を書き込む
///
/// 列: 識別子、問題文、選択肢A〜D、レベル、コード、科目
pub(crate) fn write_processed(
    worksheet: &mut Worksheet,
    records: &[ParsedRecord],
) -> Result<(), XlsxError> {
    worksheet.set_name(PROCESSED_SHEET)?;
    write_header(worksheet, &PROCESSED_HEADERS)?;
    let cells = CellWriter::new();

    for (idx, record) in records.iter().enumerate() {
        let row = idx as u32 + 1;

        cells.write(worksheet, row, 0, &record.identifier)?;
        worksheet.write_string(row, 1, &record.question)?;
        for (offset, option) in record.options.iter().enumerate() {
            worksheet.write_string(row, 2 + offset as u16, option)?;
        }
        cells.write(worksheet, row, 6, &record.level)?;
        cells.write(worksheet, row, 7, &record.code)?;
        cells.write(worksheet, row, 8, &record.subject)?;
    }

    Ok(())
}

/// スキップされた行を書き込む
///
/// 列: 識別子、元の説明文
pub(crate) fn write_skipped(
    worksheet: &mut Worksheet,
    records: &[SkippedRecord],
) -> Result<(), XlsxError> {
    worksheet.set_name(SKIPPED_SHEET)?;
    write_header(worksheet, &SKIPPED_HEADERS)?;
    let cells = CellWriter::new();

    for (idx, record) in records.iter().enumerate() {
        let row = idx as u32 + 1;
        cells.write(worksheet, row, 0, &record.identifier)?;
        cells.write(worksheet, row, 1, &record.description)?;
    }

    Ok(())
}

fn write_header(worksheet: &mut Worksheet, headers: &[&str]) -> Result<(), XlsxError> {
    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header)?;
    }
    Ok(())
}

/// セル値を型を保ったまま書き込む
///
/// `=`で始まるテキストは数式として書き戻す。空セルは何も書かない。
struct CellWriter {
    datetime_format: Format,
}

impl CellWriter {
    fn new() -> Self {
        Self {
            datetime_format: Format::new().set_num_format(DATETIME_NUM_FORMAT),
        }
    }

    fn write(
        &self,
        worksheet: &mut Worksheet,
        row: u32,
        col: u16,
        value: &CellValue,
    ) -> Result<(), XlsxError> {
        match value {
            CellValue::Text(s) if s.starts_with('=') => {
                worksheet.write_formula(row, col, s.as_str())?;
            }
            CellValue::Text(s) | CellValue::Error(s) => {
                worksheet.write_string(row, col, s)?;
            }
            CellValue::Number(n) => {
                worksheet.write_number(row, col, *n)?;
            }
            CellValue::Bool(b) => {
                worksheet.write_boolean(row, col, *b)?;
            }
            CellValue::DateTime(dt) => {
                worksheet.write_datetime_with_format(row, col, dt, &self.datetime_format)?;
            }
            CellValue::Empty => {}
        }
        Ok(())
    }
}
