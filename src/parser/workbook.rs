//! Workbook Parser
//!
//! calamineのラッパーとして、シート選択と行の抽出を提供します。

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader, Sheets, Xlsx};
use std::io::{Cursor, Read};

use crate::api::{FormulaMode, SheetSelector};
use crate::builder::ProcessorConfig;
use crate::error::McqSplitError;
use crate::security::SecurityConfig;
use crate::types::{CellValue, RawRow};

/// 読み込む列（A: 識別子, B: 説明文, C: レベル, D: コード, E: 科目）
const COLUMNS: [u32; 5] = [0, 1, 2, 3, 4];

/// ワークブックパーサー
pub(crate) struct WorkbookParser {
    /// calamineのワークブック（XLSX形式のみサポート）
    workbook: Xlsx<Cursor<Vec<u8>>>,
}

impl WorkbookParser {
    /// ワークブックを開く
    ///
    /// 入力全体をメモリに読み込み、サイズ制限を検証してからcalamineで開きます。
    ///
    /// # 戻り値
    ///
    /// * `Ok(WorkbookParser)` - 読み込みに成功した場合
    /// * `Err(McqSplitError::SecurityViolation)` - 入力サイズが上限を超えた場合
    /// * `Err(McqSplitError::Parse)` - ワークブックとして解析できない場合
    /// * `Err(McqSplitError::Config)` - XLSX以外の形式の場合
    pub fn open<R: Read>(mut reader: R, security: &SecurityConfig) -> Result<Self, McqSplitError> {
        let mut buffer = Vec::new();
        let bytes_read = reader.read_to_end(&mut buffer)?;
        security.check_input_size(bytes_read as u64)?;

        let sheets = open_workbook_auto_from_rs(Cursor::new(buffer))?;
        match sheets {
            Sheets::Xlsx(workbook) => Ok(Self { workbook }),
            _ => Err(McqSplitError::Config(
                "Only XLSX format is supported".to_string(),
            )),
        }
    }

    /// すべてのシート名を取得
    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names().to_vec()
    }

    /// シート選択方式に基づいてシートを1つ選択
    ///
    /// # 戻り値
    ///
    /// * `Ok(String)` - 選択されたシート名
    /// * `Err(McqSplitError::Config)` - シートが存在しない、またはインデックスが範囲外の場合
    pub fn select_sheet(&self, selector: &SheetSelector) -> Result<String, McqSplitError> {
        let names = self.sheet_names();

        match selector {
            SheetSelector::First => names
                .into_iter()
                .next()
                .ok_or_else(|| McqSplitError::Config("Workbook has no sheets".to_string())),

            SheetSelector::Index(index) => {
                names.get(*index).cloned().ok_or_else(|| {
                    McqSplitError::Config(format!(
                        "Sheet index {} is out of range (total: {})",
                        index,
                        names.len()
                    ))
                })
            }

            SheetSelector::Name(name) => {
                if !names.contains(name) {
                    return Err(McqSplitError::Config(format!("Sheet '{}' not found", name)));
                }
                Ok(name.clone())
            }
        }
    }

    /// シートから行を読み込む
    ///
    /// 先頭の`header_rows`行を読み飛ばし、以降の各行の列A〜Eを[`RawRow`]に変換します。
    /// 使用範囲内の空行も空の`RawRow`として返します。
    pub fn read_rows(
        &mut self,
        sheet_name: &str,
        config: &ProcessorConfig,
    ) -> Result<Vec<RawRow>, McqSplitError> {
        let range = self
            .workbook
            .worksheet_range(sheet_name)
            .map_err(|e| McqSplitError::Parse(e.into()))?;

        // 数式は1回だけ取得して全セルで再利用する
        let formulas = match config.formula_mode {
            FormulaMode::Formula => self.workbook.worksheet_formula(sheet_name).ok(),
            FormulaMode::CachedValue => None,
        };

        let last_row = [range.end(), formulas.as_ref().and_then(|f| f.end())]
            .into_iter()
            .flatten()
            .map(|(row, _)| row)
            .max();
        let Some(last_row) = last_row else {
            return Ok(Vec::new());
        };

        let mut rows = Vec::new();
        for row in config.header_rows..=last_row {
            let [identifier, description, level, code, subject] =
                COLUMNS.map(|col| read_cell(&range, formulas.as_ref(), row, col));
            rows.push(RawRow {
                row_number: row + 1,
                identifier,
                description,
                level,
                code,
                subject,
            });
        }

        Ok(rows)
    }
}

/// 絶対座標のセルを読み込む
///
/// 数式が存在する場合は`=`付きの数式文字列を優先します。
fn read_cell(range: &Range<Data>, formulas: Option<&Range<String>>, row: u32, col: u32) -> CellValue {
    let formula = formulas
        .and_then(|f| f.get_value((row, col)))
        .filter(|f| !f.is_empty());

    if let Some(formula) = formula {
        return if formula.starts_with('=') {
            CellValue::Text(formula.clone())
        } else {
            CellValue::Text(format!("={}", formula))
        };
    }

    range
        .get_value((row, col))
        .map(convert_data)
        .unwrap_or_default()
}

/// calamineのセル値を[`CellValue`]に変換
fn convert_data(cell: &Data) -> CellValue {
    match cell {
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(datetime) if dt.is_datetime() => CellValue::DateTime(datetime),
            // 期間（[h]:mm など）とExcelの範囲外の値は数値のまま
            _ => CellValue::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Error(e.to_string()),
        _ => CellValue::Empty,
    }
}


// ワークブック全体の読み込みは実際のXLSXファイルが必要なため、統合テスト（tests/）で実装します。
