//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。

use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::error::RowError;

/// セルの値を表す列挙型
///
/// 通過属性（レベル、コード、科目）はこの型のまま出力まで運ばれるため、
/// 数値は数値のまま、論理値は論理値のまま、日時は日時のまま書き戻されます。
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(untagged)]
pub enum CellValue {
    /// 文字列
    Text(String),

    /// 数値（f64）
    Number(f64),

    /// 論理値
    Bool(bool),

    /// 日時（1900/1904エポックは読み込み時に解決済み）
    DateTime(NaiveDateTime),

    /// エラー値（例: #DIV/0!）
    Error(String),

    /// 空セル
    #[default]
    Empty,
}

impl CellValue {
    /// 値が空セルかどうかを判定
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// 値がテキストの場合、その文字列を返す
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// 偽とみなされる値かどうか（空セル、空文字列、0、FALSE）
    pub fn is_falsy(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            CellValue::Number(n) => *n == 0.0,
            CellValue::Bool(b) => !b,
            CellValue::DateTime(_) => false,
            CellValue::Error(e) => e.is_empty(),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => f.write_str(s),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Bool(b) => f.write_str(if *b { "TRUE" } else { "FALSE" }),
            CellValue::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            CellValue::Error(e) => f.write_str(e),
            CellValue::Empty => Ok(()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(dt: NaiveDateTime) -> Self {
        CellValue::DateTime(dt)
    }
}

/// 入力シートの1行
///
/// 列A〜Eをそれぞれ識別子、説明文、レベル、コード、科目として保持します。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawRow {
    /// シート上の行番号（1始まり、ログ用）
    pub row_number: u32,

    /// 問題番号（Qno）
    pub identifier: CellValue,

    /// 問題文と4つの選択肢を含む説明文
    pub description: CellValue,

    /// レベル（通過属性）
    pub level: CellValue,

    /// コード（通過属性）
    pub code: CellValue,

    /// 科目（通過属性）
    pub subject: CellValue,
}

impl RawRow {
    /// 識別子と説明文のみを持つ行を生成（通過属性は空）
    pub fn new(identifier: impl Into<CellValue>, description: impl Into<CellValue>) -> Self {
        Self {
            identifier: identifier.into(),
            description: description.into(),
            ..Default::default()
        }
    }

    /// 通過属性を設定する
    pub fn with_attributes(
        mut self,
        level: impl Into<CellValue>,
        code: impl Into<CellValue>,
        subject: impl Into<CellValue>,
    ) -> Self {
        self.level = level.into();
        self.code = code.into();
        self.subject = subject.into();
        self
    }

    /// 識別子が`=`で始まるテキストかどうか
    pub fn is_pre_excluded(&self) -> bool {
        self.identifier
            .as_text()
            .is_some_and(|id| id.starts_with('='))
    }
}

/// 分割に成功した行
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRecord {
    pub identifier: CellValue,
    pub question: String,
    /// 出現順の選択肢（位置によってA〜Dに対応）
    pub options: [String; 4],
    pub level: CellValue,
    pub code: CellValue,
    pub subject: CellValue,
}

impl ParsedRecord {
    pub fn option_a(&self) -> &str {
        &self.options[0]
    }

    pub fn option_b(&self) -> &str {
        &self.options[1]
    }

    pub fn option_c(&self) -> &str {
        &self.options[2]
    }

    pub fn option_d(&self) -> &str {
        &self.options[3]
    }
}

/// スキップされた行
///
/// `reason`はログと集計にのみ使用され、出力シートには書き込まれません。
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRecord {
    pub identifier: CellValue,
    pub description: CellValue,
    pub reason: RowError,
}

/// 1つのワークブックを処理した結果
///
/// 処理済み行とスキップ行の2つの追記専用シーケンスを保持します。
/// 各シーケンス内の順序は入力行の順序と一致します。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessOutcome {
    pub processed: Vec<ParsedRecord>,
    pub skipped: Vec<SkippedRecord>,
}

impl ProcessOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn processed_count(&self) -> usize {
        self.processed.len()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    /// スキップ理由ごとの件数
    pub fn skip_reasons(&self) -> BTreeMap<String, usize> {
        let mut tally = BTreeMap::new();
        for record in &self.skipped {
            *tally.entry(record.reason.kind().to_string()).or_insert(0) += 1;
        }
        tally
    }
}
