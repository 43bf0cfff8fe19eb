//! Parser Module
//!
//! calamineを使用した入力ワークブックの読み込み。
//! シートの各行を[`RawRow`](crate::RawRow)に変換します。

mod workbook;

pub(crate) use workbook::WorkbookParser;
