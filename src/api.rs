//! Public API Types
//!
//! 公開APIで使用する列挙型を定義するモジュール。

/// シート選択方式
///
/// 入力ワークブックのうち、どのシートから行を読み込むかを指定します。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum SheetSelector {
    /// 先頭のシート（デフォルト）
    ///
    /// 単一シートで作成された問題集では、これがアクティブシートに相当します。
    #[default]
    First,

    /// インデックス指定（0始まり）
    ///
    /// 例: `SheetSelector::Index(1)` は2番目のシートを選択
    Index(usize),

    /// シート名指定
    ///
    /// 例: `SheetSelector::Name("Questions".to_string())`
    Name(String),
}

/// 数式セルの読み込みモード
///
/// 数式セルを数式文字列として読むか、キャッシュされた計算結果として読むかを指定します。
/// 識別子列の除外判定（`=`で始まるか）はこのモードの影響を受けます。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum FormulaMode {
    /// 数式文字列を読み込む（デフォルト）
    ///
    /// 先頭に`=`を付けた数式文字列をセル値とします。
    /// 例: `=SUM(A1:A2)` → `=SUM(A1:A2)`（この行は除外対象になる）
    #[default]
    Formula,

    /// キャッシュされた結果値を読み込む
    ///
    /// 例: `=SUM(A1:A2)` → `3`
    CachedValue,
}
