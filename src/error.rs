//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。
//!
//! エラーは2層に分かれます。
//!
//! - [`McqSplitError`]: ファイル単位の処理を中断するエラー（I/O、ワークブック解析、書き込みなど）
//! - [`RowError`]: 行単位のエラー。バッチを中断せず、該当行をスキップ側に振り分ける

use thiserror::Error;

/// mcqsplitクレート全体で使用するエラー型
///
/// ワークブックの読み込み、書き込み、設定検証の際に発生するエラーを
/// 統一的に扱います。行単位の分割失敗はこの型ではなく[`RowError`]で表現されます。
///
/// # 使用例
///
/// ```rust,no_run
/// use mcqsplit::McqSplitError;
/// use std::fs::File;
///
/// fn open_input(path: &str) -> Result<File, McqSplitError> {
///     let file = File::open(path)?;  // Ioエラーが自動的に変換される
///     Ok(file)
/// }
/// ```
#[derive(Error, Debug)]
pub enum McqSplitError {
    /// I/O操作中に発生したエラー
    ///
    /// `#[from]`属性により、`std::io::Error`から自動的に変換されます。
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// 入力ワークブックの解析中に発生したエラー（calamine由来）
    #[error("Failed to parse Excel file: {0}")]
    Parse(#[from] calamine::Error),

    /// 出力ワークブックの生成中に発生したエラー（rust_xlsxwriter由来）
    #[error("Failed to write Excel file: {0}")]
    Write(#[from] rust_xlsxwriter::XlsxError),

    /// レポートのJSONシリアライズに失敗したエラー
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// 設定の検証に失敗したエラー
    ///
    /// `ProcessorBuilder::build()`時の検証失敗や、存在しないシートの指定などで発生します。
    ///
    /// ```rust,no_run
    /// use mcqsplit::{McqSplitError, ProcessorBuilder};
    ///
    /// let result = ProcessorBuilder::new().with_max_input_size(0).build();
    ///
    /// if let Err(McqSplitError::Config(msg)) = result {
    ///     println!("設定エラー: {}", msg);
    /// }
    /// ```
    #[error("Configuration error: {0}")]
    Config(String),

    /// セキュリティ制限に違反したエラー（入力サイズ上限の超過など）
    #[error("Security violation: {0}")]
    SecurityViolation(String),
}

/// 行単位のエラー
///
/// いずれのエラーもバッチ全体にとっては致命的ではなく、該当行は
/// 元の識別子と説明文を保ったままスキップ側に出力されます。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowError {
    /// 識別子が`=`で始まるテキスト（数式由来の行）
    ///
    /// 説明文は検査されません。
    #[error("identifier starts with '='")]
    PreExcluded,

    /// 説明文が存在しない、または空
    #[error("description is empty or missing")]
    EmptyDescription,

    /// 説明文がテキストではない（0以外の数値、TRUEなど）
    #[error("description is not text")]
    NonTextDescription,

    /// 選択肢の数が4つではない
    #[error("expected 4 options, found {0}")]
    OptionCountMismatch(usize),
}

impl RowError {
    /// レポートやログで使用する安定したラベル
    pub fn kind(&self) -> &'static str {
        match self {
            RowError::PreExcluded => "pre_excluded",
            RowError::EmptyDescription => "empty_description",
            RowError::NonTextDescription => "non_text_description",
            RowError::OptionCountMismatch(_) => "option_count_mismatch",
        }
    }
}
