//! Segmenter Module
//!
//! 説明文を問題文と4つの選択肢に分割するモジュール。
//!
//! 空白区切りのトークンを左から右へ1回だけ走査し、選択肢マーカーで始まるトークンを
//! 選択肢の境界として扱います。バックトラックは行いません。
//!
//! # 既知の癖
//!
//! マーカーの照合は大文字小文字を区別します。小文字の`b.`は一致しますが、
//! 大文字の`B.`は一致しません。大文字で認識されるのは`A)`と`A.`のみです。
//! 意図された挙動かどうかは不明ですが、既存データとの互換性のためそのまま維持しています。

use crate::error::RowError;

/// 認識する選択肢マーカー（トークンの接頭辞として照合）
pub const OPTION_MARKERS: [&str; 22] = [
    "a.", "b.", "c.", "d.", "(a)", "(b)", "(c)", "(d)", "a)", "b)", "c)", "d)", "A)", "A.", "1.",
    "2.", "3.", "4.", "(1)", "(2)", "(3)", "(4)",
];

/// 分割が成功するために必要な選択肢の数
pub const OPTION_COUNT: usize = 4;

/// トークンの区切り文字
///
/// Unicodeの空白に加えて、情報分離文字（U+001C〜U+001F）も区切りとして扱う。
fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

/// トークンがいずれかの選択肢マーカーで始まるかを判定
///
/// 完全一致ではなく接頭辞の判定です。`a.bc`のようなトークンもマーカー扱いになります。
pub fn starts_with_marker(token: &str) -> bool {
    OPTION_MARKERS.iter().any(|marker| token.starts_with(marker))
}

/// 分割結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segmented {
    /// 問題文（最初のマーカーより前のトークン）
    pub question: String,

    /// 出現順の選択肢。位置0〜3がそれぞれA〜Dに対応し、マーカーの文字とは無関係
    pub options: [String; OPTION_COUNT],
}

/// 走査中の状態
///
/// 一度`Option`に遷移したら`Question`には戻らない。
enum ScanState<'a> {
    Question,
    Option(Vec<&'a str>),
}

/// 説明文を問題文と4つの選択肢に分割する
///
/// # 引数
///
/// * `description` - 空白区切りの説明文（空でないことは呼び出し側で保証する）
///
/// # 戻り値
///
/// * `Ok(Segmented)` - 選択肢がちょうど4つ見つかった場合
/// * `Err(RowError::OptionCountMismatch(n))` - それ以外の場合（`n`は実際の件数）
///
/// # 使用例
///
/// ```rust
/// use mcqsplit::segment;
///
/// let parts = segment("What is 2+2? a. 3 b. 4 c. 5 d. 6").unwrap();
/// assert_eq!(parts.question, "What is 2+2?");
/// assert_eq!(parts.options, ["a. 3", "b. 4", "c. 5", "d. 6"]);
/// ```
pub fn segment(description: &str) -> Result<Segmented, RowError> {
    let mut question: Vec<&str> = Vec::new();
    let mut options: Vec<String> = Vec::new();
    let mut state = ScanState::Question;

    for token in description.split(is_separator).filter(|t| !t.is_empty()) {
        if starts_with_marker(token) {
            if let ScanState::Option(current) = state {
                options.push(close_option(&current));
            }
            state = ScanState::Option(vec![token]);
        } else {
            match &mut state {
                ScanState::Option(current) => current.push(token),
                ScanState::Question => question.push(token),
            }
        }
    }

    if let ScanState::Option(current) = state {
        options.push(close_option(&current));
    }

    let options: [String; OPTION_COUNT] = options
        .try_into()
        .map_err(|found: Vec<String>| RowError::OptionCountMismatch(found.len()))?;

    Ok(Segmented {
        question: question.join(" ").trim().to_string(),
        options,
    })
}

fn close_option(tokens: &[&str]) -> String {
    tokens.join(" ").trim().to_string()
}
