//! # 氏名
//!
//! 勤務時間エントリと従業員名簿を結ぶのは外部キーではなく氏名の値そのもの。
//! 比較は常に大文字小文字を区別しないため、正規化済みのキー
//! [`NormalizedName`] を明示的に用意する。

use derive_more::Display;

define_validated_string! {
    /// 氏名（値オブジェクト）
    ///
    /// 勤務時間エントリ・従業員の双方で使う自由入力の識別子。
    /// 前後の空白は取り除き、空文字は受け付けない。
    pub struct PersonName {
        label: "Name",
        max_length: 200,
    }
}

impl PersonName {
    /// 保存済みの値から復元する
    ///
    /// 検証は入力境界でのみ行う。ストアには空や最大長超の旧データも残っている。
    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// 大文字小文字を区別しない照合キーを返す
    pub fn normalized(&self) -> NormalizedName {
        NormalizedName::from_raw(&self.0)
    }

    /// 正規化後に一致するかどうか
    pub fn matches(&self, other: &PersonName) -> bool {
        self.normalized() == other.normalized()
    }
}

/// 正規化済み氏名（照合キー）
///
/// ストア側の `LOWER(name)` と同じ意味の小文字化を行う。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
pub struct NormalizedName(String);

impl NormalizedName {
    /// 生の文字列から照合キーを作成する
    pub fn from_raw(value: &str) -> Self {
        Self(value.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
