//! # ドメイン層エラー定義
//!
//! ビジネスルール違反やドメイン固有の例外状態を表現するエラー型。
//!
//! ## エラーの種類と HTTP ステータスの対応
//!
//! | エラー種別 | HTTP ステータス | 用途 |
//! |-----------|----------------|------|
//! | `Validation` | 400 Bad Request | 入力値の検証失敗（時刻の前後関係、必須項目） |
//! | `NotFound` | 404 Not Found | エンティティが存在しない |
//! | `Forbidden` | 403 Forbidden | 管理者権限がない |
//!
//! ## 使用例
//!
//! ```rust
//! use worklog_domain::DomainError;
//!
//! fn validate_name(name: &str) -> Result<(), DomainError> {
//!     if name.is_empty() {
//!         return Err(DomainError::Validation("Name ist erforderlich.".to_string()));
//!     }
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// ドメイン層で発生するエラー
///
/// メッセージは利用者に返すため、ドイツ語で保持する。
#[derive(Debug, Error)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// - 必須フィールドが未入力
    /// - `HH:MM` 形式でない時刻
    /// - 開始時刻が終了時刻以降
    #[error("{0}")]
    Validation(String),

    /// エンティティが見つからない
    #[error("{entity_type} nicht gefunden: {id}")]
    NotFound {
        /// エンティティの種類（"Eintrag", "Mitarbeiter"）
        entity_type: &'static str,
        /// 検索に使用した識別子
        id:          String,
    },

    /// 権限エラー
    ///
    /// 管理者セッションを持たないリクエストが管理者操作を要求した場合に使用する。
    #[error("{0}")]
    Forbidden(String),
}
