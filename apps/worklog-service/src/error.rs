//! # Worklog Service エラー定義
//!
//! サービス固有のエラーと、HTTP レスポンスへの変換を定義する。
//!
//! ## 対応表
//!
//! | エラー | HTTP ステータス |
//! |--------|----------------|
//! | `BadRequest` | 400 |
//! | `Unauthorized` | 401 |
//! | `Forbidden` | 403 |
//! | `NotFound` | 404 |
//! | `Database` / `CsvExport` | 500（詳細はログのみ） |
//!
//! 本文はメッセージのみの `text/plain`。

use axum::{
   http::StatusCode,
   response::{IntoResponse, Response},
};
use thiserror::Error;
use worklog_domain::DomainError;
use worklog_infra::InfraError;
use worklog_shared::event_log::error;

/// 500 応答の本文
pub const INTERNAL_ERROR_MESSAGE: &str = "Interner Serverfehler.";

/// Worklog Service で発生するエラー
#[derive(Debug, Error)]
pub enum WorklogError {
   /// 不正なリクエスト（検証エラー・重複エントリ）
   #[error("不正なリクエスト: {0}")]
   BadRequest(String),

   /// パスワード不一致・確認フラグ不足
   #[error("認証エラー: {0}")]
   Unauthorized(String),

   /// 管理者セッションがない
   #[error("権限がありません: {0}")]
   Forbidden(String),

   /// リソースが見つからない
   #[error("リソースが見つかりません: {0}")]
   NotFound(String),

   /// データベース・セッションストアのエラー
   #[error("データベースエラー: {0}")]
   Database(#[from] InfraError),

   /// CSV の生成失敗
   #[error("CSV エクスポートエラー: {0}")]
   CsvExport(String),
}

impl From<DomainError> for WorklogError {
   fn from(err: DomainError) -> Self {
      match err {
         DomainError::Validation(msg) => Self::BadRequest(msg),
         e @ DomainError::NotFound { .. } => Self::NotFound(e.to_string()),
         DomainError::Forbidden(msg) => Self::Forbidden(msg),
      }
   }
}

impl IntoResponse for WorklogError {
   fn into_response(self) -> Response {
      let (status, message) = match self {
         WorklogError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
         WorklogError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
         WorklogError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
         WorklogError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
         WorklogError::Database(e) => {
            let kind = if e.is_session() {
               error::kind::SESSION
            } else {
               error::kind::DATABASE
            };
            tracing::error!(
               error.category = error::category::INFRASTRUCTURE,
               error.kind = kind,
               span_trace = %e.span_trace(),
               "インフラエラー: {}",
               e
            );
            (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE.to_string())
         }
         WorklogError::CsvExport(msg) => {
            tracing::error!(
               error.category = error::category::INFRASTRUCTURE,
               error.kind = error::kind::CSV_EXPORT,
               "CSV エクスポートエラー: {}",
               msg
            );
            (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE.to_string())
         }
      };

      (status, message).into_response()
   }
}

#[cfg(test)]
mod tests {
   use axum::{body::to_bytes, http::header};
   use pretty_assertions::assert_eq;
   use rstest::rstest;

   use super::*;

   async fn render(err: WorklogError) -> (StatusCode, String, String) {
      let response = err.into_response();
      let status = response.status();
      let content_type = response
         .headers()
         .get(header::CONTENT_TYPE)
         .and_then(|v| v.to_str().ok())
         .unwrap_or_default()
         .to_string();
      let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
      (status, content_type, String::from_utf8(bytes.to_vec()).unwrap())
   }

   #[rstest]
   #[case(WorklogError::BadRequest("x".into()), StatusCode::BAD_REQUEST)]
   #[case(WorklogError::Unauthorized("x".into()), StatusCode::UNAUTHORIZED)]
   #[case(WorklogError::Forbidden("x".into()), StatusCode::FORBIDDEN)]
   #[case(WorklogError::NotFound("x".into()), StatusCode::NOT_FOUND)]
   #[case(WorklogError::CsvExport("x".into()), StatusCode::INTERNAL_SERVER_ERROR)]
   fn test_エラー種別ごとのステータスコード(#[case] err: WorklogError, #[case] expected: StatusCode) {
      assert_eq!(err.into_response().status(), expected);
   }

   #[tokio::test]
   async fn test_本文はメッセージのみのプレーンテキストになる() {
      let (status, content_type, body) =
         render(WorklogError::BadRequest("Name ist erforderlich.".into())).await;

      assert_eq!(status, StatusCode::BAD_REQUEST);
      assert!(content_type.starts_with("text/plain"), "{content_type}");
      assert_eq!(body, "Name ist erforderlich.");
   }

   #[tokio::test]
   async fn test_データベースエラーの詳細はレスポンスに含まれない() {
      let cause: InfraError = serde_json::from_str::<u8>("connection refused").unwrap_err().into();
      let err = WorklogError::Database(cause);

      let (status, content_type, body) = render(err).await;

      assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
      assert!(content_type.starts_with("text/plain"));
      assert_eq!(body, INTERNAL_ERROR_MESSAGE);
   }

   #[test]
   fn test_ドメインのnot_foundはnot_foundに変換される() {
      let err: WorklogError = DomainError::NotFound {
         entity_type: "Eintrag",
         id:          "7".to_string(),
      }
      .into();

      assert!(matches!(err, WorklogError::NotFound(msg) if msg == "Eintrag nicht gefunden: 7"));
   }
}
