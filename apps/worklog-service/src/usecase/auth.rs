//! 管理者ログインユースケース
//!
//! 単一の共有パスワード（平文）と照合し、成功時に管理者セッションを作成する。
//! 照合は `subtle` による定数時間比較で行う。

use std::{fmt, sync::Arc};

use subtle::ConstantTimeEq;
use worklog_domain::access::AccessLevel;
use worklog_infra::{SessionData, SessionManager};
use worklog_shared::{event_log::event, log_business_event};

use crate::error::WorklogError;

/// ログイン失敗時のメッセージ
pub const INVALID_PASSWORD_MESSAGE: &str = "Ungültiges Passwort.";

/// 共有管理者パスワード
#[derive(Clone)]
pub struct AdminPassword(String);

impl AdminPassword {
   pub fn new(password: impl Into<String>) -> Self {
      Self(password.into())
   }

   /// 候補が一致するかを定数時間で比較する
   pub fn verify(&self, candidate: &str) -> bool {
      self.0.as_bytes().ct_eq(candidate.as_bytes()).into()
   }
}

impl fmt::Debug for AdminPassword {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.debug_tuple("AdminPassword").field(&"[REDACTED]").finish()
   }
}

/// 管理者ログインユースケース
pub struct AuthUseCaseImpl {
   session_manager: Arc<dyn SessionManager>,
   admin_password:  AdminPassword,
}

impl AuthUseCaseImpl {
   pub fn new(session_manager: Arc<dyn SessionManager>, admin_password: AdminPassword) -> Self {
      Self {
         session_manager,
         admin_password,
      }
   }

   /// パスワードを検証し、管理者セッションの ID を返す
   #[tracing::instrument(skip_all)]
   pub async fn login(&self, password: &str) -> Result<String, WorklogError> {
      if !self.admin_password.verify(password) {
         log_business_event!(
            event.category = event::category::AUTH,
            event.action = event::action::ADMIN_LOGIN_FAILURE,
            event.entity_type = event::entity_type::SESSION,
            event.result = event::result::FAILURE,
            event.reason = "password_mismatch",
            "管理者ログイン失敗"
         );
         return Err(WorklogError::Unauthorized(INVALID_PASSWORD_MESSAGE.to_string()));
      }

      let session_id = self
         .session_manager
         .create(&SessionData::new(AccessLevel::Admin))
         .await?;

      log_business_event!(
         event.category = event::category::AUTH,
         event.action = event::action::ADMIN_LOGIN_SUCCESS,
         event.entity_type = event::entity_type::SESSION,
         event.result = event::result::SUCCESS,
         "管理者ログイン成功"
      );

      Ok(session_id)
   }
}

#[cfg(test)]
mod tests {
   use pretty_assertions::assert_eq;
   use rstest::rstest;
   use worklog_infra::mock::{FailingSessionManager, MockSessionManager};

   use super::*;

   #[rstest]
   #[case("admin", true)]
   #[case("Admin", false)]
   #[case("admin ", false)]
   #[case("", false)]
   fn test_パスワードは完全一致のみ受け付ける(#[case] candidate: &str, #[case] expected: bool) {
      assert_eq!(AdminPassword::new("admin").verify(candidate), expected);
   }

   #[test]
   fn test_debug出力でパスワードが伏せられる() {
      assert!(!format!("{:?}", AdminPassword::new("geheim")).contains("geheim"));
   }

   #[tokio::test]
   async fn test_正しいパスワードで管理者セッションが作成される() {
      let sessions = Arc::new(MockSessionManager::new());
      let sut = AuthUseCaseImpl::new(sessions.clone(), AdminPassword::new("admin"));

      let session_id = sut.login("admin").await.unwrap();

      let stored = sessions.get(&session_id).await.unwrap().unwrap();
      assert_eq!(stored.access_level(), AccessLevel::Admin);
   }

   #[tokio::test]
   async fn test_誤ったパスワードはunauthorizedになる() {
      let sut = AuthUseCaseImpl::new(Arc::new(MockSessionManager::new()), AdminPassword::new("admin"));

      let err = sut.login("falsch").await.unwrap_err();

      assert!(matches!(err, WorklogError::Unauthorized(msg) if msg == INVALID_PASSWORD_MESSAGE));
   }

   #[tokio::test]
   async fn test_セッションストア障害はdatabaseエラーになる() {
      let sut = AuthUseCaseImpl::new(Arc::new(FailingSessionManager), AdminPassword::new("admin"));

      let err = sut.login("admin").await.unwrap_err();

      assert!(matches!(err, WorklogError::Database(_)));
   }
}
