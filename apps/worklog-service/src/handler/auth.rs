//! # 管理者ログインハンドラ
//!
//! ## エンドポイント
//!
//! - `POST /admin-login` - 共有パスワードで管理者セッションを開始
//!
//! ## 設計方針
//!
//! - セッション ID は Cookie（HttpOnly, SameSite=Lax）で受け渡す
//! - `ENV=production` のときだけ `Secure` を付ける
//! - ログアウトはなく、セッションは TTL（8 時間）で失効する

use std::sync::Arc;

use axum::{
   Json,
   extract::{State, rejection::JsonRejection},
   response::IntoResponse,
};
use axum_extra::extract::{
   CookieJar,
   cookie::{Cookie, SameSite},
};
use serde::Deserialize;
use worklog_infra::session::SESSION_TTL_SECONDS;

use super::request::FormValue;
use crate::{error::WorklogError, usecase::AuthUseCaseImpl};

/// セッション Cookie 名
pub const SESSION_COOKIE_NAME: &str = "worklog_session";

/// ログイン成功時のメッセージ
pub const LOGIN_SUCCESS_MESSAGE: &str = "Admin angemeldet.";

/// 管理者ログイン API の共有状態
pub struct AuthState {
   pub usecase:        AuthUseCaseImpl,
   pub secure_cookies: bool,
}

/// ログインリクエスト
#[derive(Debug, Default, Deserialize)]
pub struct AdminLoginRequest {
   pub password: Option<FormValue>,
}

/// POST /admin-login
///
/// パスワードが一致すれば管理者セッションを作成し、Cookie を設定する。
/// 不一致・文字列以外・本文なしは 401。
pub async fn admin_login(
   State(state): State<Arc<AuthState>>,
   jar: CookieJar,
   body: Result<Json<AdminLoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, WorklogError> {
   let req = body.map(|Json(req)| req).unwrap_or_default();
   let password = req.password.as_ref().and_then(FormValue::as_text);
   let session_id = state.usecase.login(password.unwrap_or_default()).await?;

   let jar = jar.add(build_session_cookie(&session_id, state.secure_cookies));
   Ok((jar, LOGIN_SUCCESS_MESSAGE))
}

/// セッション Cookie を構築する
fn build_session_cookie(session_id: &str, secure: bool) -> Cookie<'static> {
   let mut builder = Cookie::build((SESSION_COOKIE_NAME, session_id.to_string()))
      .path("/")
      .max_age(time::Duration::seconds(SESSION_TTL_SECONDS as i64))
      .http_only(true)
      .same_site(SameSite::Lax);

   if secure {
      builder = builder.secure(true);
   }

   builder.build()
}

#[cfg(test)]
mod tests {
   use axum::http::{Method, StatusCode, header};
   use pretty_assertions::assert_eq;
   use rstest::rstest;
   use serde_json::{Value, json};

   use super::*;
   use crate::test_utils::{TEST_ADMIN_PASSWORD, TestApp, empty_request, json_request};

   #[tokio::test]
   async fn test_正しいパスワードでセッションcookieが設定される() {
      let app = TestApp::new();

      let response = app
         .send(json_request(
            Method::POST,
            "/admin-login",
            json!({ "password": TEST_ADMIN_PASSWORD }),
         ))
         .await;

      assert_eq!(response.status, StatusCode::OK);
      assert_eq!(response.body, LOGIN_SUCCESS_MESSAGE);
      let cookie = response.headers[header::SET_COOKIE].to_str().unwrap();
      assert!(cookie.starts_with("worklog_session=mock-session-1"));
      assert!(cookie.contains("HttpOnly"));
      assert!(cookie.contains("SameSite=Lax"));
      assert!(cookie.contains("Max-Age=28800"));
      assert!(!cookie.contains("Secure"));
   }

   #[tokio::test]
   async fn test_誤ったパスワードは401になりcookieを設定しない() {
      let app = TestApp::new();

      let response = app
         .send(json_request(
            Method::POST,
            "/admin-login",
            json!({ "password": "falsch" }),
         ))
         .await;

      assert_eq!(response.status, StatusCode::UNAUTHORIZED);
      assert!(response.headers.get(header::SET_COOKIE).is_none());
      assert!(response.body.contains("Ungültiges Passwort."));
   }

   #[rstest]
   #[case(json!({ "password": 123 }))]
   #[case(json!({ "password": [TEST_ADMIN_PASSWORD] }))]
   #[case(json!({}))]
   #[tokio::test]
   async fn test_文字列でないパスワードは401になる(#[case] body: Value) {
      let app = TestApp::new();

      let response = app.send(json_request(Method::POST, "/admin-login", body)).await;

      assert_eq!(response.status, StatusCode::UNAUTHORIZED);
   }

   #[tokio::test]
   async fn test_本文のないログインは401になる() {
      let app = TestApp::new();

      let response = app.send(empty_request(Method::POST, "/admin-login")).await;

      assert_eq!(response.status, StatusCode::UNAUTHORIZED);
      assert!(response.headers.get(header::SET_COOKIE).is_none());
   }

   #[test]
   fn test_本番環境ではsecure属性が付く() {
      let cookie = build_session_cookie("abc", true);

      assert_eq!(cookie.secure(), Some(true));
      assert_eq!(cookie.http_only(), Some(true));
      assert_eq!(cookie.path(), Some("/"));
   }
}
