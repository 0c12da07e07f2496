//! ハンドラテスト用のアプリケーション
//!
//! モックリポジトリで組み立てたルーターに `oneshot` でリクエストを送る。

use std::sync::Arc;

use axum::{
   Router,
   body::{Body, to_bytes},
   http::{HeaderMap, Method, Request, StatusCode, header},
};
use tower::ServiceExt;
use worklog_domain::access::AccessLevel;
use worklog_infra::{
   SessionData,
   mock::{MockEmployeeRepository, MockSessionManager, MockWorkHoursRepository},
};

use crate::{
   app_builder::{AppDependencies, build_app},
   config::WorklogConfig,
};

/// テスト用の共有パスワード
pub const TEST_ADMIN_PASSWORD: &str = "geheim";

const ADMIN_SESSION_ID: &str = "test-admin-session";

/// レスポンスの要約
#[derive(Debug)]
pub struct TestResponse {
   pub status:  StatusCode,
   pub headers: HeaderMap,
   pub body:    String,
}

/// モックで組み立てたテスト用アプリケーション
pub struct TestApp {
   pub work_hours: MockWorkHoursRepository,
   pub employees:  MockEmployeeRepository,
   pub sessions:   MockSessionManager,
   router:         Router,
}

impl TestApp {
   pub fn new() -> Self {
      let work_hours = MockWorkHoursRepository::new();
      let employees = MockEmployeeRepository::new();
      let sessions = MockSessionManager::new();

      let router = build_app(
         &test_config(),
         AppDependencies {
            work_hours_repository: Arc::new(work_hours.clone()),
            employee_repository:   Arc::new(employees.clone()),
            session_manager:       Arc::new(sessions.clone()),
         },
      );

      Self {
         work_hours,
         employees,
         sessions,
         router,
      }
   }

   /// 管理者セッションを登録し、Cookie ヘッダー値を返す
   pub fn admin_cookie(&self) -> String {
      self.sessions
         .insert(ADMIN_SESSION_ID, SessionData::new(AccessLevel::Admin));
      format!("worklog_session={ADMIN_SESSION_ID}")
   }

   /// リクエストを送り、本文を文字列で受け取る
   pub async fn send(&self, request: Request<Body>) -> TestResponse {
      let response = self.router.clone().oneshot(request).await.unwrap();
      let status = response.status();
      let headers = response.headers().clone();
      let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

      TestResponse {
         status,
         headers,
         body: String::from_utf8(bytes.to_vec()).unwrap(),
      }
   }
}

impl Default for TestApp {
   fn default() -> Self {
      Self::new()
   }
}

fn test_config() -> WorklogConfig {
   WorklogConfig {
      host:           "127.0.0.1".to_string(),
      port:           0,
      database_url:   "postgres://unused".to_string(),
      redis_url:      "redis://unused".to_string(),
      admin_password: TEST_ADMIN_PASSWORD.to_string(),
      secure_cookies: false,
   }
}

/// JSON 本文付きのリクエスト
pub fn json_request(method: Method, uri: &str, body: serde_json::Value) -> Request<Body> {
   Request::builder()
      .method(method)
      .uri(uri)
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from(body.to_string()))
      .unwrap()
}

/// 本文なしのリクエスト
pub fn empty_request(method: Method, uri: &str) -> Request<Body> {
   Request::builder()
      .method(method)
      .uri(uri)
      .body(Body::empty())
      .unwrap()
}

/// Cookie ヘッダーを付与する
pub fn with_cookie(mut request: Request<Body>, cookie: &str) -> Request<Body> {
   request
      .headers_mut()
      .insert(header::COOKIE, cookie.parse().unwrap());
   request
}
