//! # 死活確認ハンドラ
//!
//! ## エンドポイント
//!
//! ```text
//! GET /        # プレーンテキスト
//! GET /health  # {"status": "healthy", "version": "0.1.0"}
//! ```

use axum::Json;
use worklog_shared::HealthResponse;

/// ルートの死活確認メッセージ
pub const LIVENESS_MESSAGE: &str = "Worklog-Service läuft.";

/// GET /
pub async fn root() -> &'static str {
   LIVENESS_MESSAGE
}

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
   Json(HealthResponse::healthy(env!("CARGO_PKG_VERSION")))
}

#[cfg(test)]
mod tests {
   use axum::{
      Router,
      body::{Body, to_bytes},
      http::{Request, StatusCode},
      routing::get,
   };
   use pretty_assertions::assert_eq;
   use tower::ServiceExt;

   use super::*;

   #[tokio::test]
   async fn test_ルートはプレーンテキストで応答する() {
      let app = Router::new().route("/", get(root));

      let response = app
         .oneshot(Request::get("/").body(Body::empty()).unwrap())
         .await
         .unwrap();

      assert_eq!(response.status(), StatusCode::OK);
      let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
      assert_eq!(&body[..], LIVENESS_MESSAGE.as_bytes());
   }

   #[tokio::test]
   async fn test_healthはバージョンを返す() {
      let app = Router::new().route("/health", get(health_check));

      let response = app
         .oneshot(Request::get("/health").body(Body::empty()).unwrap())
         .await
         .unwrap();

      let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
      let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
      assert_eq!(json["status"], "healthy");
      assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
   }
}
