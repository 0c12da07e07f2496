//! # 管理者ゲートミドルウェア
//!
//! セッション Cookie からアクセスレベルを引き、管理者のときだけ
//! [`AdminSession`] をリクエスト拡張に挿入する。
//!
//! ## 使い方
//!
//! ```rust,ignore
//! use axum::middleware::from_fn_with_state;
//!
//! let gate = AdminGateState { session_manager: session_manager.clone() };
//!
//! Router::new()
//!     .route("/admin-work-hours", get(list_all_hours))
//!     .layer(from_fn_with_state(gate, require_admin))
//! ```
//!
//! 管理者ハンドラは `Extension<AdminSession>` を引数に取るため、
//! ゲートを通らないルートに置くと 500（拡張の欠落）になり、素通りはしない。

use std::sync::Arc;

use axum::{
   body::Body,
   extract::State,
   http::Request,
   middleware::Next,
   response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;
use worklog_domain::access::AccessLevel;
use worklog_infra::SessionManager;

use crate::{error::WorklogError, handler::auth::SESSION_COOKIE_NAME};

/// 管理者ゲートの状態
#[derive(Clone)]
pub struct AdminGateState {
   pub session_manager: Arc<dyn SessionManager>,
}

/// 管理者として認可済みであることを示す拡張
#[derive(Debug, Clone, Copy)]
pub struct AdminSession;

/// 管理者ゲート
///
/// Cookie がない・セッションがない・管理者でない場合は 403。
/// セッションストアの障害は 500。
pub async fn require_admin(
   State(state): State<AdminGateState>,
   jar: CookieJar,
   mut request: Request<Body>,
   next: Next,
) -> Response {
   let access_level = match jar.get(SESSION_COOKIE_NAME) {
      Some(cookie) => match state.session_manager.get(cookie.value()).await {
         Ok(session) => session.map(|s| s.access_level()).unwrap_or_default(),
         Err(e) => return WorklogError::from(e).into_response(),
      },
      None => AccessLevel::Anonymous,
   };

   if let Err(e) = access_level.require_admin() {
      return WorklogError::from(e).into_response();
   }

   request.extensions_mut().insert(AdminSession);
   next.run(request).await
}
