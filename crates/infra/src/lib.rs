//! # Worklog インフラ層
//!
//! PostgreSQL・Redis との接続と、ドメインモデルの永続化を担当する。
//!
//! ## 設計方針
//!
//! リポジトリはトレイトとして定義し、PostgreSQL 実装とインメモリのモック実装を
//! 差し替えられるようにする。ユースケース層はトレイトにのみ依存する。
//!
//! ## 依存関係
//!
//! ```text
//! service → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`db`] - PostgreSQL 接続プールとマイグレーション
//! - [`error`] - インフラ層エラー定義
//! - [`repository`] - 勤務時間・従業員リポジトリ
//! - [`session`] - Redis セッションストア
//! - `mock` - テスト用インメモリ実装（`test-utils` feature）
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use worklog_infra::{db, RedisSessionManager};
//!
//! async fn setup() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = db::create_pool("postgres://localhost/worklog").await?;
//!     db::run_migrations(&pool).await?;
//!
//!     let sessions = RedisSessionManager::new("redis://localhost:6379").await?;
//!
//!     Ok(())
//! }
//! ```

pub mod db;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod repository;
pub mod session;

pub use error::{InfraError, InfraErrorKind, Table};
pub use session::{RedisSessionManager, SessionData, SessionManager};
