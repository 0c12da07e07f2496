//! # ミドルウェア
//!
//! - `admin_gate`: 管理者セッションの検証

pub mod admin_gate;

pub use admin_gate::{AdminGateState, AdminSession, require_admin};
