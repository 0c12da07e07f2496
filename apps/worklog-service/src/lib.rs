//! # Worklog Service ライブラリ
//!
//! 勤務時間記録サービスのハンドラ・ユースケース・ルーター構築を公開する。
//!
//! ## モジュール構成
//!
//! - `app_builder`: State の組み立てとルーター定義
//! - `config`: 環境変数からの設定読み込み
//! - `error`: サービスエラーと HTTP レスポンスへの変換
//! - `handler`: HTTP ハンドラ
//! - `middleware`: 管理者セッションの検証
//! - `usecase`: ビジネスロジック（CSV エクスポートを含む）

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;
pub mod middleware;
pub mod usecase;

// テストユーティリティ（内部実装、ドキュメントからは隠す）
#[cfg(any(test, feature = "test-utils"))]
#[doc(hidden)]
pub mod test_utils;
