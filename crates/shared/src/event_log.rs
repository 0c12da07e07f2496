//! # ビジネスイベントログとエラーコンテキストの構造化ヘルパー
//!
//! ログフィールドの命名規約とヘルパーマクロを提供する。
//!
//! ## ビジネスイベント
//!
//! [`log_business_event!`] マクロで出力する。`event.kind = "business_event"` マーカーが
//! 自動付与され、`jq 'select(.["event.kind"] == "business_event")'` でフィルタできる。
//!
//! ## エラーコンテキスト
//!
//! `tracing::error!` に `error.category` + `error.kind` フィールドを直接追加する。
//! 定数は [`error`] モジュールで提供。

/// ビジネスイベントを構造化ログとして出力する。
///
/// `event.kind = "business_event"` マーカーを自動付与し、
/// `tracing::info!` レベルで出力する。
///
/// ## 必須フィールド（慣例）
///
/// - `event.category`: イベントカテゴリ（[`event::category`] の定数を使用）
/// - `event.action`: アクション名（[`event::action`] の定数を使用）
/// - `event.result`: 結果（[`event::result`] の定数を使用）
///
/// ## 推奨フィールド
///
/// - `event.entity_type`: エンティティ種別（[`event::entity_type`] の定数を使用）
/// - `event.entity_id`: エンティティ ID
#[macro_export]
macro_rules! log_business_event {
    ($($args:tt)*) => {
        ::tracing::info!(
            event.kind = "business_event",
            $($args)*
        )
    };
}

/// イベントフィールドの定数
pub mod event {
    /// イベントカテゴリ
    pub mod category {
        pub const WORK_HOURS: &str = "work_hours";
        pub const EMPLOYEE: &str = "employee";
        pub const AUTH: &str = "auth";
    }

    /// イベントアクション
    pub mod action {
        // 勤務時間
        pub const WORK_HOURS_LOGGED: &str = "work_hours.logged";
        pub const WORK_HOURS_UPDATED: &str = "work_hours.updated";
        pub const WORK_HOURS_DELETED: &str = "work_hours.deleted";
        pub const WORK_HOURS_PURGED: &str = "work_hours.purged";
        pub const WORK_HOURS_EXPORTED: &str = "work_hours.exported";

        // 従業員
        pub const EMPLOYEE_CREATED: &str = "employee.created";
        pub const EMPLOYEE_UPDATED: &str = "employee.updated";
        pub const EMPLOYEE_DELETED: &str = "employee.deleted";

        // 認証
        pub const ADMIN_LOGIN_SUCCESS: &str = "auth.admin_login_success";
        pub const ADMIN_LOGIN_FAILURE: &str = "auth.admin_login_failure";
    }

    /// エンティティ種別
    pub mod entity_type {
        pub const WORK_HOURS_ENTRY: &str = "work_hours_entry";
        pub const EMPLOYEE: &str = "employee";
        pub const SESSION: &str = "session";
    }

    /// イベント結果
    pub mod result {
        pub const SUCCESS: &str = "success";
        pub const FAILURE: &str = "failure";
    }
}

/// エラーコンテキストフィールドの定数
pub mod error {
    /// エラーカテゴリ
    pub mod category {
        /// インフラストラクチャ（DB、Redis セッションストア）
        pub const INFRASTRUCTURE: &str = "infrastructure";
    }

    /// エラー種別
    pub mod kind {
        pub const DATABASE: &str = "database";
        pub const SESSION: &str = "session";
        pub const CSV_EXPORT: &str = "csv_export";
    }
}
