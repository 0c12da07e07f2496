//! # Worklog ドメイン層
//!
//! 勤務時間記録のビジネスルールを担うドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **値オブジェクト**: 時刻（`ClockTime`）や氏名（`PersonName`）は生成時に検証し、
//!   不正な値の存在を型レベルで排除する
//! - **導出値**: 正味労働時間・休憩時間は常に入力から導出し、直接受け付けない
//! - **純粋性**: DB や HTTP には一切依存しない
//!
//! ## 依存関係の方向
//!
//! ```text
//! service → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`time`] - `HH:MM` 時刻と労働時間の計算
//! - [`schedule`] - 曜日ごとの所定労働時間
//! - [`work_hours`] - 勤務時間エントリ
//! - [`employee`] - 従業員（所定労働時間の名簿）
//! - [`report`] - 所定・実績・差分のレポート行
//! - [`access`] - 管理者セッションのアクセスレベル
//!
//! ## 使用例
//!
//! ```rust
//! use worklog_domain::time::{ClockTime, compute_net_hours};
//!
//! let start = ClockTime::parse("08:00").unwrap();
//! let end = ClockTime::parse("16:30").unwrap();
//! assert_eq!(compute_net_hours(start, end), 8.5);
//! ```

#[macro_use]
mod macros;

pub mod access;
pub mod employee;
pub mod error;
pub mod person;
pub mod report;
pub mod schedule;
pub mod time;
pub mod work_hours;

pub use error::DomainError;
