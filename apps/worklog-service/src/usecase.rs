//! # ユースケース層
//!
//! ハンドラから呼び出されるビジネスロジック。
//! リポジトリ・セッションストアにはトレイト経由でのみ依存する。

pub mod auth;
pub mod employee;
pub mod export;
pub mod work_hours;

pub use auth::{AdminPassword, AuthUseCaseImpl};
pub use employee::{EmployeeInput, EmployeeUseCaseImpl};
pub use export::ExportUseCaseImpl;
pub use work_hours::{WorkHoursInput, WorkHoursUseCaseImpl};
