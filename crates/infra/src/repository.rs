//! # リポジトリ実装
//!
//! 勤務時間エントリと従業員名簿の永続化を担当する。
//!
//! ## 設計方針
//!
//! - **トレイト + PostgreSQL 実装**: ユースケース層はトレイト経由で利用し、
//!   テストではインメモリのモックに差し替える
//! - **氏名の照合**: 常に `LOWER(name)` で比較し、関数インデックスで支える
//! - **行の変換**: DB 行は中間構造体で受け、`TryFrom` でドメインモデルに変換する

pub mod employee_repository;
pub mod work_hours_repository;

pub use employee_repository::{EmployeeRepository, PostgresEmployeeRepository};
pub use work_hours_repository::{PostgresWorkHoursRepository, WorkHoursRepository};
