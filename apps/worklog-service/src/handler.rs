//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュールで re-export し、フラットな API を提供
//! - ハンドラは薄く保ち、検証と導出はユースケース・ドメイン層に委譲
//!
//! ## ハンドラ一覧
//!
//! - `health`: 死活確認
//! - `auth`: 管理者ログイン
//! - `work_hours`: 勤務時間の記録・参照・削除・CSV エクスポート
//! - `employee`: 従業員名簿
//! - `request`: 数値を文字列でも受け付けるリクエスト値

pub mod auth;
pub mod employee;
pub mod health;
pub mod request;
pub mod work_hours;

pub use auth::{AuthState, admin_login};
pub use employee::{
   EmployeeState,
   create_employee,
   delete_employee,
   list_employee_names,
   list_employees,
   update_employee,
};
pub use health::{health_check, root};
pub use work_hours::{
   WorkHoursState,
   admin_delete_hours,
   admin_update_hours,
   delete_all_hours,
   download_csv,
   get_all_hours,
   get_hours,
   list_all_hours,
   log_hours,
};
