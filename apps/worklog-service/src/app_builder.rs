//! # アプリケーション構築
//!
//! ユースケース・State の初期化とルーター構築を担当する。
//! `main.rs` はインフラ初期化とサーバー起動に集中する。

use std::sync::Arc;

use axum::{
   Router,
   middleware::from_fn_with_state,
   routing::{delete, get, post, put},
};
use tower_http::trace::TraceLayer;
use worklog_infra::{
   SessionManager,
   repository::{EmployeeRepository, WorkHoursRepository},
};

use crate::{
   config::WorklogConfig,
   handler::{
      AuthState,
      EmployeeState,
      WorkHoursState,
      admin_delete_hours,
      admin_login,
      admin_update_hours,
      create_employee,
      delete_all_hours,
      delete_employee,
      download_csv,
      get_all_hours,
      get_hours,
      health_check,
      list_all_hours,
      list_employee_names,
      list_employees,
      log_hours,
      root,
      update_employee,
   },
   middleware::{AdminGateState, require_admin},
   usecase::{
      AdminPassword,
      AuthUseCaseImpl,
      EmployeeUseCaseImpl,
      ExportUseCaseImpl,
      WorkHoursUseCaseImpl,
   },
};

/// インフラ初期化済みの依存
pub struct AppDependencies {
   pub work_hours_repository: Arc<dyn WorkHoursRepository>,
   pub employee_repository:   Arc<dyn EmployeeRepository>,
   pub session_manager:       Arc<dyn SessionManager>,
}

/// State の組み立てとルーター定義を行う
///
/// 管理者ルートは `require_admin` の内側にまとめる。ゲートは
/// `route_layer` で掛けるため、未定義のパスは認可より先に 404 になる。
pub fn build_app(config: &WorklogConfig, deps: AppDependencies) -> Router {
   let admin_password = AdminPassword::new(config.admin_password.clone());

   let auth_state = Arc::new(AuthState {
      usecase:        AuthUseCaseImpl::new(deps.session_manager.clone(), admin_password.clone()),
      secure_cookies: config.secure_cookies,
   });

   let work_hours_state = Arc::new(WorkHoursState {
      usecase: WorkHoursUseCaseImpl::new(deps.work_hours_repository.clone(), admin_password),
      export:  ExportUseCaseImpl::new(
         deps.work_hours_repository,
         deps.employee_repository.clone(),
      ),
   });

   let employee_state = Arc::new(EmployeeState {
      usecase: EmployeeUseCaseImpl::new(deps.employee_repository),
   });

   let admin_gate = AdminGateState {
      session_manager: deps.session_manager,
   };

   let public_routes = Router::new()
      .route("/", get(root))
      .route("/health", get(health_check))
      .merge(
         Router::new()
            .route("/admin-login", post(admin_login))
            .with_state(auth_state),
      )
      .merge(
         Router::new()
            .route("/log-hours", post(log_hours))
            .route("/get-all-hours", get(get_all_hours))
            .route("/get-hours", get(get_hours))
            .route("/delete-hours", delete(delete_all_hours))
            .with_state(work_hours_state.clone()),
      )
      .merge(
         Router::new()
            .route("/employees", get(list_employee_names))
            .with_state(employee_state.clone()),
      );

   let admin_routes = Router::new()
      .merge(
         Router::new()
            .route("/admin-work-hours", get(list_all_hours))
            .route("/admin-download-csv", get(download_csv))
            .route("/api/admin/update-hours", put(admin_update_hours))
            .route("/api/admin/delete-hours/{id}", delete(admin_delete_hours))
            .with_state(work_hours_state),
      )
      .merge(
         Router::new()
            .route("/admin/employees", get(list_employees).post(create_employee))
            .route(
               "/admin/employees/{id}",
               put(update_employee).delete(delete_employee),
            )
            .with_state(employee_state),
      )
      .route_layer(from_fn_with_state(admin_gate, require_admin));

   Router::new()
      .merge(public_routes)
      .merge(admin_routes)
      .layer(TraceLayer::new_for_http())
}
