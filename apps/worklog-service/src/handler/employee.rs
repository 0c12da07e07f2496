//! # 従業員名簿ハンドラ
//!
//! ## エンドポイント
//!
//! - `GET /employees` - ID と氏名の一覧（公開）
//! - `GET /admin/employees` - 所定労働時間付きの一覧（管理者）
//! - `POST /admin/employees` - 登録（管理者）
//! - `PUT /admin/employees/{id}` - 全上書き更新（管理者）
//! - `DELETE /admin/employees/{id}` - 削除（管理者）

use std::sync::Arc;

use axum::{
   Extension,
   Json,
   extract::{Path, State},
   http::StatusCode,
   response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use worklog_domain::{
   employee::{Employee, EmployeeId, EmployeeSummary},
   schedule::Workday,
};

use super::request::FormValue;
use crate::{
   error::WorklogError,
   middleware::AdminSession,
   usecase::{EmployeeInput, EmployeeUseCaseImpl},
};

pub const UPDATED_MESSAGE: &str = "Mitarbeiter erfolgreich aktualisiert.";
pub const DELETED_MESSAGE: &str = "Mitarbeiter erfolgreich gelöscht.";

/// 従業員 API の共有状態
pub struct EmployeeState {
   pub usecase: EmployeeUseCaseImpl,
}

// --- リクエスト/レスポンス型 ---

/// 従業員の登録・更新リクエスト
///
/// 曜日ごとの時間は未指定・`null`・解釈不能のいずれも 0 として扱う。
#[derive(Debug, Deserialize)]
pub struct EmployeeRequest {
   pub name:     Option<String>,
   pub mo_hours: Option<FormValue>,
   pub di_hours: Option<FormValue>,
   pub mi_hours: Option<FormValue>,
   pub do_hours: Option<FormValue>,
   pub fr_hours: Option<FormValue>,
}

impl From<EmployeeRequest> for EmployeeInput {
   fn from(req: EmployeeRequest) -> Self {
      let hours = [
         req.mo_hours,
         req.di_hours,
         req.mi_hours,
         req.do_hours,
         req.fr_hours,
      ]
      .map(|h| h.as_ref().and_then(FormValue::as_f64));

      Self {
         name: req.name,
         hours,
      }
   }
}

/// 従業員 DTO
#[derive(Debug, Serialize)]
pub struct EmployeeDto {
   pub id:       i32,
   pub name:     String,
   pub mo_hours: f64,
   pub di_hours: f64,
   pub mi_hours: f64,
   pub do_hours: f64,
   pub fr_hours: f64,
}

impl From<Employee> for EmployeeDto {
   fn from(employee: Employee) -> Self {
      let schedule = employee.schedule();
      Self {
         id:       employee.id().as_i32(),
         name:     employee.name().as_str().to_string(),
         mo_hours: schedule.hours_for(Workday::Monday),
         di_hours: schedule.hours_for(Workday::Tuesday),
         mi_hours: schedule.hours_for(Workday::Wednesday),
         do_hours: schedule.hours_for(Workday::Thursday),
         fr_hours: schedule.hours_for(Workday::Friday),
      }
   }
}

/// 従業員の氏名 DTO
#[derive(Debug, Serialize)]
pub struct EmployeeNameDto {
   pub id:   i32,
   pub name: String,
}

impl From<EmployeeSummary> for EmployeeNameDto {
   fn from(summary: EmployeeSummary) -> Self {
      Self {
         id:   summary.id.as_i32(),
         name: summary.name.into_string(),
      }
   }
}

// --- ハンドラ ---

/// GET /employees
pub async fn list_employee_names(
   State(state): State<Arc<EmployeeState>>,
) -> Result<impl IntoResponse, WorklogError> {
   let names: Vec<EmployeeNameDto> = state
      .usecase
      .list_names()
      .await?
      .into_iter()
      .map(EmployeeNameDto::from)
      .collect();
   Ok(Json(names))
}

/// GET /admin/employees
pub async fn list_employees(
   State(state): State<Arc<EmployeeState>>,
   Extension(_admin): Extension<AdminSession>,
) -> Result<impl IntoResponse, WorklogError> {
   let employees: Vec<EmployeeDto> = state
      .usecase
      .list_all()
      .await?
      .into_iter()
      .map(EmployeeDto::from)
      .collect();
   Ok(Json(employees))
}

/// POST /admin/employees
///
/// 採番済みの従業員を 201 で返す。
pub async fn create_employee(
   State(state): State<Arc<EmployeeState>>,
   Extension(_admin): Extension<AdminSession>,
   Json(req): Json<EmployeeRequest>,
) -> Result<impl IntoResponse, WorklogError> {
   let employee = state.usecase.create(req.into()).await?;
   Ok((StatusCode::CREATED, Json(EmployeeDto::from(employee))))
}

/// PUT /admin/employees/{id}
pub async fn update_employee(
   State(state): State<Arc<EmployeeState>>,
   Extension(_admin): Extension<AdminSession>,
   Path(id): Path<i32>,
   Json(req): Json<EmployeeRequest>,
) -> Result<impl IntoResponse, WorklogError> {
   state
      .usecase
      .update(EmployeeId::from_i32(id), req.into())
      .await?;
   Ok(UPDATED_MESSAGE)
}

/// DELETE /admin/employees/{id}
pub async fn delete_employee(
   State(state): State<Arc<EmployeeState>>,
   Extension(_admin): Extension<AdminSession>,
   Path(id): Path<i32>,
) -> Result<impl IntoResponse, WorklogError> {
   state.usecase.delete(EmployeeId::from_i32(id)).await?;
   Ok(DELETED_MESSAGE)
}

#[cfg(test)]
mod tests {
   use axum::http::Method;
   use pretty_assertions::assert_eq;
   use serde_json::{Value, json};

   use super::*;
   use crate::test_utils::{TestApp, empty_request, json_request, with_cookie};

   #[tokio::test]
   async fn test_登録は201で採番済みの従業員を返す() {
      let app = TestApp::new();
      let cookie = app.admin_cookie();

      let response = app
         .send(with_cookie(
            json_request(
               Method::POST,
               "/admin/employees",
               json!({
                  "name": "Anna",
                  "mo_hours": 8,
                  "di_hours": "7.5",
                  "mi_hours": null,
                  "do_hours": true
               }),
            ),
            &cookie,
         ))
         .await;

      assert_eq!(response.status, StatusCode::CREATED);
      let json: Value = serde_json::from_str(&response.body).unwrap();
      assert_eq!(
         json,
         json!({
            "id": 1,
            "name": "Anna",
            "mo_hours": 8.0,
            "di_hours": 7.5,
            "mi_hours": 0.0,
            "do_hours": 0.0,
            "fr_hours": 0.0
         })
      );
   }

   #[tokio::test]
   async fn test_氏名なしの登録は400になる() {
      let app = TestApp::new();
      let cookie = app.admin_cookie();

      let response = app
         .send(with_cookie(
            json_request(Method::POST, "/admin/employees", json!({ "mo_hours": 8 })),
            &cookie,
         ))
         .await;

      assert_eq!(response.status, StatusCode::BAD_REQUEST);
      assert!(response.body.contains("Name ist erforderlich."));
      assert!(app.employees.employees().is_empty());
   }

   #[tokio::test]
   async fn test_公開の一覧はidと氏名のみを返す() {
      let app = TestApp::new();
      let cookie = app.admin_cookie();
      for name in ["Ben", "Anna"] {
         app.send(with_cookie(
            json_request(Method::POST, "/admin/employees", json!({ "name": name })),
            &cookie,
         ))
         .await;
      }

      let response = app.send(empty_request(Method::GET, "/employees")).await;

      assert_eq!(response.status, StatusCode::OK);
      let json: Value = serde_json::from_str(&response.body).unwrap();
      assert_eq!(
         json,
         json!([{ "id": 2, "name": "Anna" }, { "id": 1, "name": "Ben" }])
      );
   }

   #[tokio::test]
   async fn test_管理者一覧は管理者セッションが必要() {
      let app = TestApp::new();

      let response = app
         .send(empty_request(Method::GET, "/admin/employees"))
         .await;

      assert_eq!(response.status, StatusCode::FORBIDDEN);
   }

   #[tokio::test]
   async fn test_更新と削除() {
      let app = TestApp::new();
      let cookie = app.admin_cookie();
      app.send(with_cookie(
         json_request(Method::POST, "/admin/employees", json!({ "name": "Anna", "fr_hours": 6 })),
         &cookie,
      ))
      .await;

      let updated = app
         .send(with_cookie(
            json_request(Method::PUT, "/admin/employees/1", json!({ "name": "Anna", "mo_hours": 4 })),
            &cookie,
         ))
         .await;
      assert_eq!(updated.status, StatusCode::OK);
      assert_eq!(updated.body, UPDATED_MESSAGE);
      assert_eq!(
         app.employees.employees()[0].schedule().as_array(),
         [4.0, 0.0, 0.0, 0.0, 0.0]
      );

      let deleted = app
         .send(with_cookie(empty_request(Method::DELETE, "/admin/employees/1"), &cookie))
         .await;
      assert_eq!(deleted.status, StatusCode::OK);
      assert_eq!(deleted.body, DELETED_MESSAGE);

      let missing = app
         .send(with_cookie(empty_request(Method::DELETE, "/admin/employees/1"), &cookie))
         .await;
      assert_eq!(missing.status, StatusCode::NOT_FOUND);
   }
}
