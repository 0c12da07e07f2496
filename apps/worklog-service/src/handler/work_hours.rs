//! # 勤務時間ハンドラ
//!
//! ## エンドポイント
//!
//! 公開:
//! - `POST /log-hours` - 勤務時間を記録
//! - `GET /get-all-hours?name=` - 本人のエントリ一覧
//! - `GET /get-hours?name=&date=` - 氏名と日付で 1 件取得
//! - `DELETE /delete-hours` - 全エントリ削除（パスワード + 確認フラグ）
//!
//! 管理者:
//! - `GET /admin-work-hours` - 全エントリ一覧
//! - `GET /admin-download-csv` - 勤務表 CSV
//! - `PUT /api/admin/update-hours` - エントリの全上書き
//! - `DELETE /api/admin/delete-hours/{id}` - エントリ削除

use std::sync::Arc;

use axum::{
   Extension,
   Json,
   extract::{Path, Query, State, rejection::JsonRejection},
   http::header,
   response::IntoResponse,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use worklog_domain::work_hours::{WorkHoursEntry, WorkHoursEntryId};

use super::request::{FormValue, break_minutes};
use crate::{
   error::WorklogError,
   middleware::AdminSession,
   usecase::{ExportUseCaseImpl, WorkHoursInput, WorkHoursUseCaseImpl},
};

pub const SAVED_MESSAGE: &str = "Daten erfolgreich gespeichert.";
pub const PURGED_MESSAGE: &str = "Daten erfolgreich gelöscht.";
pub const UPDATED_MESSAGE: &str = "Working hours updated successfully.";
pub const DELETED_MESSAGE: &str = "Working hours deleted successfully.";

const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";
const CSV_CONTENT_DISPOSITION: &str = "attachment; filename=\"arbeitszeiten.csv\"";

/// 勤務時間 API の共有状態
pub struct WorkHoursState {
   pub usecase: WorkHoursUseCaseImpl,
   pub export:  ExportUseCaseImpl,
}

// --- リクエスト/レスポンス型 ---

/// 勤務時間の記録リクエスト
///
/// `breakTime` は分。数値でも文字列でもよく、解釈できなければ 0。
/// `comment` は文字列以外なら文字列化して保存する。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogHoursRequest {
   pub name:       Option<String>,
   pub date:       Option<String>,
   pub start_time: Option<String>,
   pub end_time:   Option<String>,
   pub comment:    Option<FormValue>,
   pub break_time: Option<FormValue>,
}

impl From<LogHoursRequest> for WorkHoursInput {
   fn from(req: LogHoursRequest) -> Self {
      Self {
         break_minutes: break_minutes(req.break_time.as_ref()),
         name:          req.name,
         date:          req.date,
         start_time:    req.start_time,
         end_time:      req.end_time,
         comment:       req.comment.map(FormValue::into_text),
      }
   }
}

/// 管理者によるエントリ更新リクエスト
#[derive(Debug, Deserialize)]
pub struct UpdateHoursRequest {
   pub id:   Option<FormValue>,
   #[serde(flatten)]
   pub body: LogHoursRequest,
}

/// 全エントリ削除リクエスト
///
/// 本文がない・JSON でない場合は空のリクエストとして扱い、401 になる。
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAllHoursRequest {
   pub password:       Option<FormValue>,
   pub confirm_delete: Option<serde_json::Value>,
}

impl DeleteAllHoursRequest {
   /// `true` または `"true"` のときだけ確認済みとみなす
   fn is_confirmed(&self) -> bool {
      match &self.confirm_delete {
         Some(serde_json::Value::Bool(b)) => *b,
         Some(serde_json::Value::String(s)) => s == "true",
         _ => false,
      }
   }
}

/// 氏名クエリ
#[derive(Debug, Deserialize)]
pub struct NameQuery {
   pub name: Option<String>,
}

/// 氏名 + 日付クエリ
#[derive(Debug, Deserialize)]
pub struct NameDateQuery {
   pub name: Option<String>,
   pub date: Option<String>,
}

/// 勤務時間エントリ DTO
#[derive(Debug, Serialize)]
pub struct WorkHoursEntryDto {
   pub id:         i32,
   pub name:       String,
   pub date:       NaiveDate,
   pub hours:      f64,
   pub break_time: f64,
   pub comment:    Option<String>,
   #[serde(rename = "startTime")]
   pub start_time: Option<String>,
   #[serde(rename = "endTime")]
   pub end_time:   Option<String>,
}

impl From<WorkHoursEntry> for WorkHoursEntryDto {
   fn from(entry: WorkHoursEntry) -> Self {
      Self {
         id:         entry.id().as_i32(),
         name:       entry.name().as_str().to_string(),
         date:       entry.date(),
         hours:      entry.hours(),
         break_time: entry.break_hours(),
         comment:    entry.comment().map(str::to_string),
         start_time: entry.start_time().map(|t| t.to_string()),
         end_time:   entry.end_time().map(|t| t.to_string()),
      }
   }
}

fn to_dtos(entries: Vec<WorkHoursEntry>) -> Vec<WorkHoursEntryDto> {
   entries.into_iter().map(WorkHoursEntryDto::from).collect()
}

// --- 公開ハンドラ ---

/// POST /log-hours
pub async fn log_hours(
   State(state): State<Arc<WorkHoursState>>,
   Json(req): Json<LogHoursRequest>,
) -> Result<impl IntoResponse, WorklogError> {
   state.usecase.log_hours(req.into()).await?;
   Ok(SAVED_MESSAGE)
}

/// GET /get-all-hours?name=
pub async fn get_all_hours(
   State(state): State<Arc<WorkHoursState>>,
   Query(query): Query<NameQuery>,
) -> Result<impl IntoResponse, WorklogError> {
   let entries = state.usecase.list_for_person(query.name).await?;
   Ok(Json(to_dtos(entries)))
}

/// GET /get-hours?name=&date=
pub async fn get_hours(
   State(state): State<Arc<WorkHoursState>>,
   Query(query): Query<NameDateQuery>,
) -> Result<impl IntoResponse, WorklogError> {
   let entry = state.usecase.find_one(query.name, query.date).await?;
   Ok(Json(WorkHoursEntryDto::from(entry)))
}

/// DELETE /delete-hours
pub async fn delete_all_hours(
   State(state): State<Arc<WorkHoursState>>,
   body: Result<Json<DeleteAllHoursRequest>, JsonRejection>,
) -> Result<impl IntoResponse, WorklogError> {
   let req = body.map(|Json(req)| req).unwrap_or_default();
   let password = req.password.as_ref().and_then(FormValue::as_text);
   state.usecase.purge_all(password, req.is_confirmed()).await?;
   Ok(PURGED_MESSAGE)
}

// --- 管理者ハンドラ ---

/// GET /admin-work-hours
pub async fn list_all_hours(
   State(state): State<Arc<WorkHoursState>>,
   Extension(_admin): Extension<AdminSession>,
) -> Result<impl IntoResponse, WorklogError> {
   let entries = state.usecase.list_all().await?;
   Ok(Json(to_dtos(entries)))
}

/// GET /admin-download-csv
pub async fn download_csv(
   State(state): State<Arc<WorkHoursState>>,
   Extension(_admin): Extension<AdminSession>,
) -> Result<impl IntoResponse, WorklogError> {
   let csv = state.export.export_csv().await?;
   Ok((
      [
         (header::CONTENT_TYPE, CSV_CONTENT_TYPE),
         (header::CONTENT_DISPOSITION, CSV_CONTENT_DISPOSITION),
      ],
      csv,
   ))
}

/// PUT /api/admin/update-hours
pub async fn admin_update_hours(
   State(state): State<Arc<WorkHoursState>>,
   Extension(_admin): Extension<AdminSession>,
   Json(req): Json<UpdateHoursRequest>,
) -> Result<impl IntoResponse, WorklogError> {
   let id = req
      .id
      .as_ref()
      .and_then(FormValue::as_id)
      .ok_or_else(|| WorklogError::BadRequest("ID ist erforderlich.".to_string()))?;

   state
      .usecase
      .update(WorkHoursEntryId::from_i32(id), req.body.into())
      .await?;
   Ok(UPDATED_MESSAGE)
}

/// DELETE /api/admin/delete-hours/{id}
pub async fn admin_delete_hours(
   State(state): State<Arc<WorkHoursState>>,
   Extension(_admin): Extension<AdminSession>,
   Path(id): Path<i32>,
) -> Result<impl IntoResponse, WorklogError> {
   state.usecase.delete(WorkHoursEntryId::from_i32(id)).await?;
   Ok(DELETED_MESSAGE)
}
