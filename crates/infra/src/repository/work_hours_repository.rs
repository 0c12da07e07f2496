//! # WorkHoursRepository
//!
//! 勤務時間エントリ（`work_hours` テーブル）の永続化を担当する。
//!
//! ## 設計方針
//!
//! - **一覧は日付昇順**: 同日内は ID 昇順で安定させる
//! - **更新・削除の結果**: 対象行が無かったことを `false` で返し、
//!   404 への変換はユースケース層が行う
//! - **重複チェックは行わない**: 氏名 + 日付の一意性はユースケース層の事前確認のみ

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use sqlx::PgPool;
use worklog_domain::{
    person::PersonName,
    time::ClockTime,
    work_hours::{WorkHoursDraft, WorkHoursEntry, WorkHoursEntryId, WorkHoursEntryRecord},
};

use crate::error::{InfraError, Table};

/// 勤務時間リポジトリトレイト
#[async_trait]
pub trait WorkHoursRepository: Send + Sync {
    /// エントリを挿入し、採番された ID を返す
    async fn insert(&self, draft: &WorkHoursDraft) -> Result<WorkHoursEntryId, InfraError>;

    /// エントリを全上書きで更新する
    ///
    /// 対象が存在しなければ `Ok(false)` を返す。
    async fn update(&self, id: WorkHoursEntryId, draft: &WorkHoursDraft) -> Result<bool, InfraError>;

    /// エントリを 1 件削除する
    ///
    /// 対象が存在しなければ `Ok(false)` を返す。
    async fn delete(&self, id: WorkHoursEntryId) -> Result<bool, InfraError>;

    /// 全エントリを削除し、削除件数を返す
    async fn delete_all(&self) -> Result<u64, InfraError>;

    /// 全エントリを日付昇順で取得する
    async fn find_all(&self) -> Result<Vec<WorkHoursEntry>, InfraError>;

    /// 氏名（大文字小文字を区別しない）でエントリを日付昇順に取得する
    async fn find_by_name(&self, name: &PersonName) -> Result<Vec<WorkHoursEntry>, InfraError>;

    /// 氏名（大文字小文字を区別しない）と日付でエントリを 1 件取得する
    ///
    /// 複数ある場合は ID が最小のものを返す。
    async fn find_by_name_and_date(
        &self,
        name: &PersonName,
        date: NaiveDate,
    ) -> Result<Option<WorkHoursEntry>, InfraError>;
}

/// DB の work_hours テーブルの行を表す中間構造体
#[derive(sqlx::FromRow)]
struct WorkHoursRow {
    id:         i32,
    name:       String,
    date:       NaiveDate,
    hours:      Option<f64>,
    break_time: Option<f64>,
    comment:    Option<String>,
    starttime:  Option<NaiveTime>,
    endtime:    Option<NaiveTime>,
}

impl From<WorkHoursRow> for WorkHoursEntry {
    fn from(row: WorkHoursRow) -> Self {
        WorkHoursEntry::from_db(WorkHoursEntryRecord {
            id:          WorkHoursEntryId::from_i32(row.id),
            name:        PersonName::from_db(row.name),
            date:        row.date,
            start_time:  row.starttime.map(ClockTime::from_naive_time),
            end_time:    row.endtime.map(ClockTime::from_naive_time),
            break_hours: row.break_time.unwrap_or(0.0),
            hours:       row.hours.unwrap_or(0.0),
            comment:     row.comment,
        })
    }
}

fn into_entries(rows: Vec<WorkHoursRow>) -> Vec<WorkHoursEntry> {
    rows.into_iter().map(WorkHoursEntry::from).collect()
}

/// PostgreSQL 実装の WorkHoursRepository
#[derive(Debug, Clone)]
pub struct PostgresWorkHoursRepository {
    pool: PgPool,
}

impl PostgresWorkHoursRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WorkHoursRepository for PostgresWorkHoursRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn insert(&self, draft: &WorkHoursDraft) -> Result<WorkHoursEntryId, InfraError> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO work_hours (name, date, hours, break_time, comment, starttime, endtime)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(draft.name.as_str())
        .bind(draft.date)
        .bind(draft.hours())
        .bind(draft.break_hours())
        .bind(draft.comment.as_deref())
        .bind(draft.span.start().to_naive_time())
        .bind(draft.span.end().to_naive_time())
        .fetch_one(&self.pool)
        .await
        .map_err(InfraError::query(Table::WorkHours))?;

        Ok(WorkHoursEntryId::from_i32(id))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn update(&self, id: WorkHoursEntryId, draft: &WorkHoursDraft) -> Result<bool, InfraError> {
        let result = sqlx::query(
            r#"
            UPDATE work_hours
            SET name = $1, date = $2, hours = $3, break_time = $4,
                comment = $5, starttime = $6, endtime = $7
            WHERE id = $8
            "#,
        )
        .bind(draft.name.as_str())
        .bind(draft.date)
        .bind(draft.hours())
        .bind(draft.break_hours())
        .bind(draft.comment.as_deref())
        .bind(draft.span.start().to_naive_time())
        .bind(draft.span.end().to_naive_time())
        .bind(id.as_i32())
        .execute(&self.pool)
        .await
        .map_err(InfraError::query(Table::WorkHours))?;

        Ok(result.rows_affected() > 0)
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn delete(&self, id: WorkHoursEntryId) -> Result<bool, InfraError> {
        let result = sqlx::query("DELETE FROM work_hours WHERE id = $1")
            .bind(id.as_i32())
            .execute(&self.pool)
            .await
        .map_err(InfraError::query(Table::WorkHours))?;

        Ok(result.rows_affected() > 0)
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn delete_all(&self) -> Result<u64, InfraError> {
        let result = sqlx::query("DELETE FROM work_hours")
            .execute(&self.pool)
            .await
        .map_err(InfraError::query(Table::WorkHours))?;

        Ok(result.rows_affected())
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_all(&self) -> Result<Vec<WorkHoursEntry>, InfraError> {
        let rows: Vec<WorkHoursRow> = sqlx::query_as(
            r#"
            SELECT id, name, date, hours, break_time, comment, starttime, endtime
            FROM work_hours
            ORDER BY date ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(InfraError::query(Table::WorkHours))?;

        Ok(into_entries(rows))
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_by_name(&self, name: &PersonName) -> Result<Vec<WorkHoursEntry>, InfraError> {
        let rows: Vec<WorkHoursRow> = sqlx::query_as(
            r#"
            SELECT id, name, date, hours, break_time, comment, starttime, endtime
            FROM work_hours
            WHERE LOWER(name) = LOWER($1)
            ORDER BY date ASC, id ASC
            "#,
        )
        .bind(name.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(InfraError::query(Table::WorkHours))?;

        Ok(into_entries(rows))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%date))]
    async fn find_by_name_and_date(
        &self,
        name: &PersonName,
        date: NaiveDate,
    ) -> Result<Option<WorkHoursEntry>, InfraError> {
        let row: Option<WorkHoursRow> = sqlx::query_as(
            r#"
            SELECT id, name, date, hours, break_time, comment, starttime, endtime
            FROM work_hours
            WHERE LOWER(name) = LOWER($1) AND date = $2
            ORDER BY id ASC
            LIMIT 1
            "#,
        )
        .bind(name.as_str())
        .bind(date)
        .fetch_optional(&self.pool)
        .await
        .map_err(InfraError::query(Table::WorkHours))?;

        Ok(row.map(WorkHoursEntry::from))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn row(name: &str) -> WorkHoursRow {
        WorkHoursRow {
            id:         5,
            name:       name.to_string(),
            date:       NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
            hours:      Some(8.5),
            break_time: Some(0.5),
            comment:    None,
            starttime:  NaiveTime::from_hms_opt(8, 0, 0),
            endtime:    NaiveTime::from_hms_opt(17, 0, 0),
        }
    }

    #[test]
    fn test_行からエントリに変換できる() {
        let entry = WorkHoursEntry::from(row("Anna"));

        assert_eq!(entry.id(), WorkHoursEntryId::from_i32(5));
        assert_eq!(entry.hours(), 8.5);
        assert_eq!(entry.break_hours(), 0.5);
        assert_eq!(entry.start_time().map(|t| t.to_string()), Some("08:00".to_string()));
    }

    #[test]
    fn test_null列は0と未設定になる() {
        let mut r = row("Anna");
        r.hours = None;
        r.break_time = None;
        r.starttime = None;

        let entry = WorkHoursEntry::from(r);

        assert_eq!(entry.hours(), 0.0);
        assert_eq!(entry.break_hours(), 0.0);
        assert_eq!(entry.start_time(), None);
    }

    #[test]
    fn test_空の氏名の行もそのまま読み込める() {
        let entries = into_entries(vec![row(""), row("Anna")]);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name().as_str(), "");
    }

    #[test]
    fn test_最大長を超える氏名の行もそのまま読み込める() {
        let long = "x".repeat(300);

        let entry = WorkHoursEntry::from(row(&long));

        assert_eq!(entry.name().as_str().chars().count(), 300);
    }
}
