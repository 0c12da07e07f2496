//! # EmployeeRepository
//!
//! 従業員名簿（`employees` テーブル）の永続化を担当する。
//!
//! 勤務時間エントリとは外部キーで結ばれていないため、削除・改名は
//! `work_hours` に波及しない。

use async_trait::async_trait;
use sqlx::PgPool;
use worklog_domain::{
    employee::{Employee, EmployeeId, EmployeeProfile, EmployeeSummary},
    person::PersonName,
    schedule::WeeklySchedule,
};

use crate::error::{InfraError, Table};

/// 従業員リポジトリトレイト
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// 全従業員を ID 昇順で取得する
    async fn find_all(&self) -> Result<Vec<Employee>, InfraError>;

    /// 全従業員の ID と氏名を氏名順で取得する
    async fn find_all_names(&self) -> Result<Vec<EmployeeSummary>, InfraError>;

    /// 従業員を挿入し、保存されたエンティティを返す
    async fn insert(&self, profile: &EmployeeProfile) -> Result<Employee, InfraError>;

    /// 従業員を全上書きで更新する
    ///
    /// 対象が存在しなければ `Ok(false)` を返す。
    async fn update(&self, id: EmployeeId, profile: &EmployeeProfile) -> Result<bool, InfraError>;

    /// 従業員を削除する
    ///
    /// 対象が存在しなければ `Ok(false)` を返す。
    async fn delete(&self, id: EmployeeId) -> Result<bool, InfraError>;
}

/// DB の employees テーブルの行を表す中間構造体
#[derive(sqlx::FromRow)]
struct EmployeeRow {
    id:       i32,
    name:     String,
    mo_hours: Option<f64>,
    di_hours: Option<f64>,
    mi_hours: Option<f64>,
    do_hours: Option<f64>,
    fr_hours: Option<f64>,
}

impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        Employee::from_db(
            EmployeeId::from_i32(row.id),
            PersonName::from_db(row.name),
            WeeklySchedule::from_optional([
                row.mo_hours,
                row.di_hours,
                row.mi_hours,
                row.do_hours,
                row.fr_hours,
            ]),
        )
    }
}

#[derive(sqlx::FromRow)]
struct EmployeeNameRow {
    id:   i32,
    name: String,
}

impl From<EmployeeNameRow> for EmployeeSummary {
    fn from(row: EmployeeNameRow) -> Self {
        EmployeeSummary {
            id:   EmployeeId::from_i32(row.id),
            name: PersonName::from_db(row.name),
        }
    }
}

/// PostgreSQL 実装の EmployeeRepository
#[derive(Debug, Clone)]
pub struct PostgresEmployeeRepository {
    pool: PgPool,
}

impl PostgresEmployeeRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmployeeRepository for PostgresEmployeeRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_all(&self) -> Result<Vec<Employee>, InfraError> {
        let rows: Vec<EmployeeRow> = sqlx::query_as(
            r#"
            SELECT id, name, mo_hours, di_hours, mi_hours, do_hours, fr_hours
            FROM employees
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(InfraError::query(Table::Employees))?;

        Ok(rows.into_iter().map(Employee::from).collect())
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_all_names(&self) -> Result<Vec<EmployeeSummary>, InfraError> {
        let rows: Vec<EmployeeNameRow> =
            sqlx::query_as("SELECT id, name FROM employees ORDER BY name ASC, id ASC")
                .fetch_all(&self.pool)
                .await
                .map_err(InfraError::query(Table::Employees))?;

        Ok(rows.into_iter().map(EmployeeSummary::from).collect())
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn insert(&self, profile: &EmployeeProfile) -> Result<Employee, InfraError> {
        let [mo, di, mi, dn, fr] = profile.schedule.as_array();
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO employees (name, mo_hours, di_hours, mi_hours, do_hours, fr_hours)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(profile.name.as_str())
        .bind(mo)
        .bind(di)
        .bind(mi)
        .bind(dn)
        .bind(fr)
        .fetch_one(&self.pool)
        .await
        .map_err(InfraError::query(Table::Employees))?;

        Ok(profile.clone().into_employee(EmployeeId::from_i32(id)))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn update(&self, id: EmployeeId, profile: &EmployeeProfile) -> Result<bool, InfraError> {
        let [mo, di, mi, dn, fr] = profile.schedule.as_array();
        let result = sqlx::query(
            r#"
            UPDATE employees
            SET name = $1, mo_hours = $2, di_hours = $3, mi_hours = $4, do_hours = $5, fr_hours = $6
            WHERE id = $7
            "#,
        )
        .bind(profile.name.as_str())
        .bind(mo)
        .bind(di)
        .bind(mi)
        .bind(dn)
        .bind(fr)
        .bind(id.as_i32())
        .execute(&self.pool)
        .await
        .map_err(InfraError::query(Table::Employees))?;

        Ok(result.rows_affected() > 0)
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn delete(&self, id: EmployeeId) -> Result<bool, InfraError> {
        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id.as_i32())
            .execute(&self.pool)
            .await
        .map_err(InfraError::query(Table::Employees))?;

        Ok(result.rows_affected() > 0)
    }
}
