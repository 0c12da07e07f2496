//! テスト共通フィクスチャ
//!
//! 各テストファイルは独立したクレートとしてコンパイルされるため、
//! 使わない関数の dead_code 警告はモジュール全体で抑制する。

#![allow(dead_code)]

use chrono::NaiveDate;
use sqlx::PgPool;
use worklog_domain::{
    person::PersonName,
    time::{ClockTime, WorkSpan},
    work_hours::WorkHoursDraft,
};

/// `YYYY-MM-DD` の日付
pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// 検証済みの勤務時間入力を作る
pub fn draft(name: &str, day: &str, start: &str, end: &str, break_minutes: i64) -> WorkHoursDraft {
    WorkHoursDraft {
        name:    PersonName::new(name).unwrap(),
        date:    date(day),
        span:    WorkSpan::new(
            ClockTime::parse(start).unwrap(),
            ClockTime::parse(end).unwrap(),
            break_minutes,
        )
        .unwrap(),
        comment: None,
    }
}

/// 入力検証を経ずに行を挿入する（旧データの再現用）
///
/// 時刻・時間の列は NULL のまま。
pub async fn insert_raw_work_hours(pool: &PgPool, name: &str, day: &str) -> i32 {
    sqlx::query_scalar("INSERT INTO work_hours (name, date) VALUES ($1, $2) RETURNING id")
        .bind(name)
        .bind(date(day))
        .fetch_one(pool)
        .await
        .expect("work_hours の挿入に失敗")
}

/// 入力検証を経ずに従業員行を挿入する
pub async fn insert_raw_employee(pool: &PgPool, name: &str) -> i32 {
    sqlx::query_scalar("INSERT INTO employees (name) VALUES ($1) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await
        .expect("employees の挿入に失敗")
}
