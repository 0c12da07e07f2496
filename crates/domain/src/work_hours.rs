//! # 勤務時間エントリ
//!
//! 1 人 1 日分の勤務記録。氏名（大文字小文字を区別しない）と日付の組は
//! アプリケーション側の事前チェックでのみ一意に保たれる（DB 制約はない）。
//!
//! `hours`（正味労働時間）と `break_hours`（休憩時間）は常に
//! [`WorkSpan`] から導出する。

use chrono::NaiveDate;

use crate::{
    person::PersonName,
    time::{ClockTime, WorkSpan},
};

define_serial_id! {
    /// 勤務時間エントリ ID
    pub struct WorkHoursEntryId;
}

/// 勤務時間エントリ（保存済み）
///
/// 旧データでは時刻列が NULL の行があり得るため、時刻は `Option` で保持する。
#[derive(Debug, Clone, PartialEq)]
pub struct WorkHoursEntry {
    id:          WorkHoursEntryId,
    name:        PersonName,
    date:        NaiveDate,
    start_time:  Option<ClockTime>,
    end_time:    Option<ClockTime>,
    break_hours: f64,
    hours:       f64,
    comment:     Option<String>,
}

/// DB 行からの復元パラメータ
pub struct WorkHoursEntryRecord {
    pub id:          WorkHoursEntryId,
    pub name:        PersonName,
    pub date:        NaiveDate,
    pub start_time:  Option<ClockTime>,
    pub end_time:    Option<ClockTime>,
    pub break_hours: f64,
    pub hours:       f64,
    pub comment:     Option<String>,
}

impl WorkHoursEntry {
    /// DB から読み込んだ値で復元する
    pub fn from_db(record: WorkHoursEntryRecord) -> Self {
        Self {
            id:          record.id,
            name:        record.name,
            date:        record.date,
            start_time:  record.start_time,
            end_time:    record.end_time,
            break_hours: record.break_hours,
            hours:       record.hours,
            comment:     record.comment,
        }
    }

    pub fn id(&self) -> WorkHoursEntryId {
        self.id
    }

    pub fn name(&self) -> &PersonName {
        &self.name
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn start_time(&self) -> Option<ClockTime> {
        self.start_time
    }

    pub fn end_time(&self) -> Option<ClockTime> {
        self.end_time
    }

    /// 休憩時間（時間単位）
    pub fn break_hours(&self) -> f64 {
        self.break_hours
    }

    /// 正味労働時間（Ist）
    pub fn hours(&self) -> f64 {
        self.hours
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }
}

/// 勤務時間の作成・全上書き更新の入力
///
/// 検証済みの [`WorkSpan`] を持つため、`start < end` が保証される。
#[derive(Debug, Clone, PartialEq)]
pub struct WorkHoursDraft {
    pub name:    PersonName,
    pub date:    NaiveDate,
    pub span:    WorkSpan,
    pub comment: Option<String>,
}

impl WorkHoursDraft {
    /// 正味労働時間（保存される `hours`）
    pub fn hours(&self) -> f64 {
        self.span.net_hours()
    }

    /// 休憩時間（保存される `break_time`）
    pub fn break_hours(&self) -> f64 {
        self.span.break_hours()
    }

    /// 採番済み ID と組み合わせてエンティティにする
    pub fn into_entry(self, id: WorkHoursEntryId) -> WorkHoursEntry {
        WorkHoursEntry {
            id,
            break_hours: self.span.break_hours(),
            hours: self.span.net_hours(),
            start_time: Some(self.span.start()),
            end_time: Some(self.span.end()),
            name: self.name,
            date: self.date,
            comment: self.comment,
        }
    }
}
