//! # 勤務表レポート
//!
//! 勤務時間エントリを名簿と突き合わせ、所定（Soll）・実績（Ist）・差分を求める。
//!
//! ## 設計方針
//!
//! - 突き合わせは正規化済み氏名（[`NormalizedName`]）で行う
//! - 同じ正規化氏名の従業員が複数いる場合は、最初に現れた従業員を採用する
//! - 名簿に無い氏名のエントリは所定 0 時間として扱う

use std::collections::HashMap;

use crate::{
    employee::Employee,
    person::NormalizedName,
    schedule::WeeklySchedule,
    work_hours::WorkHoursEntry,
};

/// 正規化氏名 → 週の所定労働時間
#[derive(Debug, Clone, Default)]
pub struct RosterIndex {
    schedules: HashMap<NormalizedName, WeeklySchedule>,
}

impl RosterIndex {
    /// 名簿から索引を作る（ID 順の入力を前提に、先勝ち）
    pub fn from_employees(employees: &[Employee]) -> Self {
        let mut schedules = HashMap::with_capacity(employees.len());
        for employee in employees {
            schedules
                .entry(employee.name().normalized())
                .or_insert(*employee.schedule());
        }
        Self { schedules }
    }

    pub fn schedule_for(&self, name: &NormalizedName) -> Option<&WeeklySchedule> {
        self.schedules.get(name)
    }
}

/// 勤務表の 1 行
#[derive(Debug, Clone, PartialEq)]
pub struct TimesheetRow {
    entry:    WorkHoursEntry,
    schedule: Option<WeeklySchedule>,
}

impl TimesheetRow {
    pub fn new(entry: WorkHoursEntry, schedule: Option<WeeklySchedule>) -> Self {
        Self { entry, schedule }
    }

    pub fn entry(&self) -> &WorkHoursEntry {
        &self.entry
    }

    /// 所定労働時間（Soll）。名簿に無い場合や土日は 0
    pub fn expected_hours(&self) -> f64 {
        self.schedule
            .map(|s| s.expected_hours_for(self.entry.date()))
            .unwrap_or(0.0)
    }

    /// 実績労働時間（Ist）
    pub fn actual_hours(&self) -> f64 {
        self.entry.hours()
    }

    /// 差分 = Ist - Soll
    pub fn variance(&self) -> f64 {
        self.actual_hours() - self.expected_hours()
    }

    /// 休憩時間（分、四捨五入）
    pub fn break_minutes(&self) -> i64 {
        (self.entry.break_hours() * 60.0).round() as i64
    }
}

/// エントリを入力順のまま名簿と突き合わせる
pub fn build_timesheet(entries: Vec<WorkHoursEntry>, employees: &[Employee]) -> Vec<TimesheetRow> {
    let roster = RosterIndex::from_employees(employees);
    entries
        .into_iter()
        .map(|entry| {
            let schedule = roster.schedule_for(&entry.name().normalized()).copied();
            TimesheetRow::new(entry, schedule)
        })
        .collect()
}
