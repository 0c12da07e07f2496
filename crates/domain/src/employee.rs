//! # 従業員（名簿）
//!
//! 従業員ごとの週の所定労働時間を保持する。
//! 勤務時間エントリとは氏名の値で結び付くだけで、参照整合性はない。
//! 従業員の削除・改名はエントリに波及しない。

use crate::{person::PersonName, schedule::WeeklySchedule};

define_serial_id! {
    /// 従業員 ID
    pub struct EmployeeId;
}

/// 従業員エンティティ
#[derive(Debug, Clone, PartialEq)]
pub struct Employee {
    id:       EmployeeId,
    name:     PersonName,
    schedule: WeeklySchedule,
}

impl Employee {
    /// DB から読み込んだ値で復元する
    pub fn from_db(id: EmployeeId, name: PersonName, schedule: WeeklySchedule) -> Self {
        Self { id, name, schedule }
    }

    pub fn id(&self) -> EmployeeId {
        self.id
    }

    pub fn name(&self) -> &PersonName {
        &self.name
    }

    pub fn schedule(&self) -> &WeeklySchedule {
        &self.schedule
    }
}

/// 公開の氏名一覧に使う要約（ID と氏名のみ）
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeSummary {
    pub id:   EmployeeId,
    pub name: PersonName,
}

/// 従業員の作成・全上書き更新の入力
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeProfile {
    pub name:     PersonName,
    pub schedule: WeeklySchedule,
}

impl EmployeeProfile {
    /// 採番済み ID と組み合わせてエンティティにする
    pub fn into_employee(self, id: EmployeeId) -> Employee {
        Employee::from_db(id, self.name, self.schedule)
    }
}
