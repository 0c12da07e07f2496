//! 勤務時間ユースケース
//!
//! 入力の検証と導出値（正味時間・休憩時間）の計算はドメイン層に任せ、
//! ここでは必須チェック・重複確認・存在確認を行う。
//!
//! ## 既知の競合
//!
//! 作成時の重複確認（氏名 + 日付）と挿入はトランザクションで括らない。
//! 同時に 2 件の作成が来た場合、両方が確認を通過し得る。

use std::sync::Arc;

use chrono::NaiveDate;
use worklog_domain::{
    DomainError,
    person::PersonName,
    time::{ClockTime, WorkSpan},
    work_hours::{WorkHoursDraft, WorkHoursEntry, WorkHoursEntryId},
};
use worklog_infra::repository::WorkHoursRepository;
use worklog_shared::{event_log::event, log_business_event};

use super::auth::AdminPassword;
use crate::error::WorklogError;

pub const DUPLICATE_ENTRY_MESSAGE: &str = "Eintrag für diesen Tag existiert bereits.";
pub const NO_DATA_MESSAGE: &str = "Keine Daten gefunden.";
pub const PURGE_REFUSED_MESSAGE: &str =
    "Löschen abgebrochen. Passwort erforderlich oder Bestätigung fehlt.";

/// 勤務時間の作成・更新の入力（未検証）
#[derive(Debug, Clone, Default)]
pub struct WorkHoursInput {
    pub name:          Option<String>,
    pub date:          Option<String>,
    pub start_time:    Option<String>,
    pub end_time:      Option<String>,
    pub break_minutes: i64,
    pub comment:       Option<String>,
}

impl WorkHoursInput {
    /// 検証済みの下書きに変換する
    fn into_draft(self) -> Result<WorkHoursDraft, DomainError> {
        let name = PersonName::new(self.name.unwrap_or_default())?;
        let date = parse_date(self.date.as_deref())?;
        let (Some(start), Some(end)) = (self.start_time, self.end_time) else {
            return Err(DomainError::Validation(
                "Arbeitsbeginn und Arbeitsende sind erforderlich.".to_string(),
            ));
        };
        let span = WorkSpan::new(ClockTime::parse(&start)?, ClockTime::parse(&end)?, self.break_minutes)?;

        Ok(WorkHoursDraft {
            name,
            date,
            span,
            comment: self.comment,
        })
    }
}

/// `YYYY-MM-DD` 形式の日付を解釈する
pub fn parse_date(raw: Option<&str>) -> Result<NaiveDate, DomainError> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| DomainError::Validation("Datum ist erforderlich.".to_string()))?;
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| DomainError::Validation(format!("Ungültiges Datum: {raw:?} (erwartet JJJJ-MM-TT).")))
}

/// 勤務時間ユースケース
pub struct WorkHoursUseCaseImpl {
    repository:     Arc<dyn WorkHoursRepository>,
    admin_password: AdminPassword,
}

impl WorkHoursUseCaseImpl {
    pub fn new(repository: Arc<dyn WorkHoursRepository>, admin_password: AdminPassword) -> Self {
        Self {
            repository,
            admin_password,
        }
    }

    /// 勤務時間を記録する（公開）
    ///
    /// 同じ氏名（大文字小文字を区別しない）と日付のエントリが既にあれば拒否する。
    #[tracing::instrument(skip_all)]
    pub async fn log_hours(&self, input: WorkHoursInput) -> Result<WorkHoursEntryId, WorklogError> {
        let draft = input.into_draft()?;

        if self
            .repository
            .find_by_name_and_date(&draft.name, draft.date)
            .await?
            .is_some()
        {
            return Err(WorklogError::BadRequest(DUPLICATE_ENTRY_MESSAGE.to_string()));
        }

        let id = self.repository.insert(&draft).await?;

        log_business_event!(
            event.category = event::category::WORK_HOURS,
            event.action = event::action::WORK_HOURS_LOGGED,
            event.entity_type = event::entity_type::WORK_HOURS_ENTRY,
            event.entity_id = %id,
            event.result = event::result::SUCCESS,
            "勤務時間を記録"
        );

        Ok(id)
    }

    /// 本人のエントリを日付昇順で取得する（公開）
    #[tracing::instrument(skip_all)]
    pub async fn list_for_person(&self, name: Option<String>) -> Result<Vec<WorkHoursEntry>, WorklogError> {
        let name = PersonName::new(name.unwrap_or_default())?;
        Ok(self.repository.find_by_name(&name).await?)
    }

    /// 氏名と日付でエントリを 1 件取得する（公開）
    #[tracing::instrument(skip_all)]
    pub async fn find_one(
        &self,
        name: Option<String>,
        date: Option<String>,
    ) -> Result<WorkHoursEntry, WorklogError> {
        let name = PersonName::new(name.unwrap_or_default())?;
        let date = parse_date(date.as_deref())?;

        self.repository
            .find_by_name_and_date(&name, date)
            .await?
            .ok_or_else(|| WorklogError::NotFound(NO_DATA_MESSAGE.to_string()))
    }

    /// 全エントリを削除する（公開、パスワードと確認フラグが必須）
    ///
    /// どちらかが欠けていれば 1 行も削除しない。
    #[tracing::instrument(skip_all)]
    pub async fn purge_all(&self, password: Option<&str>, confirmed: bool) -> Result<u64, WorklogError> {
        let password_ok = password.is_some_and(|p| self.admin_password.verify(p));
        if !(password_ok && confirmed) {
            let reason = if password_ok { "not_confirmed" } else { "password_mismatch" };
            log_business_event!(
                event.category = event::category::WORK_HOURS,
                event.action = event::action::WORK_HOURS_PURGED,
                event.entity_type = event::entity_type::WORK_HOURS_ENTRY,
                event.result = event::result::FAILURE,
                event.reason = reason,
                "全勤務時間の削除を拒否"
            );
            return Err(WorklogError::Unauthorized(PURGE_REFUSED_MESSAGE.to_string()));
        }

        let deleted = self.repository.delete_all().await?;

        log_business_event!(
            event.category = event::category::WORK_HOURS,
            event.action = event::action::WORK_HOURS_PURGED,
            event.entity_type = event::entity_type::WORK_HOURS_ENTRY,
            event.result = event::result::SUCCESS,
            deleted_count = deleted,
            "全勤務時間を削除"
        );

        Ok(deleted)
    }

    /// 全エントリを日付昇順で取得する（管理者）
    #[tracing::instrument(skip_all)]
    pub async fn list_all(&self) -> Result<Vec<WorkHoursEntry>, WorklogError> {
        Ok(self.repository.find_all().await?)
    }

    /// エントリを全上書きで更新する（管理者、重複確認なし）
    #[tracing::instrument(skip_all, fields(%id))]
    pub async fn update(&self, id: WorkHoursEntryId, input: WorkHoursInput) -> Result<(), WorklogError> {
        let draft = input.into_draft()?;

        if !self.repository.update(id, &draft).await? {
            return Err(not_found(id).into());
        }

        log_business_event!(
            event.category = event::category::WORK_HOURS,
            event.action = event::action::WORK_HOURS_UPDATED,
            event.entity_type = event::entity_type::WORK_HOURS_ENTRY,
            event.entity_id = %id,
            event.result = event::result::SUCCESS,
            "勤務時間を更新"
        );

        Ok(())
    }

    /// エントリを 1 件削除する（管理者）
    #[tracing::instrument(skip_all, fields(%id))]
    pub async fn delete(&self, id: WorkHoursEntryId) -> Result<(), WorklogError> {
        if !self.repository.delete(id).await? {
            return Err(not_found(id).into());
        }

        log_business_event!(
            event.category = event::category::WORK_HOURS,
            event.action = event::action::WORK_HOURS_DELETED,
            event.entity_type = event::entity_type::WORK_HOURS_ENTRY,
            event.entity_id = %id,
            event.result = event::result::SUCCESS,
            "勤務時間を削除"
        );

        Ok(())
    }
}

fn not_found(id: WorkHoursEntryId) -> DomainError {
    DomainError::NotFound {
        entity_type: "Eintrag",
        id:          id.to_string(),
    }
}
