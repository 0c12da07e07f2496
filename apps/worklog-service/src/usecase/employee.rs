//! 従業員名簿ユースケース

use std::sync::Arc;

use worklog_domain::{
   DomainError,
   employee::{Employee, EmployeeId, EmployeeProfile, EmployeeSummary},
   person::PersonName,
   schedule::WeeklySchedule,
};
use worklog_infra::repository::EmployeeRepository;
use worklog_shared::{event_log::event, log_business_event};

use crate::error::WorklogError;

/// 従業員の作成・更新の入力（未検証）
///
/// 曜日ごとの所定労働時間は月曜〜金曜の順。未指定は 0 とする。
#[derive(Debug, Clone, Default)]
pub struct EmployeeInput {
   pub name:  Option<String>,
   pub hours: [Option<f64>; 5],
}

impl EmployeeInput {
   fn into_profile(self) -> Result<EmployeeProfile, DomainError> {
      Ok(EmployeeProfile {
         name:     PersonName::new(self.name.unwrap_or_default())?,
         schedule: WeeklySchedule::from_optional(self.hours),
      })
   }
}

/// 従業員名簿ユースケース
pub struct EmployeeUseCaseImpl {
   repository: Arc<dyn EmployeeRepository>,
}

impl EmployeeUseCaseImpl {
   pub fn new(repository: Arc<dyn EmployeeRepository>) -> Self {
      Self { repository }
   }

   /// 全従業員（所定労働時間付き）を ID 順で取得する（管理者）
   #[tracing::instrument(skip_all)]
   pub async fn list_all(&self) -> Result<Vec<Employee>, WorklogError> {
      Ok(self.repository.find_all().await?)
   }

   /// 従業員の ID と氏名を氏名順で取得する（公開）
   #[tracing::instrument(skip_all)]
   pub async fn list_names(&self) -> Result<Vec<EmployeeSummary>, WorklogError> {
      Ok(self.repository.find_all_names().await?)
   }

   /// 従業員を登録する（管理者）
   #[tracing::instrument(skip_all)]
   pub async fn create(&self, input: EmployeeInput) -> Result<Employee, WorklogError> {
      let profile = input.into_profile()?;
      let employee = self.repository.insert(&profile).await?;

      log_business_event!(
         event.category = event::category::EMPLOYEE,
         event.action = event::action::EMPLOYEE_CREATED,
         event.entity_type = event::entity_type::EMPLOYEE,
         event.entity_id = %employee.id(),
         event.result = event::result::SUCCESS,
         "従業員を登録"
      );

      Ok(employee)
   }

   /// 従業員を全上書きで更新する（管理者）
   #[tracing::instrument(skip_all, fields(%id))]
   pub async fn update(&self, id: EmployeeId, input: EmployeeInput) -> Result<(), WorklogError> {
      let profile = input.into_profile()?;

      if !self.repository.update(id, &profile).await? {
         return Err(not_found(id).into());
      }

      log_business_event!(
         event.category = event::category::EMPLOYEE,
         event.action = event::action::EMPLOYEE_UPDATED,
         event.entity_type = event::entity_type::EMPLOYEE,
         event.entity_id = %id,
         event.result = event::result::SUCCESS,
         "従業員を更新"
      );

      Ok(())
   }

   /// 従業員を削除する（管理者）
   ///
   /// 同じ氏名の勤務時間エントリは残る。
   #[tracing::instrument(skip_all, fields(%id))]
   pub async fn delete(&self, id: EmployeeId) -> Result<(), WorklogError> {
      if !self.repository.delete(id).await? {
         return Err(not_found(id).into());
      }

      log_business_event!(
         event.category = event::category::EMPLOYEE,
         event.action = event::action::EMPLOYEE_DELETED,
         event.entity_type = event::entity_type::EMPLOYEE,
         event.entity_id = %id,
         event.result = event::result::SUCCESS,
         "従業員を削除"
      );

      Ok(())
   }
}

fn not_found(id: EmployeeId) -> DomainError {
   DomainError::NotFound {
      entity_type: "Mitarbeiter",
      id:          id.to_string(),
   }
}
