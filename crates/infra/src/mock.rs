//! # テスト用モック
//!
//! ユースケース・ハンドラのテストで使用するインメモリ実装。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! worklog-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::{
   collections::HashMap,
   sync::{Arc, Mutex},
};

use async_trait::async_trait;
use chrono::NaiveDate;
use worklog_domain::{
   employee::{Employee, EmployeeId, EmployeeProfile, EmployeeSummary},
   person::PersonName,
   work_hours::{WorkHoursDraft, WorkHoursEntry, WorkHoursEntryId},
};

use crate::{
   error::InfraError,
   repository::{EmployeeRepository, WorkHoursRepository},
   session::{SessionData, SessionManager},
};

// ===== MockWorkHoursRepository =====

#[derive(Clone, Default)]
pub struct MockWorkHoursRepository {
   entries: Arc<Mutex<Vec<WorkHoursEntry>>>,
   next_id: Arc<Mutex<i32>>,
}

impl MockWorkHoursRepository {
   pub fn new() -> Self {
      Self::default()
   }

   /// 保存済みエントリのスナップショット（挿入順）
   pub fn entries(&self) -> Vec<WorkHoursEntry> {
      self.entries.lock().unwrap().clone()
   }

   fn allocate_id(&self) -> WorkHoursEntryId {
      let mut next = self.next_id.lock().unwrap();
      *next += 1;
      WorkHoursEntryId::from_i32(*next)
   }

   fn sorted(mut entries: Vec<WorkHoursEntry>) -> Vec<WorkHoursEntry> {
      entries.sort_by_key(|e| (e.date(), e.id().as_i32()));
      entries
   }
}

#[async_trait]
impl WorkHoursRepository for MockWorkHoursRepository {
   async fn insert(&self, draft: &WorkHoursDraft) -> Result<WorkHoursEntryId, InfraError> {
      let id = self.allocate_id();
      self.entries.lock().unwrap().push(draft.clone().into_entry(id));
      Ok(id)
   }

   async fn update(&self, id: WorkHoursEntryId, draft: &WorkHoursDraft) -> Result<bool, InfraError> {
      let mut entries = self.entries.lock().unwrap();
      match entries.iter_mut().find(|e| e.id() == id) {
         Some(entry) => {
            *entry = draft.clone().into_entry(id);
            Ok(true)
         }
         None => Ok(false),
      }
   }

   async fn delete(&self, id: WorkHoursEntryId) -> Result<bool, InfraError> {
      let mut entries = self.entries.lock().unwrap();
      let before = entries.len();
      entries.retain(|e| e.id() != id);
      Ok(entries.len() != before)
   }

   async fn delete_all(&self) -> Result<u64, InfraError> {
      let mut entries = self.entries.lock().unwrap();
      let count = entries.len() as u64;
      entries.clear();
      Ok(count)
   }

   async fn find_all(&self) -> Result<Vec<WorkHoursEntry>, InfraError> {
      Ok(Self::sorted(self.entries()))
   }

   async fn find_by_name(&self, name: &PersonName) -> Result<Vec<WorkHoursEntry>, InfraError> {
      let matching = self
         .entries()
         .into_iter()
         .filter(|e| e.name().matches(name))
         .collect();
      Ok(Self::sorted(matching))
   }

   async fn find_by_name_and_date(
      &self,
      name: &PersonName,
      date: NaiveDate,
   ) -> Result<Option<WorkHoursEntry>, InfraError> {
      Ok(self
         .entries()
         .into_iter()
         .filter(|e| e.date() == date && e.name().matches(name))
         .min_by_key(|e| e.id().as_i32()))
   }
}

// ===== MockEmployeeRepository =====

#[derive(Clone, Default)]
pub struct MockEmployeeRepository {
   employees: Arc<Mutex<Vec<Employee>>>,
   next_id: Arc<Mutex<i32>>,
}

impl MockEmployeeRepository {
   pub fn new() -> Self {
      Self::default()
   }

   pub fn employees(&self) -> Vec<Employee> {
      self.employees.lock().unwrap().clone()
   }
}

#[async_trait]
impl EmployeeRepository for MockEmployeeRepository {
   async fn find_all(&self) -> Result<Vec<Employee>, InfraError> {
      let mut employees = self.employees();
      employees.sort_by_key(|e| e.id().as_i32());
      Ok(employees)
   }

   async fn find_all_names(&self) -> Result<Vec<EmployeeSummary>, InfraError> {
      let mut summaries: Vec<EmployeeSummary> = self
         .employees()
         .into_iter()
         .map(|e| EmployeeSummary {
            id:   e.id(),
            name: e.name().clone(),
         })
         .collect();
      summaries.sort_by(|a, b| {
         a.name
            .as_str()
            .cmp(b.name.as_str())
            .then(a.id.as_i32().cmp(&b.id.as_i32()))
      });
      Ok(summaries)
   }

   async fn insert(&self, profile: &EmployeeProfile) -> Result<Employee, InfraError> {
      let id = {
         let mut next = self.next_id.lock().unwrap();
         *next += 1;
         EmployeeId::from_i32(*next)
      };
      let employee = profile.clone().into_employee(id);
      self.employees.lock().unwrap().push(employee.clone());
      Ok(employee)
   }

   async fn update(&self, id: EmployeeId, profile: &EmployeeProfile) -> Result<bool, InfraError> {
      let mut employees = self.employees.lock().unwrap();
      match employees.iter_mut().find(|e| e.id() == id) {
         Some(employee) => {
            *employee = profile.clone().into_employee(id);
            Ok(true)
         }
         None => Ok(false),
      }
   }

   async fn delete(&self, id: EmployeeId) -> Result<bool, InfraError> {
      let mut employees = self.employees.lock().unwrap();
      let before = employees.len();
      employees.retain(|e| e.id() != id);
      Ok(employees.len() != before)
   }
}

// ===== MockSessionManager =====

#[derive(Clone, Default)]
pub struct MockSessionManager {
   sessions: Arc<Mutex<HashMap<String, SessionData>>>,
   next_id: Arc<Mutex<u32>>,
}

impl MockSessionManager {
   pub fn new() -> Self {
      Self::default()
   }

   /// 任意の ID でセッションを登録する
   pub fn insert(&self, session_id: &str, data: SessionData) {
      self.sessions
         .lock()
         .unwrap()
         .insert(session_id.to_string(), data);
   }
}

#[async_trait]
impl SessionManager for MockSessionManager {
   async fn create(&self, data: &SessionData) -> Result<String, InfraError> {
      let session_id = {
         let mut next = self.next_id.lock().unwrap();
         *next += 1;
         format!("mock-session-{next}")
      };
      self.insert(&session_id, data.clone());
      Ok(session_id)
   }

   async fn get(&self, session_id: &str) -> Result<Option<SessionData>, InfraError> {
      Ok(self.sessions.lock().unwrap().get(session_id).cloned())
   }
}

// ===== FailingSessionManager =====

/// 常にエラーを返すセッションマネージャ（ストア障害時の挙動確認用）
#[derive(Clone, Default)]
pub struct FailingSessionManager;

fn unavailable() -> InfraError {
   redis::RedisError::from(std::io::Error::new(
      std::io::ErrorKind::ConnectionRefused,
      "session store unavailable",
   ))
   .into()
}

#[async_trait]
impl SessionManager for FailingSessionManager {
   async fn create(&self, _data: &SessionData) -> Result<String, InfraError> {
      Err(unavailable())
   }

   async fn get(&self, _session_id: &str) -> Result<Option<SessionData>, InfraError> {
      Err(unavailable())
   }
}
