//! EmployeeRepository 統合テスト
//!
//! 実行方法:
//! ```bash
//! docker compose up -d postgres
//! cargo test -p worklog-infra --test employee_repository_test
//! ```

mod common;

use common::insert_raw_employee;
use pretty_assertions::assert_eq;
use sqlx::PgPool;
use worklog_domain::{
    employee::{EmployeeId, EmployeeProfile},
    person::PersonName,
    schedule::WeeklySchedule,
};
use worklog_infra::repository::{EmployeeRepository, PostgresEmployeeRepository};

fn profile(name: &str, hours: [f64; 5]) -> EmployeeProfile {
    EmployeeProfile {
        name:     PersonName::new(name).unwrap(),
        schedule: WeeklySchedule::new(hours),
    }
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_insertは採番済みの従業員を返す(pool: PgPool) {
    let sut = PostgresEmployeeRepository::new(pool);

    let anna = sut.insert(&profile("Anna", [8.0, 8.0, 8.0, 8.0, 6.0])).await.unwrap();
    let ben = sut.insert(&profile("Ben", [0.0; 5])).await.unwrap();

    assert!(ben.id().as_i32() > anna.id().as_i32());
    let all = sut.find_all().await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id(), anna.id());
    assert_eq!(all[0].schedule().as_array(), [8.0, 8.0, 8.0, 8.0, 6.0]);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_null列と旧データの氏名はそのまま読み込める(pool: PgPool) {
    insert_raw_employee(&pool, "").await;
    insert_raw_employee(&pool, &"y".repeat(300)).await;
    let sut = PostgresEmployeeRepository::new(pool);

    let all = sut.find_all().await.unwrap();
    let names = sut.find_all_names().await.unwrap();

    assert_eq!(all.len(), 2);
    assert_eq!(all[0].name().as_str(), "");
    assert_eq!(all[0].schedule().as_array(), [0.0; 5]);
    assert_eq!(names.len(), 2);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_find_all_namesは氏名順で返す(pool: PgPool) {
    let sut = PostgresEmployeeRepository::new(pool);
    sut.insert(&profile("Ben", [0.0; 5])).await.unwrap();
    sut.insert(&profile("Anna", [0.0; 5])).await.unwrap();

    let names = sut.find_all_names().await.unwrap();

    let names: Vec<&str> = names.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Anna", "Ben"]);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_updateとdeleteは対象の有無をboolで返す(pool: PgPool) {
    let sut = PostgresEmployeeRepository::new(pool);
    let anna = sut.insert(&profile("Anna", [8.0; 5])).await.unwrap();
    let missing = EmployeeId::from_i32(anna.id().as_i32() + 100);

    assert!(sut.update(anna.id(), &profile("Anna", [4.0; 5])).await.unwrap());
    assert!(!sut.update(missing, &profile("Anna", [4.0; 5])).await.unwrap());
    assert_eq!(
        sut.find_all().await.unwrap()[0].schedule().as_array(),
        [4.0; 5]
    );

    assert!(sut.delete(anna.id()).await.unwrap());
    assert!(!sut.delete(anna.id()).await.unwrap());
    assert!(sut.find_all().await.unwrap().is_empty());
}
