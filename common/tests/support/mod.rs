use common::services::employees::EmployeeInput;
use common::{build_all, Repositories, Services};
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

pub async fn setup() -> (Arc<DatabaseConnection>, Repositories, Services) {
    let db = sea_orm::Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let db = Arc::new(db);
    let (repos, services) = build_all(db.clone());
    (db, repos, services)
}

pub fn employee_input(
    first_name: &str,
    last_name: &str,
    email: &str,
    department_id: i32,
    skill_ids: &[i32],
) -> EmployeeInput {
    EmployeeInput {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email: email.to_string(),
        department_id,
        skill_ids: skill_ids.to_vec(),
    }
}
