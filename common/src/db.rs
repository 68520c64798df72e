use crate::entities::prelude::*;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr, Schema};

pub async fn establish_connection(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(database_url).await?;

    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    // Create tables if not exist. Referenced tables first so the foreign
    // keys on employees and employee_skill resolve.
    let stmt = builder.build(schema.create_table_from_entity(Departments).if_not_exists());
    match db.execute_raw(stmt).await {
        Ok(_) => tracing::info!("Ensured table departments exists"),
        Err(e) => tracing::warn!("Failed to create table departments: {}", e),
    }

    let stmt = builder.build(schema.create_table_from_entity(Skills).if_not_exists());
    match db.execute_raw(stmt).await {
        Ok(_) => tracing::info!("Ensured table skills exists"),
        Err(e) => tracing::warn!("Failed to create table skills: {}", e),
    }

    let stmt = builder.build(schema.create_table_from_entity(Employees).if_not_exists());
    match db.execute_raw(stmt).await {
        Ok(_) => tracing::info!("Ensured table employees exists"),
        Err(e) => tracing::warn!("Failed to create table employees: {}", e),
    }

    let stmt = builder.build(
        schema
            .create_table_from_entity(EmployeeSkill)
            .if_not_exists(),
    );
    match db.execute_raw(stmt).await {
        Ok(_) => tracing::info!("Ensured table employee_skill exists"),
        Err(e) => tracing::warn!("Failed to create table employee_skill: {}", e),
    }

    Ok(db)
}

#[cfg(test)]
mod tests {
    use super::establish_connection;

    #[tokio::test]
    async fn establish_connection_accepts_sqlite_memory_url() {
        let conn = establish_connection("sqlite::memory:").await;
        assert!(conn.is_ok());
    }

    #[tokio::test]
    async fn establish_connection_rejects_invalid_url() {
        let conn = establish_connection("not-a-valid-db-url").await;
        assert!(conn.is_err());
    }
}
