use super::GuardedDelete;
use crate::entities::{departments, employees, prelude::*};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, FromQueryResult,
    JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
    TransactionTrait,
};
use std::sync::Arc;

/// Department row annotated with the number of employees referencing it.
#[derive(Debug, Clone, PartialEq, FromQueryResult)]
pub struct DepartmentWithCount {
    pub id: i32,
    pub name: String,
    pub employee_count: i64,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

#[async_trait::async_trait]
pub trait DepartmentRepository: Send + Sync {
    async fn list_with_employee_count(&self) -> Result<Vec<DepartmentWithCount>, DbErr>;

    async fn find_all(&self) -> Result<Vec<departments::Model>, DbErr>;

    async fn find_by_id(&self, id: i32) -> Result<Option<departments::Model>, DbErr>;

    /// One department plus its full employee collection, fetched in a single
    /// joined query rather than one query per employee.
    async fn find_with_employees(
        &self,
        id: i32,
    ) -> Result<Option<(departments::Model, Vec<employees::Model>)>, DbErr>;

    async fn find_by_name(
        &self,
        name: &str,
        exclude_id: Option<i32>,
    ) -> Result<Option<departments::Model>, DbErr>;

    async fn employee_count(&self, id: i32) -> Result<u64, DbErr>;

    async fn insert(&self, name: &str) -> Result<departments::Model, DbErr>;

    async fn update_name(
        &self,
        department: departments::Model,
        name: &str,
    ) -> Result<departments::Model, DbErr>;

    async fn delete_if_unreferenced(&self, id: i32) -> Result<GuardedDelete, DbErr>;
}

pub struct DepartmentRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl DepartmentRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl DepartmentRepository for DepartmentRepositoryImpl {
    async fn list_with_employee_count(&self) -> Result<Vec<DepartmentWithCount>, DbErr> {
        Departments::find()
            .select_only()
            .columns([
                departments::Column::Id,
                departments::Column::Name,
                departments::Column::CreatedAt,
                departments::Column::UpdatedAt,
            ])
            .column_as(employees::Column::Id.count(), "employee_count")
            .join(JoinType::LeftJoin, departments::Relation::Employees.def())
            .group_by(departments::Column::Id)
            .order_by_asc(departments::Column::Id)
            .into_model::<DepartmentWithCount>()
            .all(self.db.as_ref())
            .await
    }

    async fn find_all(&self) -> Result<Vec<departments::Model>, DbErr> {
        Departments::find()
            .order_by_asc(departments::Column::Id)
            .all(self.db.as_ref())
            .await
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<departments::Model>, DbErr> {
        Departments::find_by_id(id).one(self.db.as_ref()).await
    }

    async fn find_with_employees(
        &self,
        id: i32,
    ) -> Result<Option<(departments::Model, Vec<employees::Model>)>, DbErr> {
        let mut rows = Departments::find_by_id(id)
            .find_with_related(Employees)
            .all(self.db.as_ref())
            .await?;
        Ok(rows.pop())
    }

    async fn find_by_name(
        &self,
        name: &str,
        exclude_id: Option<i32>,
    ) -> Result<Option<departments::Model>, DbErr> {
        let mut query = Departments::find().filter(departments::Column::Name.eq(name));
        if let Some(exclude_id) = exclude_id {
            query = query.filter(departments::Column::Id.ne(exclude_id));
        }
        query.one(self.db.as_ref()).await
    }

    async fn employee_count(&self, id: i32) -> Result<u64, DbErr> {
        Employees::find()
            .filter(employees::Column::DepartmentId.eq(id))
            .count(self.db.as_ref())
            .await
    }

    async fn insert(&self, name: &str) -> Result<departments::Model, DbErr> {
        let now = chrono::Utc::now().naive_utc();
        departments::ActiveModel {
            name: Set(name.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(self.db.as_ref())
        .await
    }

    async fn update_name(
        &self,
        department: departments::Model,
        name: &str,
    ) -> Result<departments::Model, DbErr> {
        let mut active: departments::ActiveModel = department.into();
        active.name = Set(name.to_string());
        active.updated_at = Set(chrono::Utc::now().naive_utc());
        active.update(self.db.as_ref()).await
    }

    async fn delete_if_unreferenced(&self, id: i32) -> Result<GuardedDelete, DbErr> {
        let txn = self.db.begin().await?;

        if Departments::find_by_id(id).one(&txn).await?.is_none() {
            txn.rollback().await?;
            return Ok(GuardedDelete::NotFound);
        }

        let referenced = Employees::find()
            .filter(employees::Column::DepartmentId.eq(id))
            .count(&txn)
            .await?
            > 0;
        if referenced {
            txn.rollback().await?;
            return Ok(GuardedDelete::StillReferenced);
        }

        Departments::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;
        Ok(GuardedDelete::Deleted)
    }
}
