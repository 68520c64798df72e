use super::GuardedDelete;
use crate::entities::{employee_skill, employees, prelude::*, skills};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, FromQueryResult,
    JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
    TransactionTrait,
};
use std::sync::Arc;

/// Skill row annotated with the number of employees holding it.
#[derive(Debug, Clone, PartialEq, FromQueryResult)]
pub struct SkillWithCount {
    pub id: i32,
    pub name: String,
    pub employee_count: i64,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

#[async_trait::async_trait]
pub trait SkillRepository: Send + Sync {
    async fn list_with_employee_count(&self) -> Result<Vec<SkillWithCount>, DbErr>;

    async fn find_all(&self) -> Result<Vec<skills::Model>, DbErr>;

    async fn find_by_id(&self, id: i32) -> Result<Option<skills::Model>, DbErr>;

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<skills::Model>, DbErr>;

    /// One skill plus every employee holding it, through the join table in a
    /// single query.
    async fn find_with_employees(
        &self,
        id: i32,
    ) -> Result<Option<(skills::Model, Vec<employees::Model>)>, DbErr>;

    async fn find_by_name(
        &self,
        name: &str,
        exclude_id: Option<i32>,
    ) -> Result<Option<skills::Model>, DbErr>;

    async fn employee_count(&self, id: i32) -> Result<u64, DbErr>;

    async fn insert(&self, name: &str) -> Result<skills::Model, DbErr>;

    async fn update_name(&self, skill: skills::Model, name: &str)
        -> Result<skills::Model, DbErr>;

    async fn delete_if_unreferenced(&self, id: i32) -> Result<GuardedDelete, DbErr>;
}

pub struct SkillRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl SkillRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl SkillRepository for SkillRepositoryImpl {
    async fn list_with_employee_count(&self) -> Result<Vec<SkillWithCount>, DbErr> {
        Skills::find()
            .select_only()
            .columns([
                skills::Column::Id,
                skills::Column::Name,
                skills::Column::CreatedAt,
                skills::Column::UpdatedAt,
            ])
            .column_as(employee_skill::Column::EmployeeId.count(), "employee_count")
            .join(JoinType::LeftJoin, skills::Relation::EmployeeSkill.def())
            .group_by(skills::Column::Id)
            .order_by_asc(skills::Column::Id)
            .into_model::<SkillWithCount>()
            .all(self.db.as_ref())
            .await
    }

    async fn find_all(&self) -> Result<Vec<skills::Model>, DbErr> {
        Skills::find()
            .order_by_asc(skills::Column::Id)
            .all(self.db.as_ref())
            .await
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<skills::Model>, DbErr> {
        Skills::find_by_id(id).one(self.db.as_ref()).await
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<skills::Model>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Skills::find()
            .filter(skills::Column::Id.is_in(ids.iter().copied()))
            .all(self.db.as_ref())
            .await
    }

    async fn find_with_employees(
        &self,
        id: i32,
    ) -> Result<Option<(skills::Model, Vec<employees::Model>)>, DbErr> {
        let mut rows = Skills::find_by_id(id)
            .find_with_related(Employees)
            .all(self.db.as_ref())
            .await?;
        Ok(rows.pop())
    }

    async fn find_by_name(
        &self,
        name: &str,
        exclude_id: Option<i32>,
    ) -> Result<Option<skills::Model>, DbErr> {
        let mut query = Skills::find().filter(skills::Column::Name.eq(name));
        if let Some(exclude_id) = exclude_id {
            query = query.filter(skills::Column::Id.ne(exclude_id));
        }
        query.one(self.db.as_ref()).await
    }

    async fn employee_count(&self, id: i32) -> Result<u64, DbErr> {
        EmployeeSkill::find()
            .filter(employee_skill::Column::SkillId.eq(id))
            .count(self.db.as_ref())
            .await
    }

    async fn insert(&self, name: &str) -> Result<skills::Model, DbErr> {
        let now = chrono::Utc::now().naive_utc();
        skills::ActiveModel {
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
        skill: skills::Model,
        name: &str,
    ) -> Result<skills::Model, DbErr> {
        let mut active: skills::ActiveModel = skill.into();
        active.name = Set(name.to_string());
        active.updated_at = Set(chrono::Utc::now().naive_utc());
        active.update(self.db.as_ref()).await
    }

    async fn delete_if_unreferenced(&self, id: i32) -> Result<GuardedDelete, DbErr> {
        let txn = self.db.begin().await?;

        if Skills::find_by_id(id).one(&txn).await?.is_none() {
            txn.rollback().await?;
            return Ok(GuardedDelete::NotFound);
        }

        let referenced = EmployeeSkill::find()
            .filter(employee_skill::Column::SkillId.eq(id))
            .count(&txn)
            .await?
            > 0;
        if referenced {
            txn.rollback().await?;
            return Ok(GuardedDelete::StillReferenced);
        }

        Skills::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;
        Ok(GuardedDelete::Deleted)
    }
}
