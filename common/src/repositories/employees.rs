use crate::entities::{departments, employee_skill, employees, prelude::*, skills};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    LoaderTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use std::collections::HashSet;
use std::sync::Arc;

/// An employee with both of its relations populated. No call site ever sees
/// a partially-loaded employee.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeWithRelations {
    pub employee: employees::Model,
    pub department: departments::Model,
    pub skills: Vec<skills::Model>,
}

/// Scalar fields common to insert and update.
pub struct EmployeeFields<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub department_id: i32,
}

#[async_trait::async_trait]
pub trait EmployeeRepository: Send + Sync {
    async fn list(
        &self,
        department_filter: Option<i32>,
    ) -> Result<Vec<EmployeeWithRelations>, DbErr>;

    async fn find_by_id(&self, id: i32) -> Result<Option<employees::Model>, DbErr>;

    async fn find_with_relations(&self, id: i32)
        -> Result<Option<EmployeeWithRelations>, DbErr>;

    async fn find_by_email(
        &self,
        email: &str,
        exclude_id: Option<i32>,
    ) -> Result<Option<employees::Model>, DbErr>;

    /// Inserts the employee row and its skill associations in one
    /// transaction.
    async fn insert(
        &self,
        fields: EmployeeFields<'_>,
        skill_ids: &[i32],
    ) -> Result<employees::Model, DbErr>;

    /// Updates the scalar fields and replaces the skill association set with
    /// exactly `skill_ids`, both in one transaction. Rows to add and remove
    /// are computed as a set difference; unchanged pairs are left alone.
    async fn update(
        &self,
        employee: employees::Model,
        fields: EmployeeFields<'_>,
        skill_ids: &[i32],
    ) -> Result<employees::Model, DbErr>;

    /// Removes the employee row and all of its skill associations. Returns
    /// the number of employee rows deleted.
    async fn delete(&self, id: i32) -> Result<u64, DbErr>;
}

pub struct EmployeeRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl EmployeeRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    async fn load_relations(
        &self,
        rows: Vec<employees::Model>,
    ) -> Result<Vec<EmployeeWithRelations>, DbErr> {
        let departments = rows.load_one(Departments, self.db.as_ref()).await?;
        let skills = rows
            .load_many_to_many(Skills, EmployeeSkill, self.db.as_ref())
            .await?;

        let mut result = Vec::with_capacity(rows.len());
        for ((employee, department), skills) in rows.into_iter().zip(departments).zip(skills) {
            let department = department.ok_or_else(|| {
                DbErr::RecordNotFound(format!(
                    "department {} referenced by employee {} not found",
                    employee.department_id, employee.id
                ))
            })?;
            result.push(EmployeeWithRelations {
                employee,
                department,
                skills,
            });
        }
        Ok(result)
    }
}

#[async_trait::async_trait]
impl EmployeeRepository for EmployeeRepositoryImpl {
    async fn list(
        &self,
        department_filter: Option<i32>,
    ) -> Result<Vec<EmployeeWithRelations>, DbErr> {
        let mut query = Employees::find();
        if let Some(department_id) = department_filter {
            query = query.filter(employees::Column::DepartmentId.eq(department_id));
        }
        let rows = query
            .order_by_asc(employees::Column::Id)
            .all(self.db.as_ref())
            .await?;
        self.load_relations(rows).await
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<employees::Model>, DbErr> {
        Employees::find_by_id(id).one(self.db.as_ref()).await
    }

    async fn find_with_relations(
        &self,
        id: i32,
    ) -> Result<Option<EmployeeWithRelations>, DbErr> {
        let Some(employee) = Employees::find_by_id(id).one(self.db.as_ref()).await? else {
            return Ok(None);
        };
        let mut loaded = self.load_relations(vec![employee]).await?;
        Ok(loaded.pop())
    }

    async fn find_by_email(
        &self,
        email: &str,
        exclude_id: Option<i32>,
    ) -> Result<Option<employees::Model>, DbErr> {
        let mut query = Employees::find().filter(employees::Column::Email.eq(email));
        if let Some(exclude_id) = exclude_id {
            query = query.filter(employees::Column::Id.ne(exclude_id));
        }
        query.one(self.db.as_ref()).await
    }

    async fn insert(
        &self,
        fields: EmployeeFields<'_>,
        skill_ids: &[i32],
    ) -> Result<employees::Model, DbErr> {
        let txn = self.db.begin().await?;
        let now = chrono::Utc::now().naive_utc();

        let employee = employees::ActiveModel {
            first_name: Set(fields.first_name.to_string()),
            last_name: Set(fields.last_name.to_string()),
            email: Set(fields.email.to_string()),
            department_id: Set(fields.department_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        attach_skills(&txn, employee.id, skill_ids).await?;

        txn.commit().await?;
        Ok(employee)
    }

    async fn update(
        &self,
        employee: employees::Model,
        fields: EmployeeFields<'_>,
        skill_ids: &[i32],
    ) -> Result<employees::Model, DbErr> {
        let txn = self.db.begin().await?;
        let employee_id = employee.id;

        let mut active: employees::ActiveModel = employee.into();
        active.first_name = Set(fields.first_name.to_string());
        active.last_name = Set(fields.last_name.to_string());
        active.email = Set(fields.email.to_string());
        active.department_id = Set(fields.department_id);
        active.updated_at = Set(chrono::Utc::now().naive_utc());
        let employee = active.update(&txn).await?;

        let current: HashSet<i32> = EmployeeSkill::find()
            .filter(employee_skill::Column::EmployeeId.eq(employee_id))
            .all(&txn)
            .await?
            .into_iter()
            .map(|row| row.skill_id)
            .collect();
        let target: HashSet<i32> = skill_ids.iter().copied().collect();

        let removed: Vec<i32> = current.difference(&target).copied().collect();
        if !removed.is_empty() {
            EmployeeSkill::delete_many()
                .filter(employee_skill::Column::EmployeeId.eq(employee_id))
                .filter(employee_skill::Column::SkillId.is_in(removed))
                .exec(&txn)
                .await?;
        }

        let added: Vec<i32> = target.difference(&current).copied().collect();
        attach_skills(&txn, employee_id, &added).await?;

        txn.commit().await?;
        Ok(employee)
    }

    async fn delete(&self, id: i32) -> Result<u64, DbErr> {
        let txn = self.db.begin().await?;

        EmployeeSkill::delete_many()
            .filter(employee_skill::Column::EmployeeId.eq(id))
            .exec(&txn)
            .await?;
        let result = Employees::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        Ok(result.rows_affected)
    }
}

async fn attach_skills<C: ConnectionTrait>(
    conn: &C,
    employee_id: i32,
    skill_ids: &[i32],
) -> Result<(), DbErr> {
    if skill_ids.is_empty() {
        return Ok(());
    }
    EmployeeSkill::insert_many(skill_ids.iter().map(|&skill_id| employee_skill::ActiveModel {
        employee_id: Set(employee_id),
        skill_id: Set(skill_id),
    }))
    .exec(conn)
    .await?;
    Ok(())
}
