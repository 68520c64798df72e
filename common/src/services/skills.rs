use super::{
    is_unique_violation, validate_required_text, EmployeeRef, FieldError, ServiceError,
    ValidationReason,
};
use crate::entities::skills;
use crate::repositories::skills::{SkillRepository, SkillWithCount};
use crate::repositories::GuardedDelete;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct SkillSummary {
    pub id: i32,
    pub name: String,
    pub employee_count: i64,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

impl From<SkillWithCount> for SkillSummary {
    fn from(row: SkillWithCount) -> Self {
        Self {
            id: row.id,
            name: row.name,
            employee_count: row.employee_count,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SkillDetail {
    pub id: i32,
    pub name: String,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
    pub employees: Vec<EmployeeRef>,
}

/// Same contract as the department service, with "employees referencing this
/// skill" defined through the join table instead of a foreign key.
#[async_trait]
pub trait SkillService: Send + Sync {
    async fn list_with_employee_count(&self) -> Result<Vec<SkillSummary>, ServiceError>;

    async fn list_all(&self) -> Result<Vec<skills::Model>, ServiceError>;

    async fn get_with_employees(&self, id: i32) -> Result<SkillDetail, ServiceError>;

    async fn create(&self, name: &str) -> Result<skills::Model, ServiceError>;

    async fn update(&self, id: i32, name: &str) -> Result<skills::Model, ServiceError>;

    async fn can_delete(&self, id: i32) -> Result<bool, ServiceError>;

    async fn delete(&self, id: i32) -> Result<(), ServiceError>;
}

pub struct SkillServiceImpl {
    skill_repo: Arc<dyn SkillRepository>,
}

impl SkillServiceImpl {
    pub fn new(skill_repo: Arc<dyn SkillRepository>) -> Self {
        Self { skill_repo }
    }

    async fn validate_name(
        &self,
        name: &str,
        exclude_id: Option<i32>,
    ) -> Result<(), ServiceError> {
        let mut errors = Vec::new();
        validate_required_text("name", name, &mut errors);
        if errors.is_empty()
            && self
                .skill_repo
                .find_by_name(name, exclude_id)
                .await?
                .is_some()
        {
            errors.push(FieldError::new("name", ValidationReason::NotUnique));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ServiceError::Validation(errors))
        }
    }
}

#[async_trait]
impl SkillService for SkillServiceImpl {
    async fn list_with_employee_count(&self) -> Result<Vec<SkillSummary>, ServiceError> {
        let rows = self.skill_repo.list_with_employee_count().await?;
        Ok(rows.into_iter().map(SkillSummary::from).collect())
    }

    async fn list_all(&self) -> Result<Vec<skills::Model>, ServiceError> {
        Ok(self.skill_repo.find_all().await?)
    }

    async fn get_with_employees(&self, id: i32) -> Result<SkillDetail, ServiceError> {
        let (skill, employees) = self
            .skill_repo
            .find_with_employees(id)
            .await?
            .ok_or(ServiceError::NotFound)?;

        Ok(SkillDetail {
            id: skill.id,
            name: skill.name,
            created_at: skill.created_at,
            updated_at: skill.updated_at,
            employees: employees.into_iter().map(EmployeeRef::from).collect(),
        })
    }

    async fn create(&self, name: &str) -> Result<skills::Model, ServiceError> {
        self.validate_name(name, None).await?;

        match self.skill_repo.insert(name).await {
            Ok(skill) => {
                tracing::info!(skill_id = skill.id, "created skill");
                Ok(skill)
            }
            Err(err) if is_unique_violation(&err) => Err(ServiceError::Validation(vec![
                FieldError::new("name", ValidationReason::NotUnique),
            ])),
            Err(err) => Err(err.into()),
        }
    }

    async fn update(&self, id: i32, name: &str) -> Result<skills::Model, ServiceError> {
        let skill = self
            .skill_repo
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound)?;

        self.validate_name(name, Some(id)).await?;

        match self.skill_repo.update_name(skill, name).await {
            Ok(skill) => Ok(skill),
            Err(err) if is_unique_violation(&err) => Err(ServiceError::Validation(vec![
                FieldError::new("name", ValidationReason::NotUnique),
            ])),
            Err(err) => Err(err.into()),
        }
    }

    async fn can_delete(&self, id: i32) -> Result<bool, ServiceError> {
        if self.skill_repo.find_by_id(id).await?.is_none() {
            return Err(ServiceError::NotFound);
        }
        Ok(self.skill_repo.employee_count(id).await? == 0)
    }

    async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        match self.skill_repo.delete_if_unreferenced(id).await? {
            GuardedDelete::Deleted => {
                tracing::info!(skill_id = id, "deleted skill");
                Ok(())
            }
            GuardedDelete::NotFound => Err(ServiceError::NotFound),
            GuardedDelete::StillReferenced => {
                tracing::debug!(skill_id = id, "refused delete, employees hold this skill");
                Err(ServiceError::Conflict)
            }
        }
    }
}
