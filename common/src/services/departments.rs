use super::{
    is_unique_violation, validate_required_text, EmployeeRef, FieldError, ServiceError,
    ValidationReason,
};
use crate::entities::departments;
use crate::repositories::departments::{DepartmentRepository, DepartmentWithCount};
use crate::repositories::GuardedDelete;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct DepartmentSummary {
    pub id: i32,
    pub name: String,
    pub employee_count: i64,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

impl From<DepartmentWithCount> for DepartmentSummary {
    fn from(row: DepartmentWithCount) -> Self {
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
pub struct DepartmentDetail {
    pub id: i32,
    pub name: String,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
    pub employees: Vec<EmployeeRef>,
}

#[async_trait]
pub trait DepartmentService: Send + Sync {
    /// Departments in insertion order, each with its employee count.
    async fn list_with_employee_count(&self) -> Result<Vec<DepartmentSummary>, ServiceError>;

    /// Plain list for the employee form collaborator bundle.
    async fn list_all(&self) -> Result<Vec<departments::Model>, ServiceError>;

    async fn get_with_employees(&self, id: i32) -> Result<DepartmentDetail, ServiceError>;

    async fn create(&self, name: &str) -> Result<departments::Model, ServiceError>;

    async fn update(&self, id: i32, name: &str) -> Result<departments::Model, ServiceError>;

    /// True iff no employee references the department.
    async fn can_delete(&self, id: i32) -> Result<bool, ServiceError>;

    /// Refuses with `Conflict` while employees reference the department.
    async fn delete(&self, id: i32) -> Result<(), ServiceError>;
}

pub struct DepartmentServiceImpl {
    department_repo: Arc<dyn DepartmentRepository>,
}

impl DepartmentServiceImpl {
    pub fn new(department_repo: Arc<dyn DepartmentRepository>) -> Self {
        Self { department_repo }
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
                .department_repo
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
impl DepartmentService for DepartmentServiceImpl {
    async fn list_with_employee_count(&self) -> Result<Vec<DepartmentSummary>, ServiceError> {
        let rows = self.department_repo.list_with_employee_count().await?;
        Ok(rows.into_iter().map(DepartmentSummary::from).collect())
    }

    async fn list_all(&self) -> Result<Vec<departments::Model>, ServiceError> {
        Ok(self.department_repo.find_all().await?)
    }

    async fn get_with_employees(&self, id: i32) -> Result<DepartmentDetail, ServiceError> {
        let (department, employees) = self
            .department_repo
            .find_with_employees(id)
            .await?
            .ok_or(ServiceError::NotFound)?;

        Ok(DepartmentDetail {
            id: department.id,
            name: department.name,
            created_at: department.created_at,
            updated_at: department.updated_at,
            employees: employees.into_iter().map(EmployeeRef::from).collect(),
        })
    }

    async fn create(&self, name: &str) -> Result<departments::Model, ServiceError> {
        self.validate_name(name, None).await?;

        match self.department_repo.insert(name).await {
            Ok(department) => {
                tracing::info!(department_id = department.id, "created department");
                Ok(department)
            }
            Err(err) if is_unique_violation(&err) => Err(ServiceError::Validation(vec![
                FieldError::new("name", ValidationReason::NotUnique),
            ])),
            Err(err) => Err(err.into()),
        }
    }

    async fn update(&self, id: i32, name: &str) -> Result<departments::Model, ServiceError> {
        let department = self
            .department_repo
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound)?;

        self.validate_name(name, Some(id)).await?;

        match self.department_repo.update_name(department, name).await {
            Ok(department) => Ok(department),
            Err(err) if is_unique_violation(&err) => Err(ServiceError::Validation(vec![
                FieldError::new("name", ValidationReason::NotUnique),
            ])),
            Err(err) => Err(err.into()),
        }
    }

    async fn can_delete(&self, id: i32) -> Result<bool, ServiceError> {
        if self.department_repo.find_by_id(id).await?.is_none() {
            return Err(ServiceError::NotFound);
        }
        Ok(self.department_repo.employee_count(id).await? == 0)
    }

    async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        match self.department_repo.delete_if_unreferenced(id).await? {
            GuardedDelete::Deleted => {
                tracing::info!(department_id = id, "deleted department");
                Ok(())
            }
            GuardedDelete::NotFound => Err(ServiceError::NotFound),
            GuardedDelete::StillReferenced => {
                tracing::debug!(department_id = id, "refused delete, employees exist");
                Err(ServiceError::Conflict)
            }
        }
    }
}
