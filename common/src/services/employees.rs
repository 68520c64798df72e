use super::{
    is_unique_violation, validate_email_text, validate_required_text, FieldError, ServiceError,
    ValidationReason,
};
use crate::repositories::departments::DepartmentRepository;
use crate::repositories::employees::{EmployeeFields, EmployeeRepository, EmployeeWithRelations};
use crate::repositories::skills::SkillRepository;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct EmployeeInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department_id: i32,
    /// Target skill set. On update it replaces the stored set wholesale;
    /// empty means "no skills".
    pub skill_ids: Vec<i32>,
}

#[derive(Debug, Serialize)]
pub struct DepartmentRef {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct SkillRef {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct EmployeeDto {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub email: String,
    pub department: DepartmentRef,
    pub skills: Vec<SkillRef>,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

impl From<EmployeeWithRelations> for EmployeeDto {
    fn from(row: EmployeeWithRelations) -> Self {
        Self {
            id: row.employee.id,
            full_name: row.employee.full_name(),
            first_name: row.employee.first_name,
            last_name: row.employee.last_name,
            email: row.employee.email,
            department: DepartmentRef {
                id: row.department.id,
                name: row.department.name,
            },
            skills: row
                .skills
                .into_iter()
                .map(|skill| SkillRef {
                    id: skill.id,
                    name: skill.name,
                })
                .collect(),
            created_at: row.employee.created_at,
            updated_at: row.employee.updated_at,
        }
    }
}

#[async_trait]
pub trait EmployeeService: Send + Sync {
    /// Employees with department and skills loaded, optionally restricted to
    /// one department. Insertion order.
    async fn list(&self, department_id: Option<i32>) -> Result<Vec<EmployeeDto>, ServiceError>;

    async fn get(&self, id: i32) -> Result<EmployeeDto, ServiceError>;

    async fn create(&self, input: &EmployeeInput) -> Result<EmployeeDto, ServiceError>;

    async fn update(&self, id: i32, input: &EmployeeInput) -> Result<EmployeeDto, ServiceError>;

    /// Unguarded hard delete; skill associations go with the row.
    async fn delete(&self, id: i32) -> Result<(), ServiceError>;

    /// True iff an employee other than `exclude_id` already has this email.
    /// A missing or malformed email is a validation error, never a silent
    /// "available".
    async fn email_exists(
        &self,
        email: &str,
        exclude_id: Option<i32>,
    ) -> Result<bool, ServiceError>;
}

pub struct EmployeeServiceImpl {
    employee_repo: Arc<dyn EmployeeRepository>,
    department_repo: Arc<dyn DepartmentRepository>,
    skill_repo: Arc<dyn SkillRepository>,
}

impl EmployeeServiceImpl {
    pub fn new(
        employee_repo: Arc<dyn EmployeeRepository>,
        department_repo: Arc<dyn DepartmentRepository>,
        skill_repo: Arc<dyn SkillRepository>,
    ) -> Self {
        Self {
            employee_repo,
            department_repo,
            skill_repo,
        }
    }

    /// Collects errors across all fields instead of stopping at the first.
    /// Returns the deduplicated skill id set to attach; the list is rejected
    /// as a whole if any id is unknown.
    async fn validate(
        &self,
        input: &EmployeeInput,
        exclude_id: Option<i32>,
    ) -> Result<Vec<i32>, ServiceError> {
        let mut errors = Vec::new();

        validate_required_text("first_name", &input.first_name, &mut errors);
        validate_required_text("last_name", &input.last_name, &mut errors);
        validate_email_text("email", &input.email, &mut errors);
        if !errors.iter().any(|e| e.field == "email")
            && self
                .employee_repo
                .find_by_email(&input.email, exclude_id)
                .await?
                .is_some()
        {
            errors.push(FieldError::new("email", ValidationReason::NotUnique));
        }

        if self
            .department_repo
            .find_by_id(input.department_id)
            .await?
            .is_none()
        {
            errors.push(FieldError::new("department_id", ValidationReason::NotFound));
        }

        let mut skill_ids = input.skill_ids.clone();
        skill_ids.sort_unstable();
        skill_ids.dedup();
        if !skill_ids.is_empty() {
            let found = self.skill_repo.find_by_ids(&skill_ids).await?;
            if found.len() != skill_ids.len() {
                errors.push(FieldError::new("skills", ValidationReason::NotFound));
            }
        }

        if errors.is_empty() {
            Ok(skill_ids)
        } else {
            Err(ServiceError::Validation(errors))
        }
    }
}

#[async_trait]
impl EmployeeService for EmployeeServiceImpl {
    async fn list(&self, department_id: Option<i32>) -> Result<Vec<EmployeeDto>, ServiceError> {
        let rows = self.employee_repo.list(department_id).await?;
        Ok(rows.into_iter().map(EmployeeDto::from).collect())
    }

    async fn get(&self, id: i32) -> Result<EmployeeDto, ServiceError> {
        self.employee_repo
            .find_with_relations(id)
            .await?
            .map(EmployeeDto::from)
            .ok_or(ServiceError::NotFound)
    }

    async fn create(&self, input: &EmployeeInput) -> Result<EmployeeDto, ServiceError> {
        let skill_ids = self.validate(input, None).await?;

        let fields = EmployeeFields {
            first_name: &input.first_name,
            last_name: &input.last_name,
            email: &input.email,
            department_id: input.department_id,
        };
        let employee = match self.employee_repo.insert(fields, &skill_ids).await {
            Ok(employee) => employee,
            Err(err) if is_unique_violation(&err) => {
                return Err(ServiceError::Validation(vec![FieldError::new(
                    "email",
                    ValidationReason::NotUnique,
                )]))
            }
            Err(err) => return Err(err.into()),
        };

        tracing::info!(employee_id = employee.id, "created employee");
        self.get(employee.id).await
    }

    async fn update(&self, id: i32, input: &EmployeeInput) -> Result<EmployeeDto, ServiceError> {
        let employee = self
            .employee_repo
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound)?;

        let skill_ids = self.validate(input, Some(id)).await?;

        let fields = EmployeeFields {
            first_name: &input.first_name,
            last_name: &input.last_name,
            email: &input.email,
            department_id: input.department_id,
        };
        match self.employee_repo.update(employee, fields, &skill_ids).await {
            Ok(_) => {}
            Err(err) if is_unique_violation(&err) => {
                return Err(ServiceError::Validation(vec![FieldError::new(
                    "email",
                    ValidationReason::NotUnique,
                )]))
            }
            Err(err) => return Err(err.into()),
        }

        self.get(id).await
    }

    async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let deleted = self.employee_repo.delete(id).await?;
        if deleted == 0 {
            return Err(ServiceError::NotFound);
        }
        tracing::info!(employee_id = id, "deleted employee");
        Ok(())
    }

    async fn email_exists(
        &self,
        email: &str,
        exclude_id: Option<i32>,
    ) -> Result<bool, ServiceError> {
        let mut errors = Vec::new();
        validate_email_text("email", email, &mut errors);
        if !errors.is_empty() {
            return Err(ServiceError::Validation(errors));
        }

        Ok(self
            .employee_repo
            .find_by_email(email, exclude_id)
            .await?
            .is_some())
    }
}
