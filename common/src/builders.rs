use crate::repositories::{
    departments::DepartmentRepositoryImpl, employees::EmployeeRepositoryImpl,
    skills::SkillRepositoryImpl,
};
use crate::services::{
    departments::DepartmentServiceImpl, employees::EmployeeServiceImpl, skills::SkillServiceImpl,
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

#[derive(Clone)]
pub struct Repositories {
    pub department_repo: Arc<dyn crate::repositories::departments::DepartmentRepository>,
    pub employee_repo: Arc<dyn crate::repositories::employees::EmployeeRepository>,
    pub skill_repo: Arc<dyn crate::repositories::skills::SkillRepository>,
}

#[derive(Clone)]
pub struct Services {
    pub department_service: Arc<dyn crate::services::departments::DepartmentService>,
    pub employee_service: Arc<dyn crate::services::employees::EmployeeService>,
    pub skill_service: Arc<dyn crate::services::skills::SkillService>,
}

pub fn build_repositories(db: Arc<DatabaseConnection>) -> Repositories {
    Repositories {
        department_repo: Arc::new(DepartmentRepositoryImpl::new(db.clone())),
        employee_repo: Arc::new(EmployeeRepositoryImpl::new(db.clone())),
        skill_repo: Arc::new(SkillRepositoryImpl::new(db.clone())),
    }
}

pub fn build_services(repos: &Repositories) -> Services {
    Services {
        department_service: Arc::new(DepartmentServiceImpl::new(repos.department_repo.clone())),
        employee_service: Arc::new(EmployeeServiceImpl::new(
            repos.employee_repo.clone(),
            repos.department_repo.clone(),
            repos.skill_repo.clone(),
        )),
        skill_service: Arc::new(SkillServiceImpl::new(repos.skill_repo.clone())),
    }
}

pub fn build_all(db: Arc<DatabaseConnection>) -> (Repositories, Services) {
    let repos = build_repositories(db);
    let services = build_services(&repos);
    (repos, services)
}
