pub mod departments;
pub mod employees;
pub mod skills;

pub use departments::{DepartmentRepository, DepartmentRepositoryImpl};
pub use employees::{EmployeeRepository, EmployeeRepositoryImpl};
pub use skills::{SkillRepository, SkillRepositoryImpl};

/// Outcome of a delete guarded by a referential-integrity check. The check
/// and the delete run inside one transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardedDelete {
    Deleted,
    NotFound,
    StillReferenced,
}
