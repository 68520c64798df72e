pub use super::departments::Entity as Departments;
pub use super::employee_skill::Entity as EmployeeSkill;
pub use super::employees::Entity as Employees;
pub use super::skills::Entity as Skills;
