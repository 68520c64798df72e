use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub department_id: i32,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Model {
    /// Derived, never stored.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::departments::Entity",
        from = "Column::DepartmentId",
        to = "super::departments::Column::Id"
    )]
    Department,
    #[sea_orm(has_many = "super::employee_skill::Entity")]
    EmployeeSkill,
}

impl Related<super::departments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Department.def()
    }
}

impl Related<super::employee_skill::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EmployeeSkill.def()
    }
}

impl Related<super::skills::Entity> for Entity {
    fn to() -> RelationDef {
        super::employee_skill::Relation::Skill.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::employee_skill::Relation::Employee.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_name_joins_first_and_last() {
        let now = chrono::Utc::now().naive_utc();
        let employee = Model {
            id: 1,
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email: "john@x.com".to_string(),
            department_id: 1,
            created_at: now,
            updated_at: now,
        };

        assert_eq!(employee.full_name(), "John Doe");
    }
}
