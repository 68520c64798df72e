use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "skills")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::employee_skill::Entity")]
    EmployeeSkill,
}

impl Related<super::employee_skill::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EmployeeSkill.def()
    }
}

impl Related<super::employees::Entity> for Entity {
    fn to() -> RelationDef {
        super::employee_skill::Relation::Employee.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::employee_skill::Relation::Skill.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
