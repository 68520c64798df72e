use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Departments::Table)
                    .col(pk_auto(Departments::Id))
                    .col(string_len_uniq(Departments::Name, 255))
                    .col(date_time(Departments::CreatedAt))
                    .col(date_time(Departments::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Skills::Table)
                    .col(pk_auto(Skills::Id))
                    .col(string_len_uniq(Skills::Name, 255))
                    .col(date_time(Skills::CreatedAt))
                    .col(date_time(Skills::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Employees::Table)
                    .col(pk_auto(Employees::Id))
                    .col(string_len(Employees::FirstName, 255))
                    .col(string_len(Employees::LastName, 255))
                    .col(string_len_uniq(Employees::Email, 255))
                    .col(integer(Employees::DepartmentId))
                    .col(date_time(Employees::CreatedAt))
                    .col(date_time(Employees::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employees_department_id")
                            .from(Employees::Table, Employees::DepartmentId)
                            .to(Departments::Table, Departments::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Composite primary key makes the association a set: an employee
        // cannot hold the same skill twice.
        manager
            .create_table(
                Table::create()
                    .table(EmployeeSkill::Table)
                    .col(integer(EmployeeSkill::EmployeeId))
                    .col(integer(EmployeeSkill::SkillId))
                    .primary_key(
                        Index::create()
                            .name("pk_employee_skill")
                            .col(EmployeeSkill::EmployeeId)
                            .col(EmployeeSkill::SkillId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employee_skill_employee_id")
                            .from(EmployeeSkill::Table, EmployeeSkill::EmployeeId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employee_skill_skill_id")
                            .from(EmployeeSkill::Table, EmployeeSkill::SkillId)
                            .to(Skills::Table, Skills::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EmployeeSkill::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Employees::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Skills::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Departments::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Departments {
    Table,
    Id,
    Name,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Skills {
    Table,
    Id,
    Name,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Employees {
    Table,
    Id,
    FirstName,
    LastName,
    Email,
    DepartmentId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum EmployeeSkill {
    Table,
    EmployeeId,
    SkillId,
}
