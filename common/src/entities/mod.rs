pub mod departments;
pub mod employee_skill;
pub mod employees;
pub mod prelude;
pub mod skills;

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::Related;

    #[test]
    fn relations_are_wired() {
        let _ = <departments::Entity as Related<employees::Entity>>::to();
        let _ = <employees::Entity as Related<departments::Entity>>::to();
        let _ = <employees::Entity as Related<skills::Entity>>::to();
        let _ = <employees::Entity as Related<skills::Entity>>::via();
        let _ = <skills::Entity as Related<employees::Entity>>::to();
        let _ = <skills::Entity as Related<employees::Entity>>::via();
        let _ = <employee_skill::Entity as Related<employees::Entity>>::to();
        let _ = <employee_skill::Entity as Related<skills::Entity>>::to();
    }
}
