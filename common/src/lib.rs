pub mod builders;
pub mod db;
pub mod entities;
pub mod repositories;
pub mod services;
pub mod settings;

pub use builders::{build_all, build_repositories, build_services, Repositories, Services};
