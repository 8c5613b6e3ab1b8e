pub mod contact;
pub mod education;
pub mod memory;
pub mod sqlx_repo;
