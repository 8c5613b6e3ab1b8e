pub mod contact;
pub mod education;
