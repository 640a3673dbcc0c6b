//! Pages behind the login.

pub mod dashboard;
pub mod login;
pub mod resource;
