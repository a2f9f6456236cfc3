//! HR administration backend: employees, projects and the assignments
//! linking them, served over HTTP.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod service;
pub mod validation;

pub use error::{ErrorKind, HrError, HrResult};
pub use service::HrService;
