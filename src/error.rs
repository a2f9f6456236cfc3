use thiserror::Error;

use crate::models::AssignmentKey;
use crate::validation::ValidationErrors;

pub type HrResult<T> = Result<T, HrError>;

/// Business and storage failures surfaced by the core operations.
///
/// Everything except [`HrError::Database`] is an expected outcome that the
/// caller caused; none of them are worth retrying.
#[derive(Debug, Error)]
pub enum HrError {
    #[error("Employee not found with id: {0}")]
    EmployeeNotFound(i64),

    #[error("Project not found with id: {0}")]
    ProjectNotFound(i64),

    #[error("Employee {} is not assigned to project {}", .0.employee_id, .0.project_id)]
    AssignmentNotFound(AssignmentKey),

    #[error("Employee {} is already assigned to project {}", .0.employee_id, .0.project_id)]
    AssignmentAlreadyExists(AssignmentKey),

    #[error("Employee {0} is already terminated")]
    EmployeeAlreadyTerminated(i64),

    #[error("Project {0} is already terminated")]
    ProjectAlreadyTerminated(i64),

    #[error("Employee {0} cannot be terminated while assigned to projects")]
    EmployeeStillAssigned(i64),

    #[error("Project \"{description}\" cannot be terminated while employees are assigned to it")]
    ProjectStillAssigned { id: i64, description: String },

    #[error("{0}")]
    Validation(ValidationErrors),

    #[error("{0}")]
    BadRequest(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}

/// Coarse classification of [`HrError`], used to pick a response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    Validation,
    BadRequest,
    Internal,
}

impl HrError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmployeeNotFound(_) | Self::ProjectNotFound(_) | Self::AssignmentNotFound(_) => {
                ErrorKind::NotFound
            }
            Self::AssignmentAlreadyExists(_)
            | Self::EmployeeAlreadyTerminated(_)
            | Self::ProjectAlreadyTerminated(_)
            | Self::EmployeeStillAssigned(_)
            | Self::ProjectStillAssigned { .. } => ErrorKind::Conflict,
            Self::Validation(_) => ErrorKind::Validation,
            Self::BadRequest(_) => ErrorKind::BadRequest,
            Self::Database(_) => ErrorKind::Internal,
        }
    }
}

impl From<ValidationErrors> for HrError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}
