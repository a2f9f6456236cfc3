use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Composite identity of an assignment.
///
/// The pair itself is the key; there is no surrogate id.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct AssignmentKey {
    pub project_id: i64,
    pub employee_id: i64,
}

impl AssignmentKey {
    pub fn new(project_id: i64, employee_id: i64) -> Self {
        Self {
            project_id,
            employee_id,
        }
    }
}

impl fmt::Display for AssignmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "employee {} on project {}",
            self.employee_id, self.project_id
        )
    }
}

/// An employee working on a project.
///
/// Parents are referenced by id only; look them up through the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Assignment {
    pub project_id: i64,
    pub employee_id: i64,
    pub assignment_date: NaiveDate,
}

impl Assignment {
    pub fn key(&self) -> AssignmentKey {
        AssignmentKey::new(self.project_id, self.employee_id)
    }
}
