use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::LifecycleState;

/// A project employees can be assigned to.
///
/// `end_date` is the planned completion date and is purely informational.
/// `termination_date` is the administrative closure: unset while active,
/// written once and never changed afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Project {
    pub id: i64,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub termination_date: Option<NaiveDate>,
    pub location: Option<String>,
    pub observations: Option<String>,
}

impl Project {
    pub fn state(&self) -> LifecycleState {
        match self.termination_date {
            Some(_) => LifecycleState::Terminated,
            None => LifecycleState::Active,
        }
    }
}

/// Request body for creating a new project.
///
/// Missing fields deserialize to their defaults and are rejected by
/// validation, field by field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateProjectInput {
    pub description: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub location: Option<String>,
    pub observations: Option<String>,
}

/// A project that passed validation and is ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub location: Option<String>,
    pub observations: Option<String>,
}

/// Which projects a listing should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectFilter {
    Active,
    All,
}
