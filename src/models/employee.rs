use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::LifecycleState;

/// An employee record.
///
/// `start_date` is fixed at creation. `end_date` stays `None` while the
/// employee is active and is written exactly once, on termination.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Employee {
    pub id: i64,
    /// National ID (NIF): eight digits and a control letter.
    pub nif: Option<String>,
    pub first_name: String,
    pub last_name1: String,
    pub last_name2: String,
    pub birth_date: Option<NaiveDate>,
    pub phone1: String,
    pub phone2: String,
    pub email: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    /// Single-letter civil status code.
    pub civil_status: char,
    pub university_education: bool,
}

impl Employee {
    pub fn state(&self) -> LifecycleState {
        match self.end_date {
            Some(_) => LifecycleState::Terminated,
            None => LifecycleState::Active,
        }
    }
}

/// Request body for registering a new employee.
///
/// Every field is optional on the wire so that a missing value is reported
/// by validation as a field error. There is no `end_date`: new employees
/// always start active.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateEmployeeInput {
    pub nif: Option<String>,
    pub first_name: String,
    pub last_name1: String,
    pub last_name2: String,
    pub birth_date: Option<NaiveDate>,
    pub phone1: String,
    pub phone2: String,
    pub email: String,
    /// Defaults to today when omitted.
    pub start_date: Option<NaiveDate>,
    pub civil_status: Option<char>,
    pub university_education: bool,
}

/// An employee that passed validation and is ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    pub nif: Option<String>,
    pub first_name: String,
    pub last_name1: String,
    pub last_name2: String,
    pub birth_date: Option<NaiveDate>,
    pub phone1: String,
    pub phone2: String,
    pub email: String,
    pub start_date: NaiveDate,
    pub civil_status: char,
    pub university_education: bool,
}

/// Reporting projection of an employee: identity and name parts only.
///
/// Includes terminated employees.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmployeeBasic {
    pub id: i64,
    pub first_name: String,
    pub last_name1: String,
    pub last_name2: String,
}

impl From<Employee> for EmployeeBasic {
    fn from(e: Employee) -> Self {
        Self {
            id: e.id,
            first_name: e.first_name,
            last_name1: e.last_name1,
            last_name2: e.last_name2,
        }
    }
}

/// Which employees a listing should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmployeeFilter {
    Active,
    All,
}
