//! Assignment Engine: the only place that links employees to projects.
//!
//! # Invariants
//! - At most one assignment exists per (project, employee) pair.
//! - An assignment is only created when both parents exist.
//! - Lifecycle components ask this engine, and nothing else, whether an
//!   entity is still linked.

use chrono::NaiveDate;

use crate::db::EntityStore;
use crate::error::{HrError, HrResult};
use crate::models::{Assignment, AssignmentKey};

pub struct AssignmentEngine<'s, S: EntityStore> {
    store: &'s S,
}

impl<'s, S: EntityStore> AssignmentEngine<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self { store }
    }

    /// Links an employee to a project, dated `today`.
    ///
    /// Existence is checked project first, then employee, then the pair.
    pub fn assign(&self, key: AssignmentKey, today: NaiveDate) -> HrResult<Assignment> {
        if self.store.get_project(key.project_id)?.is_none() {
            return Err(HrError::ProjectNotFound(key.project_id));
        }
        if self.store.get_employee(key.employee_id)?.is_none() {
            return Err(HrError::EmployeeNotFound(key.employee_id));
        }
        if self.store.get_assignment(key)?.is_some() {
            return Err(HrError::AssignmentAlreadyExists(key));
        }

        let assignment = Assignment {
            project_id: key.project_id,
            employee_id: key.employee_id,
            assignment_date: today,
        };
        self.store.insert_assignment(&assignment)?;

        tracing::info!(
            project_id = key.project_id,
            employee_id = key.employee_id,
            "Employee assigned to project"
        );
        Ok(assignment)
    }

    pub fn unassign(&self, key: AssignmentKey) -> HrResult<()> {
        if !self.store.delete_assignment(key)? {
            return Err(HrError::AssignmentNotFound(key));
        }

        tracing::info!(
            project_id = key.project_id,
            employee_id = key.employee_id,
            "Employee unassigned from project"
        );
        Ok(())
    }

    /// Assignments of a project, in insertion order. Empty for unknown projects.
    pub fn list_by_project(&self, project_id: i64) -> HrResult<Vec<Assignment>> {
        self.store.list_assignments_by_project(project_id)
    }

    /// Assignments of an employee, in insertion order. Empty for unknown employees.
    pub fn list_by_employee(&self, employee_id: i64) -> HrResult<Vec<Assignment>> {
        self.store.list_assignments_by_employee(employee_id)
    }

    pub fn list_of_active_projects(&self) -> HrResult<Vec<Assignment>> {
        self.store.list_assignments_of_active_projects()
    }

    pub fn has_assignments(&self, project_id: i64) -> HrResult<bool> {
        self.store.assignment_exists_by_project(project_id)
    }

    pub fn is_assigned(&self, employee_id: i64) -> HrResult<bool> {
        self.store.assignment_exists_by_employee(employee_id)
    }
}
