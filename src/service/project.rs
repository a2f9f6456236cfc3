//! Project Lifecycle.
//!
//! Same one-way shape as employees: active on creation, terminated once,
//! and only when no employee is assigned.

use chrono::NaiveDate;

use crate::db::EntityStore;
use crate::error::{HrError, HrResult};
use crate::models::*;
use crate::service::AssignmentEngine;
use crate::validation::Validate;

pub struct ProjectLifecycle<'s, S: EntityStore> {
    store: &'s S,
}

impl<'s, S: EntityStore> ProjectLifecycle<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self { store }
    }

    pub fn get(&self, id: i64) -> HrResult<Project> {
        self.store
            .get_project(id)?
            .ok_or(HrError::ProjectNotFound(id))
    }

    pub fn create(&self, input: &CreateProjectInput, today: NaiveDate) -> HrResult<Project> {
        let project = self.store.insert_project(&input.validate(today)?)?;

        tracing::info!(project_id = project.id, "Project created");
        Ok(project)
    }

    /// Closes a project administratively, dated `today`.
    pub fn terminate(&self, id: i64, today: NaiveDate) -> HrResult<Project> {
        let mut project = self.get(id)?;

        if project.state().is_terminal() {
            return Err(HrError::ProjectAlreadyTerminated(id));
        }
        if AssignmentEngine::new(self.store).has_assignments(id)? {
            return Err(HrError::ProjectStillAssigned {
                id,
                description: project.description,
            });
        }
        if !self.store.mark_project_terminated(id, today)? {
            return Err(HrError::ProjectAlreadyTerminated(id));
        }

        project.termination_date = Some(today);
        tracing::info!(project_id = id, termination_date = %today, "Project terminated");
        Ok(project)
    }

    pub fn list_active(&self) -> HrResult<Vec<Project>> {
        self.store.list_projects(ProjectFilter::Active)
    }
}
