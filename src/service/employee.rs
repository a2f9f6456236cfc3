//! Employee Lifecycle.
//!
//! Employees are created active and can be terminated once. Termination is
//! refused while the Assignment Engine still reports a link.

use chrono::NaiveDate;

use crate::db::EntityStore;
use crate::error::{HrError, HrResult};
use crate::models::*;
use crate::service::AssignmentEngine;
use crate::validation::{Validate, ValidationErrors};

pub struct EmployeeLifecycle<'s, S: EntityStore> {
    store: &'s S,
}

impl<'s, S: EntityStore> EmployeeLifecycle<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self { store }
    }

    pub fn get(&self, id: i64) -> HrResult<Employee> {
        self.store
            .get_employee(id)?
            .ok_or(HrError::EmployeeNotFound(id))
    }

    /// Validates and persists a new active employee.
    ///
    /// `start_date` falls back to `today` when the input leaves it out.
    pub fn create(&self, input: &CreateEmployeeInput, today: NaiveDate) -> HrResult<Employee> {
        let employee = self.store.insert_employee(&input.validate(today)?)?;

        tracing::info!(employee_id = employee.id, "Employee created");
        Ok(employee)
    }

    /// Creates a batch of employees, all or nothing.
    ///
    /// Every item is validated before anything is written. Violations are
    /// keyed `employees[i].field`.
    pub fn create_many(
        &self,
        inputs: &[CreateEmployeeInput],
        today: NaiveDate,
    ) -> HrResult<Vec<Employee>> {
        if inputs.is_empty() {
            return Err(HrError::BadRequest(
                "At least one employee is required".to_string(),
            ));
        }

        let mut errors = ValidationErrors::new();
        let mut valid = Vec::with_capacity(inputs.len());
        for (i, input) in inputs.iter().enumerate() {
            match input.validate(today) {
                Ok(new) => valid.push(new),
                Err(item_errors) => errors.merge_prefixed(&format!("employees[{i}]"), item_errors),
            }
        }
        errors.into_result()?;

        let employees = valid
            .iter()
            .map(|new| self.store.insert_employee(new))
            .collect::<HrResult<Vec<_>>>()?;

        tracing::info!(count = employees.len(), "Employees created in bulk");
        Ok(employees)
    }

    /// Moves an employee from active to terminated, dated `today`.
    pub fn terminate(&self, id: i64, today: NaiveDate) -> HrResult<Employee> {
        let mut employee = self.get(id)?;

        if employee.state().is_terminal() {
            return Err(HrError::EmployeeAlreadyTerminated(id));
        }
        if AssignmentEngine::new(self.store).is_assigned(id)? {
            return Err(HrError::EmployeeStillAssigned(id));
        }
        if !self.store.mark_employee_terminated(id, today)? {
            return Err(HrError::EmployeeAlreadyTerminated(id));
        }

        employee.end_date = Some(today);
        tracing::info!(employee_id = id, end_date = %today, "Employee terminated");
        Ok(employee)
    }

    pub fn list_active(&self, window: Window) -> HrResult<Vec<Employee>> {
        self.store.list_employees(EmployeeFilter::Active, window)
    }

    pub fn page_active(&self, request: PageRequest) -> HrResult<Page<Employee>> {
        let items = self
            .store
            .list_employees(EmployeeFilter::Active, request.window())?;
        let total = self.store.count_employees(EmployeeFilter::Active)?;
        Ok(Page::new(items, request, total))
    }

    /// Id and name parts of every employee, terminated ones included.
    pub fn list_basic(&self, window: Window) -> HrResult<Vec<EmployeeBasic>> {
        let employees = self.store.list_employees(EmployeeFilter::All, window)?;
        Ok(employees.into_iter().map(Into::into).collect())
    }
}
