//! Core operations: the Assignment Engine and the two lifecycles.
//!
//! The components are written against [`EntityStore`](crate::db::EntityStore)
//! and know nothing about transactions. [`HrService`] is the entry point for
//! callers: it runs every operation inside one database transaction, so
//! each check-then-act sequence is atomic and a failure leaves no trace.

mod assignment;
mod employee;
mod project;

pub use assignment::AssignmentEngine;
pub use employee::EmployeeLifecycle;
pub use project::ProjectLifecycle;

use chrono::NaiveDate;

use crate::db::Database;
use crate::error::{HrError, HrResult};
use crate::models::*;

/// Largest page a caller may request.
pub const MAX_PAGE_SIZE: u64 = 1000;

/// Transactional facade over the core components.
#[derive(Clone)]
pub struct HrService {
    db: Database,
    clock: fn() -> NaiveDate,
}

impl HrService {
    pub fn new(db: Database) -> Self {
        Self::with_clock(db, local_today)
    }

    /// Uses `clock` instead of the local calendar date for every date the
    /// service stamps (start, assignment and termination dates).
    pub fn with_clock(db: Database, clock: fn() -> NaiveDate) -> Self {
        Self { db, clock }
    }

    pub fn today(&self) -> NaiveDate {
        (self.clock)()
    }

    // ============================================================
    // Assignments
    // ============================================================

    pub fn assign(&self, project_id: i64, employee_id: i64) -> HrResult<Assignment> {
        let today = self.today();
        self.db.transaction(|store| {
            AssignmentEngine::new(store).assign(AssignmentKey::new(project_id, employee_id), today)
        })
    }

    pub fn unassign(&self, project_id: i64, employee_id: i64) -> HrResult<()> {
        self.db.transaction(|store| {
            AssignmentEngine::new(store).unassign(AssignmentKey::new(project_id, employee_id))
        })
    }

    pub fn list_assignments_by_project(&self, project_id: i64) -> HrResult<Vec<Assignment>> {
        self.db
            .read(|store| AssignmentEngine::new(store).list_by_project(project_id))
    }

    pub fn list_assignments_by_employee(&self, employee_id: i64) -> HrResult<Vec<Assignment>> {
        self.db
            .read(|store| AssignmentEngine::new(store).list_by_employee(employee_id))
    }

    pub fn list_active_project_assignments(&self) -> HrResult<Vec<Assignment>> {
        self.db
            .read(|store| AssignmentEngine::new(store).list_of_active_projects())
    }

    // ============================================================
    // Employees
    // ============================================================

    pub fn get_employee(&self, id: i64) -> HrResult<Employee> {
        self.db.read(|store| EmployeeLifecycle::new(store).get(id))
    }

    pub fn add_employee(&self, input: &CreateEmployeeInput) -> HrResult<Employee> {
        let today = self.today();
        self.db
            .transaction(|store| EmployeeLifecycle::new(store).create(input, today))
    }

    pub fn add_employees(&self, inputs: &[CreateEmployeeInput]) -> HrResult<Vec<Employee>> {
        let today = self.today();
        self.db
            .transaction(|store| EmployeeLifecycle::new(store).create_many(inputs, today))
    }

    pub fn terminate_employee(&self, id: i64) -> HrResult<Employee> {
        let today = self.today();
        self.db
            .transaction(|store| EmployeeLifecycle::new(store).terminate(id, today))
    }

    pub fn list_active_employees(&self, window: Window) -> HrResult<Vec<Employee>> {
        self.db
            .read(|store| EmployeeLifecycle::new(store).list_active(window))
    }

    pub fn page_active_employees(&self, request: PageRequest) -> HrResult<Page<Employee>> {
        if request.size == 0 || request.size > MAX_PAGE_SIZE {
            return Err(HrError::BadRequest(format!(
                "Page size must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }
        self.db
            .read(|store| EmployeeLifecycle::new(store).page_active(request))
    }

    pub fn list_basic_employees(&self, window: Window) -> HrResult<Vec<EmployeeBasic>> {
        self.db
            .read(|store| EmployeeLifecycle::new(store).list_basic(window))
    }

    // ============================================================
    // Projects
    // ============================================================

    pub fn get_project(&self, id: i64) -> HrResult<Project> {
        self.db.read(|store| ProjectLifecycle::new(store).get(id))
    }

    pub fn add_project(&self, input: &CreateProjectInput) -> HrResult<Project> {
        let today = self.today();
        self.db
            .transaction(|store| ProjectLifecycle::new(store).create(input, today))
    }

    pub fn terminate_project(&self, id: i64) -> HrResult<Project> {
        let today = self.today();
        self.db
            .transaction(|store| ProjectLifecycle::new(store).terminate(id, today))
    }

    pub fn list_active_projects(&self) -> HrResult<Vec<Project>> {
        self.db
            .read(|store| ProjectLifecycle::new(store).list_active())
    }
}

fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::NaiveDate;

    use crate::db::{Database, EntityStore};
    use crate::models::*;
    use crate::validation::Validate;

    pub fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    pub fn test_db() -> Database {
        let db = Database::open_memory().expect("Failed to create in-memory database");
        db.migrate().expect("Failed to run migrations");
        db
    }

    pub fn employee_input(first_name: &str) -> CreateEmployeeInput {
        CreateEmployeeInput {
            nif: Some("12345678Z".to_string()),
            first_name: first_name.to_string(),
            last_name1: "García".to_string(),
            last_name2: "López".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1990, 5, 20),
            phone1: "600111222".to_string(),
            phone2: "+34911222333".to_string(),
            email: "someone@example.com".to_string(),
            start_date: None,
            civil_status: Some('S'),
            university_education: false,
        }
    }

    pub fn project_input(description: &str) -> CreateProjectInput {
        CreateProjectInput {
            description: description.to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 10),
            end_date: None,
            location: None,
            observations: None,
        }
    }

    pub fn seed_employee(db: &Database, first_name: &str) -> Employee {
        let new = employee_input(first_name)
            .validate(today())
            .expect("Seed employee should be valid");
        db.transaction(|store| store.insert_employee(&new))
            .expect("Failed to seed employee")
    }

    pub fn seed_project(db: &Database, description: &str) -> Project {
        let new = project_input(description)
            .validate(today())
            .expect("Seed project should be valid");
        db.transaction(|store| store.insert_project(&new))
            .expect("Failed to seed project")
    }

    pub fn seed_pair(db: &Database) -> (Project, Employee) {
        (seed_project(db, "Alpha"), seed_employee(db, "Ana"))
    }
}
