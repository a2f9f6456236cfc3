use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::HrResult;
use crate::models::*;

/// Persistence contract the core operations are written against.
///
/// Implementations must give every call made through one borrowed store the
/// same transactional view; the SQLite store gets this from running inside a
/// single transaction.
pub trait EntityStore {
    fn get_employee(&self, id: i64) -> HrResult<Option<Employee>>;
    fn insert_employee(&self, employee: &NewEmployee) -> HrResult<Employee>;
    /// Sets `end_date` only if it is still unset. Returns whether a row changed.
    fn mark_employee_terminated(&self, id: i64, end_date: NaiveDate) -> HrResult<bool>;
    fn list_employees(&self, filter: EmployeeFilter, window: Window) -> HrResult<Vec<Employee>>;
    fn count_employees(&self, filter: EmployeeFilter) -> HrResult<u64>;

    fn get_project(&self, id: i64) -> HrResult<Option<Project>>;
    fn insert_project(&self, project: &NewProject) -> HrResult<Project>;
    /// Sets `termination_date` only if it is still unset. Returns whether a row changed.
    fn mark_project_terminated(&self, id: i64, termination_date: NaiveDate) -> HrResult<bool>;
    fn list_projects(&self, filter: ProjectFilter) -> HrResult<Vec<Project>>;
    fn count_projects(&self, filter: ProjectFilter) -> HrResult<u64>;

    fn get_assignment(&self, key: AssignmentKey) -> HrResult<Option<Assignment>>;
    fn insert_assignment(&self, assignment: &Assignment) -> HrResult<()>;
    fn delete_assignment(&self, key: AssignmentKey) -> HrResult<bool>;
    fn list_assignments_by_project(&self, project_id: i64) -> HrResult<Vec<Assignment>>;
    fn list_assignments_by_employee(&self, employee_id: i64) -> HrResult<Vec<Assignment>>;
    fn list_assignments_of_active_projects(&self) -> HrResult<Vec<Assignment>>;
    fn assignment_exists_by_project(&self, project_id: i64) -> HrResult<bool>;
    fn assignment_exists_by_employee(&self, employee_id: i64) -> HrResult<bool>;
}

const EMPLOYEE_COLUMNS: &str = "id, nif, first_name, last_name1, last_name2, birth_date, phone1,
    phone2, email, start_date, end_date, civil_status, university_education";

const PROJECT_COLUMNS: &str =
    "id, description, start_date, end_date, termination_date, location, observations";

/// [`EntityStore`] over a borrowed SQLite connection or transaction.
pub struct SqliteStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl EntityStore for SqliteStore<'_> {
    // ============================================================
    // Employees
    // ============================================================

    fn get_employee(&self, id: i64) -> HrResult<Option<Employee>> {
        let employee = self
            .conn
            .query_row(
                &format!("SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE id = ?1"),
                [id],
                employee_from_row,
            )
            .optional()?;
        Ok(employee)
    }

    fn insert_employee(&self, new: &NewEmployee) -> HrResult<Employee> {
        self.conn.execute(
            "INSERT INTO employees (nif, first_name, last_name1, last_name2, birth_date, phone1,
                phone2, email, start_date, end_date, civil_status, university_education)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, NULL, ?10, ?11)",
            params![
                new.nif,
                new.first_name,
                new.last_name1,
                new.last_name2,
                new.birth_date,
                new.phone1,
                new.phone2,
                new.email,
                new.start_date,
                new.civil_status.to_string(),
                new.university_education,
            ],
        )?;

        Ok(Employee {
            id: self.conn.last_insert_rowid(),
            nif: new.nif.clone(),
            first_name: new.first_name.clone(),
            last_name1: new.last_name1.clone(),
            last_name2: new.last_name2.clone(),
            birth_date: new.birth_date,
            phone1: new.phone1.clone(),
            phone2: new.phone2.clone(),
            email: new.email.clone(),
            start_date: new.start_date,
            end_date: None,
            civil_status: new.civil_status,
            university_education: new.university_education,
        })
    }

    fn mark_employee_terminated(&self, id: i64, end_date: NaiveDate) -> HrResult<bool> {
        let rows = self.conn.execute(
            "UPDATE employees SET end_date = ?1 WHERE id = ?2 AND end_date IS NULL",
            params![end_date, id],
        )?;
        Ok(rows > 0)
    }

    fn list_employees(&self, filter: EmployeeFilter, window: Window) -> HrResult<Vec<Employee>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees {} ORDER BY id LIMIT ?1 OFFSET ?2",
            employee_filter_sql(filter)
        ))?;

        let employees = stmt
            .query_map(
                params![sql_limit(window.limit), sql_offset(window.offset)],
                employee_from_row,
            )?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(employees)
    }

    fn count_employees(&self, filter: EmployeeFilter) -> HrResult<u64> {
        let count: i64 = self.conn.query_row(
            &format!(
                "SELECT COUNT(*) FROM employees {}",
                employee_filter_sql(filter)
            ),
            [],
            |row| row.get(0),
        )?;
        Ok(count.max(0) as u64)
    }

    // ============================================================
    // Projects
    // ============================================================

    fn get_project(&self, id: i64) -> HrResult<Option<Project>> {
        let project = self
            .conn
            .query_row(
                &format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = ?1"),
                [id],
                project_from_row,
            )
            .optional()?;
        Ok(project)
    }

    fn insert_project(&self, new: &NewProject) -> HrResult<Project> {
        self.conn.execute(
            "INSERT INTO projects (description, start_date, end_date, termination_date, location, observations)
             VALUES (?1, ?2, ?3, NULL, ?4, ?5)",
            params![
                new.description,
                new.start_date,
                new.end_date,
                new.location,
                new.observations,
            ],
        )?;

        Ok(Project {
            id: self.conn.last_insert_rowid(),
            description: new.description.clone(),
            start_date: new.start_date,
            end_date: new.end_date,
            termination_date: None,
            location: new.location.clone(),
            observations: new.observations.clone(),
        })
    }

    fn mark_project_terminated(&self, id: i64, termination_date: NaiveDate) -> HrResult<bool> {
        let rows = self.conn.execute(
            "UPDATE projects SET termination_date = ?1 WHERE id = ?2 AND termination_date IS NULL",
            params![termination_date, id],
        )?;
        Ok(rows > 0)
    }

    fn list_projects(&self, filter: ProjectFilter) -> HrResult<Vec<Project>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects {} ORDER BY id",
            project_filter_sql(filter)
        ))?;

        let projects = stmt
            .query_map([], project_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(projects)
    }

    fn count_projects(&self, filter: ProjectFilter) -> HrResult<u64> {
        let count: i64 = self.conn.query_row(
            &format!(
                "SELECT COUNT(*) FROM projects {}",
                project_filter_sql(filter)
            ),
            [],
            |row| row.get(0),
        )?;
        Ok(count.max(0) as u64)
    }

    // ============================================================
    // Assignments
    // ============================================================

    fn get_assignment(&self, key: AssignmentKey) -> HrResult<Option<Assignment>> {
        let assignment = self
            .conn
            .query_row(
                "SELECT project_id, employee_id, assignment_date FROM project_assignments
                 WHERE project_id = ?1 AND employee_id = ?2",
                params![key.project_id, key.employee_id],
                assignment_from_row,
            )
            .optional()?;
        Ok(assignment)
    }

    fn insert_assignment(&self, assignment: &Assignment) -> HrResult<()> {
        self.conn.execute(
            "INSERT INTO project_assignments (project_id, employee_id, assignment_date)
             VALUES (?1, ?2, ?3)",
            params![
                assignment.project_id,
                assignment.employee_id,
                assignment.assignment_date,
            ],
        )?;
        Ok(())
    }

    fn delete_assignment(&self, key: AssignmentKey) -> HrResult<bool> {
        let rows = self.conn.execute(
            "DELETE FROM project_assignments WHERE project_id = ?1 AND employee_id = ?2",
            params![key.project_id, key.employee_id],
        )?;
        Ok(rows > 0)
    }

    fn list_assignments_by_project(&self, project_id: i64) -> HrResult<Vec<Assignment>> {
        self.query_assignments(
            "SELECT project_id, employee_id, assignment_date FROM project_assignments
             WHERE project_id = ?1 ORDER BY rowid",
            Some(project_id),
        )
    }

    fn list_assignments_by_employee(&self, employee_id: i64) -> HrResult<Vec<Assignment>> {
        self.query_assignments(
            "SELECT project_id, employee_id, assignment_date FROM project_assignments
             WHERE employee_id = ?1 ORDER BY rowid",
            Some(employee_id),
        )
    }

    fn list_assignments_of_active_projects(&self) -> HrResult<Vec<Assignment>> {
        self.query_assignments(
            "SELECT a.project_id, a.employee_id, a.assignment_date
             FROM project_assignments a
             JOIN projects p ON p.id = a.project_id
             WHERE p.termination_date IS NULL
             ORDER BY a.rowid",
            None,
        )
    }

    fn assignment_exists_by_project(&self, project_id: i64) -> HrResult<bool> {
        let exists: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM project_assignments WHERE project_id = ?1)",
            [project_id],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    fn assignment_exists_by_employee(&self, employee_id: i64) -> HrResult<bool> {
        let exists: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM project_assignments WHERE employee_id = ?1)",
            [employee_id],
            |row| row.get(0),
        )?;
        Ok(exists)
    }
}

impl SqliteStore<'_> {
    fn query_assignments(&self, sql: &str, id: Option<i64>) -> HrResult<Vec<Assignment>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = match id {
            Some(id) => stmt.query_map([id], assignment_from_row)?,
            None => stmt.query_map([], assignment_from_row)?,
        };
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}

fn employee_filter_sql(filter: EmployeeFilter) -> &'static str {
    match filter {
        EmployeeFilter::Active => "WHERE end_date IS NULL",
        EmployeeFilter::All => "",
    }
}

fn project_filter_sql(filter: ProjectFilter) -> &'static str {
    match filter {
        ProjectFilter::Active => "WHERE termination_date IS NULL",
        ProjectFilter::All => "",
    }
}

// SQLite treats a negative LIMIT as "no limit".
fn sql_limit(limit: Option<u64>) -> i64 {
    limit.map_or(-1, |l| i64::try_from(l).unwrap_or(i64::MAX))
}

fn sql_offset(offset: u64) -> i64 {
    i64::try_from(offset).unwrap_or(i64::MAX)
}

fn employee_from_row(row: &Row<'_>) -> rusqlite::Result<Employee> {
    Ok(Employee {
        id: row.get(0)?,
        nif: row.get(1)?,
        first_name: row.get(2)?,
        last_name1: row.get(3)?,
        last_name2: row.get(4)?,
        birth_date: row.get(5)?,
        phone1: row.get(6)?,
        phone2: row.get(7)?,
        email: row.get(8)?,
        start_date: row.get(9)?,
        end_date: row.get(10)?,
        civil_status: parse_civil_status(11, row.get(11)?)?,
        university_education: row.get(12)?,
    })
}

fn project_from_row(row: &Row<'_>) -> rusqlite::Result<Project> {
    Ok(Project {
        id: row.get(0)?,
        description: row.get(1)?,
        start_date: row.get(2)?,
        end_date: row.get(3)?,
        termination_date: row.get(4)?,
        location: row.get(5)?,
        observations: row.get(6)?,
    })
}

fn assignment_from_row(row: &Row<'_>) -> rusqlite::Result<Assignment> {
    Ok(Assignment {
        project_id: row.get(0)?,
        employee_id: row.get(1)?,
        assignment_date: row.get(2)?,
    })
}

fn parse_civil_status(idx: usize, value: String) -> rusqlite::Result<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Text,
            format!("invalid civil status {value:?}").into(),
        )),
    }
}
