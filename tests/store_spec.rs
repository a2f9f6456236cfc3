use chrono::NaiveDate;
use hr_admin::db::{Database, EntityStore};
use hr_admin::models::*;
use speculate2::speculate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn new_employee(first_name: &str) -> NewEmployee {
    NewEmployee {
        nif: Some("87654321X".to_string()),
        first_name: first_name.to_string(),
        last_name1: "Martín".to_string(),
        last_name2: "Sánchez".to_string(),
        birth_date: Some(date(1985, 2, 14)),
        phone1: "600123456".to_string(),
        phone2: "+34910000000".to_string(),
        email: "staff@example.com".to_string(),
        start_date: date(2024, 1, 8),
        civil_status: 'C',
        university_education: true,
    }
}

fn new_project(description: &str) -> NewProject {
    NewProject {
        description: description.to_string(),
        start_date: date(2023, 9, 1),
        end_date: Some(date(2024, 3, 1)),
        location: Some("Sevilla".to_string()),
        observations: Some("Internal tooling".to_string()),
    }
}

fn create_employee(db: &Database, first_name: &str) -> Employee {
    db.transaction(|store| store.insert_employee(&new_employee(first_name)))
        .expect("Failed to create employee")
}

fn create_project(db: &Database, description: &str) -> Project {
    db.transaction(|store| store.insert_project(&new_project(description)))
        .expect("Failed to create project")
}

fn link(db: &Database, project_id: i64, employee_id: i64) {
    db.transaction(|store| {
        store.insert_assignment(&Assignment {
            project_id,
            employee_id,
            assignment_date: date(2024, 2, 1),
        })
    })
    .expect("Failed to create assignment");
}

speculate! {
    before {
        let db = Database::open_memory().expect("Failed to create in-memory database");
        db.migrate().expect("Failed to run migrations");
    }

    describe "employees" {
        describe "insert_employee" {
            it "assigns increasing ids and leaves end_date unset" {
                let first = create_employee(&db, "Ana");
                let second = create_employee(&db, "Luis");

                assert!(second.id > first.id);
                assert!(first.end_date.is_none());
                assert_eq!(first.start_date, date(2024, 1, 8));
            }
        }

        describe "get_employee" {
            it "returns None for a missing id" {
                let found = db.read(|store| store.get_employee(404)).expect("Query failed");
                assert!(found.is_none());
            }

            it "returns every stored field" {
                let created = create_employee(&db, "Ana");
                let found = db
                    .read(|store| store.get_employee(created.id))
                    .expect("Query failed")
                    .expect("Employee should exist");

                assert_eq!(found, created);
                assert_eq!(found.civil_status, 'C');
                assert!(found.university_education);
                assert_eq!(found.birth_date, Some(date(1985, 2, 14)));
            }
        }

        describe "mark_employee_terminated" {
            it "writes end_date only once" {
                let employee = create_employee(&db, "Ana");

                let first = db
                    .transaction(|store| store.mark_employee_terminated(employee.id, date(2024, 5, 1)))
                    .expect("Update failed");
                let second = db
                    .transaction(|store| store.mark_employee_terminated(employee.id, date(2024, 6, 1)))
                    .expect("Update failed");

                assert!(first);
                assert!(!second);

                let stored = db
                    .read(|store| store.get_employee(employee.id))
                    .expect("Query failed")
                    .expect("Employee should exist");
                assert_eq!(stored.end_date, Some(date(2024, 5, 1)));
            }
        }

        describe "list_employees" {
            it "filters active employees and honours the window" {
                let ana = create_employee(&db, "Ana");
                let luis = create_employee(&db, "Luis");
                let marta = create_employee(&db, "Marta");
                db.transaction(|store| store.mark_employee_terminated(luis.id, date(2024, 5, 1)))
                    .expect("Update failed");

                let active = db
                    .read(|store| store.list_employees(EmployeeFilter::Active, Window::default()))
                    .expect("Query failed");
                assert_eq!(active.iter().map(|e| e.id).collect::<Vec<_>>(), vec![ana.id, marta.id]);

                let window = Window { offset: 1, limit: Some(1) };
                let all = db
                    .read(|store| store.list_employees(EmployeeFilter::All, window))
                    .expect("Query failed");
                assert_eq!(all.len(), 1);
                assert_eq!(all[0].id, luis.id);

                let counts = db
                    .read(|store| Ok((
                        store.count_employees(EmployeeFilter::Active)?,
                        store.count_employees(EmployeeFilter::All)?,
                    )))
                    .expect("Query failed");
                assert_eq!(counts, (2, 3));
            }
        }
    }

    describe "projects" {
        describe "insert_project" {
            it "stores optional fields" {
                let project = create_project(&db, "Alpha");
                let found = db
                    .read(|store| store.get_project(project.id))
                    .expect("Query failed")
                    .expect("Project should exist");

                assert_eq!(found, project);
                assert_eq!(found.location.as_deref(), Some("Sevilla"));
                assert_eq!(found.end_date, Some(date(2024, 3, 1)));
                assert!(found.termination_date.is_none());
            }
        }

        describe "mark_project_terminated" {
            it "removes the project from the active listing" {
                let alpha = create_project(&db, "Alpha");
                let beta = create_project(&db, "Beta");

                let changed = db
                    .transaction(|store| store.mark_project_terminated(alpha.id, date(2024, 4, 1)))
                    .expect("Update failed");
                assert!(changed);

                let active = db
                    .read(|store| store.list_projects(ProjectFilter::Active))
                    .expect("Query failed");
                assert_eq!(active, vec![beta]);

                let total = db
                    .read(|store| store.count_projects(ProjectFilter::All))
                    .expect("Query failed");
                assert_eq!(total, 2);
            }
        }
    }

    describe "assignments" {
        describe "insert_assignment" {
            it "rejects a second row for the same pair" {
                let project = create_project(&db, "Alpha");
                let employee = create_employee(&db, "Ana");
                link(&db, project.id, employee.id);

                let duplicate = db.transaction(|store| {
                    store.insert_assignment(&Assignment {
                        project_id: project.id,
                        employee_id: employee.id,
                        assignment_date: date(2024, 3, 1),
                    })
                });
                assert!(duplicate.is_err());

                let listed = db
                    .read(|store| store.list_assignments_by_project(project.id))
                    .expect("Query failed");
                assert_eq!(listed.len(), 1);
                assert_eq!(listed[0].assignment_date, date(2024, 2, 1));
            }

            it "rejects references to missing parents" {
                let project = create_project(&db, "Alpha");
                let orphan = db.transaction(|store| {
                    store.insert_assignment(&Assignment {
                        project_id: project.id,
                        employee_id: 999,
                        assignment_date: date(2024, 3, 1),
                    })
                });
                assert!(orphan.is_err());
            }
        }

        describe "listing" {
            it "returns links in insertion order" {
                let alpha = create_project(&db, "Alpha");
                let beta = create_project(&db, "Beta");
                let ana = create_employee(&db, "Ana");
                let luis = create_employee(&db, "Luis");
                link(&db, beta.id, ana.id);
                link(&db, alpha.id, luis.id);
                link(&db, alpha.id, ana.id);

                let by_project = db
                    .read(|store| store.list_assignments_by_project(alpha.id))
                    .expect("Query failed");
                assert_eq!(
                    by_project.iter().map(|a| a.employee_id).collect::<Vec<_>>(),
                    vec![luis.id, ana.id]
                );

                let by_employee = db
                    .read(|store| store.list_assignments_by_employee(ana.id))
                    .expect("Query failed");
                assert_eq!(
                    by_employee.iter().map(|a| a.project_id).collect::<Vec<_>>(),
                    vec![beta.id, alpha.id]
                );
            }
        }

        describe "delete_assignment" {
            it "reports whether a row was removed" {
                let project = create_project(&db, "Alpha");
                let employee = create_employee(&db, "Ana");
                link(&db, project.id, employee.id);
                let key = AssignmentKey::new(project.id, employee.id);

                let removed = db.transaction(|store| store.delete_assignment(key)).expect("Delete failed");
                let again = db.transaction(|store| store.delete_assignment(key)).expect("Delete failed");
                assert!(removed);
                assert!(!again);

                let found = db.read(|store| store.get_assignment(key)).expect("Query failed");
                assert!(found.is_none());
            }
        }

        describe "existence checks" {
            it "track links per project and per employee" {
                let project = create_project(&db, "Alpha");
                let employee = create_employee(&db, "Ana");
                let idle = create_employee(&db, "Luis");
                link(&db, project.id, employee.id);

                let flags = db
                    .read(|store| Ok((
                        store.assignment_exists_by_project(project.id)?,
                        store.assignment_exists_by_employee(employee.id)?,
                        store.assignment_exists_by_employee(idle.id)?,
                    )))
                    .expect("Query failed");
                assert_eq!(flags, (true, true, false));
            }
        }
    }
}
