use std::fs;

use leavedesk::directory::*;
use leavedesk::errors::LeaveDeskError;
use leavedesk::types::*;
use tempfile::TempDir;

const ROSTER_JSON: &str = r#"{
  "departments": [
    { "dept_id": 1, "dept_name": "Engineering" },
    { "dept_id": 2, "dept_name": "Sales" }
  ],
  "employees": [
    { "employee_id": 1, "first_name": "John", "last_name": "Smith", "dept_id": 1,
      "email": "john.smith@acme.com", "job_title": "Software Engineer" },
    { "employee_id": 2, "first_name": "Jane", "last_name": "Smith", "dept_id": 2 },
    { "employee_id": 3, "first_name": "Olga", "last_name": "Petrova", "status": "Terminated" }
  ],
  "leave_balances": [
    { "employee_id": 1, "balance": 12.5 }
  ]
}"#;

fn write_roster(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("roster.json");
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_load_roster() {
    let dir = TempDir::new().unwrap();
    let roster = load_roster(&write_roster(&dir, ROSTER_JSON)).unwrap();

    assert_eq!(roster.departments.len(), 2);
    assert_eq!(roster.employees.len(), 3);
    assert_eq!(roster.leave_balances[0].balance, 12.5);
    assert!(roster.leave_applications.is_empty());

    let jane = &roster.employees[1];
    assert_eq!(jane.email, None);
    assert_eq!(jane.status, EmployeeStatus::Active);
    assert_eq!(roster.employees[2].status, EmployeeStatus::Terminated);
}

#[test]
fn test_built_directory_answers_queries() {
    let dir = TempDir::new().unwrap();
    let roster = load_roster(&write_roster(&dir, ROSTER_JSON)).unwrap();
    let directory = roster.build_directory();

    assert_eq!(directory.find_by_substring("smith").unwrap().len(), 2);
    assert_eq!(
        directory.find_by_status(EmployeeStatus::Active).unwrap().len(),
        2
    );
    assert_eq!(
        directory.find_by_id(3).unwrap().map(|e| e.first_name),
        Some("Olga".to_string())
    );
    assert_eq!(directory.find_by_id(42).unwrap(), None);
    assert_eq!(
        directory.department_name(2).unwrap().as_deref(),
        Some("Sales")
    );
    assert_eq!(directory.department_count().unwrap(), 2);
}

#[test]
fn test_missing_roster_file() {
    let dir = TempDir::new().unwrap();
    let err = load_roster(&dir.path().join("nope.json")).unwrap_err();
    match err {
        LeaveDeskError::Roster { message, path } => {
            assert!(message.contains("failed to read roster"));
            assert!(path.ends_with("nope.json"));
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_malformed_roster_file() {
    let dir = TempDir::new().unwrap();
    let err = load_roster(&write_roster(&dir, "{ not json")).unwrap_err();
    assert!(err.to_string().contains("failed to parse roster"));
}

#[test]
fn test_duplicate_employee_id_rejected() {
    let dir = TempDir::new().unwrap();
    let json = r#"{ "employees": [
        { "employee_id": 1, "first_name": "A", "last_name": "B" },
        { "employee_id": 1, "first_name": "C", "last_name": "D" }
    ] }"#;
    let err = load_roster(&write_roster(&dir, json)).unwrap_err();
    assert!(err.to_string().contains("duplicate employee id 1"));
}

#[test]
fn test_balance_for_unknown_employee_rejected() {
    let roster = Roster {
        employees: vec![Employee::new(1, "A", "B")],
        leave_balances: vec![LeaveBalance {
            employee_id: 9,
            balance: 3.0,
        }],
        ..Roster::default()
    };
    assert_eq!(
        roster.validate(),
        Err("leave balance references unknown employee 9".to_string())
    );
}

#[test]
fn test_application_for_unknown_employee_rejected() {
    let roster = Roster {
        employees: vec![Employee::new(1, "A", "B")],
        leave_applications: vec![LeaveApplication {
            application_id: 4,
            employee_id: 2,
            employee_name: "X Y".to_string(),
            leave_dates: vec!["2024-01-02".to_string()],
            leave_type: DEFAULT_LEAVE_TYPE.to_string(),
            reason: String::new(),
            status: LeaveStatus::Pending,
        }],
        ..Roster::default()
    };
    assert_eq!(
        roster.validate(),
        Err("leave application 4 references unknown employee 2".to_string())
    );
}

#[test]
fn test_last_application_id_rejected() {
    let roster = Roster {
        employees: vec![Employee::new(1, "A", "B")],
        leave_applications: vec![LeaveApplication {
            application_id: u64::MAX,
            employee_id: 1,
            employee_name: "A B".to_string(),
            leave_dates: vec!["2024-01-02".to_string()],
            leave_type: DEFAULT_LEAVE_TYPE.to_string(),
            reason: String::new(),
            status: LeaveStatus::Approved,
        }],
        ..Roster::default()
    };
    assert_eq!(
        roster.validate(),
        Err(format!("leave application id {} is out of range", u64::MAX))
    );
}

#[test]
fn test_save_then_load_roster() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data").join("roster.json");

    let mut employee = Employee::new(5, "Priya", "Nair");
    employee.dept_id = Some(3);
    let roster = Roster {
        departments: vec![Department {
            dept_id: 3,
            dept_name: "Human Resources".to_string(),
        }],
        employees: vec![employee],
        ..Roster::default()
    };

    save_roster(&path, &roster).unwrap();
    assert!(!path.with_extension("tmp").exists());
    assert_eq!(load_roster(&path).unwrap(), roster);
}

#[test]
fn test_upserted_employee_becomes_searchable() {
    let directory = InMemoryDirectory::new();
    directory
        .upsert_department(Department {
            dept_id: 1,
            dept_name: "Ops".to_string(),
        })
        .unwrap();
    directory.upsert_employee(Employee::new(1, "Ana", "Lima")).unwrap();

    assert_eq!(directory.find_by_substring("LIM").unwrap().len(), 1);
    assert_eq!(directory.employee_count().unwrap(), 1);
    assert_eq!(directory.department_name(1).unwrap().as_deref(), Some("Ops"));
}
