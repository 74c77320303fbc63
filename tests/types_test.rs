use leavedesk::types::*;

#[test]
fn employee_status_as_str_roundtrip() {
    for status in EmployeeStatus::ALL {
        let s = status.as_str();
        let parsed = EmployeeStatus::from_str(s)
            .unwrap_or_else(|| panic!("failed to parse EmployeeStatus from '{}'", s));
        assert_eq!(status, parsed);
    }
}

#[test]
fn employee_status_from_str_ignores_case() {
    assert_eq!(EmployeeStatus::from_str("ACTIVE"), Some(EmployeeStatus::Active));
    assert_eq!(
        EmployeeStatus::from_str("terminated"),
        Some(EmployeeStatus::Terminated)
    );
    assert!(EmployeeStatus::from_str("on leave").is_none());
    assert!(EmployeeStatus::from_str("").is_none());
}

#[test]
fn employee_names() {
    let e = Employee::new(1, "Mary-Jane", "Watson");
    assert_eq!(e.full_name(), "Mary-Jane Watson");
    assert_eq!(e.reversed_name(), "Watson Mary-Jane");
    assert_eq!(e.status, EmployeeStatus::Active);
}

#[test]
fn employee_deserializes_with_only_required_fields() {
    let json = r#"{ "employee_id": 4, "first_name": "Ana", "last_name": "Lima" }"#;
    let e: Employee = serde_json::from_str(json).unwrap();
    assert_eq!(e, Employee::new(4, "Ana", "Lima"));
}

#[test]
fn name_parts_take_first_and_last_tokens() {
    let parts = NameParts::from_query("  John  Fitzgerald   Smith ");
    assert_eq!(parts.first, "John");
    assert_eq!(parts.last, "Smith");
    assert!(parts.has_last());

    let single = NameParts::from_query("Priya");
    assert_eq!(single.first, "Priya");
    assert!(!single.has_last());

    let empty = NameParts::from_query("   ");
    assert_eq!(empty.first, "");
    assert!(!empty.has_last());
}

#[test]
fn resolution_tags() {
    let employee = Employee::new(1, "John", "Smith");
    let not_found = Resolution::NotFound {
        query: "x".to_string(),
    };
    let resolved = Resolution::Resolved {
        employee: employee.clone(),
    };
    let ambiguous = Resolution::Ambiguous {
        candidates: vec![employee.clone(), Employee::new(2, "Jane", "Smith")],
        message: "Found 2 employees matching 'Smith'".to_string(),
    };

    assert_eq!(not_found.as_str(), "not_found");
    assert_eq!(resolved.as_str(), "resolved");
    assert_eq!(ambiguous.as_str(), "ambiguous");

    assert_eq!(resolved.employee(), Some(&employee));
    assert_eq!(not_found.employee(), None);
    assert_eq!(ambiguous.employee(), None);
}

#[test]
fn leave_request_defaults() {
    let request = LeaveRequest::new("john", vec!["2024-03-01".to_string()]);
    assert_eq!(request.leave_type, DEFAULT_LEAVE_TYPE);
    assert!(request.reason.is_empty());
    assert!(request.hint.is_none());
}

#[test]
fn leave_application_defaults_to_pending() {
    let json = r#"{
        "application_id": 3,
        "employee_id": 1,
        "employee_name": "John Smith",
        "leave_dates": ["2024-03-01"],
        "leave_type": "Annual"
    }"#;
    let app: LeaveApplication = serde_json::from_str(json).unwrap();
    assert_eq!(app.status, LeaveStatus::Pending);
    assert_eq!(app.status.as_str(), "Pending");
    assert!(app.reason.is_empty());
}
