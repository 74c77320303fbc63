use crate::types::{EmployeeView, LeaveApplication};

/// Help text served as the assistant resource.
pub const HELP_TEXT: &str = "\
## Leave Desk Assistant

### Employee search
- \"Find John Smith\"
- \"Search for Priya in Engineering\"
- \"Kumar from IT\"

### Leave management
- \"Get leave balance for John\"
- \"Apply leave for Smith on 2024-03-01\"

### Tips
- Use full names when possible: \"John Smith\"
- Name the department: \"Priya from HR\"
- Use an email or its domain: \"john@company.com\"
- Mention the job title: \"Manager Smith\"
";

const DISAMBIGUATION_TIPS: &str = "\
Tip: narrow it down by
- last name (e.g. 'Smith')
- department (e.g. 'Engineering')
- email or email domain
- job title";

fn or_na(value: Option<&str>) -> &str {
    value.unwrap_or("N/A")
}

/// Formats one numbered option line, omitting absent attributes.
///
/// `1. John Smith | john@acme.com | Engineer | Engineering | ID: 7`
pub fn format_employee_option(index: usize, view: &EmployeeView) -> String {
    let emp = &view.employee;
    let mut line = format!("{}. {}", index, emp.full_name());
    for part in [
        emp.email.as_deref(),
        emp.job_title.as_deref(),
        view.department.as_deref(),
    ]
    .into_iter()
    .flatten()
    {
        line.push_str(" | ");
        line.push_str(part);
    }
    line.push_str(&format!(" | ID: {}", emp.employee_id));
    line
}

/// Formats candidates as a numbered list, one per line, starting at 1.
pub fn format_employee_options(views: &[EmployeeView]) -> String {
    views
        .iter()
        .enumerate()
        .map(|(i, v)| format_employee_option(i + 1, v))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Formats the full record of a single resolved employee.
pub fn format_employee_card(view: &EmployeeView) -> String {
    let emp = &view.employee;
    let mut out = String::new();
    out.push_str("**Match Found!**\n\n");
    out.push_str(&format!("**{}**\n", emp.full_name()));
    out.push_str(&format!("Employee ID: {}\n", emp.employee_id));
    out.push_str(&format!("Department: {}\n", or_na(view.department.as_deref())));
    out.push_str(&format!("Position: {}\n", or_na(emp.job_title.as_deref())));
    out.push_str(&format!("Email: {}\n", or_na(emp.email.as_deref())));
    out.push_str(&format!("Hire Date: {}\n", or_na(emp.hire_date.as_deref())));
    out.push_str(&format!("Phone: {}\n", or_na(emp.phone.as_deref())));
    out.push_str(&format!("Status: {}", emp.status.as_str()));
    out
}

/// Formats a leave balance, or a notice that none is on record.
pub fn format_balance(view: &EmployeeView, balance: Option<f64>) -> String {
    let emp = &view.employee;
    match balance {
        Some(days) => format!(
            "**{}**\nID: {} | {}\n{}\n{}\n**Leave Balance: {} days**",
            emp.full_name(),
            emp.employee_id,
            or_na(view.department.as_deref()),
            or_na(emp.job_title.as_deref()),
            or_na(emp.email.as_deref()),
            days
        ),
        None => format!(
            "Found employee but no leave balance data available for {}",
            emp.full_name()
        ),
    }
}

pub fn format_not_found(query: &str) -> String {
    format!("No employee found matching '{}'.", query)
}

/// Formats an ambiguity prompt: the message, the options, and tips for
/// narrowing the choice.
pub fn format_ambiguous(message: &str, candidates: &[EmployeeView]) -> String {
    format!(
        "{}. Please specify:\n\n{}\n\n{}",
        message,
        format_employee_options(candidates),
        DISAMBIGUATION_TIPS
    )
}

/// Formats several matches for a search phrase. `potential` marks matches
/// found only by the word lookup after the phrase resolved to nobody.
pub fn format_search_matches(text: &str, candidates: &[EmployeeView], potential: bool) -> String {
    let heading = if potential {
        "Found potential matches"
    } else {
        "Multiple matches found"
    };
    format!(
        "{} for '{}':\n\n{}",
        heading,
        text,
        format_employee_options(candidates)
    )
}

/// Formats the confirmation for a recorded leave application.
pub fn format_application(view: &EmployeeView, application: &LeaveApplication) -> String {
    let mut out = format!(
        "Leave application #{} submitted for {}\n",
        application.application_id, application.employee_name
    );
    out.push_str(&format!("Dates: {}\n", application.leave_dates.join(", ")));
    out.push_str(&format!("Type: {}\n", application.leave_type));
    if !application.reason.is_empty() {
        out.push_str(&format!("Reason: {}\n", application.reason));
    }
    out.push_str(&format!("Employee ID: {}\n", application.employee_id));
    out.push_str(&format!(
        "Department: {}\n",
        or_na(view.department.as_deref())
    ));
    out.push_str(&format!("Status: {}", application.status.as_str()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Employee, LeaveStatus};

    fn view(id: u64, first: &str, last: &str, dept: Option<&str>) -> EmployeeView {
        EmployeeView {
            employee: Employee::new(id, first, last),
            department: dept.map(str::to_string),
        }
    }

    #[test]
    fn test_option_omits_absent_parts() {
        let v = view(7, "John", "Smith", None);
        assert_eq!(format_employee_option(1, &v), "1. John Smith | ID: 7");
    }

    #[test]
    fn test_option_includes_all_parts() {
        let mut v = view(7, "John", "Smith", Some("Engineering"));
        v.employee.email = Some("john@acme.com".to_string());
        v.employee.job_title = Some("Engineer".to_string());
        assert_eq!(
            format_employee_option(2, &v),
            "2. John Smith | john@acme.com | Engineer | Engineering | ID: 7"
        );
    }

    #[test]
    fn test_options_are_numbered_from_one() {
        let views = vec![
            view(1, "John", "Smith", None),
            view(2, "Jane", "Smith", Some("Sales")),
        ];
        let text = format_employee_options(&views);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("1. John Smith"));
        assert_eq!(lines[1], "2. Jane Smith | Sales | ID: 2");
    }

    #[test]
    fn test_card_uses_na_for_missing_fields() {
        let card = format_employee_card(&view(3, "Ana", "Lima", Some("Ops")));
        assert!(card.contains("**Ana Lima**"));
        assert!(card.contains("Department: Ops"));
        assert!(card.contains("Email: N/A"));
        assert!(card.ends_with("Status: Active"));
    }

    #[test]
    fn test_balance_with_and_without_data() {
        let v = view(3, "Ana", "Lima", None);
        assert!(format_balance(&v, Some(12.5)).contains("**Leave Balance: 12.5 days**"));
        assert_eq!(
            format_balance(&v, None),
            "Found employee but no leave balance data available for Ana Lima"
        );
    }

    #[test]
    fn test_ambiguous_lists_options_and_tips() {
        let views = vec![view(1, "John", "Smith", None), view(2, "Jane", "Smith", None)];
        let text = format_ambiguous("Found 2 employees matching 'Smith'", &views);
        assert!(text.starts_with("Found 2 employees matching 'Smith'. Please specify:"));
        assert!(text.contains("2. Jane Smith | ID: 2"));
        assert!(text.contains("department (e.g. 'Engineering')"));
    }

    #[test]
    fn test_search_match_headings() {
        let views = vec![view(1, "John", "Smith", None)];
        assert!(format_search_matches("smith", &views, false).starts_with("Multiple matches found for 'smith':"));
        assert!(format_search_matches("smith", &views, true).starts_with("Found potential matches for 'smith':"));
    }

    #[test]
    fn test_application_confirmation() {
        let v = view(4, "Priya", "Nair", Some("HR"));
        let app = LeaveApplication {
            application_id: 9,
            employee_id: 4,
            employee_name: "Priya Nair".to_string(),
            leave_dates: vec!["2024-03-01".to_string(), "2024-03-02".to_string()],
            leave_type: "Annual".to_string(),
            reason: String::new(),
            status: LeaveStatus::Pending,
        };
        let text = format_application(&v, &app);
        assert!(text.starts_with("Leave application #9 submitted for Priya Nair"));
        assert!(text.contains("Dates: 2024-03-01, 2024-03-02"));
        assert!(!text.contains("Reason:"));
        assert!(text.contains("Department: HR"));
        assert!(text.ends_with("Status: Pending"));
    }
}
