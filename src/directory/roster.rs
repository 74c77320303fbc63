use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::memory::InMemoryDirectory;
use crate::errors::{LeaveDeskError, Result};
use crate::types::{Department, Employee, LeaveApplication, LeaveBalance};

/// A JSON snapshot of the directory and the leave ledger.
///
/// ```json
/// {
///   "departments": [{ "dept_id": 1, "dept_name": "Engineering" }],
///   "employees": [{ "employee_id": 7, "first_name": "John", "last_name": "Smith", "dept_id": 1 }],
///   "leave_balances": [{ "employee_id": 7, "balance": 12.5 }],
///   "leave_applications": []
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Roster {
    pub departments: Vec<Department>,
    pub employees: Vec<Employee>,
    pub leave_balances: Vec<LeaveBalance>,
    pub leave_applications: Vec<LeaveApplication>,
}

impl Roster {
    /// Checks that ids are unique and that ledger entries reference known
    /// employees. Application ids must leave room for the next one.
    pub fn validate(&self) -> std::result::Result<(), String> {
        let mut dept_ids = HashSet::new();
        for dept in &self.departments {
            if !dept_ids.insert(dept.dept_id) {
                return Err(format!("duplicate department id {}", dept.dept_id));
            }
        }

        let mut employee_ids = HashSet::new();
        for emp in &self.employees {
            if !employee_ids.insert(emp.employee_id) {
                return Err(format!("duplicate employee id {}", emp.employee_id));
            }
        }

        for balance in &self.leave_balances {
            if !employee_ids.contains(&balance.employee_id) {
                return Err(format!(
                    "leave balance references unknown employee {}",
                    balance.employee_id
                ));
            }
        }

        let mut application_ids = HashSet::new();
        for app in &self.leave_applications {
            if app.application_id == u64::MAX {
                return Err(format!(
                    "leave application id {} is out of range",
                    app.application_id
                ));
            }
            if !application_ids.insert(app.application_id) {
                return Err(format!(
                    "duplicate leave application id {}",
                    app.application_id
                ));
            }
            if !employee_ids.contains(&app.employee_id) {
                return Err(format!(
                    "leave application {} references unknown employee {}",
                    app.application_id, app.employee_id
                ));
            }
        }

        Ok(())
    }

    /// Builds an in-memory directory from the roster's employees and
    /// departments.
    pub fn build_directory(&self) -> InMemoryDirectory {
        InMemoryDirectory::with_records(self.employees.clone(), self.departments.clone())
    }
}

/// Reads and validates a roster file.
pub fn load_roster(path: &Path) -> Result<Roster> {
    let roster_err = |message: String| LeaveDeskError::Roster {
        message,
        path: path.display().to_string(),
    };

    let contents =
        fs::read_to_string(path).map_err(|e| roster_err(format!("failed to read roster: {e}")))?;
    let roster: Roster = serde_json::from_str(&contents)
        .map_err(|e| roster_err(format!("failed to parse roster: {e}")))?;
    roster.validate().map_err(roster_err)?;

    Ok(roster)
}

/// Writes a roster file atomically, creating parent directories as needed.
pub fn save_roster(path: &Path, roster: &Roster) -> Result<()> {
    let roster_err = |message: String| LeaveDeskError::Roster {
        message,
        path: path.display().to_string(),
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| roster_err(format!("failed to create roster directory: {e}")))?;
    }

    let json = serde_json::to_string_pretty(roster)?;
    let tmp_path = path.with_extension("tmp");
    fs::write(&tmp_path, json)
        .map_err(|e| roster_err(format!("failed to write temporary roster: {e}")))?;
    fs::rename(&tmp_path, path)
        .map_err(|e| roster_err(format!("failed to move roster into place: {e}")))?;

    Ok(())
}
