use std::collections::HashMap;
use std::sync::RwLock;

use super::store::DirectoryStore;
use crate::errors::{LeaveDeskError, Result};
use crate::types::{Department, DepartmentId, Employee, EmployeeId, EmployeeStatus};

fn lock_err(operation: &str) -> LeaveDeskError {
    LeaveDeskError::DirectoryUnavailable {
        message: "directory lock poisoned".to_string(),
        operation: operation.to_string(),
    }
}

#[derive(Debug, Default)]
struct DirectoryState {
    /// Insertion order is the natural return order of every query.
    employees: Vec<Employee>,
    departments: HashMap<DepartmentId, String>,
}

/// Thread-safe in-memory directory.
///
/// Backs the CLI and the tool server (seeded from a roster file) and doubles
/// as the fake directory in tests.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    state: RwLock<DirectoryState>,
}

impl InMemoryDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a directory holding the given records and departments.
    pub fn with_records(employees: Vec<Employee>, departments: Vec<Department>) -> Self {
        let departments = departments
            .into_iter()
            .map(|d| (d.dept_id, d.dept_name))
            .collect();
        Self {
            state: RwLock::new(DirectoryState {
                employees,
                departments,
            }),
        }
    }

    /// Inserts a record, replacing any existing record with the same id in
    /// place.
    pub fn upsert_employee(&self, employee: Employee) -> Result<()> {
        let mut state = self
            .state
            .write()
            .map_err(|_| lock_err("upsert_employee"))?;
        match state
            .employees
            .iter_mut()
            .find(|e| e.employee_id == employee.employee_id)
        {
            Some(existing) => *existing = employee,
            None => state.employees.push(employee),
        }
        Ok(())
    }

    /// Inserts or renames a department.
    pub fn upsert_department(&self, department: Department) -> Result<()> {
        let mut state = self
            .state
            .write()
            .map_err(|_| lock_err("upsert_department"))?;
        state
            .departments
            .insert(department.dept_id, department.dept_name);
        Ok(())
    }

    /// Number of records, whatever their status.
    pub fn employee_count(&self) -> Result<usize> {
        let state = self.state.read().map_err(|_| lock_err("employee_count"))?;
        Ok(state.employees.len())
    }
}

impl DirectoryStore for InMemoryDirectory {
    fn find_by_substring(&self, term: &str) -> Result<Vec<Employee>> {
        let state = self
            .state
            .read()
            .map_err(|_| lock_err("find_by_substring"))?;
        let term = term.to_lowercase();

        Ok(state
            .employees
            .iter()
            .filter(|e| {
                let first = e.first_name.to_lowercase();
                let last = e.last_name.to_lowercase();
                first.contains(&term)
                    || last.contains(&term)
                    || format!("{first} {last}").contains(&term)
            })
            .cloned()
            .collect())
    }

    fn find_by_status(&self, status: EmployeeStatus) -> Result<Vec<Employee>> {
        let state = self
            .state
            .read()
            .map_err(|_| lock_err("find_by_status"))?;
        Ok(state
            .employees
            .iter()
            .filter(|e| e.status == status)
            .cloned()
            .collect())
    }

    fn find_by_id(&self, id: EmployeeId) -> Result<Option<Employee>> {
        let state = self.state.read().map_err(|_| lock_err("find_by_id"))?;
        Ok(state.employees.iter().find(|e| e.employee_id == id).cloned())
    }

    fn department_name(&self, dept_id: DepartmentId) -> Result<Option<String>> {
        let state = self
            .state
            .read()
            .map_err(|_| lock_err("department_name"))?;
        Ok(state.departments.get(&dept_id).cloned())
    }

    fn department_count(&self) -> Result<usize> {
        let state = self
            .state
            .read()
            .map_err(|_| lock_err("department_count"))?;
        Ok(state.departments.len())
    }
}
