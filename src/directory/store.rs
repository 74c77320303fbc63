use crate::errors::Result;
use crate::types::{DepartmentId, Employee, EmployeeId, EmployeeStatus};

/// Read access to the employee directory.
///
/// Every method may fail with
/// [`LeaveDeskError::DirectoryUnavailable`](crate::errors::LeaveDeskError::DirectoryUnavailable)
/// when the backing source cannot be reached. Implementations own their
/// retry and timeout policy; callers propagate failures as-is.
pub trait DirectoryStore: Send + Sync {
    /// Records whose first name, last name or "first last" contains `term`,
    /// ignoring case. Order is unspecified; may be empty.
    fn find_by_substring(&self, term: &str) -> Result<Vec<Employee>>;

    /// All records with the given status.
    fn find_by_status(&self, status: EmployeeStatus) -> Result<Vec<Employee>>;

    /// A single record by id.
    fn find_by_id(&self, id: EmployeeId) -> Result<Option<Employee>>;

    /// Display name of a department, if it exists.
    fn department_name(&self, dept_id: DepartmentId) -> Result<Option<String>>;

    /// Number of known departments.
    fn department_count(&self) -> Result<usize>;
}
