use serde::{Deserialize, Serialize};

/// Identifier of an employee record in the directory.
pub type EmployeeId = u64;

/// Identifier of a department in the directory.
pub type DepartmentId = u64;

/// Employment status of a directory record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmployeeStatus {
    #[default]
    Active,
    Inactive,
    Terminated,
}

impl EmployeeStatus {
    pub const ALL: [Self; 3] = [Self::Active, Self::Inactive, Self::Terminated];

    /// Returns the string representation of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::Terminated => "Terminated",
        }
    }

    /// Parses a status, ignoring case. Returns `None` for unrecognized values.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            "terminated" => Some(Self::Terminated),
            _ => None,
        }
    }
}

/// An employee record as returned by the directory.
///
/// The resolution engine only reads names and the disambiguation attributes
/// (department, title, email); everything else is passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub employee_id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub dept_id: Option<DepartmentId>,
    #[serde(default)]
    pub hire_date: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub status: EmployeeStatus,
}

impl Employee {
    /// Creates an active employee with only the required fields set.
    pub fn new(
        employee_id: EmployeeId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            employee_id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: None,
            job_title: None,
            dept_id: None,
            hire_date: None,
            phone: None,
            address: None,
            status: EmployeeStatus::Active,
        }
    }

    /// "First Last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// "Last First", used to score queries typed in reverse order.
    pub fn reversed_name(&self) -> String {
        format!("{} {}", self.last_name, self.first_name)
    }
}

/// A department a record may reference through `dept_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub dept_id: DepartmentId,
    pub dept_name: String,
}

/// First and last name tokens of a free-text query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameParts {
    pub first: String,
    /// Empty when the query has a single token.
    pub last: String,
}

impl NameParts {
    /// Splits on whitespace: the first token is `first`, the final token is
    /// `last` when there is more than one.
    pub fn from_query(query: &str) -> Self {
        let mut tokens = query.split_whitespace();
        let first = tokens.next().unwrap_or_default().to_string();
        let last = tokens.next_back().unwrap_or_default().to_string();
        Self { first, last }
    }

    pub fn has_last(&self) -> bool {
        !self.last.is_empty()
    }
}

/// A directory record that cleared the fuzzy threshold, with its best score.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub employee: Employee,
    pub score: f64,
}

/// Outcome of resolving a name query against the directory.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Nothing in the directory matched the query.
    NotFound { query: String },
    /// Exactly one record matched, possibly after applying the hint.
    Resolved { employee: Employee },
    /// Several records matched; the caller should re-prompt with these.
    Ambiguous {
        candidates: Vec<Employee>,
        message: String,
    },
}

impl Resolution {
    /// Returns the tag of this outcome.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::Resolved { .. } => "resolved",
            Self::Ambiguous { .. } => "ambiguous",
        }
    }

    /// Returns the resolved employee, if any.
    pub fn employee(&self) -> Option<&Employee> {
        match self {
            Self::Resolved { employee } => Some(employee),
            _ => None,
        }
    }
}

/// Leave balance of one employee, in days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveBalance {
    pub employee_id: EmployeeId,
    pub balance: f64,
}

/// Review state of a leave application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeaveStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl LeaveStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }
}

/// Leave type recorded when the caller does not specify one.
pub const DEFAULT_LEAVE_TYPE: &str = "Annual";

/// A request to apply for leave on behalf of a named employee.
#[derive(Debug, Clone, PartialEq)]
pub struct LeaveRequest {
    pub employee_query: String,
    pub leave_dates: Vec<String>,
    pub leave_type: String,
    pub reason: String,
    pub hint: Option<String>,
}

impl LeaveRequest {
    /// Creates a request with the default leave type and no reason or hint.
    pub fn new(employee_query: impl Into<String>, leave_dates: Vec<String>) -> Self {
        Self {
            employee_query: employee_query.into(),
            leave_dates,
            leave_type: DEFAULT_LEAVE_TYPE.to_string(),
            reason: String::new(),
            hint: None,
        }
    }
}

/// A recorded leave application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveApplication {
    pub application_id: u64,
    pub employee_id: EmployeeId,
    pub employee_name: String,
    pub leave_dates: Vec<String>,
    pub leave_type: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub status: LeaveStatus,
}

/// An employee together with its department name, ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeView {
    pub employee: Employee,
    pub department: Option<String>,
}

/// Aggregate statistics about the loaded directory and ledger.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeskStats {
    pub employee_count: usize,
    pub active_count: usize,
    pub department_count: usize,
    pub balance_count: usize,
    pub application_count: usize,
}
