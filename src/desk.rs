use std::path::Path;

use tracing::debug;

use crate::config::{get_config_path, load_config, save_config, LeaveDeskConfig};
use crate::directory::{load_roster, save_roster, DirectoryStore, Roster};
use crate::errors::{LeaveDeskError, Result};
use crate::leave::LeaveLedger;
use crate::query::split_search_phrase;
use crate::resolution::{EmployeeResolver, ResolveOptions};
use crate::types::*;

/// Maximum number of potential matches offered when a search phrase
/// resolves to nothing.
pub const POTENTIAL_MATCH_LIMIT: usize = 5;

/// Shorter words are ignored by the potential-match lookup.
const MIN_POTENTIAL_WORD_CHARS: usize = 3;

/// Front desk of the leave system: resolves names, then reads or writes the
/// leave ledger for the chosen employee.
pub struct LeaveDesk {
    directory: Box<dyn DirectoryStore>,
    ledger: LeaveLedger,
    options: ResolveOptions,
}

/// Result of a desk operation that first has to pin down one employee.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// The employee was resolved and the operation ran.
    Done(T),
    /// No employee matched the query.
    NotFound { query: String },
    /// Several employees matched; nothing was done.
    Ambiguous {
        message: String,
        candidates: Vec<EmployeeView>,
    },
}

/// Result of a free-text search.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Found(EmployeeView),
    Multiple(Vec<EmployeeView>),
    /// Nothing resolved, but these names contain a word of the phrase.
    Potential(Vec<EmployeeView>),
    NotFound,
}

/// Leave balance of a resolved employee.
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceReport {
    pub view: EmployeeView,
    /// `None` when no balance is on record.
    pub balance: Option<f64>,
}

/// A leave application recorded for a resolved employee.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationReceipt {
    pub view: EmployeeView,
    pub application: LeaveApplication,
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

impl LeaveDesk {
    /// Initializes a leavedesk project at the given root.
    ///
    /// Writes a default configuration and, when the roster file does not
    /// exist yet, an empty roster.
    pub fn init(project_root: &Path) -> Result<Self> {
        let config = LeaveDeskConfig::default();
        save_config(project_root, &config)?;

        let roster_path = config.roster_file(project_root);
        if !roster_path.exists() {
            save_roster(&roster_path, &Roster::default())?;
        }

        Self::open(project_root)
    }

    /// Opens the project at the given root: loads the configuration, then the
    /// roster it points at.
    pub fn open(project_root: &Path) -> Result<Self> {
        let config = load_config(project_root)?;
        let roster_path = config.roster_file(project_root);

        if !roster_path.exists() {
            return Err(LeaveDeskError::Config {
                message: format!(
                    "no roster found at '{}'; run 'leavedesk init' first",
                    roster_path.display()
                ),
            });
        }

        let roster = load_roster(&roster_path)?;
        debug!(
            roster = %roster_path.display(),
            employees = roster.employees.len(),
            "opened roster"
        );
        Ok(Self::from_roster_with_options(
            roster,
            config.resolve_options(),
        ))
    }

    /// Returns `true` if a configuration exists at the given root.
    pub fn is_initialized(project_root: &Path) -> bool {
        get_config_path(project_root).exists()
    }

    /// Builds a desk over an in-memory copy of the roster.
    pub fn from_roster(roster: Roster) -> Self {
        Self::from_roster_with_options(roster, ResolveOptions::default())
    }

    pub fn from_roster_with_options(roster: Roster, options: ResolveOptions) -> Self {
        let directory = roster.build_directory();
        let ledger = LeaveLedger::new(roster.leave_balances, roster.leave_applications);
        Self::with_directory(Box::new(directory), ledger, options)
    }

    /// Builds a desk over any directory implementation.
    pub fn with_directory(
        directory: Box<dyn DirectoryStore>,
        ledger: LeaveLedger,
        options: ResolveOptions,
    ) -> Self {
        Self {
            directory,
            ledger,
            options,
        }
    }

    pub fn options(&self) -> ResolveOptions {
        self.options
    }

    pub fn ledger(&self) -> &LeaveLedger {
        &self.ledger
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

impl LeaveDesk {
    fn resolver(&self) -> EmployeeResolver<'_> {
        EmployeeResolver::with_options(self.directory.as_ref(), self.options)
    }

    /// Resolves a name query, narrowing ties with an optional hint.
    pub fn resolve(&self, query: &str, hint: Option<&str>) -> Result<Resolution> {
        self.resolver().resolve(query, hint)
    }

    /// Searches with a free-text phrase such as "priya from hr".
    ///
    /// The phrase is split into a name and a hint and resolved. When that
    /// finds nobody, records whose name contains one of the name's words are
    /// offered as potential matches.
    pub fn search(&self, text: &str) -> Result<SearchOutcome> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(SearchOutcome::NotFound);
        }

        let (name, hint) = split_search_phrase(text);
        match self.resolve(&name, hint.as_deref())? {
            Resolution::Resolved { employee } => Ok(SearchOutcome::Found(self.view(employee)?)),
            Resolution::Ambiguous { candidates, .. } => {
                Ok(SearchOutcome::Multiple(self.views(candidates)?))
            }
            Resolution::NotFound { .. } => {
                let potential = self.potential_matches(&name)?;
                if potential.is_empty() {
                    return Ok(SearchOutcome::NotFound);
                }
                Ok(SearchOutcome::Potential(self.views(potential)?))
            }
        }
    }

    /// Records whose name contains any word of `name`, in word order and
    /// without duplicates.
    fn potential_matches(&self, name: &str) -> Result<Vec<Employee>> {
        let mut found: Vec<Employee> = Vec::new();

        for word in name
            .split_whitespace()
            .filter(|w| w.chars().count() >= MIN_POTENTIAL_WORD_CHARS)
        {
            for employee in self.directory.find_by_substring(word)? {
                if !found.iter().any(|e| e.employee_id == employee.employee_id) {
                    found.push(employee);
                }
            }
            if found.len() >= POTENTIAL_MATCH_LIMIT {
                break;
            }
        }

        found.truncate(POTENTIAL_MATCH_LIMIT);
        Ok(found)
    }

    /// Runs `action` on the employee a query resolves to.
    fn with_resolved<T>(
        &self,
        query: &str,
        hint: Option<&str>,
        action: impl FnOnce(Employee) -> Result<T>,
    ) -> Result<Outcome<T>> {
        match self.resolve(query, hint)? {
            Resolution::Resolved { employee } => Ok(Outcome::Done(action(employee)?)),
            Resolution::NotFound { query } => Ok(Outcome::NotFound { query }),
            Resolution::Ambiguous {
                message,
                candidates,
            } => Ok(Outcome::Ambiguous {
                message,
                candidates: self.views(candidates)?,
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Leave operations
// ---------------------------------------------------------------------------

impl LeaveDesk {
    /// Looks up the leave balance of the employee `name` refers to.
    pub fn leave_balance(&self, name: &str, hint: Option<&str>) -> Result<Outcome<BalanceReport>> {
        self.with_resolved(name, hint, |employee| {
            let balance = self.ledger.balance(employee.employee_id)?;
            Ok(BalanceReport {
                view: self.view(employee)?,
                balance,
            })
        })
    }

    /// Records a pending leave application for the employee the request
    /// names. Nothing is recorded unless the name resolves to one employee.
    pub fn apply_leave(&self, request: &LeaveRequest) -> Result<Outcome<ApplicationReceipt>> {
        self.with_resolved(
            &request.employee_query,
            request.hint.as_deref(),
            |employee| {
                let application = self.ledger.submit(request, &employee)?;
                debug!(
                    application_id = application.application_id,
                    employee_id = employee.employee_id,
                    "recorded leave application"
                );
                Ok(ApplicationReceipt {
                    view: self.view(employee)?,
                    application,
                })
            },
        )
    }
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

impl LeaveDesk {
    /// Retrieves a single employee by id, with the department name.
    pub fn employee(&self, id: EmployeeId) -> Result<Option<EmployeeView>> {
        match self.directory.find_by_id(id)? {
            Some(employee) => Ok(Some(self.view(employee)?)),
            None => Ok(None),
        }
    }

    /// Pairs an employee with its department name.
    pub fn view(&self, employee: Employee) -> Result<EmployeeView> {
        let department = match employee.dept_id {
            Some(id) => self.directory.department_name(id)?,
            None => None,
        };
        Ok(EmployeeView {
            employee,
            department,
        })
    }

    fn views(&self, employees: Vec<Employee>) -> Result<Vec<EmployeeView>> {
        employees.into_iter().map(|e| self.view(e)).collect()
    }

    /// Returns aggregate counts for the directory and the ledger.
    pub fn stats(&self) -> Result<DeskStats> {
        let mut employee_count = 0;
        let mut active_count = 0;
        for status in EmployeeStatus::ALL {
            let count = self.directory.find_by_status(status)?.len();
            employee_count += count;
            if status == EmployeeStatus::Active {
                active_count = count;
            }
        }

        Ok(DeskStats {
            employee_count,
            active_count,
            department_count: self.directory.department_count()?,
            balance_count: self.ledger.balance_count()?,
            application_count: self.ledger.application_count()?,
        })
    }
}
