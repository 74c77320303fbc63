use tracing::debug;

use super::ranker::{rank, DEFAULT_MATCH_THRESHOLD, FALLBACK_LIMIT};
use crate::directory::DirectoryStore;
use crate::errors::Result;
use crate::types::{Employee, EmployeeStatus, Resolution};

/// Tunables for the fuzzy fallback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolveOptions {
    /// Minimum score for a fuzzy match.
    pub threshold: f64,
    /// Maximum number of fuzzy matches kept.
    pub fallback_limit: usize,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_MATCH_THRESHOLD,
            fallback_limit: FALLBACK_LIMIT,
        }
    }
}

/// Resolves free-text employee names against a directory.
///
/// Holds no state between calls; each call issues one or two sequential reads
/// against the directory it was built with.
pub struct EmployeeResolver<'a> {
    directory: &'a dyn DirectoryStore,
    options: ResolveOptions,
}

impl<'a> EmployeeResolver<'a> {
    /// Creates a resolver with default options.
    pub fn new(directory: &'a dyn DirectoryStore) -> Self {
        Self::with_options(directory, ResolveOptions::default())
    }

    pub fn with_options(directory: &'a dyn DirectoryStore, options: ResolveOptions) -> Self {
        Self { directory, options }
    }

    pub fn options(&self) -> ResolveOptions {
        self.options
    }

    /// Finds the records a query refers to, without disambiguation.
    ///
    /// Tries a case-insensitive substring lookup first. When that finds
    /// nothing, ranks all active employees and keeps the best
    /// `fallback_limit` matches.
    pub fn lookup(&self, query: &str) -> Result<Vec<Employee>> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let exact = self.directory.find_by_substring(query)?;
        if !exact.is_empty() {
            debug!(query, count = exact.len(), "substring lookup matched");
            return Ok(exact);
        }

        let active = self.directory.find_by_status(EmployeeStatus::Active)?;
        let ranked = rank(query, &active, self.options.threshold);
        debug!(
            query,
            pool = active.len(),
            matched = ranked.len(),
            "fuzzy fallback ranked active employees"
        );

        Ok(ranked
            .into_iter()
            .take(self.options.fallback_limit)
            .map(|c| c.employee)
            .collect())
    }

    /// Resolves `query` to one employee, narrowing ties with `hint`.
    ///
    /// The hint is matched against department name, job title and email
    /// (substring), and against the last name (exact), ignoring case. A hint
    /// that rules out every record leaves the original set ambiguous rather
    /// than reporting nothing found.
    pub fn resolve(&self, query: &str, hint: Option<&str>) -> Result<Resolution> {
        let mut employees = self.lookup(query)?;

        if employees.is_empty() {
            return Ok(Resolution::NotFound {
                query: query.to_string(),
            });
        }
        if employees.len() == 1 {
            return Ok(Resolution::Resolved {
                employee: employees.remove(0),
            });
        }

        let hint = hint.map(str::trim).filter(|h| !h.is_empty());
        if let Some(hint) = hint {
            let mut filtered = self.filter_by_hint(&employees, hint)?;
            debug!(
                query,
                hint,
                before = employees.len(),
                after = filtered.len(),
                "applied disambiguation hint"
            );

            if filtered.len() == 1 {
                return Ok(Resolution::Resolved {
                    employee: filtered.remove(0),
                });
            }
            if !filtered.is_empty() {
                return Ok(Resolution::Ambiguous {
                    message: format!(
                        "Found {} employees matching '{}' for '{}'",
                        filtered.len(),
                        query,
                        hint
                    ),
                    candidates: filtered,
                });
            }
        }

        Ok(Resolution::Ambiguous {
            message: format!(
                "Found {} employees matching '{}'",
                employees.len(),
                query
            ),
            candidates: employees,
        })
    }

    fn filter_by_hint(&self, employees: &[Employee], hint: &str) -> Result<Vec<Employee>> {
        let hint = hint.to_lowercase();
        let mut kept = Vec::new();

        for employee in employees {
            let department = match employee.dept_id {
                Some(id) => self.directory.department_name(id)?.unwrap_or_default(),
                None => String::new(),
            };
            let in_optional = |field: &Option<String>| {
                field
                    .as_deref()
                    .is_some_and(|v| v.to_lowercase().contains(&hint))
            };

            if department.to_lowercase().contains(&hint)
                || in_optional(&employee.job_title)
                || in_optional(&employee.email)
                || employee.last_name.to_lowercase() == hint
            {
                kept.push(employee.clone());
            }
        }

        Ok(kept)
    }
}
