//! In-memory leave ledger: balances and submitted applications.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::errors::{LeaveDeskError, Result};
use crate::types::{
    Employee, EmployeeId, LeaveApplication, LeaveBalance, LeaveRequest, LeaveStatus,
};

fn ledger_err(message: impl Into<String>, operation: &str) -> LeaveDeskError {
    LeaveDeskError::Ledger {
        message: message.into(),
        operation: operation.to_string(),
    }
}

#[derive(Debug, Default)]
struct LedgerState {
    balances: HashMap<EmployeeId, f64>,
    applications: Vec<LeaveApplication>,
    /// `None` once the id space is used up.
    next_application_id: Option<u64>,
}

/// Thread-safe store of leave balances and applications.
#[derive(Debug)]
pub struct LeaveLedger {
    state: RwLock<LedgerState>,
}

impl Default for LeaveLedger {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}

impl LeaveLedger {
    /// Creates a ledger seeded with existing balances and applications.
    /// New application ids continue after the highest existing one.
    pub fn new(balances: Vec<LeaveBalance>, applications: Vec<LeaveApplication>) -> Self {
        let next_application_id = applications
            .iter()
            .map(|a| a.application_id)
            .max()
            .map_or(Some(1), |highest| highest.checked_add(1));
        let balances = balances
            .into_iter()
            .map(|b| (b.employee_id, b.balance))
            .collect();

        Self {
            state: RwLock::new(LedgerState {
                balances,
                applications,
                next_application_id,
            }),
        }
    }

    /// Remaining leave in days, if the employee has a balance on record.
    pub fn balance(&self, employee_id: EmployeeId) -> Result<Option<f64>> {
        let state = self
            .state
            .read()
            .map_err(|_| ledger_err("ledger lock poisoned", "balance"))?;
        Ok(state.balances.get(&employee_id).copied())
    }

    pub fn set_balance(&self, employee_id: EmployeeId, days: f64) -> Result<()> {
        if !days.is_finite() {
            return Err(ledger_err(
                format!("balance must be a finite number of days, got {days}"),
                "set_balance",
            ));
        }
        let mut state = self
            .state
            .write()
            .map_err(|_| ledger_err("ledger lock poisoned", "set_balance"))?;
        state.balances.insert(employee_id, days);
        Ok(())
    }

    /// Records a pending application for an already resolved employee.
    ///
    /// The balance is left untouched; it only changes once an application is
    /// approved, which happens outside this ledger.
    pub fn submit(&self, request: &LeaveRequest, employee: &Employee) -> Result<LeaveApplication> {
        let leave_dates: Vec<String> = request
            .leave_dates
            .iter()
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty())
            .collect();
        if leave_dates.is_empty() {
            return Err(LeaveDeskError::InvalidInput {
                message: "at least one leave date is required".to_string(),
            });
        }

        let mut state = self
            .state
            .write()
            .map_err(|_| ledger_err("ledger lock poisoned", "submit"))?;
        let application_id = state
            .next_application_id
            .ok_or_else(|| ledger_err("no leave application ids left", "submit"))?;
        let application = LeaveApplication {
            application_id,
            employee_id: employee.employee_id,
            employee_name: employee.full_name(),
            leave_dates,
            leave_type: request.leave_type.clone(),
            reason: request.reason.clone(),
            status: LeaveStatus::Pending,
        };
        state.next_application_id = application_id.checked_add(1);
        state.applications.push(application.clone());

        Ok(application)
    }

    /// Applications filed for one employee, oldest first.
    pub fn applications_for(&self, employee_id: EmployeeId) -> Result<Vec<LeaveApplication>> {
        let state = self
            .state
            .read()
            .map_err(|_| ledger_err("ledger lock poisoned", "applications_for"))?;
        Ok(state
            .applications
            .iter()
            .filter(|a| a.employee_id == employee_id)
            .cloned()
            .collect())
    }

    pub fn balance_count(&self) -> Result<usize> {
        let state = self
            .state
            .read()
            .map_err(|_| ledger_err("ledger lock poisoned", "balance_count"))?;
        Ok(state.balances.len())
    }

    pub fn application_count(&self) -> Result<usize> {
        let state = self
            .state
            .read()
            .map_err(|_| ledger_err("ledger lock poisoned", "application_count"))?;
        Ok(state.applications.len())
    }
}
