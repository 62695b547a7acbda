//! List controller: loads, searches and deletes employees.
//!
//! # Design
//! Only the initial load and `refresh` can reach `Failed`; search failures
//! are logged and leave the current state alone. Deletes remove the record
//! from the in-memory list without re-fetching.

use std::rc::Rc;

use employee_core::{ApiError, ClientVariant, Employee, EmployeeId, EmployeeRepository};
use tracing::{debug, error};

use crate::prompt::Prompt;

pub const LOAD_FAILED_MESSAGE: &str = "Failed to load employees. Please check that the API server is running.";
pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this employee?";
pub const DELETE_FAILED_MESSAGE: &str = "Failed to delete employee";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListState {
    Loading,
    Ready { employees: Vec<Employee>, search_term: String },
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The user declined the confirmation; nothing was sent.
    Cancelled,
    Deleted,
    Failed(ApiError),
}

pub struct ListController {
    repo: Rc<dyn EmployeeRepository>,
    prompt: Rc<dyn Prompt>,
    state: ListState,
}

impl ListController {
    /// Starts in `Loading`; call [`load`](Self::load) to fetch.
    pub fn new(repo: Rc<dyn EmployeeRepository>, prompt: Rc<dyn Prompt>) -> Self {
        Self {
            repo,
            prompt,
            state: ListState::Loading,
        }
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn variant(&self) -> ClientVariant {
        self.repo.variant()
    }

    /// The loaded employees, or nothing while loading or failed.
    pub fn employees(&self) -> &[Employee] {
        match &self.state {
            ListState::Ready { employees, .. } => employees,
            _ => &[],
        }
    }

    pub fn search_term(&self) -> &str {
        match &self.state {
            ListState::Ready { search_term, .. } => search_term,
            _ => "",
        }
    }

    pub fn find(&self, id: &EmployeeId) -> Option<&Employee> {
        self.employees().iter().find(|e| &e.id == id)
    }

    /// Initial load on mount.
    pub fn load(&mut self) {
        self.refresh();
    }

    pub fn refresh(&mut self) {
        self.state = ListState::Loading;
        self.state = match self.repo.get_all() {
            Ok(employees) => {
                debug!(count = employees.len(), "employees loaded");
                ListState::Ready {
                    employees,
                    search_term: String::new(),
                }
            }
            Err(err) => {
                error!(error = %err, "error fetching employees");
                ListState::Failed(LOAD_FAILED_MESSAGE.to_string())
            }
        };
    }

    /// Blank terms behave exactly like [`refresh`](Self::refresh).
    pub fn search(&mut self, term: &str) {
        if term.trim().is_empty() {
            self.refresh();
            return;
        }
        match self.repo.search(term) {
            Ok(employees) => {
                self.state = ListState::Ready {
                    employees,
                    search_term: term.to_string(),
                };
            }
            Err(err) => error!(error = %err, term, "search error"),
        }
    }

    pub fn clear_search(&mut self) {
        self.refresh();
    }

    pub fn delete_employee(&mut self, id: &EmployeeId) -> DeleteOutcome {
        if !self.prompt.confirm(DELETE_CONFIRMATION) {
            return DeleteOutcome::Cancelled;
        }
        match self.repo.delete(id) {
            Ok(()) => {
                if let ListState::Ready { employees, .. } = &mut self.state {
                    employees.retain(|e| &e.id != id);
                }
                DeleteOutcome::Deleted
            }
            Err(err) => {
                error!(error = %err, %id, "error deleting employee");
                self.prompt.notify(DELETE_FAILED_MESSAGE);
                DeleteOutcome::Failed(err)
            }
        }
    }

    /// Re-runs `refresh` from `Failed`. Returns whether it did.
    pub fn retry(&mut self) -> bool {
        if matches!(self.state, ListState::Failed(_)) {
            self.refresh();
            true
        } else {
            false
        }
    }
}
