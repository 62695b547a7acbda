//! Form controller: one employee's editable fields, validation and submit.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;
use std::sync::LazyLock;

use employee_core::{ApiError, ClientVariant, Department, Employee, EmployeeDraft, EmployeeId, EmployeeRepository, UnknownDepartment};
use regex::Regex;
use thiserror::Error;
use tracing::error;

use crate::prompt::Prompt;

static EMAIL_SHAPE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("valid email regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Position,
    Department,
    Email,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Position, Field::Department, Field::Email];

    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Position => "position",
            Field::Department => "department",
            Field::Email => "email",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Full Name",
            Field::Position => "Position",
            Field::Department => "Department",
            Field::Email => "Email Address",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown field `{0}` (expected name, position, department or email)")]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// Field → inline error message. Empty when the draft is valid.
pub type FormErrors = BTreeMap<Field, &'static str>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("{} field(s) failed validation", .0.len())]
    Invalid(FormErrors),
    #[error(transparent)]
    Failed(#[from] ApiError),
}

/// Check a draft without touching any state.
pub fn validate(draft: &EmployeeDraft) -> FormErrors {
    let mut errors = FormErrors::new();
    if draft.name.trim().is_empty() {
        errors.insert(Field::Name, "Name is required");
    }
    if draft.position.trim().is_empty() {
        errors.insert(Field::Position, "Position is required");
    }
    if draft.email.trim().is_empty() {
        errors.insert(Field::Email, "Email is required");
    } else if !EMAIL_SHAPE.is_match(&draft.email) {
        errors.insert(Field::Email, "Email is invalid");
    }
    errors
}

pub struct FormController {
    repo: Rc<dyn EmployeeRepository>,
    prompt: Rc<dyn Prompt>,
    editing: Option<EmployeeId>,
    draft: EmployeeDraft,
    errors: FormErrors,
    pending: bool,
}

impl FormController {
    /// Edit mode when `employee` is supplied, create mode otherwise.
    pub fn new(repo: Rc<dyn EmployeeRepository>, prompt: Rc<dyn Prompt>, employee: Option<&Employee>) -> Self {
        Self {
            repo,
            prompt,
            editing: employee.map(|e| e.id.clone()),
            draft: employee.map(Employee::draft).unwrap_or_default(),
            errors: FormErrors::new(),
            pending: false,
        }
    }

    pub fn is_edit_mode(&self) -> bool {
        self.editing.is_some()
    }

    pub fn variant(&self) -> ClientVariant {
        self.repo.variant()
    }

    pub fn draft(&self) -> &EmployeeDraft {
        &self.draft
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.draft.name,
            Field::Position => &self.draft.position,
            Field::Department => self.draft.department.as_str(),
            Field::Email => &self.draft.email,
        }
    }

    pub fn title(&self) -> &'static str {
        if self.is_edit_mode() {
            "Edit Employee"
        } else {
            "Add New Employee"
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match (self.pending, self.is_edit_mode()) {
            (true, _) => "Processing...",
            (false, true) => "Update Employee",
            (false, false) => "Add Employee",
        }
    }

    /// Departments outside the fixed set are refused and leave the draft as is.
    pub fn set_field(&mut self, field: Field, value: &str) -> Result<(), UnknownDepartment> {
        match field {
            Field::Name => self.draft.name = value.to_string(),
            Field::Position => self.draft.position = value.to_string(),
            Field::Department => self.draft.department = value.parse()?,
            Field::Email => self.draft.email = value.to_string(),
        }
        self.errors.remove(&field);
        Ok(())
    }

    pub fn set_department(&mut self, department: Department) {
        self.draft.department = department;
        self.errors.remove(&Field::Department);
    }

    pub fn validate(&self) -> FormErrors {
        validate(&self.draft)
    }

    pub fn submit(&mut self) -> Result<Employee, SubmitError> {
        let errors = self.validate();
        if !errors.is_empty() {
            self.errors = errors.clone();
            return Err(SubmitError::Invalid(errors));
        }
        self.errors.clear();

        self.pending = true;
        let result = match &self.editing {
            Some(id) => self.repo.update(id, &self.draft),
            None => self.repo.create(&self.draft),
        };
        self.pending = false;

        let (verb, past) = if self.is_edit_mode() { ("update", "updated") } else { ("add", "added") };
        match result {
            Ok(saved) => {
                self.prompt.notify(&format!("Employee {past} successfully!"));
                Ok(saved)
            }
            Err(err) => {
                error!(error = %err, "error saving employee");
                self.prompt.notify(&format!("Failed to {verb} employee. Please try again."));
                Err(SubmitError::Failed(err))
            }
        }
    }
}
