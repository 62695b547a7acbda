//! In-memory collaborators for controller tests.

use std::cell::{Cell, RefCell};

use employee_core::{
    ApiError, ClientVariant, Department, Employee, EmployeeDraft, EmployeeId, EmployeeRepository,
};

use crate::prompt::Prompt;

/// Repository over a `Vec`, with a switch to make every call fail.
pub struct FakeRepository {
    variant: ClientVariant,
    employees: RefCell<Vec<Employee>>,
    next_id: Cell<u32>,
    failing: Cell<bool>,
    calls: RefCell<Vec<&'static str>>,
}

impl FakeRepository {
    pub fn new(variant: ClientVariant) -> Self {
        Self {
            variant,
            employees: RefCell::new(Vec::new()),
            next_id: Cell::new(1),
            failing: Cell::new(false),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn with_employees(variant: ClientVariant, employees: Vec<Employee>) -> Self {
        let repo = Self::new(variant);
        repo.next_id.set(employees.len() as u32 + 1);
        *repo.employees.borrow_mut() = employees;
        repo
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.borrow().clone()
    }

    pub fn stored(&self) -> Vec<Employee> {
        self.employees.borrow().clone()
    }

    fn enter(&self, op: &'static str) -> Result<(), ApiError> {
        self.calls.borrow_mut().push(op);
        if self.failing.get() {
            Err(ApiError::Transport("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

impl EmployeeRepository for FakeRepository {
    fn variant(&self) -> ClientVariant {
        self.variant
    }

    fn get_all(&self) -> Result<Vec<Employee>, ApiError> {
        self.enter("get_all")?;
        Ok(self.stored())
    }

    fn get_by_id(&self, id: &EmployeeId) -> Result<Employee, ApiError> {
        self.enter("get_by_id")?;
        self.employees
            .borrow()
            .iter()
            .find(|e| &e.id == id)
            .cloned()
            .ok_or(ApiError::NotFound)
    }

    fn search(&self, query: &str) -> Result<Vec<Employee>, ApiError> {
        self.enter("search")?;
        let needle = query.to_lowercase();
        Ok(self
            .employees
            .borrow()
            .iter()
            .filter(|e| {
                [e.name.as_str(), e.position.as_str(), e.department.as_str(), e.email.as_str()]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect())
    }

    fn create(&self, draft: &EmployeeDraft) -> Result<Employee, ApiError> {
        self.enter("create")?;
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let employee = draft.clone().with_id(EmployeeId::new(id.to_string()));
        self.employees.borrow_mut().push(employee.clone());
        Ok(employee)
    }

    fn update(&self, id: &EmployeeId, draft: &EmployeeDraft) -> Result<Employee, ApiError> {
        self.enter("update")?;
        let mut employees = self.employees.borrow_mut();
        let slot = employees.iter_mut().find(|e| &e.id == id).ok_or(ApiError::NotFound)?;
        *slot = draft.clone().with_id(id.clone());
        Ok(slot.clone())
    }

    fn delete(&self, id: &EmployeeId) -> Result<(), ApiError> {
        self.enter("delete")?;
        let mut employees = self.employees.borrow_mut();
        let index = employees.iter().position(|e| &e.id == id).ok_or(ApiError::NotFound)?;
        employees.remove(index);
        Ok(())
    }
}

/// Prompt that answers confirmations with a fixed reply and records everything.
#[derive(Default)]
pub struct RecordingPrompt {
    answer: Cell<bool>,
    pub questions: RefCell<Vec<String>>,
    pub notices: RefCell<Vec<String>>,
}

impl RecordingPrompt {
    pub fn answering(answer: bool) -> Self {
        let prompt = Self::default();
        prompt.answer.set(answer);
        prompt
    }

    pub fn notices(&self) -> Vec<String> {
        self.notices.borrow().clone()
    }
}

impl Prompt for RecordingPrompt {
    fn confirm(&self, message: &str) -> bool {
        self.questions.borrow_mut().push(message.to_string());
        self.answer.get()
    }

    fn notify(&self, message: &str) {
        self.notices.borrow_mut().push(message.to_string());
    }
}

pub fn employee(id: &str, name: &str, department: Department) -> Employee {
    Employee {
        id: EmployeeId::new(id),
        name: name.to_string(),
        position: "Developer".to_string(),
        department,
        email: format!("{}@example.com", name.to_lowercase()),
    }
}
