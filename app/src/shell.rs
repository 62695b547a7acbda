//! Top-level view state: which screen is showing, who is being edited and
//! which repository variant new controllers are built with.

use std::rc::Rc;

use employee_core::{connect, ApiError, ClientConfig, ClientVariant, Employee, EmployeeRepository};
use tracing::info;

use crate::form::FormController;
use crate::list::ListController;
use crate::prompt::Prompt;

/// Builds a repository for a variant; called once per constructed controller.
pub type RepositoryFactory = Box<dyn Fn(ClientVariant) -> Result<Rc<dyn EmployeeRepository>, ApiError>>;

/// Factory that connects to the remote store described by `config`.
pub fn remote_factory(config: ClientConfig) -> RepositoryFactory {
    Box::new(move |variant: ClientVariant| -> Result<Rc<dyn EmployeeRepository>, ApiError> {
        Ok(Rc::from(connect(&config, variant)?))
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    List,
    Form,
}

pub enum Screen {
    List(ListController),
    Form(FormController),
}

pub struct ViewShell {
    factory: RepositoryFactory,
    prompt: Rc<dyn Prompt>,
    variant: ClientVariant,
    selected: Option<Employee>,
    screen: Screen,
}

impl ViewShell {
    /// Opens on the list view and performs the initial load.
    pub fn new(factory: RepositoryFactory, prompt: Rc<dyn Prompt>, variant: ClientVariant) -> Result<Self, ApiError> {
        let mut list = ListController::new(factory(variant)?, prompt.clone());
        list.load();
        Ok(Self {
            factory,
            prompt,
            variant,
            selected: None,
            screen: Screen::List(list),
        })
    }

    pub fn current_view(&self) -> View {
        match self.screen {
            Screen::List(_) => View::List,
            Screen::Form(_) => View::Form,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn selected_employee(&self) -> Option<&Employee> {
        self.selected.as_ref()
    }

    pub fn active_variant(&self) -> ClientVariant {
        self.variant
    }

    pub fn header(&self) -> String {
        format!("Simple CRUD with {}", self.variant.as_str().to_uppercase())
    }

    pub fn list(&self) -> Option<&ListController> {
        match &self.screen {
            Screen::List(list) => Some(list),
            Screen::Form(_) => None,
        }
    }

    pub fn list_mut(&mut self) -> Option<&mut ListController> {
        match &mut self.screen {
            Screen::List(list) => Some(list),
            Screen::Form(_) => None,
        }
    }

    pub fn form(&self) -> Option<&FormController> {
        match &self.screen {
            Screen::Form(form) => Some(form),
            Screen::List(_) => None,
        }
    }

    pub fn form_mut(&mut self) -> Option<&mut FormController> {
        match &mut self.screen {
            Screen::Form(form) => Some(form),
            Screen::List(_) => None,
        }
    }

    pub fn show_add_form(&mut self) -> Result<(), ApiError> {
        self.open_form(None)
    }

    pub fn show_edit_form(&mut self, employee: Employee) -> Result<(), ApiError> {
        self.open_form(Some(employee))
    }

    /// Completion path for both form success and form cancel.
    pub fn return_to_list(&mut self) -> Result<(), ApiError> {
        self.screen = Screen::List(self.load_list(self.variant)?);
        Ok(())
    }

    /// Submits the open form. On success the shell is back on the list and
    /// the saved employee is returned; otherwise the form stays open.
    pub fn submit_form(&mut self) -> Result<Option<Employee>, ApiError> {
        let Some(form) = self.form_mut() else {
            return Ok(None);
        };
        match form.submit() {
            Ok(saved) => {
                self.return_to_list()?;
                Ok(Some(saved))
            }
            Err(_) => Ok(None),
        }
    }

    pub fn cancel_form(&mut self) -> Result<(), ApiError> {
        self.return_to_list()
    }

    /// Applies to controllers built from now on. The list view re-initializes
    /// right away; an open form keeps the repository it was built with. If the
    /// new repository cannot be built, nothing changes.
    pub fn set_variant(&mut self, variant: ClientVariant) -> Result<(), ApiError> {
        if variant == self.variant {
            return Ok(());
        }
        if self.current_view() == View::List {
            self.screen = Screen::List(self.load_list(variant)?);
        }
        info!(from = %self.variant, to = %variant, "switched client variant");
        self.variant = variant;
        Ok(())
    }

    fn load_list(&self, variant: ClientVariant) -> Result<ListController, ApiError> {
        let mut list = ListController::new((self.factory)(variant)?, self.prompt.clone());
        list.load();
        Ok(list)
    }

    fn open_form(&mut self, selected: Option<Employee>) -> Result<(), ApiError> {
        let repo = (self.factory)(self.variant)?;
        let form = FormController::new(repo, self.prompt.clone(), selected.as_ref());
        self.selected = selected;
        self.screen = Screen::Form(form);
        Ok(())
    }
}
