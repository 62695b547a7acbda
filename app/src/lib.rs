//! Controllers and terminal front end for the employee CRUD API.
//!
//! # Overview
//! - [`list::ListController`] loads, searches and deletes.
//! - [`form::FormController`] edits one draft, validates and submits it.
//! - [`shell::ViewShell`] switches between them and owns the active client
//!   variant.
//!
//! Confirmation and notification dialogs are injected through
//! [`prompt::Prompt`], so every controller runs without a terminal.

pub mod cli;
pub mod form;
pub mod list;
pub mod prompt;
pub mod render;
pub mod repl;
pub mod shell;

#[cfg(test)]
pub(crate) mod testing;

pub use form::{Field, FormController, FormErrors, SubmitError};
pub use list::{DeleteOutcome, ListController, ListState};
pub use prompt::{Prompt, TerminalPrompt};
pub use shell::{RepositoryFactory, View, ViewShell};
