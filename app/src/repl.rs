//! Line-oriented terminal front end over [`ViewShell`].

use std::io::{BufRead, Write};

use employee_core::{ApiError, ClientVariant, EmployeeId, UnknownVariant};
use thiserror::Error;
use tracing::error;

use crate::form::{Field, UnknownField};
use crate::list::DeleteOutcome;
use crate::render::{render_form, render_list};
use crate::shell::{Screen, ViewShell};

pub const HELP: &str = "\
list                     reload the employee list
search <term>            search by name, position, department or email
clear                    clear the search and reload
add                      open an empty form
edit <id>                edit an employee from the list
delete <id>              delete an employee (asks first)
retry                    retry a failed load
variant <wrapped|fetch>  switch HTTP client
set <field> <value>      (form) set name, position, department or email
submit | cancel          (form) save or go back
help | quit
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Search(String),
    Clear,
    Add,
    Edit(EmployeeId),
    Delete(EmployeeId),
    Retry,
    Variant(ClientVariant),
    Set(Field, String),
    Submit,
    Cancel,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command `{0}`; type `help`")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error(transparent)]
    Field(#[from] UnknownField),
    #[error(transparent)]
    Variant(#[from] UnknownVariant),
}

impl Command {
    /// `Ok(None)` for a blank line.
    pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let arg = |name: &'static str| {
            if rest.is_empty() {
                Err(CommandError::MissingArgument(name))
            } else {
                Ok(rest)
            }
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "list" | "refresh" => Command::List,
            // A bare `search` falls back to the full list.
            "search" => Command::Search(rest.to_string()),
            "clear" => Command::Clear,
            "add" => Command::Add,
            "edit" => Command::Edit(EmployeeId::new(arg("edit")?)),
            "delete" | "rm" => Command::Delete(EmployeeId::new(arg("delete")?)),
            "retry" => Command::Retry,
            "variant" => Command::Variant(arg("variant")?.parse()?),
            "set" => {
                let (field, value) = arg("set")?
                    .split_once(char::is_whitespace)
                    .map(|(f, v)| (f, v.trim()))
                    .unwrap_or((rest, ""));
                Command::Set(field.parse()?, value.to_string())
            }
            "submit" | "save" => Command::Submit,
            "cancel" | "back" => Command::Cancel,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}

/// Read commands from `input` until `quit` or end of input.
pub fn run<R: BufRead, W: Write>(shell: &mut ViewShell, mut input: R, mut out: W) -> anyhow::Result<()> {
    writeln!(out, "Employee Management: {}", shell.header())?;
    write!(out, "{}", render(shell))?;

    let mut line = String::new();
    loop {
        write!(out, "> ")?;
        out.flush()?;
        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                writeln!(out, "{err}")?;
                continue;
            }
        };
        if command == Command::Quit {
            break;
        }
        if let Some(message) = execute(shell, command) {
            writeln!(out, "{message}")?;
        }
        write!(out, "{}", render(shell))?;
    }
    Ok(())
}

fn render(shell: &ViewShell) -> String {
    match shell.screen() {
        Screen::List(list) => render_list(list.state()),
        Screen::Form(form) => render_form(form),
    }
}

/// Apply one command; the returned line, if any, is shown above the view.
/// Failures to build a repository are reported here and leave the shell as it was.
pub fn execute(shell: &mut ViewShell, command: Command) -> Option<String> {
    match command {
        Command::Help => Some(HELP.trim_end().to_string()),
        Command::Variant(variant) => match shell.set_variant(variant) {
            Ok(()) => Some(shell.header()),
            Err(err) => report(err),
        },
        Command::Add => shell.show_add_form().err().and_then(report),
        Command::Cancel => match shell.form() {
            Some(_) => shell.cancel_form().err().and_then(report),
            None => Some("no form is open".to_string()),
        },
        Command::Submit => {
            if shell.form().is_none() {
                Some("no form is open".to_string())
            } else {
                shell.submit_form().err().and_then(report)
            }
        }
        Command::Set(field, value) => match shell.form_mut() {
            Some(form) => form.set_field(field, &value).err().map(|e| e.to_string()),
            None => Some("`set` only works in the form; use `add` or `edit <id>`".to_string()),
        },
        Command::Edit(id) => {
            let found = shell.list().and_then(|list| list.find(&id)).cloned();
            match found {
                Some(employee) => shell.show_edit_form(employee).err().and_then(report),
                None => Some(format!("no employee with id {id} in the current list")),
            }
        }
        list_command => match shell.list_mut() {
            Some(list) => match list_command {
                Command::List => {
                    list.refresh();
                    None
                }
                Command::Search(term) => {
                    list.search(&term);
                    None
                }
                Command::Clear => {
                    list.clear_search();
                    None
                }
                Command::Retry => (!list.retry()).then(|| "nothing to retry".to_string()),
                Command::Delete(id) => match list.delete_employee(&id) {
                    DeleteOutcome::Deleted => Some(format!("deleted {id}")),
                    DeleteOutcome::Cancelled | DeleteOutcome::Failed(_) => None,
                },
                _ => None,
            },
            None => Some("finish or cancel the form first".to_string()),
        },
    }
}

fn report(err: ApiError) -> Option<String> {
    error!(error = %err, "command failed");
    Some(format!("Error! {err}"))
}
