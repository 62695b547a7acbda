//! Plain-text rendering of the list and form views.

use std::fmt::Write;

use employee_core::Employee;

use crate::form::{Field, FormController};
use crate::list::ListState;

pub fn render_list(state: &ListState) -> String {
    match state {
        ListState::Loading => "Loading employees...\n".to_string(),
        ListState::Failed(message) => format!("Error! {message}\nType `retry` to try again.\n"),
        ListState::Ready { employees, search_term } if employees.is_empty() => {
            let hint = if search_term.is_empty() {
                "Add your first employee!"
            } else {
                "Try a different search term"
            };
            format!("No employees found\n{hint}\n")
        }
        ListState::Ready { employees, search_term } => {
            let mut out = String::new();
            if !search_term.is_empty() {
                let _ = writeln!(out, "Results for \"{search_term}\" (`clear` to show all)");
            }
            for employee in employees {
                out.push_str(&render_card(employee));
            }
            out
        }
    }
}

pub fn render_card(employee: &Employee) -> String {
    format!(
        "{} [{}]\n  position: {}\n  email:    {}\n  id:       {}\n",
        employee.name, employee.department, employee.position, employee.email, employee.id
    )
}

pub fn render_form(form: &FormController) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} (using {})", form.title(), form.variant().as_str().to_uppercase());
    for field in Field::ALL {
        let _ = writeln!(out, "  {:<14} {}", format!("{}:", field.label()), form.value(field));
        if let Some(message) = form.errors().get(&field) {
            let _ = writeln!(out, "  {:<14} ! {message}", "");
        }
    }
    let _ = writeln!(out, "[{}]  `submit` or `cancel`", form.submit_label());
    out
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use employee_core::{ClientVariant, Department};

    use super::*;
    use crate::testing::{employee, FakeRepository, RecordingPrompt};

    #[test]
    fn loading_and_failed() {
        assert_eq!(render_list(&ListState::Loading), "Loading employees...\n");
        let failed = render_list(&ListState::Failed("boom".to_string()));
        assert!(failed.contains("boom"));
        assert!(failed.contains("retry"));
    }

    #[test]
    fn empty_list_prompts_to_add() {
        let out = render_list(&ListState::Ready {
            employees: Vec::new(),
            search_term: String::new(),
        });
        assert_eq!(out, "No employees found\nAdd your first employee!\n");
    }

    #[test]
    fn empty_search_suggests_another_term() {
        let out = render_list(&ListState::Ready {
            employees: Vec::new(),
            search_term: "zed".to_string(),
        });
        assert!(out.contains("Try a different search term"));
    }

    #[test]
    fn cards_show_every_field() {
        let ann = employee("7", "Ann", Department::Hr);
        let out = render_list(&ListState::Ready {
            employees: vec![ann],
            search_term: String::new(),
        });
        assert!(out.starts_with("Ann [HR]\n"));
        assert!(out.contains("ann@example.com"));
        assert!(out.contains("id:       7"));
    }

    #[test]
    fn form_shows_inline_errors() {
        let repo = Rc::new(FakeRepository::new(ClientVariant::Fetch));
        let mut form = FormController::new(repo, Rc::new(RecordingPrompt::default()), None);
        let _ = form.submit();
        let out = render_form(&form);
        assert!(out.starts_with("Add New Employee (using FETCH)\n"));
        assert!(out.contains("! Name is required"));
        assert!(out.contains("Engineering"));
        assert!(out.contains("[Add Employee]"));
    }
}
