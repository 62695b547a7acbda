//! User-prompt collaborators injected into the controllers.

use std::io::{self, BufRead, Write};

/// Yes/no questions and fire-and-forget notices.
pub trait Prompt {
    fn confirm(&self, message: &str) -> bool;
    fn notify(&self, message: &str);
}

/// Prompt on the process's stdin/stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn confirm(&self, message: &str) -> bool {
        let mut stdout = io::stdout().lock();
        if write!(stdout, "{message} [y/N] ").and_then(|_| stdout.flush()).is_err() {
            return false;
        }
        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_yes(&answer),
            Err(_) => false,
        }
    }

    fn notify(&self, message: &str) {
        println!("{message}");
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_explicit_yes_confirms() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
        assert!(!is_yes(""));
        assert!(!is_yes("n"));
        assert!(!is_yes("sure"));
    }
}
