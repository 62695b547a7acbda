//! Request lifecycle log lines emitted by both repository variants.

use std::io;
use std::sync::{Arc, Mutex};

use employee_core::{connect, ApiError, ClientConfig, ClientVariant, EmployeeId};

mod common;

use common::spawn_server;

/// In-memory writer handed to the fmt subscriber.
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Captured {
    fn lines(&self) -> Vec<String> {
        let bytes = self.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap().lines().map(str::to_string).collect()
    }
}

#[test]
fn not_found_and_unauthorized_are_logged_per_variant() {
    let open = spawn_server(mock_server::app());
    let guarded = spawn_server(mock_server::app_with_token("s3cret"));

    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::INFO)
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        for variant in [ClientVariant::Wrapped, ClientVariant::Fetch] {
            let repo = connect(&ClientConfig::new(&open), variant).unwrap();
            assert_eq!(repo.get_by_id(&EmployeeId::new("missing")).unwrap_err(), ApiError::NotFound);

            let repo = connect(&ClientConfig::new(&guarded), variant).unwrap();
            assert_eq!(repo.get_all().unwrap_err(), ApiError::Unauthorized);
        }
    });

    let lines = captured.lines();
    for variant in ["wrapped", "fetch"] {
        let tag = format!("variant={variant}");
        for message in [
            "sending request",
            "received response",
            "resource not found",
            "unauthorized, please log in again",
        ] {
            assert!(
                lines.iter().any(|line| line.contains(message) && line.contains(&tag)),
                "no `{message}` line for {variant} in:\n{}",
                lines.join("\n")
            );
        }
    }

    // The 404 warning names the missing item, not the 401 collection call.
    assert!(lines
        .iter()
        .any(|line| line.contains("resource not found") && line.contains("/employees/missing")));
}
