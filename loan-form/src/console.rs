//! Terminal stand-ins for the page's navigation, snackbar and dialog.

use std::sync::Mutex;

use loan_core::ApiError;
use tracing::info;

use crate::collaborators::{ErrorSurface, Navigator, Notifier};

/// Remembers the last route so the host can act on it after a save.
#[derive(Debug, Default)]
pub struct ConsoleNavigator {
    current: Mutex<Option<String>>,
}

impl ConsoleNavigator {
    pub fn current_route(&self) -> Option<String> {
        self.current
            .lock()
            .map(|route| route.clone())
            .unwrap_or_default()
    }
}

impl Navigator for ConsoleNavigator {
    fn navigate_to(&self, path: &str) {
        info!(path, "navigating");
        if let Ok(mut current) = self.current.lock() {
            *current = Some(path.to_string());
        }
    }
}

#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn show_transient_message(&self, text: &str, action_label: &str) {
        println!("{text}  [{action_label}]");
    }
}

#[derive(Debug, Default)]
pub struct ConsoleErrorDialog;

impl ErrorSurface for ConsoleErrorDialog {
    fn show_error_dialog(&self, error: &ApiError) {
        eprintln!("+-- Error ---------------------------------------");
        eprintln!("| {error}");
        eprintln!("+------------------------------------------------");
    }
}
