//! Services the form page calls out to but does not own.

use std::sync::Arc;

use loan_core::{ApiError, ApplicationApi};

pub trait Navigator: Send + Sync {
    fn navigate_to(&self, path: &str);
}

/// Short-lived message with a dismiss action (a snackbar).
pub trait Notifier: Send + Sync {
    fn show_transient_message(&self, text: &str, action_label: &str);
}

/// Modal dialog for failed API calls.
pub trait ErrorSurface: Send + Sync {
    fn show_error_dialog(&self, error: &ApiError);
}

/// Everything the page needs from its host, passed in at construction.
#[derive(Clone)]
pub struct Collaborators {
    pub api: Arc<dyn ApplicationApi>,
    pub navigator: Arc<dyn Navigator>,
    pub notifier: Arc<dyn Notifier>,
    pub errors: Arc<dyn ErrorSurface>,
}
