pub mod collaborators;
pub mod config;
pub mod console;
pub mod controller;
pub mod form;
pub mod logging;

pub use collaborators::{Collaborators, ErrorSurface, Navigator, Notifier};
pub use config::FormConfig;
pub use controller::{ApplicationFormPage, FormMode, LoadState, RouteQuery, SaveOutcome, SubmitState};
pub use form::{ApplicationForm, Field, FieldState, InvalidForm};
