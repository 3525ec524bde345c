//! Load/save orchestration for the application form page.
//!
//! In edit mode the page loads the existing record once at start-up and
//! locks the application number. Saving validates the form, then creates or
//! updates the record and routes the result to navigation or the error
//! dialog.

use chrono::{DateTime, Utc};
use loan_core::validation::ValidationError;
use loan_core::{ApiError, Application};
use tracing::{error, info, warn};

use crate::collaborators::Collaborators;
use crate::config::FormConfig;
use crate::form::{ApplicationForm, Field, InvalidForm};

/// Query parameters the page is opened with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteQuery {
    pub app_number: Option<String>,
}

impl RouteQuery {
    pub fn edit(app_number: impl Into<String>) -> Self {
        Self {
            app_number: Some(app_number.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { application_number: String },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    LoadFailed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmitState {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

/// What a call to [`ApplicationFormPage::save`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Rejected before any network call.
    Invalid(InvalidForm),
    Created(Application),
    Updated(Application),
    /// The API call failed; the error dialog has been shown.
    Failed(ApiError),
}

impl SaveOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Created(_) | Self::Updated(_))
    }
}

pub struct ApplicationFormPage {
    form: ApplicationForm,
    mode: FormMode,
    load_state: LoadState,
    submit_state: SubmitState,
    loaded_date_applied: Option<DateTime<Utc>>,
    initialised: bool,
    collaborators: Collaborators,
    config: FormConfig,
}

impl ApplicationFormPage {
    pub fn new(
        collaborators: Collaborators,
        config: FormConfig,
    ) -> Self {
        Self {
            form: ApplicationForm::new(config.clone()),
            mode: FormMode::Create,
            load_state: LoadState::Idle,
            submit_state: SubmitState::Idle,
            loaded_date_applied: None,
            initialised: false,
            collaborators,
            config,
        }
    }

    pub fn form(&self) -> &ApplicationForm {
        &self.form
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    pub fn submit_state(&self) -> SubmitState {
        self.submit_state
    }

    /// Reads the route query. With an `app_number` the page switches to
    /// edit mode and loads that application.
    ///
    /// Only the first call has any effect.
    pub async fn init(
        &mut self,
        query: RouteQuery,
    ) {
        if self.initialised {
            warn!("form page already initialised");
            return;
        }
        self.initialised = true;

        let Some(number) = query.app_number else {
            info!("opening empty application form");
            return;
        };

        self.mode = FormMode::Edit {
            application_number: number.clone(),
        };
        self.load(&number).await;
    }

    async fn load(
        &mut self,
        application_number: &str,
    ) {
        self.load_state = LoadState::Loading;
        info!(number = %application_number, "loading application");

        match self
            .collaborators
            .api
            .get_application(application_number)
            .await
        {
            Ok(application) => {
                self.form.populate(&application);
                self.form.disable(Field::ApplicationNumber);
                self.loaded_date_applied = Some(application.date_applied);
                self.load_state = LoadState::Loaded;
            }
            Err(err) => {
                error!(number = %application_number, error = %err, "failed to load application");
                self.collaborators.errors.show_error_dialog(&err);
                self.load_state = LoadState::LoadFailed;
            }
        }
    }

    pub fn set_field(
        &mut self,
        field: Field,
        value: impl Into<String>,
    ) -> bool {
        self.form.set_field(field, value)
    }

    pub fn blur(
        &mut self,
        field: Field,
    ) -> Vec<ValidationError> {
        self.form.blur(field)
    }

    /// Validates and submits the form.
    ///
    /// Invalid input marks every field touched and makes no API call. API
    /// failures are shown through the error dialog and leave the form as it
    /// was, so the user can fix things and save again.
    pub async fn save(&mut self) -> SaveOutcome {
        let date_applied = match &self.mode {
            FormMode::Create => Utc::now(),
            FormMode::Edit { .. } => self.loaded_date_applied.unwrap_or_else(Utc::now),
        };

        let application = match self.form.to_application(date_applied) {
            Ok(application) => application,
            Err(invalid) => {
                warn!(%invalid, "submit blocked by validation");
                self.form.mark_all_touched();
                return SaveOutcome::Invalid(invalid);
            }
        };

        self.submit_state = SubmitState::Submitting;
        let api = &self.collaborators.api;
        let (result, success_text) = match &self.mode {
            FormMode::Create => {
                info!(number = %application.application_number, "creating application");
                (api.create_application(&application).await, "Created successfully")
            }
            FormMode::Edit { application_number } => {
                info!(number = %application_number, "updating application");
                (
                    api.update_application(application_number, &application)
                        .await,
                    "Saved successfully",
                )
            }
        };

        match result {
            Ok(saved) => {
                self.submit_state = SubmitState::Succeeded;
                self.collaborators
                    .notifier
                    .show_transient_message(success_text, "OK");
                self.collaborators
                    .navigator
                    .navigate_to(&self.config.list_route);
                match self.mode {
                    FormMode::Create => SaveOutcome::Created(saved),
                    FormMode::Edit { .. } => SaveOutcome::Updated(saved),
                }
            }
            Err(err) => {
                error!(error = %err, "failed to save application");
                self.submit_state = SubmitState::Failed;
                self.collaborators.errors.show_error_dialog(&err);
                SaveOutcome::Failed(err)
            }
        }
    }
}
