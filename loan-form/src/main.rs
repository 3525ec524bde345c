use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::Parser;
use loan_api_memory::MemoryApiFactory;
use loan_core::api::{ApiClientRegistry, ApiConfig};
use loan_core::calculations::format_payment;
use loan_form::console::{ConsoleErrorDialog, ConsoleNavigator, ConsoleNotifier};
use loan_form::logging::{self, LoggingOptions};
use loan_form::{ApplicationFormPage, Collaborators, Field, FormConfig, RouteQuery, SaveOutcome};
use rust_decimal::Decimal;
use tracing::{debug, info};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Create or edit a loan application from the command line.
///
/// Opens the application form (in edit mode when `--app-number` is given),
/// applies each `--set` in order as if typed by the user, then saves.
#[derive(Debug, Parser)]
#[command(name = "loan-form", version)]
struct Cli {
    /// API backend to use.
    #[arg(long, default_value = "memory")]
    backend: String,

    /// CSV file to seed the in-memory backend with.
    #[arg(long)]
    seed: Option<PathBuf>,

    /// Application number to edit; omit to create a new application.
    #[arg(long)]
    app_number: Option<String>,

    /// Field edit such as `firstName=Ada` or `terms=12`. Repeatable.
    #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
    assignments: Vec<(Field, String)>,

    /// Let an empty phone number skip the ten-digit check.
    #[arg(long)]
    allow_empty_phone: bool,

    /// Log level or filter directive (overridden by `RUST_LOG`).
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Also append logs to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print every stored application after saving.
    #[arg(long)]
    list: bool,
}

fn parse_assignment(s: &str) -> Result<(Field, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{s}'"))?;
    let field = name.parse::<Field>().map_err(|e| e.to_string())?;
    Ok((field, value.to_string()))
}

fn payment_cell(payment: Option<Decimal>) -> String {
    payment.map(format_payment).unwrap_or_else(|| "-".to_string())
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init_logging(&LoggingOptions {
        level: cli.log_level.clone(),
        log_file: cli.log_file.clone(),
    })?;

    let api_config = ApiConfig::new(
        cli.backend.as_str(),
        cli.seed
            .as_ref()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default(),
    );

    debug!("connecting to {} backend", api_config.backend);
    let mut registry = ApiClientRegistry::new();
    registry.register(Box::new(MemoryApiFactory))?;
    let api: Arc<dyn loan_core::ApplicationApi> = Arc::from(
        registry
            .create(&api_config)
            .await
            .with_context(|| format!("cannot start '{}' backend", api_config.backend))?,
    );

    let navigator = Arc::new(ConsoleNavigator::default());
    let collaborators = Collaborators {
        api: api.clone(),
        navigator: navigator.clone(),
        notifier: Arc::new(ConsoleNotifier),
        errors: Arc::new(ConsoleErrorDialog),
    };
    let config = FormConfig {
        allow_empty_phone: cli.allow_empty_phone,
        ..FormConfig::default()
    };

    let mut page = ApplicationFormPage::new(collaborators, config);
    page.init(RouteQuery {
        app_number: cli.app_number.clone(),
    })
    .await;

    for (field, value) in &cli.assignments {
        if !page.set_field(*field, value.as_str()) {
            bail!("field '{field}' is read-only");
        }
    }

    match page.save().await {
        SaveOutcome::Invalid(invalid) => {
            for (field, err) in &invalid.0 {
                eprintln!("{field}: {err}");
            }
            bail!("application not saved: {invalid}");
        }
        SaveOutcome::Failed(err) => bail!("application not saved: {err}"),
        SaveOutcome::Created(app) | SaveOutcome::Updated(app) => {
            info!(
                number = %app.application_number,
                route = ?navigator.current_route(),
                "application saved"
            );
        }
    }

    if cli.list {
        for app in api.list_applications().await? {
            let payment = payment_cell(app.loan_terms.monthly_payment_amount);
            println!(
                "{:<10} {:<24} status {}  {} over {} months ({} / month)",
                app.application_number,
                app.applicant_name(),
                app.status,
                app.loan_terms.amount,
                app.loan_terms.term,
                payment
            );
        }
    }

    Ok(())
}
