//! atelier-contact CLI
//!
//! Command-line tool for rendering, checking and submitting configured
//! contact forms.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use atelier_forms::{
    BoxError, Form, FormConfig, RelayClient, SubmissionStatus, SubmitError, SubmitStrategy,
};

/// Render, check and submit configured contact forms.
#[derive(Parser)]
#[command(name = "atelier-contact")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Relay endpoint; defaults to the hosted relay for the form's recipient.
    #[arg(short, long, env = "FORM_ACTION")]
    endpoint: Option<String>,

    /// Relay request timeout in seconds.
    #[arg(short, long, env = "FORM_RELAY_TIMEOUT_SECS", default_value_t = 30)]
    timeout_secs: u64,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the form's HTML.
    Render {
        /// Form configuration document.
        config: PathBuf,
    },

    /// Validate a configuration document and summarize its fields.
    Check {
        /// Form configuration document.
        config: PathBuf,
    },

    /// Fill in a form and submit it.
    Submit {
        /// Form configuration document.
        config: PathBuf,

        /// Field value as `name=value`; repeatable.
        #[arg(short, long = "field", value_parser = parse_field)]
        fields: Vec<(String, String)>,

        /// Print the values as JSON instead of sending them.
        #[arg(long)]
        dry_run: bool,
    },
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got {raw:?}"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing field name in {raw:?}"));
    }
    Ok((name.to_string(), value.to_string()))
}

fn load_config(path: &Path) -> anyhow::Result<FormConfig> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading form config {}", path.display()))?;
    FormConfig::from_json(&json).with_context(|| format!("parsing form config {}", path.display()))
}

fn dry_run_strategy() -> SubmitStrategy {
    SubmitStrategy::callback(|values| async move {
        let json = serde_json::to_string_pretty(&values)?;
        println!("{json}");
        Ok::<(), BoxError>(())
    })
}

fn relay_strategy(
    config: &FormConfig,
    endpoint: Option<&str>,
    timeout: Duration,
) -> anyhow::Result<SubmitStrategy> {
    let relay_config = config
        .relay_config(endpoint)
        .context("no relay endpoint: pass --endpoint or set emailTo in the form config")?
        .timeout(timeout);
    info!(endpoint = %relay_config.endpoint, "using form relay");
    Ok(SubmitStrategy::Relay(RelayClient::new(relay_config)?))
}

/// Feeds each value to the form as a change followed by a blur.
fn fill(form: &mut Form, fields: &[(String, String)]) {
    for (name, value) in fields {
        if !form.change(name, value.as_str()) {
            warn!(field = %name, "form has no such field, skipping");
            continue;
        }
        form.blur(name);
        if form.value(name) != value.as_str() {
            warn!(field = %name, value = %value, "value rejected by the field");
        }
    }
}

fn check(config: &FormConfig, endpoint: Option<&str>) {
    println!("\n{}", config.title);
    println!("{:-<60}", "");
    for field in config.sorted_fields() {
        let marker = if field.is_required { "*" } else { " " };
        println!(
            " [{marker}] {:<20} {:?} ({:?})",
            field.name, field.field_type, field.width
        );
    }
    println!();

    match config.relay_config(endpoint) {
        Ok(relay) => println!("Relay endpoint: {}", relay.endpoint),
        Err(_) => println!("Relay endpoint: none (pass --endpoint or set emailTo)"),
    }
}

async fn submit(mut form: Form, fields: &[(String, String)]) -> anyhow::Result<()> {
    fill(&mut form, fields);

    match form.submit().await {
        Ok(SubmissionStatus::Succeeded) => {
            println!("{}", form.settings().success_message);
            Ok(())
        }
        Ok(SubmissionStatus::Failed(message)) => bail!("submission failed: {message}"),
        Ok(other) => bail!("submission ended in unexpected state {other:?}"),
        Err(SubmitError::Invalid(errors)) => {
            for (field, message) in errors.all_errors() {
                eprintln!("  {field}: {message}");
            }
            bail!("form has {} invalid field(s)", errors.len())
        }
        Err(err) => Err(err.into()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let endpoint = cli.endpoint.as_deref();
    let timeout = Duration::from_secs(cli.timeout_secs);

    match cli.command {
        Commands::Render { config } => {
            let config = load_config(&config)?;
            let form = Form::from_config(&config, dry_run_strategy());
            println!("{}", form.render());
        }

        Commands::Check { config } => {
            let config = load_config(&config)?;
            check(&config, endpoint);
        }

        Commands::Submit {
            config,
            fields,
            dry_run,
        } => {
            let config = load_config(&config)?;
            let strategy = if dry_run {
                dry_run_strategy()
            } else {
                relay_strategy(&config, endpoint, timeout)?
            };
            submit(Form::from_config(&config, strategy), &fields).await?;
        }
    }

    Ok(())
}
