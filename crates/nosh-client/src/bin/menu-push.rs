//! Validates a menu schema document and pushes it to the remote API.
//!
//! Usage:
//! ```text
//! menu-push <restaurant-id> <schema.json> [--dry-run] [--config <path>]
//! ```
//!
//! Validation runs over the whole document before any network call; a schema
//! with field errors is reported and never leaves the machine. `--dry-run`
//! renders the document as text instead of submitting it.

use std::path::PathBuf;
use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use nosh_builder::render::render_schema;
use nosh_client::{ClientConfig, ClientError, MenuApiClient};
use nosh_core::menu::BuilderSchema;
use nosh_core::validation::validate_schema;

struct Args {
    restaurant_id: String,
    schema_path: PathBuf,
    dry_run: bool,
    config_path: Option<PathBuf>,
}

fn parse_args() -> Result<Args, String> {
    let mut positional = Vec::new();
    let mut dry_run = false;
    let mut config_path = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--dry-run" => dry_run = true,
            "--config" => {
                let path = args
                    .next()
                    .ok_or_else(|| "--config requires a path".to_string())?;
                config_path = Some(PathBuf::from(path));
            }
            "--help" | "-h" => {
                return Err(
                    "Usage: menu-push <restaurant-id> <schema.json> [--dry-run] [--config <path>]"
                        .to_string(),
                );
            }
            other if other.starts_with('-') => {
                return Err(format!("Unknown flag: {}", other));
            }
            other => positional.push(other.to_string()),
        }
    }

    if positional.len() != 2 {
        return Err(
            "Usage: menu-push <restaurant-id> <schema.json> [--dry-run] [--config <path>]"
                .to_string(),
        );
    }

    let schema_path = PathBuf::from(positional.pop().unwrap_or_default());
    let restaurant_id = positional.pop().unwrap_or_default();

    Ok(Args {
        restaurant_id,
        schema_path,
        dry_run,
        config_path,
    })
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{}", msg);
            return ExitCode::from(2);
        }
    };

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match &e {
                ClientError::Api(fault) => {
                    error!(
                        status = fault.status,
                        key = %fault.translation_key,
                        "submission rejected: {}",
                        fault.message
                    );
                }
                other => error!("{}", other),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), ClientError> {
    let raw =
        std::fs::read_to_string(&args.schema_path).map_err(|source| ClientError::SchemaFile {
            path: args.schema_path.display().to_string(),
            source,
        })?;
    let schema: BuilderSchema = serde_json::from_str(&raw)
        .map_err(|e| ClientError::UnexpectedBody(format!("schema file: {}", e)))?;

    // Whole-document validation happens before anything touches the network
    if let Err(errors) = validate_schema(&schema) {
        error!(count = errors.len(), "schema failed validation");
        for err in &errors {
            eprintln!("  {}: {}", err.field(), err);
        }
        return Err(ClientError::SchemaInvalid(errors.len()));
    }

    if args.dry_run {
        info!("dry run, rendering document instead of submitting");
        println!("{}", render_schema(&schema));
        return Ok(());
    }

    let config = ClientConfig::load(args.config_path)?;
    let client = MenuApiClient::new(&config)?;

    info!(
        restaurant = %args.restaurant_id,
        groups = schema.menu.len(),
        "submitting menu document"
    );
    client.submit_menu(&args.restaurant_id, &schema).await?;
    info!("menu submitted");

    Ok(())
}
