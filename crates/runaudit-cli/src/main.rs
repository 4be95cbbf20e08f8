use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use runaudit_cli::{assemble, PipelineError};
use runaudit_core::{Config, RetryPolicy};
use runaudit_provenance::PgOwnerStore;
use runaudit_sink::{create_sink, with_retry};

#[derive(Parser, Debug)]
#[command(
    name = "runaudit",
    version,
    about = "Emit one audit record for the current workflow task run"
)]
struct Cli {
    /// Local .env file loaded before the environment is read.
    #[arg(long, default_value = ".env")]
    env_file: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .init();

    if dotenvy::from_path(&cli.env_file).is_ok() {
        tracing::info!(path = %cli.env_file.display(), "local env file loaded");
    }

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(stage = "collection", error = %err, "audit pipeline failed");
            return ExitCode::FAILURE;
        }
    };

    match run(&config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(stage = err.stage(), error = %err, "audit pipeline failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: &Config) -> Result<(), PipelineError> {
    let store = PgOwnerStore::new(config.airflow_db_url.clone());
    let record = assemble(config, store).await?;

    let sink = create_sink(&config.sink);
    with_retry(&RetryPolicy::default(), || sink.deliver(&record)).await?;

    tracing::info!(
        dag_id = %record.dag_id,
        run_id = %record.run_id,
        "audit record delivered"
    );
    Ok(())
}
