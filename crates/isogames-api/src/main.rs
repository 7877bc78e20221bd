//! ISO Standards Games API server entry point.

use std::process::ExitCode;

use isogames_api::config::{LogFormat, ServerConfig};
use isogames_api::error::AppError;
use isogames_api::{reload, server, telemetry};

#[tokio::main]
async fn main() -> ExitCode {
    let log_format = match LogFormat::from_env() {
        Ok(format) => format,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };
    telemetry::init(log_format);

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "ISO Standards Games API server failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), AppError> {
    let config = ServerConfig::from_env()?;

    if config.reload && !reload::is_worker() {
        tracing::info!("Starting ISO Standards Games API reload supervisor");
        reload::supervise(&config).await
    } else {
        tracing::info!("Starting ISO Standards Games API server");
        server::run(&config).await
    }
}
