//! bfhl-service — entry point.
//!
//! Startup sequence:
//!   1. Load .env (if present)
//!   2. Parse CLI flags
//!   3. Load config
//!   4. Resolve log level source (`-v` flags, else RUST_LOG / config)
//!   5. Init logger once
//!   6. Build AI gateway + dispatcher
//!   7. Spawn Ctrl-C → shutdown signal watcher
//!   8. Serve HTTP until shutdown

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::info;

use bfhl_service::bfhl::Dispatcher;
use bfhl_service::config;
use bfhl_service::error::AppError;
use bfhl_service::http::{self, HttpState};
use bfhl_service::llm::AiGateway;
use bfhl_service::logger::{self, LevelSource};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    // Load .env if present — ignore errors (file is optional).
    let _ = dotenvy::dotenv();

    let args = parse_cli_args();

    let config = config::load(args.config_path.as_deref())?;

    let level_source = match logger::verbosity_level(args.verbosity) {
        Some(level) => LevelSource::Flags(level),
        None => LevelSource::Configured(&config.server.log_level),
    };
    logger::init(level_source)?;

    info!(
        bind = %config.server.bind_addr(),
        official_email = %config.server.official_email,
        ai_provider = %config.ai.provider,
        ai_models = %config.ai.models.join(","),
        ai_key_present = config.ai_api_key.is_some(),
        verbosity = args.verbosity,
        config_log_level = %config.server.log_level,
        "config loaded"
    );

    let gateway = Arc::new(AiGateway::new(config.ai.clone(), config.ai_api_key.clone()));
    let dispatcher = Arc::new(Dispatcher::new(config.server.official_email.clone(), gateway));
    let router = http::build_router(HttpState { dispatcher }, config.server.body_limit_bytes);

    // Ctrl-C handler — cancels the token so the server drains and exits.
    let shutdown = CancellationToken::new();
    let ctrlc_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("ctrl-c received — initiating shutdown");
            ctrlc_token.cancel();
        }
    });

    http::serve(&config.server.bind_addr(), router, shutdown).await
}

struct CliArgs {
    verbosity: u8,
    config_path: Option<String>,
}

fn parse_cli_args() -> CliArgs {
    let mut verbosity = 0u8;
    let mut config_path = None;

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        if arg == "--" {
            break;
        }

        match arg.as_str() {
            "-h" | "--help" => {
                println!("Usage: bfhl-service [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -h, --help                 Print help");
                println!("  -f, --config <PATH>        Path to configuration file (default: config/default.toml)");
                println!("  -v, -vv, -vvv, -vvvv       Increase logging verbosity");
                std::process::exit(0);
            }
            "-f" | "--config" => {
                if let Some(path) = iter.next() {
                    config_path = Some(path);
                } else {
                    eprintln!("error: -f/--config requires a path argument");
                    std::process::exit(1);
                }
            }
            "--verbose" => verbosity = verbosity.saturating_add(1),
            a if a.starts_with('-') && a.len() > 1 && a.chars().skip(1).all(|c| c == 'v') => {
                verbosity = verbosity.saturating_add((a.len() - 1) as u8);
            }
            other => eprintln!("warning: ignoring unknown argument '{other}'"),
        }
    }

    CliArgs { verbosity, config_path }
}
