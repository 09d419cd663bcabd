use clap::Parser;
use colored::*;
use std::{env, net::SocketAddr, path::PathBuf};
use tracing::info;

use agentctl_server::{create_app, settings::CliOverrides, AppState, Settings};
use error_common::{log_error, AgentCtlError, Result};

/// Crates whose events pass the default filter
const LOG_TARGETS: &[&str] = &[
    "agentctl_server",
    "aip_identity",
    "ctx_capability",
    "schema_registry",
    "config_engine",
];

/// Agent control validation HTTP server
#[derive(Parser, Debug)]
#[command(name = "agentctl-server")]
#[command(about = "AIP-1, CTX-1, ADP-1 and PVS-1 validation API server")]
struct Args {
    /// Server bind address
    #[arg(long)]
    host: Option<String>,

    /// Server port
    #[arg(short, long)]
    port: Option<u16>,

    /// Configuration file path (defaults to ./agentctl.yaml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if env::var("NO_COLOR").is_ok() || !atty::is(atty::Stream::Stdout) {
        colored::control::set_override(false);
    }

    let overrides = CliOverrides {
        host: args.host.clone(),
        port: args.port,
        log_level: args.verbose.then(|| "debug".to_string()),
    };
    let settings = Settings::load(args.config.as_deref(), &overrides)
        .map_err(|e| AgentCtlError::ConfigError(e.to_string()))?;

    logger_redacted::init_tracing(&settings.logging, LOG_TARGETS)
        .map_err(|e| AgentCtlError::InternalError(format!("Tracing init failed: {e}")))?;

    info!("🔏 {}", "Starting agentctl validation server".bright_cyan());
    info!("📋 Version: {}", env!("CARGO_PKG_VERSION").bright_white());

    let host = settings.server.host.clone();
    let port = settings.server.port;

    let state = match AppState::from_settings(settings) {
        Ok(state) => state,
        Err(e) => {
            log_error("startup", &e);
            return Err(e);
        }
    };
    for kind in schema_registry::SchemaKind::ALL {
        if !state.schemas.is_loaded(kind) {
            tracing::warn!("⚠️  {} schema not configured, /api/validate/{} answers 503", kind, kind_path(kind));
        }
    }

    let app = create_app(state);

    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .map_err(|e| AgentCtlError::ConfigError(format!("Invalid bind address {host}:{port}: {e}")))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| AgentCtlError::NetworkError(format!("Failed to bind to {addr}: {e}")))?;

    info!("🚀 {}", format!("agentctl server running on http://{addr}").bright_green());
    info!("📋 {}", format!("Health check available at: http://{addr}/health").bright_blue());
    info!("🔐 {}", format!("Validators available at: http://{addr}/api/validate/{{aip,ctx,adp,pvs,manifest}}").bright_blue());

    axum::serve(listener, app)
        .await
        .map_err(|e| AgentCtlError::ServerError(format!("HTTP server error: {e}")))
}

fn kind_path(kind: schema_registry::SchemaKind) -> &'static str {
    match kind {
        schema_registry::SchemaKind::Adp => "adp",
        schema_registry::SchemaKind::Pvs => "pvs",
        schema_registry::SchemaKind::Manifest => "manifest",
    }
}
