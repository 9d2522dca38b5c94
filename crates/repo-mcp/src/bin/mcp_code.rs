//! Code analysis service
//!
//! # Usage
//!
//! ```bash
//! mcp-code [--config services.toml] [--host 0.0.0.0] [--port 8001] [--lint-program flake8]
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Control log verbosity (default: `repo_mcp=info`)
//! - `MCP_HOST`, `MCP_CODE_PORT`, `MCP_LINT_PROGRAM`: same as the flags

use clap::Parser;
use repo_lint::StyleChecker;
use repo_mcp::{CommonArgs, ServiceConfig, code_service};

/// Check Python code style over HTTP
#[derive(Parser)]
#[command(name = "mcp-code")]
#[command(version)]
struct Args {
    #[command(flatten)]
    common: CommonArgs,

    /// Port to listen on
    #[arg(short, long, env = "MCP_CODE_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    repo_mcp::init_tracing();

    let args = Args::parse();
    let mut config = ServiceConfig::from_args(&args.common)?;
    if let Some(port) = args.port {
        config.code_port = port;
    }

    let checker = StyleChecker::new(config.lint_config());
    if !checker.is_available().await {
        tracing::warn!(program = %checker.config().program, "Linter not found; style checks will fail");
    }
    tracing::info!(program = %checker.config().program, "Starting code analysis service");

    repo_mcp::serve(code_service::router(checker), &config.host, config.code_port).await?;

    Ok(())
}
