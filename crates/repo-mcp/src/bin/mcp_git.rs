//! Git workspace service
//!
//! # Usage
//!
//! ```bash
//! mcp-git [--config services.toml] [--host 0.0.0.0] [--port 8000] [--workspace-root temp_repos]
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Control log verbosity (default: `repo_mcp=info`)
//! - `MCP_HOST`, `MCP_GIT_PORT`, `MCP_WORKSPACE_ROOT`: same as the flags

use clap::Parser;
use repo_git::WorkspaceStore;
use repo_mcp::{CommonArgs, ServiceConfig, git_service};

/// Clone repositories and inspect their working trees over HTTP
#[derive(Parser)]
#[command(name = "mcp-git")]
#[command(version)]
struct Args {
    #[command(flatten)]
    common: CommonArgs,

    /// Port to listen on
    #[arg(short, long, env = "MCP_GIT_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    repo_mcp::init_tracing();

    let args = Args::parse();
    let mut config = ServiceConfig::from_args(&args.common)?;
    if let Some(port) = args.port {
        config.git_port = port;
    }

    let root = config.workspace_root();
    root.ensure_exists()?;
    tracing::info!(root = %root.path(), "Starting git service");

    let store = WorkspaceStore::new(root).with_clone_options(config.clone_options());
    repo_mcp::serve(git_service::router(store), &config.host, config.git_port).await?;

    Ok(())
}
