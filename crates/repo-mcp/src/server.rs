//! Process setup shared by both service binaries

use axum::Router;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use crate::Result;

/// Log levels used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_LOG_DIRECTIVES: &str = "repo_mcp=info,repo_git=info,repo_lint=info,repo_fs=info";

/// Install the stderr log subscriber.
///
/// `RUST_LOG` replaces [`DEFAULT_LOG_DIRECTIVES`] entirely when set.
pub fn init_tracing() {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(rust_log.as_deref()))
        .with_writer(std::io::stderr)
        .init();
}

fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_DIRECTIVES))
}

/// Bind `host:port` and serve `router` until Ctrl-C.
pub async fn serve(router: Router, host: &str, port: u16) -> Result<()> {
    let listener = TcpListener::bind((host, port)).await?;
    tracing::info!(addr = %listener.local_addr()?, "Listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}
