//! Web server CLI command

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::api::{self, state::AppState};
use crate::storage::config::{self, Config};
use crate::storage::tasks::TaskStore;

/// Options collected from `tasklist serve`
pub struct ServeOptions {
    pub host: Option<IpAddr>,
    pub port: Option<u16>,
    pub data_file: Option<PathBuf>,
    pub static_dir: Option<PathBuf>,
    pub no_open: bool,
}

/// Resolve the bind address: CLI flag > config
fn bind_addr(opts: &ServeOptions, config: &Config) -> std::io::Result<SocketAddr> {
    let host = match opts.host {
        Some(h) => h,
        None => config.server.host.parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid server.host '{}': {}", config.server.host, e),
            )
        })?,
    };
    Ok(SocketAddr::new(host, opts.port.unwrap_or(config.server.port)))
}

/// Wait for Ctrl+C
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

/// Execute the web server
pub async fn execute(opts: ServeOptions, config: &Config) -> std::io::Result<()> {
    let addr = bind_addr(&opts, config)?;
    let tasks_file = config::resolve_tasks_file(opts.data_file.clone(), config);
    let static_dir = opts
        .static_dir
        .clone()
        .or_else(|| config.server.static_dir.clone())
        .filter(|dir| {
            let exists = dir.is_dir();
            if !exists {
                tracing::warn!(dir = %dir.display(), "static directory not found, serving API only");
            }
            exists
        });

    let store = TaskStore::new(tasks_file);
    store.ensure()?;

    if static_dir.is_some() && !opts.no_open {
        let url = format!("http://localhost:{}", addr.port());
        tokio::spawn(async move {
            tokio::time::sleep(std::time::Duration::from_millis(300)).await;
            println!("Opening browser: {}", url);
            let _ = open::that(&url);
        });
    }

    api::start_server(addr, AppState::new(store), static_dir, shutdown_signal()).await
}
