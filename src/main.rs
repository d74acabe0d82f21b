use std::path::PathBuf;

use rmcp::{ServiceExt, transport::stdio};

use genbridge::config::Config;
use genbridge::server::GenbridgeServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let env_file = load_env_file();

    tracing::info!(env_file = ?env_file, "genbridge starting");

    let config = Config::load();
    tracing::debug!(?config, "configuration loaded");
    let server = GenbridgeServer::new(config);

    let service = server
        .serve(stdio())
        .await
        .inspect_err(|e| tracing::error!("serving error: {e:?}"))?;

    service.waiting().await?;

    tracing::info!("genbridge shutting down");
    Ok(())
}

/// `.env` next to the executable takes precedence over one in the working
/// directory. Returns the file that was applied, if any.
fn load_env_file() -> Option<PathBuf> {
    let beside_exe = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(".env")))
        .filter(|path| path.is_file());

    match beside_exe {
        Some(path) => dotenvy::from_path(&path).ok().map(|()| path),
        None => dotenvy::dotenv().ok(),
    }
}
