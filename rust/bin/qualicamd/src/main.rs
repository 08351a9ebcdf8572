//! `qualicamd`: the QualiCam inventory server binary.
//!
//! Usage:
//!   qualicamd [--listen <addr>] [--db <path>]

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::info;

/// QualiCam inventory server.
#[derive(Parser, Debug)]
#[command(name = "qualicamd", about = "QualiCam inventory server", version)]
struct Cli {
    /// Listen address.
    #[arg(long = "listen", default_value = "0.0.0.0:5000")]
    listen: String,

    /// redb database file.
    #[arg(long = "db", default_value = "qualicam.redb")]
    db: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    info!("Database: {}", cli.db.display());
    let kv: Arc<dyn qualicam_kv::KVStore> = Arc::new(
        qualicam_kv::RedbStore::open(&cli.db)
            .map_err(|e| anyhow::anyhow!("failed to open database {}: {}", cli.db.display(), e))?,
    );

    let listener = tokio::net::TcpListener::bind(&cli.listen).await?;
    qualicam_server::serve(listener, kv, async {
        let _ = tokio::signal::ctrl_c().await;
        info!("shutting down");
    })
    .await?;
    Ok(())
}
