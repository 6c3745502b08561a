use std::{path::PathBuf, sync::Arc};

use atlas::{config, lookup::Atlas, table::load_table};

#[derive(clap::Parser)]
#[command(about = "Serve country lookups from a scraped CSV table")]
struct Args {
    /// Table produced by `atlas-scrape`.
    #[arg(short, long, env = "ATLAS_CSV", default_value = config::DEFAULT_CSV)]
    csv: PathBuf,
    /// TCP address to listen on.
    #[arg(short, long, env = "ATLAS_LISTEN", default_value = config::DEFAULT_LISTEN)]
    listen: String,
    /// Listen on a Unix socket instead of TCP.
    #[arg(short, long, env = "ATLAS_SOCKET", value_name = "path")]
    socket: Option<PathBuf>,
}

async fn shutdown() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(target: "main", "ctrl-c handler: {e}");
        core::future::pending::<()>().await;
    }
    tracing::info!(target: "main", "shutting down");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use axum::serve;
    use clap::Parser;

    pretty_env_logger::init_timed();

    let args = Args::parse();

    let atlas = Arc::new(Atlas::new(load_table(&args.csv)?));
    let app = atlas::server::router(atlas);

    if let Some(sock) = args.socket {
        if let Err(err) = std::fs::remove_file(&sock)
            && err.kind() != std::io::ErrorKind::NotFound
        {
            return Err(err.into());
        }
        let listener = tokio::net::UnixListener::bind(&sock)?;
        tracing::info!(target: "main", "listening on {}", sock.display());
        serve(listener, app).with_graceful_shutdown(shutdown()).await?;
    } else {
        let listener = tokio::net::TcpListener::bind(&args.listen).await?;
        tracing::info!(target: "main", "listening on http://{}", listener.local_addr()?);
        serve(listener, app).with_graceful_shutdown(shutdown()).await?;
    }

    Ok(())
}
