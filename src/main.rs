//! folio - local e-book shelf server.
//!
//! Stores uploaded EPUB files durably in SQLite and serves their bytes back
//! under the reserved `/epub-local/{id}` prefix, so the reading frontend can
//! load a stored book by URL. On first run the shelf is seeded with a
//! bundled default book and a default preference set.

use std::{net::SocketAddr, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use folio_server::{AppState, server};
use folio_store::library::Library;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "folio", version, about = "Local e-book shelf with offline byte serving")]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:4170")]
    listen: SocketAddr,

    /// Directory holding the database (defaults to the platform data dir)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Directory with frontend assets, including the bundled default.epub
    #[arg(long, default_value = "public")]
    assets_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let data_dir = match args.data_dir {
        Some(dir) => dir,
        None => directories::ProjectDirs::from("", "", "folio")
            .context("could not determine a platform data directory")?
            .data_dir()
            .to_path_buf(),
    };
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("failed to create data directory {}", data_dir.display()))?;
    let db_path = data_dir.join("library.db");

    // First-run seeding; a missing bundled book only logs a warning, but a
    // broken store is reported before we start serving.
    let library = Library::new(db_path.clone());
    let default_book = args.assets_dir.join("default.epub");
    tokio::task::spawn_blocking(move || library.seed_if_empty(&default_book))
        .await
        .context("seeding task failed")?
        .context("first-run seeding failed")?;

    server::run_server(args.listen, AppState::new(db_path), &args.assets_dir)
        .await
        .context("server failed")?;

    Ok(())
}
