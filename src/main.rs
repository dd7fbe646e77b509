mod commands;
mod config;
mod services;
mod source;
mod state;
mod view;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use commands::AppError;
use config::GalleryConfig;
use services::download::DirPersist;
use services::session::Collaborators;
use source::picsum::PicsumClient;

#[derive(Parser, Debug)]
#[command(name = "gallery", about = "Paginated image gallery with a magnifying inspector")]
struct Cli {
    /// Directory downloads are saved to (overrides GALLERY_DOWNLOAD_DIR).
    #[arg(long)]
    download_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive session (default).
    Browse {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Print one page of the gallery.
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Save one image from a page.
    Download {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long)]
        id: String,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), AppError> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let mut config = GalleryConfig::from_env()?;
    if let Some(dir) = cli.download_dir {
        config.download_dir = dir;
    }

    let client = Arc::new(PicsumClient::new(&config)?);
    let collaborators = Collaborators {
        source: client.clone(),
        fetcher: client,
        persist: Arc::new(DirPersist::new(config.download_dir.clone())),
    };
    tracing::info!(list_url = %config.list_url, page_size = config.page_size, "gallery starting");

    match cli.command.unwrap_or(Command::Browse { page: 1 }) {
        Command::Browse { page } => commands::browse(collaborators, &config, page).await,
        Command::List { page } => commands::list(collaborators, &config, page).await,
        Command::Download { page, id } => commands::download(collaborators, &config, page, &id).await,
    }
}
