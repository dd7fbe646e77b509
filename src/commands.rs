//! Command runners for the `gallery` binary.
//!
//! `browse` runs the interactive event loop; `list` and `download` drive the
//! same session non-interactively and exit once their work settles.

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::config::{ConfigError, GalleryConfig};
use crate::services::session::{Action, Collaborators, ItemRef, Notice, Session, SessionEvent};
use crate::source::types::NetworkError;
use crate::state::gallery::PageOutcome;
use crate::state::inspector::InspectorError;
use crate::view::{self, Command, SessionView};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error("stdin read failed: {0}")]
    Stdin(#[from] std::io::Error),

    #[error(transparent)]
    Inspector(#[from] InspectorError),

    #[error("{0}")]
    Download(String),

    #[error("page {0} could not be loaded")]
    PageLoad(u32),

    #[error("session event channel closed")]
    SessionClosed,
}

/// Interactive session: one command per stdin line, completions applied as
/// they arrive, view re-rendered after every change.
///
/// # Errors
///
/// Returns [`AppError::Stdin`] if standard input cannot be read.
pub async fn browse(collaborators: Collaborators, config: &GalleryConfig, page: u32) -> Result<(), AppError> {
    let (mut session, mut events) = Session::start(collaborators, config.page_size, config.total_pages, page);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}", view::HELP);
    println!("{}", SessionView(&session));

    loop {
        tokio::select! {
            Some(event) = events.recv() => {
                let notice = session.apply(event);
                if notice == Notice::Page(PageOutcome::Stale) {
                    continue;
                }
                println!("-- {notice}");
                println!("{}", SessionView(&session));
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                match view::parse_command(&line) {
                    Ok(None) => {}
                    Ok(Some(Command::Quit)) => break,
                    Ok(Some(Command::Help)) => println!("{}", view::HELP),
                    Ok(Some(Command::Show)) => println!("{}", SessionView(&session)),
                    Ok(Some(Command::Action(action))) => {
                        if session.dispatch(action).is_ok() {
                            println!("{}", SessionView(&session));
                        }
                    }
                    Err(e) => println!("{e}"),
                }
            }
        }
    }

    drain_downloads(&mut session, &mut events).await
}

/// Apply completions until no download job is in flight, so leaving the
/// loop never drops a half-written file.
async fn drain_downloads(
    session: &mut Session,
    events: &mut mpsc::UnboundedReceiver<SessionEvent>,
) -> Result<(), AppError> {
    if session.pending_downloads() > 0 {
        info!(pending = session.pending_downloads(), "browse: waiting for downloads");
    }
    while session.pending_downloads() > 0 {
        let event = events.recv().await.ok_or(AppError::SessionClosed)?;
        match session.apply(event) {
            Notice::Page(_) => {}
            notice => println!("-- {notice}"),
        }
    }
    Ok(())
}

/// Fetch one page and print the grid. A failed fetch prints an empty grid.
///
/// # Errors
///
/// Returns [`AppError::SessionClosed`] if the fetch task disappears.
pub async fn list(collaborators: Collaborators, config: &GalleryConfig, page: u32) -> Result<(), AppError> {
    let (mut session, mut events) = Session::start(collaborators, config.page_size, config.total_pages, page);
    settle_page(&mut session, &mut events).await?;
    println!("{}", view::GridView(session.gallery()));
    Ok(())
}

/// Load `page`, open the image with `id`, and save it.
///
/// # Errors
///
/// Returns [`AppError::PageLoad`] if the page fetch fails, otherwise an
/// [`AppError`] if the image is not on the page or the download fails.
pub async fn download(
    collaborators: Collaborators,
    config: &GalleryConfig,
    page: u32,
    id: &str,
) -> Result<(), AppError> {
    let (mut session, mut events) = Session::start(collaborators, config.page_size, config.total_pages, page);
    if settle_page(&mut session, &mut events).await? == PageOutcome::Failed {
        return Err(AppError::PageLoad(session.gallery().current_page()));
    }

    session.dispatch(Action::Open(ItemRef::Id(id.to_string())))?;
    session.dispatch(Action::Download)?;

    loop {
        let event = events.recv().await.ok_or(AppError::SessionClosed)?;
        match session.apply(event) {
            Notice::Saved(path) => {
                println!("saved {}", path.display());
                return Ok(());
            }
            Notice::DownloadFailed { reason, .. } => return Err(AppError::Download(reason)),
            Notice::Page(outcome) => debug!(?outcome, "download: ignoring page event"),
        }
    }
}

/// Apply events until the current page resolves.
async fn settle_page(
    session: &mut Session,
    events: &mut mpsc::UnboundedReceiver<SessionEvent>,
) -> Result<PageOutcome, AppError> {
    loop {
        let event = events.recv().await.ok_or(AppError::SessionClosed)?;
        match session.apply(event) {
            Notice::Page(PageOutcome::Stale) => {}
            Notice::Page(outcome) => return Ok(outcome),
            other => debug!(notice = %other, "settle: ignoring event"),
        }
    }
}

#[cfg(test)]
#[path = "commands_test.rs"]
mod tests;
