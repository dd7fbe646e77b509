//! Text view — command parsing and plain-text rendering.
//!
//! DESIGN
//! ======
//! The terminal stands in for the presentation layer: each input line maps
//! to one discrete event, and the state is re-rendered after it. Rendering
//! reads state only; nothing here mutates the session.

use std::fmt;

use crate::services::session::{Action, ItemRef, Session};
use crate::state::gallery::GalleryState;
use crate::state::inspector::{InspectorPhase, InspectorState};
use crate::state::zoom::{Magnifier, ZoomViewport, percent_of};

/// Pagination bars longer than this are collapsed around the current page.
const MAX_FULL_PAGINATION: u32 = 12;

pub const HELP: &str = "\
commands:
  page <n> | next | prev          change page
  open <id> | open #<n>           inspect an image by id or grid position
  enter | leave                   pointer enters / leaves the image
  move <x%> <y%>                  pointer position in percent of the image
  move-px <x> <y> <width> <height>  pointer position in pixels of the displayed image
  download                        save the inspected image
  close                           close the inspector
  show | help | quit";

// =============================================================================
// COMMANDS
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Action(Action),
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),
}

/// Parse one input line. Blank lines yield `Ok(None)`.
///
/// # Errors
///
/// Returns a [`CommandError`] for unknown commands or malformed arguments.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let command = match head.to_ascii_lowercase().as_str() {
        "page" => match args.as_slice() {
            [n] => Command::Action(Action::GoToPage(n.parse().map_err(|_| CommandError::Usage("page <n>"))?)),
            _ => return Err(CommandError::Usage("page <n>")),
        },
        "next" => Command::Action(Action::NextPage),
        "prev" => Command::Action(Action::PrevPage),
        "open" => match args.as_slice() {
            [target] => Command::Action(Action::Open(parse_item(target)?)),
            _ => return Err(CommandError::Usage("open <id> | open #<n>")),
        },
        "close" => Command::Action(Action::Close),
        "enter" => Command::Action(Action::PointerEnter),
        "leave" => Command::Action(Action::PointerLeave),
        "move" => {
            let [x, y] = parse_numbers::<2>(&args).ok_or(CommandError::Usage("move <x%> <y%>"))?;
            Command::Action(Action::PointerMove { x_percent: x, y_percent: y })
        }
        "move-px" => {
            let [x, y, width, height] =
                parse_numbers::<4>(&args).ok_or(CommandError::Usage("move-px <x> <y> <width> <height>"))?;
            Command::Action(Action::PointerMove { x_percent: percent_of(x, width), y_percent: percent_of(y, height) })
        }
        "download" => Command::Action(Action::Download),
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

fn parse_item(target: &str) -> Result<ItemRef, CommandError> {
    match target.strip_prefix('#') {
        Some(index) => index
            .parse()
            .map(ItemRef::Index)
            .map_err(|_| CommandError::Usage("open #<n>")),
        None => Ok(ItemRef::Id(target.to_string())),
    }
}

fn parse_numbers<const N: usize>(args: &[&str]) -> Option<[f64; N]> {
    if args.len() != N {
        return None;
    }
    let mut out = [0.0; N];
    for (slot, arg) in out.iter_mut().zip(args) {
        *slot = arg.parse().ok()?;
    }
    Some(out)
}

// =============================================================================
// RENDERING
// =============================================================================

/// Full screen: grid, pagination, and the inspector when open.
pub struct SessionView<'a>(pub &'a Session);

impl fmt::Display for SessionView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let session = self.0;
        write!(f, "{}", GridView(session.gallery()))?;
        if session.inspector().phase() != InspectorPhase::Closed {
            writeln!(f)?;
            let view = InspectorView {
                inspector: session.inspector(),
                magnifier: session.magnifier(),
                viewport: session.viewport(),
            };
            write!(f, "{view}")?;
        }
        Ok(())
    }
}

/// Image grid plus pagination bar.
pub struct GridView<'a>(pub &'a GalleryState);

impl fmt::Display for GridView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let gallery = self.0;
        writeln!(f, "== Image Gallery - page {} of {} ==", gallery.current_page(), gallery.total_pages())?;

        if gallery.is_loading() {
            for slot in 1..=gallery.page_size() {
                writeln!(f, "  #{slot:<3} ........ loading")?;
            }
        } else if gallery.items().is_empty() {
            writeln!(f, "  (no images)")?;
        } else {
            for (i, record) in gallery.items().iter().enumerate() {
                writeln!(
                    f,
                    "  #{:<3} id={:<6} {:<28} {}x{}",
                    i + 1,
                    record.id,
                    record.author,
                    record.width,
                    record.height
                )?;
            }
        }

        writeln!(f, "{}", pagination(gallery.current_page(), gallery.total_pages()))
    }
}

/// `< 1 [2] 3 ... 10 >`. Short bars list every page.
#[must_use]
pub fn pagination(current: u32, total: u32) -> String {
    let pages: Vec<Option<u32>> = if total <= MAX_FULL_PAGINATION {
        (1..=total).map(Some).collect()
    } else {
        let lo = current.saturating_sub(2).max(2);
        let hi = (current + 2).min(total - 1);
        let mut pages = vec![Some(1)];
        if lo > 2 {
            pages.push(None);
        }
        pages.extend((lo..=hi).map(Some));
        if hi < total - 1 {
            pages.push(None);
        }
        pages.push(Some(total));
        pages
    };

    let body: Vec<String> = pages
        .into_iter()
        .map(|page| match page {
            Some(p) if p == current => format!("[{p}]"),
            Some(p) => p.to_string(),
            None => "...".to_string(),
        })
        .collect();
    format!("< {} >", body.join(" "))
}

/// The detail modal and, while zooming, the magnifier.
pub struct InspectorView<'a> {
    pub inspector: &'a InspectorState,
    pub magnifier: &'a Magnifier,
    pub viewport: Option<ZoomViewport>,
}

impl fmt::Display for InspectorView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(record) = self.inspector.selection() else {
            return Ok(());
        };

        writeln!(f, "+-- {} (id {})", record.author, record.id)?;
        writeln!(f, "| Author: {}", record.author)?;
        writeln!(f, "| Dimensions: {} x {}", record.width, record.height)?;
        writeln!(f, "| Source: {}", record.source_url)?;
        if let Some(page_url) = &record.page_url {
            writeln!(f, "| Page: {page_url}")?;
        }

        match &self.viewport {
            Some(vp) => {
                let (x, y) = vp.position_percent;
                let (px, py) = vp.source_pixel;
                let (bw, bh) = vp.background_size;
                let (ox, oy) = vp.offset;
                writeln!(f, "| Magnifier: {x:.1}% x {y:.1}% -> pixel ({px}, {py})")?;
                writeln!(f, "|   background {bw:.0}x{bh:.0} at ({ox:.0}, {oy:.0})")?;
                let m = self.magnifier;
                writeln!(
                    f,
                    "|   window {:.0}x{:.0} fixed at {:.1}% / {:.1}% of the screen",
                    m.window_width, m.window_height, m.anchor_x_percent, m.anchor_y_percent
                )?;
            }
            None => writeln!(f, "| Magnifier: off (enter or move over the image)")?,
        }
        writeln!(f, "+-- close | download")
    }
}

#[cfg(test)]
#[path = "view_test.rs"]
mod tests;
