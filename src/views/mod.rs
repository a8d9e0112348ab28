//! Per-screen state machines. Each view owns its data and viewport and
//! reduces load completions, resizes and key actions into its next state plus
//! an optional [`Command`] for the controller.

pub mod comments;
pub mod list;
pub mod user;

pub use comments::CommentsView;
pub use list::ListView;
pub use user::UserView;

use crate::input::Action;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Ready,
    Errored(String),
    /// The load succeeded but the service had no such record.
    NotFound,
}

/// Requests a view hands back to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    OpenItem(u64),
    OpenUser(String),
    OpenUrl(String),
    CopyUrl(String),
    Refresh,
    Back,
}

const DEFAULT_WIDTH: u16 = 80;
const DEFAULT_HEIGHT: u16 = 24;

/// Terminal dimensions as seen by one view. `height` excludes the view's
/// fixed chrome rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: usize,
    pub height: usize,
    chrome: u16,
}

impl Viewport {
    pub fn new(chrome: u16) -> Self {
        let mut viewport = Self {
            width: 0,
            height: 0,
            chrome,
        };
        viewport.resize(DEFAULT_WIDTH, DEFAULT_HEIGHT);
        viewport
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width as usize;
        self.height = height.saturating_sub(self.chrome) as usize;
    }
}

pub fn max_scroll(total: usize, height: usize) -> usize {
    total.saturating_sub(height)
}

pub fn clamp_scroll(offset: usize, total: usize, height: usize) -> usize {
    offset.min(max_scroll(total, height))
}

/// How far through the content the viewport is, 100 when nothing scrolls.
pub fn scroll_percent(offset: usize, total: usize, height: usize) -> usize {
    if total <= height {
        return 100;
    }
    (offset * 100 / (total - height)).min(100)
}

/// Line-granular scrolling shared by the comment and profile views.
pub(crate) fn scroll_lines(offset: usize, total: usize, height: usize, action: Action) -> usize {
    let page = height.max(1);
    let next = match action {
        Action::MoveDown => offset.saturating_add(1),
        Action::MoveUp => offset.saturating_sub(1),
        Action::PageDown => offset.saturating_add(page),
        Action::PageUp => offset.saturating_sub(page),
        Action::GoTop => 0,
        Action::GoBottom => max_scroll(total, height),
        _ => offset,
    };
    clamp_scroll(next, total, height)
}
