use crate::api::Item;
use crate::input::Action;
use crate::views::{Command, Phase, Viewport};
use std::ops::Range;

/// Every story takes a title row and a meta row.
pub const ROWS_PER_ITEM: usize = 2;

#[derive(Debug, Clone)]
pub struct ListView {
    pub title: String,
    pub phase: Phase,
    pub items: Vec<Item>,
    pub cursor: usize,
    pub offset: usize,
    pub viewport: Viewport,
}

impl ListView {
    pub fn new(title: impl Into<String>, chrome: u16) -> Self {
        Self {
            title: title.into(),
            phase: Phase::Loading,
            items: vec![],
            cursor: 0,
            offset: 0,
            viewport: Viewport::new(chrome),
        }
    }

    pub fn begin_loading(&mut self) {
        self.phase = Phase::Loading;
    }

    /// A failed batch replaces the list entirely, even if some items arrived.
    pub fn on_load_complete(&mut self, items: Vec<Item>, error: Option<String>) {
        self.cursor = 0;
        self.offset = 0;
        match error {
            Some(message) => {
                self.items.clear();
                self.phase = Phase::Errored(message);
            }
            None => {
                self.items = items;
                self.phase = Phase::Ready;
            }
        }
    }

    pub fn on_resize(&mut self, width: u16, height: u16) {
        self.viewport.resize(width, height);
        self.keep_cursor_visible();
    }

    pub fn on_action(&mut self, action: Action) -> Option<Command> {
        match action {
            Action::MoveDown => {
                if self.cursor + 1 < self.items.len() {
                    self.cursor += 1;
                }
                self.keep_cursor_visible();
            }
            Action::MoveUp => {
                self.cursor = self.cursor.saturating_sub(1);
                self.keep_cursor_visible();
            }
            Action::PageDown => {
                let last = self.items.len().saturating_sub(1);
                self.cursor = (self.cursor + self.visible_count()).min(last);
                self.keep_cursor_visible();
            }
            Action::PageUp => {
                self.cursor = self.cursor.saturating_sub(self.visible_count());
                self.keep_cursor_visible();
            }
            Action::GoTop => {
                self.cursor = 0;
                self.offset = 0;
            }
            Action::GoBottom => {
                self.cursor = self.items.len().saturating_sub(1);
                self.keep_cursor_visible();
            }
            Action::Select => return self.selected().map(|item| Command::OpenItem(item.id)),
            Action::OpenUrl => {
                return self
                    .selected()
                    .map(|item| Command::OpenUrl(item.link_or_permalink()))
            }
            Action::OpenPermalink => {
                return self.selected().map(|item| Command::OpenUrl(item.permalink()))
            }
            Action::CopyLink => {
                return self
                    .selected()
                    .map(|item| Command::CopyUrl(item.link_or_permalink()))
            }
            Action::OpenAuthor => {
                return self
                    .selected()
                    .and_then(|item| item.author.clone())
                    .map(Command::OpenUser)
            }
            Action::Refresh => return Some(Command::Refresh),
            Action::Back | Action::ToggleHelp | Action::Quit => {}
        }
        None
    }

    pub fn selected(&self) -> Option<&Item> {
        self.items.get(self.cursor)
    }

    /// Stories that fit in the viewport, at least one.
    pub fn visible_count(&self) -> usize {
        (self.viewport.height / ROWS_PER_ITEM).max(1)
    }

    /// Indices of the stories the renderer should lay out.
    pub fn visible_range(&self) -> Range<usize> {
        let start = self.offset.min(self.items.len());
        let end = (self.offset + self.visible_count()).min(self.items.len());
        start..end
    }

    fn keep_cursor_visible(&mut self) {
        if self.items.is_empty() {
            self.cursor = 0;
            self.offset = 0;
            return;
        }
        self.cursor = self.cursor.min(self.items.len() - 1);

        let visible = self.visible_count();
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + visible {
            self.offset = self.cursor + 1 - visible;
        }
        self.offset = self.offset.min(self.items.len().saturating_sub(visible));
    }
}
