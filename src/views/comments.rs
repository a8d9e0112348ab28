use crate::api::Item;
use crate::input::Action;
use crate::text::{format_age, now_unix, strip_markup, wrap_paragraphs};
use crate::views::{clamp_scroll, scroll_lines, scroll_percent, Command, Phase, Viewport};

/// Columns used by the `│ ` bar and the two-space gutter before comment text.
const COMMENT_GUTTER: usize = 4;
const STORY_TEXT_MARGIN: usize = 4;
const INDENT_PER_LEVEL: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatNode {
    /// `None` when the fetch for this slot failed.
    pub item: Option<Item>,
    pub depth: usize,
    pub hidden: bool,
}

/// Pairs first-level replies with their depth, keeping input order and every
/// slot, including failed and soft-deleted ones.
pub fn flatten(children: Vec<Option<Item>>) -> Vec<FlatNode> {
    children
        .into_iter()
        .map(|item| FlatNode {
            item,
            depth: 0,
            hidden: false,
        })
        .collect()
}

/// One pre-wrapped row of the comment page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayLine {
    StoryMeta {
        url: Option<String>,
        score: i64,
        comments: i64,
        author: String,
        age: String,
    },
    StoryText(String),
    CommentHeader {
        depth: usize,
        author: String,
        age: String,
    },
    CommentBody {
        depth: usize,
        text: String,
    },
    Blank,
}

#[derive(Debug, Clone)]
pub struct CommentsView {
    pub phase: Phase,
    pub story: Option<Item>,
    pub nodes: Vec<FlatNode>,
    pub lines: Vec<DisplayLine>,
    pub scroll: usize,
    pub viewport: Viewport,
}

impl CommentsView {
    pub fn new(chrome: u16) -> Self {
        Self {
            phase: Phase::Loading,
            story: None,
            nodes: vec![],
            lines: vec![],
            scroll: 0,
            viewport: Viewport::new(chrome),
        }
    }

    /// Clears content for a new item but keeps the last known dimensions so
    /// the first render wraps at the real width.
    pub fn reset_for_load(&mut self) {
        let viewport = self.viewport;
        *self = Self {
            viewport,
            ..Self::new(0)
        };
    }

    pub fn on_load_complete(
        &mut self,
        story: Option<Item>,
        children: Vec<Option<Item>>,
        error: Option<String>,
    ) {
        self.scroll = 0;
        match (story, error) {
            (Some(story), None) => {
                self.story = Some(story);
                self.nodes = flatten(children);
                self.phase = Phase::Ready;
            }
            (_, error) => {
                self.story = None;
                self.nodes.clear();
                self.phase =
                    Phase::Errored(error.unwrap_or_else(|| "item unavailable".to_string()));
            }
        }
        self.rebuild_lines();
    }

    pub fn on_resize(&mut self, width: u16, height: u16) {
        self.viewport.resize(width, height);
        self.rebuild_lines();
    }

    pub fn on_action(&mut self, action: Action) -> Option<Command> {
        match action {
            Action::MoveDown
            | Action::MoveUp
            | Action::PageDown
            | Action::PageUp
            | Action::GoTop
            | Action::GoBottom => {
                self.scroll =
                    scroll_lines(self.scroll, self.lines.len(), self.viewport.height, action);
                None
            }
            Action::OpenUrl => self
                .story
                .as_ref()
                .and_then(|s| s.url.clone())
                .filter(|url| !url.is_empty())
                .map(Command::OpenUrl),
            Action::OpenPermalink => self
                .story
                .as_ref()
                .map(|s| Command::OpenUrl(s.permalink())),
            Action::CopyLink => self
                .story
                .as_ref()
                .map(|s| Command::CopyUrl(s.link_or_permalink())),
            Action::OpenAuthor => self
                .story
                .as_ref()
                .and_then(|s| s.author.clone())
                .map(Command::OpenUser),
            Action::Refresh => Some(Command::Refresh),
            Action::Back => Some(Command::Back),
            Action::Select | Action::ToggleHelp | Action::Quit => None,
        }
    }

    /// Lines currently inside the viewport.
    pub fn visible_lines(&self) -> &[DisplayLine] {
        let start = self.scroll.min(self.lines.len());
        let end = (start + self.viewport.height).min(self.lines.len());
        &self.lines[start..end]
    }

    pub fn scroll_percent(&self) -> usize {
        scroll_percent(self.scroll, self.lines.len(), self.viewport.height)
    }

    /// Comments that actually produce output.
    pub fn visible_comment_count(&self) -> usize {
        self.nodes.iter().filter(|n| renders(n)).count()
    }

    fn rebuild_lines(&mut self) {
        self.lines = build_lines(
            self.story.as_ref(),
            &self.nodes,
            self.viewport.width,
            now_unix(),
        );
        self.scroll = clamp_scroll(self.scroll, self.lines.len(), self.viewport.height);
    }
}

fn renders(node: &FlatNode) -> bool {
    !node.hidden && node.item.as_ref().is_some_and(Item::is_visible)
}

fn build_lines(
    story: Option<&Item>,
    nodes: &[FlatNode],
    width: usize,
    now: i64,
) -> Vec<DisplayLine> {
    let mut lines = Vec::new();

    if let Some(story) = story {
        lines.push(DisplayLine::StoryMeta {
            url: story.url.clone(),
            score: story.score,
            comments: story.descendant_count,
            author: story.author_or_unknown().to_string(),
            age: format_age(story.created_at, now),
        });
        if !story.text.is_empty() {
            lines.push(DisplayLine::Blank);
            let text = strip_markup(&story.text);
            let wrap_width = width.saturating_sub(STORY_TEXT_MARGIN).max(1);
            lines.extend(
                wrap_paragraphs(&text, wrap_width)
                    .into_iter()
                    .map(DisplayLine::StoryText),
            );
        }
        lines.push(DisplayLine::Blank);
    }

    for node in nodes.iter().filter(|n| renders(n)) {
        let Some(item) = node.item.as_ref() else {
            continue;
        };
        lines.push(DisplayLine::CommentHeader {
            depth: node.depth,
            author: item.author_or_unknown().to_string(),
            age: format_age(item.created_at, now),
        });

        let text = strip_markup(&item.text);
        let wrap_width = width
            .saturating_sub(node.depth * INDENT_PER_LEVEL + COMMENT_GUTTER)
            .max(1);
        lines.extend(
            wrap_paragraphs(&text, wrap_width)
                .into_iter()
                .map(|text| DisplayLine::CommentBody {
                    depth: node.depth,
                    text,
                }),
        );
        lines.push(DisplayLine::Blank);
    }

    lines
}
