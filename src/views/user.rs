use crate::api::{Item, User};
use crate::input::Action;
use crate::text::{format_age, format_month, hostname, now_unix, strip_markup, wrap_paragraphs};
use crate::views::{clamp_scroll, scroll_lines, Command, Phase, Viewport};

const ABOUT_MARGIN: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileLine {
    Header {
        name: String,
        karma: i64,
        joined: String,
    },
    About(String),
    SectionTitle,
    SubmissionTitle {
        rank: usize,
        title: String,
    },
    SubmissionMeta {
        score: i64,
        comments: i64,
        age: String,
        host: Option<String>,
    },
    Blank,
}

#[derive(Debug, Clone)]
pub struct UserView {
    pub phase: Phase,
    pub username: String,
    pub user: Option<User>,
    pub submissions: Vec<Item>,
    pub lines: Vec<ProfileLine>,
    pub scroll: usize,
    pub viewport: Viewport,
}

impl UserView {
    pub fn new(chrome: u16) -> Self {
        Self {
            phase: Phase::Loading,
            username: String::new(),
            user: None,
            submissions: vec![],
            lines: vec![],
            scroll: 0,
            viewport: Viewport::new(chrome),
        }
    }

    pub fn reset_for_load(&mut self, username: &str) {
        let viewport = self.viewport;
        *self = Self {
            username: username.to_string(),
            viewport,
            ..Self::new(0)
        };
    }

    pub fn on_load_complete(
        &mut self,
        user: Option<User>,
        submissions: Vec<Item>,
        error: Option<String>,
    ) {
        self.scroll = 0;
        match (error, user) {
            (Some(message), _) => {
                self.user = None;
                self.submissions.clear();
                self.phase = Phase::Errored(message);
            }
            (None, None) => {
                self.user = None;
                self.submissions.clear();
                self.phase = Phase::NotFound;
            }
            (None, Some(user)) => {
                self.user = Some(user);
                self.submissions = submissions;
                self.phase = Phase::Ready;
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
            Action::OpenUrl | Action::OpenPermalink => self
                .user
                .as_ref()
                .map(|u| Command::OpenUrl(u.profile_url())),
            Action::CopyLink => self
                .user
                .as_ref()
                .map(|u| Command::CopyUrl(u.profile_url())),
            Action::Refresh => Some(Command::Refresh),
            Action::Back => Some(Command::Back),
            Action::Select | Action::OpenAuthor | Action::ToggleHelp | Action::Quit => None,
        }
    }

    pub fn visible_lines(&self) -> &[ProfileLine] {
        let start = self.scroll.min(self.lines.len());
        let end = (start + self.viewport.height).min(self.lines.len());
        &self.lines[start..end]
    }

    fn rebuild_lines(&mut self) {
        self.lines = match &self.user {
            Some(user) => build_lines(user, &self.submissions, self.viewport.width, now_unix()),
            None => vec![],
        };
        self.scroll = clamp_scroll(self.scroll, self.lines.len(), self.viewport.height);
    }
}

fn build_lines(user: &User, submissions: &[Item], width: usize, now: i64) -> Vec<ProfileLine> {
    let mut lines = vec![
        ProfileLine::Header {
            name: user.id.clone(),
            karma: user.karma,
            joined: format_month(user.created_at),
        },
        ProfileLine::Blank,
    ];

    if !user.about.is_empty() {
        let about = strip_markup(&user.about);
        let wrap_width = width.saturating_sub(ABOUT_MARGIN).max(1);
        lines.extend(
            wrap_paragraphs(&about, wrap_width)
                .into_iter()
                .map(ProfileLine::About),
        );
        lines.push(ProfileLine::Blank);
    }

    if submissions.is_empty() {
        return lines;
    }

    lines.push(ProfileLine::SectionTitle);
    lines.push(ProfileLine::Blank);
    for (idx, item) in submissions.iter().enumerate() {
        lines.push(ProfileLine::SubmissionTitle {
            rank: idx + 1,
            title: item.title.clone(),
        });
        lines.push(ProfileLine::SubmissionMeta {
            score: item.score,
            comments: item.descendant_count,
            age: format_age(item.created_at, now),
            host: item.url.as_deref().map(hostname),
        });
        lines.push(ProfileLine::Blank);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::story;

    fn pg() -> User {
        User {
            id: "pg".to_string(),
            created_at: 1_160_418_092,
            karma: 155_000,
            about: "Bug fixer.".to_string(),
            submitted_ids: vec![],
        }
    }

    #[test]
    fn ready_profile_has_header_about_and_blocks() {
        let mut view = UserView::new(4);
        view.reset_for_load("pg");
        view.on_load_complete(Some(pg()), vec![story(1), story(2)], None);

        assert_eq!(view.phase, Phase::Ready);
        // header, blank, about, blank, section, blank, 2 x 3 per submission
        assert_eq!(view.lines.len(), 12);
        assert!(matches!(
            &view.lines[0],
            ProfileLine::Header { name, joined, .. } if name == "pg" && joined == "Oct 2006"
        ));
        assert!(matches!(
            &view.lines[7],
            ProfileLine::SubmissionMeta { host: Some(h), .. } if h == "example.com"
        ));
    }

    #[test]
    fn missing_user_is_not_found() {
        let mut view = UserView::new(4);
        view.on_load_complete(None, vec![], None);
        assert_eq!(view.phase, Phase::NotFound);
        assert!(view.lines.is_empty());
    }

    #[test]
    fn error_wins_over_data() {
        let mut view = UserView::new(4);
        view.on_load_complete(Some(pg()), vec![story(1)], Some("timeout".to_string()));
        assert_eq!(view.phase, Phase::Errored("timeout".to_string()));
        assert!(view.submissions.is_empty());
    }

    #[test]
    fn scroll_is_clamped() {
        let mut view = UserView::new(4);
        view.on_resize(80, 10);
        view.on_load_complete(Some(pg()), (1..=10).map(story).collect(), None);
        let max = view.lines.len() - view.viewport.height;
        for _ in 0..100 {
            view.on_action(Action::MoveDown);
        }
        assert_eq!(view.scroll, max);
        assert_eq!(view.visible_lines().len(), view.viewport.height);
        view.on_action(Action::GoTop);
        assert_eq!(view.scroll, 0);
    }

    #[test]
    fn open_profile_in_browser() {
        let mut view = UserView::new(4);
        view.on_load_complete(Some(pg()), vec![], None);
        assert_eq!(
            view.on_action(Action::OpenUrl),
            Some(Command::OpenUrl(
                "https://news.ycombinator.com/user?id=pg".to_string()
            ))
        );
        assert_eq!(view.on_action(Action::Back), Some(Command::Back));
    }
}
