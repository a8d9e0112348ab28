pub mod comment_view;
pub mod help;
pub mod story_list;
pub mod theme;
pub mod user_view;

use crate::api::HnApi;
use crate::app::{App, View};
use crate::views::Phase;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use theme::Theme;

pub fn render<A: HnApi>(frame: &mut Frame, app: &App<A>, theme: &Theme) {
    match app.view {
        View::List => story_list::render(frame, app, theme),
        View::Comments => comment_view::render(frame, app, theme),
        View::User => user_view::render(frame, app, theme),
    }
    if app.help_visible {
        help::render(frame, app.view, theme);
    }
}

/// Header row, content area and footer rows of a view with `chrome` fixed
/// rows, `footer_rows` of which sit below the content.
pub(crate) struct Chrome {
    pub header: Rect,
    pub body: Rect,
    pub footer: Rect,
}

pub(crate) fn split_chrome(area: Rect, chrome: u16, footer_rows: u16) -> Chrome {
    let spacer = chrome.saturating_sub(1 + footer_rows);
    let [header, _, body, footer] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(spacer),
            Constraint::Min(0),
            Constraint::Length(footer_rows),
        ])
        .areas(area);
    Chrome {
        header,
        body,
        footer,
    }
}

pub(crate) fn render_header(frame: &mut Frame, area: Rect, title: &str, theme: &Theme) {
    let style = Style::default()
        .bg(theme.palette.accent)
        .fg(theme.palette.header_fg)
        .add_modifier(Modifier::BOLD);
    frame.render_widget(Paragraph::new(format!("  {title}")).style(style), area);
}

/// Placeholder body for anything but a ready view; `None` when ready.
pub(crate) fn status_line(
    phase: &Phase,
    loading: &str,
    not_found: &str,
    spinner: char,
    theme: &Theme,
) -> Option<Line<'static>> {
    let status = Style::default()
        .fg(theme.palette.subtle)
        .add_modifier(Modifier::ITALIC);
    match phase {
        Phase::Ready => None,
        Phase::Loading => Some(Line::from(Span::styled(
            format!("  {loading} {spinner}"),
            status,
        ))),
        Phase::Errored(message) => Some(Line::from(Span::styled(
            format!("  Error: {message}"),
            Style::default().fg(theme.palette.error),
        ))),
        Phase::NotFound => Some(Line::from(Span::styled(format!("  {not_found}"), status))),
    }
}

pub(crate) fn help_line(text: String, theme: &Theme) -> Line<'static> {
    Line::from(Span::styled(text, Style::default().fg(theme.palette.dim)))
}
