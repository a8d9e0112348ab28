use crate::api::HnApi;
use crate::app::App;
use crate::ui::theme::Theme;
use crate::ui::{help_line, render_header, split_chrome, status_line};
use crate::views::user::ProfileLine;
use html_escape::decode_html_entities;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

pub fn render<A: HnApi>(frame: &mut Frame, app: &App<A>, theme: &Theme) {
    let view = &app.user;
    let chrome = split_chrome(frame.area(), theme.layout.user_chrome_lines, 2);

    let title = match &view.user {
        Some(user) => format!("User: {}", user.id),
        None if !view.username.is_empty() => format!("User: {}", view.username),
        None => "User Profile".to_string(),
    };
    render_header(frame, chrome.header, &title, theme);

    let body = match status_line(
        &view.phase,
        "Loading…",
        "User not found.",
        app.spinner_frame(),
        theme,
    ) {
        Some(status) => vec![status],
        None => view
            .visible_lines()
            .iter()
            .map(|line| styled_line(line, theme))
            .collect(),
    };
    frame.render_widget(Paragraph::new(body), chrome.body);

    let help = help_line(
        "  ↑/↓ scroll · o: open in browser · y: copy link · ←/esc: back · q: quit".to_string(),
        theme,
    );
    frame.render_widget(Paragraph::new(vec![Line::raw(""), help]), chrome.footer);
}

fn styled_line(line: &ProfileLine, theme: &Theme) -> Line<'static> {
    let p = &theme.palette;
    let meta_style = Style::default().fg(p.subtle);
    let sep = Span::styled("  ·  ", Style::default().fg(p.dim));

    match line {
        ProfileLine::Header {
            name,
            karma,
            joined,
        } => Line::from(vec![
            Span::raw("  "),
            Span::styled(
                name.clone(),
                Style::default()
                    .fg(p.accent)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ),
            sep.clone(),
            Span::raw("karma: "),
            Span::styled(
                karma.to_string(),
                Style::default().fg(p.yellow).add_modifier(Modifier::BOLD),
            ),
            sep,
            Span::styled(format!("joined: {joined}"), meta_style),
        ]),
        ProfileLine::About(text) => Line::from(format!("  {text}")),
        ProfileLine::SectionTitle => Line::from(Span::styled(
            "  Recent submissions:",
            Style::default().fg(p.text).add_modifier(Modifier::BOLD),
        )),
        ProfileLine::SubmissionTitle { rank, title } => Line::from(vec![
            Span::styled(
                format!("  {:>4} ", format!("{rank}.")),
                Style::default().fg(p.dim),
            ),
            Span::styled(
                decode_html_entities(title).into_owned(),
                Style::default().fg(p.text).add_modifier(Modifier::BOLD),
            ),
        ]),
        ProfileLine::SubmissionMeta {
            score,
            comments,
            age,
            host,
        } => {
            let mut spans = vec![
                Span::raw("       "),
                Span::styled(
                    format!("▲ {score} · {comments} comments · {age}"),
                    meta_style,
                ),
            ];
            if let Some(host) = host {
                spans.push(sep);
                spans.push(Span::styled(
                    host.clone(),
                    Style::default().fg(p.green).add_modifier(Modifier::ITALIC),
                ));
            }
            Line::from(spans)
        }
        ProfileLine::Blank => Line::raw(""),
    }
}
