use crate::api::HnApi;
use crate::app::App;
use crate::ui::theme::Theme;
use crate::ui::{help_line, render_header, split_chrome, status_line};
use crate::views::comments::DisplayLine;
use html_escape::decode_html_entities;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

pub fn render<A: HnApi>(frame: &mut Frame, app: &App<A>, theme: &Theme) {
    let view = &app.comments;
    let chrome = split_chrome(frame.area(), theme.layout.comments_chrome_lines, 1);

    let title = view
        .story
        .as_ref()
        .map(|s| decode_html_entities(&s.title).into_owned())
        .unwrap_or_else(|| "Loading…".to_string());
    render_header(frame, chrome.header, &title, theme);

    let body = match status_line(
        &view.phase,
        "Loading comments…",
        "Item not found.",
        app.spinner_frame(),
        theme,
    ) {
        Some(status) => vec![Line::raw(""), status],
        None => view
            .visible_lines()
            .iter()
            .map(|line| styled_line(line, theme))
            .collect(),
    };
    frame.render_widget(Paragraph::new(body), chrome.body);

    let help = help_line(
        format!(
            "  ↑/↓ scroll · o: open url · c: open hn · r: refresh · ←/esc: back · q: quit  [{}%] {} comments",
            view.scroll_percent(),
            view.visible_comment_count()
        ),
        theme,
    );
    frame.render_widget(Paragraph::new(help), chrome.footer);
}

fn styled_line(line: &DisplayLine, theme: &Theme) -> Line<'static> {
    let p = &theme.palette;
    let author_style = Style::default().fg(p.accent).add_modifier(Modifier::BOLD);
    let meta_style = Style::default().fg(p.subtle);

    match line {
        DisplayLine::StoryMeta {
            url,
            score,
            comments,
            author,
            age,
        } => {
            let mut spans = vec![Span::raw("  ")];
            if let Some(url) = url.as_deref().filter(|u| !u.is_empty()) {
                spans.push(Span::styled(
                    url.to_string(),
                    Style::default().fg(p.green).add_modifier(Modifier::ITALIC),
                ));
                spans.push(Span::raw("  "));
            }
            spans.extend([
                Span::raw(format!("▲ {score}  {comments} comments  by ")),
                Span::styled(author.clone(), author_style),
                Span::raw("  "),
                Span::styled(age.clone(), meta_style),
            ]);
            Line::from(spans)
        }
        DisplayLine::StoryText(text) => Line::from(format!("  {text}")),
        DisplayLine::CommentHeader { depth, author, age } => Line::from(vec![
            Span::raw("  ".repeat(*depth)),
            Span::styled("│ ", Style::default().fg(theme.indent_color(*depth))),
            Span::styled(author.clone(), author_style),
            Span::raw("  "),
            Span::styled(age.clone(), meta_style),
        ]),
        DisplayLine::CommentBody { depth, text } => Line::from(vec![
            Span::raw("  ".repeat(*depth)),
            Span::styled("│ ", Style::default().fg(theme.indent_color(*depth))),
            Span::raw("  "),
            Span::styled(text.clone(), Style::default().fg(p.text)),
        ]),
        DisplayLine::Blank => Line::raw(""),
    }
}
