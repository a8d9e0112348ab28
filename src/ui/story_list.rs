use crate::api::{HnApi, Item};
use crate::app::App;
use crate::text::{format_age, hostname, now_unix};
use crate::ui::theme::Theme;
use crate::ui::{help_line, render_header, split_chrome, status_line};
use html_escape::decode_html_entities;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

pub fn render<A: HnApi>(frame: &mut Frame, app: &App<A>, theme: &Theme) {
    let list = &app.list;
    let chrome = split_chrome(frame.area(), theme.layout.list_chrome_lines, 2);
    render_header(frame, chrome.header, &list.title, theme);

    let body = if let Some(status) = status_line(
        &list.phase,
        "Loading…",
        "Not found.",
        app.spinner_frame(),
        theme,
    ) {
        vec![status]
    } else if list.items.is_empty() {
        vec![Line::from(Span::styled(
            "  No stories found.",
            Style::default().fg(theme.palette.subtle),
        ))]
    } else {
        let now = now_unix();
        list.visible_range()
            .flat_map(|idx| story_rows(idx, &list.items[idx], idx == list.cursor, now, theme))
            .collect()
    };
    frame.render_widget(Paragraph::new(body), chrome.body);

    let help = help_line(
        format!(
            "  {}/{} · ↑/↓ navigate · enter: comments · o: open url · c: open hn · u: author · ?: help · q: quit",
            (list.cursor + 1).min(list.items.len()),
            list.items.len()
        ),
        theme,
    );
    frame.render_widget(Paragraph::new(vec![Line::raw(""), help]), chrome.footer);
}

fn story_rows(
    idx: usize,
    item: &Item,
    selected: bool,
    now: i64,
    theme: &Theme,
) -> [Line<'static>; 2] {
    let p = &theme.palette;
    let prefix = if selected {
        Span::styled("▶ ", Style::default().fg(p.accent))
    } else {
        Span::raw("  ")
    };
    let title_style = if selected {
        Style::default().fg(p.accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(p.text).add_modifier(Modifier::BOLD)
    };

    let title = Line::from(vec![
        prefix,
        Span::styled(
            format!("{:>4} ", format!("{}.", idx + 1)),
            Style::default().fg(p.dim),
        ),
        Span::styled(decode_html_entities(&item.title).into_owned(), title_style),
        Span::styled(
            format!("  ▲ {}", item.score),
            Style::default().fg(p.accent).add_modifier(Modifier::BOLD),
        ),
    ]);

    let meta_style = Style::default().fg(p.subtle);
    let mut meta = vec![Span::raw("       ")];
    if let Some(url) = item.url.as_deref().filter(|u| !u.is_empty()) {
        meta.push(Span::styled(
            hostname(url),
            Style::default().fg(p.green).add_modifier(Modifier::ITALIC),
        ));
        meta.push(Span::styled(" · ", meta_style));
    }
    meta.push(Span::styled(
        format!(
            "{} comments · by {} · {}",
            item.descendant_count,
            item.author_or_unknown(),
            format_age(item.created_at, now)
        ),
        meta_style,
    ));

    [title, Line::from(meta)]
}
