use crate::app::View;
use crate::ui::theme::Theme;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

const SECTIONS: [(&str, View, &[(&str, &str)]); 3] = [
    (
        "Stories",
        View::List,
        &[
            ("j/k, ↓/↑", "move"),
            ("gg, G", "top / bottom"),
            ("Ctrl+d / Ctrl+u", "page down / up"),
            ("Enter", "open comments"),
            ("o", "open link (browser)"),
            ("c", "open discussion (browser)"),
            ("u", "submitter profile"),
            ("y", "copy link"),
            ("r", "refresh"),
        ],
    ),
    (
        "Comments",
        View::Comments,
        &[
            ("j/k, ↓/↑", "scroll"),
            ("gg, G", "top / bottom"),
            ("o / c", "open link / discussion"),
            ("u", "submitter profile"),
            ("r", "reload"),
            ("Esc / ← / h", "back"),
        ],
    ),
    (
        "User",
        View::User,
        &[
            ("j/k, ↓/↑", "scroll"),
            ("o", "open profile (browser)"),
            ("r", "reload"),
            ("Esc / ← / h", "back"),
        ],
    ),
];

pub fn render(frame: &mut Frame, active: View, theme: &Theme) {
    let area = frame.area();
    if area.width < 10 || area.height < 6 {
        return;
    }
    let p = &theme.palette;
    let header_style = Style::default().fg(p.text).add_modifier(Modifier::BOLD);
    let key_style = Style::default().fg(p.text).add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(p.subtle);

    let mut lines: Vec<Line<'static>> = vec![
        Line::from(Span::styled("Shortcuts", header_style)),
        Line::from(Span::styled(
            "Press ? or Esc to close. q quits anywhere.",
            desc_style,
        )),
    ];
    for (name, view, keys) in SECTIONS {
        lines.push(Line::raw(""));
        let title_style = if view == active {
            Style::default().fg(p.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(p.subtle).add_modifier(Modifier::BOLD)
        };
        lines.push(Line::from(Span::styled(name, title_style)));
        for (key, desc) in keys {
            lines.push(Line::from(vec![
                Span::styled(format!("  {key}"), key_style),
                Span::styled(format!(": {desc}"), desc_style),
            ]));
        }
    }

    let width = area.width.min(60);
    let height = (lines.len() as u16).saturating_add(2).min(area.height);
    let popup = centered(area, width, height);

    frame.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(" ? ", header_style));
    let paragraph = Paragraph::new(Text::from(lines))
        .wrap(Wrap { trim: true })
        .block(block);
    frame.render_widget(paragraph, popup);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    }
}
