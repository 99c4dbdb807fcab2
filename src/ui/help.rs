use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use super::{ACCENT, DIM};
use crate::app::App;
use crate::router::Screen;

pub fn render_help(f: &mut Frame, app: &App) {
    let area = f.area();
    let width = area.width.saturating_sub(6).clamp(40, 80);
    let height = area.height.saturating_sub(4).clamp(10, 22);
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    let popup = Rect::new(x, y, width.min(area.width), height.min(area.height));

    f.render_widget(Clear, popup);

    let current = match app.screen() {
        Screen::List => "list",
        Screen::Form => "form",
    };
    let mut lines: Vec<Line> = vec![
        Line::from(vec![
            Span::styled("Commands", Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
            Span::styled(format!("  (current: {})", current), Style::default().fg(DIM)),
        ]),
        Line::from(""),
        Line::from(Span::styled("Global", Style::default().fg(ACCENT))),
        Line::from("  ?: toggle help  |  Ctrl+C: quit"),
        Line::from(""),
        Line::from(Span::styled("List", Style::default().fg(ACCENT))),
        Line::from("  j/k or arrows: navigate  |  Enter: edit  |  n: new"),
        Line::from("  r: refresh  |  q/Esc: quit"),
        Line::from(""),
        Line::from(Span::styled("Form", Style::default().fg(ACCENT))),
        Line::from("  j/k or Tab: move  |  Enter: edit field or press button"),
        Line::from("  s: submit  |  b: back (existing records)  |  Esc: leave"),
        Line::from("  color: Left/Right adjust, Shift x10, Up/Down slider, Tab hex"),
        Line::from(""),
        Line::from(Span::styled("Press any key to close", Style::default().fg(DIM))),
    ];

    let max_body_lines = popup.height.saturating_sub(2) as usize;
    lines.truncate(max_body_lines);

    let block = Block::default()
        .title(Span::styled(" Help ", Style::default().fg(ACCENT)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT));
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }).block(block), popup);
}
