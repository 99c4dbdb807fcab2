mod form;
mod help;
mod list;

use ratatui::style::{Color, Style};
use ratatui::text::Span;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::StatusMessage;

pub use form::render_form;
pub use help::render_help;
pub use list::render_list;

const ACCENT: Color = Color::Rgb(216, 123, 100);
const DIM: Color = Color::Rgb(110, 110, 125);
const OK: Color = Color::Rgb(130, 200, 130);
const ERROR: Color = Color::Rgb(235, 95, 95);

/// Key hint pairs rendered as `key desc  key desc`.
fn hint_spans<'a>(hints: &[(&'a str, &'a str)]) -> Vec<Span<'a>> {
    let mut spans = Vec::new();
    for (key, desc) in hints {
        spans.push(Span::styled(format!(" {} ", key), Style::default().fg(ACCENT)));
        spans.push(Span::styled(format!("{} ", desc), Style::default().fg(DIM)));
    }
    spans
}

fn status_span(msg: &StatusMessage) -> Span<'static> {
    let (text, color) = match msg {
        StatusMessage::Ok(text) => (text, OK),
        StatusMessage::Error(text) => (text, ERROR),
    };
    Span::styled(format!(" {} ", text), Style::default().fg(color))
}

/// Pad or cut `s` to exactly `width` terminal columns.
fn fit(s: &str, width: usize) -> String {
    if s.width() <= width {
        return format!("{}{}", s, " ".repeat(width - s.width()));
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    used += 1;
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}

#[cfg(test)]
pub(crate) fn buffer_text(buffer: &ratatui::buffer::Buffer) -> String {
    let area = buffer.area;
    let mut out = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}
