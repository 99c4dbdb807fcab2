use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use super::{fit, hint_spans, status_span, ACCENT, DIM, ERROR, OK};
use crate::app::App;

pub fn render_list(f: &mut Frame, app: &App) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // top bar
            Constraint::Min(5),    // list
            Constraint::Length(1), // status/bottom bar
        ])
        .split(f.area());

    render_top_bar(f, app, outer[0]);
    render_main(f, app, outer[1]);
    render_bottom_bar(f, app, outer[2]);
}

fn render_top_bar(f: &mut Frame, app: &App, area: Rect) {
    let title = Paragraph::new(Line::from(vec![
        Span::styled(
            format!(" {}", app.translator.t("text-order-statuses")),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  [{}]", app.locale()), Style::default().fg(DIM)),
    ]))
    .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(title, area);
}

fn render_main(f: &mut Frame, app: &App, area: Rect) {
    if app.loading {
        let loading = Paragraph::new(Span::styled(
            format!("  {}", app.translator.t("text-loading")),
            Style::default().fg(ACCENT),
        ));
        f.render_widget(loading, area);
        return;
    }

    if let Some(ref err) = app.error {
        let error = Paragraph::new(vec![
            Line::from(Span::styled(
                format!("  {}", app.translator.t("text-error-loading")),
                Style::default().fg(ERROR).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(format!("  {}", err), Style::default().fg(ERROR))),
            Line::from(""),
            Line::from(Span::styled(
                format!("  {}", app.translator.t("text-retry-hint")),
                Style::default().fg(DIM),
            )),
        ]);
        f.render_widget(error, area);
        return;
    }

    if app.statuses.is_empty() {
        let empty = Paragraph::new(Span::styled(
            format!("  {}", app.translator.t("text-no-order-statuses")),
            Style::default().fg(DIM),
        ));
        f.render_widget(empty, area);
        return;
    }

    let name_width = (area.width as usize).saturating_sub(34).clamp(8, 40);
    let items: Vec<ListItem> = app
        .statuses
        .iter()
        .enumerate()
        .map(|(i, status)| {
            let is_selected = i == app.selected;
            let indicator = if is_selected { ">" } else { " " };
            let translated = status.is_translated_into(app.locale());

            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{} ", indicator),
                    Style::default().fg(if is_selected { ACCENT } else { DIM }),
                ),
                Span::styled(format!("{:>3} ", status.serial), Style::default().fg(DIM)),
                Span::styled("  ", Style::default().bg(status.swatch())),
                Span::styled(
                    format!(" {}", fit(&status.name, name_width)),
                    Style::default()
                        .fg(if is_selected { Color::White } else { Color::Gray })
                        .add_modifier(if is_selected { Modifier::BOLD } else { Modifier::empty() }),
                ),
                Span::styled(format!(" {:<8}", status.color), Style::default().fg(DIM)),
                Span::styled(
                    format!(" [{}]", status.translated_languages.join(", ")),
                    Style::default().fg(if translated { OK } else { DIM }),
                ),
            ]))
        })
        .collect();

    let list = List::new(items).highlight_style(Style::default()).block(
        Block::default()
            .borders(Borders::NONE)
            .title(Span::styled(
                format!(" {} ", app.statuses.len()),
                Style::default().fg(DIM),
            )),
    );

    let mut state = ListState::default().with_selected(Some(app.selected));
    f.render_stateful_widget(list, area, &mut state);
}

fn render_bottom_bar(f: &mut Frame, app: &App, area: Rect) {
    let spans = if let Some(ref msg) = app.status_message {
        vec![status_span(msg)]
    } else {
        hint_spans(&[
            ("j/k", "nav"),
            ("Enter", "edit"),
            ("n", "new"),
            ("r", "refresh"),
            ("?", "help"),
            ("q", "quit"),
        ])
    };
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
