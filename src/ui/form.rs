use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use super::{hint_spans, status_span, ACCENT, DIM, ERROR};
use crate::app::{App, Focus, FormState};
use crate::color::{self, ColorPicker, PickerMode, SliderFocus};
use crate::validation::Field;

const SLIDER_WIDTH: usize = 24;

pub fn render_form(f: &mut Frame, app: &App) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(1),
        ])
        .split(f.area());

    render_top_bar(f, app, outer[0]);
    match app.form.as_ref() {
        Some(form) => render_body(f, app, form, outer[1]),
        None => render_placeholder(f, app, outer[1]),
    }
    render_bottom_bar(f, app, outer[2]);
}

/// "Add" or "Update", depending on whether a stored record is being edited.
fn mode_label(app: &App) -> &str {
    let is_update = app.form.as_ref().is_some_and(FormState::is_update);
    app.translator.t(if is_update {
        "form:button-label-update"
    } else {
        "form:button-label-add"
    })
}

fn render_top_bar(f: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::styled(
        format!(
            " {} {}",
            mode_label(app),
            app.translator.t("form:button-label-order-status")
        ),
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    )];
    if let Some(record) = app.form.as_ref().and_then(|form| form.initial.as_ref()) {
        spans.push(Span::styled(
            format!(": {}", record.name),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ));
    }
    spans.push(Span::styled(format!("  [{}]", app.locale()), Style::default().fg(DIM)));

    let bar = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(bar, area);
}

fn render_placeholder(f: &mut Frame, app: &App, area: Rect) {
    let line = match app.error {
        Some(ref err) => Line::from(Span::styled(format!("  {}", err), Style::default().fg(ERROR))),
        None => Line::from(Span::styled(
            format!("  {}", app.translator.t("text-loading")),
            Style::default().fg(ACCENT),
        )),
    };
    f.render_widget(Paragraph::new(line), area);
}

fn render_body(f: &mut Frame, app: &App, form: &FormState, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(33), Constraint::Percentage(67)])
        .split(area);

    // Description
    let t = &app.translator;
    let description = Paragraph::new(vec![
        Line::from(Span::styled(
            t.t("form:input-label-description"),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "{} {}",
                mode_label(app),
                t.t("form:order-status-description-helper-text")
            ),
            Style::default().fg(DIM),
        )),
    ])
    .wrap(Wrap { trim: true })
    .block(Block::default().borders(Borders::NONE).title(" "));
    f.render_widget(description, columns[0]);

    // Card
    let card = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DIM));
    let inner = card.inner(columns[1]);
    f.render_widget(card, columns[1]);

    let mut lines: Vec<Line> = Vec::new();
    for field in Field::ALL {
        push_field(&mut lines, app, form, field);
        lines.push(Line::from(""));
    }
    lines.push(button_row(app, form));

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

fn label_key(field: Field) -> &'static str {
    match field {
        Field::Name => "form:input-label-name",
        Field::Serial => "form:input-label-serial",
        Field::Color => "form:input-label-color",
    }
}

fn push_field<'a>(lines: &mut Vec<Line<'a>>, app: &'a App, form: &'a FormState, field: Field) {
    let t = &app.translator;
    let selected = form.focus() == Focus::Input(field);
    let editing = selected && form.editing;
    let value = form.controller.value(field);

    lines.push(Line::from(vec![
        Span::styled(if selected { "> " } else { "  " }, marker_style(selected)),
        Span::styled(t.t(label_key(field)), marker_style(selected)),
        Span::styled(if editing { " (editing)" } else { "" }, Style::default().fg(ACCENT)),
    ]));

    if field == Field::Color {
        // live color code next to a swatch of whatever the field holds now
        let swatch = color::parse_hex(value)
            .map(|(r, g, b)| Color::Rgb(r, g, b))
            .unwrap_or(Color::Reset);
        lines.push(Line::from(vec![
            Span::raw("    "),
            Span::styled("      ", Style::default().bg(swatch)),
            Span::styled(format!(" {}", value), Style::default().fg(Color::White)),
        ]));
        if let Some(picker) = form.picker.as_ref().filter(|_| editing) {
            push_picker(lines, picker);
        }
    } else {
        lines.push(Line::from(vec![
            Span::raw("    "),
            Span::styled(
                format!("[ {}{} ]", value, if editing { "_" } else { "" }),
                Style::default().fg(if editing { Color::White } else { Color::Gray }),
            ),
        ]));
    }

    if field == Field::Serial {
        lines.push(Line::from(Span::styled(
            format!("    {}", t.t("form:input-label-serial-help-text")),
            Style::default().fg(DIM),
        )));
    }

    if let Some(err) = form.controller.error(field) {
        lines.push(Line::from(Span::styled(
            format!("    {}", t.t(err)),
            Style::default().fg(ERROR),
        )));
    }
}

fn push_picker(lines: &mut Vec<Line>, picker: &ColorPicker) {
    let c = picker.color;
    let sliders = [
        (SliderFocus::Hue, "H", c.h, 360.0),
        (SliderFocus::Saturation, "S", c.s, 100.0),
        (SliderFocus::Lightness, "L", c.l, 100.0),
    ];
    let in_slider_mode = picker.mode == PickerMode::Slider;
    for (focus, label, value, max) in sliders {
        let focused = in_slider_mode && picker.focus == focus;
        let filled = ((value / max) * SLIDER_WIDTH as f64).round() as usize;
        let filled = filled.min(SLIDER_WIDTH);
        lines.push(Line::from(vec![
            Span::styled(
                format!("    {} {} ", if focused { ">" } else { " " }, label),
                Style::default().fg(if focused { ACCENT } else { DIM }),
            ),
            Span::styled("█".repeat(filled), Style::default().fg(if focused { Color::White } else { DIM })),
            Span::styled("░".repeat(SLIDER_WIDTH - filled), Style::default().fg(DIM)),
            Span::styled(format!(" {:>3.0}", value), Style::default().fg(DIM)),
        ]));
    }

    let hex_style = if in_slider_mode {
        Style::default().fg(DIM)
    } else {
        Style::default().fg(Color::White)
    };
    lines.push(Line::from(vec![
        Span::styled("      hex ", Style::default().fg(DIM)),
        Span::styled(
            format!("{}{}", picker.hex_input, if in_slider_mode { "" } else { "_" }),
            hex_style,
        ),
    ]));
}

fn button_row<'a>(app: &'a App, form: &FormState) -> Line<'a> {
    let t = &app.translator;
    let mut spans = vec![Span::raw("  ")];

    if form.is_update() {
        let selected = form.focus() == Focus::Back;
        spans.push(Span::styled(
            format!(" {} ", t.t("form:button-label-back")),
            button_style(selected, Color::Gray),
        ));
        spans.push(Span::raw("  "));
    }

    let selected = form.focus() == Focus::Submit;
    let loading = if app.is_submitting() { " …" } else { "" };
    spans.push(Span::styled(
        format!(
            " {} {}{} ",
            mode_label(app),
            t.t("form:button-label-order-status"),
            loading
        ),
        if app.is_submitting() {
            Style::default().fg(Color::Black).bg(DIM)
        } else {
            button_style(selected, ACCENT)
        },
    ));
    Line::from(spans)
}

fn button_style(selected: bool, color: Color) -> Style {
    if selected {
        Style::default()
            .fg(Color::Black)
            .bg(color)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(color)
    }
}

fn marker_style(selected: bool) -> Style {
    if selected {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DIM)
    }
}

fn render_bottom_bar(f: &mut Frame, app: &App, area: Rect) {
    if let Some(ref msg) = app.status_message {
        f.render_widget(Paragraph::new(status_span(msg)), area);
        return;
    }

    let picker_mode = app
        .form
        .as_ref()
        .and_then(|form| form.picker.as_ref())
        .map(|picker| picker.mode);
    let editing = app.form.as_ref().is_some_and(|form| form.editing);

    let hints: &[(&str, &str)] = match picker_mode {
        Some(PickerMode::Slider) => &[
            ("←/→", "adjust"),
            ("Shift", "x10"),
            ("↑/↓", "slider"),
            ("Tab", "hex"),
            ("Esc", "done"),
        ],
        Some(PickerMode::HexInput) => &[("type", "hex"), ("Enter", "apply"), ("Tab", "sliders"), ("Esc", "done")],
        None if editing => &[("type", "edit"), ("Enter/Esc", "done")],
        None => &[
            ("j/k", "nav"),
            ("Enter", "edit/press"),
            ("s", "submit"),
            ("b", "back"),
            ("?", "help"),
            ("Esc", "leave"),
        ],
    };
    f.render_widget(Paragraph::new(Line::from(hint_spans(hints))), area);
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    use super::*;
    use crate::router::Screen;
    use crate::test_support::{record, FakeApi};
    use crate::ui::buffer_text;

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|f| render_form(f, app)).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    fn app() -> App {
        App::new(Arc::new(FakeApi::default()), "en", Screen::List)
    }

    #[test]
    fn new_form_has_add_label_and_no_back_button() {
        let mut app = app();
        app.open_new_form();
        let screen = draw(&app);
        assert!(screen.contains("Add Order Status"));
        assert!(screen.contains("#d87b64"));
        assert!(!screen.contains(" Back "));
    }

    #[test]
    fn edit_form_has_update_label_and_back_button() {
        let mut app = app();
        app.statuses = vec![record(7, Some("pending"), &["en"])];
        app.open_selected_form();
        let screen = draw(&app);
        assert!(screen.contains("Update Order Status"));
        assert!(screen.contains(" Back "));
        assert!(screen.contains("Pending"));
    }

    #[test]
    fn errors_render_translated() {
        let mut app = app();
        app.open_new_form();
        let form = app.form.as_mut().unwrap();
        form.controller.validate();
        form.controller.set_error(Field::Color, "Color already used");
        let screen = draw(&app);
        assert!(screen.contains("Name is required"));
        assert!(screen.contains("Color already used"));
    }

    #[test]
    fn picker_shows_sliders_while_editing_color() {
        let mut app = app();
        app.open_new_form();
        let form = app.form.as_mut().unwrap();
        form.focus_index = 2;
        form.begin_edit();
        let screen = draw(&app);
        assert!(screen.contains("hex #d87b64"));
        assert!(screen.contains("█"));
    }

    #[test]
    fn submit_button_shows_loading() {
        let mut app = app();
        app.open_new_form();
        app.creating = true;
        let screen = draw(&app);
        assert!(screen.contains("Add Order Status …"));
    }
}
