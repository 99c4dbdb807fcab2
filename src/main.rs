mod api;
mod app;
mod cli;
mod color;
mod config;
mod dispatch;
mod error;
mod form;
mod i18n;
mod logging;
mod model;
mod router;
#[cfg(test)]
mod test_support;
mod ui;
mod validation;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use api::HttpOrderStatusApi;
use app::{App, Focus, FormState};
use cli::{Cli, Commands};
use color::PickerMode;
use dispatch::OrderStatusApi;
use i18n::Translator;
use router::Screen;

fn main() {
    logging::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!(error = %format!("{:#}", e), "exiting with error");
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = config::resolve(cli.api_url, cli.locale, cli.token, config::load_file_config());
    if !Translator::is_supported(&settings.locale) {
        tracing::warn!(locale = %settings.locale, "no catalog for locale, labels fall back to English");
    }
    tracing::info!(api_url = %settings.api_url, locale = %settings.locale, "starting");

    let api: Arc<dyn OrderStatusApi> = Arc::new(HttpOrderStatusApi::new(
        &settings.api_url,
        settings.token.clone(),
    ));

    match cli.command {
        Some(Commands::List) => print_list(api.as_ref(), &settings.locale),
        Some(Commands::New) => {
            let mut app = App::new(api, &settings.locale, Screen::Form);
            app.open_new_form();
            run_tui(app)
        }
        Some(Commands::Edit { slug }) => {
            let mut app = App::new(api, &settings.locale, Screen::Form);
            app.trigger_record_fetch(&slug);
            run_tui(app)
        }
        None => {
            let mut app = App::new(api, &settings.locale, Screen::List);
            app.trigger_list_fetch();
            run_tui(app)
        }
    }
}

fn print_list(api: &dyn OrderStatusApi, locale: &str) -> anyhow::Result<()> {
    let statuses = api
        .list(locale)
        .with_context(|| format!("fetching order statuses for '{}'", locale))?;
    if statuses.is_empty() {
        println!("No order statuses yet. Create one with:");
        println!("  order-status-admin new");
        return Ok(());
    }
    for status in &statuses {
        let marker = if status.is_translated_into(locale) { "" } else { " (untranslated)" };
        println!(
            "  {:>3}. {} {} [{}]{}",
            status.serial,
            status.name,
            status.color,
            status.translated_languages.join(", "),
            marker
        );
    }
    Ok(())
}

fn run_tui(mut app: App) -> anyhow::Result<()> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    let result = run_app(&mut terminal, &mut app);

    // Cleanup
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor().context("failed to show cursor")?;

    result.context("terminal I/O failed")
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), io::Error> {
    loop {
        app.poll_background();

        terminal.draw(|f| {
            match app.screen() {
                Screen::List => ui::render_list(f, app),
                Screen::Form => ui::render_form(f, app),
            }
            if app.show_help {
                ui::render_help(f, app);
            }
        })?;

        // Poll with a timeout so background results are picked up
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                app.status_message = None;

                if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
                {
                    app.should_quit = true;
                } else if app.show_help {
                    app.show_help = false;
                } else {
                    match app.screen() {
                        Screen::List => handle_list_input(app, key.code),
                        Screen::Form => handle_form_input(app, key),
                    }
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_list_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_prev(),
        KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => {
            if !app.loading {
                app.open_selected_form();
            }
        }
        KeyCode::Char('n') => app.open_new_form(),
        KeyCode::Char('r') => app.trigger_list_fetch(),
        KeyCode::Char('?') => app.show_help = true,
        _ => {}
    }
}

fn handle_form_input(app: &mut App, key: KeyEvent) {
    let Some(form) = app.form.as_mut() else {
        // still loading the record, or loading failed
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
            app.go_back();
        }
        return;
    };

    if form.editing {
        match form.picker.as_ref().map(|p| p.mode) {
            Some(mode) => handle_picker_input(form, key, mode),
            None => match key.code {
                KeyCode::Enter | KeyCode::Esc | KeyCode::Tab => form.end_edit(),
                KeyCode::Backspace => form.backspace(),
                KeyCode::Char(c) => form.type_char(c),
                _ => {}
            },
        }
        return;
    }

    match key.code {
        KeyCode::Char('j') | KeyCode::Down | KeyCode::Tab => form.focus_next(),
        KeyCode::Char('k') | KeyCode::Up | KeyCode::BackTab => form.focus_prev(),
        KeyCode::Enter => match form.focus() {
            Focus::Input(_) => form.begin_edit(),
            Focus::Submit => app.submit_form(),
            Focus::Back => app.go_back(),
        },
        KeyCode::Char('s') => app.submit_form(),
        KeyCode::Char('b') => {
            if form.is_update() {
                app.go_back();
            }
        }
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Esc | KeyCode::Char('q') => app.go_back(),
        _ => {}
    }
}

fn handle_picker_input(form: &mut FormState, key: KeyEvent, mode: PickerMode) {
    let step = if key.modifiers.contains(KeyModifiers::SHIFT) {
        10.0
    } else {
        1.0
    };

    match (mode, key.code) {
        (_, KeyCode::Esc) => form.end_edit(),
        (_, KeyCode::Tab) => form.toggle_picker_mode(),
        (PickerMode::Slider, KeyCode::Left | KeyCode::Char('h')) => form.adjust_color(-step),
        (PickerMode::Slider, KeyCode::Right | KeyCode::Char('l')) => form.adjust_color(step),
        (PickerMode::Slider, KeyCode::Up | KeyCode::Char('k')) => form.move_slider_focus(false),
        (PickerMode::Slider, KeyCode::Down | KeyCode::Char('j')) => form.move_slider_focus(true),
        (PickerMode::Slider, KeyCode::Enter) => form.end_edit(),
        (PickerMode::HexInput, KeyCode::Enter) => form.toggle_picker_mode(),
        (PickerMode::HexInput, KeyCode::Backspace) => form.backspace(),
        (PickerMode::HexInput, KeyCode::Char(c)) => form.type_char(c),
        _ => {}
    }
}
