use std::sync::mpsc;
use std::sync::Arc;
use std::thread;

use crate::color::{ColorPicker, PickerMode};
use crate::dispatch::{self, IntentKind, OrderStatusApi};
use crate::error::ApiError;
use crate::form::FormController;
use crate::i18n::Translator;
use crate::model::OrderStatus;
use crate::router::{Router, Screen};
use crate::validation::Field;

pub enum BgMessage {
    ListLoaded(Result<Vec<OrderStatus>, ApiError>),
    RecordLoaded(Result<OrderStatus, ApiError>),
    Submitted {
        session: u64,
        kind: IntentKind,
        result: Result<OrderStatus, ApiError>,
    },
}

/// One-line message for the bottom bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    Ok(String),
    Error(String),
}

/// What the cursor is on in the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input(Field),
    Submit,
    Back,
}

pub struct FormState {
    /// The record being edited; `None` for a new order status.
    pub initial: Option<OrderStatus>,
    pub controller: FormController,
    pub focus_index: usize,
    pub editing: bool,
    /// Present while the color input is being edited.
    pub picker: Option<ColorPicker>,
    /// Identifies this form instance; submission results carry it back.
    pub session: u64,
}

impl FormState {
    pub fn new(initial: Option<OrderStatus>) -> Self {
        Self {
            controller: FormController::new(initial.as_ref()),
            initial,
            focus_index: 0,
            editing: false,
            picker: None,
            session: 0,
        }
    }

    pub fn is_update(&self) -> bool {
        self.initial.is_some()
    }

    fn focus_count(&self) -> usize {
        // inputs + submit, plus back when editing a stored record
        Field::ALL.len() + if self.is_update() { 2 } else { 1 }
    }

    pub fn focus(&self) -> Focus {
        match Field::ALL.get(self.focus_index) {
            Some(field) => Focus::Input(*field),
            None if self.focus_index == Field::ALL.len() => Focus::Submit,
            None => Focus::Back,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus_index = (self.focus_index + 1) % self.focus_count();
    }

    pub fn focus_prev(&mut self) {
        let count = self.focus_count();
        self.focus_index = (self.focus_index + count - 1) % count;
    }

    pub fn begin_edit(&mut self) {
        if let Focus::Input(field) = self.focus() {
            self.editing = true;
            if field == Field::Color {
                self.picker = Some(ColorPicker::new(self.controller.value(Field::Color)));
            }
        }
    }

    pub fn end_edit(&mut self) {
        if let Some(picker) = self.picker.as_mut() {
            if picker.mode == PickerMode::HexInput {
                // whatever was typed stays in the field, valid or not
                let typed = picker.hex_input.clone();
                self.controller.set_value(Field::Color, typed);
            }
        }
        self.editing = false;
        self.picker = None;
    }

    pub fn type_char(&mut self, c: char) {
        match (self.focus(), self.picker.as_mut()) {
            (Focus::Input(Field::Color), Some(picker)) => {
                if picker.mode == PickerMode::HexInput {
                    picker.hex_input.push(c);
                }
            }
            (Focus::Input(Field::Serial), _) => {
                if c.is_ascii_digit() || c == '-' {
                    self.controller.push_char(Field::Serial, c);
                }
            }
            (Focus::Input(field), _) => self.controller.push_char(field, c),
            _ => {}
        }
    }

    pub fn backspace(&mut self) {
        match (self.focus(), self.picker.as_mut()) {
            (Focus::Input(Field::Color), Some(picker)) => {
                if picker.mode == PickerMode::HexInput {
                    picker.hex_input.pop();
                }
            }
            (Focus::Input(field), _) => self.controller.pop_char(field),
            _ => {}
        }
    }

    /// Move the focused slider and write the result into the color field.
    pub fn adjust_color(&mut self, delta: f64) {
        if let Some(picker) = self.picker.as_mut() {
            if picker.mode == PickerMode::Slider {
                picker.adjust(delta);
                let hex = picker.hex();
                self.controller.set_value(Field::Color, hex);
            }
        }
    }

    pub fn commit_hex(&mut self) {
        if let Some(picker) = self.picker.as_mut() {
            let typed = picker.hex_input.clone();
            picker.commit_hex_input();
            self.controller.set_value(Field::Color, typed);
        }
    }

    /// Switch between sliders and hex typing. Leaving hex mode applies the
    /// typed code first.
    pub fn toggle_picker_mode(&mut self) {
        let in_hex = self
            .picker
            .as_ref()
            .is_some_and(|p| p.mode == PickerMode::HexInput);
        if in_hex {
            self.commit_hex();
        }
        if let Some(picker) = self.picker.as_mut() {
            picker.toggle_mode();
        }
    }

    pub fn move_slider_focus(&mut self, forward: bool) {
        if let Some(picker) = self.picker.as_mut() {
            picker.focus = if forward {
                picker.focus.next()
            } else {
                picker.focus.prev()
            };
        }
    }
}

pub struct App {
    pub router: Router,
    pub translator: Translator,
    api: Arc<dyn OrderStatusApi>,
    pub statuses: Vec<OrderStatus>,
    pub selected: usize,
    pub loading: bool,
    pub error: Option<String>,
    pub form: Option<FormState>,
    pub creating: bool,
    pub updating: bool,
    pub status_message: Option<StatusMessage>,
    pub show_help: bool,
    pub should_quit: bool,
    form_session: u64,
    bg_rx: mpsc::Receiver<BgMessage>,
    bg_tx: mpsc::Sender<BgMessage>,
}

impl App {
    pub fn new(api: Arc<dyn OrderStatusApi>, locale: &str, start: Screen) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            router: Router::new(locale, start),
            translator: Translator::new(locale),
            api,
            statuses: Vec::new(),
            selected: 0,
            loading: false,
            error: None,
            form: None,
            creating: false,
            updating: false,
            status_message: None,
            show_help: false,
            should_quit: false,
            form_session: 0,
            bg_rx: rx,
            bg_tx: tx,
        }
    }

    pub fn screen(&self) -> Screen {
        self.router.current()
    }

    pub fn locale(&self) -> &str {
        self.router.locale()
    }

    pub fn is_submitting(&self) -> bool {
        self.creating || self.updating
    }

    pub fn selected_status(&self) -> Option<&OrderStatus> {
        self.statuses.get(self.selected)
    }

    pub fn trigger_list_fetch(&mut self) {
        self.loading = true;
        self.error = None;
        let api = Arc::clone(&self.api);
        let locale = self.locale().to_string();
        let tx = self.bg_tx.clone();
        thread::spawn(move || {
            let result = api.list(&locale);
            let _ = tx.send(BgMessage::ListLoaded(result));
        });
    }

    /// Load a record by slug and open its form once it arrives.
    pub fn trigger_record_fetch(&mut self, slug: &str) {
        self.loading = true;
        self.error = None;
        self.form = None;
        let api = Arc::clone(&self.api);
        let locale = self.locale().to_string();
        let slug = slug.to_string();
        let tx = self.bg_tx.clone();
        thread::spawn(move || {
            let result = api.fetch(&slug, &locale);
            let _ = tx.send(BgMessage::RecordLoaded(result));
        });
    }

    pub fn poll_background(&mut self) {
        while let Ok(msg) = self.bg_rx.try_recv() {
            self.handle_bg_message(msg);
        }
    }

    fn handle_bg_message(&mut self, msg: BgMessage) {
        match msg {
            BgMessage::ListLoaded(Ok(statuses)) => {
                tracing::debug!(count = statuses.len(), "order statuses loaded");
                self.statuses = statuses;
                self.selected = self.selected.min(self.statuses.len().saturating_sub(1));
                self.loading = false;
            }
            BgMessage::RecordLoaded(Ok(record)) => {
                self.install_form(Some(record));
                self.loading = false;
            }
            BgMessage::ListLoaded(Err(e)) | BgMessage::RecordLoaded(Err(e)) => {
                tracing::warn!(error = %e, "load failed");
                self.error = Some(e.to_string());
                self.loading = false;
            }
            BgMessage::Submitted {
                session,
                kind,
                result,
            } => self.finish_submit(session, kind, result),
        }
    }

    pub fn select_next(&mut self) {
        if !self.statuses.is_empty() {
            self.selected = (self.selected + 1).min(self.statuses.len() - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn install_form(&mut self, initial: Option<OrderStatus>) {
        self.form_session += 1;
        let mut form = FormState::new(initial);
        form.session = self.form_session;
        self.form = Some(form);
    }

    pub fn open_new_form(&mut self) {
        self.install_form(None);
        self.router.navigate(Screen::Form);
    }

    pub fn open_selected_form(&mut self) {
        if let Some(record) = self.selected_status().cloned() {
            self.install_form(Some(record));
            self.router.navigate(Screen::Form);
        }
    }

    /// Leave the current screen, or quit when there is nowhere to go back to.
    pub fn go_back(&mut self) {
        if self.router.back() {
            if self.screen() != Screen::Form {
                self.form = None;
            }
        } else {
            self.should_quit = true;
        }
    }

    /// Validate the form and, if it passes, send exactly one create or update
    /// on a worker thread. Ignored while a submission is in flight.
    pub fn submit_form(&mut self) {
        if self.is_submitting() {
            return;
        }
        let locale = self.router.locale().to_string();
        let Some(form) = self.form.as_mut() else {
            return;
        };
        if form.editing {
            form.end_edit();
        }
        let Some(values) = form.controller.validate() else {
            tracing::debug!(errors = ?form.controller.errors(), "submission blocked by validation");
            return;
        };

        let intent = dispatch::decide(values, &locale, form.initial.as_ref());
        let session = form.session;
        let kind = intent.kind();
        tracing::info!(?kind, locale = %locale, "submitting order status");
        match kind {
            IntentKind::Create => self.creating = true,
            IntentKind::Update => self.updating = true,
        }

        let api = Arc::clone(&self.api);
        let tx = self.bg_tx.clone();
        thread::spawn(move || {
            let result = dispatch::dispatch(api.as_ref(), &intent);
            let _ = tx.send(BgMessage::Submitted {
                session,
                kind,
                result,
            });
        });
    }

    fn error_message(&self, e: &ApiError) -> StatusMessage {
        StatusMessage::Error(format!("{}: {}", self.translator.t("text-error"), e))
    }

    fn finish_submit(&mut self, session: u64, kind: IntentKind, result: Result<OrderStatus, ApiError>) {
        match kind {
            IntentKind::Create => self.creating = false,
            IntentKind::Update => self.updating = false,
        }

        // The form that sent this may have been closed or replaced meanwhile.
        // Its outcome is only reported then; the open form is left alone.
        if !self.form.as_ref().is_some_and(|form| form.session == session) {
            tracing::info!(session, ok = result.is_ok(), "submission finished after its form closed");
            self.status_message = Some(match result {
                Ok(_) => {
                    if self.screen() == Screen::List {
                        self.trigger_list_fetch();
                    }
                    StatusMessage::Ok(self.translator.t("text-saved").to_string())
                }
                Err(e) => self.error_message(&e),
            });
            return;
        }

        match result {
            Ok(mut record) => {
                let locale = self.locale().to_string();
                if !record.is_translated_into(&locale) {
                    record.translated_languages.push(locale);
                }
                self.status_message = Some(StatusMessage::Ok(self.translator.t("text-saved").to_string()));
                if self.router.can_go_back() {
                    self.go_back();
                    if self.screen() == Screen::List {
                        self.trigger_list_fetch();
                    }
                } else if let Some(form) = self.form.as_mut() {
                    form.initial = Some(record);
                }
            }
            Err(e) => match (e.field_errors(), self.form.as_mut()) {
                (Some(errors), Some(form)) => form.controller.apply_server_errors(errors),
                _ => self.status_message = Some(self.error_message(&e)),
            },
        }
    }
}
