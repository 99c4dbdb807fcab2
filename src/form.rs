use crate::model::OrderStatus;
use crate::validation::{self, Field, FieldErrors, FormValues};

pub const DEFAULT_NAME: &str = "";
pub const DEFAULT_SERIAL: i64 = 1;
pub const DEFAULT_COLOR: &str = "#d87b64";

/// Field buffers and error slots for one form session.
///
/// Values are kept as the text the user typed; they only become typed
/// `FormValues` when `validate` succeeds.
#[derive(Debug, Clone, PartialEq)]
pub struct FormController {
    name: String,
    serial: String,
    color: String,
    errors: FieldErrors,
}

impl FormController {
    pub fn new(initial: Option<&OrderStatus>) -> Self {
        let (name, serial, color) = match initial {
            Some(record) => (record.name.clone(), record.serial, record.color.clone()),
            None => (DEFAULT_NAME.to_string(), DEFAULT_SERIAL, DEFAULT_COLOR.to_string()),
        };
        Self {
            name,
            serial: serial.to_string(),
            color,
            errors: FieldErrors::new(),
        }
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Serial => &self.serial,
            Field::Color => &self.color,
        }
    }

    /// Replace a field's text. Its error slot is cleared, the way an input
    /// re-validates on change after a failed submit.
    pub fn set_value(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Name => self.name = value,
            Field::Serial => self.serial = value,
            Field::Color => self.color = value,
        }
        self.errors.clear(field);
    }

    pub fn push_char(&mut self, field: Field, c: char) {
        let mut value = self.value(field).to_string();
        value.push(c);
        self.set_value(field, value);
    }

    pub fn pop_char(&mut self, field: Field) {
        let mut value = self.value(field).to_string();
        value.pop();
        self.set_value(field, value);
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.first(field)
    }

    /// Attach a manual error to a field, replacing whatever it showed.
    pub fn set_error(&mut self, field: Field, message: impl Into<String>) {
        self.errors.clear(field);
        self.errors.push(field, message);
    }

    /// Run the schema. On failure the error slots are replaced by the schema's
    /// findings and nothing may be submitted.
    pub fn validate(&mut self) -> Option<FormValues> {
        match validation::validate_inputs(&self.name, &self.serial, &self.color) {
            Ok(values) => {
                self.errors = FieldErrors::new();
                Some(values)
            }
            Err(errors) => {
                tracing::debug!(?errors, "form failed validation");
                self.errors = errors;
                None
            }
        }
    }

    /// Show the first server message of each field the server complained about.
    pub fn apply_server_errors(&mut self, errors: &FieldErrors) {
        for (field, messages) in errors.iter() {
            if let Some(first) = messages.first() {
                self.set_error(field, first.as_str());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{NAME_REQUIRED, SERIAL_MIN};

    fn record() -> OrderStatus {
        OrderStatus {
            id: 7,
            slug: Some("pending".into()),
            name: "Pending".into(),
            serial: 3,
            color: "#aabbcc".into(),
            language: Some("en".into()),
            translated_languages: vec!["en".into()],
        }
    }

    #[test]
    fn defaults_without_initial_values() {
        let form = FormController::new(None);
        assert_eq!(form.value(Field::Name), "");
        assert_eq!(form.value(Field::Serial), "1");
        assert_eq!(form.value(Field::Color), "#d87b64");
        assert!(form.errors().is_empty());
    }

    #[test]
    fn starts_from_initial_values() {
        let form = FormController::new(Some(&record()));
        assert_eq!(form.value(Field::Name), "Pending");
        assert_eq!(form.value(Field::Serial), "3");
        assert_eq!(form.value(Field::Color), "#aabbcc");
    }

    #[test]
    fn default_form_fails_only_on_name() {
        let mut form = FormController::new(None);
        assert!(form.validate().is_none());
        assert_eq!(form.error(Field::Name), Some(NAME_REQUIRED));
        assert_eq!(form.error(Field::Serial), None);
        assert_eq!(form.error(Field::Color), None);
    }

    #[test]
    fn editing_clears_that_fields_error() {
        let mut form = FormController::new(None);
        form.set_value(Field::Serial, "0");
        assert!(form.validate().is_none());
        assert_eq!(form.error(Field::Serial), Some(SERIAL_MIN));

        form.push_char(Field::Name, 'P');
        assert_eq!(form.error(Field::Name), None);
        assert_eq!(form.error(Field::Serial), Some(SERIAL_MIN));

        form.pop_char(Field::Serial);
        form.push_char(Field::Serial, '5');
        assert_eq!(form.error(Field::Serial), None);
        assert_eq!(form.validate().unwrap().serial, 5);
    }

    #[test]
    fn successful_validation_clears_manual_errors() {
        let mut form = FormController::new(Some(&record()));
        form.set_error(Field::Color, "server says no");
        assert!(form.validate().is_some());
        assert!(form.errors().is_empty());
    }

    #[test]
    fn server_errors_show_first_message_only_on_named_fields() {
        let mut form = FormController::new(Some(&record()));
        let mut errors = FieldErrors::new();
        errors.push(Field::Name, "Name taken");
        errors.push(Field::Name, "Name too long");
        form.apply_server_errors(&errors);

        assert_eq!(form.error(Field::Name), Some("Name taken"));
        assert_eq!(form.error(Field::Serial), None);
        assert_eq!(form.error(Field::Color), None);
    }
}
