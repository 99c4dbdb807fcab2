use crate::error::ApiError;
use crate::model::{CreateOrderStatusInput, OrderStatus, SubmissionInput, UpdateOrderStatusInput};
use crate::validation::FormValues;

/// The admin API operations the client needs. Implemented over HTTP by
/// `api::HttpOrderStatusApi`.
pub trait OrderStatusApi: Send + Sync {
    fn create(&self, input: &CreateOrderStatusInput) -> Result<OrderStatus, ApiError>;
    fn update(&self, input: &UpdateOrderStatusInput) -> Result<OrderStatus, ApiError>;
    fn fetch(&self, slug: &str, language: &str) -> Result<OrderStatus, ApiError>;
    fn list(&self, language: &str) -> Result<Vec<OrderStatus>, ApiError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentKind {
    Create,
    Update,
}

/// What one submit will do. Built by `decide`, consumed by `dispatch`.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitIntent {
    Create(CreateOrderStatusInput),
    Update(UpdateOrderStatusInput),
}

impl SubmitIntent {
    pub fn kind(&self) -> IntentKind {
        match self {
            SubmitIntent::Create(_) => IntentKind::Create,
            SubmitIntent::Update(_) => IntentKind::Update,
        }
    }
}

/// Choose between creating and updating.
///
/// A record that has no translation for `locale` yet gets a new localized
/// record, linked to the existing one through its slug.
pub fn decide(values: FormValues, locale: &str, initial: Option<&OrderStatus>) -> SubmitIntent {
    let input = SubmissionInput {
        name: values.name,
        color: values.color,
        serial: values.serial,
        language: locale.to_string(),
    };

    match initial {
        Some(record) if record.is_translated_into(locale) => {
            SubmitIntent::Update(UpdateOrderStatusInput {
                input,
                id: record.id,
            })
        }
        _ => SubmitIntent::Create(CreateOrderStatusInput {
            input,
            slug: initial.and_then(OrderStatus::slug).map(str::to_string),
        }),
    }
}

pub fn dispatch(api: &dyn OrderStatusApi, intent: &SubmitIntent) -> Result<OrderStatus, ApiError> {
    let result = match intent {
        SubmitIntent::Create(input) => api.create(input),
        SubmitIntent::Update(input) => api.update(input),
    };
    match &result {
        Ok(record) => tracing::info!(kind = ?intent.kind(), id = record.id, "order status saved"),
        Err(e) => tracing::warn!(kind = ?intent.kind(), error = %e, "order status submission failed"),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{record, Call, FakeApi};
    use crate::validation::{Field, FieldErrors};

    fn values() -> FormValues {
        FormValues {
            name: "Pending".into(),
            serial: 2,
            color: "#d87b64".into(),
        }
    }

    #[test]
    fn no_initial_values_creates() {
        let intent = decide(values(), "en", None);
        match intent {
            SubmitIntent::Create(input) => {
                assert_eq!(input.slug, None);
                assert_eq!(input.input.language, "en");
                assert_eq!(input.input.name, "Pending");
            }
            other => panic!("expected create, got {other:?}"),
        }
    }

    #[test]
    fn missing_translation_creates_with_slug() {
        let initial = record(7, Some("pending"), &["en"]);
        let intent = decide(values(), "fr", Some(&initial));
        assert_eq!(
            intent,
            SubmitIntent::Create(CreateOrderStatusInput {
                input: SubmissionInput {
                    name: "Pending".into(),
                    color: "#d87b64".into(),
                    serial: 2,
                    language: "fr".into(),
                },
                slug: Some("pending".into()),
            })
        );
    }

    #[test]
    fn missing_translation_without_slug_creates_bare() {
        let initial = record(7, None, &["en"]);
        let intent = decide(values(), "de", Some(&initial));
        assert!(matches!(intent, SubmitIntent::Create(ref c) if c.slug.is_none()));
    }

    #[test]
    fn absent_translated_languages_creates() {
        let initial = record(7, Some("pending"), &[]);
        assert_eq!(decide(values(), "en", Some(&initial)).kind(), IntentKind::Create);
    }

    #[test]
    fn existing_translation_updates_by_id() {
        let initial = record(7, None, &["en"]);
        match decide(values(), "en", Some(&initial)) {
            SubmitIntent::Update(input) => {
                assert_eq!(input.id, 7);
                assert_eq!(input.input.language, "en");
            }
            other => panic!("expected update, got {other:?}"),
        }
    }

    #[test]
    fn dispatch_calls_exactly_one_operation() {
        let api = FakeApi::default();
        let initial = record(7, Some("pending"), &["en", "de"]);

        dispatch(&api, &decide(values(), "de", Some(&initial))).unwrap();
        dispatch(&api, &decide(values(), "fr", Some(&initial))).unwrap();
        dispatch(&api, &decide(values(), "fr", None)).unwrap();

        let calls = api.calls();
        assert_eq!(calls.len(), 3);
        assert!(matches!(calls[0], Call::Update(ref u) if u.id == 7));
        assert!(matches!(calls[1], Call::Create(ref c) if c.slug.as_deref() == Some("pending")));
        assert!(matches!(calls[2], Call::Create(ref c) if c.slug.is_none()));
    }

    #[test]
    fn dispatch_passes_rejections_through() {
        let mut errors = FieldErrors::new();
        errors.push(Field::Name, "Name taken");
        let api = FakeApi::rejecting(errors.clone());

        let err = dispatch(&api, &decide(values(), "en", None)).unwrap_err();
        assert_eq!(err.field_errors(), Some(&errors));
    }
}
