use std::sync::Mutex;

use crate::dispatch::OrderStatusApi;
use crate::error::ApiError;
use crate::model::{CreateOrderStatusInput, OrderStatus, UpdateOrderStatusInput};
use crate::validation::FieldErrors;

pub fn record(id: u64, slug: Option<&str>, translated: &[&str]) -> OrderStatus {
    OrderStatus {
        id,
        slug: slug.map(str::to_string),
        name: "Pending".into(),
        serial: 1,
        color: "#aabbcc".into(),
        language: translated.first().map(|l| l.to_string()),
        translated_languages: translated.iter().map(|l| l.to_string()).collect(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Create(CreateOrderStatusInput),
    Update(UpdateOrderStatusInput),
    Fetch(String, String),
    List(String),
}

/// Records every call and answers from canned data.
#[derive(Default)]
pub struct FakeApi {
    calls: Mutex<Vec<Call>>,
    reject_with: Option<FieldErrors>,
    records: Vec<OrderStatus>,
}

impl FakeApi {
    pub fn rejecting(errors: FieldErrors) -> Self {
        Self {
            reject_with: Some(errors),
            ..Self::default()
        }
    }

    pub fn with_records(records: Vec<OrderStatus>) -> Self {
        Self {
            records,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn saved(&self, id: u64, input: &crate::model::SubmissionInput, slug: Option<String>) -> OrderStatus {
        OrderStatus {
            id,
            slug,
            name: input.name.clone(),
            serial: input.serial,
            color: input.color.clone(),
            language: Some(input.language.clone()),
            translated_languages: vec![input.language.clone()],
        }
    }
}

impl OrderStatusApi for FakeApi {
    fn create(&self, input: &CreateOrderStatusInput) -> Result<OrderStatus, ApiError> {
        self.calls.lock().unwrap().push(Call::Create(input.clone()));
        if let Some(ref errors) = self.reject_with {
            return Err(ApiError::Rejected(errors.clone()));
        }
        Ok(self.saved(100, &input.input, input.slug.clone()))
    }

    fn update(&self, input: &UpdateOrderStatusInput) -> Result<OrderStatus, ApiError> {
        self.calls.lock().unwrap().push(Call::Update(input.clone()));
        if let Some(ref errors) = self.reject_with {
            return Err(ApiError::Rejected(errors.clone()));
        }
        Ok(self.saved(input.id, &input.input, None))
    }

    fn fetch(&self, slug: &str, language: &str) -> Result<OrderStatus, ApiError> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Fetch(slug.to_string(), language.to_string()));
        self.records
            .iter()
            .find(|r| r.slug() == Some(slug))
            .cloned()
            .ok_or(ApiError::Status {
                status: 404,
                body: "not found".into(),
            })
    }

    fn list(&self, language: &str) -> Result<Vec<OrderStatus>, ApiError> {
        self.calls.lock().unwrap().push(Call::List(language.to_string()));
        Ok(self.records.clone())
    }
}
