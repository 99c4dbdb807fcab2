use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::dispatch::OrderStatusApi;
use crate::error::ApiError;
use crate::model::{CreateOrderStatusInput, ListResponse, OrderStatus, UpdateOrderStatusInput};
use crate::validation::FieldErrors;

const USER_AGENT: &str = concat!("order-status-admin/", env!("CARGO_PKG_VERSION"));
const RESOURCE: &str = "order-status";

/// `OrderStatusApi` over the admin REST API.
pub struct HttpOrderStatusApi {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpOrderStatusApi {
    pub fn new(base_url: &str, token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    fn url(&self, path: Option<&str>) -> String {
        match path {
            Some(p) => format!("{}/{}/{}", self.base_url, RESOURCE, p),
            None => format!("{}/{}", self.base_url, RESOURCE),
        }
    }

    fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, ApiError> {
        let mut req = req.header("User-Agent", USER_AGENT);
        if let Some(ref token) = self.token {
            req = req.bearer_auth(token);
        }
        let resp = req.send()?;
        let body = read_success(resp)?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Return the body of a successful response, or turn a failed one into an
/// `ApiError`. Field-level rejections become `ApiError::Rejected`.
fn read_success(resp: Response) -> Result<String, ApiError> {
    let status = resp.status();
    let body = resp.text()?;
    if status.is_success() {
        return Ok(body);
    }
    tracing::debug!(status = status.as_u16(), body = %body, "request failed");
    Err(classify_failure(status, &body))
}

fn classify_failure(status: StatusCode, body: &str) -> ApiError {
    let rejectable = status == StatusCode::BAD_REQUEST || status == StatusCode::UNPROCESSABLE_ENTITY;
    if rejectable {
        let parsed = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| FieldErrors::from_server_body(&v));
        if let Some(errors) = parsed {
            return ApiError::Rejected(errors);
        }
    }
    ApiError::Status {
        status: status.as_u16(),
        body: body.chars().take(200).collect(),
    }
}

impl OrderStatusApi for HttpOrderStatusApi {
    fn create(&self, input: &CreateOrderStatusInput) -> Result<OrderStatus, ApiError> {
        tracing::info!(language = %input.input.language, slug = ?input.slug, "creating order status");
        self.send(self.client.post(self.url(None)).json(input))
    }

    fn update(&self, input: &UpdateOrderStatusInput) -> Result<OrderStatus, ApiError> {
        tracing::info!(id = input.id, language = %input.input.language, "updating order status");
        let url = self.url(Some(&input.id.to_string()));
        self.send(self.client.put(url).json(input))
    }

    fn fetch(&self, slug: &str, language: &str) -> Result<OrderStatus, ApiError> {
        let req = self
            .client
            .get(self.url(Some(slug)))
            .query(&[("language", language)]);
        self.send(req)
    }

    fn list(&self, language: &str) -> Result<Vec<OrderStatus>, ApiError> {
        let req = self
            .client
            .get(self.url(None))
            .query(&[("language", language), ("orderBy", "serial"), ("sortedBy", "asc")]);
        self.send::<ListResponse>(req).map(ListResponse::into_records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Field;

    #[test]
    fn urls_join_without_double_slash() {
        let api = HttpOrderStatusApi::new("http://localhost:8000/", None);
        assert_eq!(api.url(None), "http://localhost:8000/order-status");
        assert_eq!(api.url(Some("7")), "http://localhost:8000/order-status/7");
    }

    #[test]
    fn unprocessable_with_field_map_is_rejection() {
        let err = classify_failure(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"name": ["Name taken"]}"#,
        );
        let errors = err.field_errors().expect("rejection");
        assert_eq!(errors.first(Field::Name), Some("Name taken"));
    }

    #[test]
    fn unexpected_body_is_plain_status_error() {
        let err = classify_failure(StatusCode::UNPROCESSABLE_ENTITY, "<html>oops</html>");
        assert!(matches!(err, ApiError::Status { status: 422, .. }));
    }

    #[test]
    fn server_error_is_never_rejection() {
        let err = classify_failure(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"name": ["Name taken"]}"#,
        );
        assert!(matches!(err, ApiError::Status { status: 500, .. }));
    }
}
