use serde::{Deserialize, Serialize};

/// An order status as stored by the admin API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderStatus {
    pub id: u64,
    #[serde(default)]
    pub slug: Option<String>,
    pub name: String,
    pub serial: i64,
    pub color: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub translated_languages: Vec<String>,
}

impl OrderStatus {
    /// The slug, treating an empty string as absent.
    pub fn slug(&self) -> Option<&str> {
        self.slug.as_deref().filter(|s| !s.is_empty())
    }

    pub fn is_translated_into(&self, locale: &str) -> bool {
        self.translated_languages.iter().any(|l| l == locale)
    }

    pub fn swatch(&self) -> ratatui::style::Color {
        crate::color::parse_hex(&self.color)
            .map(|(r, g, b)| ratatui::style::Color::Rgb(r, g, b))
            .unwrap_or(ratatui::style::Color::Reset)
    }
}

/// The fields shared by both create and update requests.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionInput {
    pub name: String,
    pub color: String,
    pub serial: i64,
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateOrderStatusInput {
    #[serde(flatten)]
    pub input: SubmissionInput,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateOrderStatusInput {
    #[serde(flatten)]
    pub input: SubmissionInput,
    pub id: u64,
}

/// List responses come either bare or wrapped in a paginator.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListResponse {
    Paginated { data: Vec<OrderStatus> },
    Plain(Vec<OrderStatus>),
}

impl ListResponse {
    pub fn into_records(self) -> Vec<OrderStatus> {
        match self {
            ListResponse::Paginated { data } => data,
            ListResponse::Plain(records) => records,
        }
    }
}
