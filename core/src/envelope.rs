//! The `{response, data, query}` wrapper around every API response body.
//!
//! # Design
//! Only `data` is load-bearing. The classification block and the pagination
//! block are carried along as read: unrecognised `type` strings and sort
//! orders are kept rather than rejected, and keys this crate does not model
//! land in `extra`, so an `Envelope<Value>` re-serializes to the body it was
//! parsed from.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A decoded response body.
///
/// `response` classifies the outcome but is informational only: success is
/// decided by the transport status code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(default, skip_serializing_if = "ResponseStatus::is_empty")]
    pub response: ResponseStatus,
    pub data: T,
    /// `None` when the key is absent, `Some(None)` for an explicit `null`.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub query: Option<Option<PageQuery>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl<T> Envelope<T> {
    pub fn into_data(self) -> T {
        self.data
    }

    pub fn page_query(&self) -> Option<&PageQuery> {
        self.query.as_ref().and_then(Option::as_ref)
    }

    pub fn next_page(&self) -> Option<&PageCursor> {
        self.page_query().and_then(|q| q.next_page.as_ref())
    }

    pub fn previous_page(&self) -> Option<&PageCursor> {
        self.page_query().and_then(|q| q.previous_page.as_ref())
    }

    pub fn total_count(&self) -> Option<u64> {
        self.page_query().and_then(|q| q.total_count)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseStatus {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ResponseType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ResponseStatus {
    pub fn is_empty(&self) -> bool {
        self.kind.is_none() && self.code.is_none() && self.message.is_none() && self.extra.is_empty()
    }
}

/// Outcome class reported by the service. Strings outside the known set are
/// kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ResponseType {
    Info,
    Success,
    Redirect,
    ClientError,
    ServerError,
    Other(String),
}

impl ResponseType {
    pub fn as_str(&self) -> &str {
        match self {
            ResponseType::Info => "INFO",
            ResponseType::Success => "SUCCESS",
            ResponseType::Redirect => "REDIRECT",
            ResponseType::ClientError => "CLIENT_ERROR",
            ResponseType::ServerError => "SERVER_ERROR",
            ResponseType::Other(raw) => raw,
        }
    }
}

impl From<&str> for ResponseType {
    fn from(raw: &str) -> Self {
        match raw {
            "INFO" => ResponseType::Info,
            "SUCCESS" => ResponseType::Success,
            "REDIRECT" => ResponseType::Redirect,
            "CLIENT_ERROR" => ResponseType::ClientError,
            "SERVER_ERROR" => ResponseType::ServerError,
            other => ResponseType::Other(other.to_string()),
        }
    }
}

impl From<String> for ResponseType {
    fn from(raw: String) -> Self {
        ResponseType::from(raw.as_str())
    }
}

impl From<ResponseType> for String {
    fn from(kind: ResponseType) -> Self {
        match kind {
            ResponseType::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

/// Pagination block returned alongside list data. The client never follows
/// these cursors on its own.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PageQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_page: Option<PageCursor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page: Option<PageCursor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PageCursor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_in_sort: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sorted_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Sort direction. The service uses both the word and the numeric form, so
/// each is kept as read; anything else is kept raw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SortOrder {
    Named(SortDirection),
    Numeric(i8),
    Other(Value),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortOrder {
    /// `None` when the direction cannot be read from the wire value.
    pub fn is_ascending(&self) -> Option<bool> {
        match self {
            SortOrder::Named(d) => Some(*d == SortDirection::Asc),
            SortOrder::Numeric(n) => Some(*n >= 0),
            SortOrder::Other(Value::String(s)) if s.eq_ignore_ascii_case("asc") => Some(true),
            SortOrder::Other(Value::String(s)) if s.eq_ignore_ascii_case("desc") => Some(false),
            SortOrder::Other(_) => None,
        }
    }
}
