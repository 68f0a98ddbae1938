//! Request and response types exchanged with the HTTP transport.
//!
//! The controller builds a [`Request`] from the bound element and the
//! collected payload, tags it with a [`Ticket`], and hands both to a
//! [`crate::transport::Transport`]. The host reports the result later as a
//! [`Response`] or a [`TransportError`].

use crate::domain::error::{FormError, Result};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::str::FromStr;
use thiserror::Error;

/// Ordered field name → value payload.
///
/// Keeps first-insertion order; re-inserting a name replaces its value in place.
pub type Values = Map<String, Value>;

/// Identifies one dispatched request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ticket(pub(crate) u64);

impl Ticket {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for Ticket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// HTTP method read from the element's `method` attribute.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    Get,
    Head,
    Post,
    Put,
    Patch,
    Delete,
    /// Any other token, uppercased.
    Other(String),
}

impl Method {
    /// Parses a `method` attribute. Case-insensitive; blank means GET.
    #[must_use]
    pub fn from_attribute(attribute: &str) -> Self {
        let upper = attribute.trim().to_ascii_uppercase();
        match upper.as_str() {
            "" | "GET" => Self::Get,
            "HEAD" => Self::Head,
            "POST" => Self::Post,
            "PUT" => Self::Put,
            "PATCH" => Self::Patch,
            "DELETE" => Self::Delete,
            _ => Self::Other(upper),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Get => "GET",
            Self::Head => "HEAD",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Other(method) => method,
        }
    }

    /// Whether the payload travels in the body rather than the query string.
    #[must_use]
    pub const fn has_body(&self) -> bool {
        !matches!(self, Self::Get | Self::Head)
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Method {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Expected response format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum DataType {
    /// Body is parsed as JSON.
    #[default]
    Json,
    /// Body is passed through as a string.
    Text,
    /// Body is passed through as a string.
    Html,
    /// Body is passed through as a string.
    Xml,
}

impl TryFrom<String> for DataType {
    type Error = FormError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl FromStr for DataType {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "text" => Ok(Self::Text),
            "html" => Ok(Self::Html),
            "xml" => Ok(Self::Xml),
            other => Err(FormError::Config(format!("unknown dataType `{other}`"))),
        }
    }
}

/// One asynchronous submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Request {
    /// Element `action`; empty means the current location.
    pub url: String,
    pub method: Method,
    pub data_type: DataType,
    /// Payload in field collection order.
    pub data: Values,
}

impl Request {
    /// URL-encodes the payload.
    ///
    /// `null` encodes as an empty value; arrays expand to repeated `name[]`
    /// keys; numbers and booleans use their JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Encode`] if encoding fails.
    pub fn query(&self) -> Result<String> {
        let mut pairs: Vec<(String, String)> = Vec::with_capacity(self.data.len());
        for (name, value) in &self.data {
            match value {
                Value::Array(items) => {
                    let key = format!("{name}[]");
                    pairs.extend(items.iter().map(|item| (key.clone(), scalar_text(item))));
                }
                other => pairs.push((name.clone(), scalar_text(other))),
            }
        }
        Ok(serde_urlencoded::to_string(pairs)?)
    }

    /// Request target: the url, with the encoded payload appended for
    /// methods without a body.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Encode`] if encoding fails.
    pub fn target(&self) -> Result<String> {
        if self.method.has_body() {
            return Ok(self.url.clone());
        }
        let query = self.query()?;
        if query.is_empty() {
            Ok(self.url.clone())
        } else if self.url.contains('?') {
            Ok(format!("{}&{query}", self.url))
        } else {
            Ok(format!("{}?{query}", self.url))
        }
    }

    /// `application/x-www-form-urlencoded` body, `None` for GET and HEAD.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Encode`] if encoding fails.
    pub fn body(&self) -> Result<Option<String>> {
        if self.method.has_body() {
            self.query().map(Some)
        } else {
            Ok(None)
        }
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Raw response handle passed to the success and error hooks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub status: u16,
    /// Reason phrase, possibly empty.
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub body: String,
}

impl Response {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            reason: String::new(),
            body: body.into(),
        }
    }

    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }

    /// 2xx or 304.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        (self.status >= 200 && self.status < 300) || self.status == 304
    }
}

/// Completion status handed to the hooks, spelled like the classic AJAX
/// `textStatus` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    NoContent,
    NotModified,
    Error,
    Timeout,
    Abort,
    #[serde(rename = "parsererror")]
    ParseError,
}

impl Status {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::NoContent => "nocontent",
            Self::NotModified => "notmodified",
            Self::Error => "error",
            Self::Timeout => "timeout",
            Self::Abort => "abort",
            Self::ParseError => "parsererror",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a request failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out")]
    Timeout,

    #[error("request aborted")]
    Aborted,

    /// The server answered with a non-success status.
    #[error("HTTP {status} {reason}")]
    Http { status: u16, reason: String },

    /// The body did not match the expected data type.
    #[error("could not parse response: {0}")]
    Parse(String),
}

impl TransportError {
    #[must_use]
    pub const fn status(&self) -> Status {
        match self {
            Self::Timeout => Status::Timeout,
            Self::Aborted => Status::Abort,
            Self::Parse(_) => Status::ParseError,
            Self::Network(_) | Self::Http { .. } => Status::Error,
        }
    }
}
