//! Interpretation of completed requests.
//!
//! Turns what the host reports through `settle` into the arguments the
//! success or error hook receives.

use super::messages::{DataType, Response, Status, TransportError};
use serde_json::Value;

/// A completed request, ready to dispatch to a hook.
#[derive(Debug, Clone, PartialEq)]
pub enum Settled {
    Success {
        data: Value,
        status: Status,
        response: Response,
    },
    Failure {
        response: Option<Response>,
        status: Status,
        error: TransportError,
    },
}

impl Settled {
    #[must_use]
    pub const fn status(&self) -> Status {
        match self {
            Self::Success { status, .. } | Self::Failure { status, .. } => *status,
        }
    }
}

/// Classifies a transport outcome according to the expected data type.
///
/// - 2xx and 304 succeed. 204 and 304 report `nocontent` / `notmodified`.
/// - JSON bodies are parsed; an empty body yields `null`. A parse failure is
///   a failure with status `parsererror` that still carries the response.
/// - Text, HTML and XML bodies pass through as strings.
/// - Any other status is a failure with status `error`.
#[must_use]
pub fn interpret(
    data_type: DataType,
    outcome: std::result::Result<Response, TransportError>,
) -> Settled {
    let response = match outcome {
        Ok(response) => response,
        Err(error) => {
            return Settled::Failure {
                response: None,
                status: error.status(),
                error,
            }
        }
    };

    if !response.is_success() {
        let error = TransportError::Http {
            status: response.status,
            reason: response.reason.clone(),
        };
        return Settled::Failure {
            response: Some(response),
            status: Status::Error,
            error,
        };
    }

    let status = match response.status {
        204 => Status::NoContent,
        304 => Status::NotModified,
        _ => Status::Success,
    };

    let data = match data_type {
        DataType::Json if response.body.trim().is_empty() => Value::Null,
        DataType::Json => match serde_json::from_str::<Value>(&response.body) {
            Ok(data) => data,
            Err(e) => {
                return Settled::Failure {
                    response: Some(response),
                    status: Status::ParseError,
                    error: TransportError::Parse(e.to_string()),
                }
            }
        },
        DataType::Text | DataType::Html | DataType::Xml => Value::String(response.body.clone()),
    };

    Settled::Success {
        data,
        status,
        response,
    }
}
