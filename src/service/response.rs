//! Dispatcher-facing response contract: a status plus a body, shape-stable
//! regardless of the transport that eventually carries it.

use serde::Serialize;
use serde_json::Value;

/// Outward operation status. The surrounding transport mirrors these onto its
/// own status codes via [`ResponseStatus::http_code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseStatus {
    Ok,
    BadRequest,
    NotFound,
    RequestTimeout,
    InternalError,
}

impl ResponseStatus {
    /// Equivalent HTTP status code.
    pub fn http_code(&self) -> u16 {
        match self {
            ResponseStatus::Ok => 200,
            ResponseStatus::BadRequest => 400,
            ResponseStatus::NotFound => 404,
            ResponseStatus::RequestTimeout => 408,
            ResponseStatus::InternalError => 500,
        }
    }
}

/// Response payload: a popularity document, a list of favorite records, or a
/// message/error envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Document(Value),
    Favorites(Vec<Value>),
    Message { message: String },
    Error { error: String },
}

/// Structured result of every aggregator operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse {
    pub status: ResponseStatus,
    pub body: ResponseBody,
}

impl ApiResponse {
    pub fn document(document: Value) -> Self {
        Self {
            status: ResponseStatus::Ok,
            body: ResponseBody::Document(document),
        }
    }

    pub fn favorites(records: Vec<Value>) -> Self {
        Self {
            status: ResponseStatus::Ok,
            body: ResponseBody::Favorites(records),
        }
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Ok,
            body: ResponseBody::Message {
                message: message.into(),
            },
        }
    }

    pub fn error(status: ResponseStatus, error: impl Into<String>) -> Self {
        Self {
            status,
            body: ResponseBody::Error {
                error: error.into(),
            },
        }
    }

    /// Non-Ok outcome that still carries a `message` payload, mirroring the
    /// reference contract for failed add operations.
    pub fn failure_message(status: ResponseStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ResponseBody::Message {
                message: message.into(),
            },
        }
    }
}
