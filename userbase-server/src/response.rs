//! JSON envelopes shared by every endpoint.

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

/// `{"status": "success", "data": ...}`; `data` is omitted when absent.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SuccessResponse<T> {
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> SuccessResponse<T> {
    pub fn with_data(data: T) -> Self {
        Self {
            status: Status::Success,
            data: Some(data),
        }
    }

    pub fn empty() -> Self {
        Self {
            status: Status::Success,
            data: None,
        }
    }
}

/// A page of results plus the continuation cursor, if any.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    pub status: Status,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    pub page_size: i64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ErrorResponse {
    pub status: Status,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            message: message.into(),
        }
    }
}
