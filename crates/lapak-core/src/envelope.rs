//! JSON response envelope used at the HTTP boundary: a success flag, a
//! human-readable message, an optional error detail, and the payload.

use serde::{Deserialize, Serialize};

use crate::errors::LapakError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub status: bool,
    pub message: String,
    pub error: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            status: true,
            message: message.into(),
            error: None,
            data: Some(data),
        }
    }

    pub fn failure(message: impl Into<String>, err: &LapakError) -> Self {
        Self {
            status: false,
            message: message.into(),
            error: Some(err.to_string()),
            data: None,
        }
    }
}
