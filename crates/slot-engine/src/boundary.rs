//! Translate [`SlotError`] into an HTTP status and a user-facing message.
//!
//! Caller mistakes (bad values, malformed JSON bodies) get descriptive text;
//! repository failures get a fixed summary so storage details never reach the
//! client.

use serde::Serialize;

use crate::error::SlotError;

pub const INTERNAL_ERROR_MESSAGE: &str = "Failed to check availability";

/// Error body as returned to HTTP clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    #[serde(skip)]
    pub status: u16,
    pub error: String,
}

impl SlotError {
    pub fn status_code(&self) -> u16 {
        match self {
            SlotError::InvalidArgument(_) | SlotError::Serialization(_) => 400,
            SlotError::NotFound { .. } => 404,
            SlotError::Conflict(_) => 409,
            SlotError::Repository(_) => 500,
        }
    }
}

impl From<&SlotError> for ErrorResponse {
    fn from(err: &SlotError) -> Self {
        let error = match err {
            SlotError::InvalidArgument(msg) | SlotError::Conflict(msg) => msg.clone(),
            SlotError::NotFound { kind, .. } => format!("{} not found", capitalize(kind)),
            SlotError::Serialization(e) => format!("Malformed JSON: {}", e),
            SlotError::Repository(_) => INTERNAL_ERROR_MESSAGE.to_string(),
        };
        Self {
            status: err.status_code(),
            error,
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
