//! Response envelope shared by every endpoint.
//!
//! `error` is present only on failures and `data` only on successes. The
//! status code travels separately and is never duplicated in the body.

use axum::{Json, http::StatusCode};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self { success: true, message: None, data: Some(data), error: None }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self { success: false, message: None, data: None, error: Some(error.into()) }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

pub type Reply<T> = (StatusCode, Json<Envelope<T>>);

pub fn ok<T: Serialize>(data: T) -> Reply<T> {
    (StatusCode::OK, Json(Envelope::success(data)))
}

pub fn created<T: Serialize>(data: T) -> Reply<T> {
    (StatusCode::CREATED, Json(Envelope::success(data)))
}

/// Success without a payload.
pub fn done(message: impl Into<String>) -> Reply<()> {
    let envelope = Envelope { success: true, message: Some(message.into()), data: None, error: None };
    (StatusCode::OK, Json(envelope))
}
