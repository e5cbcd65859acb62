//! Success envelope shared by every analysis endpoint.

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// `{ "success": true, "data": … }`.
///
/// Also deserializable, so clients can decode remote responses into the same
/// type. A failure envelope decodes with `success: false` and `data: None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    /// `true` for successful responses.
    pub success: bool,
    /// Payload, absent on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Failure message, absent on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Wrap a successful payload.
    #[must_use]
    pub const fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    /// Payload of a successful envelope, `None` otherwise.
    #[must_use]
    pub fn into_data(self) -> Option<T> {
        if self.success { self.data } else { None }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
