//! JSON response helper with an explicit UTF-8 charset.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Content type sent with every JSON body
pub const APPLICATION_JSON_UTF8: &str = "application/json; charset=utf-8";

/// JSON body paired with a status code.
///
/// Unlike `axum::Json`, the content type always carries `charset=utf-8`.
#[derive(Debug)]
pub struct JsonUtf8<T: Serialize>(pub StatusCode, pub T);

impl<T: Serialize> JsonUtf8<T> {
    /// 200 OK with the given body
    pub fn ok(body: T) -> Self {
        Self(StatusCode::OK, body)
    }

    /// 202 Accepted with the given body
    pub fn accepted(body: T) -> Self {
        Self(StatusCode::ACCEPTED, body)
    }
}

impl<T: Serialize> IntoResponse for JsonUtf8<T> {
    fn into_response(self) -> Response {
        match serde_json::to_vec(&self.1) {
            Ok(bytes) => (
                self.0,
                [(
                    header::CONTENT_TYPE,
                    HeaderValue::from_static(APPLICATION_JSON_UTF8),
                )],
                bytes,
            )
                .into_response(),
            Err(e) => {
                tracing::error!("Failed to serialize response body: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    [(
                        header::CONTENT_TYPE,
                        HeaderValue::from_static(APPLICATION_JSON_UTF8),
                    )],
                    r#"{"error":{"code":"INTERNAL_ERROR","message":"An internal error occurred"}}"#,
                )
                    .into_response()
            }
        }
    }
}
