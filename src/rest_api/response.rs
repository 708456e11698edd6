//! # Response Construction
//!
//! Every outcome, success included, leaves through `ApiReply` so each
//! response carries an explicit status, content type and body.

use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use super::errors::ApiError;

/// Outcome of handling one request
#[derive(Debug)]
pub enum ApiReply {
    /// 200 with an encoded JSON body
    Json(Vec<u8>),

    /// 200 with an empty body
    Empty,

    /// Error status with the error text as a plain body
    Error(ApiError),
}

impl ApiReply {
    /// Encode a value as a JSON reply
    pub fn json<T: Serialize>(value: &T) -> Self {
        match serde_json::to_vec(value) {
            Ok(body) => ApiReply::Json(body),
            Err(e) => ApiReply::Error(ApiError::Serialize(e.to_string())),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiReply::Json(_) | ApiReply::Empty => StatusCode::OK,
            ApiReply::Error(err) => err.status_code(),
        }
    }
}

impl From<ApiError> for ApiReply {
    fn from(err: ApiError) -> Self {
        ApiReply::Error(err)
    }
}

impl From<Result<ApiReply, ApiError>> for ApiReply {
    fn from(result: Result<ApiReply, ApiError>) -> Self {
        result.unwrap_or_else(ApiReply::Error)
    }
}

impl IntoResponse for ApiReply {
    fn into_response(self) -> Response {
        let status = self.status();
        let (content_type, body) = match self {
            ApiReply::Json(body) => ("application/json", Body::from(body)),
            ApiReply::Empty => ("text/plain; charset=utf-8", Body::empty()),
            ApiReply::Error(err) => ("text/plain; charset=utf-8", Body::from(format!("{}\n", err))),
        };

        let mut response = Response::new(body);
        *response.status_mut() = status;
        let headers = response.headers_mut();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
        if !status.is_success() {
            headers.insert(header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
        }
        response
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        ApiReply::Error(self).into_response()
    }
}
