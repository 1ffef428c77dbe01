//! Structured-result responder: data, error, and message resolved in one step.

use actix_web::{HttpRequest, HttpResponse, Responder, body::BoxBody, http::StatusCode};
use serde::Serialize;

use super::envelope::{Envelope, STRUCTURED_SUCCESS_CODE, messages};
use super::format::{error_code, payload_failure, write};
use crate::error::BoxError;

/// Handler outcome rendered as an envelope with HTTP 200.
///
/// - `code` is 200, or the error's explicit code (500 when it has none).
/// - `message` is the explicit message when non-empty, else the error text,
///   else `"Success"`.
///
/// # Examples
/// ```
/// use actix_web::{get, Responder};
/// use respkit::Resp;
///
/// #[get("/greeting")]
/// async fn greeting() -> impl Responder {
///     Resp::ok("hello").with_message("greeted")
/// }
/// ```
#[derive(Debug)]
pub struct Resp<T> {
    /// Payload written to `data`.
    pub data: Option<T>,
    /// Failure to report; decides `code`.
    pub error: Option<BoxError>,
    /// Explicit message overriding the derived one when non-empty.
    pub message: String,
}

impl<T> Default for Resp<T> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            message: String::new(),
        }
    }
}

impl<T> Resp<T> {
    /// Successful result carrying `data`.
    pub fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            ..Self::default()
        }
    }

    /// Failed result; `error` may be any error type or a plain string.
    pub fn err(error: impl Into<BoxError>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }

    /// Replace the derived message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Attach a payload alongside an error.
    #[must_use]
    pub fn with_data(mut self, data: T) -> Self {
        self.data = Some(data);
        self
    }
}

impl<T: Serialize> Resp<T> {
    /// Render the envelope without going through [`Responder`].
    pub fn into_response(self) -> HttpResponse {
        let Self {
            data,
            error,
            message,
        } = self;
        let payload = match serde_json::to_value(data) {
            Ok(value) => value,
            Err(failure) => return payload_failure(&failure),
        };
        let envelope = match error {
            None => {
                let text = if message.is_empty() {
                    messages::SUCCESS.to_owned()
                } else {
                    message
                };
                Envelope::success(STRUCTURED_SUCCESS_CODE, text, payload)
            }
            Some(cause) => {
                let text = if message.is_empty() {
                    cause.to_string()
                } else {
                    message
                };
                Envelope::failure(error_code(&*cause), text, payload)
            }
        };
        write(StatusCode::OK, &envelope)
    }
}

impl<T: Serialize> Responder for Resp<T> {
    type Body = BoxBody;

    fn respond_to(self, _req: &HttpRequest) -> HttpResponse<Self::Body> {
        self.into_response()
    }
}

impl<T, E> From<Result<T, E>> for Resp<T>
where
    E: Into<BoxError>,
{
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(cause) => Self::err(cause),
        }
    }
}
