//! Envelope formatting for success, failure, and rejection responses.
//!
//! Every function here returns a finished [`HttpResponse`]. Returning it from
//! a handler ends the request; from middleware, hand it to
//! [`ServiceRequest::into_response`](actix_web::dev::ServiceRequest::into_response)
//! instead of calling the wrapped service.

use actix_web::{HttpResponse, http::StatusCode};
use serde::Serialize;
use serde_json::Value;
use std::error::Error as StdError;
use tracing::{debug, error};

use super::envelope::{Envelope, INTERNAL_ERROR_CODE, SUCCESS_CODE, messages};
use crate::error::code_of;

/// Borrowed caller error accepted by the formatters.
pub type ErrorRef<'a> = &'a (dyn StdError + 'static);

/// Write `data` or `err` as an envelope with HTTP 200.
///
/// Without an error the envelope is `{code: 0, message: "Success", data}`.
/// With an error the code is the error's explicit code (500 when it has
/// none) and the message is the error's text. The status line stays 200 in
/// both cases; clients read the outcome from `code`.
///
/// # Examples
/// ```
/// use actix_web::http::StatusCode;
/// use respkit::{CodedError, respond};
///
/// let ok = respond(vec!["a", "b"], None);
/// assert_eq!(ok.status(), StatusCode::OK);
///
/// let err = CodedError::new(101, "with code");
/// let failed = respond((), Some(&err));
/// assert_eq!(failed.status(), StatusCode::OK);
/// ```
pub fn respond<T: Serialize>(data: T, err: Option<ErrorRef<'_>>) -> HttpResponse {
    let payload = match serde_json::to_value(data) {
        Ok(value) => value,
        Err(failure) => return payload_failure(&failure),
    };
    let envelope = match err {
        None => Envelope::success(SUCCESS_CODE, messages::SUCCESS, payload),
        Some(cause) => Envelope::failure(error_code(cause), cause.to_string(), payload),
    };
    write(StatusCode::OK, &envelope)
}

/// [`respond`] for a handler outcome: `Ok` is formatted as success, `Err` as
/// an error without payload.
pub fn respond_result<T, E>(result: Result<T, E>) -> HttpResponse
where
    T: Serialize,
    E: StdError + 'static,
{
    match result {
        Ok(data) => respond(data, None),
        Err(cause) => respond(Value::Null, Some(&cause)),
    }
}

/// Reject a request whose parameters failed validation.
///
/// Always HTTP 400. The envelope code is 400 unless the error carries an
/// explicit code other than 0 or 500.
pub fn respond_invalid_param(err: Option<ErrorRef<'_>>) -> HttpResponse {
    reject(StatusCode::BAD_REQUEST, messages::INVALID_PARAMS, err)
}

/// Reject an unauthenticated or unauthorized request.
///
/// Always HTTP 401, with the same code-override rule as
/// [`respond_invalid_param`].
pub fn respond_unauthorized(err: Option<ErrorRef<'_>>) -> HttpResponse {
    reject(StatusCode::UNAUTHORIZED, messages::UNAUTHORIZED, err)
}

fn reject(status: StatusCode, prefix: &str, err: Option<ErrorRef<'_>>) -> HttpResponse {
    let code = match err.map_or(0, code_of) {
        0 | INTERNAL_ERROR_CODE => i32::from(status.as_u16()),
        explicit => explicit,
    };
    let message = err.map_or_else(
        || format!("{prefix}."),
        |cause| format!("{prefix}: {cause}."),
    );
    write(status, &Envelope::failure(code, message, Value::Null))
}

/// Explicit code of `err`, or 500 when none is attached.
pub(crate) fn error_code(err: ErrorRef<'_>) -> i32 {
    match code_of(err) {
        0 => INTERNAL_ERROR_CODE,
        explicit => explicit,
    }
}

pub(crate) fn payload_failure(failure: &serde_json::Error) -> HttpResponse {
    error!(error = %failure, "response payload could not be serialised");
    write(
        StatusCode::INTERNAL_SERVER_ERROR,
        &Envelope::failure(INTERNAL_ERROR_CODE, messages::INTERNAL_ERROR, Value::Null),
    )
}

pub(crate) fn write(status: StatusCode, envelope: &Envelope) -> HttpResponse {
    debug!(
        status = status.as_u16(),
        code = envelope.code,
        "writing response envelope"
    );
    HttpResponse::build(status).json(envelope)
}
