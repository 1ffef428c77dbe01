//! Early-return rejections for handlers.
//!
//! Returning `Err(Rejection)` (or using `?` inside a handler returning
//! [`ApiResult`]) aborts the handler and renders the same envelope as
//! [`respond_invalid_param`] or [`respond_unauthorized`].

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use std::error::Error as StdError;

use super::format::{respond_invalid_param, respond_unauthorized};
use crate::error::BoxError;

/// Convenience alias for handlers that may reject a request.
pub type ApiResult<T> = Result<T, Rejection>;

/// Request rejected before any business logic produced a result.
///
/// # Examples
/// ```
/// use actix_web::{get, web, HttpResponse};
/// use respkit::{ApiResult, Rejection};
///
/// #[get("/items/{id}")]
/// async fn item(path: web::Path<String>) -> ApiResult<HttpResponse> {
///     let id: u32 = path.parse().map_err(Rejection::invalid_param)?;
///     Ok(respkit::respond(id, None))
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum Rejection {
    /// Parameters failed validation; rendered with HTTP 400.
    #[error("invalid parameters in request")]
    InvalidParam(#[source] Option<BoxError>),
    /// Caller is not authorized; rendered with HTTP 401.
    #[error("unauthorized")]
    Unauthorized(#[source] Option<BoxError>),
}

impl Rejection {
    /// Invalid-parameter rejection explained by `cause`.
    pub fn invalid_param(cause: impl Into<BoxError>) -> Self {
        Self::InvalidParam(Some(cause.into()))
    }

    /// Unauthorized rejection explained by `cause`.
    pub fn unauthorized(cause: impl Into<BoxError>) -> Self {
        Self::Unauthorized(Some(cause.into()))
    }
}

impl ResponseError for Rejection {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidParam(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            Self::InvalidParam(_) => respond_invalid_param(self.source()),
            Self::Unauthorized(_) => respond_unauthorized(self.source()),
        }
    }
}
