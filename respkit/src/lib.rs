//! Uniform JSON responses and permissive CORS for actix-web services.
//!
//! Every response body is an [`Envelope`]:
//!
//! ```json
//! {"code": 0, "message": "Success", "data": {"id": 7}}
//! ```
//!
//! Handlers build envelopes with [`respond`], [`respond_invalid_param`],
//! [`respond_unauthorized`], the [`Resp`] responder, or by returning a
//! [`Rejection`]. Errors opt into a specific `code` through [`CodedError`].
//! [`Cors`] adds the CORS headers and answers preflight requests, and
//! [`ApiDoc`] documents the envelope shapes for OpenAPI tooling.

pub mod doc;
pub mod error;
pub mod middleware;
pub mod response;

/// Public OpenAPI surface describing the envelopes.
pub use doc::ApiDoc;
pub use error::{BoxError, CodedError, ErrorCode, code_of, code_of_with};
pub use middleware::{Cors, CorsPolicy};
pub use response::{
    ApiResult, Envelope, ErrorRef, Rejection, Resp, respond, respond_invalid_param,
    respond_result, respond_unauthorized,
};
