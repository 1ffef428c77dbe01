//! Response formatting.
//!
//! Purpose: turn handler outcomes into the uniform `{code, message, data}`
//! envelope with a consistent status and code policy:
//!
//! - [`respond`]: HTTP 200; `code` 0 on success, else the error's explicit code
//!   or 500.
//! - [`respond_invalid_param`] / [`respond_unauthorized`]: HTTP 400 / 401;
//!   `code` defaults to the status and only an explicit code other than 0 or
//!   500 overrides it.
//! - [`Resp`]: HTTP 200; `code` 200 on success, else as [`respond`].
//! - [`Rejection`]: the 400 / 401 paths as an [`actix_web::ResponseError`].
//!
//! Success envelopes always carry `data` (possibly `null`); failure envelopes
//! carry it only when a payload was supplied.

mod envelope;
mod format;
mod rejection;
mod resp;

pub use envelope::{
    Envelope, INTERNAL_ERROR_CODE, STRUCTURED_SUCCESS_CODE, SUCCESS_CODE, messages,
};
pub use format::{
    ErrorRef, respond, respond_invalid_param, respond_result, respond_unauthorized,
};
pub use rejection::{ApiResult, Rejection};
pub use resp::Resp;

#[cfg(test)]
mod tests;
