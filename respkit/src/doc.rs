//! OpenAPI documentation for the response envelopes.
//!
//! The envelope is built at runtime from `serde_json` values, so the wire
//! shapes are described here by schema-only types that are never
//! constructed. Each one pins the `code` and `message` a client sees on a
//! given response path:
//!
//! - [`SuccessEnvelopeSchema`]: `0` / `"Success"` with `data`
//! - [`ErrorEnvelopeSchema`]: explicit code or `500` with the error text and
//!   any payload the caller supplied
//! - [`InvalidParamEnvelopeSchema`]: `400` / `"Invalid parameters in request"`
//! - [`UnauthorizedEnvelopeSchema`]: `401` / `"Unauthorized"`
//!
//! [`ApiDoc`] registers all four so services can merge them into their own
//! document and reference them from `#[utoipa::path]` responses.

use utoipa::{OpenApi, ToSchema};

/// OpenAPI schema for a successful [`crate::respond`] envelope.
#[derive(ToSchema)]
#[schema(as = SuccessEnvelope)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct SuccessEnvelopeSchema {
    /// Zero on success.
    #[schema(default = 0, example = 0)]
    code: i32,
    /// Outcome description.
    #[schema(default = "Success", example = "Success")]
    message: String,
    /// Endpoint-specific payload; `null` when the endpoint returns nothing.
    data: Option<serde_json::Value>,
}

/// OpenAPI schema for a failed [`crate::respond`] envelope (HTTP 200).
#[derive(ToSchema)]
#[schema(as = ErrorEnvelope)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorEnvelopeSchema {
    /// Explicit error code, or 500 when the error carried none.
    #[schema(example = 500)]
    code: i32,
    /// Error text.
    #[schema(example = "record not found")]
    message: String,
    /// Payload supplied alongside the error; omitted when there is none.
    data: Option<serde_json::Value>,
}

/// OpenAPI schema for the invalid-parameter envelope (HTTP 400).
#[derive(ToSchema)]
#[schema(as = InvalidParamEnvelope)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct InvalidParamEnvelopeSchema {
    /// 400 unless the error carried another explicit code.
    #[schema(default = 400, example = 400)]
    code: i32,
    /// Fixed prefix, followed by the error text when there is one.
    #[schema(
        default = "Invalid parameters in request",
        example = "Invalid parameters in request: page must be positive."
    )]
    message: String,
}

/// OpenAPI schema for the unauthorized envelope (HTTP 401).
#[derive(ToSchema)]
#[schema(as = UnauthorizedEnvelope)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UnauthorizedEnvelopeSchema {
    /// 401 unless the error carried another explicit code.
    #[schema(default = 401, example = 401)]
    code: i32,
    /// Fixed prefix, followed by the error text when there is one.
    #[schema(default = "Unauthorized", example = "Unauthorized: token expired.")]
    message: String,
}

/// OpenAPI document exposing the envelope schemas as reusable components.
///
/// # Examples
/// ```
/// use respkit::ApiDoc;
/// use utoipa::OpenApi;
///
/// let doc = ApiDoc::openapi();
/// let schemas = &doc.components.expect("components").schemas;
/// assert!(schemas.contains_key("SuccessEnvelope"));
/// ```
#[derive(OpenApi)]
#[openapi(
    info(
        title = "respkit response envelopes",
        description = "Uniform `{code, message, data}` bodies shared by every endpoint."
    ),
    components(schemas(
        SuccessEnvelopeSchema,
        ErrorEnvelopeSchema,
        InvalidParamEnvelopeSchema,
        UnauthorizedEnvelopeSchema
    ))
)]
pub struct ApiDoc;
