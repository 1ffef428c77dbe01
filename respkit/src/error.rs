//! Errors that carry an explicit response code.
//!
//! The formatters accept any [`std::error::Error`]. An error opts into a
//! specific envelope `code` by being, or wrapping, a [`CodedError`]. Plain
//! errors have no explicit code and are reported as `0`, which the
//! formatters translate into the endpoint default.
//!
//! Caller error types that already know their code implement [`ErrorCode`].
//! [`code_of_with`] reads it directly, and [`CodedError::from_coded`] turns
//! such an error into one the formatters recognise anywhere in a chain.

use std::error::Error as StdError;

/// Capability of reporting an explicit envelope code.
///
/// # Examples
/// ```
/// use respkit::{CodedError, ErrorCode, code_of, code_of_with};
///
/// #[derive(Debug)]
/// enum Billing {
///     CardDeclined,
/// }
///
/// impl std::fmt::Display for Billing {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///         f.write_str("card declined")
///     }
/// }
///
/// impl std::error::Error for Billing {}
///
/// impl ErrorCode for Billing {
///     fn code(&self) -> i32 {
///         match self {
///             Self::CardDeclined => 4021,
///         }
///     }
/// }
///
/// assert_eq!(code_of_with(&Billing::CardDeclined), 4021);
/// let err = CodedError::from_coded(Billing::CardDeclined);
/// assert_eq!(code_of(&err), 4021);
/// ```
pub trait ErrorCode {
    /// Explicit code of this error, or `0` when none applies.
    fn code(&self) -> i32;
}

/// Boxed caller error as stored by [`crate::Resp`] and [`crate::Rejection`].
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Error value annotated with an explicit integer code.
///
/// The code is the classifier clients read from the envelope; it is distinct
/// from the HTTP status line.
///
/// # Examples
/// ```
/// use respkit::{CodedError, code_of};
///
/// let err = CodedError::new(101, "with code");
/// assert_eq!(code_of(&err), 101);
/// assert_eq!(err.to_string(), "with code");
/// ```
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct CodedError {
    code: i32,
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl CodedError {
    /// Create an error with the given code and message.
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Attach a code to an existing error, keeping it as the source.
    ///
    /// The wrapped error's text becomes the message so the envelope reads the
    /// same as it would for the bare error.
    ///
    /// # Examples
    /// ```
    /// use respkit::{CodedError, code_of};
    ///
    /// let io = std::io::Error::other("disk full");
    /// let err = CodedError::wrap(507, io);
    /// assert_eq!(code_of(&err), 507);
    /// assert_eq!(err.to_string(), "disk full");
    /// ```
    pub fn wrap<E>(code: i32, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self {
            code,
            message: source.to_string(),
            source: Some(Box::new(source)),
        }
    }

    /// Attach a code and a replacement message to an existing error.
    pub fn wrap_with_message<E>(code: i32, source: E, message: impl Into<String>) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self {
            code,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Wrap an error that reports its own code through [`ErrorCode`].
    ///
    /// Code and message are taken from `source`, which stays reachable
    /// through [`StdError::source`].
    pub fn from_coded<E>(source: E) -> Self
    where
        E: ErrorCode + StdError + Send + Sync + 'static,
    {
        Self::wrap(source.code(), source)
    }

    /// Explicit code carried by this error.
    #[must_use]
    pub const fn code(&self) -> i32 {
        self.code
    }

    /// Message rendered into the envelope.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

impl ErrorCode for CodedError {
    fn code(&self) -> i32 {
        self.code
    }
}

/// Extract the explicit code of an error that implements [`ErrorCode`].
///
/// The error's own code wins; when it is `0`, its source chain is searched
/// as in [`code_of`].
#[must_use]
pub fn code_of_with<E>(err: &E) -> i32
where
    E: ErrorCode + StdError + 'static,
{
    match ErrorCode::code(err) {
        0 => code_of(err),
        explicit => explicit,
    }
}

/// Extract the explicit code attached to `err`.
///
/// Walks `err` and its [`source`](StdError::source) chain and returns the
/// first non-zero code found on a [`CodedError`]. Returns `0` when no code is
/// attached anywhere in the chain.
#[must_use]
pub fn code_of(err: &(dyn StdError + 'static)) -> i32 {
    let mut current = Some(err);
    while let Some(candidate) = current {
        if let Some(code) = candidate
            .downcast_ref::<CodedError>()
            .map(CodedError::code)
            .filter(|code| *code != 0)
        {
            return code;
        }
        current = candidate.source();
    }
    0
}
