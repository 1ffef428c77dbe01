//! Permissive CORS middleware.
//!
//! Every response gets the four headers of the active [`CorsPolicy`].
//! Preflight (`OPTIONS`) requests are answered with an empty 200 straight
//! away; the wrapped service never sees them. Errors returned by the
//! wrapped service are rendered here so they carry the headers too.

use std::rc::Rc;
use std::task::{Context, Poll};
use std::time::Duration;

use actix_service::{Service, Transform};
use actix_web::body::EitherBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::Method;
use actix_web::http::header::{
    ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_ORIGIN,
    ACCESS_CONTROL_MAX_AGE, HeaderMap, HeaderValue,
};
use actix_web::{Error, HttpResponse};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::debug;

/// One day, in seconds.
const DEFAULT_MAX_AGE_SECS: u64 = 86_400;

/// Header values written by [`Cors`].
///
/// The default policy allows any origin and any header, permits
/// credentials, and lets browsers cache preflight results for a day.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use actix_web::http::header::HeaderValue;
/// use respkit::middleware::{Cors, CorsPolicy};
///
/// let policy = CorsPolicy::default()
///     .with_max_age(Duration::from_secs(600))
///     .with_allow_origin(HeaderValue::from_static("https://app.example"));
/// let _cors = Cors::new(policy);
/// ```
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    max_age: HeaderValue,
    allow_origin: HeaderValue,
    allow_headers: HeaderValue,
    allow_credentials: HeaderValue,
}

impl Default for CorsPolicy {
    fn default() -> Self {
        Self {
            max_age: HeaderValue::from(DEFAULT_MAX_AGE_SECS),
            allow_origin: HeaderValue::from_static("*"),
            allow_headers: HeaderValue::from_static("*"),
            allow_credentials: HeaderValue::from_static("true"),
        }
    }
}

impl CorsPolicy {
    /// How long browsers may cache a preflight result. Sub-second precision
    /// is dropped.
    #[must_use]
    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = HeaderValue::from(max_age.as_secs());
        self
    }

    /// Value of `Access-Control-Allow-Origin`.
    #[must_use]
    pub fn with_allow_origin(mut self, origin: HeaderValue) -> Self {
        self.allow_origin = origin;
        self
    }

    /// Value of `Access-Control-Allow-Headers`.
    #[must_use]
    pub fn with_allow_headers(mut self, headers: HeaderValue) -> Self {
        self.allow_headers = headers;
        self
    }

    /// Whether `Access-Control-Allow-Credentials` reads `true` or `false`.
    #[must_use]
    pub fn with_allow_credentials(mut self, allow: bool) -> Self {
        self.allow_credentials = HeaderValue::from_static(if allow { "true" } else { "false" });
        self
    }

    fn apply(&self, headers: &mut HeaderMap) {
        headers.insert(ACCESS_CONTROL_MAX_AGE, self.max_age.clone());
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, self.allow_origin.clone());
        headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, self.allow_headers.clone());
        headers.insert(
            ACCESS_CONTROL_ALLOW_CREDENTIALS,
            self.allow_credentials.clone(),
        );
    }
}

/// CORS middleware applying a [`CorsPolicy`] to every response.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use respkit::Cors;
///
/// let app = App::new().wrap(Cors::default());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Cors {
    policy: Rc<CorsPolicy>,
}

impl Cors {
    /// Middleware writing the headers of `policy`.
    #[must_use]
    pub fn new(policy: CorsPolicy) -> Self {
        Self {
            policy: Rc::new(policy),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for Cors
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = CorsMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(CorsMiddleware {
            service,
            policy: Rc::clone(&self.policy),
        }))
    }
}

/// Service wrapper produced by [`Cors`].
///
/// Applications should not use this type directly.
pub struct CorsMiddleware<S> {
    service: S,
    policy: Rc<CorsPolicy>,
}

impl<S, B> Service<ServiceRequest> for CorsMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let policy = Rc::clone(&self.policy);
        if req.method() == Method::OPTIONS {
            debug!(path = %req.path(), "answering CORS preflight");
            let mut res = req.into_response(HttpResponse::Ok().finish());
            policy.apply(res.headers_mut());
            return Box::pin(ready(Ok(res.map_into_right_body())));
        }

        let http_req = req.request().clone();
        let fut = self.service.call(req);
        Box::pin(async move {
            match fut.await {
                Ok(mut res) => {
                    policy.apply(res.headers_mut());
                    Ok(res.map_into_left_body())
                }
                Err(err) => {
                    debug!(error = %err, "rendering inner service error with CORS headers");
                    let mut res = ServiceResponse::from_err(err, http_req);
                    policy.apply(res.headers_mut());
                    Ok(res.map_into_right_body())
                }
            }
        })
    }
}
