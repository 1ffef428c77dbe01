//! Tests for envelope formatting across the response paths.

use super::*;
use crate::{CodedError, ErrorCode};
use actix_web::{
    App, HttpResponse, ResponseError, body::to_bytes, http::StatusCode, test as actix_test, web,
};
use rstest::{fixture, rstest};
use serde::{Serialize, Serializer, ser::Error as _};
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::error::Error as StdError;

/// Payload whose serialisation always fails.
struct Unserialisable;

impl Serialize for Unserialisable {
    fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
        Err(S::Error::custom("refused"))
    }
}

/// Caller-owned error that reports its code through [`ErrorCode`].
#[derive(Debug)]
struct QuotaExceeded;

impl std::fmt::Display for QuotaExceeded {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("quota exceeded")
    }
}

impl StdError for QuotaExceeded {}

impl ErrorCode for QuotaExceeded {
    fn code(&self) -> i32 {
        4031
    }
}

#[fixture]
fn plain_error() -> std::io::Error {
    std::io::Error::other("error")
}

async fn body_of(response: HttpResponse) -> Value {
    let bytes = to_bytes(response.into_body())
        .await
        .expect("response body to bytes");
    serde_json::from_slice(&bytes).expect("payload deserialises")
}

#[rstest]
#[actix_web::test]
async fn success_without_payload_is_canonical() {
    let response = respond((), None);
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_of(response).await,
        json!({"code": 0, "message": "Success", "data": null})
    );
}

#[rstest]
#[actix_web::test]
async fn plain_error_maps_to_internal_code(plain_error: std::io::Error) {
    let response = respond((), Some(&plain_error));
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_of(response).await, json!({"code": 500, "message": "error"}));
}

#[rstest]
#[case(CodedError::new(101, "with code"), 101)]
#[case(CodedError::new(0, "zero means absent"), 500)]
#[case(CodedError::new(500, "explicit internal"), 500)]
#[case(CodedError::new(-3, "negative"), -3)]
#[actix_web::test]
async fn error_code_follows_explicit_code(#[case] err: CodedError, #[case] expected: i32) {
    let message = err.to_string();
    let response = respond(Value::Null, Some(&err));
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_of(response).await,
        json!({"code": expected, "message": message})
    );
}

#[rstest]
#[actix_web::test]
async fn foreign_coded_error_sets_envelope_code() {
    let err = CodedError::from_coded(QuotaExceeded);
    let body = body_of(respond((), Some(&err))).await;
    assert_eq!(body, json!({"code": 4031, "message": "quota exceeded"}));

    let body = body_of(respond_unauthorized(Some(&err))).await;
    assert_eq!(
        body,
        json!({"code": 4031, "message": "Unauthorized: quota exceeded."})
    );
}

#[rstest]
#[case(json!("data"))]
#[case(json!({"id": 7, "tags": ["a", "b"]}))]
#[case(json!([1, 2, 3]))]
#[case(json!(false))]
#[actix_web::test]
async fn payload_round_trips_into_data(#[case] payload: Value) {
    let body = body_of(respond(&payload, None)).await;
    assert_eq!(body["data"], payload);
}

#[rstest]
#[actix_web::test]
async fn mapping_payload_round_trips() {
    let payload = BTreeMap::from([("alpha", 1), ("beta", 2)]);
    let body = body_of(respond(&payload, None)).await;
    assert_eq!(body["data"], json!({"alpha": 1, "beta": 2}));
}

#[rstest]
#[actix_web::test]
async fn error_keeps_supplied_payload() {
    let err = CodedError::new(409, "conflict");
    let body = body_of(respond(json!({"id": 7}), Some(&err))).await;
    assert_eq!(
        body,
        json!({"code": 409, "message": "conflict", "data": {"id": 7}})
    );
}

#[rstest]
#[actix_web::test]
async fn unserialisable_payload_degrades_to_internal_error() {
    let response = respond(Unserialisable, None);
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_of(response).await,
        json!({"code": 500, "message": "Internal Server Error"})
    );
}

#[rstest]
#[actix_web::test]
async fn result_form_matches_direct_calls() {
    let ok: Result<&str, std::io::Error> = Ok("data");
    let body = body_of(respond_result(ok)).await;
    assert_eq!(body, json!({"code": 0, "message": "Success", "data": "data"}));

    let failed: Result<&str, CodedError> = Err(CodedError::new(101, "with code"));
    let body = body_of(respond_result(failed)).await;
    assert_eq!(body, json!({"code": 101, "message": "with code"}));
}

#[rstest]
#[case(None, 400, "Invalid parameters in request.")]
#[case(Some(CodedError::new(0, "bad id")), 400, "Invalid parameters in request: bad id.")]
#[case(Some(CodedError::new(500, "test 500")), 400, "Invalid parameters in request: test 500.")]
#[case(Some(CodedError::new(1001, "bad page")), 1001, "Invalid parameters in request: bad page.")]
#[actix_web::test]
async fn invalid_param_keeps_400_status(
    #[case] err: Option<CodedError>,
    #[case] code: i32,
    #[case] message: &str,
) {
    let response = respond_invalid_param(err.as_ref().map(|cause| cause as ErrorRef<'_>));
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_of(response).await,
        json!({"code": code, "message": message})
    );
}

#[rstest]
#[actix_web::test]
async fn invalid_param_uses_plain_error_text(plain_error: std::io::Error) {
    let body = body_of(respond_invalid_param(Some(&plain_error))).await;
    assert_eq!(
        body,
        json!({"code": 400, "message": "Invalid parameters in request: error."})
    );
}

#[rstest]
#[case(None, 401, "Unauthorized.")]
#[case(Some(CodedError::new(0, "token expired")), 401, "Unauthorized: token expired.")]
#[case(Some(CodedError::new(500, "test 500")), 401, "Unauthorized: test 500.")]
#[case(Some(CodedError::new(4011, "token revoked")), 4011, "Unauthorized: token revoked.")]
#[actix_web::test]
async fn unauthorized_keeps_401_status(
    #[case] err: Option<CodedError>,
    #[case] code: i32,
    #[case] message: &str,
) {
    let response = respond_unauthorized(err.as_ref().map(|cause| cause as ErrorRef<'_>));
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_of(response).await,
        json!({"code": code, "message": message})
    );
}

#[rstest]
#[case(Resp::ok(json!("data")), json!({"code": 200, "message": "Success", "data": "data"}))]
#[case(
    Resp::err("error message"),
    json!({"code": 500, "message": "error message"})
)]
#[case(
    Resp::err(CodedError::new(1001, "with code")),
    json!({"code": 1001, "message": "with code"})
)]
#[case(
    Resp::ok(json!("data")).with_message("custom message"),
    json!({"code": 200, "message": "custom message", "data": "data"})
)]
#[case(
    Resp::err("hidden").with_message("shown"),
    json!({"code": 500, "message": "shown"})
)]
#[case(Resp::default(), json!({"code": 200, "message": "Success", "data": null}))]
#[actix_web::test]
async fn structured_result_resolves_in_one_step(#[case] resp: Resp<Value>, #[case] expected: Value) {
    let response = resp.into_response();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_of(response).await, expected);
}

#[rstest]
#[actix_web::test]
async fn structured_result_from_result() {
    let failed: Result<u32, CodedError> = Err(CodedError::new(42, "no answer"));
    let body = body_of(Resp::from(failed).into_response()).await;
    assert_eq!(body, json!({"code": 42, "message": "no answer"}));

    let ok: Result<u32, CodedError> = Ok(42);
    let body = body_of(Resp::from(ok).into_response()).await;
    assert_eq!(body, json!({"code": 200, "message": "Success", "data": 42}));
}

#[rstest]
#[actix_web::test]
async fn structured_result_is_a_responder() {
    let app = actix_test::init_service(
        App::new().route("/", web::get().to(|| async { Resp::ok("data") })),
    )
    .await;
    let req = actix_test::TestRequest::get().uri("/").to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body, json!({"code": 200, "message": "Success", "data": "data"}));
}

#[rstest]
#[case(Rejection::InvalidParam(None), StatusCode::BAD_REQUEST)]
#[case(Rejection::invalid_param("bad"), StatusCode::BAD_REQUEST)]
#[case(Rejection::Unauthorized(None), StatusCode::UNAUTHORIZED)]
#[case(Rejection::unauthorized("nope"), StatusCode::UNAUTHORIZED)]
fn rejection_status_matches_variant(#[case] rejection: Rejection, #[case] status: StatusCode) {
    assert_eq!(rejection.status_code(), status);
}

#[rstest]
#[actix_web::test]
async fn rejection_renders_like_direct_calls() {
    let cause = CodedError::new(1001, "bad page");
    let direct = body_of(respond_invalid_param(Some(&cause))).await;
    let rejected = Rejection::invalid_param(CodedError::new(1001, "bad page"));
    assert!(rejected.source().is_some());
    assert_eq!(body_of(rejected.error_response()).await, direct);

    let direct = body_of(respond_unauthorized(None)).await;
    let rejected = Rejection::Unauthorized(None);
    assert_eq!(body_of(rejected.error_response()).await, direct);
}

#[rstest]
#[actix_web::test]
async fn question_mark_aborts_the_handler() {
    async fn handler(query: web::Query<BTreeMap<String, String>>) -> ApiResult<HttpResponse> {
        let token = query
            .get("token")
            .ok_or_else(|| Rejection::unauthorized("missing token"))?;
        Ok(respond(token, None))
    }

    let app = actix_test::init_service(App::new().route("/", web::get().to(handler))).await;

    let req = actix_test::TestRequest::get().uri("/").to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(
        body,
        json!({"code": 401, "message": "Unauthorized: missing token."})
    );

    let req = actix_test::TestRequest::get().uri("/?token=abc").to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body, json!({"code": 0, "message": "Success", "data": "abc"}));
}
