//! Construction behaviour through the public facade

use rest_errors::{
    ConstructError, ErrorBody, ErrorOptions, HTTP_ERROR, HttpError, RestError, StatusCode, Variant, rest, rest_error,
    status,
};
use serde_json::json;

const FLAKY: Variant = Variant::new("FlakyError").with_default_status(500);

#[test]
fn zero_args() {
    let err = RestError::new(&HTTP_ERROR, ErrorOptions::new());
    assert_eq!(err.message(), "");
    assert_eq!(err.body(), &ErrorBody::new("HttpError", ""));
    assert!(err.status_code().is_none());
}

#[test]
fn message_only() {
    let err = rest_error!(status::bad_request, "boom");
    assert_eq!(err.message(), "boom");
    assert_eq!(err.body().message, "boom");
}

#[test]
fn options_record_with_message_and_status() {
    let options = ErrorOptions::from_value(json!({"message": "explicit", "statusCode": 404})).unwrap();
    let err = RestError::new(&HTTP_ERROR, options);
    assert_eq!(err.message(), "explicit");
    assert_eq!(err.status_code(), Some(StatusCode::NOT_FOUND));
    assert_eq!(err.body().message, "explicit");
}

#[test]
fn falsy_status_keeps_type_default() {
    let err = RestError::new(&FLAKY, ErrorOptions::from_value(json!({"statusCode": 0})).unwrap());
    assert_eq!(err.status_code(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    assert!(err.explicit_status_code().is_none());
}

#[test]
fn cause_options_and_template() {
    let cause = std::io::Error::other("disk full");
    let err = rest_error!(
        status::bad_request,
        options = ErrorOptions::new().cause(cause).status_code(400),
        "wrapped: {}",
        "detail"
    );

    assert_eq!(err.message(), "wrapped: detail");
    assert_eq!(err.status_code(), Some(StatusCode::BAD_REQUEST));
    let source = std::error::Error::source(&err).unwrap();
    assert_eq!(source.to_string(), "disk full");
    assert!(source.downcast_ref::<std::io::Error>().is_some());
}

#[test]
fn body_follows_message_for_every_variant() {
    for variant in rest_errors::HTTP_VARIANTS.iter().chain(rest_errors::REST_VARIANTS).copied() {
        let err = RestError::new(variant, ErrorOptions::new().args(variant.display_name()));
        assert_eq!(err.body().message, err.message());
        assert_eq!(err.body().code, variant.name());
        assert_eq!(err.status_code(), variant.default_status());
    }
}

#[test]
fn derived_name_never_falls_back_to_base() {
    let err = rest::wrong_accept(ErrorOptions::new());
    assert_eq!(err.response_body().code, "WrongAcceptError");
    assert_eq!(err.error_type(), "WrongAcceptError");
}

#[test]
fn rest_errors_chain_through_anyhow() {
    fn load() -> anyhow::Result<()> {
        Err(status::not_found(ErrorOptions::new().args("no row")).into())
    }

    let err = load().unwrap_err();
    let rest = err.downcast_ref::<RestError>().unwrap();
    assert_eq!(rest.status_code(), Some(StatusCode::NOT_FOUND));

    let wrapped = status::bad_gateway(ErrorOptions::new().cause(err).args("upstream"));
    assert!(wrapped.has_cause_with_name("NotFoundError"));
}

#[test]
fn malformed_record_is_a_construction_fault() {
    fn build(value: serde_json::Value) -> Result<RestError, ConstructError> {
        Ok(RestError::new(&HTTP_ERROR, ErrorOptions::from_value(value)?))
    }

    assert!(matches!(build(json!(["no"])), Err(ConstructError::NotARecord { .. })));
    assert!(matches!(
        build(json!({"statusCode": "teapot"})),
        Err(ConstructError::InvalidStatusCode { .. })
    ));
    assert!(build(json!({"statusCode": 418, "requestId": "r-1"})).is_ok_and(|e| e.info()["requestId"] == "r-1"));
}
