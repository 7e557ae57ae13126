//! One variant per 4xx and 5xx status code

use rest_errors_core::{ErrorOptions, RestError, TraceBoundary, Variant};

variants! {
    HTTP_VARIANTS;
    400 => BAD_REQUEST, bad_request, "BadRequestError";
    401 => UNAUTHORIZED, unauthorized, "UnauthorizedError";
    402 => PAYMENT_REQUIRED, payment_required, "PaymentRequiredError";
    403 => FORBIDDEN, forbidden, "ForbiddenError";
    404 => NOT_FOUND, not_found, "NotFoundError";
    405 => METHOD_NOT_ALLOWED, method_not_allowed, "MethodNotAllowedError";
    406 => NOT_ACCEPTABLE, not_acceptable, "NotAcceptableError";
    407 => PROXY_AUTHENTICATION_REQUIRED, proxy_authentication_required, "ProxyAuthenticationRequiredError";
    408 => REQUEST_TIMEOUT, request_timeout, "RequestTimeoutError";
    409 => CONFLICT, conflict, "ConflictError";
    410 => GONE, gone, "GoneError";
    411 => LENGTH_REQUIRED, length_required, "LengthRequiredError";
    412 => PRECONDITION_FAILED, precondition_failed, "PreconditionFailedError";
    413 => PAYLOAD_TOO_LARGE, payload_too_large, "PayloadTooLargeError";
    414 => URI_TOO_LONG, uri_too_long, "UriTooLongError";
    415 => UNSUPPORTED_MEDIA_TYPE, unsupported_media_type, "UnsupportedMediaTypeError";
    416 => RANGE_NOT_SATISFIABLE, range_not_satisfiable, "RangeNotSatisfiableError";
    417 => EXPECTATION_FAILED, expectation_failed, "ExpectationFailedError";
    418 => IM_A_TEAPOT, im_a_teapot, "ImATeapotError";
    421 => MISDIRECTED_REQUEST, misdirected_request, "MisdirectedRequestError";
    422 => UNPROCESSABLE_ENTITY, unprocessable_entity, "UnprocessableEntityError";
    423 => LOCKED, locked, "LockedError";
    424 => FAILED_DEPENDENCY, failed_dependency, "FailedDependencyError";
    425 => TOO_EARLY, too_early, "TooEarlyError";
    426 => UPGRADE_REQUIRED, upgrade_required, "UpgradeRequiredError";
    428 => PRECONDITION_REQUIRED, precondition_required, "PreconditionRequiredError";
    429 => TOO_MANY_REQUESTS, too_many_requests, "TooManyRequestsError";
    431 => REQUEST_HEADER_FIELDS_TOO_LARGE, request_header_fields_too_large, "RequestHeaderFieldsTooLargeError";
    451 => UNAVAILABLE_FOR_LEGAL_REASONS, unavailable_for_legal_reasons, "UnavailableForLegalReasonsError";
    500 => INTERNAL_SERVER_ERROR, internal_server_error, "InternalServerError";
    501 => NOT_IMPLEMENTED, not_implemented, "NotImplementedError";
    502 => BAD_GATEWAY, bad_gateway, "BadGatewayError";
    503 => SERVICE_UNAVAILABLE, service_unavailable, "ServiceUnavailableError";
    504 => GATEWAY_TIMEOUT, gateway_timeout, "GatewayTimeoutError";
    505 => HTTP_VERSION_NOT_SUPPORTED, http_version_not_supported, "HttpVersionNotSupportedError";
    506 => VARIANT_ALSO_NEGOTIATES, variant_also_negotiates, "VariantAlsoNegotiatesError";
    507 => INSUFFICIENT_STORAGE, insufficient_storage, "InsufficientStorageError";
    508 => LOOP_DETECTED, loop_detected, "LoopDetectedError";
    509 => BANDWIDTH_LIMIT_EXCEEDED, bandwidth_limit_exceeded, "BandwidthLimitExceededError";
    510 => NOT_EXTENDED, not_extended, "NotExtendedError";
    511 => NETWORK_AUTHENTICATION_REQUIRED, network_authentication_required, "NetworkAuthenticationRequiredError";
}
