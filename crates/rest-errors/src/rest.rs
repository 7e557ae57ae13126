//! REST-specific variants
//!
//! Each one carries a short REST code alongside its name. The body code is
//! still the variant name.

use rest_errors_core::{ErrorOptions, RestError, TraceBoundary, Variant};

variants! {
    REST_VARIANTS;
    400 => BAD_DIGEST, bad_digest, "BadDigestError", rest = "BadDigest";
    400 => INVALID_CONTENT, invalid_content, "InvalidContentError", rest = "InvalidContent";
    400 => INVALID_HEADER, invalid_header, "InvalidHeaderError", rest = "InvalidHeader";
    400 => INVALID_VERSION, invalid_version, "InvalidVersionError", rest = "InvalidVersion";
    400 => REQUEST_EXPIRED, request_expired, "RequestExpiredError", rest = "RequestExpired";
    401 => INVALID_CREDENTIALS, invalid_credentials, "InvalidCredentialsError", rest = "InvalidCredentials";
    403 => NOT_AUTHORIZED, not_authorized, "NotAuthorizedError", rest = "NotAuthorized";
    404 => RESOURCE_NOT_FOUND, resource_not_found, "ResourceNotFoundError", rest = "ResourceNotFound";
    405 => BAD_METHOD, bad_method, "BadMethodError", rest = "BadMethod";
    406 => WRONG_ACCEPT, wrong_accept, "WrongAcceptError", rest = "WrongAccept";
    409 => INVALID_ARGUMENT, invalid_argument, "InvalidArgumentError", rest = "InvalidArgument";
    409 => MISSING_PARAMETER, missing_parameter, "MissingParameterError", rest = "MissingParameter";
    412 => PRECONDITION_FAILED, precondition_failed, "PreconditionFailedError", rest = "PreconditionFailed";
    429 => REQUEST_THROTTLED, request_throttled, "RequestThrottledError", rest = "RequestThrottled";
    500 => INTERNAL, internal, "InternalError", rest = "Internal";
}
