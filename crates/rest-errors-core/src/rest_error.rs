use std::error::Error as StdError;
use std::fmt;

use http::StatusCode;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::trace::{self, StackTrace, TraceBoundary};
use crate::{ErrorBody, ErrorOptions, HttpError, Variant};

/// An HTTP-facing error
///
/// Built by [`RestError::new`] from a [`Variant`] and [`ErrorOptions`]. The
/// status code falls back to the variant's default unless the instance was
/// given one, and the body always carries the variant name as its code.
#[derive(Debug)]
pub struct RestError {
    variant: &'static Variant,
    message: String,
    status_code: Option<StatusCode>,
    body: ErrorBody,
    cause: Option<anyhow::Error>,
    info: Map<String, Value>,
    trace: Option<StackTrace>,
}

impl RestError {
    /// Construct an error of the given variant
    ///
    /// The cause and positional message are settled first. The explicit
    /// message, status and body are layered on top, then a trace is captured
    /// that stops at `options.constructor_opt`, or at this function when none
    /// is set.
    #[inline(never)]
    pub fn new(variant: &'static Variant, options: ErrorOptions) -> Self {
        let ErrorOptions {
            cause,
            args,
            message,
            status_code,
            constructor_opt,
            info,
        } = options;

        let derived = args.unwrap_or_default();
        let message = message.filter(|m| !m.is_empty()).unwrap_or(derived);
        let body = ErrorBody::new(variant.name(), message.as_str());

        let boundary = constructor_opt.unwrap_or_else(|| TraceBoundary::of(&Self::new));
        let trace = trace::capture(&boundary);

        tracing::trace!(
            name = variant.name(),
            status = status_code.or_else(|| variant.default_status()).map(|s| s.as_u16()),
            has_cause = cause.is_some(),
            "constructed http error"
        );

        Self {
            variant,
            message,
            status_code,
            body,
            cause,
            info,
            trace,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Instance status if one was given, else the variant default
    pub fn status_code(&self) -> Option<StatusCode> {
        self.status_code.or_else(|| self.variant.default_status())
    }

    /// Status set on this instance only
    pub const fn explicit_status_code(&self) -> Option<StatusCode> {
        self.status_code
    }

    pub const fn body(&self) -> &ErrorBody {
        &self.body
    }

    pub const fn name(&self) -> &'static str {
        self.variant.name()
    }

    pub const fn display_name(&self) -> &'static str {
        self.variant.display_name()
    }

    pub const fn variant(&self) -> &'static Variant {
        self.variant
    }

    /// Whether this error was built from `variant`
    ///
    /// Variants sharing a name but differing in status or REST code are distinct.
    pub fn is(&self, variant: &Variant) -> bool {
        *self.variant == *variant
    }

    /// The directly wrapped error
    pub const fn cause(&self) -> Option<&anyhow::Error> {
        self.cause.as_ref()
    }

    pub const fn trace(&self) -> Option<&StackTrace> {
        self.trace.as_ref()
    }

    /// Trace rendered under a `DisplayName: message` header
    pub fn stack(&self) -> Option<String> {
        let trace = self.trace.as_ref()?;
        let header = labelled(self.display_name(), &self.message);
        Some(if trace.is_empty() { header } else { format!("{header}\n{trace}") })
    }

    /// Informational fields given to this instance
    pub const fn info(&self) -> &Map<String, Value> {
        &self.info
    }

    /// Informational fields merged across every `RestError` in the chain
    ///
    /// Fields closer to the top of the chain override deeper ones.
    pub fn info_chain(&self) -> Map<String, Value> {
        let mut layers = vec![&self.info];
        layers.extend(self.causes().filter_map(|e| e.downcast_ref::<Self>()).map(|e| &e.info));

        let mut merged = Map::new();
        for layer in layers.into_iter().rev() {
            merged.extend(layer.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        merged
    }

    /// Every error below this one, nearest first
    pub fn causes(&self) -> impl Iterator<Item = &(dyn StdError + 'static)> {
        std::iter::successors(self.source(), |&e| e.source())
    }

    /// First `RestError` in the cause chain with the given name
    pub fn find_cause_by_name(&self, name: &str) -> Option<&Self> {
        self.causes()
            .filter_map(|e| e.downcast_ref::<Self>())
            .find(|e| e.name() == name)
    }

    pub fn has_cause_with_name(&self, name: &str) -> bool {
        self.find_cause_by_name(name).is_some()
    }

    /// `Name: message; caused by ...` across the whole chain
    pub fn full_message(&self) -> String {
        let mut out = labelled(self.name(), &self.message);
        for cause in self.causes() {
            out.push_str("; caused by ");
            match cause.downcast_ref::<Self>() {
                Some(rest) => out.push_str(&labelled(rest.name(), &rest.message)),
                None => out.push_str(&cause.to_string()),
            }
        }
        out
    }
}

fn labelled(name: &str, message: &str) -> String {
    if message.is_empty() {
        name.to_owned()
    } else {
        format!("{name}: {message}")
    }
}

impl fmt::Display for RestError {
    /// The message; `{:#}` prints the full chain instead
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.write_str(&self.full_message())
        } else {
            f.write_str(&self.message)
        }
    }
}

impl StdError for RestError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.cause.as_ref().map(|cause| &**cause as &(dyn StdError + 'static))
    }
}

impl HttpError for RestError {
    fn status_code(&self) -> Option<StatusCode> {
        Self::status_code(self)
    }

    fn error_type(&self) -> &str {
        self.variant.name()
    }

    fn client_message(&self) -> String {
        self.message.clone()
    }

    fn response_body(&self) -> ErrorBody {
        self.body.clone()
    }
}

/// Serializes as the response body
impl Serialize for RestError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.body.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::HTTP_ERROR;

    const INTERNAL: Variant = Variant::new("InternalServerError").with_default_status(500);
    const NOT_FOUND: Variant = Variant::new("NotFoundError").with_default_status(404);

    #[test]
    fn zero_arg_construction() {
        let err = RestError::new(&HTTP_ERROR, ErrorOptions::new());
        assert_eq!(err.message(), "");
        assert_eq!(err.body(), &ErrorBody::new("HttpError", ""));
        assert!(err.status_code().is_none());
        assert!(err.cause().is_none());
    }

    #[test]
    fn zero_arg_variant_uses_default_status() {
        let err = RestError::new(&NOT_FOUND, ErrorOptions::new());
        assert_eq!(err.status_code(), Some(StatusCode::NOT_FOUND));
        assert!(err.explicit_status_code().is_none());
        assert_eq!(err.body().code, "NotFoundError");
    }

    #[test]
    fn message_only() {
        let err = RestError::new(&HTTP_ERROR, ErrorOptions::new().args("boom"));
        assert_eq!(err.message(), "boom");
        assert_eq!(err.body().message, "boom");
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn explicit_message_and_status_win() {
        let err = RestError::new(
            &HTTP_ERROR,
            ErrorOptions::new().args("positional").message("explicit").status_code(404),
        );
        assert_eq!(err.message(), "explicit");
        assert_eq!(err.status_code(), Some(StatusCode::NOT_FOUND));
        assert_eq!(err.body().message, "explicit");
    }

    #[test]
    fn empty_explicit_message_falls_back() {
        let err = RestError::new(&HTTP_ERROR, ErrorOptions::new().args("positional").message(""));
        assert_eq!(err.message(), "positional");
    }

    #[test]
    fn zero_status_keeps_variant_default() {
        let err = RestError::new(&INTERNAL, ErrorOptions::new().status_code(0));
        assert_eq!(err.status_code(), Some(StatusCode::INTERNAL_SERVER_ERROR));

        let options = ErrorOptions::from_value(json!({"statusCode": 0})).unwrap();
        let err = RestError::new(&INTERNAL, options);
        assert_eq!(err.status_code(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[test]
    fn instance_status_overrides_default() {
        let err = RestError::new(&INTERNAL, ErrorOptions::new().status(StatusCode::BAD_GATEWAY));
        assert_eq!(err.status_code(), Some(StatusCode::BAD_GATEWAY));
        assert_eq!(err.variant().default_status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[test]
    fn cause_first_signature() {
        let io = std::io::Error::other("disk on fire");
        let err = RestError::new(
            &HTTP_ERROR,
            ErrorOptions::new()
                .cause(io)
                .status_code(400)
                .format(format_args!("wrapped: {}", "detail")),
        );

        assert_eq!(err.message(), "wrapped: detail");
        assert_eq!(err.status_code(), Some(StatusCode::BAD_REQUEST));
        assert_eq!(err.source().unwrap().to_string(), "disk on fire");
        assert_eq!(err.full_message(), "HttpError: wrapped: detail; caused by disk on fire");
    }

    #[test]
    fn body_mirrors_message() {
        for options in [
            ErrorOptions::new(),
            ErrorOptions::new().args("a"),
            ErrorOptions::new().message("b"),
            ErrorOptions::new().args("c").message(""),
        ] {
            let err = RestError::new(&NOT_FOUND, options);
            assert_eq!(err.body().message, err.message());
            assert_eq!(err.body().code, NOT_FOUND.name());
        }
    }

    #[test]
    fn chain_helpers_walk_rest_errors() {
        let inner = RestError::new(&NOT_FOUND, ErrorOptions::new().args("no widget").info("id", 7).info("layer", "db"));
        let outer = RestError::new(
            &INTERNAL,
            ErrorOptions::new().cause(inner).args("lookup failed").info("layer", "api"),
        );

        assert!(outer.has_cause_with_name("NotFoundError"));
        assert!(!outer.has_cause_with_name("BadRequestError"));
        assert_eq!(outer.find_cause_by_name("NotFoundError").unwrap().message(), "no widget");
        assert_eq!(
            format!("{outer:#}"),
            "InternalServerError: lookup failed; caused by NotFoundError: no widget"
        );

        let info = outer.info_chain();
        assert_eq!(info.get("id"), Some(&json!(7)));
        assert_eq!(info.get("layer"), Some(&json!("api")));
        assert_eq!(outer.info().len(), 1);
    }

    #[test]
    fn anyhow_context_stays_in_chain() {
        let cause = anyhow::anyhow!("root").context("middle");
        let err = RestError::new(&HTTP_ERROR, ErrorOptions::new().cause(cause));
        let chain: Vec<String> = err.causes().map(ToString::to_string).collect();
        assert_eq!(chain, ["middle", "root"]);
    }

    #[test]
    fn http_error_trait_uses_body() {
        let err = RestError::new(&NOT_FOUND, ErrorOptions::new().args("gone"));
        let dyn_err: &dyn HttpError = &err;
        assert_eq!(dyn_err.error_type(), "NotFoundError");
        assert_eq!(dyn_err.status_code(), Some(StatusCode::NOT_FOUND));
        assert_eq!(dyn_err.response_body(), ErrorBody::new("NotFoundError", "gone"));
    }

    #[test]
    fn serializes_as_body() {
        let err = RestError::new(&NOT_FOUND, ErrorOptions::new().message("explicit"));
        insta::assert_snapshot!(
            serde_json::to_string(&err).unwrap(),
            @r#"{"code":"NotFoundError","message":"explicit"}"#
        );
    }

    #[test]
    fn is_checks_variant() {
        let err = RestError::new(&NOT_FOUND, ErrorOptions::new());
        assert!(err.is(&NOT_FOUND));
        assert!(!err.is(&HTTP_ERROR));
    }

    #[test]
    fn is_tells_apart_variants_sharing_a_name() {
        const PLAIN: Variant = Variant::new("PreconditionFailedError").with_default_status(412);
        const REST: Variant = PLAIN.with_rest_code("PreconditionFailed");

        let err = RestError::new(&PLAIN, ErrorOptions::new());
        assert!(err.is(&PLAIN));
        assert!(!err.is(&REST));
        assert!(RestError::new(&REST, ErrorOptions::new()).is(&REST));
    }

    #[test]
    fn rest_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + 'static>() {}
        assert_send_sync::<RestError>();
    }
}
