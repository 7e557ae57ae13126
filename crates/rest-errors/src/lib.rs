//! HTTP and REST error variants
//!
//! One constructor per 4xx/5xx status plus the REST-specific kinds, all
//! producing [`RestError`]. Each constructor hides itself from the captured
//! stack trace.
//!
//! ```
//! use rest_errors::{ErrorOptions, StatusCode, status};
//!
//! let err = status::not_found(ErrorOptions::new().format(format_args!("no widget {}", 42)));
//! assert_eq!(err.status_code(), Some(StatusCode::NOT_FOUND));
//! assert_eq!(err.body().code, "NotFoundError");
//! ```

#![allow(clippy::must_use_candidate)]

/// Declare variant constants, their constructors and a slice of all of them
macro_rules! variants {
    ($all:ident; $( $code:literal => $konst:ident, $ctor:ident, $name:literal $(, rest = $rest:literal)?; )*) => {
        $(
            #[doc = concat!("`", $name, "`, default status ", stringify!($code))]
            pub const $konst: Variant = Variant::new($name)
                .with_default_status($code)
                $(.with_rest_code($rest))?;

            #[doc = concat!("Build a `", $name, "`")]
            #[inline(never)]
            pub fn $ctor(options: ErrorOptions) -> RestError {
                RestError::new(&$konst, options.or_constructor_opt(TraceBoundary::of(&$ctor)))
            }
        )*

        /// Every variant in this module, ordered by status code
        pub const $all: &[&Variant] = &[$(&$konst),*];
    };
}

mod macros;
mod report;
pub mod rest;
pub mod status;

pub use http::StatusCode;
use rest_errors_config::Config;
pub use rest_errors_core::trace;
pub use rest_errors_core::{
    ConstructError, ErrorBody, ErrorOptions, HTTP_ERROR, HttpError, RestError, StackTrace, TraceBoundary, TraceFrame,
    TraceSettings, Variant,
};

pub use report::{CauseReport, ErrorReport, log_error};
pub use rest::REST_VARIANTS;
pub use status::HTTP_VARIANTS;

/// Install trace settings from configuration
///
/// Call once at startup, before any error is constructed. Without it the
/// settings come from the environment on first use.
///
/// # Errors
///
/// Returns an error if a hide pattern is invalid or settings were already installed
pub fn init(config: &Config) -> anyhow::Result<()> {
    let settings = TraceSettings::from_config(&config.trace)?;
    trace::install(settings).map_err(|_| anyhow::anyhow!("trace settings are already installed"))
}

/// The HTTP status variant whose default status is `code`
pub fn variant_for_code(code: u16) -> Option<&'static Variant> {
    HTTP_VARIANTS
        .iter()
        .copied()
        .find(|variant| variant.default_status_u16() == Some(code))
}

/// Look a variant up by name, HTTP status variants first
pub fn variant_by_name(name: &str) -> Option<&'static Variant> {
    HTTP_VARIANTS
        .iter()
        .chain(REST_VARIANTS)
        .copied()
        .find(|variant| variant.name() == name)
}

/// Build the error matching a status code
///
/// Unknown codes in 100..=999 produce a base `HttpError` carrying `code` as
/// its status. Codes outside that range cannot be represented as a
/// [`StatusCode`], so they produce a base `HttpError` with no status at all
/// and a warning is logged.
#[inline(never)]
pub fn make_err_from_code(code: u16, options: ErrorOptions) -> RestError {
    let options = options.or_constructor_opt(TraceBoundary::of(&make_err_from_code));
    match variant_for_code(code) {
        Some(variant) => RestError::new(variant, options),
        None => RestError::new(&HTTP_ERROR, options.status_code(code)),
    }
}
