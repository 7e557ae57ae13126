#![allow(clippy::must_use_candidate)]

mod loader;
pub mod trace;

use serde::Deserialize;

pub use trace::*;

/// Environment variable that overrides `trace.capture`
pub const TRACE_ENV_VAR: &str = "REST_ERRORS_TRACE";

/// Top-level rest-errors configuration
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Stack trace capture configuration
    #[serde(default)]
    pub trace: TraceConfig,
}
