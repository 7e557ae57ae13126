use serde::Deserialize;

/// Stack trace capture configuration
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TraceConfig {
    /// When to capture a trace on error construction
    #[serde(default)]
    pub capture: TraceCapture,
    /// Regex patterns; frames whose symbol matches any of them are dropped
    #[serde(default)]
    pub hide: Vec<String>,
}

/// Stack trace capture policy
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, strum::EnumString, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TraceCapture {
    /// Follow `RUST_LIB_BACKTRACE`, then `RUST_BACKTRACE`
    #[default]
    Auto,
    /// Always capture
    Always,
    /// Never capture
    Never,
}

impl TraceCapture {
    /// Resolve the policy to a yes/no answer for this process
    pub fn is_enabled(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => backtrace_env_enabled(),
        }
    }
}

/// Same precedence the standard library uses for `Backtrace::capture`
fn backtrace_env_enabled() -> bool {
    std::env::var("RUST_LIB_BACKTRACE")
        .or_else(|_| std::env::var("RUST_BACKTRACE"))
        .is_ok_and(|value| value != "0")
}
