use std::path::Path;

use crate::{Config, TRACE_ENV_VAR, TraceCapture};

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads and validates the file, then applies the `REST_ERRORS_TRACE` override.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, TOML parsing fails,
    /// the environment override is malformed, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        let mut config = Self::parse(&raw)?;
        config.apply_env()?;

        Ok(config)
    }

    /// Parse configuration from a TOML string without touching the environment
    ///
    /// # Errors
    ///
    /// Returns an error if TOML parsing or validation fails
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(raw).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    /// Configuration taken from the environment alone
    ///
    /// # Errors
    ///
    /// Returns an error if `REST_ERRORS_TRACE` holds an unknown policy
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Override `trace.capture` from `REST_ERRORS_TRACE` when it is set
    ///
    /// # Errors
    ///
    /// Returns an error if the variable holds an unknown policy
    pub fn apply_env(&mut self) -> anyhow::Result<()> {
        let Ok(value) = std::env::var(TRACE_ENV_VAR) else {
            return Ok(());
        };

        let capture: TraceCapture = value
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid {TRACE_ENV_VAR} value `{value}`: expected auto, always or never"))?;

        tracing::debug!(%capture, "trace capture overridden from environment");
        self.trace.capture = capture;
        Ok(())
    }

    /// Validate that the configuration is usable
    ///
    /// # Errors
    ///
    /// Returns an error if a `trace.hide` pattern is not a valid regex
    pub fn validate(&self) -> anyhow::Result<()> {
        for pattern in &self.trace.hide {
            regex::Regex::new(pattern).map_err(|e| anyhow::anyhow!("invalid trace hide pattern '{pattern}': {e}"))?;
        }
        Ok(())
    }
}
