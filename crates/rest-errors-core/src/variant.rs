use http::StatusCode;

/// A named error kind with type-level defaults
///
/// Variants are declared once as constants and shared by every error built
/// from them. The name doubles as the body `code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Variant {
    name: &'static str,
    display_name: &'static str,
    default_status: Option<u16>,
    rest_code: Option<&'static str>,
}

/// The base variant: no default status
pub const HTTP_ERROR: Variant = Variant::new("HttpError");

impl Variant {
    /// Declare a variant with no default status
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            display_name: name,
            default_status: None,
            rest_code: None,
        }
    }

    /// Set the label used in trace output, which defaults to the name
    #[must_use]
    pub const fn with_display_name(mut self, display_name: &'static str) -> Self {
        self.display_name = display_name;
        self
    }

    /// Set the status used when an instance does not override it
    #[must_use]
    pub const fn with_default_status(mut self, status: u16) -> Self {
        self.default_status = Some(status);
        self
    }

    /// Attach a short REST code (e.g. `BadDigest`)
    #[must_use]
    pub const fn with_rest_code(mut self, rest_code: &'static str) -> Self {
        self.rest_code = Some(rest_code);
        self
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn display_name(&self) -> &'static str {
        self.display_name
    }

    pub const fn rest_code(&self) -> Option<&'static str> {
        self.rest_code
    }

    /// Raw default status as declared
    pub const fn default_status_u16(&self) -> Option<u16> {
        self.default_status
    }

    /// Default status, if declared and valid
    pub fn default_status(&self) -> Option<StatusCode> {
        self.default_status.and_then(|code| StatusCode::from_u16(code).ok())
    }
}
