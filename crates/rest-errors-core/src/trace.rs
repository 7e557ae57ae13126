//! Stack trace capture and frame filtering
//!
//! Traces are captured with the `backtrace` crate and resolved eagerly.
//! Frames are ordered innermost first. Everything from the capture point up
//! to and including the most recent call of the [`TraceBoundary`] function is
//! removed, so an error's constructors never show up in its own trace. Earlier
//! calls of the same function, as in recursion, are kept.
//!
//! Whether a frame survives depends on symbol names, so inlined
//! constructors cannot be hidden. Mark them `#[inline(never)]`.

use std::borrow::Cow;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use rest_errors_config::{Config, TraceConfig};
use serde::Serialize;

static SETTINGS: OnceLock<TraceSettings> = OnceLock::new();

/// Process-wide trace capture settings
#[derive(Debug, Clone, Default)]
pub struct TraceSettings {
    enabled: bool,
    hide: Vec<Regex>,
}

impl TraceSettings {
    /// Never capture
    pub const fn disabled() -> Self {
        Self {
            enabled: false,
            hide: Vec::new(),
        }
    }

    /// Always capture, hiding nothing beyond the boundary
    pub const fn always() -> Self {
        Self {
            enabled: true,
            hide: Vec::new(),
        }
    }

    /// Build settings from configuration, resolving `auto` against the environment
    ///
    /// # Errors
    ///
    /// Returns an error if a hide pattern is not a valid regex
    pub fn from_config(config: &TraceConfig) -> anyhow::Result<Self> {
        let hide = config
            .hide
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| anyhow::anyhow!("invalid trace hide pattern '{pattern}': {e}"))
            })
            .collect::<anyhow::Result<_>>()?;

        Ok(Self {
            enabled: config.capture.is_enabled(),
            hide,
        })
    }

    /// Also drop frames whose symbol matches `pattern`
    #[must_use]
    pub fn with_hidden(mut self, pattern: Regex) -> Self {
        self.hide.push(pattern);
        self
    }

    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }
}

/// Install the process-wide settings
///
/// Only the first call wins. Later calls, and calls made after an error was
/// already constructed, hand the settings back.
///
/// # Errors
///
/// Returns the rejected settings if some were already in place
pub fn install(settings: TraceSettings) -> Result<(), TraceSettings> {
    let enabled = settings.enabled;
    let hidden = settings.hide.len();
    SETTINGS.set(settings)?;
    tracing::debug!(enabled, hidden, "installed trace settings");
    Ok(())
}

/// Current settings, derived from the environment if none were installed
pub fn settings() -> &'static TraceSettings {
    SETTINGS.get_or_init(|| {
        Config::from_env()
            .and_then(|config| TraceSettings::from_config(&config.trace))
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "falling back to disabled trace capture");
                TraceSettings::disabled()
            })
    })
}

/// Function below which frames are excluded from a trace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceBoundary(Cow<'static, str>);

impl TraceBoundary {
    /// Boundary at the given function item
    ///
    /// ```
    /// # use rest_errors_core::TraceBoundary;
    /// fn lookup() {}
    /// assert!(TraceBoundary::of(&lookup).path().ends_with("lookup"));
    /// ```
    pub fn of<F>(_function: &F) -> Self {
        Self(without_generics(std::any::type_name::<F>()))
    }

    /// Boundary at a function named by its full path
    pub fn named(path: impl Into<Cow<'static, str>>) -> Self {
        match path.into() {
            Cow::Borrowed(path) => Self(without_generics(path)),
            Cow::Owned(path) => Self(Cow::Owned(without_generics(&path).into_owned())),
        }
    }

    pub fn path(&self) -> &str {
        &self.0
    }

    /// Whether `symbol` is this function or a closure nested in it
    fn locate(&self, symbol: &str) -> Option<Position> {
        let symbol = without_generics(symbol);
        let rest = symbol.strip_prefix(self.path())?;
        if rest.is_empty() {
            Some(Position::Function)
        } else {
            rest.starts_with("::").then_some(Position::Nested)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    Function,
    Nested,
}

/// A single resolved frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceFrame {
    /// Demangled symbol without its hash suffix
    pub symbol: Option<String>,
    pub file: Option<String>,
    pub line: Option<u32>,
}

impl TraceFrame {
    fn from_symbol(symbol: &backtrace::BacktraceSymbol) -> Self {
        Self {
            symbol: symbol.name().map(|name| strip_hash(&format!("{name:#}")).to_owned()),
            file: symbol.filename().map(|path| path.display().to_string()),
            line: symbol.lineno(),
        }
    }

    const fn unresolved() -> Self {
        Self {
            symbol: None,
            file: None,
            line: None,
        }
    }
}

impl fmt::Display for TraceFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol.as_deref().unwrap_or("<unknown>"))?;
        match (&self.file, self.line) {
            (Some(file), Some(line)) => write!(f, " ({file}:{line})"),
            (Some(file), None) => write!(f, " ({file})"),
            _ => Ok(()),
        }
    }
}

/// Filtered stack trace, innermost frame first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StackTrace {
    frames: Vec<TraceFrame>,
}

impl StackTrace {
    pub fn frames(&self) -> &[TraceFrame] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Whether any frame's symbol contains `needle`
    pub fn contains_symbol(&self, needle: &str) -> bool {
        self.frames
            .iter()
            .filter_map(|frame| frame.symbol.as_deref())
            .any(|symbol| symbol.contains(needle))
    }
}

impl fmt::Display for StackTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, frame) in self.frames.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "    at {frame}")?;
        }
        Ok(())
    }
}

/// Capture a trace at the call site if capture is enabled
pub(crate) fn capture(boundary: &TraceBoundary) -> Option<StackTrace> {
    let settings = settings();
    if !settings.enabled {
        return None;
    }

    let backtrace = backtrace::Backtrace::new();
    let mut frames = Vec::new();
    for frame in backtrace.frames() {
        if frame.symbols().is_empty() {
            frames.push(TraceFrame::unresolved());
        }
        frames.extend(frame.symbols().iter().map(TraceFrame::from_symbol));
    }

    Some(StackTrace {
        frames: filter_frames(frames, boundary, &settings.hide),
    })
}

/// Drop frames at and below the boundary, then any hidden frames
///
/// Without a boundary match only the capture machinery itself is dropped.
fn filter_frames(frames: Vec<TraceFrame>, boundary: &TraceBoundary, hide: &[Regex]) -> Vec<TraceFrame> {
    let locate = |frame: &TraceFrame| frame.symbol.as_deref().and_then(|symbol| boundary.locate(symbol));

    let skip = match frames.iter().position(|frame| locate(frame).is_some()) {
        Some(mut last) => {
            // a closure's cut reaches out to the call that encloses it
            while locate(&frames[last]) == Some(Position::Nested)
                && frames.get(last + 1).and_then(locate).is_some()
            {
                last += 1;
            }
            last + 1
        }
        None => frames.iter().take_while(|frame| is_capture_frame(frame)).count(),
    };

    frames
        .into_iter()
        .skip(skip)
        .filter(|frame| {
            !frame
                .symbol
                .as_deref()
                .is_some_and(|symbol| hide.iter().any(|re| re.is_match(symbol)))
        })
        .collect()
}

fn is_capture_frame(frame: &TraceFrame) -> bool {
    frame.symbol.as_deref().is_none_or(|symbol| {
        symbol.starts_with("backtrace::") || symbol.starts_with("<backtrace::") || symbol.starts_with(module_path!())
    })
}

/// `<app::Type<T>>::method` as `app::Type<T>::method`
///
/// Trait impls (`<A as B>::method`) have no such form.
fn unqualified(name: &str) -> Option<String> {
    let inner = name.strip_prefix('<')?;
    let mut depth = 0usize;
    for (i, c) in inner.char_indices() {
        match c {
            '<' => depth += 1,
            '>' if inner[..i].ends_with('-') => {}
            '>' if depth == 0 => return Some(format!("{}{}", &inner[..i], &inner[i + 1..])),
            '>' => depth -= 1,
            ' ' if depth == 0 && inner[i..].starts_with(" as ") => return None,
            _ => {}
        }
    }
    None
}

/// Path with every generic argument list removed
///
/// `app::Cache<u8>::get`, `<app::Cache<u8>>::get` and `app::lookup::<u8>`
/// become `app::Cache::get` and `app::lookup`. Trait impl paths are returned
/// as they are.
fn without_generics(name: &str) -> Cow<'_, str> {
    let name = unqualified(name).map_or(Cow::Borrowed(name), Cow::Owned);
    if name.starts_with('<') || !name.contains('<') {
        return name;
    }

    let mut path = String::with_capacity(name.len());
    let mut depth = 0usize;
    for (i, c) in name.char_indices() {
        match c {
            '<' => depth += 1,
            '>' if name[..i].ends_with('-') => {
                if depth == 0 {
                    path.push(c);
                }
            }
            '>' => depth = depth.saturating_sub(1),
            _ if depth == 0 => path.push(c),
            _ => {}
        }
    }
    Cow::Owned(path.replace("::::", "::").trim_end_matches("::").to_owned())
}

/// Remove a legacy mangling hash (`::h0123456789abcdef`)
fn strip_hash(name: &str) -> &str {
    match name.rsplit_once("::h") {
        Some((head, hash)) if hash.len() == 16 && hash.bytes().all(|b| b.is_ascii_hexdigit()) => head,
        _ => name,
    }
}
