use optreg_symbols::types::Location;
use std::fmt;

///
/// Severity
///

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => f.write_str("error"),
            Self::Warning => f.write_str("warning"),
        }
    }
}

///
/// DiagCode
///
/// Stable diagnostic codes. Validation problems live in the `OPTREG0xx`
/// family; emission failures in `OPTREG1xx`, so hosts can tell a bad
/// declaration apart from a generator fault.
///

#[remain::sorted]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiagCode {
    AbstractProperty,
    AmbiguousCandidate,
    EmissionFailure,
    UnresolvedBase,
}

impl DiagCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UnresolvedBase => "OPTREG001",
            Self::AbstractProperty => "OPTREG002",
            Self::AmbiguousCandidate => "OPTREG003",
            Self::EmissionFailure => "OPTREG100",
        }
    }
}

impl fmt::Display for DiagCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

///
/// Diagnostic
///

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub code: DiagCode,
    pub severity: Severity,
    pub message: String,
    pub location: Option<Location>,
}

impl Diagnostic {
    #[must_use]
    pub fn error(code: DiagCode, message: impl Into<String>, location: Option<Location>) -> Self {
        Self {
            code,
            severity: Severity::Error,
            message: message.into(),
            location,
        }
    }

    #[must_use]
    pub fn warning(code: DiagCode, message: impl Into<String>, location: Option<Location>) -> Self {
        Self {
            code,
            severity: Severity::Warning,
            message: message.into(),
            location,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.code, self.severity, self.message)?;
        if let Some(location) = &self.location {
            write!(f, " (at {location})")?;
        }
        Ok(())
    }
}

///
/// Diagnostics
///
/// Per-collection accumulator, merged into the pass-level stream once the
/// collection is finished. Never shared across collections.
///

#[derive(Debug, Default)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.items.push(diagnostic);
    }

    pub fn merge(&mut self, other: Self) {
        self.items.extend(other.items);
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.items.iter().any(|d| d.severity == Severity::Error)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    #[must_use]
    pub fn into_items(self) -> Vec<Diagnostic> {
        self.items
    }

    /// Collapse to `Err(self)` when any error-severity diagnostic is
    /// present; warnings alone pass.
    pub fn result(self) -> Result<(), Self> {
        if self.has_errors() { Err(self) } else { Ok(()) }
    }
}
