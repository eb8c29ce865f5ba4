//! Non-fatal diagnostics collected while reading a card.

use std::fmt;

/// Coded warnings raised by the reader itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningCode {
    /// The scribe asked for the property to be skipped.
    Skipped,
    /// The property value did not parse and was kept as raw XML instead.
    Unparseable,
    /// The property contained a nested vCard, which xCard cannot carry.
    EmbeddedVCard,
}

impl WarningCode {
    /// Numeric code, stable across releases.
    #[must_use]
    pub const fn code(self) -> u16 {
        match self {
            Self::Skipped => 22,
            Self::Unparseable => 33,
            Self::EmbeddedVCard => 34,
        }
    }

    const fn summary(self) -> &'static str {
        match self {
            Self::Skipped => "Property has requested that it be skipped",
            Self::Unparseable => {
                "Property value could not be parsed and was stored as an XML property instead"
            }
            Self::EmbeddedVCard => "Embedded vCards are not supported in xCard documents",
        }
    }
}

/// One warning attached to a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    /// Local name of the property the warning is about, if any.
    pub property: Option<String>,
    /// Reader-defined code; `None` for free-text warnings from scribes.
    pub code: Option<WarningCode>,
    /// Human-readable message.
    pub message: String,
    /// Supporting detail, e.g. the XML of a property that failed to parse.
    pub detail: Option<String>,
}

impl ParseWarning {
    /// Creates a coded warning with the code's standard message.
    ///
    /// `reason` is appended to the message when given.
    #[must_use]
    pub fn coded(property: Option<&str>, code: WarningCode, reason: Option<&str>) -> Self {
        let message = match reason {
            Some(reason) if !reason.is_empty() => format!("{}: {reason}", code.summary()),
            _ => code.summary().to_owned(),
        };
        Self {
            property: property.map(str::to_owned),
            code: Some(code),
            message,
            detail: None,
        }
    }

    /// Creates a free-text warning.
    #[must_use]
    pub fn text(property: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            property: property.map(str::to_owned),
            code: None,
            message: message.into(),
            detail: None,
        }
    }

    /// Attaches supporting detail.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Returns the numeric code, if the warning has one.
    #[must_use]
    pub fn code_number(&self) -> Option<u16> {
        self.code.map(WarningCode::code)
    }
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(property) = &self.property {
            write!(f, "{property} property: ")?;
        }
        if let Some(code) = self.code {
            write!(f, "(code {}) ", code.code())?;
        }
        f.write_str(&self.message)?;
        if let Some(detail) = &self.detail {
            write!(f, " [{detail}]")?;
        }
        Ok(())
    }
}

/// Ordered warnings for the card being read.
#[derive(Debug, Clone, Default)]
pub struct ParseWarnings {
    warnings: Vec<ParseWarning>,
}

impl ParseWarnings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, warning: ParseWarning) {
        tracing::debug!(%warning, "Parse warning");
        self.warnings.push(warning);
    }

    /// Returns the current warnings and leaves the sink empty.
    pub fn take(&mut self) -> Vec<ParseWarning> {
        std::mem::take(&mut self.warnings)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }
}
