//! xCard reader error types.

use thiserror::Error;

/// Result type for xCard reading.
pub type XCardResult<T> = Result<T, XCardError>;

/// A fatal error that aborts reading.
///
/// Problems with individual properties are never fatal; they are reported
/// as [`ParseWarning`](super::ParseWarning)s instead.
#[derive(Error, Debug)]
pub enum XCardError {
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("encoding error: {0}")]
    Encoding(#[from] quick_xml::encoding::EncodingError),

    #[error("escape error: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),

    #[error("invalid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unknown entity reference: &{0};")]
    UnknownEntity(String),

    #[error("unbound namespace prefix in element: {0}")]
    UnboundPrefix(String),

    #[error("document has no root element")]
    NoRootElement,

    #[error("unexpected end of input with {open} element(s) still open")]
    UnexpectedEof { open: usize },
}

/// Why a scribe could not produce a property.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScribeError {
    /// The property is understood but should be left out of the card.
    #[error("skipped: {0}")]
    Skip(String),

    /// The property's content does not match its value grammar.
    #[error("cannot parse: {0}")]
    CannotParse(String),

    /// The property holds a complete nested vCard.
    #[error("embedded vCard")]
    EmbeddedVCard,
}

impl ScribeError {
    /// Creates a [`ScribeError::CannotParse`].
    #[must_use]
    pub fn cannot_parse(message: impl Into<String>) -> Self {
        Self::CannotParse(message.into())
    }

    /// Creates a [`ScribeError::Skip`].
    #[must_use]
    pub fn skip(message: impl Into<String>) -> Self {
        Self::Skip(message.into())
    }
}
