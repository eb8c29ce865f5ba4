//! XML namespace and qualified name types.

use std::borrow::Cow;

/// xCard namespace URI (RFC 6351 §3).
pub const XCARD_NS: &str = "urn:ietf:params:xml:ns:vcard-4.0";

/// An XML namespace. The empty string stands for "no namespace".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Namespace(pub Cow<'static, str>);

impl Namespace {
    /// xCard namespace.
    pub const XCARD: Self = Self(Cow::Borrowed(XCARD_NS));

    /// The absent namespace.
    pub const NONE: Self = Self(Cow::Borrowed(""));

    /// Creates a new namespace from a string.
    #[must_use]
    pub fn new(uri: impl Into<Cow<'static, str>>) -> Self {
        Self(uri.into())
    }

    /// Returns the namespace URI.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns whether this is the absent namespace.
    #[must_use]
    pub fn is_none(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&'static str> for Namespace {
    fn from(s: &'static str) -> Self {
        Self(Cow::Borrowed(s))
    }
}

impl From<String> for Namespace {
    fn from(s: String) -> Self {
        Self(Cow::Owned(s))
    }
}

/// A qualified XML name (namespace + local name).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QName {
    /// The namespace URI.
    pub namespace: Namespace,
    /// The local name.
    pub local_name: Cow<'static, str>,
}

impl QName {
    /// Creates a new qualified name.
    #[must_use]
    pub fn new(namespace: impl Into<Namespace>, local_name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            namespace: namespace.into(),
            local_name: local_name.into(),
        }
    }

    /// Creates an xCard qualified name.
    #[must_use]
    pub fn xcard(local_name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            namespace: Namespace::XCARD,
            local_name: local_name.into(),
        }
    }

    /// Returns the local name.
    #[must_use]
    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    /// Returns the namespace URI.
    #[must_use]
    pub fn namespace_uri(&self) -> &str {
        self.namespace.as_str()
    }

    /// Returns whether this is an xCard element.
    #[must_use]
    pub fn is_xcard(&self) -> bool {
        self.namespace == Namespace::XCARD
    }
}

impl std::fmt::Display for QName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{}}}{}", self.namespace.as_str(), self.local_name)
    }
}

/// Structural xCard element names.
pub mod elements {
    use super::QName;

    /// `<vcards>`, the card collection.
    #[must_use]
    pub fn vcards() -> QName {
        QName::xcard("vcards")
    }
    /// `<vcard>`, one card.
    #[must_use]
    pub fn vcard() -> QName {
        QName::xcard("vcard")
    }
    /// `<group name="...">`, a property group.
    #[must_use]
    pub fn group() -> QName {
        QName::xcard("group")
    }
    /// `<parameters>`, the parameter block of a property.
    #[must_use]
    pub fn parameters() -> QName {
        QName::xcard("parameters")
    }
}
