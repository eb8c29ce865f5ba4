//! The vCard aggregate.

use super::property::{VCardProperty, names};
use super::value::VCardValue;

/// vCard format version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VCardVersion {
    /// vCard 3.0 (RFC 2426).
    V3,
    /// vCard 4.0 (RFC 6350). The only version with an XML encoding.
    #[default]
    V4,
}

impl VCardVersion {
    /// Returns the VERSION property text.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::V3 => "3.0",
            Self::V4 => "4.0",
        }
    }
}

impl std::fmt::Display for VCardVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A contact card: an ordered list of properties and a format version.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VCard {
    /// Format version.
    pub version: VCardVersion,
    /// Properties in document order.
    pub properties: Vec<VCardProperty>,
}

impl VCard {
    /// Creates an empty vCard 4.0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty card of the given version.
    #[must_use]
    pub fn with_version(version: VCardVersion) -> Self {
        Self {
            version,
            properties: Vec::new(),
        }
    }

    /// Appends a property.
    pub fn add_property(&mut self, property: VCardProperty) {
        self.properties.push(property);
    }

    /// Returns the first property with the given name (case-insensitive).
    #[must_use]
    pub fn get_property(&self, name: &str) -> Option<&VCardProperty> {
        self.properties
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Returns all properties with the given name (case-insensitive).
    pub fn get_properties<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a VCardProperty> {
        self.properties
            .iter()
            .filter(move |p| p.name.eq_ignore_ascii_case(name))
    }

    /// Returns the properties belonging to a group.
    pub fn group<'a>(&'a self, group: &'a str) -> impl Iterator<Item = &'a VCardProperty> {
        self.properties
            .iter()
            .filter(move |p| p.group.as_deref() == Some(group))
    }

    /// Returns the FN value.
    #[must_use]
    pub fn formatted_name(&self) -> Option<&str> {
        self.get_property(names::FN).and_then(VCardProperty::as_text)
    }

    /// Returns the UID value, whether given as text or URI.
    #[must_use]
    pub fn uid(&self) -> Option<&str> {
        self.get_property(names::UID)
            .and_then(|p| match &p.value {
                VCardValue::Text(s) | VCardValue::Uri(s) => Some(s.as_str()),
                _ => None,
            })
    }

    /// Returns the number of properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Returns whether the card has no properties.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}
