//! Scribe for properties holding a single typed value.

use super::{PropertyScribe, ScribeOutput, ScribeResult, ValueType, first_value, missing_value, property};
use crate::rfc::vcard::core::VCardParameters;
use crate::rfc::xcard::fragment::XmlFragment;
use crate::rfc::xcard::namespace::QName;

/// Decodes `<fn><text>John Doe</text></fn>`-shaped properties.
///
/// The value comes from the first child wrapped in one of the accepted value
/// types, tried in order. Extra values of the chosen type are ignored with a
/// warning.
#[derive(Debug, Clone)]
pub struct SimpleScribe {
    element: &'static str,
    property_name: &'static str,
    accepted: &'static [ValueType],
}

impl SimpleScribe {
    #[must_use]
    pub const fn new(
        element: &'static str,
        property_name: &'static str,
        accepted: &'static [ValueType],
    ) -> Self {
        Self {
            element,
            property_name,
            accepted,
        }
    }

    /// A property whose value is `<text>`.
    #[must_use]
    pub const fn text(element: &'static str, property_name: &'static str) -> Self {
        Self::new(element, property_name, &[ValueType::Text])
    }

    /// A property whose value is `<uri>`.
    #[must_use]
    pub const fn uri(element: &'static str, property_name: &'static str) -> Self {
        Self::new(element, property_name, &[ValueType::Uri])
    }

    /// A property whose value is `<uri>` or, failing that, `<text>`.
    #[must_use]
    pub const fn uri_or_text(element: &'static str, property_name: &'static str) -> Self {
        Self::new(element, property_name, &[ValueType::Uri, ValueType::Text])
    }
}

impl PropertyScribe for SimpleScribe {
    fn qname(&self) -> QName {
        QName::xcard(self.element)
    }

    fn parse_xml(&self, element: &XmlFragment, parameters: &VCardParameters) -> ScribeResult {
        let root = element.root();
        let (value_type, child) =
            first_value(root, self.accepted).ok_or_else(|| missing_value(root, self.accepted))?;

        let text = child.text();
        let value = value_type.decode(&text)?;
        let output = ScribeOutput::new(property(self.property_name, value, text, parameters));

        let extra = root.xcard_elements(value_type.element()).count() - 1;
        Ok(if extra > 0 {
            output.with_warning(format!(
                "{extra} additional <{}> value(s) ignored",
                value_type.element()
            ))
        } else {
            output
        })
    }
}
