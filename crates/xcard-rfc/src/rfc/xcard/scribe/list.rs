//! Scribe for comma-list text properties (NICKNAME, CATEGORIES).

use super::{PropertyScribe, ScribeOutput, ScribeResult, ValueType, missing_value, property};
use crate::rfc::vcard::core::{VCardParameters, VCardValue};
use crate::rfc::xcard::fragment::XmlFragment;
use crate::rfc::xcard::namespace::QName;

/// Collects every `<text>` child, in order, into a text list.
#[derive(Debug, Clone)]
pub struct TextListScribe {
    element: &'static str,
    property_name: &'static str,
}

impl TextListScribe {
    #[must_use]
    pub const fn new(element: &'static str, property_name: &'static str) -> Self {
        Self {
            element,
            property_name,
        }
    }
}

impl PropertyScribe for TextListScribe {
    fn qname(&self) -> QName {
        QName::xcard(self.element)
    }

    fn parse_xml(&self, element: &XmlFragment, parameters: &VCardParameters) -> ScribeResult {
        let root = element.root();
        let values: Vec<String> = root
            .xcard_elements(ValueType::Text.element())
            .map(|e| e.text())
            .collect();
        if values.is_empty() {
            return Err(missing_value(root, &[ValueType::Text]));
        }

        let raw = values.join(",");
        Ok(ScribeOutput::new(property(
            self.property_name,
            VCardValue::TextList(values),
            raw,
            parameters,
        )))
    }
}
