//! Fallback scribe that keeps a property as raw XML.

use super::{PropertyScribe, ScribeOutput, ScribeResult, property};
use crate::rfc::vcard::core::{VCardParameters, VCardValue, names};
use crate::rfc::xcard::fragment::XmlFragment;
use crate::rfc::xcard::namespace::QName;

/// Stores the whole property element as an `XML` property.
///
/// Used for elements no registered scribe claims and as the recovery path
/// when a scribe reports that it cannot parse its element. Never fails.
#[derive(Debug, Clone, Default)]
pub struct RawXmlScribe;

impl RawXmlScribe {
    /// Wraps `element` in an `XML` property.
    #[must_use]
    pub fn keep(&self, element: &XmlFragment, parameters: &VCardParameters) -> ScribeOutput {
        ScribeOutput::new(property(
            names::XML,
            VCardValue::Xml(element.clone()),
            element.to_string(),
            parameters,
        ))
    }
}

impl PropertyScribe for RawXmlScribe {
    fn qname(&self) -> QName {
        QName::xcard("xml")
    }

    fn parse_xml(&self, element: &XmlFragment, parameters: &VCardParameters) -> ScribeResult {
        Ok(self.keep(element, parameters))
    }
}
