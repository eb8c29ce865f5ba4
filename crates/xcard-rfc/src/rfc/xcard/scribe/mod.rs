//! Property decoders ("scribes").
//!
//! A scribe turns the XML fragment of one property, plus the parameters
//! collected from its `<parameters>` block, into a [`VCardProperty`]. The
//! reader looks scribes up by the property element's qualified name in a
//! [`ScribeIndex`]; elements with no scribe go to the [`RawXmlScribe`].

mod date;
mod list;
mod raw;
mod registry;
mod simple;
mod structured;

use super::error::ScribeError;
use super::fragment::{Element, XmlFragment};
use super::namespace::QName;
use crate::rfc::vcard::core::{
    DateAndOrTime, VCardParameters, VCardProperty, VCardValue, parse_timestamp,
};

pub use date::{DateScribe, TimestampScribe};
pub use list::TextListScribe;
pub use raw::RawXmlScribe;
pub use registry::ScribeIndex;
pub use simple::SimpleScribe;
pub use structured::{AddressScribe, GenderScribe, OrganizationScribe, StructuredNameScribe};

/// Result of one decode attempt.
pub type ScribeResult = Result<ScribeOutput, ScribeError>;

/// A decoded property and any non-fatal remarks about it.
#[derive(Debug, Clone, PartialEq)]
pub struct ScribeOutput {
    pub property: VCardProperty,
    pub warnings: Vec<String>,
}

impl ScribeOutput {
    #[must_use]
    pub fn new(property: VCardProperty) -> Self {
        Self {
            property,
            warnings: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }
}

/// Decoder for one property type.
pub trait PropertyScribe {
    /// Qualified name of the property element this scribe decodes.
    fn qname(&self) -> QName;

    /// Decodes a property element.
    ///
    /// ## Errors
    /// Returns [`ScribeError::CannotParse`] if the content does not match
    /// the property's value grammar, [`ScribeError::Skip`] if the property
    /// should be left out, or [`ScribeError::EmbeddedVCard`] if it carries
    /// a nested card.
    fn parse_xml(&self, element: &XmlFragment, parameters: &VCardParameters) -> ScribeResult;
}

/// xCard value-type wrapper elements (RFC 6351 §3.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Text,
    Uri,
    LanguageTag,
    UtcOffset,
    DateAndOrTime,
    Date,
    DateTime,
    Time,
    Timestamp,
}

impl ValueType {
    /// Local name of the wrapper element.
    #[must_use]
    pub const fn element(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Uri => "uri",
            Self::LanguageTag => "language-tag",
            Self::UtcOffset => "utc-offset",
            Self::DateAndOrTime => "date-and-or-time",
            Self::Date => "date",
            Self::DateTime => "date-time",
            Self::Time => "time",
            Self::Timestamp => "timestamp",
        }
    }

    /// Converts the text of a wrapper element into a value.
    ///
    /// ## Errors
    /// Returns [`ScribeError::CannotParse`] if the text is not a valid
    /// lexical form of this type.
    pub fn decode(self, text: &str) -> Result<VCardValue, ScribeError> {
        match self {
            Self::Text => Ok(VCardValue::Text(text.to_owned())),
            Self::Uri => Ok(VCardValue::Uri(text.trim().to_owned())),
            Self::LanguageTag => Ok(VCardValue::LanguageTag(text.trim().to_owned())),
            Self::UtcOffset => {
                let offset = text.trim();
                if is_utc_offset(offset) {
                    Ok(VCardValue::Text(offset.to_owned()))
                } else {
                    Err(ScribeError::cannot_parse(format!(
                        "invalid UTC offset: {offset}"
                    )))
                }
            }
            Self::DateAndOrTime | Self::Date | Self::DateTime | Self::Time => {
                DateAndOrTime::parse(text)
                    .map(VCardValue::DateAndOrTime)
                    .ok_or_else(|| {
                        ScribeError::cannot_parse(format!("invalid date/time: {}", text.trim()))
                    })
            }
            Self::Timestamp => parse_timestamp(text)
                .map(VCardValue::Timestamp)
                .ok_or_else(|| {
                    ScribeError::cannot_parse(format!("invalid timestamp: {}", text.trim()))
                }),
        }
    }
}

/// `+hh`, `-hhmm` and friends.
fn is_utc_offset(s: &str) -> bool {
    let Some(digits) = s.strip_prefix(['+', '-']) else {
        return false;
    };
    matches!(digits.len(), 2 | 4) && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Finds the first child of `element` wrapped in one of `types`, trying the
/// types in order.
fn first_value<'a>(element: Element<'a>, types: &[ValueType]) -> Option<(ValueType, Element<'a>)> {
    types.iter().find_map(|&value_type| {
        element
            .first_xcard_element(value_type.element())
            .map(|child| (value_type, child))
    })
}

/// Builds the "missing element" message for a property.
fn missing_value(element: Element<'_>, types: &[ValueType]) -> ScribeError {
    let expected = types
        .iter()
        .map(|t| format!("<{}>", t.element()))
        .collect::<Vec<_>>()
        .join(" or ");
    ScribeError::cannot_parse(format!(
        "<{}> has no {expected} element",
        element.local_name()
    ))
}

fn property(
    name: &str,
    value: VCardValue,
    raw_value: String,
    parameters: &VCardParameters,
) -> VCardProperty {
    VCardProperty::new(name, value, raw_value).with_params(parameters.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utc_offsets() {
        assert!(is_utc_offset("+05"));
        assert!(is_utc_offset("-0800"));
        assert!(!is_utc_offset("0800"));
        assert!(!is_utc_offset("+8"));
        assert!(!is_utc_offset("+08:00"));
    }

    #[test]
    fn value_types_decode() {
        assert_eq!(
            ValueType::Uri.decode(" tel:+1555 ").unwrap(),
            VCardValue::Uri("tel:+1555".into())
        );
        assert_eq!(
            ValueType::Text.decode(" spaced ").unwrap(),
            VCardValue::Text(" spaced ".into())
        );
        assert!(matches!(
            ValueType::Timestamp.decode("never"),
            Err(ScribeError::CannotParse(_))
        ));
        assert!(matches!(
            ValueType::Date.decode("--0412").unwrap(),
            VCardValue::DateAndOrTime(DateAndOrTime::Partial(_))
        ));
    }
}
