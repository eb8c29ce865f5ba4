//! Scribes for BDAY, ANNIVERSARY and REV.

use super::{PropertyScribe, ScribeOutput, ScribeResult, ValueType, first_value, missing_value, property};
use crate::rfc::vcard::core::{DateAndOrTime, VCardParameters, VCardValue, names};
use crate::rfc::xcard::fragment::XmlFragment;
use crate::rfc::xcard::namespace::QName;

const DATE_TYPES: &[ValueType] = &[
    ValueType::Date,
    ValueType::DateTime,
    ValueType::DateAndOrTime,
    ValueType::Time,
    ValueType::Text,
];

/// Decodes date-and-or-time properties. A `<text>` value is kept as free
/// text rather than rejected.
#[derive(Debug, Clone)]
pub struct DateScribe {
    element: &'static str,
    property_name: &'static str,
}

impl DateScribe {
    #[must_use]
    pub const fn new(element: &'static str, property_name: &'static str) -> Self {
        Self {
            element,
            property_name,
        }
    }
}

impl PropertyScribe for DateScribe {
    fn qname(&self) -> QName {
        QName::xcard(self.element)
    }

    fn parse_xml(&self, element: &XmlFragment, parameters: &VCardParameters) -> ScribeResult {
        let root = element.root();
        let (value_type, child) =
            first_value(root, DATE_TYPES).ok_or_else(|| missing_value(root, DATE_TYPES))?;

        let text = child.text();
        let value = match value_type {
            ValueType::Text => VCardValue::DateAndOrTime(DateAndOrTime::Text(text.clone())),
            _ => value_type.decode(&text)?,
        };
        Ok(ScribeOutput::new(property(
            self.property_name,
            value,
            text,
            parameters,
        )))
    }
}

/// Decodes REV, whose only value type is `<timestamp>`.
#[derive(Debug, Clone, Default)]
pub struct TimestampScribe;

impl PropertyScribe for TimestampScribe {
    fn qname(&self) -> QName {
        QName::xcard("rev")
    }

    fn parse_xml(&self, element: &XmlFragment, parameters: &VCardParameters) -> ScribeResult {
        let root = element.root();
        let types = &[ValueType::Timestamp];
        let (value_type, child) =
            first_value(root, types).ok_or_else(|| missing_value(root, types))?;

        let text = child.text();
        let value = value_type.decode(&text)?;
        Ok(ScribeOutput::new(property(names::REV, value, text, parameters)))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::rfc::xcard::error::ScribeError;
    use crate::rfc::xcard::fragment::FragmentBuilder;

    fn fragment(element: &'static str, value_type: &'static str, text: &str) -> XmlFragment {
        let mut builder = FragmentBuilder::new(QName::xcard(element), Vec::new());
        builder.open(QName::xcard(value_type), Vec::new());
        builder.text(text);
        builder.close();
        builder.finish()
    }

    #[test]
    fn birthday_date() {
        let output = DateScribe::new("bday", "BDAY")
            .parse_xml(&fragment("bday", "date", "19850412"), &VCardParameters::new())
            .unwrap();
        let value = output.property.value.as_date_and_or_time().unwrap();
        assert_eq!(value.date(), NaiveDate::from_ymd_opt(1985, 4, 12));
    }

    #[test]
    fn birthday_text() {
        let output = DateScribe::new("bday", "BDAY")
            .parse_xml(&fragment("bday", "text", "circa 1800"), &VCardParameters::new())
            .unwrap();
        assert_eq!(
            output.property.value,
            VCardValue::DateAndOrTime(DateAndOrTime::Text("circa 1800".into()))
        );
    }

    #[test]
    fn bad_timestamp_cannot_parse() {
        let err = TimestampScribe
            .parse_xml(&fragment("rev", "timestamp", "last tuesday"), &VCardParameters::new())
            .unwrap_err();
        assert_eq!(err, ScribeError::CannotParse("invalid timestamp: last tuesday".into()));
    }

    #[test]
    fn good_timestamp() {
        let output = TimestampScribe
            .parse_xml(&fragment("rev", "timestamp", "20130101T120000Z"), &VCardParameters::new())
            .unwrap();
        assert!(output.property.value.as_timestamp().is_some());
        assert_eq!(output.property.raw_value, "20130101T120000Z");
    }
}
