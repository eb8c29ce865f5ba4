//! vCard property types (RFC 6350).

use super::parameter::VCardParameters;
use super::value::VCardValue;

/// A vCard property.
///
/// Contains the decoded value along with the original raw value
/// for round-trip fidelity.
#[derive(Debug, Clone, PartialEq)]
pub struct VCardProperty {
    /// Optional property group (the `name` of an enclosing `<group>`).
    pub group: Option<String>,
    /// Property name (normalized to uppercase).
    pub name: String,
    /// Parameters in order of appearance.
    pub params: VCardParameters,
    /// Decoded value.
    pub value: VCardValue,
    /// Original raw value string (for round-trip).
    pub raw_value: String,
}

impl VCardProperty {
    /// Creates a property with the given value and no parameters.
    #[must_use]
    pub fn new(name: impl Into<String>, value: VCardValue, raw_value: impl Into<String>) -> Self {
        Self {
            group: None,
            name: name.into().to_ascii_uppercase(),
            params: VCardParameters::new(),
            value,
            raw_value: raw_value.into(),
        }
    }

    /// Creates a property with a text value.
    #[must_use]
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        let value_str = value.into();
        Self::new(name, VCardValue::Text(value_str.clone()), value_str)
    }

    /// Creates a property with a URI value.
    #[must_use]
    pub fn uri(name: impl Into<String>, value: impl Into<String>) -> Self {
        let value_str = value.into();
        Self::new(name, VCardValue::Uri(value_str.clone()), value_str)
    }

    /// Replaces the parameters.
    #[must_use]
    pub fn with_params(mut self, params: VCardParameters) -> Self {
        self.params = params;
        self
    }

    /// Returns the first value of a parameter.
    #[must_use]
    pub fn get_param_value(&self, name: &str) -> Option<&str> {
        self.params.first(name)
    }

    /// Returns whether this property has the specified TYPE value.
    #[must_use]
    pub fn has_type(&self, type_value: &str) -> bool {
        self.params.has_type(type_value)
    }

    /// Returns the PREF value if present (1-100, lower is preferred).
    #[must_use]
    pub fn pref(&self) -> Option<u8> {
        self.params.pref()
    }

    /// Returns the value as text if it is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        self.value.as_text()
    }
}

/// Property names produced by the xCard reader.
pub mod names {
    // Single text value
    pub const FN: &str = "FN";
    pub const NOTE: &str = "NOTE";
    pub const TITLE: &str = "TITLE";
    pub const ROLE: &str = "ROLE";
    pub const PRODID: &str = "PRODID";
    pub const KIND: &str = "KIND";
    pub const EMAIL: &str = "EMAIL";
    pub const LANG: &str = "LANG";
    pub const TZ: &str = "TZ";

    // URI, or text where the URI form is missing
    pub const UID: &str = "UID";
    pub const TEL: &str = "TEL";
    pub const KEY: &str = "KEY";
    pub const RELATED: &str = "RELATED";

    // URI only
    pub const URL: &str = "URL";
    pub const PHOTO: &str = "PHOTO";
    pub const LOGO: &str = "LOGO";
    pub const SOUND: &str = "SOUND";
    pub const IMPP: &str = "IMPP";
    pub const MEMBER: &str = "MEMBER";
    pub const SOURCE: &str = "SOURCE";
    pub const FBURL: &str = "FBURL";
    pub const CALURI: &str = "CALURI";
    pub const CALADRURI: &str = "CALADRURI";
    pub const GEO: &str = "GEO";

    // Text lists
    pub const NICKNAME: &str = "NICKNAME";
    pub const CATEGORIES: &str = "CATEGORIES";

    // Structured
    pub const N: &str = "N";
    pub const ADR: &str = "ADR";
    pub const ORG: &str = "ORG";
    pub const GENDER: &str = "GENDER";

    // Dates
    pub const BDAY: &str = "BDAY";
    pub const ANNIVERSARY: &str = "ANNIVERSARY";
    pub const REV: &str = "REV";

    /// Raw XML kept for elements no scribe decodes.
    pub const XML: &str = "XML";
}
