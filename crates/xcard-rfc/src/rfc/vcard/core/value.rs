//! vCard value types (RFC 6350 §4).

use chrono::{DateTime, NaiveDate, Utc};

use super::structured::{Address, Gender, Organization, StructuredName};
use crate::rfc::xcard::XmlFragment;

/// A vCard property value.
///
/// The variant is chosen by the scribe that decoded the property.
#[derive(Debug, Clone, PartialEq)]
pub enum VCardValue {
    /// Text value (RFC 6350 §4.1).
    Text(String),

    /// Multi-valued text (NICKNAME, CATEGORIES).
    TextList(Vec<String>),

    /// URI value (RFC 6350 §4.2).
    Uri(String),

    /// Date, time, or datetime value (RFC 6350 §4.3).
    DateAndOrTime(DateAndOrTime),

    /// Timestamp (REV property).
    Timestamp(DateTime<Utc>),

    /// Structured name (N property).
    StructuredName(StructuredName),

    /// Address (ADR property).
    Address(Address),

    /// Organization (ORG property).
    Organization(Organization),

    /// Gender (GENDER property).
    Gender(Gender),

    /// Language tag value (RFC 6350 §4.8).
    LanguageTag(String),

    /// Raw XML (XML property, and anything no scribe could decode).
    Xml(XmlFragment),
}

/// A DATE-AND-OR-TIME value.
///
/// Complete calendar dates are parsed; the reduced-accuracy and truncated
/// forms RFC 6350 allows (`--0412`, `T1022`, `1985-04`) are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateAndOrTime {
    /// A complete calendar date.
    Date(NaiveDate),
    /// A partial date, a time, or a date-time, as written.
    Partial(String),
    /// Free text (`<text>`), e.g. "circa 1800".
    Text(String),
}

impl DateAndOrTime {
    /// Parses a date, time or date-time lexical value.
    ///
    /// Returns `None` if the value contains characters that cannot appear in
    /// any RFC 6350 date or time form.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        for format in ["%Y%m%d", "%Y-%m-%d"] {
            if let Ok(date) = NaiveDate::parse_from_str(value, format) {
                return Some(Self::Date(date));
            }
        }
        value
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '-' | 'T' | 'Z' | '+' | ':'))
            .then(|| Self::Partial(value.to_owned()))
    }

    /// Returns the complete date, if one was given.
    #[must_use]
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(date) => Some(*date),
            Self::Partial(_) | Self::Text(_) => None,
        }
    }
}

impl std::fmt::Display for DateAndOrTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Date(date) => write!(f, "{}", date.format("%Y%m%d")),
            Self::Partial(s) | Self::Text(s) => f.write_str(s),
        }
    }
}

/// Parses a REV timestamp in basic (`19951031T222710Z`) or extended
/// (`1995-10-31T22:27:10Z`) form, with `Z` or a numeric offset.
#[must_use]
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }
    let offset_form = match value.strip_suffix('Z') {
        Some(local) => format!("{local}+0000"),
        None => value.to_owned(),
    };
    DateTime::parse_from_str(&offset_form, "%Y%m%dT%H%M%S%z")
        .ok()
        .map(|ts| ts.with_timezone(&Utc))
}

impl VCardValue {
    /// Returns whether this is a text value.
    #[must_use]
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    /// Returns the value as text if applicable.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) | Self::LanguageTag(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value as a URI if applicable.
    #[must_use]
    pub fn as_uri(&self) -> Option<&str> {
        match self {
            Self::Uri(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the values of a text list.
    #[must_use]
    pub fn as_text_list(&self) -> Option<&[String]> {
        match self {
            Self::TextList(values) => Some(values),
            _ => None,
        }
    }

    /// Returns the value as a structured name if applicable.
    #[must_use]
    pub fn as_structured_name(&self) -> Option<&StructuredName> {
        match self {
            Self::StructuredName(n) => Some(n),
            _ => None,
        }
    }

    /// Returns the value as an address if applicable.
    #[must_use]
    pub fn as_address(&self) -> Option<&Address> {
        match self {
            Self::Address(a) => Some(a),
            _ => None,
        }
    }

    /// Returns the value as an organization if applicable.
    #[must_use]
    pub fn as_organization(&self) -> Option<&Organization> {
        match self {
            Self::Organization(o) => Some(o),
            _ => None,
        }
    }

    /// Returns the value as a gender if applicable.
    #[must_use]
    pub fn as_gender(&self) -> Option<&Gender> {
        match self {
            Self::Gender(g) => Some(g),
            _ => None,
        }
    }

    /// Returns the value as a date/time if applicable.
    #[must_use]
    pub fn as_date_and_or_time(&self) -> Option<&DateAndOrTime> {
        match self {
            Self::DateAndOrTime(d) => Some(d),
            _ => None,
        }
    }

    /// Returns the value as a timestamp if applicable.
    #[must_use]
    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }

    /// Returns the raw XML fragment if applicable.
    #[must_use]
    pub fn as_xml(&self) -> Option<&XmlFragment> {
        match self {
            Self::Xml(fragment) => Some(fragment),
            _ => None,
        }
    }
}

impl std::fmt::Display for VCardValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(s) | Self::Uri(s) | Self::LanguageTag(s) => f.write_str(s),
            Self::TextList(values) => f.write_str(&values.join(",")),
            Self::DateAndOrTime(d) => write!(f, "{d}"),
            Self::Timestamp(ts) => write!(f, "{}", ts.format("%Y%m%dT%H%M%SZ")),
            Self::StructuredName(n) => f.write_str(&n.display_name()),
            Self::Address(a) => f.write_str(&a.one_line()),
            Self::Organization(o) => {
                f.write_str(&o.name)?;
                for unit in &o.units {
                    write!(f, ";{unit}")?;
                }
                Ok(())
            }
            Self::Gender(g) => {
                if let Some(sex) = g.sex {
                    write!(f, "{}", sex.as_char())?;
                }
                if let Some(identity) = &g.identity {
                    write!(f, ";{identity}")?;
                }
                Ok(())
            }
            Self::Xml(fragment) => write!(f, "{fragment}"),
        }
    }
}

impl From<String> for VCardValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for VCardValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<StructuredName> for VCardValue {
    fn from(n: StructuredName) -> Self {
        Self::StructuredName(n)
    }
}

impl From<Address> for VCardValue {
    fn from(a: Address) -> Self {
        Self::Address(a)
    }
}

impl From<Organization> for VCardValue {
    fn from(o: Organization) -> Self {
        Self::Organization(o)
    }
}

impl From<Gender> for VCardValue {
    fn from(g: Gender) -> Self {
        Self::Gender(g)
    }
}

impl From<DateAndOrTime> for VCardValue {
    fn from(d: DateAndOrTime) -> Self {
        Self::DateAndOrTime(d)
    }
}

impl From<XmlFragment> for VCardValue {
    fn from(fragment: XmlFragment) -> Self {
        Self::Xml(fragment)
    }
}
