//! Lookup of scribes by property element name.

use std::collections::HashMap;
use std::fmt;

use super::{
    AddressScribe, DateScribe, GenderScribe, OrganizationScribe, PropertyScribe, RawXmlScribe,
    SimpleScribe, StructuredNameScribe, TextListScribe, TimestampScribe, ValueType,
};
use crate::rfc::vcard::core::names;
use crate::rfc::xcard::namespace::QName;

/// Registered scribes keyed by the qualified name they decode.
///
/// Elements without an entry fall through to the [`RawXmlScribe`].
pub struct ScribeIndex {
    scribes: HashMap<QName, Box<dyn PropertyScribe>>,
    raw: RawXmlScribe,
}

impl ScribeIndex {
    /// Creates an index holding the standard RFC 6350 scribes.
    #[must_use]
    pub fn new() -> Self {
        let mut index = Self::empty();
        for scribe in standard_scribes() {
            index.register(scribe);
        }
        index
    }

    /// Creates an index with no scribes registered.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            scribes: HashMap::new(),
            raw: RawXmlScribe,
        }
    }

    /// Registers a scribe under its own qualified name.
    ///
    /// Returns the scribe previously registered for that name, if any.
    pub fn register(&mut self, scribe: Box<dyn PropertyScribe>) -> Option<Box<dyn PropertyScribe>> {
        self.scribes.insert(scribe.qname(), scribe)
    }

    /// Removes the scribe registered for `qname`.
    pub fn unregister(&mut self, qname: &QName) -> Option<Box<dyn PropertyScribe>> {
        self.scribes.remove(qname)
    }

    /// Returns the scribe for `qname`, if one is registered.
    #[must_use]
    pub fn get(&self, qname: &QName) -> Option<&dyn PropertyScribe> {
        self.scribes.get(qname).map(Box::as_ref)
    }

    #[must_use]
    pub fn contains(&self, qname: &QName) -> bool {
        self.scribes.contains_key(qname)
    }

    /// The fallback scribe.
    #[must_use]
    pub fn raw_xml(&self) -> &RawXmlScribe {
        &self.raw
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scribes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scribes.is_empty()
    }
}

impl Default for ScribeIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ScribeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.scribes.keys().map(QName::local_name).collect();
        names.sort_unstable();
        f.debug_struct("ScribeIndex").field("scribes", &names).finish()
    }
}

const TZ_TYPES: &[ValueType] = &[ValueType::Text, ValueType::Uri, ValueType::UtcOffset];

fn standard_scribes() -> Vec<Box<dyn PropertyScribe>> {
    let mut scribes: Vec<Box<dyn PropertyScribe>> = Vec::new();

    for (element, name) in [
        ("fn", names::FN),
        ("note", names::NOTE),
        ("title", names::TITLE),
        ("role", names::ROLE),
        ("prodid", names::PRODID),
        ("kind", names::KIND),
        ("email", names::EMAIL),
    ] {
        scribes.push(Box::new(SimpleScribe::text(element, name)));
    }
    for (element, name) in [
        ("uid", names::UID),
        ("tel", names::TEL),
        ("key", names::KEY),
        ("related", names::RELATED),
    ] {
        scribes.push(Box::new(SimpleScribe::uri_or_text(element, name)));
    }
    for (element, name) in [
        ("url", names::URL),
        ("photo", names::PHOTO),
        ("logo", names::LOGO),
        ("sound", names::SOUND),
        ("impp", names::IMPP),
        ("member", names::MEMBER),
        ("source", names::SOURCE),
        ("fburl", names::FBURL),
        ("caluri", names::CALURI),
        ("caladruri", names::CALADRURI),
        ("geo", names::GEO),
    ] {
        scribes.push(Box::new(SimpleScribe::uri(element, name)));
    }
    scribes.push(Box::new(SimpleScribe::new("tz", names::TZ, TZ_TYPES)));
    scribes.push(Box::new(SimpleScribe::new(
        "lang",
        names::LANG,
        &[ValueType::LanguageTag],
    )));

    scribes.push(Box::new(TextListScribe::new("nickname", names::NICKNAME)));
    scribes.push(Box::new(TextListScribe::new("categories", names::CATEGORIES)));

    scribes.push(Box::new(StructuredNameScribe));
    scribes.push(Box::new(AddressScribe));
    scribes.push(Box::new(OrganizationScribe));
    scribes.push(Box::new(GenderScribe));

    scribes.push(Box::new(DateScribe::new("bday", names::BDAY)));
    scribes.push(Box::new(DateScribe::new("anniversary", names::ANNIVERSARY)));
    scribes.push(Box::new(TimestampScribe));

    scribes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rfc::vcard::core::{VCardParameters, VCardProperty};
    use crate::rfc::xcard::fragment::{FragmentBuilder, XmlFragment};
    use crate::rfc::xcard::scribe::{ScribeOutput, ScribeResult};

    struct Shouting;

    impl PropertyScribe for Shouting {
        fn qname(&self) -> QName {
            QName::xcard("fn")
        }

        fn parse_xml(&self, element: &XmlFragment, _: &VCardParameters) -> ScribeResult {
            let text = element.root().text().to_uppercase();
            Ok(ScribeOutput::new(VCardProperty::text("FN", text)))
        }
    }

    #[test]
    fn standard_scribes_are_registered() {
        let index = ScribeIndex::new();
        for local in ["fn", "n", "adr", "tel", "email", "bday", "rev", "gender", "nickname"] {
            assert!(index.contains(&QName::xcard(local)), "missing {local}");
        }
        assert!(!index.contains(&QName::xcard("xml")));
        assert!(!index.contains(&QName::new("urn:other", "fn")));
        assert!(ScribeIndex::empty().is_empty());
    }

    #[test]
    fn standard_properties_are_named_after_their_element() {
        let index = ScribeIndex::new();
        for (local, child, value) in [
            ("fn", "text", "Jane"),
            ("tel", "uri", "tel:+1555"),
            ("geo", "uri", "geo:1,2"),
            ("lang", "language-tag", "en"),
            ("nickname", "text", "JJ"),
            ("n", "surname", "Doe"),
            ("adr", "street", "Main St"),
            ("org", "text", "ABC"),
            ("gender", "sex", "F"),
            ("bday", "date", "19960415"),
        ] {
            let mut builder = FragmentBuilder::new(QName::xcard(local), Vec::new());
            builder.open(QName::xcard(child), Vec::new());
            builder.text(value);
            builder.close();
            let output = index
                .get(&QName::xcard(local))
                .unwrap()
                .parse_xml(&builder.finish(), &VCardParameters::new())
                .unwrap();
            assert_eq!(output.property.name, local.to_ascii_uppercase());
        }
    }

    #[test]
    fn register_replaces_existing() {
        let mut index = ScribeIndex::new();
        let before = index.len();
        assert!(index.register(Box::new(Shouting)).is_some());
        assert_eq!(index.len(), before);

        let mut builder = FragmentBuilder::new(QName::xcard("fn"), Vec::new());
        builder.text("quiet");
        let output = index
            .get(&QName::xcard("fn"))
            .unwrap()
            .parse_xml(&builder.finish(), &VCardParameters::new())
            .unwrap();
        assert_eq!(output.property.as_text(), Some("QUIET"));

        assert!(index.unregister(&QName::xcard("fn")).is_some());
        assert!(index.get(&QName::xcard("fn")).is_none());
    }
}
