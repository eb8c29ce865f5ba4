//! Scribes for structured values: N, ADR, ORG and GENDER.

use super::{PropertyScribe, ScribeOutput, ScribeResult, ValueType, missing_value, property};
use crate::rfc::vcard::core::{
    Address, Gender, Organization, Sex, StructuredName, VCardParameters, VCardValue, names,
};
use crate::rfc::xcard::error::ScribeError;
use crate::rfc::xcard::fragment::{Element, XmlFragment};
use crate::rfc::xcard::namespace::QName;

/// Pushes each xCard component element's text onto the matching field of
/// `target`.
///
/// Returns `false` if no component element was recognized. Empty component
/// elements (`<prefix/>`) are recognized but contribute no value.
fn collect_components<T>(
    root: Element<'_>,
    target: &mut T,
    component_mut: for<'t> fn(&'t mut T, &str) -> Option<&'t mut Vec<String>>,
) -> bool {
    let mut recognized = false;
    for child in root.elements().filter(|e| e.name().is_xcard()) {
        if let Some(component) = component_mut(target, child.local_name()) {
            recognized = true;
            let text = child.text();
            if !text.is_empty() {
                component.push(text);
            }
        }
    }
    recognized
}

fn no_components(root: Element<'_>) -> ScribeError {
    ScribeError::cannot_parse(format!("<{}> has no component elements", root.local_name()))
}

/// N: `<surname>`, `<given>`, `<additional>`, `<prefix>`, `<suffix>`.
#[derive(Debug, Clone, Default)]
pub struct StructuredNameScribe;

impl PropertyScribe for StructuredNameScribe {
    fn qname(&self) -> QName {
        QName::xcard("n")
    }

    fn parse_xml(&self, element: &XmlFragment, parameters: &VCardParameters) -> ScribeResult {
        let root = element.root();
        let mut name = StructuredName::new();
        if !collect_components(root, &mut name, StructuredName::component_mut) {
            return Err(no_components(root));
        }
        let raw = [
            &name.family,
            &name.given,
            &name.additional,
            &name.prefixes,
            &name.suffixes,
        ]
        .map(|c| c.join(","))
        .join(";");
        Ok(ScribeOutput::new(property(
            names::N,
            VCardValue::StructuredName(name),
            raw,
            parameters,
        )))
    }
}

/// ADR: `<pobox>`, `<ext>`, `<street>`, `<locality>`, `<region>`, `<code>`,
/// `<country>`.
#[derive(Debug, Clone, Default)]
pub struct AddressScribe;

impl PropertyScribe for AddressScribe {
    fn qname(&self) -> QName {
        QName::xcard("adr")
    }

    fn parse_xml(&self, element: &XmlFragment, parameters: &VCardParameters) -> ScribeResult {
        let root = element.root();
        let mut address = Address::new();
        if !collect_components(root, &mut address, Address::component_mut) {
            return Err(no_components(root));
        }
        let raw = [
            &address.po_box,
            &address.extended,
            &address.street,
            &address.locality,
            &address.region,
            &address.postal_code,
            &address.country,
        ]
        .map(|c| c.join(","))
        .join(";");
        Ok(ScribeOutput::new(property(
            names::ADR,
            VCardValue::Address(address),
            raw,
            parameters,
        )))
    }
}

/// ORG: one `<text>` for the name, then one per unit.
#[derive(Debug, Clone, Default)]
pub struct OrganizationScribe;

impl PropertyScribe for OrganizationScribe {
    fn qname(&self) -> QName {
        QName::xcard("org")
    }

    fn parse_xml(&self, element: &XmlFragment, parameters: &VCardParameters) -> ScribeResult {
        let root = element.root();
        let components: Vec<String> = root
            .xcard_elements(ValueType::Text.element())
            .map(|e| e.text())
            .collect();
        let raw = components.join(";");
        let org = Organization::from_components(components)
            .ok_or_else(|| missing_value(root, &[ValueType::Text]))?;
        Ok(ScribeOutput::new(property(
            names::ORG,
            VCardValue::Organization(org),
            raw,
            parameters,
        )))
    }
}

/// GENDER: `<sex>` and an optional `<identity>`.
#[derive(Debug, Clone, Default)]
pub struct GenderScribe;

impl PropertyScribe for GenderScribe {
    fn qname(&self) -> QName {
        QName::xcard("gender")
    }

    fn parse_xml(&self, element: &XmlFragment, parameters: &VCardParameters) -> ScribeResult {
        let root = element.root();
        let sex_text = root
            .first_xcard_element("sex")
            .map(|e| e.text())
            .ok_or_else(|| ScribeError::cannot_parse("<gender> has no <sex> element"))?;

        let sex = if sex_text.trim().is_empty() {
            None
        } else {
            Some(Sex::parse(&sex_text).ok_or_else(|| {
                ScribeError::cannot_parse(format!("unknown sex value: {}", sex_text.trim()))
            })?)
        };
        let identity = root
            .first_xcard_element("identity")
            .map(|e| e.text())
            .filter(|t| !t.is_empty());

        let raw = match &identity {
            Some(identity) => format!("{};{identity}", sex_text.trim()),
            None => sex_text.trim().to_owned(),
        };
        Ok(ScribeOutput::new(property(
            names::GENDER,
            VCardValue::Gender(Gender { sex, identity }),
            raw,
            parameters,
        )))
    }
}
