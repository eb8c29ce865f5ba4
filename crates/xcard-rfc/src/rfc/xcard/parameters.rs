//! Collection of property parameters from a `<parameters>` block.
//!
//! ```xml
//! <parameters>
//!   <type><text>work</text><text>voice</text></type>
//!   <pref><integer>1</integer></pref>
//! </parameters>
//! ```
//!
//! Each child of `<parameters>` names a parameter and each of its children
//! wraps one value, whatever the value type.

use super::namespace::QName;
use crate::rfc::vcard::core::VCardParameters;

/// Accumulates parameters for the property being read.
///
/// Positions are given as the path *below* the `<parameters>` element, so
/// `[type]` is a parameter name element and `[type, text]` one of its
/// value wrappers.
#[derive(Debug, Clone, Default)]
pub struct ParameterCollector {
    parameters: VCardParameters,
    name: Option<QName>,
    data_type: Option<QName>,
}

impl ParameterCollector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles an element start at `position` (the element is its last entry).
    pub fn start(&mut self, position: &[QName]) {
        match position {
            [name] if name.is_xcard() => {
                self.name = Some(name.clone());
                self.data_type = None;
            }
            [name, data_type]
                if data_type.is_xcard() && self.name.as_ref() == Some(name) =>
            {
                self.data_type = Some(data_type.clone());
            }
            _ => {}
        }
    }

    /// Handles an element end at `position`, with the text it directly held.
    pub fn end(&mut self, position: &[QName], text: &str) {
        match position {
            [name, data_type]
                if self.data_type.as_ref() == Some(data_type)
                    && self.name.as_ref() == Some(name) =>
            {
                self.parameters.put(name.local_name(), text);
                self.data_type = None;
            }
            [name] if self.name.as_ref() == Some(name) => {
                self.name = None;
                self.data_type = None;
            }
            _ => {}
        }
    }

    /// Returns the collected parameters.
    #[must_use]
    pub fn finish(self) -> VCardParameters {
        self.parameters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(collector: &mut ParameterCollector, position: &[QName], text: &str) {
        collector.start(position);
        collector.end(position, text);
    }

    #[test]
    fn repeated_values_are_kept_in_order() {
        let type_ = QName::xcard("type");
        let mut collector = ParameterCollector::new();
        collector.start(&[type_.clone()]);
        element(&mut collector, &[type_.clone(), QName::xcard("text")], "work");
        element(&mut collector, &[type_.clone(), QName::xcard("text")], "voice");
        collector.end(&[type_], "");

        let params = collector.finish();
        assert_eq!(params.values("TYPE"), ["work", "voice"]);
    }

    #[test]
    fn value_type_does_not_matter() {
        let pref = QName::xcard("pref");
        let mut collector = ParameterCollector::new();
        collector.start(&[pref.clone()]);
        element(&mut collector, &[pref.clone(), QName::xcard("integer")], "1");
        collector.end(&[pref], "");

        assert_eq!(collector.finish().first("pref"), Some("1"));
    }

    #[test]
    fn name_without_value_stores_nothing() {
        let mut collector = ParameterCollector::new();
        element(&mut collector, &[QName::xcard("label")], "stray text");
        assert!(collector.finish().is_empty());
    }

    #[test]
    fn foreign_namespace_is_ignored() {
        let foreign = QName::new("http://example.com", "type");
        let mut collector = ParameterCollector::new();
        collector.start(&[foreign.clone()]);
        element(&mut collector, &[foreign.clone(), QName::xcard("text")], "x");
        collector.end(&[foreign], "");

        let type_ = QName::xcard("type");
        collector.start(&[type_.clone()]);
        element(
            &mut collector,
            &[type_.clone(), QName::new("http://example.com", "text")],
            "y",
        );
        collector.end(&[type_], "");

        assert!(collector.finish().is_empty());
    }
}
