//! Path of currently open elements.

use super::namespace::QName;

/// The qualified names of the open elements, document root first.
///
/// Elements are pushed when they start and popped when they end, so the
/// path always matches the reader's position. All classification of the
/// reader's context goes through the predicates below.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hierarchy {
    path: Vec<QName>,
}

impl Hierarchy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: QName) {
        self.path.push(name);
    }

    /// Removes and returns the innermost open element.
    pub fn pop(&mut self) -> Option<QName> {
        self.path.pop()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.path.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[QName] {
        &self.path
    }

    /// The open elements below the first `depth` ones.
    #[must_use]
    pub fn below(&self, depth: usize) -> &[QName] {
        self.path.get(depth..).unwrap_or_default()
    }

    /// Path is exactly `expected`.
    #[must_use]
    pub fn is(&self, expected: &[QName]) -> bool {
        self.path == expected
    }

    /// Path is exactly `base` followed by `tail`.
    #[must_use]
    pub fn is_extension_of(&self, base: &[QName], tail: &[QName]) -> bool {
        self.path.len() == base.len() + tail.len() && self.starts_with_parts(base, tail)
    }

    /// Path begins with `base` followed by `tail` (an equal path counts).
    #[must_use]
    pub fn starts_with_parts(&self, base: &[QName], tail: &[QName]) -> bool {
        self.path.starts_with(base)
            && self
                .path
                .get(base.len()..)
                .is_some_and(|rest| rest.starts_with(tail))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rfc::xcard::namespace::elements::{parameters, vcard, vcards};

    fn path(names: &[QName]) -> Hierarchy {
        let mut hierarchy = Hierarchy::new();
        for name in names {
            hierarchy.push(name.clone());
        }
        hierarchy
    }

    #[test]
    fn push_and_pop_are_lifo() {
        let mut hierarchy = path(&[vcards(), vcard()]);
        assert_eq!(hierarchy.pop(), Some(vcard()));
        assert_eq!(hierarchy.pop(), Some(vcards()));
        assert_eq!(hierarchy.pop(), None);
        assert!(hierarchy.is_empty());
    }

    #[test]
    fn exact_predicate() {
        let hierarchy = path(&[vcards(), vcard(), QName::xcard("tel")]);
        assert!(hierarchy.is(&[vcards(), vcard(), QName::xcard("tel")]));
        assert!(!hierarchy.is(&[vcards(), vcard()]));
        assert_eq!(hierarchy.as_slice().len(), 3);
    }

    #[test]
    fn split_predicates() {
        let base = [vcards(), vcard(), QName::xcard("tel")];
        let hierarchy = path(&[
            vcards(),
            vcard(),
            QName::xcard("tel"),
            parameters(),
            QName::xcard("type"),
        ]);
        assert!(hierarchy.starts_with_parts(&base, &[parameters()]));
        assert!(!hierarchy.is_extension_of(&base, &[parameters()]));
        assert!(hierarchy.is_extension_of(&base, &[parameters(), QName::xcard("type")]));
        assert!(!hierarchy.starts_with_parts(&base, &[QName::xcard("uri")]));

        assert_eq!(hierarchy.below(4), [QName::xcard("type")]);
        assert!(hierarchy.below(9).is_empty());

        let short = path(&[vcards()]);
        assert!(!short.starts_with_parts(&base, &[parameters()]));
    }
}
