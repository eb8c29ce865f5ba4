//! vCard parameter types (RFC 6350 §5).

/// A vCard parameter.
///
/// Parameters can have multiple values (e.g., TYPE=home,work).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VCardParameter {
    /// Parameter name (normalized to uppercase).
    pub name: String,
    /// Parameter values, in order of appearance.
    pub values: Vec<String>,
}

impl VCardParameter {
    /// Creates a new parameter with a single value.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            values: vec![value.into()],
        }
    }

    /// Creates a parameter with multiple values.
    #[must_use]
    pub fn multi(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            values,
        }
    }

    /// Returns the first value, if any.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }

    /// Returns whether the parameter has the specified value (case-insensitive).
    #[must_use]
    pub fn has_value(&self, value: &str) -> bool {
        self.values.iter().any(|v| v.eq_ignore_ascii_case(value))
    }
}

/// The parameters attached to one property.
///
/// Keeps parameters in order of first appearance. Putting a value under a
/// name that is already present appends to that parameter's values, so
/// `<pref><integer>1</integer><integer>2</integer></pref>` yields one `PREF`
/// parameter with two values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VCardParameters {
    params: Vec<VCardParameter>,
}

impl VCardParameters {
    /// Creates an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value under `name`, appending if the name is already present.
    pub fn put(&mut self, name: &str, value: impl Into<String>) {
        if let Some(param) = self.get_mut(name) {
            param.values.push(value.into());
        } else {
            self.params.push(VCardParameter::new(name, value));
        }
    }

    /// Returns the parameter with the given name (case-insensitive).
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&VCardParameter> {
        self.params
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    fn get_mut(&mut self, name: &str) -> Option<&mut VCardParameter> {
        self.params
            .iter_mut()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Returns all values stored under `name`, or an empty slice.
    #[must_use]
    pub fn values(&self, name: &str) -> &[String] {
        self.get(name).map_or(&[], |p| p.values.as_slice())
    }

    /// Returns the first value stored under `name`.
    #[must_use]
    pub fn first(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(VCardParameter::value)
    }

    /// Returns whether `TYPE` contains the given value.
    #[must_use]
    pub fn has_type(&self, type_value: &str) -> bool {
        self.get("TYPE").is_some_and(|p| p.has_value(type_value))
    }

    /// Returns the PREF value if present (1-100, lower is preferred).
    #[must_use]
    pub fn pref(&self) -> Option<u8> {
        self.first("PREF").and_then(|v| v.parse().ok())
    }

    /// Iterates parameters in order of first appearance.
    pub fn iter(&self) -> std::slice::Iter<'_, VCardParameter> {
        self.params.iter()
    }

    /// Returns the number of distinct parameter names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Returns whether no parameters are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

impl<'a> IntoIterator for &'a VCardParameters {
    type Item = &'a VCardParameter;
    type IntoIter = std::slice::Iter<'a, VCardParameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl std::fmt::Display for VCardParameters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(";")?;
            }
            write!(f, "{}={}", param.name, param.values.join(","))?;
        }
        Ok(())
    }
}
