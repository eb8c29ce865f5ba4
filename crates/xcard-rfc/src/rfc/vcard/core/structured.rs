//! Structured vCard types (RFC 6350).
//!
//! These types represent structured property values like N, ADR, ORG and
//! GENDER. Each component lists the xCard element name it is read from
//! (RFC 6351 §3.3).

/// Structured name (N property, RFC 6350 §6.2.2).
///
/// All components are optional per RFC 6350.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructuredName {
    /// Family names (surnames), `<surname>`.
    pub family: Vec<String>,
    /// Given names (first names), `<given>`.
    pub given: Vec<String>,
    /// Additional names (middle names), `<additional>`.
    pub additional: Vec<String>,
    /// Honorific prefixes (e.g., "Mr.", "Dr."), `<prefix>`.
    pub prefixes: Vec<String>,
    /// Honorific suffixes (e.g., "Jr.", "M.D."), `<suffix>`.
    pub suffixes: Vec<String>,
}

impl StructuredName {
    /// Creates an empty structured name.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a structured name with family and given names.
    #[must_use]
    pub fn simple(family: impl Into<String>, given: impl Into<String>) -> Self {
        Self {
            family: vec![family.into()],
            given: vec![given.into()],
            ..Self::default()
        }
    }

    /// Returns the component list fed by the given xCard element, if any.
    pub fn component_mut(&mut self, element: &str) -> Option<&mut Vec<String>> {
        match element {
            "surname" => Some(&mut self.family),
            "given" => Some(&mut self.given),
            "additional" => Some(&mut self.additional),
            "prefix" => Some(&mut self.prefixes),
            "suffix" => Some(&mut self.suffixes),
            _ => None,
        }
    }

    /// Returns whether the name is empty (all components are empty).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.family.is_empty()
            && self.given.is_empty()
            && self.additional.is_empty()
            && self.prefixes.is_empty()
            && self.suffixes.is_empty()
    }

    /// Formats as a display name (given + family).
    #[must_use]
    pub fn display_name(&self) -> String {
        let mut parts = Vec::new();
        if !self.given.is_empty() {
            parts.push(self.given.join(" "));
        }
        if !self.family.is_empty() {
            parts.push(self.family.join(" "));
        }
        parts.join(" ")
    }
}

/// Address (ADR property, RFC 6350 §6.3.1).
///
/// All components are optional per RFC 6350.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    /// Post office box, `<pobox>`.
    pub po_box: Vec<String>,
    /// Extended address (e.g., apartment or suite number), `<ext>`.
    pub extended: Vec<String>,
    /// Street address, `<street>`.
    pub street: Vec<String>,
    /// Locality (city), `<locality>`.
    pub locality: Vec<String>,
    /// Region (state or province), `<region>`.
    pub region: Vec<String>,
    /// Postal code, `<code>`.
    pub postal_code: Vec<String>,
    /// Country name, `<country>`.
    pub country: Vec<String>,
}

impl Address {
    /// Creates an empty address.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the component list fed by the given xCard element, if any.
    pub fn component_mut(&mut self, element: &str) -> Option<&mut Vec<String>> {
        match element {
            "pobox" => Some(&mut self.po_box),
            "ext" => Some(&mut self.extended),
            "street" => Some(&mut self.street),
            "locality" => Some(&mut self.locality),
            "region" => Some(&mut self.region),
            "code" => Some(&mut self.postal_code),
            "country" => Some(&mut self.country),
            _ => None,
        }
    }

    /// Returns whether the address is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.po_box.is_empty()
            && self.extended.is_empty()
            && self.street.is_empty()
            && self.locality.is_empty()
            && self.region.is_empty()
            && self.postal_code.is_empty()
            && self.country.is_empty()
    }

    /// Formats as a single-line address.
    #[must_use]
    pub fn one_line(&self) -> String {
        [
            &self.street,
            &self.locality,
            &self.region,
            &self.postal_code,
            &self.country,
        ]
        .iter()
        .flat_map(|v| v.iter())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
    }
}

/// Organization (ORG property, RFC 6350 §6.6.4).
///
/// In xCard the first `<text>` child is the organizational name and the
/// following ones are units in order of decreasing specificity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Organization {
    /// Organization name.
    pub name: String,
    /// Organizational units (department, division, etc.).
    pub units: Vec<String>,
}

impl Organization {
    /// Builds an organization from its components in document order.
    ///
    /// Returns `None` when there are no components.
    #[must_use]
    pub fn from_components(components: Vec<String>) -> Option<Self> {
        let mut components = components.into_iter();
        let name = components.next()?;
        Some(Self {
            name,
            units: components.collect(),
        })
    }

    /// Returns whether the organization is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.units.is_empty()
    }
}

/// Gender (GENDER property, RFC 6350 §6.2.7).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Gender {
    /// Sex component: M, F, O, N, or U, `<sex>`.
    pub sex: Option<Sex>,
    /// Gender identity text (free-form), `<identity>`.
    pub identity: Option<String>,
}

/// Sex component of GENDER property (RFC 6350 §6.2.7).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sex {
    /// Male.
    Male,
    /// Female.
    Female,
    /// Other.
    Other,
    /// None or not applicable.
    None,
    /// Unknown.
    Unknown,
}

impl Sex {
    /// Parses the single-letter form. Surrounding whitespace is ignored.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let mut chars = s.trim().chars();
        let c = chars.next()?;
        if chars.next().is_some() {
            return Option::None;
        }
        match c {
            'M' | 'm' => Some(Self::Male),
            'F' | 'f' => Some(Self::Female),
            'O' | 'o' => Some(Self::Other),
            'N' | 'n' => Some(Self::None),
            'U' | 'u' => Some(Self::Unknown),
            _ => Option::None,
        }
    }

    /// Returns the single-character representation.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Male => 'M',
            Self::Female => 'F',
            Self::Other => 'O',
            Self::None => 'N',
            Self::Unknown => 'U',
        }
    }
}
