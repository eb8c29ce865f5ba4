//! xCard reader (RFC 6351).
//!
//! ## Overview
//!
//! xCard is the XML encoding of vCard 4.0:
//!
//! ```xml
//! <vcards xmlns="urn:ietf:params:xml:ns:vcard-4.0">
//!   <vcard>
//!     <fn><text>John Doe</text></fn>
//!     <group name="home">
//!       <tel>
//!         <parameters><type><text>voice</text></type></parameters>
//!         <uri>tel:+1-555-555-1234</uri>
//!       </tel>
//!     </group>
//!   </vcard>
//! </vcards>
//! ```
//!
//! [`XCardReader`] streams such a document and hands each card to a
//! [`CardListener`] as soon as it closes. Each property element is cut out
//! as an [`XmlFragment`] and decoded by the scribe registered for its name.
//! A property that fails to decode does not abort the read: it is recorded
//! as a [`ParseWarning`] and, where possible, kept as a raw `XML` property.
//!
//! ## Usage
//!
//! ```rust
//! use std::ops::ControlFlow;
//! use xcard_rfc::rfc::xcard::XCardReader;
//!
//! let xml = r#"<vcards xmlns="urn:ietf:params:xml:ns:vcard-4.0">
//!   <vcard><fn><text>John Doe</text></fn></vcard>
//!   <vcard><fn><text>Jane Doe</text></fn></vcard>
//! </vcards>"#;
//!
//! let mut names = Vec::new();
//! XCardReader::from_xml(xml)
//!     .read_with(|card, _warnings| {
//!         names.extend(card.formatted_name().map(str::to_owned));
//!         ControlFlow::Break(())
//!     })
//!     .unwrap();
//! assert_eq!(names, ["John Doe"]);
//! ```

mod error;
mod fragment;
mod handler;
mod hierarchy;
mod namespace;
mod parameters;
mod reader;
pub mod scribe;
mod source;
mod warnings;

#[cfg(test)]
mod tests;

pub use error::{ScribeError, XCardError, XCardResult};
pub use fragment::{Attribute, Child, Element, FragmentBuilder, NodeId, XmlFragment};
pub use hierarchy::Hierarchy;
pub use namespace::{Namespace, QName, XCARD_NS, elements};
pub use parameters::ParameterCollector;
pub use reader::{CardListener, XCardReader};
pub use warnings::{ParseWarning, ParseWarnings, WarningCode};
