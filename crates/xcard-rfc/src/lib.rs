//! vCard data model and xCard (RFC 6351) reader.
//!
//! - [`rfc::vcard`]: cards, properties, parameters and typed values.
//! - [`rfc::xcard`]: the streaming xCard reader and its scribes.

pub mod rfc;
