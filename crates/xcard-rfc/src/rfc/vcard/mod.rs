//! vCard data model (RFC 6350).
//!
//! Cards hold their properties in document order. Every property keeps the
//! raw text it was decoded from next to the typed [`VCardValue`], so values
//! a decoder did not fully understand are never lost.

pub mod core;

pub use core::{
    Address, DateAndOrTime, Gender, Organization, Sex, StructuredName, VCard, VCardParameter,
    VCardParameters, VCardProperty, VCardValue, VCardVersion,
};
