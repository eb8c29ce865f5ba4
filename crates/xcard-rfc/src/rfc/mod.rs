pub mod vcard;
pub mod xcard;
