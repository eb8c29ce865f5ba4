//! Core vCard types.

mod card;
mod parameter;
mod property;
mod structured;
mod value;

pub use card::{VCard, VCardVersion};
pub use parameter::{VCardParameter, VCardParameters};
pub use property::{VCardProperty, names};
pub use structured::{Address, Gender, Organization, Sex, StructuredName};
pub use value::{DateAndOrTime, VCardValue, parse_timestamp};
