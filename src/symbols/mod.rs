//! Symbol alphabet and reserved symbol ids

/// Symbol registry and reserved ids
pub mod alphabet;

pub use alphabet::{Alphabet, EMPTY_ID, Symbol, WILDCARD_ID};
