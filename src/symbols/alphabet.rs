//! Symbol registry mapping ids to display names

use std::collections::BTreeMap;

use crate::io::error::{AlgorithmError, Result};

/// Id of the reserved empty symbol
pub const EMPTY_ID: i32 = 0;
/// Id of the reserved wildcard symbol
///
/// Matches any cell in a search pattern and means "keep what is there" in a
/// replacement pattern.
pub const WILDCARD_ID: i32 = -1;

/// A cell value together with its human-readable name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    /// Identity stored in grid cells
    pub id: i32,
    /// Display name
    pub name: String,
}

impl Symbol {
    /// Create a symbol
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// The reserved empty symbol
    pub fn empty() -> Self {
        Self::new(EMPTY_ID, "empty")
    }

    /// The reserved wildcard symbol
    pub fn wildcard() -> Self {
        Self::new(WILDCARD_ID, "wildcard")
    }

    /// Whether this symbol uses one of the reserved ids
    pub const fn is_reserved(&self) -> bool {
        self.id == EMPTY_ID || self.id == WILDCARD_ID
    }
}

/// Ordered-by-id set of registered symbols
///
/// The reserved ids never need registering; they are recognized by value
/// wherever cells are inspected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Alphabet {
    symbols: BTreeMap<i32, Symbol>,
}

impl Alphabet {
    /// Create an empty alphabet
    pub const fn new() -> Self {
        Self {
            symbols: BTreeMap::new(),
        }
    }

    /// Register a symbol
    ///
    /// First registration wins: returns false and leaves the alphabet
    /// unchanged if the id is already present.
    pub fn add_symbol(&mut self, symbol: Symbol) -> bool {
        if self.symbols.contains_key(&symbol.id) {
            return false;
        }
        self.symbols.insert(symbol.id, symbol);
        true
    }

    /// Check whether an id is registered
    pub fn has_symbol(&self, id: i32) -> bool {
        self.symbols.contains_key(&id)
    }

    /// Remove a symbol, returning it if it was registered
    pub fn remove_symbol(&mut self, id: i32) -> Option<Symbol> {
        self.symbols.remove(&id)
    }

    /// Look up a registered symbol by id
    ///
    /// # Errors
    ///
    /// Returns `UnknownSymbol` if the id is not registered
    pub fn get_symbol(&self, id: i32) -> Result<&Symbol> {
        self.symbols
            .get(&id)
            .ok_or(AlgorithmError::UnknownSymbol { id })
    }

    /// Display name for a cell value, falling back to the reserved names
    pub fn name_of(&self, id: i32) -> Option<&str> {
        match self.symbols.get(&id) {
            Some(symbol) => Some(symbol.name.as_str()),
            None if id == EMPTY_ID => Some("empty"),
            None if id == WILDCARD_ID => Some("wildcard"),
            None => None,
        }
    }

    /// Registered symbols in id order
    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.values()
    }

    /// Registered ids in ascending order
    pub fn ids(&self) -> Vec<i32> {
        self.symbols.keys().copied().collect()
    }

    /// Number of registered symbols
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Whether no symbols are registered
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl FromIterator<Symbol> for Alphabet {
    fn from_iter<I: IntoIterator<Item = Symbol>>(iter: I) -> Self {
        let mut alphabet = Self::new();
        for symbol in iter {
            alphabet.add_symbol(symbol);
        }
        alphabet
    }
}
