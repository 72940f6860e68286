//! Uniform random fill over the registered alphabet

use rand::Rng;

use crate::io::error::{AlgorithmError, Result};
use crate::spatial::Grid;
use crate::symbols::Alphabet;

/// Produce a grid of the same size as `input` with every cell drawn uniformly
/// from the symbols registered in `alphabet`
///
/// The reserved ids only appear in the output if they are registered.
///
/// # Errors
///
/// Returns `EmptyAlphabet` if no symbols are registered
pub fn random_fill<R: Rng + ?Sized>(
    name: &str,
    input: &Grid,
    alphabet: &Alphabet,
    rng: &mut R,
) -> Result<Grid> {
    let ids = alphabet.ids();
    if ids.is_empty() {
        return Err(AlgorithmError::EmptyAlphabet {
            transformation: name.to_string(),
        });
    }

    let cells = (0..input.len())
        .map(|_| {
            let index = rng.random_range(0..ids.len());
            ids.get(index).copied().unwrap_or_default()
        })
        .collect();

    Grid::from_cells(input.width(), input.height(), cells)
}
