//! Pattern search-and-replace with wildcards and weighted outcomes
//!
//! A rule scans every anchor where its search pattern fits, tests the pattern
//! against the input grid, and on a match stamps one randomly chosen
//! replacement onto the output grid at the same anchor. Matching only ever
//! reads the input and writing only ever touches the output, so anchors never
//! observe each other's writes within one application.

use rand::Rng;
use tracing::trace;

use crate::io::error::{AlgorithmError, Result};
use crate::math::probability::{cumulative_choice, total_mass};
use crate::spatial::Grid;
use crate::symbols::WILDCARD_ID;

/// One weighted outcome of a rule
#[derive(Debug, Clone, PartialEq)]
pub struct Replacement {
    /// Probability mass of this outcome
    pub probability: f32,
    /// Pattern stamped at the match anchor; wildcard cells are skipped
    pub grid: Grid,
}

impl Replacement {
    /// Create a replacement outcome
    pub const fn new(probability: f32, grid: Grid) -> Self {
        Self { probability, grid }
    }
}

/// Search pattern plus an ordered list of weighted replacements
///
/// Replacement probabilities need not sum to one; any remaining mass means
/// "leave the match as it is".
#[derive(Debug, Clone, PartialEq)]
pub struct RuleBased {
    search: Grid,
    replacements: Vec<Replacement>,
}

impl RuleBased {
    /// Create a rule with the given search pattern and no replacements
    pub const fn new(search: Grid) -> Self {
        Self {
            search,
            replacements: Vec::new(),
        }
    }

    /// Builder-style variant of [`Self::add_replacement`]
    #[must_use]
    pub fn with_replacement(mut self, probability: f32, grid: Grid) -> Self {
        self.add_replacement(probability, grid);
        self
    }

    /// The search pattern
    pub const fn search(&self) -> &Grid {
        &self.search
    }

    /// Mutable access to the search pattern
    pub const fn search_mut(&mut self) -> &mut Grid {
        &mut self.search
    }

    /// Replace the search pattern
    pub fn set_search(&mut self, search: Grid) {
        self.search = search;
    }

    /// Replacements in stored order
    pub fn replacements(&self) -> &[Replacement] {
        &self.replacements
    }

    /// Mutable access to one replacement
    ///
    /// # Errors
    ///
    /// Returns `InvalidIndex` if `index` is out of range
    pub fn replacement_mut(&mut self, index: usize) -> Result<&mut Replacement> {
        let len = self.replacements.len();
        self.replacements
            .get_mut(index)
            .ok_or(AlgorithmError::InvalidIndex { index, len })
    }

    /// Append a weighted replacement
    pub fn add_replacement(&mut self, probability: f32, grid: Grid) {
        self.replacements.push(Replacement::new(probability, grid));
    }

    /// Remove and return the replacement at `index`
    ///
    /// # Errors
    ///
    /// Returns `InvalidIndex` if `index` is out of range
    pub fn remove_replacement(&mut self, index: usize) -> Result<Replacement> {
        let len = self.replacements.len();
        if index >= len {
            return Err(AlgorithmError::InvalidIndex { index, len });
        }
        Ok(self.replacements.remove(index))
    }

    /// Sum of all replacement probabilities
    pub fn total_probability(&self) -> f32 {
        total_mass(self.replacements.iter().map(|r| r.probability))
    }

    /// Apply the rule to `input`, returning a new grid of the same size
    ///
    /// Cells untouched by any replacement are copied from `input`. Anchors are
    /// visited with `x` in the outer loop and `y` in the inner loop; when two
    /// matches write the same output cell the later one wins.
    pub fn apply<R: Rng + ?Sized>(&self, input: &Grid, rng: &mut R) -> Grid {
        let mut output = input.clone();
        let search_width = self.search.width() as isize;
        let search_height = self.search.height() as isize;
        let mut matches = 0_usize;
        let mut applied = 0_usize;

        for i in 0..input.width() {
            for j in 0..input.height() {
                let corner_x = i as isize + search_width - 1;
                let corner_y = j as isize + search_height - 1;
                if !input.in_bounds(corner_x, corner_y) || !self.matches_at(input, i, j) {
                    continue;
                }
                matches += 1;

                let draw = rng.random::<f32>();
                let chosen = cumulative_choice(
                    self.replacements.iter().map(|r| r.probability),
                    draw,
                )
                .and_then(|index| self.replacements.get(index));

                if let Some(replacement) = chosen {
                    stamp(&mut output, &replacement.grid, i, j);
                    applied += 1;
                }
            }
        }

        trace!(matches, applied, "rule scan complete");
        output
    }

    /// Test the search pattern against `input` with its top-left at `(x, y)`
    ///
    /// Wildcard pattern cells match anything; every other cell must be equal.
    /// Pattern cells falling outside `input` never match.
    pub fn matches_at(&self, input: &Grid, x: usize, y: usize) -> bool {
        self.search
            .as_array()
            .indexed_iter()
            .all(|((row, col), &expected)| {
                expected == WILDCARD_ID || input.get(x + col, y + row) == Some(expected)
            })
    }
}

/// Write `pattern` onto `output` at `(x, y)`, skipping wildcard cells and
/// anything that would land outside the grid
fn stamp(output: &mut Grid, pattern: &Grid, x: usize, y: usize) {
    for ((row, col), &value) in pattern.as_array().indexed_iter() {
        if value == WILDCARD_ID {
            continue;
        }
        if let Some(cell) = output.get_mut(x + col, y + row) {
            *cell = value;
        }
    }
}
