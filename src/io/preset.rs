//! Stock configuration used to seed new documents

use crate::algorithm::{RuleBased, Synthesizer, Transformation};
use crate::io::configuration::PRESET_GRID_SIZE;
use crate::io::error::Result;
use crate::spatial::Grid;
use crate::symbols::{EMPTY_ID, Symbol, WILDCARD_ID};

/// Id of the preset's "F" symbol
pub const FLOOR_ID: i32 = 1;
/// Id of the preset's "G" symbol
pub const GROUND_ID: i32 = 2;

const W: i32 = WILDCARD_ID;

/// Search pattern of the preset rule: a `G` surrounded orthogonally by `F`
pub const CROSS_SEARCH: [[i32; 3]; 3] = [
    [W, FLOOR_ID, W],
    [FLOOR_ID, GROUND_ID, FLOOR_ID],
    [W, FLOOR_ID, W],
];

/// Replacement of the preset rule: the centre becomes `F`, corners are kept
pub const CROSS_REPLACEMENT: [[i32; 3]; 3] = [
    [W, FLOOR_ID, W],
    [FLOOR_ID, FLOOR_ID, FLOOR_ID],
    [W, FLOOR_ID, W],
];

/// A 16x16 empty grid with symbols `F` and `G`, a random fill stage and a
/// rule that turns every `G` enclosed by `F` into `F`
///
/// # Errors
///
/// Never fails in practice; construction errors are propagated rather than
/// unwrapped
pub fn demo_synthesizer() -> Result<Synthesizer> {
    let mut synthesizer = Synthesizer::new(PRESET_GRID_SIZE, PRESET_GRID_SIZE, EMPTY_ID)?;
    synthesizer
        .alphabet_mut()
        .add_symbol(Symbol::new(FLOOR_ID, "F"));
    synthesizer
        .alphabet_mut()
        .add_symbol(Symbol::new(GROUND_ID, "G"));

    synthesizer.add_transformation(Transformation::random("Random"));

    let rule = RuleBased::new(Grid::from_rows(&CROSS_SEARCH)?)
        .with_replacement(1.0, Grid::from_rows(&CROSS_REPLACEMENT)?);
    synthesizer.add_transformation(Transformation::rule_based("Rule-based", rule));

    Ok(synthesizer)
}
