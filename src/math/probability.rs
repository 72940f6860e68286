//! Cumulative selection over weighted outcomes

/// Pick the first outcome whose cumulative probability mass reaches `draw`
///
/// Walks `probabilities` in order accumulating mass; the first index where the
/// running total is `>= draw` wins, so an exact boundary resolves to the
/// earlier entry. Returns `None` when the total mass never reaches `draw`,
/// which happens whenever the probabilities sum to less than one.
pub fn cumulative_choice<I>(probabilities: I, draw: f32) -> Option<usize>
where
    I: IntoIterator<Item = f32>,
{
    let mut accumulated = 0.0_f32;
    for (index, probability) in probabilities.into_iter().enumerate() {
        accumulated += probability;
        if accumulated >= draw {
            return Some(index);
        }
    }
    None
}

/// Total probability mass of a set of outcomes
pub fn total_mass<I>(probabilities: I) -> f32
where
    I: IntoIterator<Item = f32>,
{
    probabilities.into_iter().sum()
}
