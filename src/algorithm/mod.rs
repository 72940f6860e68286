/// Uniform random fill over the alphabet
pub mod random_fill;
/// Wildcard search-and-replace rules
pub mod rule_based;
/// Double-buffered synthesis pipeline
pub mod synthesizer;
/// Pipeline stage type and variant dispatch
pub mod transformation;

pub use rule_based::{Replacement, RuleBased};
pub use synthesizer::Synthesizer;
pub use transformation::{Transformation, TransformationKind};
