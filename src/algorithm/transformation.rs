//! Named pipeline stages and their dispatch

use rand::Rng;

use crate::algorithm::random_fill::random_fill;
use crate::algorithm::rule_based::RuleBased;
use crate::io::error::Result;
use crate::spatial::Grid;
use crate::symbols::Alphabet;

/// Serialization tag of the random variant
pub const RANDOM_TAG: &str = "random";
/// Serialization tag of the rule-based variant
pub const RULE_BASED_TAG: &str = "rule_based";

/// The closed set of transformation behaviours
#[derive(Debug, Clone, PartialEq)]
pub enum TransformationKind {
    /// Fill every cell uniformly from the alphabet
    Random,
    /// Search-and-replace with wildcards and weighted outcomes
    RuleBased(RuleBased),
}

impl TransformationKind {
    /// Tag used for this variant in persisted documents
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Random => RANDOM_TAG,
            Self::RuleBased(_) => RULE_BASED_TAG,
        }
    }
}

/// One stage of the synthesis pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct Transformation {
    /// Display name
    pub name: String,
    /// Pipeline gate; disabled stages are skipped entirely
    pub enabled: bool,
    /// Behaviour of this stage
    pub kind: TransformationKind,
}

impl Transformation {
    /// Create an enabled transformation
    pub fn new(name: impl Into<String>, kind: TransformationKind) -> Self {
        Self {
            name: name.into(),
            enabled: true,
            kind,
        }
    }

    /// Create an enabled random fill stage
    pub fn random(name: impl Into<String>) -> Self {
        Self::new(name, TransformationKind::Random)
    }

    /// Create an enabled rule-based stage
    pub fn rule_based(name: impl Into<String>, rule: RuleBased) -> Self {
        Self::new(name, TransformationKind::RuleBased(rule))
    }

    /// The rule of a rule-based stage
    pub const fn as_rule(&self) -> Option<&RuleBased> {
        match &self.kind {
            TransformationKind::RuleBased(rule) => Some(rule),
            TransformationKind::Random => None,
        }
    }

    /// Mutable access to the rule of a rule-based stage
    pub const fn as_rule_mut(&mut self) -> Option<&mut RuleBased> {
        match &mut self.kind {
            TransformationKind::RuleBased(rule) => Some(rule),
            TransformationKind::Random => None,
        }
    }

    /// Compute this stage's output from `input`
    ///
    /// Never mutates `input`; the result always has the input's dimensions.
    /// The `enabled` flag is not consulted here.
    ///
    /// # Errors
    ///
    /// Returns `EmptyAlphabet` when a random stage runs over an alphabet with
    /// no symbols
    pub fn apply<R: Rng + ?Sized>(
        &self,
        input: &Grid,
        alphabet: &Alphabet,
        rng: &mut R,
    ) -> Result<Grid> {
        match &self.kind {
            TransformationKind::Random => random_fill(&self.name, input, alphabet, rng),
            TransformationKind::RuleBased(rule) => Ok(rule.apply(input, rng)),
        }
    }
}
