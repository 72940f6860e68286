//! Versioned JSON representation of a complete synthesizer configuration
//!
//! The document carries the working grid, the alphabet and the transformation
//! list. Grids are stored as `{width, height, data}` with `data` in row-major
//! order; transformations are tagged by `type`.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::algorithm::{RuleBased, Synthesizer, Transformation, TransformationKind};
use crate::io::configuration::FORMAT_VERSION;
use crate::io::error::{AlgorithmError, Result, invalid_document};
use crate::spatial::Grid;
use crate::symbols::{Alphabet, Symbol};

#[derive(Debug, Serialize, Deserialize)]
struct Document {
    version: Option<i64>,
    grid: GridData,
    alphabet: AlphabetData,
    transformations: Vec<TransformationData>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GridData {
    width: usize,
    height: usize,
    data: Vec<i32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct AlphabetData {
    symbols: Vec<SymbolData>,
}

#[derive(Debug, Serialize, Deserialize)]
struct SymbolData {
    id: i32,
    name: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum TransformationData {
    Random {
        name: String,
        enabled: bool,
    },
    RuleBased {
        name: String,
        enabled: bool,
        search: GridData,
        replacements: Vec<ReplacementData>,
    },
}

#[derive(Debug, Serialize, Deserialize)]
struct ReplacementData {
    probability: f32,
    grid: GridData,
}

impl From<&Grid> for GridData {
    fn from(grid: &Grid) -> Self {
        Self {
            width: grid.width(),
            height: grid.height(),
            data: grid.to_vec(),
        }
    }
}

impl From<&Transformation> for TransformationData {
    fn from(transformation: &Transformation) -> Self {
        let name = transformation.name.clone();
        let enabled = transformation.enabled;
        match &transformation.kind {
            TransformationKind::Random => Self::Random { name, enabled },
            TransformationKind::RuleBased(rule) => Self::RuleBased {
                name,
                enabled,
                search: GridData::from(rule.search()),
                replacements: rule
                    .replacements()
                    .iter()
                    .map(|replacement| ReplacementData {
                        probability: replacement.probability,
                        grid: GridData::from(&replacement.grid),
                    })
                    .collect(),
            },
        }
    }
}

/// Serialize a synthesizer to a pretty-printed JSON document
///
/// # Errors
///
/// Returns `InvalidDocument` if a replacement probability is not finite,
/// since JSON has no representation for it
pub fn to_json(synthesizer: &Synthesizer) -> Result<String> {
    check_probabilities(synthesizer)?;
    let document = Document {
        version: Some(FORMAT_VERSION),
        grid: GridData::from(synthesizer.grid()),
        alphabet: AlphabetData {
            symbols: synthesizer
                .alphabet()
                .symbols()
                .map(|symbol| SymbolData {
                    id: symbol.id,
                    name: symbol.name.clone(),
                })
                .collect(),
        },
        transformations: synthesizer
            .transformations()
            .iter()
            .map(TransformationData::from)
            .collect(),
    };

    Ok(serde_json::to_string_pretty(&document)?)
}

/// Rebuild a synthesizer from a JSON document
///
/// A missing `version` is read as the current format. Symbols repeating an
/// earlier id are dropped, keeping the first registration. Nothing is
/// returned unless the whole document is valid.
///
/// # Errors
///
/// Returns:
/// - `UnsupportedVersion` if `version` is present and not the current format
/// - `MalformedDocument` if the text is not JSON or a field is missing or mistyped
/// - `InvalidDocument` if a grid has zero dimensions or its data length does
///   not match `width * height`
pub fn from_json(document: &str) -> Result<Synthesizer> {
    let value: serde_json::Value = serde_json::from_str(document)?;
    check_version(&value)?;
    let document: Document = serde_json::from_value(value)?;

    let grid = build_grid(document.grid, "grid")?;

    let mut alphabet = Alphabet::new();
    for symbol in document.alphabet.symbols {
        let id = symbol.id;
        if !alphabet.add_symbol(Symbol::new(id, symbol.name)) {
            warn!(id, "duplicate symbol id in document, keeping the first");
        }
    }

    let transformations = document
        .transformations
        .into_iter()
        .enumerate()
        .map(|(index, data)| build_transformation(index, data))
        .collect::<Result<Vec<_>>>()?;

    Ok(Synthesizer::from_parts(grid, alphabet, transformations))
}

fn check_probabilities(synthesizer: &Synthesizer) -> Result<()> {
    for (index, transformation) in synthesizer.transformations().iter().enumerate() {
        let Some(rule) = transformation.as_rule() else {
            continue;
        };
        for (position, replacement) in rule.replacements().iter().enumerate() {
            if !replacement.probability.is_finite() {
                return Err(invalid_document(&format!(
                    "transformations[{index}].replacements[{position}].probability is {}",
                    replacement.probability
                )));
            }
        }
    }
    Ok(())
}

fn check_version(value: &serde_json::Value) -> Result<()> {
    let Some(version) = value.get("version") else {
        return Ok(());
    };
    let found = version
        .as_i64()
        .ok_or_else(|| invalid_document(&format!("version must be an integer, got {version}")))?;
    if found != FORMAT_VERSION {
        return Err(AlgorithmError::UnsupportedVersion { found });
    }
    Ok(())
}

fn build_transformation(index: usize, data: TransformationData) -> Result<Transformation> {
    match data {
        TransformationData::Random { name, enabled } => {
            let mut transformation = Transformation::random(name);
            transformation.enabled = enabled;
            Ok(transformation)
        }
        TransformationData::RuleBased {
            name,
            enabled,
            search,
            replacements,
        } => {
            let search = build_grid(search, &format!("transformations[{index}].search"))?;
            let mut rule = RuleBased::new(search);
            for (position, replacement) in replacements.into_iter().enumerate() {
                let grid = build_grid(
                    replacement.grid,
                    &format!("transformations[{index}].replacements[{position}].grid"),
                )?;
                rule.add_replacement(replacement.probability, grid);
            }

            let mut transformation = Transformation::rule_based(name, rule);
            transformation.enabled = enabled;
            Ok(transformation)
        }
    }
}

fn build_grid(data: GridData, field: &str) -> Result<Grid> {
    Grid::from_cells(data.width, data.height, data.data)
        .map_err(|e| invalid_document(&format!("{field}: {e}")))
}
