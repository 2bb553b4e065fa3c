//! Defines the `ScenarioParameters` struct, which represents the contents of `scenario.toml`.
use crate::input::{input_err_msg, read_toml};
use crate::units::Dimensionless;
use crate::weights::WeightConfig;
use crate::zone::ZonePrecedence;
use anyhow::{Context, Result, ensure};
use indexmap::IndexMap;
use log::warn;
use serde::Deserialize;
use serde_string_enum::DeserializeLabeledStringEnum;
use std::path::Path;

const SCENARIO_PARAMETERS_FILE_NAME: &str = "scenario.toml";

/// The default minimum score for a site to count as eligible
pub const DEFAULT_ELIGIBILITY_THRESHOLD: Dimensionless = Dimensionless(0.4);

macro_rules! define_param_default {
    ($name:ident, $type: ty, $value: expr) => {
        fn $name() -> $type {
            $value
        }
    };
}

define_param_default!(
    default_eligibility_threshold,
    Dimensionless,
    DEFAULT_ELIGIBILITY_THRESHOLD
);

/// Represents the contents of the entire scenario file.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScenarioParameters {
    /// The minimum total score for a site to be classed as eligible
    #[serde(default = "default_eligibility_threshold")]
    pub eligibility_threshold: Dimensionless,
    /// How to choose between overlapping regulatory zones
    #[serde(default)]
    pub zone_precedence: ZonePrecedence,
    /// What to do with candidate sites whose coordinates are out of range
    #[serde(default)]
    pub invalid_coordinates: InvalidCoordinatePolicy,
    /// The weights used for the main ranking
    #[serde(default)]
    pub weights: WeightConfig,
    /// Additional named weight configurations to rank the sites with, for comparison
    #[serde(default)]
    pub weight_sets: IndexMap<String, WeightConfig>,
}

impl Default for ScenarioParameters {
    fn default() -> Self {
        Self {
            eligibility_threshold: DEFAULT_ELIGIBILITY_THRESHOLD,
            zone_precedence: ZonePrecedence::default(),
            invalid_coordinates: InvalidCoordinatePolicy::default(),
            weights: WeightConfig::default(),
            weight_sets: IndexMap::new(),
        }
    }
}

/// How to handle candidate sites with out-of-range coordinates
#[derive(DeserializeLabeledStringEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InvalidCoordinatePolicy {
    /// Leave the site out of the ranking and report it as a failure
    #[default]
    #[string = "skip"]
    Skip,
    /// Abort the ranking
    #[string = "fail"]
    Fail,
}

/// Check that the `eligibility_threshold` parameter is valid
fn check_eligibility_threshold(value: Dimensionless) -> Result<()> {
    ensure!(
        value.is_finite() && value >= Dimensionless(0.0),
        "eligibility_threshold must be a finite number greater than or equal to zero"
    );

    Ok(())
}

/// Check that a weight set name can be used as part of a file name
fn check_weight_set_name(name: &str) -> Result<()> {
    ensure!(
        !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-'),
        "Invalid weight set name \"{name}\": names may only contain letters, digits, \
        underscores and hyphens"
    );

    Ok(())
}

/// Validate a set of weights, warning if they do not sum to one
fn check_weights(weights: &WeightConfig, name: &str) -> Result<()> {
    weights
        .validate()
        .with_context(|| format!("Invalid value for {name}"))?;

    if !weights.is_normalised() {
        warn!(
            "The {name} sum to {} rather than 1. Scores will not be confined to the range 0 to 1.",
            weights.sum()
        );
    }

    Ok(())
}

impl ScenarioParameters {
    /// Read a scenario file from the specified directory.
    ///
    /// If the file is not present, default values are used.
    ///
    /// # Arguments
    ///
    /// * `scenario_dir` - Folder containing scenario configuration files
    ///
    /// # Returns
    ///
    /// The file contents as a [`ScenarioParameters`] struct or an error if the file is invalid
    pub fn from_path<P: AsRef<Path>>(scenario_dir: P) -> Result<ScenarioParameters> {
        let file_path = scenario_dir.as_ref().join(SCENARIO_PARAMETERS_FILE_NAME);
        if !file_path.is_file() {
            return Ok(ScenarioParameters::default());
        }

        let params: ScenarioParameters = read_toml(&file_path)?;
        params
            .validate()
            .with_context(|| input_err_msg(file_path))?;

        Ok(params)
    }

    /// Validate parameters after reading in file
    fn validate(&self) -> Result<()> {
        check_eligibility_threshold(self.eligibility_threshold)?;
        check_weights(&self.weights, "weights")?;
        for (name, weights) in &self.weight_sets {
            check_weight_set_name(name)?;
            check_weights(weights, &format!("weights in weight set {name}"))?;
        }

        Ok(())
    }
}
