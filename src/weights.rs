//! The weights given to each criterion when combining them into a single score.
use crate::units::Dimensionless;
use anyhow::{Result, ensure};
use float_cmp::approx_eq;
use serde::{Deserialize, Serialize};

/// The default weight for proximity to renewable sources
pub const DEFAULT_RENEWABLE_WEIGHT: Dimensionless = Dimensionless(0.4);
/// The default weight for proximity to demand centres
pub const DEFAULT_DEMAND_WEIGHT: Dimensionless = Dimensionless(0.4);
/// The default weight for regulatory permission
pub const DEFAULT_REGULATORY_WEIGHT: Dimensionless = Dimensionless(0.2);

fn default_renewable_weight() -> Dimensionless {
    DEFAULT_RENEWABLE_WEIGHT
}

fn default_demand_weight() -> Dimensionless {
    DEFAULT_DEMAND_WEIGHT
}

fn default_regulatory_weight() -> Dimensionless {
    DEFAULT_REGULATORY_WEIGHT
}

/// Weights applied to the renewable, demand and regulatory criteria.
///
/// Weights need not sum to one, but if they do (and they are non-negative) the combined score lies
/// within [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightConfig {
    /// Weight for proximity to renewable sources
    #[serde(default = "default_renewable_weight")]
    pub renewable: Dimensionless,
    /// Weight for proximity to demand centres
    #[serde(default = "default_demand_weight")]
    pub demand: Dimensionless,
    /// Weight for regulatory permission
    #[serde(default = "default_regulatory_weight")]
    pub regulatory: Dimensionless,
}

impl Default for WeightConfig {
    fn default() -> Self {
        Self {
            renewable: DEFAULT_RENEWABLE_WEIGHT,
            demand: DEFAULT_DEMAND_WEIGHT,
            regulatory: DEFAULT_REGULATORY_WEIGHT,
        }
    }
}

impl WeightConfig {
    /// Create a new [`WeightConfig`]
    pub fn new(renewable: f64, demand: f64, regulatory: f64) -> Self {
        Self {
            renewable: Dimensionless(renewable),
            demand: Dimensionless(demand),
            regulatory: Dimensionless(regulatory),
        }
    }

    /// Check that every weight is a finite, non-negative number
    pub fn validate(&self) -> Result<()> {
        for (name, weight) in self.iter() {
            ensure!(
                weight.is_finite() && weight >= Dimensionless(0.0),
                "{name} weight must be a finite number greater than or equal to zero"
            );
        }

        Ok(())
    }

    /// The sum of all weights
    pub fn sum(&self) -> Dimensionless {
        self.renewable + self.demand + self.regulatory
    }

    /// Whether the weights sum to one
    pub fn is_normalised(&self) -> bool {
        approx_eq!(f64, self.sum().0, 1.0, epsilon = 1e-9)
    }

    /// Combine the three criteria into a single weighted score
    pub fn combine(
        &self,
        renewable: Dimensionless,
        demand: Dimensionless,
        regulatory: Dimensionless,
    ) -> Dimensionless {
        self.renewable * renewable + self.demand * demand + self.regulatory * regulatory
    }

    /// Iterate over the weights along with their names
    fn iter(&self) -> impl Iterator<Item = (&'static str, Dimensionless)> {
        [
            ("renewable", self.renewable),
            ("demand", self.demand),
            ("regulatory", self.regulatory),
        ]
        .into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::assert_error;
    use rstest::rstest;

    #[test]
    fn test_default_weights() {
        let weights = WeightConfig::default();
        assert_eq!(weights, WeightConfig::new(0.4, 0.4, 0.2));
        assert!(weights.is_normalised());
        assert!(weights.validate().is_ok());
    }

    #[test]
    fn test_partial_weights_from_toml() {
        let weights: WeightConfig = toml::from_str("demand = 0.6").unwrap();
        assert_eq!(weights, WeightConfig::new(0.4, 0.6, 0.2));
        assert!(!weights.is_normalised());
    }

    #[rstest]
    #[case(WeightConfig::new(-0.1, 0.5, 0.6), "renewable")]
    #[case(WeightConfig::new(0.5, f64::NAN, 0.5), "demand")]
    #[case(WeightConfig::new(0.5, 0.5, f64::INFINITY), "regulatory")]
    fn test_validate_invalid(#[case] weights: WeightConfig, #[case] name: &str) {
        assert_error!(
            weights.validate(),
            format!("{name} weight must be a finite number greater than or equal to zero")
        );
    }

    #[test]
    fn test_zero_weights_valid() {
        assert!(WeightConfig::new(0.0, 0.0, 0.0).validate().is_ok());
    }

    #[rstest]
    #[case(1.0, 1.0, 1.0)]
    #[case(0.0, 0.0, 0.0)]
    #[case(1.0, 0.0, 1.0)]
    #[case(0.25, 0.75, 0.0)]
    fn test_combine_bounded(#[case] renewable: f64, #[case] demand: f64, #[case] regulatory: f64) {
        for weights in [
            WeightConfig::default(),
            WeightConfig::new(1.0, 0.0, 0.0),
            WeightConfig::new(0.2, 0.3, 0.5),
        ] {
            let total = weights.combine(
                Dimensionless(renewable),
                Dimensionless(demand),
                Dimensionless(regulatory),
            );
            assert!(
                (0.0..=1.0 + 1e-12).contains(&total.0),
                "Total out of range: {total}"
            );
        }
    }
}
