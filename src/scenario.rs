//! A scenario brings together a set of candidate sites, the reference data they are scored against
//! and the parameters controlling how they are ranked.
use crate::input::load_scenario;
use crate::ranking::{Ranking, SiteFailure, compare_weight_sets, rank_sites};
use crate::reference::ReferenceData;
use crate::site::CandidateSite;
use crate::weights::WeightConfig;
use anyhow::{Context, Result, bail};
use indexmap::IndexMap;
use log::{info, warn};
use std::path::Path;

pub mod parameters;
pub use parameters::{InvalidCoordinatePolicy, ScenarioParameters};

/// A scenario loaded from a scenario directory
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    /// Parameters from the scenario file
    pub parameters: ScenarioParameters,
    /// The sites to rank, in input order
    pub candidates: Vec<CandidateSite>,
    /// Renewable sources, demand centres and regulatory zones
    pub reference: ReferenceData,
}

impl Scenario {
    /// Read a scenario from the specified directory.
    pub fn from_path<P: AsRef<Path>>(scenario_dir: P) -> Result<Self> {
        load_scenario(scenario_dir)
    }

    /// Rank the candidate sites using the scenario's main weights.
    ///
    /// Sites with invalid coordinates are either skipped with a warning or cause an error,
    /// depending on the scenario's [`InvalidCoordinatePolicy`].
    pub fn rank(&self) -> Result<Ranking> {
        info!(
            "Ranking {} candidate sites against {} renewable sources, {} demand centres and {} \
            regulatory zones",
            self.candidates.len(),
            self.reference.renewables.len(),
            self.reference.demand_centres.len(),
            self.reference.zones.len()
        );

        self.warn_malformed_zones();
        let ranking = self.rank_with(&self.parameters.weights)?;
        self.check_failures(&ranking.failures)?;

        Ok(ranking)
    }

    /// Check the scenario without ranking it.
    ///
    /// Malformed zones are reported as warnings. Sites with invalid coordinates are handled as
    /// [`Scenario::rank`] would handle them.
    pub fn validate(&self) -> Result<()> {
        self.reference.check_not_empty()?;
        self.warn_malformed_zones();

        let failures: Vec<_> = self
            .candidates
            .iter()
            .filter_map(|site| {
                let error = site.location.validate().err()?;
                Some(SiteFailure {
                    site_id: site.id.clone(),
                    error,
                })
            })
            .collect();
        self.check_failures(&failures)
    }

    /// Rank the candidate sites with each of the scenario's additional weight sets.
    ///
    /// Failures and malformed zones are the same for every weight set, so they are only reported
    /// by [`Scenario::rank`].
    pub fn compare(&self) -> Result<IndexMap<&str, Ranking>> {
        let rankings = compare_weight_sets(
            &self.candidates,
            &self.reference,
            &self.parameters.weight_sets,
            self.parameters.zone_precedence,
        )?;

        Ok(rankings)
    }

    fn rank_with(&self, weights: &WeightConfig) -> Result<Ranking> {
        let ranking = rank_sites(
            &self.candidates,
            &self.reference,
            weights,
            self.parameters.zone_precedence,
        )?;

        Ok(ranking)
    }

    fn warn_malformed_zones(&self) {
        for error in self.reference.iter_malformed_zones() {
            warn!("{error}. The zone will not contain any sites.");
        }
    }

    fn check_failures(&self, failures: &[SiteFailure]) -> Result<()> {
        match (self.parameters.invalid_coordinates, failures.first()) {
            (_, None) => {}
            (InvalidCoordinatePolicy::Skip, Some(_)) => {
                for failure in failures {
                    warn!("Skipping site {}: {}", failure.site_id, failure.error);
                }
            }
            (InvalidCoordinatePolicy::Fail, Some(failure)) => {
                return Err(failure.error.clone())
                    .with_context(|| format!("Could not score site {}", failure.site_id));
            }
        }

        if failures.len() == self.candidates.len() && !failures.is_empty() {
            bail!("None of the candidate sites could be scored");
        }

        Ok(())
    }
}
