//! Ranking of candidate sites by their scores.
use crate::error::ScoringError;
use crate::reference::ReferenceData;
use crate::scoring::score_site;
use crate::site::{CandidateSite, ScoredSite, SiteID};
use crate::units::Dimensionless;
use crate::weights::WeightConfig;
use crate::zone::ZonePrecedence;
use indexmap::IndexMap;
use log::debug;
use serde::Serialize;

/// A candidate which could not be scored
#[derive(Debug, Clone, PartialEq)]
pub struct SiteFailure {
    /// The site which failed
    pub site_id: SiteID,
    /// Why scoring failed
    pub error: ScoringError,
}

/// Whether a site's score meets a given threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Eligibility {
    /// The score is at least the threshold
    Eligible,
    /// The score is below the threshold
    Ineligible,
}

impl Eligibility {
    /// Classify `score` against `threshold`
    pub fn classify(score: Dimensionless, threshold: Dimensionless) -> Self {
        if score >= threshold {
            Self::Eligible
        } else {
            Self::Ineligible
        }
    }
}

/// The result of ranking a set of candidate sites
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Ranking {
    /// Successfully scored sites, best first
    pub sites: Vec<ScoredSite>,
    /// Sites which could not be scored, in input order
    pub failures: Vec<SiteFailure>,
}

impl Ranking {
    /// Iterate over the ranked sites along with their eligibility under `threshold`
    pub fn classify(
        &self,
        threshold: Dimensionless,
    ) -> impl Iterator<Item = (&ScoredSite, Eligibility)> {
        self.sites
            .iter()
            .map(move |site| (site, Eligibility::classify(site.score(), threshold)))
    }

    /// The number of sites whose scores meet `threshold`
    pub fn eligible_count(&self, threshold: Dimensionless) -> usize {
        self.classify(threshold)
            .filter(|(_, eligibility)| *eligibility == Eligibility::Eligible)
            .count()
    }

    /// The best-scoring site, if any site was scored
    pub fn best(&self) -> Option<&ScoredSite> {
        self.sites.first()
    }
}

/// Score every candidate and sort them by score, best first.
///
/// Sites with equal scores keep their relative input order. Sites which cannot be scored (e.g.
/// because their coordinates are out of range) are reported in [`Ranking::failures`] rather than
/// aborting the whole ranking.
///
/// # Arguments
///
/// * `candidates` - The sites to rank
/// * `reference` - Renewable sources, demand centres and regulatory zones
/// * `weights` - The weight given to each criterion
/// * `precedence` - How to choose between overlapping zones
///
/// # Returns
///
/// The ranking, or an error if there are no renewable sources or no demand centres.
pub fn rank_sites(
    candidates: &[CandidateSite],
    reference: &ReferenceData,
    weights: &WeightConfig,
    precedence: ZonePrecedence,
) -> Result<Ranking, ScoringError> {
    reference.check_not_empty()?;

    let mut ranking = Ranking::default();
    for site in candidates {
        match score_site(site, reference, weights, precedence) {
            Ok(scored) => ranking.sites.push(scored),
            Err(error) => {
                debug!("Could not score site {}: {error}", site.id);
                ranking.failures.push(SiteFailure {
                    site_id: site.id.clone(),
                    error,
                });
            }
        }
    }

    // NB: sort_by is stable, so ties keep their input order
    ranking
        .sites
        .sort_by(|a, b| b.score().total_cmp(&a.score()));

    Ok(ranking)
}

/// Rank the same candidates once for each of several named weight configurations.
///
/// # Returns
///
/// The rankings, keyed by weight set name in the order given, or the first error encountered.
pub fn compare_weight_sets<'a>(
    candidates: &[CandidateSite],
    reference: &ReferenceData,
    weight_sets: &'a IndexMap<String, WeightConfig>,
    precedence: ZonePrecedence,
) -> Result<IndexMap<&'a str, Ranking>, ScoringError> {
    weight_sets
        .iter()
        .map(|(name, weights)| {
            let ranking = rank_sites(candidates, reference, weights, precedence)?;
            Ok((name.as_str(), ranking))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReferenceSet;
    use crate::fixture::{candidate, reference_data};
    use crate::geo::Coordinate;
    use crate::reference::{DemandCentre, RenewableSource};
    use indexmap::indexmap;
    use itertools::Itertools;
    use rstest::rstest;

    fn ids(ranking: &Ranking) -> Vec<&str> {
        ranking.sites.iter().map(|site| &*site.id.0).collect()
    }

    #[rstest]
    fn test_end_to_end(reference_data: ReferenceData) {
        let candidates = [candidate("S2", 28.70, 77.50), candidate("S1", 28.61, 77.22)];
        let ranking = rank_sites(
            &candidates,
            &reference_data,
            &WeightConfig::default(),
            ZonePrecedence::ListOrder,
        )
        .unwrap();

        assert_eq!(ids(&ranking), ["S1", "S2"]);
        assert!(ranking.sites[0].score() > ranking.sites[1].score());
        assert_eq!(ranking.sites[0].breakdown.regulatory, Dimensionless(1.0));
        assert_eq!(ranking.sites[1].breakdown.regulatory, Dimensionless(0.0));
        assert!(ranking.failures.is_empty());
        assert_eq!(ranking.best().unwrap().id, SiteID::new("S1"));
    }

    #[rstest]
    fn test_sorted_descending(reference_data: ReferenceData) {
        let candidates = [
            candidate("a", 28.0, 77.0),
            candidate("b", 28.61, 77.22),
            candidate("c", 30.0, 78.0),
            candidate("d", 28.66, 77.35),
            candidate("e", 19.0, 72.8),
        ];
        let ranking = rank_sites(
            &candidates,
            &reference_data,
            &WeightConfig::default(),
            ZonePrecedence::ListOrder,
        )
        .unwrap();

        assert_eq!(ranking.sites.len(), candidates.len());
        for (first, second) in ranking.sites.iter().tuple_windows() {
            assert!(first.score() >= second.score());
        }
    }

    #[rstest]
    fn test_ties_keep_input_order(reference_data: ReferenceData) {
        // Identical locations give identical scores
        let candidates = [
            candidate("z", 28.70, 77.50),
            candidate("best", 28.61, 77.22),
            candidate("a", 28.70, 77.50),
            candidate("m", 28.70, 77.50),
        ];
        let ranking = rank_sites(
            &candidates,
            &reference_data,
            &WeightConfig::default(),
            ZonePrecedence::ListOrder,
        )
        .unwrap();
        assert_eq!(ids(&ranking), ["best", "z", "a", "m"]);
    }

    #[rstest]
    fn test_invalid_coordinates_collected(reference_data: ReferenceData) {
        let candidates = [
            candidate("good", 28.61, 77.22),
            candidate("bad_lat", -91.0, 77.0),
            candidate("also_good", 28.70, 77.50),
            candidate("bad_lon", 28.0, 181.0),
        ];
        let ranking = rank_sites(
            &candidates,
            &reference_data,
            &WeightConfig::default(),
            ZonePrecedence::ListOrder,
        )
        .unwrap();

        assert_eq!(ids(&ranking), ["good", "also_good"]);
        assert_eq!(
            ranking.failures,
            [
                SiteFailure {
                    site_id: "bad_lat".into(),
                    error: ScoringError::InvalidCoordinate {
                        latitude: -91.0,
                        longitude: 77.0
                    }
                },
                SiteFailure {
                    site_id: "bad_lon".into(),
                    error: ScoringError::InvalidCoordinate {
                        latitude: 28.0,
                        longitude: 181.0
                    }
                }
            ]
        );
    }

    #[rstest]
    fn test_empty_reference_is_fatal(reference_data: ReferenceData) {
        let reference = ReferenceData {
            demand_centres: Vec::new(),
            ..reference_data
        };
        assert_eq!(
            rank_sites(
                &[candidate("s", 28.61, 77.22)],
                &reference,
                &WeightConfig::default(),
                ZonePrecedence::ListOrder
            ),
            Err(ScoringError::EmptyReferenceSet(ReferenceSet::DemandCentres))
        );
    }

    #[rstest]
    fn test_no_candidates(reference_data: ReferenceData) {
        let ranking = rank_sites(
            &[],
            &reference_data,
            &WeightConfig::default(),
            ZonePrecedence::ListOrder,
        )
        .unwrap();
        assert_eq!(ranking, Ranking::default());
    }

    #[rstest]
    #[case(0.4, Eligibility::Eligible)]
    #[case(0.5, Eligibility::Eligible)]
    #[case(0.5000001, Eligibility::Ineligible)]
    #[case(0.9, Eligibility::Ineligible)]
    fn test_eligibility_classify(#[case] threshold: f64, #[case] expected: Eligibility) {
        assert_eq!(
            Eligibility::classify(Dimensionless(0.5), Dimensionless(threshold)),
            expected
        );
    }

    #[test]
    fn test_eligibility_display() {
        assert_eq!(Eligibility::Eligible.to_string(), "eligible");
        assert_eq!(Eligibility::Ineligible.to_string(), "ineligible");
    }

    #[rstest]
    fn test_ranking_classify(reference_data: ReferenceData) {
        let candidates = [candidate("S1", 28.61, 77.22), candidate("far", 10.0, 10.0)];
        let ranking = rank_sites(
            &candidates,
            &reference_data,
            &WeightConfig::default(),
            ZonePrecedence::ListOrder,
        )
        .unwrap();

        let classes = ranking
            .classify(Dimensionless(0.4))
            .map(|(site, eligibility)| (&*site.id.0, eligibility))
            .collect_vec();
        assert_eq!(
            classes,
            [("S1", Eligibility::Eligible), ("far", Eligibility::Ineligible)]
        );
        assert_eq!(ranking.eligible_count(Dimensionless(0.4)), 1);
        assert_eq!(ranking.eligible_count(Dimensionless(0.0)), 2);
    }

    #[test]
    fn test_weights_change_order() {
        // "solar" is next to a renewable source, "city" next to a demand centre
        let reference = ReferenceData {
            renewables: vec![RenewableSource {
                id: "pv".into(),
                name: "Solar park".into(),
                location: Coordinate::new(26.0, 73.0),
                technology: Some("solar".into()),
            }],
            demand_centres: vec![DemandCentre {
                id: "city".into(),
                name: "City".into(),
                location: Coordinate::new(28.6, 77.2),
            }],
            zones: Vec::new(),
        };
        let candidates = [candidate("solar", 26.0, 73.0), candidate("city", 28.6, 77.2)];
        let weight_sets = indexmap! {
            "renewable_led".to_string() => WeightConfig::new(0.8, 0.2, 0.0),
            "demand_led".to_string() => WeightConfig::new(0.2, 0.8, 0.0),
        };

        let rankings =
            compare_weight_sets(&candidates, &reference, &weight_sets, ZonePrecedence::ListOrder)
                .unwrap();
        assert_eq!(
            rankings.keys().copied().collect_vec(),
            ["renewable_led", "demand_led"]
        );
        assert_eq!(ids(&rankings["renewable_led"]), ["solar", "city"]);
        assert_eq!(ids(&rankings["demand_led"]), ["city", "solar"]);
    }
}
