//! Scoring of individual candidate sites.
//!
//! Each site is scored on three criteria, which are then combined with a [`WeightConfig`]:
//!
//! * proximity to the nearest renewable source
//! * proximity to the nearest demand centre
//! * whether the regulatory zone governing the site permits development
use crate::error::{ReferenceSet, ScoringError};
use crate::geo::{Coordinate, min_distance};
use crate::reference::ReferenceData;
use crate::site::{CandidateSite, ScoreBreakdown, ScoredSite};
use crate::units::{Dimensionless, Kilometres};
use crate::weights::WeightConfig;
use crate::zone::{RegulatoryZone, ZonePrecedence, governing_zone};

/// Convert a distance into a score which decays with distance.
///
/// The score is exactly 1 at zero distance and tends towards (but never reaches) zero as the
/// distance grows.
pub fn proximity_score(distance: Kilometres) -> Dimensionless {
    Dimensionless(1.0 / (1.0 + distance.value()))
}

/// Score `location` by its distance to the nearest of `points`.
///
/// # Returns
///
/// The score, or an [`ScoringError::EmptyReferenceSet`] error naming `set` if `points` is empty.
pub fn nearest_proximity_score<'a, I>(
    location: &Coordinate,
    points: I,
    set: ReferenceSet,
) -> Result<Dimensionless, ScoringError>
where
    I: IntoIterator<Item = &'a Coordinate>,
{
    min_distance(location, points)
        .map(proximity_score)
        .ok_or(ScoringError::EmptyReferenceSet(set))
}

/// Score `location` as 1 if the zone governing it permits development, otherwise 0.
///
/// Locations which lie in no zone score 0, the same as a restrictive zone.
pub fn regulatory_score(
    location: &Coordinate,
    zones: &[RegulatoryZone],
    precedence: ZonePrecedence,
) -> Dimensionless {
    match governing_zone(zones, location, precedence) {
        Some(zone) if zone.category.is_permitted() => Dimensionless(1.0),
        _ => Dimensionless(0.0),
    }
}

/// Score a single candidate site.
///
/// The candidate is not modified; a new [`ScoredSite`] is returned.
///
/// # Arguments
///
/// * `site` - The candidate site
/// * `reference` - Renewable sources, demand centres and regulatory zones
/// * `weights` - The weight given to each criterion
/// * `precedence` - How to choose between overlapping zones
///
/// # Returns
///
/// The scored site or an error if either set of reference points is empty or the site's
/// coordinate is out of range.
pub fn score_site(
    site: &CandidateSite,
    reference: &ReferenceData,
    weights: &WeightConfig,
    precedence: ZonePrecedence,
) -> Result<ScoredSite, ScoringError> {
    reference.check_not_empty()?;
    site.location.validate()?;

    let renewable = nearest_proximity_score(
        &site.location,
        reference.iter_renewable_locations(),
        ReferenceSet::RenewableSources,
    )?;
    let demand = nearest_proximity_score(
        &site.location,
        reference.iter_demand_locations(),
        ReferenceSet::DemandCentres,
    )?;
    let regulatory = regulatory_score(&site.location, &reference.zones, precedence);

    let breakdown = ScoreBreakdown {
        renewable,
        demand,
        regulatory,
        total: weights.combine(renewable, demand, regulatory),
    };

    Ok(ScoredSite::new(site, breakdown))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{candidate, reference_data, square_zone};
    use crate::geo::haversine_distance;
    use crate::site::SiteScore;
    use float_cmp::assert_approx_eq;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 1.0)]
    #[case(1.0, 0.5)]
    #[case(3.0, 0.25)]
    fn test_proximity_score(#[case] distance: f64, #[case] expected: f64) {
        assert_eq!(
            proximity_score(Kilometres(distance)),
            Dimensionless(expected)
        );
    }

    #[test]
    fn test_proximity_score_far_away() {
        let score = proximity_score(Kilometres(20_000.0));
        assert!(score > Dimensionless(0.0) && score < Dimensionless(1e-4));
    }

    #[rstest]
    fn test_coincident_renewable_scores_one(reference_data: ReferenceData) {
        let source = reference_data.renewables[0].location;
        let site = candidate("s", source.latitude, source.longitude);
        let scored = score_site(
            &site,
            &reference_data,
            &WeightConfig::default(),
            ZonePrecedence::ListOrder,
        )
        .unwrap();
        assert_eq!(scored.breakdown.renewable, Dimensionless(1.0));
    }

    #[rstest]
    fn test_score_site_breakdown(reference_data: ReferenceData) {
        let site = candidate("s", 28.70, 77.50);
        let weights = WeightConfig::new(0.5, 0.3, 0.2);
        let scored = score_site(&site, &reference_data, &weights, ZonePrecedence::ListOrder)
            .unwrap();

        let renewable = proximity_score(haversine_distance(
            &site.location,
            &reference_data.renewables[0].location,
        ));
        let demand = proximity_score(haversine_distance(
            &site.location,
            &reference_data.demand_centres[0].location,
        ));
        assert_approx_eq!(Dimensionless, scored.breakdown.renewable, renewable);
        assert_approx_eq!(Dimensionless, scored.breakdown.demand, demand);
        assert_eq!(scored.breakdown.regulatory, Dimensionless(0.0));
        assert_approx_eq!(
            Dimensionless,
            scored.score(),
            Dimensionless(0.5) * renewable + Dimensionless(0.3) * demand
        );

        // Input is left unscored
        assert_eq!(site.score, SiteScore::Unscored);
    }

    #[rstest]
    fn test_score_site_nearest_point_used(mut reference_data: ReferenceData) {
        let site = candidate("s", 28.61, 77.22);
        let before = score_site(
            &site,
            &reference_data,
            &WeightConfig::default(),
            ZonePrecedence::ListOrder,
        )
        .unwrap();

        // Adding a far-away source doesn't change anything
        let mut far = reference_data.renewables[0].clone();
        far.id = "far".into();
        far.location = Coordinate::new(-30.0, -60.0);
        reference_data.renewables.push(far);
        let after = score_site(
            &site,
            &reference_data,
            &WeightConfig::default(),
            ZonePrecedence::ListOrder,
        )
        .unwrap();
        assert_eq!(before, after);
    }

    #[rstest]
    #[case(ZonePrecedence::ListOrder, 0.0)]
    #[case(ZonePrecedence::SmallestArea, 1.0)]
    fn test_overlapping_zones(#[case] precedence: ZonePrecedence, #[case] expected: f64) {
        let zones = [
            square_zone("restricted", "restricted", 0.0, 4.0),
            square_zone("permitted", "permitted", 0.0, 2.0),
        ];
        let score = regulatory_score(&Coordinate::new(1.0, 1.0), &zones, precedence);
        assert_eq!(score, Dimensionless(expected));
    }

    #[test]
    fn test_regulatory_score_outside_all_zones() {
        let zones = [square_zone("permitted", "permitted", 0.0, 2.0)];
        let score = regulatory_score(&Coordinate::new(3.0, 3.0), &zones, ZonePrecedence::ListOrder);
        assert_eq!(score, Dimensionless(0.0));
        assert_eq!(
            regulatory_score(&Coordinate::new(1.0, 1.0), &[], ZonePrecedence::ListOrder),
            Dimensionless(0.0)
        );
    }

    #[rstest]
    fn test_score_site_empty_reference(reference_data: ReferenceData) {
        let site = candidate("s", 28.61, 77.22);
        let weights = WeightConfig::default();

        let no_renewables = ReferenceData {
            renewables: Vec::new(),
            ..reference_data.clone()
        };
        assert_eq!(
            score_site(&site, &no_renewables, &weights, ZonePrecedence::ListOrder),
            Err(ScoringError::EmptyReferenceSet(
                ReferenceSet::RenewableSources
            ))
        );

        let no_demand = ReferenceData {
            demand_centres: Vec::new(),
            ..reference_data
        };
        assert_eq!(
            score_site(&site, &no_demand, &weights, ZonePrecedence::ListOrder),
            Err(ScoringError::EmptyReferenceSet(ReferenceSet::DemandCentres))
        );
    }

    #[rstest]
    fn test_score_site_invalid_coordinate(reference_data: ReferenceData) {
        let site = candidate("s", 95.0, 77.22);
        assert_eq!(
            score_site(
                &site,
                &reference_data,
                &WeightConfig::default(),
                ZonePrecedence::ListOrder
            ),
            Err(ScoringError::InvalidCoordinate {
                latitude: 95.0,
                longitude: 77.22
            })
        );
    }

    #[rstest]
    fn test_total_bounded_when_weights_normalised(reference_data: ReferenceData) {
        let weights = WeightConfig::new(0.1, 0.6, 0.3);
        assert!(weights.is_normalised());
        for (lat, lon) in [(28.61, 77.22), (28.70, 77.50), (0.0, 0.0), (-45.0, 170.0)] {
            let scored = score_site(
                &candidate("s", lat, lon),
                &reference_data,
                &weights,
                ZonePrecedence::ListOrder,
            )
            .unwrap();
            assert!((0.0..=1.0).contains(&scored.score().0));
        }
    }
}
