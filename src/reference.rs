//! Reference datasets against which candidate sites are scored.
use crate::error::{ReferenceSet, ScoringError};
use crate::geo::Coordinate;
use crate::id::{define_id_getter, define_id_type};
use crate::zone::RegulatoryZone;

define_id_type! {SourceID}
define_id_type! {DemandCentreID}

/// A renewable energy source which could supply a hydrogen facility
#[derive(Debug, Clone, PartialEq)]
pub struct RenewableSource {
    /// A unique identifier for the source
    pub id: SourceID,
    /// A human-readable name for the source
    pub name: String,
    /// Where the source is located
    pub location: Coordinate,
    /// The generating technology (e.g. "solar"), for information only
    pub technology: Option<String>,
}
define_id_getter! {RenewableSource, SourceID}

/// A centre of hydrogen demand, such as an industrial cluster or a city
#[derive(Debug, Clone, PartialEq)]
pub struct DemandCentre {
    /// A unique identifier for the demand centre
    pub id: DemandCentreID,
    /// A human-readable name for the demand centre
    pub name: String,
    /// Where the demand centre is located
    pub location: Coordinate,
}
define_id_getter! {DemandCentre, DemandCentreID}

/// The reference data needed to score sites.
///
/// The order of `zones` is significant when zone precedence is decided by list order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReferenceData {
    /// Renewable energy sources
    pub renewables: Vec<RenewableSource>,
    /// Demand centres
    pub demand_centres: Vec<DemandCentre>,
    /// Regulatory zones, in order
    pub zones: Vec<RegulatoryZone>,
}

impl ReferenceData {
    /// Check that there is at least one renewable source and one demand centre.
    ///
    /// An empty set of zones is allowed.
    pub fn check_not_empty(&self) -> Result<(), ScoringError> {
        if self.renewables.is_empty() {
            return Err(ScoringError::EmptyReferenceSet(
                ReferenceSet::RenewableSources,
            ));
        }
        if self.demand_centres.is_empty() {
            return Err(ScoringError::EmptyReferenceSet(ReferenceSet::DemandCentres));
        }

        Ok(())
    }

    /// Iterate over errors for zones whose boundaries cannot enclose any site
    pub fn iter_malformed_zones(&self) -> impl Iterator<Item = ScoringError> + '_ {
        self.zones
            .iter()
            .filter_map(|zone| zone.check_boundary().err())
    }

    /// Iterate over the locations of the renewable sources
    pub fn iter_renewable_locations(&self) -> impl Iterator<Item = &Coordinate> {
        self.renewables.iter().map(|source| &source.location)
    }

    /// Iterate over the locations of the demand centres
    pub fn iter_demand_locations(&self) -> impl Iterator<Item = &Coordinate> {
        self.demand_centres.iter().map(|centre| &centre.location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{reference_data, zone};
    use rstest::rstest;

    #[rstest]
    fn test_check_not_empty(reference_data: ReferenceData) {
        assert!(reference_data.check_not_empty().is_ok());

        let no_zones = ReferenceData {
            zones: Vec::new(),
            ..reference_data.clone()
        };
        assert!(no_zones.check_not_empty().is_ok());

        let no_renewables = ReferenceData {
            renewables: Vec::new(),
            ..reference_data.clone()
        };
        assert_eq!(
            no_renewables.check_not_empty(),
            Err(ScoringError::EmptyReferenceSet(
                ReferenceSet::RenewableSources
            ))
        );

        let no_demand = ReferenceData {
            demand_centres: Vec::new(),
            ..reference_data
        };
        assert_eq!(
            no_demand.check_not_empty(),
            Err(ScoringError::EmptyReferenceSet(ReferenceSet::DemandCentres))
        );
    }

    #[rstest]
    fn test_iter_malformed_zones(mut reference_data: ReferenceData) {
        assert_eq!(reference_data.iter_malformed_zones().count(), 0);

        reference_data
            .zones
            .push(zone("line", "permitted", None, &[(0.0, 0.0), (1.0, 1.0)]));
        let errors: Vec<_> = reference_data.iter_malformed_zones().collect();
        assert_eq!(
            errors,
            [ScoringError::MalformedPolygon {
                zone_id: "line".into(),
                vertices: 2
            }]
        );
    }
}
