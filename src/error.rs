//! Errors which can occur while scoring and ranking sites.
use crate::zone::ZoneID;
use thiserror::Error;

/// The reference datasets which a site is scored against
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum ReferenceSet {
    /// Renewable energy sources
    #[strum(serialize = "renewable sources")]
    RenewableSources,
    /// Hydrogen demand centres
    #[strum(serialize = "demand centres")]
    DemandCentres,
}

/// An error raised by the scoring engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    /// A coordinate lies outside the valid WGS84 ranges (or is not a finite number)
    #[error(
        "Invalid coordinate ({latitude}, {longitude}): latitude must be within [-90, 90] and \
        longitude within [-180, 180]"
    )]
    InvalidCoordinate {
        /// The offending latitude
        latitude: f64,
        /// The offending longitude
        longitude: f64,
    },
    /// A reference set needed for scoring is empty
    #[error("Cannot score sites: no {0} were provided")]
    EmptyReferenceSet(ReferenceSet),
    /// A zone boundary has too few vertices to enclose anything
    #[error("Boundary of zone {zone_id} has {vertices} vertices, but at least 3 are required")]
    MalformedPolygon {
        /// The zone with the malformed boundary
        zone_id: ZoneID,
        /// The number of vertices in the boundary
        vertices: usize,
    },
}
