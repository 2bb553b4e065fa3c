//! Regulatory zones constrain where hydrogen infrastructure may be built.
use crate::error::ScoringError;
use crate::geo::Coordinate;
use crate::id::{define_id_getter, define_id_type};
use crate::polygon::Polygon;
use serde_string_enum::DeserializeLabeledStringEnum;

define_id_type! {ZoneID}

/// The label for zones in which development is allowed
pub const PERMITTED_CATEGORY: &str = "permitted";

/// The category of a regulatory zone.
///
/// Only "permitted" is treated specially. Every other category (e.g. "restricted", "protected")
/// counts as disallowing development; the original label is kept for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZoneCategory {
    /// Development is allowed
    Permitted,
    /// Any other category
    Other(String),
}

impl ZoneCategory {
    /// Whether development is allowed in zones of this category
    pub fn is_permitted(&self) -> bool {
        matches!(self, Self::Permitted)
    }
}

impl From<&str> for ZoneCategory {
    fn from(s: &str) -> Self {
        if s == PERMITTED_CATEGORY {
            Self::Permitted
        } else {
            Self::Other(s.to_string())
        }
    }
}

impl std::fmt::Display for ZoneCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Permitted => write!(f, "{PERMITTED_CATEGORY}"),
            Self::Other(category) => write!(f, "{category}"),
        }
    }
}

/// A regulatory zone with a polygonal boundary
#[derive(Debug, Clone, PartialEq)]
pub struct RegulatoryZone {
    /// A unique identifier for the zone
    pub id: ZoneID,
    /// A human-readable name for the zone
    pub name: String,
    /// Whether development is permitted in the zone
    pub category: ZoneCategory,
    /// Explicit precedence when zones overlap (lower values take precedence)
    pub priority: Option<u32>,
    /// The boundary of the zone
    pub boundary: Polygon,
}
define_id_getter! {RegulatoryZone, ZoneID}

impl RegulatoryZone {
    /// Whether `point` lies within the zone's boundary
    pub fn contains(&self, point: &Coordinate) -> bool {
        self.boundary.contains(point)
    }

    /// Check that the boundary has enough vertices to enclose an area
    pub fn check_boundary(&self) -> Result<(), ScoringError> {
        if self.boundary.is_well_formed() {
            Ok(())
        } else {
            Err(ScoringError::MalformedPolygon {
                zone_id: self.id.clone(),
                vertices: self.boundary.vertices().len(),
            })
        }
    }
}

/// How to choose between several zones which all contain a site
#[derive(DeserializeLabeledStringEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZonePrecedence {
    /// The first containing zone in list order wins.
    ///
    /// Callers must order zones so that the intended precedence is encoded by position.
    #[default]
    #[string = "list_order"]
    ListOrder,
    /// The containing zone with the lowest priority value wins.
    ///
    /// Zones without a priority come after all prioritised zones. Ties go to the zone listed
    /// first.
    #[string = "priority"]
    Priority,
    /// The containing zone with the smallest area wins. Ties go to the zone listed first.
    #[string = "smallest_area"]
    SmallestArea,
}

/// Find the zone which governs what may be built at `point`, if any
pub fn governing_zone<'a>(
    zones: &'a [RegulatoryZone],
    point: &Coordinate,
    precedence: ZonePrecedence,
) -> Option<&'a RegulatoryZone> {
    let mut containing = zones.iter().filter(|zone| zone.contains(point));
    match precedence {
        ZonePrecedence::ListOrder => containing.next(),
        ZonePrecedence::Priority => {
            containing.min_by_key(|zone| (zone.priority.is_none(), zone.priority))
        }
        ZonePrecedence::SmallestArea => {
            containing.min_by(|a, b| a.boundary.area().total_cmp(&b.boundary.area()))
        }
    }
}
