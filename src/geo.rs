//! Geodesic calculations on WGS84 coordinates.
use crate::error::ScoringError;
use crate::units::Kilometres;
use serde::{Deserialize, Serialize};

/// The mean radius of the Earth used for great-circle distances
pub const EARTH_RADIUS: Kilometres = Kilometres(6371.0);

/// A WGS84 position in degrees.
///
/// Values are not checked on construction. Use [`Coordinate::validate`] before scoring data from
/// untrusted sources: out-of-range values still give a numerical distance, but it has no
/// geographical meaning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees, within [-90, 90]
    pub latitude: f64,
    /// Longitude in degrees, within [-180, 180]
    pub longitude: f64,
}

impl Coordinate {
    /// Create a new [`Coordinate`] from latitude and longitude in degrees
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Check that the latitude and longitude are within their valid ranges
    pub fn validate(&self) -> Result<(), ScoringError> {
        if (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude) {
            Ok(())
        } else {
            Err(ScoringError::InvalidCoordinate {
                latitude: self.latitude,
                longitude: self.longitude,
            })
        }
    }

    /// Great-circle distance to another coordinate
    pub fn distance_to(&self, other: &Coordinate) -> Kilometres {
        haversine_distance(self, other)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

/// Calculate the great-circle distance between two coordinates with the haversine formula.
///
/// The result is symmetric in its arguments and zero for identical coordinates.
pub fn haversine_distance(a: &Coordinate, b: &Coordinate) -> Kilometres {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos()
            * b.latitude.to_radians().cos()
            * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    Kilometres(EARTH_RADIUS.value() * c)
}

/// The distance from `origin` to the nearest of `points`.
///
/// Returns `None` if `points` is empty.
pub fn min_distance<'a, I>(origin: &Coordinate, points: I) -> Option<Kilometres>
where
    I: IntoIterator<Item = &'a Coordinate>,
{
    points
        .into_iter()
        .map(|point| haversine_distance(origin, point))
        .min_by(Kilometres::total_cmp)
}
