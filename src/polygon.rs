//! Point-in-polygon testing for zone boundaries.
//!
//! Boundaries are rings of [`Coordinate`]s in which latitude plays the role of the "y" axis and
//! longitude the "x" axis. The same convention must be used when authoring boundaries. Rings are
//! treated as planar in degree space, which is adequate for the small regions zones describe.
use crate::geo::Coordinate;

/// The minimum number of vertices a ring needs to enclose an area
pub const MIN_POLYGON_VERTICES: usize = 3;

/// A simple (non-self-intersecting) polygon given as an ordered ring of vertices.
///
/// The ring does not need to repeat its first vertex at the end; edges wrap around from the last
/// vertex to the first.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    vertices: Vec<Coordinate>,
}

impl Polygon {
    /// Create a new [`Polygon`] from its vertices
    pub fn new(vertices: Vec<Coordinate>) -> Self {
        Self { vertices }
    }

    /// The vertices of the ring, in order
    pub fn vertices(&self) -> &[Coordinate] {
        &self.vertices
    }

    /// Whether the ring has enough vertices to enclose an area
    pub fn is_well_formed(&self) -> bool {
        self.vertices.len() >= MIN_POLYGON_VERTICES
    }

    /// Test whether `point` lies inside the polygon, using the even-odd rule.
    ///
    /// A horizontal ray is cast from the point and the number of edges it crosses is counted.
    /// Points lying exactly on an edge or vertex may be classified either way, depending on the
    /// edge orientation. Malformed rings (see [`Polygon::is_well_formed`]) never contain a point
    /// and results for self-intersecting rings are unspecified.
    pub fn contains(&self, point: &Coordinate) -> bool {
        if !self.is_well_formed() {
            return false;
        }

        let (x, y) = (point.longitude, point.latitude);
        let mut inside = false;
        let mut j = self.vertices.len() - 1;
        for (i, vi) in self.vertices.iter().enumerate() {
            let vj = &self.vertices[j];
            let (xi, yi) = (vi.longitude, vi.latitude);
            let (xj, yj) = (vj.longitude, vj.latitude);

            if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
                inside = !inside;
            }
            j = i;
        }

        inside
    }

    /// The enclosed area in square degrees, from the shoelace formula.
    ///
    /// Only meaningful for comparing the sizes of nearby rings.
    pub fn area(&self) -> f64 {
        if !self.is_well_formed() {
            return 0.0;
        }

        let n = self.vertices.len();
        let twice_area: f64 = (0..n)
            .map(|i| {
                let a = &self.vertices[i];
                let b = &self.vertices[(i + 1) % n];
                a.longitude * b.latitude - b.longitude * a.latitude
            })
            .sum();

        twice_area.abs() / 2.0
    }
}

impl From<Vec<Coordinate>> for Polygon {
    fn from(vertices: Vec<Coordinate>) -> Self {
        Self::new(vertices)
    }
}

impl FromIterator<Coordinate> for Polygon {
    fn from_iter<I: IntoIterator<Item = Coordinate>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;
    use rstest::{fixture, rstest};

    /// Build a polygon from (latitude, longitude) pairs
    fn polygon(points: &[(f64, f64)]) -> Polygon {
        points
            .iter()
            .map(|&(lat, lon)| Coordinate::new(lat, lon))
            .collect()
    }

    #[fixture]
    fn square() -> Polygon {
        polygon(&[(0.0, 0.0), (0.0, 2.0), (2.0, 2.0), (2.0, 0.0)])
    }

    #[rstest]
    #[case(1.0, 1.0, true)]
    #[case(5.0, 5.0, false)]
    #[case(0.5, 1.9, true)]
    #[case(-0.1, 1.0, false)]
    #[case(1.0, 2.1, false)]
    fn test_contains_square(
        square: Polygon,
        #[case] latitude: f64,
        #[case] longitude: f64,
        #[case] expected: bool,
    ) {
        assert_eq!(
            square.contains(&Coordinate::new(latitude, longitude)),
            expected
        );
    }

    #[rstest]
    fn test_contains_closed_ring(square: Polygon) {
        // Repeating the first vertex doesn't change the result
        let mut vertices = square.vertices().to_vec();
        vertices.push(vertices[0]);
        let closed = Polygon::new(vertices);
        assert!(closed.contains(&Coordinate::new(1.0, 1.0)));
        assert!(!closed.contains(&Coordinate::new(3.0, 1.0)));
    }

    #[test]
    fn test_contains_concave() {
        // A "U" shape: the notch between the arms is outside
        let u_shape = polygon(&[
            (0.0, 0.0),
            (0.0, 3.0),
            (3.0, 3.0),
            (3.0, 2.0),
            (1.0, 2.0),
            (1.0, 1.0),
            (3.0, 1.0),
            (3.0, 0.0),
        ]);
        assert!(u_shape.contains(&Coordinate::new(2.0, 0.5)));
        assert!(u_shape.contains(&Coordinate::new(2.0, 2.5)));
        assert!(!u_shape.contains(&Coordinate::new(2.0, 1.5)));
        assert!(u_shape.contains(&Coordinate::new(0.5, 1.5)));
    }

    #[test]
    fn test_axis_convention() {
        // A tall thin rectangle: 4 degrees of latitude, 1 of longitude
        let rect = polygon(&[(0.0, 0.0), (4.0, 0.0), (4.0, 1.0), (0.0, 1.0)]);
        assert!(rect.contains(&Coordinate::new(3.0, 0.5)));
        assert!(!rect.contains(&Coordinate::new(0.5, 3.0)));
    }

    #[rstest]
    #[case(&[])]
    #[case(&[(0.0, 0.0)])]
    #[case(&[(0.0, 0.0), (2.0, 2.0)])]
    fn test_malformed_never_contains(#[case] points: &[(f64, f64)]) {
        let poly = polygon(points);
        assert!(!poly.is_well_formed());
        assert!(!poly.contains(&Coordinate::new(1.0, 1.0)));
        assert_eq!(poly.area(), 0.0);
    }

    #[rstest]
    fn test_area(square: Polygon) {
        assert_approx_eq!(f64, square.area(), 4.0);

        let triangle = polygon(&[(0.0, 0.0), (0.0, 4.0), (3.0, 0.0)]);
        assert_approx_eq!(f64, triangle.area(), 6.0);
    }
}
