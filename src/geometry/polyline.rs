use crate::core::math::{Point, ZPoint, SCALED_EPSILON};
use crate::geometry::douglas_peucker;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Open polyline, an ordered point sequence with no implicit closing segment.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct Polyline {
    pub points: Vec<Point>,
}

pub type Polylines = Vec<Polyline>;

impl Polyline {
    #[inline]
    pub fn new() -> Self {
        Polyline { points: Vec::new() }
    }

    #[inline]
    pub fn from_points(points: Vec<Point>) -> Self {
        Polyline { points }
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.points.len() >= 2
    }

    pub fn length(&self) -> f64 {
        self.points
            .windows(2)
            .map(|w| (w[0].distance_sqr(w[1]) as f64).sqrt())
            .sum()
    }

    pub fn reverse(&mut self) {
        self.points.reverse();
    }

    pub fn simplify(&mut self, tolerance: f64) {
        self.points = douglas_peucker(&self.points, tolerance);
    }

    /// [`Polyline::simplify`] with the resolution epsilon as tolerance.
    pub fn simplify_default(&mut self) {
        self.simplify(SCALED_EPSILON as f64);
    }
}

impl From<Vec<Point>> for Polyline {
    #[inline]
    fn from(points: Vec<Point>) -> Self {
        Polyline { points }
    }
}

/// Open polyline whose points carry a width/height tag; produced and consumed
/// by the extrusion path clipping operations.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct ZPolyline {
    pub points: Vec<ZPoint>,
}

pub type ZPolylines = Vec<ZPolyline>;

impl ZPolyline {
    #[inline]
    pub fn from_points(points: Vec<ZPoint>) -> Self {
        ZPolyline { points }
    }

    /// Strip the tags, keeping the 2D geometry.
    pub fn to_polyline(&self) -> Polyline {
        Polyline::from_points(self.points.iter().map(|p| p.point()).collect())
    }

    /// Attach a constant tag to plain 2D geometry.
    pub fn from_polyline(polyline: &Polyline, z: i64) -> Self {
        ZPolyline {
            points: polyline
                .points
                .iter()
                .map(|&p| ZPoint::from_point(p, z))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_sums_segments() {
        let pl = polyline![(0, 0), (30, 40), (30, 140)];
        assert_fuzzy_eq!(pl.length(), 150.0, 1e-9);
    }

    #[test]
    fn simplify_default_drops_sub_epsilon_noise() {
        let mut pl = polyline![(0, 0), (5000, 60), (10_000, 0)];
        pl.simplify_default();
        assert_eq!(pl.points, vec![Point::new(0, 0), Point::new(10_000, 0)]);
    }

    #[test]
    fn zpolyline_round_trips_geometry() {
        let pl = polyline![(0, 0), (10, 0)];
        let z = ZPolyline::from_polyline(&pl, 42);
        assert_eq!(z.points[1].z, 42);
        assert_eq!(z.to_polyline(), pl);
    }
}
