use crate::core::math::{Coord, Point, SCALED_EPSILON};
use crate::geometry::{douglas_peucker, BoundingBox};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Closed polygon. The last point connects back to the first without
/// duplicating it. Counter clockwise winding denotes a filled region,
/// clockwise a hole.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct Polygon {
    pub points: Vec<Point>,
}

pub type Polygons = Vec<Polygon>;

impl Polygon {
    #[inline]
    pub fn new() -> Self {
        Polygon { points: Vec::new() }
    }

    #[inline]
    pub fn from_points(points: Vec<Point>) -> Self {
        Polygon { points }
    }

    /// A valid polygon encloses area, requiring at least 3 points.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.points.len() >= 3
    }

    /// Twice the signed shoelace area, exact.
    pub fn area2(&self) -> i128 {
        let pts = &self.points;
        if pts.len() < 3 {
            return 0;
        }
        let mut sum = 0i128;
        let mut prev = pts[pts.len() - 1];
        for &p in pts {
            sum += prev.cross(p);
            prev = p;
        }
        sum
    }

    /// Signed area; positive for counter clockwise winding.
    #[inline]
    pub fn area(&self) -> f64 {
        self.area2() as f64 * 0.5
    }

    #[inline]
    pub fn is_counter_clockwise(&self) -> bool {
        self.area2() > 0
    }

    #[inline]
    pub fn is_clockwise(&self) -> bool {
        self.area2() < 0
    }

    #[inline]
    pub fn reverse(&mut self) {
        self.points.reverse();
    }

    #[inline]
    pub fn reversed(&self) -> Self {
        let mut p = self.clone();
        p.reverse();
        p
    }

    pub fn make_counter_clockwise(&mut self) {
        if self.is_clockwise() {
            self.reverse();
        }
    }

    pub fn make_clockwise(&mut self) {
        if self.is_counter_clockwise() {
            self.reverse();
        }
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(&self.points)
    }

    /// Even-odd point containment by ray casting, exact integer arithmetic.
    /// A point exactly on the boundary may test on either side.
    pub fn contains_point(&self, p: Point) -> bool {
        let pts = &self.points;
        let n = pts.len();
        if n < 3 {
            return false;
        }
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let a = pts[j];
            let b = pts[i];
            if (a.y > p.y) != (b.y > p.y) {
                // p.x < a.x + (b.x - a.x) * (p.y - a.y) / (b.y - a.y), kept exact
                let dy = (b.y - a.y) as i128;
                let lhs = (p.x - a.x) as i128 * dy;
                let rhs = (b.x - a.x) as i128 * (p.y - a.y) as i128;
                if (dy > 0 && lhs < rhs) || (dy < 0 && lhs > rhs) {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }

    /// Douglas-Peucker point reduction with the ring closure preserved: the
    /// seam point is pinned, the rest simplifies like an open path.
    pub fn simplify(&mut self, tolerance: f64) {
        if self.points.len() <= 3 {
            return;
        }
        let mut closed = self.points.clone();
        closed.push(closed[0]);
        let mut reduced = douglas_peucker(&closed, tolerance);
        reduced.pop();
        if reduced.len() >= 3 {
            self.points = reduced;
        }
    }

    /// [`Polygon::simplify`] with the resolution epsilon as tolerance.
    pub fn simplify_default(&mut self) {
        self.simplify(SCALED_EPSILON as f64);
    }

    /// Iterate segments as `(start, end)` point pairs, including the closing
    /// segment.
    pub fn iter_segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }
}

impl From<Vec<Point>> for Polygon {
    #[inline]
    fn from(points: Vec<Point>) -> Self {
        Polygon { points }
    }
}

impl From<Vec<(Coord, Coord)>> for Polygon {
    fn from(tuples: Vec<(Coord, Coord)>) -> Self {
        Polygon {
            points: tuples.into_iter().map(Point::from).collect(),
        }
    }
}
