use crate::core::math::{Coord, Point};
use crate::geometry::{ExPolygon, Polygon};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Axis aligned bounding box in scaled integer coordinates.
///
/// The default value is inverted (`min > max`) so it merges cleanly and
/// reports [`BoundingBox::defined`] as false until a point is added.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    pub min: Point,
    pub max: Point,
}

impl Default for BoundingBox {
    #[inline]
    fn default() -> Self {
        BoundingBox {
            min: Point::new(Coord::MAX, Coord::MAX),
            max: Point::new(Coord::MIN, Coord::MIN),
        }
    }
}

impl BoundingBox {
    #[inline]
    pub fn new(min: Point, max: Point) -> Self {
        BoundingBox { min, max }
    }

    pub fn from_points(points: &[Point]) -> Self {
        let mut bb = BoundingBox::default();
        for &p in points {
            bb.merge_point(p);
        }
        bb
    }

    /// False until at least one point has been merged.
    #[inline]
    pub fn defined(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y
    }

    pub fn merge_point(&mut self, p: Point) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    pub fn merge(&mut self, other: &BoundingBox) {
        if other.defined() {
            self.merge_point(other.min);
            self.merge_point(other.max);
        }
    }

    /// Grown (or shrunk, for negative `delta`) copy.
    pub fn inflated(&self, delta: Coord) -> Self {
        BoundingBox {
            min: Point::new(self.min.x - delta, self.min.y - delta),
            max: Point::new(self.max.x + delta, self.max.y + delta),
        }
    }

    /// Inclusive containment; a point on the boundary is inside.
    #[inline]
    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    #[inline]
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    /// The box as a counter clockwise 4 corner polygon.
    pub fn polygon(&self) -> Polygon {
        Polygon::from_points(vec![
            self.min,
            Point::new(self.max.x, self.min.y),
            self.max,
            Point::new(self.min.x, self.max.y),
        ])
    }
}

/// Enclosing bounding box of a set of polygons.
pub fn get_extents<'a, I>(polygons: I) -> BoundingBox
where
    I: IntoIterator<Item = &'a Polygon>,
{
    let mut bb = BoundingBox::default();
    for poly in polygons {
        for &p in &poly.points {
            bb.merge_point(p);
        }
    }
    bb
}

/// Enclosing bounding box of a set of regions with holes. Holes cannot
/// extend past their contour, so only contours are scanned.
pub fn get_extents_ex<'a, I>(expolygons: I) -> BoundingBox
where
    I: IntoIterator<Item = &'a ExPolygon>,
{
    get_extents(expolygons.into_iter().map(|ex| &ex.contour))
}
