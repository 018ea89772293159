use crate::core::math::Point;
use crate::geometry::{BoundingBox, Polygon, Polygons};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Region with holes: one counter clockwise contour plus zero or more
/// clockwise holes, all holes disjoint and properly nested inside the
/// contour. Holes never nest directly inside holes; an island inside a hole
/// is a separate `ExPolygon`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct ExPolygon {
    pub contour: Polygon,
    pub holes: Polygons,
}

pub type ExPolygons = Vec<ExPolygon>;

impl ExPolygon {
    #[inline]
    pub fn new(contour: Polygon) -> Self {
        ExPolygon {
            contour,
            holes: Vec::new(),
        }
    }

    /// Net enclosed area. Holes wind clockwise, so their signed areas
    /// subtract on their own.
    pub fn area(&self) -> f64 {
        self.contour.area() + self.holes.iter().map(|h| h.area()).sum::<f64>()
    }

    pub fn contains_point(&self, p: Point) -> bool {
        self.contour.contains_point(p) && !self.holes.iter().any(|h| h.contains_point(p))
    }

    #[inline]
    pub fn bounding_box(&self) -> BoundingBox {
        self.contour.bounding_box()
    }

    /// Flatten into a plain path list, contour first.
    pub fn into_polygons(self) -> Polygons {
        let mut out = Vec::with_capacity(1 + self.holes.len());
        out.push(self.contour);
        out.extend(self.holes);
        out
    }
}

impl From<Polygon> for ExPolygon {
    #[inline]
    fn from(contour: Polygon) -> Self {
        ExPolygon::new(contour)
    }
}

/// Flatten regions with holes into a plain path list, preserving winding.
pub fn expolygons_to_polygons(expolygons: Vec<ExPolygon>) -> Polygons {
    let mut out = Vec::new();
    for ex in expolygons {
        out.extend(ex.into_polygons());
    }
    out
}

/// Total net area of a region set.
pub fn expolygons_area(expolygons: &[ExPolygon]) -> f64 {
    expolygons.iter().map(|ex| ex.area()).sum()
}
