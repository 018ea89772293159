use crate::geometry::{ExPolygon, ExPolygons};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Classification of a printable surface region within a layer.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SurfaceType {
    /// Horizontal surface visible from the top.
    Top,
    /// Horizontal surface visible from the bottom.
    Bottom,
    /// Bottom surface printed over support or air with bridging flow.
    BottomBridge,
    /// Sparse interior fill.
    Internal,
    /// Dense interior fill backing top/bottom skins.
    InternalSolid,
    /// Dense fill printed with bridging flow over sparse fill.
    InternalBridge,
    /// Interior left unfilled.
    InternalVoid,
    /// Inner/outer perimeters.
    Perimeter,
}

/// A region with holes tagged with its surface classification; the slicing
/// pipeline's unit of fill planning.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Surface {
    pub surface_type: SurfaceType,
    pub expolygon: ExPolygon,
}

pub type Surfaces = Vec<Surface>;

impl Surface {
    #[inline]
    pub fn new(surface_type: SurfaceType, expolygon: ExPolygon) -> Self {
        Surface {
            surface_type,
            expolygon,
        }
    }
}

/// Strip surface classifications, keeping the geometry.
pub fn surfaces_to_expolygons(surfaces: &[Surface]) -> ExPolygons {
    surfaces.iter().map(|s| s.expolygon.clone()).collect()
}
