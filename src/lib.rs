//! Fixed-point 2D polygon boolean/offset kernel for slicing pipelines.
//!
//! All geometry lives in a scaled 64-bit integer coordinate space so boolean
//! results are exact and reproducible. The crate provides:
//!
//! * Boolean operations (union/difference/intersection with selectable fill
//!   rule) over polygon sets with holes, returning flat path lists, region
//!   trees, or regions with holes ([`geometry::ExPolygon`]).
//! * An offset engine: uniform expand/shrink with miter/square/round joins,
//!   morphological closing/opening, safety offsets, and a mitered
//!   variable-width per-vertex offset.
//! * A bounding box polygon clipper used as a cheap pre-filter before
//!   expensive boolean operations.
//! * Open polyline clipping against polygon sets, optionally carrying and
//!   interpolating a per-point width/height tag.
//! * Douglas-Peucker polyline simplification.
//!
//! Boolean resolution is delegated to the `i_overlay` sweep line engine;
//! everything layered on top of it is implemented here.

#[macro_use]
mod macros;
#[macro_use]
mod utils;

pub mod clipper;
pub mod core;
pub mod geometry;
pub mod offset;

pub use crate::clipper::{ApplySafetyOffset, ClipType, FillType};
pub use crate::core::math::{Coord, Point, ZPoint};
pub use crate::geometry::{
    BoundingBox, ExPolygon, ExPolygons, Polygon, Polygons, Polyline, Polylines, ZPolyline,
    ZPolylines,
};
pub use crate::offset::JoinType;
