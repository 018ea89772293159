//! Geometry value types: polygons, regions with holes, polylines, bounding
//! boxes, and the Douglas-Peucker simplification routine.
//!
//! Orientation convention throughout the kernel: counter clockwise winding is
//! a filled region, clockwise winding is a hole.

mod bounding_box;
mod expolygon;
mod polygon;
mod polyline;
mod simplify;
mod surface;

pub use bounding_box::*;
pub use expolygon::*;
pub use polygon::*;
pub use polyline::*;
pub use simplify::*;
pub use surface::*;
