/// Fixed-point scaled integer coordinate type used for all geometry.
pub type Coord = i64;

/// Size of one scaled unit in millimeters (1 unit = 1 micrometer).
pub const SCALING_FACTOR: f64 = 1e-6;

/// Distance below which two points are treated as coincident, in scaled
/// units. Always compared against squared distances.
pub const SCALED_EPSILON: Coord = 100;

/// [`SCALED_EPSILON`] squared, for squared distance comparisons.
pub const SCALED_EPSILON_SQR: i128 = (SCALED_EPSILON as i128) * (SCALED_EPSILON as i128);

/// Magnitude of the safety offset (in scaled units) applied to clip operands
/// to close micro gaps between adjacent polygons before a difference or
/// intersection. Large enough to seal seams between neighboring layer
/// regions, small enough to be invisible at print scale.
pub const CLIPPER_SAFETY_OFFSET: f64 = 10.0;

/// Edges shorter than this fraction of the offset distance are merged with a
/// neighbor before join math; near-zero edges make the corner normals ill
/// conditioned.
pub const OFFSET_SHORTEST_EDGE_FACTOR: f64 = 0.005;

/// Default miter limit for closed path offsets.
pub const DEFAULT_MITER_LIMIT: f64 = 3.0;

/// Convert a distance in millimeters to scaled units.
#[inline]
pub fn scale(v: f64) -> Coord {
    (v / SCALING_FACTOR).round() as Coord
}

/// Convert a distance in scaled units to millimeters.
#[inline]
pub fn unscale(v: Coord) -> f64 {
    v as f64 * SCALING_FACTOR
}

/// Linear interpolation from `a` to `b` at parameter `t`.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_round_trips() {
        assert_eq!(scale(1.0), 1_000_000);
        assert_fuzzy_eq!(unscale(scale(0.2)), 0.2, 1e-9);
    }

    #[test]
    fn epsilon_sqr_consistent() {
        assert_eq!(SCALED_EPSILON_SQR, 10_000);
    }
}
