//! Adapter between the kernel's scaled integer paths and the `i_overlay`
//! float overlay engine.
//!
//! Scaled coordinates stay far below 2^53, so the integer to float round
//! trip is exact; only freshly computed intersection points get rounded.

use i_overlay::core::fill_rule::FillRule;
use i_overlay::core::overlay_rule::OverlayRule;
use i_overlay::float::single::SingleFloatOverlay;

use crate::clipper::provider::PathProvider;
use crate::clipper::{ClipType, FillType};
use crate::core::math::Point;
use crate::geometry::{Polygon, Polygons};

pub(crate) type FloatPath = Vec<[f64; 2]>;

pub(crate) fn to_float_paths<P: PathProvider>(provider: &P) -> Vec<FloatPath> {
    provider
        .paths()
        .map(|path| path.iter().map(|p| p.to_f64()).collect())
        .collect()
}

pub(crate) fn float_to_polygon(path: &[[f64; 2]]) -> Polygon {
    let mut points: Vec<Point> = Vec::with_capacity(path.len());
    for p in path {
        let pt = Point::from_f64(p[0], p[1]);
        if points.last() != Some(&pt) {
            points.push(pt);
        }
    }
    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    Polygon::from_points(points)
}

// The overlay engine counts winding with clockwise positive while the
// kernel's convention is counter clockwise positive, so the two directional
// rules map crosswise. EvenOdd and NonZero are sign blind.
fn fill_rule(fill_type: FillType) -> FillRule {
    match fill_type {
        FillType::EvenOdd => FillRule::EvenOdd,
        FillType::NonZero => FillRule::NonZero,
        FillType::Positive => FillRule::Negative,
        FillType::Negative => FillRule::Positive,
    }
}

fn overlay_rule(clip_type: ClipType) -> OverlayRule {
    match clip_type {
        ClipType::Union => OverlayRule::Union,
        ClipType::Difference => OverlayRule::Difference,
        ClipType::Intersection => OverlayRule::Intersect,
        ClipType::Xor => OverlayRule::Xor,
    }
}

/// Run the overlay engine over two float path sets and flatten the resulting
/// shapes to polygons with normalized winding (counter clockwise contours,
/// clockwise holes).
pub(crate) fn overlay_paths(
    subject: &[FloatPath],
    clip: Vec<FloatPath>,
    clip_type: ClipType,
    fill_type: FillType,
) -> Polygons {
    if subject.is_empty() && clip.is_empty() {
        return Vec::new();
    }
    let shapes = subject.overlay(&clip, overlay_rule(clip_type), fill_rule(fill_type));
    shapes_to_polygons(shapes)
}

/// Resolve a single path set by its fill rule (no second operand), keeping
/// the filled region.
pub(crate) fn resolve_paths(subject: &[FloatPath], fill_type: FillType) -> Polygons {
    if subject.is_empty() {
        return Vec::new();
    }
    let clip: Vec<FloatPath> = Vec::new();
    let shapes = subject.overlay(&clip, OverlayRule::Subject, fill_rule(fill_type));
    shapes_to_polygons(shapes)
}

fn shapes_to_polygons(shapes: Vec<Vec<FloatPath>>) -> Polygons {
    let mut out = Vec::new();
    for shape in &shapes {
        for (i, contour) in shape.iter().enumerate() {
            let mut poly = float_to_polygon(contour);
            if !poly.is_valid() {
                continue;
            }
            // first path of a shape is the outer contour, the rest are holes
            if i == 0 {
                poly.make_counter_clockwise();
            } else {
                poly.make_clockwise();
            }
            out.push(poly);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directional_fill_rules_follow_ring_winding() {
        let ccw = vec![polygon![(0, 0), (1000, 0), (1000, 1000), (0, 1000)]];
        let cw = vec![ccw[0].reversed()];
        let ccw_f = to_float_paths(&ccw);
        let cw_f = to_float_paths(&cw);

        let kept = resolve_paths(&ccw_f, FillType::Positive);
        assert_eq!(kept.len(), 1);
        assert_fuzzy_eq!(kept[0].area(), 1000.0 * 1000.0, 1.0);
        assert!(resolve_paths(&ccw_f, FillType::Negative).is_empty());

        let kept = resolve_paths(&cw_f, FillType::Negative);
        assert_eq!(kept.len(), 1);
        assert_fuzzy_eq!(kept[0].area(), 1000.0 * 1000.0, 1.0);
        assert!(resolve_paths(&cw_f, FillType::Positive).is_empty());
    }

    #[test]
    fn overlay_intersects_two_operands() {
        let a = vec![polygon![(0, 0), (2000, 0), (2000, 2000), (0, 2000)]];
        let b = vec![polygon![(1000, 1000), (3000, 1000), (3000, 3000), (1000, 3000)]];
        let out = overlay_paths(
            &to_float_paths(&a),
            to_float_paths(&b),
            ClipType::Intersection,
            FillType::NonZero,
        );
        assert_eq!(out.len(), 1);
        assert_fuzzy_eq!(out[0].area(), 1000.0 * 1000.0, 1.0);
    }
}
