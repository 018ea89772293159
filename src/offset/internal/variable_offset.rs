//! Variable width mitered offset of a region with holes.
//!
//! Every vertex carries its own offset distance; all distances of one call
//! must share a sign. Used for thin wall compensation where the offset
//! width varies along the perimeter.

use crate::clipper::{
    diff, diff_ex, polytree_to_expolygons, ApplySafetyOffset, FillType, PolyTree,
};
use crate::core::math::{Point, Vector2, SCALED_EPSILON_SQR};
use crate::geometry::{ExPolygon, ExPolygons, Polygon, Polygons};

use super::raw_offset::resolve_raw_curves;

/// Mitered offset curve of one ring with one offset distance per vertex.
///
/// The corner handling matches [`raw_offset_path`](super::raw_offset::raw_offset_path)
/// with the miter join: concave corners loop through the vertex, nearly
/// parallel corners emit one point, convex corners miter within the limit
/// and bevel beyond it. Edges shorter than the merge threshold derived from
/// the largest distance are merged. The curve is unresolved; pass it to
/// [`fix_after_outer_offset`] or [`fix_after_inner_offset`].
pub fn mittered_offset_path(contour: &[Point], deltas: &[f64], miter_limit: f64) -> Polygon {
    debug_assert_eq!(contour.len(), deltas.len());
    #[cfg(debug_assertions)]
    {
        // all deltas of one curve share a sign
        let positive = deltas.iter().any(|&d| d > 0.0);
        let negative = deltas.iter().any(|&d| d < 0.0);
        debug_assert!(!(positive && negative));
    }

    let mut out: Vec<Point> = Vec::new();
    if deltas.len() > 2 {
        out.reserve(contour.len() * 2);

        let mlim = if miter_limit > 2.0 {
            2.0 / (miter_limit * miter_limit)
        } else {
            0.5
        };
        let lmin =
            deltas.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b)) * crate::core::math::OFFSET_SHORTEST_EDGE_FACTOR;
        let l2min = lmin * lmin;
        // minimum sideways deviation (in scaled units) to consider two
        // edges non parallel
        let sin_min_parallel = 1.0;

        let push = |out: &mut Vec<Point>, p: Vector2| out.push(Point::from_f64(p.x, p.y));

        // find the last point further from the first one than the merge
        // threshold
        let pt0 = Vector2::from_point(contour[0]);
        let mut pt = pt0;
        let mut iprev = contour.len() - 1;
        let mut ptprev = Vector2::default();
        while iprev > 0 {
            ptprev = Vector2::from_point(contour[iprev]);
            if (ptprev - pt).length_sqr() > l2min {
                break;
            }
            iprev -= 1;
        }

        if iprev != 0 {
            let ilast = iprev;
            let mut nprev = (pt - ptprev).perp().normalized();
            let mut i = 0usize;
            loop {
                let mut j = i + 1;
                let mut ptnext = Vector2::default();
                while j <= ilast {
                    ptnext = Vector2::from_point(contour[j]);
                    if (ptnext - pt).length_sqr() > l2min {
                        break;
                    }
                    j += 1;
                }
                if j > ilast {
                    // trailing edge too short, merge with the closing edge
                    i = ilast;
                    ptnext = pt0;
                }

                let nnext = (ptnext - pt).perp().normalized();
                let delta = deltas[i];
                let sin_a = nprev.cross(nnext).clamp(-1.0, 1.0);
                let convex = sin_a * delta;
                if convex <= -sin_min_parallel {
                    // concave corner
                    push(&mut out, pt + nprev * delta);
                    push(&mut out, pt);
                    push(&mut out, pt + nnext * delta);
                } else {
                    let dot = nprev.dot(nnext);
                    if convex < sin_min_parallel && dot > 0.0 {
                        // nearly parallel edges
                        push(&mut out, pt + nprev * delta);
                    } else {
                        // convex corner, possibly extremely sharp
                        let r = 1.0 + dot;
                        if r >= mlim {
                            push(&mut out, pt + (nprev + nnext) * (delta / r));
                        } else {
                            let dx = (sin_a.atan2(dot) / 4.0).tan();
                            push(&mut out, pt + (nprev - nprev.perp() * dx) * delta);
                            push(&mut out, pt + (nnext + nnext.perp() * dx) * delta);
                        }
                    }
                }

                if i == ilast {
                    break;
                }
                nprev = nnext;
                pt = ptnext;
                i = j;
            }
        }
    }

    Polygon::from_points(out)
}

/// Resolve a raw outward offset curve. Growing a ring never splits it, but
/// closing a C shape may add a hole inside the result.
pub fn fix_after_outer_offset(curve: &Polygon, fill_type: FillType) -> Polygons {
    if curve.points.is_empty() {
        Vec::new()
    } else {
        resolve_raw_curves(std::slice::from_ref(curve), fill_type)
    }
}

/// Resolve a raw inward offset curve, which may split the ring into pieces
/// or erase it entirely.
pub fn fix_after_inner_offset(curve: &Polygon, fill_type: FillType) -> Polygons {
    if curve.points.is_empty() {
        Vec::new()
    } else {
        resolve_raw_curves(std::slice::from_ref(curve), fill_type)
    }
}

#[cfg(debug_assertions)]
fn assert_deltas_shape(expoly: &ExPolygon, deltas: &[Vec<f64>], non_positive: bool) {
    debug_assert_eq!(deltas.len(), expoly.holes.len() + 1);
    for ds in deltas {
        for &d in ds {
            if non_positive {
                debug_assert!(d <= 0.0);
            } else {
                debug_assert!(d >= 0.0);
            }
        }
    }
    debug_assert!(expoly.contour.is_counter_clockwise());
    for hole in &expoly.holes {
        debug_assert!(hole.is_clockwise());
    }
}

fn variable_offset_inner_raw(
    expoly: &ExPolygon,
    deltas: &[Vec<f64>],
    miter_limit: f64,
) -> (Polygons, Polygons) {
    #[cfg(debug_assertions)]
    assert_deltas_shape(expoly, deltas, true);

    // shrink the outer contour; a counter clockwise curve resolves under
    // the Positive rule
    let contours = fix_after_inner_offset(
        &mittered_offset_path(&expoly.contour.points, &deltas[0], miter_limit),
        FillType::Positive,
    );

    // grow the holes one by one; clockwise curves resolve under the
    // Negative rule and come back as positive area regions
    let mut holes = Vec::with_capacity(expoly.holes.len());
    for (hole, ds) in expoly.holes.iter().zip(&deltas[1..]) {
        holes.extend(fix_after_outer_offset(
            &mittered_offset_path(&hole.points, ds, miter_limit),
            FillType::Negative,
        ));
    }
    (contours, holes)
}

fn variable_offset_outer_raw(
    expoly: &ExPolygon,
    deltas: &[Vec<f64>],
    miter_limit: f64,
) -> (Polygons, Polygons) {
    #[cfg(debug_assertions)]
    assert_deltas_shape(expoly, deltas, false);

    let contours = fix_after_outer_offset(
        &mittered_offset_path(&expoly.contour.points, &deltas[0], miter_limit),
        FillType::Positive,
    );

    let mut holes = Vec::with_capacity(expoly.holes.len());
    for (hole, ds) in expoly.holes.iter().zip(&deltas[1..]) {
        holes.extend(fix_after_inner_offset(
            &mittered_offset_path(&hole.points, ds, miter_limit),
            FillType::Negative,
        ));
    }
    // shrunk holes can degenerate into slivers, drop them
    holes.retain(|h| h.area2() >= 2 * SCALED_EPSILON_SQR);
    (contours, holes)
}

fn combine(contours: Polygons, holes: Polygons) -> Polygons {
    if holes.is_empty() {
        contours
    } else {
        // grown holes may intersect the contour or each other
        diff(&contours, &holes, ApplySafetyOffset::No)
    }
}

/// Inward variable offset (all distances non positive) of one region with
/// holes.
pub fn variable_offset_inner(
    expoly: &ExPolygon,
    deltas: &[Vec<f64>],
    miter_limit: f64,
) -> Polygons {
    let (contours, holes) = variable_offset_inner_raw(expoly, deltas, miter_limit);
    combine(contours, holes)
}

/// Outward variable offset (all distances non negative) of one region with
/// holes.
pub fn variable_offset_outer(
    expoly: &ExPolygon,
    deltas: &[Vec<f64>],
    miter_limit: f64,
) -> Polygons {
    let (contours, holes) = variable_offset_outer_raw(expoly, deltas, miter_limit);
    combine(contours, holes)
}

pub fn variable_offset_inner_ex(
    expoly: &ExPolygon,
    deltas: &[Vec<f64>],
    miter_limit: f64,
) -> ExPolygons {
    let (contours, holes) = variable_offset_inner_raw(expoly, deltas, miter_limit);
    if holes.is_empty() {
        // shrinking a counter clockwise contour may split it but never
        // creates new holes
        contours.into_iter().map(ExPolygon::new).collect()
    } else {
        diff_ex(&contours, &holes, ApplySafetyOffset::No)
    }
}

pub fn variable_offset_outer_ex(
    expoly: &ExPolygon,
    deltas: &[Vec<f64>],
    miter_limit: f64,
) -> ExPolygons {
    let (contours, holes) = variable_offset_outer_raw(expoly, deltas, miter_limit);
    if holes.is_empty() {
        // growing the contour of a C shape may close it into a ring with a
        // hole, so the result can carry more than one ring
        polytree_to_expolygons(PolyTree::from_paths(contours))
    } else {
        diff_ex(&contours, &holes, ApplySafetyOffset::No)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_deltas_match_plain_offset() {
        let square = polygon![(1000, 1000), (2000, 1000), (2000, 2000), (1000, 2000)];
        let curve = mittered_offset_path(&square.points, &[50.0; 4], 3.0);
        assert_eq!(curve.points.len(), 4);
        assert!(curve.points.contains(&Point::new(950, 950)));
        assert!(curve.points.contains(&Point::new(2050, 2050)));
    }

    #[test]
    fn per_vertex_deltas_move_vertices_independently() {
        let square = polygon![(0, 0), (10_000, 0), (10_000, 10_000), (0, 10_000)];
        // only the corners adjoining the bottom edge move outward
        let curve = mittered_offset_path(&square.points, &[1000.0, 1000.0, 0.0, 0.0], 3.0);
        assert!(curve.points.contains(&Point::new(-1000, -1000)));
        assert!(curve.points.contains(&Point::new(11_000, -1000)));
        assert!(curve.points.contains(&Point::new(10_000, 10_000)));
        assert!(curve.points.contains(&Point::new(0, 10_000)));
    }

    #[test]
    fn outer_offset_of_square_with_hole() {
        let expoly = ExPolygon {
            contour: polygon![(0, 0), (10_000, 0), (10_000, 10_000), (0, 10_000)],
            holes: vec![polygon![(4000, 4000), (4000, 6000), (6000, 6000), (6000, 4000)]],
        };
        let deltas = vec![vec![500.0; 4], vec![500.0; 4]];
        let out = variable_offset_outer_ex(&expoly, &deltas, 3.0);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].holes.len(), 1);
        // contour grows by 500 on each side, the hole shrinks by 500
        assert_fuzzy_eq!(out[0].contour.area(), 11_000.0 * 11_000.0, 16.0);
        assert_fuzzy_eq!(out[0].holes[0].area().abs(), 1000.0 * 1000.0, 16.0);
    }

    #[test]
    fn inner_offset_erasing_the_region_is_empty() {
        let expoly = ExPolygon {
            contour: polygon![(0, 0), (1000, 0), (1000, 1000), (0, 1000)],
            holes: Vec::new(),
        };
        let out = variable_offset_inner(&expoly, &[vec![-600.0; 4]], 3.0);
        assert!(out.is_empty());
    }
}
