//! Raw offset curve generation for closed paths.
//!
//! [`raw_offset_path`] emits the unresolved offset curve of one ring: every
//! vertex is pushed along its adjoining edge normals with the join type
//! deciding how the gap at a convex corner is covered. The curve self
//! intersects at concave corners by construction; callers resolve it with a
//! winding based union (see [`resolve_raw_curves`]) or feed it straight into
//! a boolean operation whose fill rule absorbs the loops.

use std::f64::consts::PI;

use crate::clipper::internal::overlay::{resolve_paths, to_float_paths};
use crate::clipper::{FillType, PathProvider};
use crate::core::math::{
    Point, Vector2, CLIPPER_SAFETY_OFFSET, DEFAULT_MITER_LIMIT, OFFSET_SHORTEST_EDGE_FACTOR,
};
use crate::geometry::{Polygon, Polygons};

/// How the offset curve covers the gap outside a convex corner.
///
/// For [`JoinType::Round`] the miter limit parameter is reused as the arc
/// approximation tolerance in scaled units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JoinType {
    Square,
    Round,
    Miter,
}

/// Two edges closer to parallel than this (in scaled units of sideways
/// deviation per unit delta) collapse to a single offset point.
const SIN_MIN_PARALLEL: f64 = 1.0;

#[inline]
fn signed_area2(points: &[Point]) -> i128 {
    let mut area2: i128 = 0;
    let mut prev = points[points.len() - 1];
    for &p in points {
        area2 += prev.x as i128 * p.y as i128 - p.x as i128 * prev.y as i128;
        prev = p;
    }
    area2
}

#[inline]
fn push_pt(out: &mut Vec<Point>, p: Vector2) {
    out.push(Point::from_f64(p.x, p.y));
}

/// Steps per radian for round joins, derived from the arc tolerance the way
/// the offset engine convention defines it.
fn arc_steps_per_radian(abs_delta: f64, arc_tolerance: f64) -> f64 {
    let tol = if arc_tolerance <= 0.0 {
        0.25
    } else {
        arc_tolerance.min(abs_delta * 0.25)
    };
    let steps = (PI / (1.0 - tol / abs_delta).acos()).min(abs_delta * PI);
    steps / (2.0 * PI)
}

/// Two point bevel from the quarter angle tangent, covering a corner too
/// sharp to miter.
fn square_join(out: &mut Vec<Point>, pt: Vector2, nprev: Vector2, nnext: Vector2, sin_a: f64, dot: f64, delta: f64) {
    let dx = (sin_a.atan2(dot) / 4.0).tan();
    push_pt(out, pt + (nprev - nprev.perp() * dx) * delta);
    push_pt(out, pt + (nnext + nnext.perp() * dx) * delta);
}

/// Arc of offset points rotating the normal from `nprev` to `nnext`.
fn round_join(
    out: &mut Vec<Point>,
    pt: Vector2,
    nprev: Vector2,
    nnext: Vector2,
    sin_a: f64,
    dot: f64,
    delta: f64,
    steps_per_rad: f64,
) {
    let a = sin_a.atan2(dot);
    let steps = ((steps_per_rad * a.abs()).round() as usize).max(1);
    let (s, c) = (a / steps as f64).sin_cos();
    let mut n = nprev;
    for _ in 0..steps {
        push_pt(out, pt + n * delta);
        n = Vector2::new(n.x * c - n.y * s, n.x * s + n.y * c);
    }
    push_pt(out, pt + nnext * delta);
}

/// Unresolved offset curve of one closed ring.
///
/// Clockwise rings are offset as reversed counter clockwise rings with a
/// flipped sign and the result reversed back, so a positive delta always
/// grows the filled area regardless of the ring's winding. Edges shorter
/// than `|delta| * OFFSET_SHORTEST_EDGE_FACTOR` are merged with their
/// neighbor before the corner is processed.
pub fn raw_offset_path(points: &[Point], delta: f64, join_type: JoinType, miter_limit: f64) -> Polygon {
    if points.len() < 3 {
        return Polygon::new();
    }
    if delta == 0.0 {
        return Polygon::from_points(points.to_vec());
    }
    if signed_area2(points) < 0 {
        let mut reversed = points.to_vec();
        reversed.reverse();
        let mut out = raw_offset_path(&reversed, -delta, join_type, miter_limit);
        out.reverse();
        return out;
    }

    let mlim = if miter_limit > 2.0 {
        2.0 / (miter_limit * miter_limit)
    } else {
        0.5
    };
    let abs_delta = delta.abs();
    let steps_per_rad = arc_steps_per_radian(abs_delta, miter_limit);
    let lmin = abs_delta * OFFSET_SHORTEST_EDGE_FACTOR;
    let l2min = lmin * lmin;

    let mut out: Vec<Point> = Vec::with_capacity(points.len() * 2);

    // find the last point further from the first one than the merge threshold
    let pt0 = Vector2::from_point(points[0]);
    let mut pt = pt0;
    let mut iprev = points.len() - 1;
    let mut ptprev = Vector2::default();
    while iprev > 0 {
        ptprev = Vector2::from_point(points[iprev]);
        if (ptprev - pt).length_sqr() > l2min {
            break;
        }
        iprev -= 1;
    }
    if iprev == 0 {
        // the whole ring collapses under the merge threshold
        return Polygon::new();
    }

    let ilast = iprev;
    let mut nprev = (pt - ptprev).perp().normalized();
    let mut i = 0usize;
    loop {
        // find the next point further from pt than the merge threshold
        let mut j = i + 1;
        let mut ptnext = Vector2::default();
        while j <= ilast {
            ptnext = Vector2::from_point(points[j]);
            if (ptnext - pt).length_sqr() > l2min {
                break;
            }
            j += 1;
        }
        if j > ilast {
            // the trailing edge is too short, merge it with the closing edge
            i = ilast;
            ptnext = pt0;
        }

        let nnext = (ptnext - pt).perp().normalized();
        let sin_a = nprev.cross(nnext).clamp(-1.0, 1.0);
        let convex = sin_a * delta;
        if convex <= -SIN_MIN_PARALLEL {
            // concave corner, cover it with a loop through the vertex itself
            push_pt(&mut out, pt + nprev * delta);
            push_pt(&mut out, pt);
            push_pt(&mut out, pt + nnext * delta);
        } else {
            let dot = nprev.dot(nnext);
            if convex < SIN_MIN_PARALLEL && dot > 0.0 {
                // nearly parallel edges
                push_pt(&mut out, pt + nprev * delta);
            } else {
                match join_type {
                    JoinType::Miter => {
                        let r = 1.0 + dot;
                        if r >= mlim {
                            push_pt(&mut out, pt + (nprev + nnext) * (delta / r));
                        } else {
                            square_join(&mut out, pt, nprev, nnext, sin_a, dot, delta);
                        }
                    }
                    JoinType::Square => {
                        square_join(&mut out, pt, nprev, nnext, sin_a, dot, delta)
                    }
                    JoinType::Round => round_join(
                        &mut out,
                        pt,
                        nprev,
                        nnext,
                        sin_a,
                        dot,
                        delta,
                        steps_per_rad,
                    ),
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

    Polygon::from_points(out)
}

/// Unresolved offset curves of every ring of a provider. Degenerate rings
/// are dropped.
pub fn raw_offset<P: PathProvider + ?Sized>(
    paths: &P,
    delta: f64,
    join_type: JoinType,
    miter_limit: f64,
) -> Polygons {
    let mut out = Vec::with_capacity(paths.path_count());
    for path in paths.paths() {
        let curve = raw_offset_path(path, delta, join_type, miter_limit);
        if curve.points.len() >= 3 {
            out.push(curve);
        }
    }
    out
}

/// Resolve raw offset curves into canonical polygons. Counter clockwise
/// curves resolve under the Positive rule, clockwise (hole) curves under the
/// Negative rule; the corner loops of the raw curve wind the wrong way and
/// drop out.
pub fn resolve_raw_curves(raw: &[Polygon], fill_type: FillType) -> Polygons {
    if raw.is_empty() {
        return Vec::new();
    }
    resolve_paths(&to_float_paths(&raw), fill_type)
}

/// Tiny outward offset used to heal sliver gaps between clip regions before
/// a boolean operation. Returns the unresolved curves; the following
/// operation's fill rule absorbs the corner loops.
pub fn safety_offset<P: PathProvider + ?Sized>(paths: &P) -> Polygons {
    raw_offset(
        paths,
        CLIPPER_SAFETY_OFFSET,
        JoinType::Miter,
        DEFAULT_MITER_LIMIT,
    )
}
