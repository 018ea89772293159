//! Offsetting (inflating and deflating) of closed polygon regions.
//!
//! The raw curve generation lives in [`internal::raw_offset`]; the functions
//! here resolve those curves and recombine contours with holes. A positive
//! delta always grows the filled area and a negative delta shrinks it,
//! regardless of ring winding.
//!
//! Offsetting a region with holes keeps the contour and the holes apart:
//! the contour is offset by `delta`, each hole region by `-delta`, and the
//! two sets are recombined with a boolean difference only when a growing
//! hole could actually reach the contour.

pub mod internal;

pub use internal::raw_offset::{raw_offset, raw_offset_path, safety_offset, JoinType};
pub use internal::variable_offset::{
    fix_after_inner_offset, fix_after_outer_offset, mittered_offset_path, variable_offset_inner,
    variable_offset_inner_ex, variable_offset_outer, variable_offset_outer_ex,
};

use crate::clipper::{diff, union, union_ex, ApplySafetyOffset, FillType, PolyTree};
use crate::geometry::{ExPolygon, ExPolygons, Polygons, Surface};

use internal::raw_offset::resolve_raw_curves;

/// Grow every path of the provider by `delta` (positive) and union the
/// results.
pub fn expand<P: crate::clipper::PathProvider + ?Sized>(
    paths: &P,
    delta: f64,
    join_type: JoinType,
    miter_limit: f64,
) -> Polygons {
    debug_assert!(delta > 0.0);
    union(&raw_offset(paths, delta, join_type, miter_limit))
}

/// Shrink every path of the provider by `delta` (positive). Rings may
/// split or vanish.
pub fn shrink<P: crate::clipper::PathProvider + ?Sized>(
    paths: &P,
    delta: f64,
    join_type: JoinType,
    miter_limit: f64,
) -> Polygons {
    debug_assert!(delta > 0.0);
    resolve_raw_curves(
        &raw_offset(paths, -delta, join_type, miter_limit),
        FillType::Positive,
    )
}

/// Signed offset of a path set.
pub fn offset<P: crate::clipper::PathProvider + ?Sized>(
    paths: &P,
    delta: f64,
    join_type: JoinType,
    miter_limit: f64,
) -> Polygons {
    debug_assert!(delta != 0.0);
    if delta > 0.0 {
        expand(paths, delta, join_type, miter_limit)
    } else {
        shrink(paths, -delta, join_type, miter_limit)
    }
}

/// Signed offset of a path set with hole ownership resolved. The flat
/// result is already canonical, so only a containment pass is needed.
pub fn offset_ex<P: crate::clipper::PathProvider + ?Sized>(
    paths: &P,
    delta: f64,
    join_type: JoinType,
    miter_limit: f64,
) -> ExPolygons {
    crate::clipper::polytree_to_expolygons(PolyTree::from_paths(offset(
        paths, delta, join_type, miter_limit,
    )))
}

/// Offset one region with holes, appending the result to `out`. Returns 1
/// when anything was produced.
fn offset_expolygon_inner(
    expolygon: &ExPolygon,
    delta: f64,
    join_type: JoinType,
    miter_limit: f64,
    out: &mut Polygons,
) -> usize {
    let mut contours = resolve_raw_curves(
        &[raw_offset_path(
            &expolygon.contour.points,
            delta,
            join_type,
            miter_limit,
        )],
        FillType::Positive,
    );
    if contours.is_empty() {
        return 0;
    }

    let mut holes: Polygons = Vec::with_capacity(expolygon.holes.len());
    for hole in &expolygon.holes {
        let mut hole = hole.clone();
        hole.make_counter_clockwise();
        // the hole region moves opposite to the contour
        holes.extend(resolve_raw_curves(
            &[raw_offset_path(&hole.points, -delta, join_type, miter_limit)],
            FillType::Positive,
        ));
    }

    if holes.is_empty() {
        out.append(&mut contours);
    } else if delta < 0.0 {
        // grown holes may reach the shrunk contour
        let mut result = diff(&contours, &holes, ApplySafetyOffset::No);
        if result.is_empty() {
            return 0;
        }
        out.append(&mut result);
    } else {
        // shrunk holes stay strictly inside the grown contour
        out.append(&mut contours);
        for mut hole in holes {
            hole.reverse();
            out.push(hole);
        }
    }
    1
}

fn expolygons_offset_raw<'a, I>(
    expolygons: I,
    delta: f64,
    join_type: JoinType,
    miter_limit: f64,
) -> (Polygons, usize)
where
    I: IntoIterator<Item = &'a ExPolygon>,
{
    let mut out = Vec::new();
    let mut collected = 0;
    for expolygon in expolygons {
        collected += offset_expolygon_inner(expolygon, delta, join_type, miter_limit, &mut out);
    }
    (out, collected)
}

/// Offset one region with holes; the flat result is canonical.
pub fn offset_expolygon(
    expolygon: &ExPolygon,
    delta: f64,
    join_type: JoinType,
    miter_limit: f64,
) -> Polygons {
    let mut out = Vec::new();
    offset_expolygon_inner(expolygon, delta, join_type, miter_limit, &mut out);
    out
}

/// Offset a set of regions with holes. Outward offsets of more than one
/// source region may overlap and are unioned; anything else is returned as
/// collected.
pub fn offset_expolygons(
    expolygons: &[ExPolygon],
    delta: f64,
    join_type: JoinType,
    miter_limit: f64,
) -> Polygons {
    let (out, collected) = expolygons_offset_raw(expolygons, delta, join_type, miter_limit);
    if collected > 1 && delta > 0.0 {
        union(&out)
    } else {
        out
    }
}

pub fn offset_expolygons_ex(
    expolygons: &[ExPolygon],
    delta: f64,
    join_type: JoinType,
    miter_limit: f64,
) -> ExPolygons {
    let (out, _) = expolygons_offset_raw(expolygons, delta, join_type, miter_limit);
    union_ex(&out)
}

pub fn offset_surfaces(
    surfaces: &[Surface],
    delta: f64,
    join_type: JoinType,
    miter_limit: f64,
) -> Polygons {
    let (out, collected) = expolygons_offset_raw(
        surfaces.iter().map(|s| &s.expolygon),
        delta,
        join_type,
        miter_limit,
    );
    if collected > 1 && delta > 0.0 {
        union(&out)
    } else {
        out
    }
}

pub fn offset_surfaces_ex(
    surfaces: &[Surface],
    delta: f64,
    join_type: JoinType,
    miter_limit: f64,
) -> ExPolygons {
    let (out, _) = expolygons_offset_raw(
        surfaces.iter().map(|s| &s.expolygon),
        delta,
        join_type,
        miter_limit,
    );
    union_ex(&out)
}

/// Two offsets in sequence. With opposite signs this implements a
/// morphological closing or opening.
///
/// The input is restricted to regions with resolved hole ownership: the
/// first pass must move holes opposite to contours, which a flat polygon
/// set cannot express. Run the input through [`crate::clipper::union_ex`]
/// first if only loose polygons are at hand.
pub fn offset2(
    expolygons: &[ExPolygon],
    delta1: f64,
    delta2: f64,
    join_type: JoinType,
    miter_limit: f64,
) -> Polygons {
    offset(
        &offset_expolygons(expolygons, delta1, join_type, miter_limit),
        delta2,
        join_type,
        miter_limit,
    )
}

pub fn offset2_ex(
    expolygons: &[ExPolygon],
    delta1: f64,
    delta2: f64,
    join_type: JoinType,
    miter_limit: f64,
) -> ExPolygons {
    offset_ex(
        &offset_expolygons(expolygons, delta1, join_type, miter_limit),
        delta2,
        join_type,
        miter_limit,
    )
}

/// Grow then shrink, closing gaps narrower than `2 * delta1`. Input
/// restrictions as for [`offset2`].
pub fn closing(
    expolygons: &[ExPolygon],
    delta1: f64,
    delta2: f64,
    join_type: JoinType,
    miter_limit: f64,
) -> Polygons {
    debug_assert!(delta1 > 0.0);
    debug_assert!(delta2 > 0.0);
    offset2(expolygons, delta1, -delta2, join_type, miter_limit)
}

pub fn closing_ex(
    expolygons: &[ExPolygon],
    delta1: f64,
    delta2: f64,
    join_type: JoinType,
    miter_limit: f64,
) -> ExPolygons {
    debug_assert!(delta1 > 0.0);
    debug_assert!(delta2 > 0.0);
    offset2_ex(expolygons, delta1, -delta2, join_type, miter_limit)
}

/// Shrink then grow, removing features narrower than `2 * delta1`. Input
/// restrictions as for [`offset2`].
pub fn opening(
    expolygons: &[ExPolygon],
    delta1: f64,
    delta2: f64,
    join_type: JoinType,
    miter_limit: f64,
) -> Polygons {
    debug_assert!(delta1 > 0.0);
    debug_assert!(delta2 > 0.0);
    offset2(expolygons, -delta1, delta2, join_type, miter_limit)
}

pub fn opening_ex(
    expolygons: &[ExPolygon],
    delta1: f64,
    delta2: f64,
    join_type: JoinType,
    miter_limit: f64,
) -> ExPolygons {
    debug_assert!(delta1 > 0.0);
    debug_assert!(delta2 > 0.0);
    offset2_ex(expolygons, -delta1, delta2, join_type, miter_limit)
}
