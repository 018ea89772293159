//! Boolean operations over scaled integer polygons.
//!
//! All operations accept their operands through the [`PathProvider`] trait,
//! so polygons, regions with holes and surfaces can be mixed freely without
//! copying into a common container first. Flat operations return [`Polygons`]
//! with normalized winding (counter clockwise contours, clockwise holes);
//! the `_ex` variants return [`ExPolygons`] with the hole ownership resolved
//! through a region tree.
//!
//! The optional safety offset slightly inflates the clip operand before a
//! difference or intersection, healing sliver gaps between clip regions that
//! would otherwise survive as degenerate result polygons.

pub mod bbox_clip;
pub mod internal;
mod provider;

pub use provider::{EmptyPathProvider, PathProvider};

pub use bbox_clip::{
    clip_expolygon_with_bbox, clip_expolygons_with_bbox, clip_polygon_with_bbox,
    clip_polygons_with_bbox, clip_polyline_with_bbox, clip_zpolyline_with_bbox,
};
pub use internal::polytree::{
    polytree_to_expolygons, remove_small_areas, PolyNode, PolyTree,
};

use crate::core::math::{ZPoint, SCALED_EPSILON};
use crate::geometry::{
    get_extents, BoundingBox, ExPolygon, ExPolygons, Polygon, Polygons, Polyline, Polylines,
    ZPolyline, ZPolylines,
};
use internal::overlay::{overlay_paths, to_float_paths};
use internal::polyline_clip::{recombine, PolygonClipper};

/// Fill rule deciding which regions of a path set count as inside.
/// Winding is counted with counter clockwise rings positive, so
/// [`FillType::Positive`] keeps counter clockwise regions and
/// [`FillType::Negative`] keeps clockwise ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillType {
    EvenOdd,
    NonZero,
    Positive,
    Negative,
}

/// Boolean operation selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipType {
    Union,
    Difference,
    Intersection,
    Xor,
}

/// Whether to inflate the clip operand by a tiny amount before clipping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplySafetyOffset {
    No,
    Yes,
}

/// Run one boolean operation. The safety offset applies to the clip side
/// only and is not meaningful for unions.
pub fn clipper_do<S, C>(
    clip_type: ClipType,
    subject: &S,
    clip: &C,
    fill_type: FillType,
    do_safety_offset: ApplySafetyOffset,
) -> Polygons
where
    S: PathProvider + ?Sized,
    C: PathProvider + ?Sized,
{
    debug_assert!(do_safety_offset == ApplySafetyOffset::No || clip_type != ClipType::Union);
    let subject = to_float_paths(&subject);
    let clip = match do_safety_offset {
        ApplySafetyOffset::Yes => {
            let clip = crate::offset::internal::safety_offset(clip);
            to_float_paths(&clip)
        }
        ApplySafetyOffset::No => to_float_paths(&clip),
    };
    overlay_paths(&subject, clip, clip_type, fill_type)
}

/// Boolean operation producing a region nesting tree.
///
/// Runs in two passes: a flat overlay first (which handles heavily
/// overlapping input without the pathological cost of building the tree
/// directly), then small area removal and a containment pass over the
/// already resolved result.
pub fn clipper_do_polytree<S, C>(
    clip_type: ClipType,
    subject: &S,
    clip: &C,
    fill_type: FillType,
    do_safety_offset: ApplySafetyOffset,
) -> PolyTree
where
    S: PathProvider + ?Sized,
    C: PathProvider + ?Sized,
{
    let mut output = clipper_do(clip_type, subject, clip, fill_type, do_safety_offset);
    if output.is_empty() {
        return PolyTree::default();
    }
    remove_small_areas(&mut output);
    let mut tree = PolyTree::from_paths(output);
    if do_safety_offset == ApplySafetyOffset::Yes {
        // the inflation may have created tiny nodes of its own
        tree.remove_small_nodes();
    }
    tree
}

pub fn diff<S, C>(subject: &S, clip: &C, do_safety_offset: ApplySafetyOffset) -> Polygons
where
    S: PathProvider + ?Sized,
    C: PathProvider + ?Sized,
{
    clipper_do(
        ClipType::Difference,
        subject,
        clip,
        FillType::NonZero,
        do_safety_offset,
    )
}

pub fn intersection<S, C>(subject: &S, clip: &C, do_safety_offset: ApplySafetyOffset) -> Polygons
where
    S: PathProvider + ?Sized,
    C: PathProvider + ?Sized,
{
    clipper_do(
        ClipType::Intersection,
        subject,
        clip,
        FillType::NonZero,
        do_safety_offset,
    )
}

pub fn diff_ex<S, C>(subject: &S, clip: &C, do_safety_offset: ApplySafetyOffset) -> ExPolygons
where
    S: PathProvider + ?Sized,
    C: PathProvider + ?Sized,
{
    polytree_to_expolygons(clipper_do_polytree(
        ClipType::Difference,
        subject,
        clip,
        FillType::NonZero,
        do_safety_offset,
    ))
}

pub fn intersection_ex<S, C>(
    subject: &S,
    clip: &C,
    do_safety_offset: ApplySafetyOffset,
) -> ExPolygons
where
    S: PathProvider + ?Sized,
    C: PathProvider + ?Sized,
{
    polytree_to_expolygons(clipper_do_polytree(
        ClipType::Intersection,
        subject,
        clip,
        FillType::NonZero,
        do_safety_offset,
    ))
}

/// Difference with the clip set first restricted to the subject's bounding
/// box. Cheap when the clip set is much larger than the subject.
pub fn diff_clipped(
    subject: &[Polygon],
    clip: &[Polygon],
    do_safety_offset: ApplySafetyOffset,
) -> Polygons {
    if subject.is_empty() {
        return Vec::new();
    }
    let bbox = get_extents(subject).inflated(SCALED_EPSILON);
    diff(
        subject,
        &clip_polygons_with_bbox(clip, &bbox),
        do_safety_offset,
    )
}

/// Intersection with the clip set first restricted to the subject's bounding
/// box.
pub fn intersection_clipped(
    subject: &[Polygon],
    clip: &[Polygon],
    do_safety_offset: ApplySafetyOffset,
) -> Polygons {
    if subject.is_empty() {
        return Vec::new();
    }
    let bbox = get_extents(subject).inflated(SCALED_EPSILON);
    intersection(
        subject,
        &clip_polygons_with_bbox(clip, &bbox),
        do_safety_offset,
    )
}

/// Union of one path set under the NonZero fill rule.
pub fn union<P: PathProvider + ?Sized>(subject: &P) -> Polygons {
    clipper_do(
        ClipType::Union,
        subject,
        &EmptyPathProvider,
        FillType::NonZero,
        ApplySafetyOffset::No,
    )
}

/// Union of one path set under an explicit fill rule.
pub fn union_fill<P: PathProvider + ?Sized>(subject: &P, fill_type: FillType) -> Polygons {
    clipper_do(
        ClipType::Union,
        subject,
        &EmptyPathProvider,
        fill_type,
        ApplySafetyOffset::No,
    )
}

/// Union of two path sets under the NonZero fill rule.
pub fn union_with<S, C>(subject: &S, subject2: &C) -> Polygons
where
    S: PathProvider + ?Sized,
    C: PathProvider + ?Sized,
{
    clipper_do(
        ClipType::Union,
        subject,
        subject2,
        FillType::NonZero,
        ApplySafetyOffset::No,
    )
}

/// Binary union that hands back one operand untouched when the other is
/// empty.
pub fn union_owned(subject: Polygons, subject2: Polygons) -> Polygons {
    if subject.is_empty() {
        subject2
    } else if subject2.is_empty() {
        subject
    } else {
        union_with(&subject, &subject2)
    }
}

pub fn union_ex<P: PathProvider + ?Sized>(subject: &P) -> ExPolygons {
    polytree_to_expolygons(clipper_do_polytree(
        ClipType::Union,
        subject,
        &EmptyPathProvider,
        FillType::NonZero,
        ApplySafetyOffset::No,
    ))
}

pub fn union_ex_fill<P: PathProvider + ?Sized>(subject: &P, fill_type: FillType) -> ExPolygons {
    polytree_to_expolygons(clipper_do_polytree(
        ClipType::Union,
        subject,
        &EmptyPathProvider,
        fill_type,
        ApplySafetyOffset::No,
    ))
}

pub fn union_ex_with<S, C>(subject: &S, subject2: &C) -> ExPolygons
where
    S: PathProvider + ?Sized,
    C: PathProvider + ?Sized,
{
    polytree_to_expolygons(clipper_do_polytree(
        ClipType::Union,
        subject,
        subject2,
        FillType::NonZero,
        ApplySafetyOffset::No,
    ))
}

/// Union of a path set after inflating every path by the safety offset,
/// healing sliver gaps between nearly touching regions.
pub fn union_safety_offset<P: PathProvider + ?Sized>(subject: &P) -> Polygons {
    union(&crate::offset::internal::safety_offset(subject))
}

pub fn union_safety_offset_ex<P: PathProvider + ?Sized>(subject: &P) -> ExPolygons {
    union_ex(&crate::offset::internal::safety_offset(subject))
}

/// Region nesting tree of an already canonical path set, built by
/// containment only. Non intersecting contours keep their winding as given.
pub fn union_pt<P: PathProvider + ?Sized>(subject: &P) -> PolyTree {
    let paths: Polygons = subject
        .paths()
        .map(|p| Polygon::from_points(p.to_vec()))
        .collect();
    PolyTree::from_paths(paths)
}

/// Resolve self intersections and reduce each polygon to a strictly simple
/// one by a NonZero union.
pub fn simplify_polygons(subject: &[Polygon]) -> Polygons {
    union(subject)
}

/// [`simplify_polygons`] with hole ownership resolved.
pub fn simplify_polygons_ex(subject: &[Polygon]) -> ExPolygons {
    union_ex(subject)
}

/// Outermost contours of the union of `polygons` under the EvenOdd rule;
/// holes and nested islands are dropped.
pub fn top_level_islands(polygons: &[Polygon]) -> Polygons {
    let tree = clipper_do_polytree(
        ClipType::Union,
        polygons,
        &EmptyPathProvider,
        FillType::EvenOdd,
        ApplySafetyOffset::No,
    );
    tree.roots()
        .iter()
        .map(|&i| tree.node(i).contour.clone())
        .collect()
}

/// Clip each region against the box; members the box leaves untouched are
/// passed through, and a member is re-unioned only when one of its holes
/// actually changed.
pub fn clip_expolygons_with_bbox_ex(src: &[ExPolygon], bbox: &BoundingBox) -> ExPolygons {
    let mut out: ExPolygons = Vec::with_capacity(src.len());
    for ex in src {
        let contour = clip_polygon_with_bbox(&ex.contour, bbox);
        if contour.points.is_empty() {
            continue;
        }
        if contour.points.len() == ex.contour.points.len() && ex.holes.is_empty() {
            out.push(ex.clone());
            continue;
        }
        let mut temp: Polygons = Vec::with_capacity(1 + ex.holes.len());
        temp.push(contour);
        let mut need_union = false;
        for hole in &ex.holes {
            let clipped = clip_polygon_with_bbox(hole, bbox);
            if clipped.points.is_empty() {
                continue;
            }
            if clipped.points.len() != hole.points.len() {
                need_union = true;
            }
            temp.push(clipped);
        }
        if need_union {
            out.append(&mut union_ex(&temp));
        } else {
            let mut holes = temp.split_off(1);
            for hole in &mut holes {
                hole.make_clockwise();
            }
            out.push(ExPolygon {
                contour: temp.pop().unwrap_or_default(),
                holes,
            });
        }
    }
    out
}

fn clip_polygons_of<C: PathProvider + ?Sized>(clip: &C) -> Polygons {
    clip.paths()
        .map(|p| Polygon::from_points(p.to_vec()))
        .collect()
}

/// Clip tagged open polylines against a polygon set, keeping the inside
/// (intersection) or outside (difference) runs. Tags at cut points are
/// interpolated along the cut segment.
pub fn clip_zpolylines(
    clip_type: ClipType,
    subject: &[ZPolyline],
    clip: &[Polygon],
) -> ZPolylines {
    debug_assert!(matches!(
        clip_type,
        ClipType::Difference | ClipType::Intersection
    ));
    let keep_inside = clip_type == ClipType::Intersection;
    let clipper = PolygonClipper::new(clip.to_vec());
    let mut out = Vec::new();
    if clipper.is_empty() {
        if !keep_inside {
            out.extend(subject.iter().cloned());
        }
        return out;
    }
    for pl in subject {
        clipper.clip_zpolyline(pl, keep_inside, &mut out);
    }
    out
}

fn clip_polylines<C: PathProvider + ?Sized>(
    subject: &[Polyline],
    clip: &C,
    keep_inside: bool,
) -> Polylines {
    let clipper = PolygonClipper::new(clip_polygons_of(clip));
    if clipper.is_empty() {
        return if keep_inside {
            Vec::new()
        } else {
            subject.to_vec()
        };
    }
    let mut out_z: ZPolylines = Vec::new();
    for pl in subject {
        clipper.clip_zpolyline(&ZPolyline::from_polyline(pl, 0), keep_inside, &mut out_z);
    }
    out_z.into_iter().map(|z| z.to_polyline()).collect()
}

/// Parts of the open polylines outside the clip polygons.
pub fn diff_pl<C: PathProvider + ?Sized>(subject: &[Polyline], clip: &C) -> Polylines {
    clip_polylines(subject, clip, false)
}

/// Parts of the open polylines inside the clip polygons.
pub fn intersection_pl<C: PathProvider + ?Sized>(subject: &[Polyline], clip: &C) -> Polylines {
    clip_polylines(subject, clip, true)
}

fn clip_closed_polylines<C: PathProvider + ?Sized>(
    subject: &[Polygon],
    clip: &C,
    keep_inside: bool,
) -> Polylines {
    // treat each polygon boundary as an open path with the seam vertex
    // duplicated, then stitch the pieces that meet at the seam back together
    let clipper = PolygonClipper::new(clip_polygons_of(clip));
    let mut out_z: ZPolylines = Vec::new();
    if clipper.is_empty() {
        if !keep_inside {
            for poly in subject {
                let mut points: Vec<ZPoint> = poly
                    .points
                    .iter()
                    .map(|&p| ZPoint::from_point(p, 0))
                    .collect();
                if let Some(&first) = points.first() {
                    points.push(first);
                }
                out_z.push(ZPolyline::from_points(points));
            }
        }
    } else {
        for poly in subject {
            let mut points: Vec<ZPoint> = poly
                .points
                .iter()
                .map(|&p| ZPoint::from_point(p, 0))
                .collect();
            if let Some(&first) = points.first() {
                points.push(first);
            }
            clipper.clip_zpolyline(&ZPolyline::from_points(points), keep_inside, &mut out_z);
        }
        recombine(&mut out_z);
    }
    out_z.into_iter().map(|z| z.to_polyline()).collect()
}

/// Boundary parts of the closed subject polygons outside the clip polygons.
pub fn diff_pl_closed<C: PathProvider + ?Sized>(subject: &[Polygon], clip: &C) -> Polylines {
    clip_closed_polylines(subject, clip, false)
}

/// Boundary parts of the closed subject polygons inside the clip polygons.
pub fn intersection_pl_closed<C: PathProvider + ?Sized>(
    subject: &[Polygon],
    clip: &C,
) -> Polylines {
    clip_closed_polylines(subject, clip, true)
}
