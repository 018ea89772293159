//! Bounding box polygon clipper.
//!
//! Restricts a polygon's boundary to an axis aligned box, projecting the
//! parts outside the box onto the box perimeter instead of deleting them, so
//! the output stays a simple closed polygon enclosing the true intersection
//! with the box. Used as a cheap pre-filter to bound the cost of a full
//! boolean operation when the clip set is large (see
//! [`diff_clipped`](crate::clipper::diff_clipped)).
//!
//! The walk tracks which box side the path is conceptually sliding along
//! while outside the box (a bitmask per side), emitting box corners whenever
//! that side changes. Afterwards, vertices lying exactly on the box boundary
//! are nudged slightly outward, in the direction consistent with the
//! polygon's winding, so a later boolean operation never sees a result edge
//! exactly coincident with the clip box edge.

use crate::core::math::{Coord, Point, SCALED_EPSILON, SCALED_EPSILON_SQR};
use crate::geometry::{BoundingBox, ExPolygon, Polygon, Polygons, Polyline, ZPolyline};

const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const TOP: u8 = 4;
const BOTTOM: u8 = 8;

/// Sides of the box strictly violated by a point; a point exactly on an edge
/// counts as inside.
fn sides(bbox: &BoundingBox, p: Point) -> u8 {
    (u8::from(p.x < bbox.min.x) * LEFT)
        | (u8::from(p.x > bbox.max.x) * RIGHT)
        | (u8::from(p.y > bbox.max.y) * TOP)
        | (u8::from(p.y < bbox.min.y) * BOTTOM)
}

/// Sides of the box a point lies on or beyond (inclusive comparisons).
fn bb_sides(bbox: &BoundingBox, p: Point) -> u8 {
    (u8::from(p.x <= bbox.min.x) * LEFT)
        | (u8::from(p.x >= bbox.max.x) * RIGHT)
        | (u8::from(p.y >= bbox.max.y) * TOP)
        | (u8::from(p.y <= bbox.min.y) * BOTTOM)
}

#[inline]
fn count_sides(mask: u8) -> u32 {
    mask.count_ones()
}

/// True when the point lies on one of the box edge lines (it may still be
/// outside the box along the other axis).
fn on_bbox_line(bbox: &BoundingBox, p: Point) -> bool {
    p.x == bbox.min.x || p.x == bbox.max.x || p.y == bbox.min.y || p.y == bbox.max.y
}

/// The two sides on the perpendicular axis of a single side.
fn perpendicular_sides(side: u8) -> u8 {
    match side {
        LEFT | RIGHT => TOP | BOTTOM,
        TOP | BOTTOM => LEFT | RIGHT,
        _ => 0,
    }
}

/// Box corner for a two side combination; `None` for masks that do not name
/// a corner.
fn corner(bbox: &BoundingBox, mask: u8) -> Option<Point> {
    match mask {
        m if m == LEFT | TOP => Some(Point::new(bbox.min.x, bbox.max.y)),
        m if m == LEFT | BOTTOM => Some(bbox.min),
        m if m == RIGHT | TOP => Some(bbox.max),
        m if m == RIGHT | BOTTOM => Some(Point::new(bbox.max.x, bbox.min.y)),
        _ => None,
    }
}

/// Integer division rounding half away from zero.
#[inline]
fn div_round(n: i128, d: i128) -> i128 {
    debug_assert!(d != 0);
    let q = n / d;
    let r = n % d;
    if 2 * r.abs() >= d.abs() {
        q + if (n < 0) == (d < 0) { 1 } else { -1 }
    } else {
        q
    }
}

/// All distinct intersection points of segment `a -> b` with the box
/// boundary, snapped exactly onto the crossed box edge line and ordered by
/// distance from `a`.
fn boundary_intersections(bbox: &BoundingBox, a: Point, b: Point) -> Vec<Point> {
    let mut out: Vec<Point> = Vec::with_capacity(2);
    let dx = (b.x - a.x) as i128;
    let dy = (b.y - a.y) as i128;

    let mut push = |p: Point| {
        if !out.contains(&p) {
            out.push(p);
        }
    };

    // vertical box edges x = min.x / max.x
    if dx != 0 {
        for x in [bbox.min.x, bbox.max.x] {
            let within = (a.x <= x && x <= b.x) || (b.x <= x && x <= a.x);
            if within {
                let y = a.y as i128 + div_round((x - a.x) as i128 * dy, dx);
                if y >= bbox.min.y as i128 && y <= bbox.max.y as i128 {
                    push(Point::new(x, y as Coord));
                }
            }
        }
    }
    // horizontal box edges y = min.y / max.y
    if dy != 0 {
        for y in [bbox.min.y, bbox.max.y] {
            let within = (a.y <= y && y <= b.y) || (b.y <= y && y <= a.y);
            if within {
                let x = a.x as i128 + div_round((y - a.y) as i128 * dx, dy);
                if x >= bbox.min.x as i128 && x <= bbox.max.x as i128 {
                    push(Point::new(x as Coord, y));
                }
            }
        }
    }

    out.sort_by_key(|p| a.distance_sqr(*p));
    out
}

/// When switching box side while outside, emit (or collapse) the corner
/// between the old and new side. Emitting the same corner twice in a row is
/// a 180 degree turn back along the perimeter and cancels out.
fn add_corner(out: &mut Vec<Point>, bb_path: &mut Vec<u8>, pt_corner: Point, new_side: u8) {
    if !out.is_empty() && *out.last().unwrap() == pt_corner {
        if bb_path.len() > 1 && bb_path[bb_path.len() - 2] == new_side {
            out.pop();
            bb_path.pop();
        } else {
            if bb_path.len() == 1 {
                bb_path.clear();
            }
            bb_path.push(new_side);
        }
    } else {
        out.push(pt_corner);
        bb_path.push(new_side);
    }
}

/// Clip `src` to the box. Returns the empty polygon when the two do not
/// overlap, the box itself (matching `src`'s winding) when the box lies
/// wholly inside `src`, and falls back to returning `src` unclipped if the
/// walk ever loses consistency.
pub fn clip_polygon_with_bbox(src: &Polygon, bbox: &BoundingBox) -> Polygon {
    let cnt = src.points.len();
    if cnt < 3 {
        return Polygon::new();
    }
    let pts = &src.points;

    let mut out: Vec<Point> = Vec::new();
    // box side(s) the path is currently sliding along while outside
    let mut bb_path: Vec<u8> = Vec::new();
    let mut side_start: u8 = 0;
    let mut prev_i = usize::MAX;
    let mut i_end = usize::MAX;

    for (i, &p) in pts.iter().enumerate() {
        if sides(bbox, p) == 0 {
            i_end = cnt + i + 1;
            prev_i = i;
            break;
        }
    }
    if i_end == usize::MAX {
        // every vertex is outside the box
        let bb_src = src.bounding_box();
        if !bb_src.overlaps(bbox) {
            return Polygon::new();
        }
        // probe the edges for a crossing to start from
        let mut pi = cnt - 1;
        for i in 0..cnt {
            let intersections = boundary_intersections(bbox, pts[pi], pts[i]);
            if intersections.len() == 2 {
                // entering then leaving the box on one edge
                let front = intersections[0];
                let back = intersections[1];
                out.push(front);
                side_start = bb_sides(bbox, front);
                out.push(back);
                let mut side = bb_sides(bbox, back);
                if count_sides(side) == 2 {
                    // left through a corner, pick the meaningful side
                    let front_side = bb_sides(bbox, front);
                    if (front_side & side) != 0 {
                        side &= !front_side;
                    } else if count_sides(front_side) == 1 {
                        side &= !perpendicular_sides(front_side);
                    } else {
                        side &= TOP | BOTTOM;
                    }
                }
                bb_path.push(side);
                i_end = cnt + i;
                prev_i = i;
                break;
            }
            pi = i;
        }
        if i_end == usize::MAX {
            // no crossing; the box is either fully inside or fully outside
            return if src.contains_point(bbox.min) {
                let mut bb_poly = bbox.polygon();
                if src.is_clockwise() {
                    bb_poly.reverse();
                }
                bb_poly
            } else {
                Polygon::new()
            };
        }
    }

    for i_rollover in (prev_i + 1)..i_end {
        let i = i_rollover % cnt;
        let sides_this = sides(bbox, pts[i]);
        if sides_this == 0 {
            // point inside; first close off any trip outside the box
            if !bb_path.is_empty() && sides(bbox, pts[prev_i]) != 0 {
                let mut pt_in_bb: Option<Point> = None;
                if on_bbox_line(bbox, pts[i]) {
                    // entering through a point on the boundary; check whether
                    // the edge also crossed the boundary somewhere else
                    let intersections = boundary_intersections(bbox, pts[prev_i], pts[i]);
                    if intersections.len() == 2 {
                        pt_in_bb = Some(if intersections[0] == pts[i] {
                            intersections[1]
                        } else {
                            intersections[0]
                        });
                    } else if intersections.len() == 1 && intersections[0] != pts[i] {
                        // edge runs along a box side, the crossing is a corner
                        if out.last() != Some(&intersections[0]) {
                            out.push(intersections[0]);
                        }
                    }
                } else {
                    pt_in_bb = boundary_intersections(bbox, pts[prev_i], pts[i])
                        .first()
                        .copied();
                }
                if let Some(pt_in_bb) = pt_in_bb {
                    let intersect_side = bb_sides(bbox, pt_in_bb);
                    let last_side = *bb_path.last().unwrap();
                    if intersect_side != last_side && count_sides(intersect_side) == 1 {
                        if (perpendicular_sides(last_side) & intersect_side) == 0 {
                            return src.clone();
                        }
                        let pt_corner = match corner(bbox, intersect_side | last_side) {
                            Some(c) => c,
                            None => return src.clone(),
                        };
                        if out.last() == Some(&pt_corner) {
                            out.pop();
                        } else {
                            out.push(pt_corner);
                        }
                    }
                    if out.last() != Some(&pt_in_bb) {
                        out.push(pt_in_bb);
                    }
                }
                bb_path.clear();
            }
            if out.last() != Some(&pts[i]) {
                out.push(pts[i]);
            }
        } else if bb_path.is_empty() {
            // leaving the box; record the crossing point and the side we
            // start sliding along
            let intersections = boundary_intersections(bbox, pts[prev_i], pts[i]);
            match intersections.len() {
                1 => {
                    let front = intersections[0];
                    if on_bbox_line(bbox, pts[prev_i]) {
                        // previous point sat on the boundary; no new point
                        let mut side = bb_sides(bbox, pts[prev_i]) & bb_sides(bbox, pts[i]);
                        if count_sides(side) == 2 {
                            side &= TOP | BOTTOM;
                        }
                        bb_path.push(side);
                    } else {
                        if out.last() != Some(&front) {
                            out.push(front);
                        }
                        let mut side = sides_this & bb_sides(bbox, front);
                        if count_sides(side) == 2 {
                            side &= TOP | BOTTOM;
                        }
                        bb_path.push(side);
                    }
                }
                2 => {
                    // previous point on the boundary, exit through the far
                    // crossing
                    let front_is_prev = intersections[0] == pts[prev_i];
                    let pt = if front_is_prev {
                        intersections[1]
                    } else {
                        intersections[0]
                    };
                    let pt_sides = bb_sides(bbox, pt);
                    if out.last() != Some(&pt) {
                        out.push(pt);
                    }
                    let side = if count_sides(pt_sides) == 1 {
                        pt_sides
                    } else if count_sides(sides_this) == 1 {
                        pt_sides & perpendicular_sides(sides_this)
                    } else {
                        pt_sides & (TOP | BOTTOM)
                    };
                    bb_path.push(side);
                }
                _ => return src.clone(),
            }
        } else if (sides_this & *bb_path.last().unwrap()) != 0 {
            // still sliding along the same side
        } else {
            let intersections = boundary_intersections(bbox, pts[prev_i], pts[i]);
            if !intersections.is_empty() {
                // the edge dives back through (or touches) the box
                let front = intersections[0];
                let back = *intersections.last().unwrap();
                let previous_side = *bb_path.last().unwrap();
                let front_sides = bb_sides(bbox, front);
                if (previous_side & front_sides) == 0 {
                    let pt_corner = match corner(bbox, front_sides | previous_side) {
                        Some(c) => c,
                        None => return src.clone(),
                    };
                    add_corner(&mut out, &mut bb_path, pt_corner, front_sides);
                }
                if out.last() != Some(&front) {
                    out.push(front);
                }
                bb_path.clear();
                if out.last() != Some(&back) {
                    out.push(back);
                }
                let mut side = bb_sides(bbox, back);
                if count_sides(side) == 2 {
                    // left through a corner
                    let front_side = bb_sides(bbox, front);
                    if count_sides(front_side) != 2 {
                        if (front_side & side) != 0 {
                            side &= !front_side;
                        } else if count_sides(front_side) == 1 {
                            side &= !perpendicular_sides(front_side);
                        } else {
                            side = 0x0f & !(previous_side | perpendicular_sides(previous_side));
                        }
                    } else if (previous_side & (LEFT | RIGHT)) == 0 {
                        side &= LEFT | RIGHT;
                    } else {
                        side &= TOP | BOTTOM;
                    }
                }
                bb_path.push(side);
            } else {
                // switching sides around the outside; emit the corner(s)
                let last_side = *bb_path.last().unwrap();
                let mut this_single_side = sides_this & perpendicular_sides(last_side);
                if this_single_side == 0 {
                    // jumped from a corner region to the opposite side
                    let prev_sides = sides(bbox, pts[prev_i]);
                    let pt_corner = match corner(bbox, prev_sides) {
                        Some(c) => c,
                        None => return src.clone(),
                    };
                    let first_single_side = prev_sides & perpendicular_sides(sides_this);
                    add_corner(&mut out, &mut bb_path, pt_corner, first_single_side);
                    this_single_side = sides_this;
                }
                let last_side = *bb_path.last().unwrap();
                let pt_corner = match corner(bbox, this_single_side | last_side) {
                    Some(c) => c,
                    None => return src.clone(),
                };
                add_corner(&mut out, &mut bb_path, pt_corner, this_single_side);
            }
        }
        prev_i = i;
    }

    if side_start > 0 && !bb_path.is_empty() && (*bb_path.last().unwrap() & side_start) == 0 {
        // close the loop back to the side the walk entered on
        let pt_corner = match corner(bbox, side_start | *bb_path.last().unwrap()) {
            Some(c) => c,
            None => return src.clone(),
        };
        add_corner(&mut out, &mut bb_path, pt_corner, side_start);
    }

    if !out.is_empty() && out.first() == out.last() {
        out.pop();
    }
    if out.len() < 3 {
        return Polygon::new();
    }

    nudge_boundary_points(bbox, &mut out);
    cleanup_near_duplicates(bbox, &mut out);

    if out.len() < 3 {
        return Polygon::new();
    }
    Polygon::from_points(out)
}

/// Direction test for a boundary edge: true when `pt1 -> pt2` runs along the
/// box boundary in the direction matching the polygon's winding, so the edge
/// is safe to push outward.
fn is_good_move(bbox: &BoundingBox, is_ccw: bool, pt1: Point, pt2: Point) -> bool {
    let side = bb_sides(bbox, pt1) & bb_sides(bbox, pt2);
    if side == 0 {
        false
    } else if (side & TOP) != 0 {
        is_ccw == (pt1.x > pt2.x)
    } else if (side & BOTTOM) != 0 {
        is_ccw == (pt1.x < pt2.x)
    } else if (side & LEFT) != 0 {
        is_ccw == (pt1.y > pt2.y)
    } else {
        is_ccw == (pt1.y < pt2.y)
    }
}

fn move_out(bbox: &BoundingBox, pt: &mut Point, dist: Coord) {
    let pt_sides = bb_sides(bbox, *pt);
    if (pt_sides & TOP) != 0 {
        pt.y += dist;
    }
    if (pt_sides & BOTTOM) != 0 {
        pt.y -= dist;
    }
    if (pt_sides & LEFT) != 0 {
        pt.x -= dist;
    }
    if (pt_sides & RIGHT) != 0 {
        pt.x += dist;
    }
}

/// Push boundary vertices slightly outside the box so no result edge lies
/// exactly on the clip box edge (which the boolean engine could treat as
/// coincident with another result's edge).
fn nudge_boundary_points(bbox: &BoundingBox, out: &mut Vec<Point>) {
    let is_ccw = Polygon::from_points(out.clone()).area2() >= 0;
    let pt_first = out[0];
    out.push(pt_first);

    let mut prev_on_bbox = false;
    let mut also_move_prev = false;
    let mut prev_pt_before_move = pt_first;
    for i in 0..out.len() {
        if on_bbox_line(bbox, out[i]) {
            if prev_on_bbox {
                if is_good_move(bbox, is_ccw, prev_pt_before_move, out[i]) {
                    prev_pt_before_move = out[i];
                    move_out(bbox, &mut out[i], SCALED_EPSILON / 3);
                    if also_move_prev {
                        // prev_on_bbox guarantees i > 0 here
                        let mut moved = out[i - 1];
                        move_out(bbox, &mut moved, SCALED_EPSILON / 3);
                        out[i - 1] = moved;
                        also_move_prev = false;
                    }
                } else {
                    also_move_prev = true;
                    prev_pt_before_move = out[i];
                }
            } else {
                prev_on_bbox = true;
                also_move_prev = true;
                prev_pt_before_move = out[i];
            }
        } else {
            prev_on_bbox = false;
        }
    }
    if pt_first != *out.last().unwrap() {
        out[0] = *out.last().unwrap();
    }
    out.pop();
}

/// Collapse vertices closer than `SCALED_EPSILON`, preferring to keep the one
/// still lying on the box boundary line.
fn cleanup_near_duplicates(bbox: &BoundingBox, out: &mut Vec<Point>) {
    let mut i = 0usize;
    while i < out.len() && out.len() > 1 {
        let pi = if i == 0 { out.len() - 1 } else { i - 1 };
        if out[pi].distance_sqr(out[i]) < SCALED_EPSILON_SQR {
            if on_bbox_line(bbox, out[i]) {
                out.remove(pi);
                if pi < i {
                    i -= 1;
                }
            } else {
                out.remove(i);
            }
        } else {
            i += 1;
        }
    }
}

/// Cheap polyline variant. Keeps any vertex that is inside the box or whose
/// neighboring vertices are not all beyond the same box side, preserving
/// every edge that can cross (or cut a corner of) the box.
pub fn clip_polyline_points_with_bbox(src: &[Point], bbox: &BoundingBox) -> Vec<Point> {
    let cnt = src.len();
    let mut out = Vec::new();
    if cnt < 3 {
        return out;
    }
    let mut sides_prev = sides(bbox, src[cnt - 1]);
    let mut sides_this = sides(bbox, src[0]);
    for i in 0..cnt - 1 {
        let sides_next = sides(bbox, src[i + 1]);
        if sides_this == 0 || (sides_prev & sides_this & sides_next) == 0 {
            out.push(src[i]);
            sides_prev = sides_this;
        }
        sides_this = sides_next;
    }
    if !out.is_empty() {
        let sides_next = sides(bbox, out[0]);
        if sides_this == 0 || (sides_prev & sides_this & sides_next) == 0 {
            out.push(src[cnt - 1]);
        }
    }
    if out.len() < 3 {
        out.clear();
    }
    out
}

pub fn clip_polyline_with_bbox(src: &Polyline, bbox: &BoundingBox) -> Polyline {
    Polyline::from_points(clip_polyline_points_with_bbox(&src.points, bbox))
}

/// Tagged variant of [`clip_polyline_with_bbox`]; tags travel with their
/// points.
pub fn clip_zpolyline_with_bbox(src: &ZPolyline, bbox: &BoundingBox) -> ZPolyline {
    let cnt = src.points.len();
    let mut out = Vec::new();
    if cnt < 3 {
        return ZPolyline::from_points(out);
    }
    let mut sides_prev = sides(bbox, src.points[cnt - 1].point());
    let mut sides_this = sides(bbox, src.points[0].point());
    for i in 0..cnt - 1 {
        let sides_next = sides(bbox, src.points[i + 1].point());
        if sides_this == 0 || (sides_prev & sides_this & sides_next) == 0 {
            out.push(src.points[i]);
            sides_prev = sides_this;
        }
        sides_this = sides_next;
    }
    if !out.is_empty() {
        let sides_next = sides(bbox, out[0].point());
        if sides_this == 0 || (sides_prev & sides_this & sides_next) == 0 {
            out.push(src.points[cnt - 1]);
        }
    }
    if out.len() < 3 {
        out.clear();
    }
    ZPolyline::from_points(out)
}

/// Clip every polygon in `src`, dropping the ones that end up empty.
pub fn clip_polygons_with_bbox(src: &[Polygon], bbox: &BoundingBox) -> Polygons {
    src.iter()
        .map(|p| clip_polygon_with_bbox(p, bbox))
        .filter(|p| !p.points.is_empty())
        .collect()
}

/// Clip a region with holes to a flat path list.
pub fn clip_expolygon_with_bbox(src: &ExPolygon, bbox: &BoundingBox) -> Polygons {
    let mut out = Vec::with_capacity(1 + src.holes.len());
    out.push(clip_polygon_with_bbox(&src.contour, bbox));
    for hole in &src.holes {
        out.push(clip_polygon_with_bbox(hole, bbox));
    }
    out.retain(|p| !p.points.is_empty());
    out
}

/// Clip a region set to a flat path list.
pub fn clip_expolygons_with_bbox(src: &[ExPolygon], bbox: &BoundingBox) -> Polygons {
    let mut out = Vec::new();
    for ex in src {
        out.extend(clip_expolygon_with_bbox(ex, bbox));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::Point;

    fn bbox() -> BoundingBox {
        BoundingBox::new(Point::new(0, 0), Point::new(10_000, 10_000))
    }

    #[test]
    fn fully_inside_is_unchanged() {
        let src = polygon![(1000, 1000), (9000, 1000), (9000, 9000), (1000, 9000)];
        let out = clip_polygon_with_bbox(&src, &bbox());
        // output may start at a different vertex of the same ring
        assert_eq!(out.points.len(), src.points.len());
        assert_eq!(out.area2(), src.area2());
        for p in &src.points {
            assert!(out.points.contains(p));
        }
    }

    #[test]
    fn disjoint_is_empty() {
        let src = polygon![(20_000, 0), (30_000, 0), (30_000, 10_000), (20_000, 10_000)];
        assert!(clip_polygon_with_bbox(&src, &bbox()).points.is_empty());
    }

    #[test]
    fn bbox_inside_polygon_yields_bbox() {
        let src = polygon![
            (-10_000, -10_000),
            (20_000, -10_000),
            (20_000, 20_000),
            (-10_000, 20_000)
        ];
        let out = clip_polygon_with_bbox(&src, &bbox());
        assert_eq!(out, bbox().polygon());
        // winding follows the source
        let out_cw = clip_polygon_with_bbox(&src.reversed(), &bbox());
        assert!(out_cw.is_clockwise());
    }

    #[test]
    fn result_stays_within_inflated_bbox() {
        // a polygon sticking far out on the right gets projected onto the
        // box perimeter; the nudge may move boundary points out by eps/3
        let src = polygon![(5000, 2000), (40_000, 2000), (40_000, 8000), (5000, 8000)];
        let out = clip_polygon_with_bbox(&src, &bbox());
        assert!(out.points.len() >= 3);
        let limit = bbox().inflated(SCALED_EPSILON);
        for &p in &out.points {
            assert!(limit.contains_point(p), "{p:?} escapes the clip box");
        }
        // area matches the true intersection
        assert_fuzzy_eq!(
            out.area(),
            5000.0 * 6000.0,
            2.0 * 15_000.0 * SCALED_EPSILON as f64
        );
    }

    #[test]
    fn corner_crossing_emits_box_corner() {
        // diagonal band clipping the box's top right corner region
        let src = polygon![(6000, 12_000), (12_000, 6000), (14_000, 8000), (8000, 14_000)];
        let out = clip_polygon_with_bbox(&src, &bbox());
        assert!(out.points.len() >= 3);
        // the kept region is the triangle cut across the corner
        let expected = 0.5 * 2000.0 * 2000.0;
        assert_fuzzy_eq!(out.area().abs(), expected, 100_000.0);
    }

    #[test]
    fn polyline_variant_keeps_crossing_edges() {
        let src = vec![
            Point::new(-5000, 5000),
            Point::new(5000, 5000),
            Point::new(15_000, 5000),
            Point::new(15_000, 6000),
            Point::new(15_000, 7000),
        ];
        let out = clip_polyline_points_with_bbox(&src, &bbox());
        // the two trailing far right points collapse onto the crossing edge
        assert!(out.contains(&Point::new(5000, 5000)));
        assert!(out.len() < src.len());
    }
}
