//! Analytic clipping of open (optionally tagged) polylines against polygon
//! sets.
//!
//! Subject polylines are split at every crossing with the clip boundary
//! and the pieces are classified by the non zero winding of the clip set at
//! the piece midpoint. Freshly cut points interpolate the width/height tag
//! linearly along the cut segment; pieces cut at an existing vertex copy
//! that vertex's tag.

use static_aabb2d_index::{
    StaticAABB2DIndex, StaticAABB2DIndexBuildError, StaticAABB2DIndexBuilder,
};

use crate::core::math::{lerp, Point, ZPoint};
use crate::geometry::{Polygon, Polygons, ZPolyline, ZPolylines};

pub(crate) struct PolygonClipper {
    polygons: Polygons,
    segments: Vec<(Point, Point)>,
    index: Option<StaticAABB2DIndex<f64>>,
}

impl PolygonClipper {
    pub(crate) fn new(polygons: Polygons) -> Self {
        let mut segments = Vec::new();
        for poly in &polygons {
            if poly.is_valid() {
                segments.extend(poly.iter_segments());
            }
        }
        let index = if segments.is_empty() {
            None
        } else {
            let mut builder = StaticAABB2DIndexBuilder::new(segments.len());
            for &(a, b) in &segments {
                builder.add(
                    a.x.min(b.x) as f64,
                    a.y.min(b.y) as f64,
                    a.x.max(b.x) as f64,
                    a.y.max(b.y) as f64,
                );
            }
            Some(unwrap_spatial_index(builder))
        };
        PolygonClipper {
            polygons,
            segments,
            index,
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Clip one tagged polyline, appending the kept pieces to `out`.
    pub(crate) fn clip_zpolyline(
        &self,
        subject: &ZPolyline,
        keep_inside: bool,
        out: &mut ZPolylines,
    ) {
        if subject.points.len() < 2 {
            return;
        }
        let index = match &self.index {
            Some(index) => index,
            None => {
                if !keep_inside {
                    out.push(subject.clone());
                }
                return;
            }
        };

        // subdivide the polyline at every boundary crossing
        let mut nodes: Vec<ZPoint> = Vec::with_capacity(subject.points.len());
        let mut query_results = Vec::new();
        for w in subject.points.windows(2) {
            let (p0, p1) = (w[0], w[1]);
            push_node(&mut nodes, p0);
            let (a0, a1) = (p0.point(), p1.point());

            query_results.clear();
            query_results.extend(index.query(
                a0.x.min(a1.x) as f64,
                a0.y.min(a1.y) as f64,
                a0.x.max(a1.x) as f64,
                a0.y.max(a1.y) as f64,
            ));

            let mut cuts: Vec<f64> = Vec::new();
            for &si in &query_results {
                let (ca, cb) = self.segments[si];
                if let Some(t) = segment_intersection_param(a0, a1, ca, cb) {
                    cuts.push(t);
                }
            }
            cuts.sort_by(|a, b| a.total_cmp(b));
            for t in cuts {
                let x = lerp(p0.x as f64, p1.x as f64, t).round() as i64;
                let y = lerp(p0.y as f64, p1.y as f64, t).round() as i64;
                let z = lerp(p0.z as f64, p1.z as f64, t).round() as i64;
                push_node(&mut nodes, ZPoint::new(x, y, z));
            }
        }
        push_node(&mut nodes, *subject.points.last().unwrap_or(&ZPoint::default()));

        // classify each piece at its midpoint and stitch kept pieces together
        let mut current: Vec<ZPoint> = Vec::new();
        for w in nodes.windows(2) {
            let (a, b) = (w[0], w[1]);
            let mx = (a.x as f64 + b.x as f64) * 0.5;
            let my = (a.y as f64 + b.y as f64) * 0.5;
            let keep = winding_contains(&self.polygons, mx, my) == keep_inside;
            if keep {
                if current.is_empty() {
                    current.push(a);
                }
                current.push(b);
            } else if current.len() >= 2 {
                out.push(ZPolyline::from_points(std::mem::take(&mut current)));
            } else {
                current.clear();
            }
        }
        if current.len() >= 2 {
            out.push(ZPolyline::from_points(current));
        }
    }
}

fn push_node(nodes: &mut Vec<ZPoint>, p: ZPoint) {
    // zero length pieces appear when a cut rounds onto an existing vertex
    if nodes
        .last()
        .is_none_or(|last| last.x != p.x || last.y != p.y)
    {
        nodes.push(p);
    }
}

/// Parameter of the crossing along `p0 -> p1`, if segment `a -> b` properly
/// crosses it. Collinear overlaps yield no parameter; midpoint winding
/// classification decides those pieces.
fn segment_intersection_param(p0: Point, p1: Point, a: Point, b: Point) -> Option<f64> {
    let d1 = p1 - p0;
    let d2 = b - a;
    let denom = d1.cross(d2);
    if denom == 0 {
        return None;
    }
    let ap = a - p0;
    let t_num = ap.cross(d2);
    let u_num = ap.cross(d1);
    let (t_ok, u_ok) = if denom > 0 {
        (
            (0..=denom).contains(&t_num),
            (0..=denom).contains(&u_num),
        )
    } else {
        (
            (denom..=0).contains(&t_num),
            (denom..=0).contains(&u_num),
        )
    };
    if !(t_ok && u_ok) {
        return None;
    }
    let t = t_num as f64 / denom as f64;
    if t <= 0.0 || t >= 1.0 {
        // crossing at an existing vertex, no new node needed
        return None;
    }
    Some(t)
}

/// Non zero winding containment of an (f64) point in a polygon set.
fn winding_contains(polygons: &[Polygon], x: f64, y: f64) -> bool {
    let mut winding = 0i32;
    for poly in polygons {
        for (a, b) in poly.iter_segments() {
            let (ax, ay) = (a.x as f64, a.y as f64);
            let (bx, by) = (b.x as f64, b.y as f64);
            let is_left = (bx - ax) * (y - ay) - (x - ax) * (by - ay);
            if ay <= y {
                if by > y && is_left > 0.0 {
                    winding += 1;
                }
            } else if by <= y && is_left < 0.0 {
                winding -= 1;
            }
        }
    }
    winding != 0
}

/// Merge fragments whose ends coincide (in x and y) into single polylines.
/// Needed after clipping a closed path as an open one: the piece containing
/// the seam comes out split in two.
pub(crate) fn recombine(out: &mut ZPolylines) {
    let mut i = 0;
    while i < out.len() {
        let mut merged_any = false;
        let mut j = i + 1;
        while j < out.len() {
            let fi = out[i].points[0];
            let bi = *out[i].points.last().unwrap_or(&fi);
            let fj = out[j].points[0];
            let bj = *out[j].points.last().unwrap_or(&fj);

            if xy_eq(bi, fj) {
                let tail = out.remove(j);
                out[i].points.extend(tail.points.into_iter().skip(1));
                merged_any = true;
            } else if xy_eq(bi, bj) {
                let tail = out.remove(j);
                out[i].points.extend(tail.points.into_iter().rev().skip(1));
                merged_any = true;
            } else if xy_eq(fi, bj) {
                let mut head = out.remove(j);
                head.points.extend(out[i].points.iter().copied().skip(1));
                out[i].points = head.points;
                merged_any = true;
            } else if xy_eq(fi, fj) {
                let head = out.remove(j);
                let mut pts: Vec<ZPoint> = head.points.into_iter().rev().collect();
                pts.extend(out[i].points.iter().copied().skip(1));
                out[i].points = pts;
                merged_any = true;
            } else {
                j += 1;
            }
        }
        if !merged_any {
            i += 1;
        }
    }
}

#[inline]
fn xy_eq(a: ZPoint, b: ZPoint) -> bool {
    a.x == b.x && a.y == b.y
}

fn unwrap_spatial_index(builder: StaticAABB2DIndexBuilder<f64>) -> StaticAABB2DIndex<f64> {
    match builder.build() {
        Ok(x) => x,
        Err(e) => match e {
            StaticAABB2DIndexBuildError::ItemCountError { .. } => {
                unreachable!("count mismatch when building spatial index")
            }
            StaticAABB2DIndexBuildError::NumericCastError => {
                panic!("failed to cast coordinate for spatial index: {e}")
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip_square() -> PolygonClipper {
        PolygonClipper::new(vec![polygon![(0, 0), (1000, 0), (1000, 1000), (0, 1000)]])
    }

    #[test]
    fn crossing_line_splits_with_interpolated_tags() {
        let clipper = clip_square();
        let subject = ZPolyline::from_points(vec![
            ZPoint::new(-500, 500, 0),
            ZPoint::new(1500, 500, 200),
        ]);
        let mut inside = Vec::new();
        clipper.clip_zpolyline(&subject, true, &mut inside);
        assert_eq!(inside.len(), 1);
        let pts = &inside[0].points;
        assert_eq!(pts.first().map(|p| (p.x, p.y, p.z)), Some((0, 500, 50)));
        assert_eq!(pts.last().map(|p| (p.x, p.y, p.z)), Some((1000, 500, 150)));

        let mut outside = Vec::new();
        clipper.clip_zpolyline(&subject, false, &mut outside);
        assert_eq!(outside.len(), 2);
    }

    #[test]
    fn vertex_on_boundary_copies_tag() {
        let clipper = clip_square();
        let subject = ZPolyline::from_points(vec![
            ZPoint::new(-400, 500, 10),
            ZPoint::new(0, 500, 30),
            ZPoint::new(600, 500, 70),
        ]);
        let mut inside = Vec::new();
        clipper.clip_zpolyline(&subject, true, &mut inside);
        assert_eq!(inside.len(), 1);
        assert_eq!(inside[0].points.first().map(|p| p.z), Some(30));
    }

    #[test]
    fn recombine_merges_seam_fragments() {
        let mut fragments = vec![
            ZPolyline::from_points(vec![ZPoint::new(0, 0, 0), ZPoint::new(10, 0, 0)]),
            ZPolyline::from_points(vec![ZPoint::new(10, 10, 0), ZPoint::new(10, 0, 0)]),
        ];
        recombine(&mut fragments);
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].points.len(), 3);
    }
}
