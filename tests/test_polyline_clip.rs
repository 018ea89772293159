mod test_utils;

use polyclip::clipper::{
    clip_zpolylines, diff_pl, diff_pl_closed, intersection_pl, ClipType,
};
use polyclip::geometry::ZPolyline;
use polyclip::{polyline, Point, ZPoint};
use test_utils::*;

fn two_band_clip() -> Vec<polyclip::Polygon> {
    vec![
        polyclip::polygon![(1000, 0), (2000, 0), (2000, 3000), (1000, 3000)],
        polyclip::polygon![(3000, 0), (4000, 0), (4000, 3000), (3000, 3000)],
    ]
}

#[test]
fn intersection_keeps_the_inside_runs() {
    let subject = vec![polyline![(500, 500), (4500, 500)]];
    let clip = two_band_clip();
    let out = intersection_pl(&subject, &clip);
    assert_eq!(out.len(), 2);
    for pl in &out {
        assert_near!(pl.length(), 1000.0, 2.0);
    }
}

#[test]
fn difference_keeps_the_outside_runs() {
    let subject = vec![polyline![(500, 500), (4500, 500)]];
    let clip = two_band_clip();
    let out = diff_pl(&subject, &clip);
    assert_eq!(out.len(), 3);
    let mut lengths: Vec<f64> = out.iter().map(|pl| pl.length()).collect();
    lengths.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_near!(lengths[0], 500.0, 2.0);
    assert_near!(lengths[1], 500.0, 2.0);
    assert_near!(lengths[2], 1000.0, 2.0);
}

#[test]
fn hole_ring_in_the_clip_interrupts_the_line() {
    // the clip set carries its hole as a clockwise ring; the run across the
    // hole interior drops out, leaving the two 400 unit bridges between the
    // outer edge and the hole edge
    let subject = vec![polyline![(500, 1500), (3000, 1500)]];
    let clip = vec![
        polyclip::polygon![(2000, 1000), (2000, 2000), (1000, 2000), (1000, 1000)],
        polyclip::polygon![(1600, 1400), (1400, 1400), (1400, 1600), (1600, 1600)],
    ];
    let out = intersection_pl(&subject, &clip);
    assert_eq!(out.len(), 2);
    for pl in &out {
        assert_near!(pl.length(), 400.0, 2.0);
    }
}

#[test]
fn empty_clip_passes_the_subject_through_a_difference() {
    let subject = vec![polyline![(0, 0), (1000, 0)]];
    let clip: Vec<polyclip::Polygon> = Vec::new();
    let out = diff_pl(&subject, &clip);
    assert_eq!(out, subject);
    assert!(intersection_pl(&subject, &clip).is_empty());
}

#[test]
fn tags_are_interpolated_at_cut_points() {
    // the tag grows linearly with x, so the tag at a cut must equal the
    // cut's x coordinate
    let subject = vec![ZPolyline::from_points(vec![
        ZPoint::new(0, 0, 0),
        ZPoint::new(10_000, 0, 10_000),
    ])];
    let clip = vec![polyclip::polygon![
        (2000, -1000),
        (8000, -1000),
        (8000, 1000),
        (2000, 1000)
    ]];
    let out = clip_zpolylines(ClipType::Intersection, &subject, &clip);
    assert_eq!(out.len(), 1);
    let points = &out[0].points;
    assert_eq!(points.first().map(|p| p.point()), Some(Point::new(2000, 0)));
    assert_eq!(points.last().map(|p| p.point()), Some(Point::new(8000, 0)));
    assert!((points[0].z - 2000).abs() <= 2);
    assert!((points[points.len() - 1].z - 8000).abs() <= 2);
}

#[test]
fn closed_subject_pieces_rejoin_across_the_seam() {
    // the clip bites a piece out of the right edge, leaving two runs that
    // both end at the seam vertex; they must come back as one polyline
    let subject = vec![square(0, 10_000)];
    let clip = polyclip::polygon![(9000, 4000), (11_000, 4000), (11_000, 6000), (9000, 6000)];
    let out = diff_pl_closed(&subject, &clip);
    assert_eq!(out.len(), 1);
    assert_near!(out[0].length(), 38_000.0, 4.0);
    let ends = [out[0].points[0], out[0].points[out[0].points.len() - 1]];
    assert!(ends.contains(&Point::new(10_000, 4000)));
    assert!(ends.contains(&Point::new(10_000, 6000)));
}
