mod test_utils;

use polyclip::clipper::{
    clip_expolygons_with_bbox_ex, clip_polygon_with_bbox, intersection, ApplySafetyOffset,
};
use polyclip::core::math::SCALED_EPSILON;
use polyclip::geometry::BoundingBox;
use polyclip::{polygon, Point};
use test_utils::*;

#[test]
fn clipped_result_matches_the_exact_intersection() {
    // diamond poking out of all four box sides
    let diamond = polygon![
        (5000, -2000),
        (12_000, 5000),
        (5000, 12_000),
        (-2000, 5000)
    ];
    let bbox = BoundingBox::new(Point::new(0, 0), Point::new(10_000, 10_000));
    let clipped = clip_polygon_with_bbox(&diamond, &bbox);
    assert!(!clipped.points.is_empty());

    let exact = intersection(&diamond, &bbox.polygon(), ApplySafetyOffset::No);
    // the clipper nudges boundary vertices outward by a fraction of the
    // epsilon, so the areas agree only approximately
    assert_near!(clipped.area(), total_area(&exact), 1.0e5);

    let inflated = bbox.inflated(SCALED_EPSILON);
    for &p in &clipped.points {
        assert!(inflated.contains_point(p));
    }
}

#[test]
fn polygon_fully_inside_keeps_its_area() {
    let src = square(2000, 6000);
    let bbox = BoundingBox::new(Point::new(0, 0), Point::new(10_000, 10_000));
    let clipped = clip_polygon_with_bbox(&src, &bbox);
    assert_eq!(clipped.points.len(), 4);
    assert_eq!(clipped.area2(), src.area2());
}

#[test]
fn disjoint_polygon_clips_to_nothing() {
    let src = square(20_000, 1000);
    let bbox = BoundingBox::new(Point::new(0, 0), Point::new(10_000, 10_000));
    assert!(clip_polygon_with_bbox(&src, &bbox).points.is_empty());
}

#[test]
fn box_inside_the_polygon_yields_the_box() {
    let src = square(-5000, 20_000);
    let bbox = BoundingBox::new(Point::new(0, 0), Point::new(10_000, 10_000));
    let clipped = clip_polygon_with_bbox(&src, &bbox);
    assert!(same_ring(&clipped, &bbox.polygon()));
}

#[test]
fn expolygons_untouched_by_the_box_pass_through() {
    let src = vec![square_with_hole(1000, 8000, 2000)];
    let bbox = BoundingBox::new(Point::new(0, 0), Point::new(10_000, 10_000));
    let out = clip_expolygons_with_bbox_ex(&src, &bbox);
    assert_eq!(out, src);
}

#[test]
fn expolygon_hole_cut_by_the_box_is_reunioned() {
    // the box boundary slices through the hole, turning it into a notch in
    // the contour
    let mut hole = polygon![(5000, 3000), (7000, 5000), (5000, 7000), (3000, 5000)];
    hole.make_clockwise();
    let src = vec![polyclip::ExPolygon {
        contour: square(0, 10_000),
        holes: vec![hole],
    }];
    let bbox = BoundingBox::new(Point::new(0, 0), Point::new(5000, 10_000));
    let out = clip_expolygons_with_bbox_ex(&src, &bbox);
    assert_eq!(out.len(), 1);
    assert!(out[0].holes.is_empty());
    // left half of the region minus the left half of the diamond hole
    assert_near!(out[0].area(), 5.0e7 - 4.0e6, 5.0e5);
}
