mod test_utils;

use polyclip::geometry::expolygons_area;
use polyclip::offset::{
    closing, offset, offset2_ex, offset_ex, offset_expolygon, offset_expolygons, JoinType,
};
use polyclip::{polygon, ExPolygon, Point};
use test_utils::*;

const MITER: f64 = 3.0;

#[test]
fn offset_expolygon_exact_miter_oracle() {
    let mut hole = square(1400, 200);
    hole.make_clockwise();
    let expoly = ExPolygon {
        contour: square(1000, 1000),
        holes: vec![hole],
    };
    let out = offset_expolygon(&expoly, 50.0, JoinType::Miter, MITER);
    assert_eq!(out.len(), 2);
    // contour grows outward
    for &(x, y) in &[(950, 950), (2050, 950), (2050, 2050), (950, 2050)] {
        assert!(out[0].points.contains(&Point::new(x, y)));
    }
    // the hole moves the other way
    assert!(out[1].is_clockwise());
    for &(x, y) in &[(1450, 1450), (1550, 1450), (1550, 1550), (1450, 1550)] {
        assert!(out[1].points.contains(&Point::new(x, y)));
    }
}

#[test]
fn offset_ex_resolves_hole_ownership() {
    let expoly = square_with_hole(0, 10_000, 2000);
    let out = offset_ex(&expoly, 500.0, JoinType::Miter, MITER);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].holes.len(), 1);
    assert_near!(out[0].area(), 11_000.0 * 11_000.0 - 1000.0 * 1000.0, 16.0);
}

#[test]
fn offset_out_then_in_restores_the_square() {
    // miter corners of an axis aligned square land on integer coordinates,
    // so growing and shrinking by the same delta is exact
    let src = square(0, 1000);
    let grown = offset(&src, 50.0, JoinType::Miter, MITER);
    assert_eq!(grown.len(), 1);
    assert!(same_ring(&grown[0], &square(-50, 1100)));
    let back = offset(&grown, -50.0, JoinType::Miter, MITER);
    assert_eq!(back.len(), 1);
    assert!(same_ring(&back[0], &src));
}

#[test]
fn offset2_grow_then_shrink() {
    let src = vec![ExPolygon::new(square(0, 10_000))];
    let out = offset2_ex(&src, 50.0, -20.0, JoinType::Miter, MITER);
    assert_eq!(out.len(), 1);
    // net offset of +30 per side
    assert_near!(out[0].area(), 10_060.0 * 10_060.0, 16.0);
}

#[test]
fn offset2_shrink_then_grow_preserves_area() {
    let src = vec![square_with_hole(0, 20_000, 10_000)];
    let out = offset2_ex(&src, -100.0, 100.0, JoinType::Miter, MITER);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].holes.len(), 1);
    assert_near!(expolygons_area(&out), 4.0e8 - 1.0e8, 64.0);
}

#[test]
fn closing_bridges_a_narrow_gap() {
    let src = vec![
        ExPolygon::new(square(0, 10_000)),
        ExPolygon::new(polygon![
            (10_200, 0),
            (20_200, 0),
            (20_200, 10_000),
            (10_200, 10_000)
        ]),
    ];
    let out = closing(&src, 500.0, 500.0, JoinType::Miter, MITER);
    assert_eq!(out.len(), 1);
    assert_near!(out[0].area(), 20_200.0 * 10_000.0, 64.0);
}

#[test]
fn outward_offsets_of_separate_regions_are_unioned() {
    let src = vec![
        ExPolygon::new(square(0, 10_000)),
        ExPolygon::new(square(10_400, 10_000)),
    ];
    let out = offset_expolygons(&src, 500.0, JoinType::Miter, MITER);
    // the grown squares share their y extent, so the merged region is one
    // rectangle
    assert_eq!(out.len(), 1);
    assert_near!(total_area(&out), 21_400.0 * 11_000.0, 64.0);
}

#[test]
fn growing_a_c_shape_closes_the_mouth_into_a_hole() {
    // square with an interior cavity reachable only through a 200 unit
    // wide channel; growing by 500 seals the channel and turns the cavity
    // into a hole
    let c_shape = polygon![
        (0, 0),
        (10_000, 0),
        (10_000, 10_000),
        (5100, 10_000),
        (5100, 8000),
        (8000, 8000),
        (8000, 2000),
        (2000, 2000),
        (2000, 8000),
        (4900, 8000),
        (4900, 10_000),
        (0, 10_000)
    ];
    let out = offset_ex(&c_shape, 500.0, JoinType::Miter, MITER);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].holes.len(), 1);
    assert_near!(out[0].contour.area(), 11_000.0 * 11_000.0, 16.0);
    assert_near!(out[0].holes[0].area().abs(), 5000.0 * 5000.0, 16.0);
}
