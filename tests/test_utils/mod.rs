#![allow(dead_code)]

use polyclip::{polygon, ExPolygon, Point, Polygon};

/// Axis aligned square with `min` as its bottom left corner, counter
/// clockwise.
pub fn square(min: i64, size: i64) -> Polygon {
    polygon![
        (min, min),
        (min + size, min),
        (min + size, min + size),
        (min, min + size)
    ]
}

/// Square region with a centered square hole punched out of it.
pub fn square_with_hole(min: i64, size: i64, hole_size: i64) -> ExPolygon {
    let hmin = min + (size - hole_size) / 2;
    let mut hole = square(hmin, hole_size);
    hole.make_clockwise();
    ExPolygon {
        contour: square(min, size),
        holes: vec![hole],
    }
}

pub fn total_area(polygons: &[Polygon]) -> f64 {
    polygons.iter().map(|p| p.area()).sum()
}

/// Compare two closed rings up to a rotation of the starting vertex.
pub fn same_ring(a: &Polygon, b: &Polygon) -> bool {
    if a.points.len() != b.points.len() {
        return false;
    }
    if a.points.is_empty() {
        return true;
    }
    let n = a.points.len();
    (0..n).any(|shift| (0..n).all(|i| a.points[(i + shift) % n] == b.points[i]))
}

pub fn contains_point_with(polygons: &[Polygon], p: Point) -> bool {
    polygons.iter().any(|poly| poly.contains_point(p))
}

macro_rules! assert_near {
    ($left:expr, $right:expr, $eps:expr) => {
        assert!(
            ($left - $right).abs() <= $eps,
            "{} vs {} (eps {})",
            $left,
            $right,
            $eps
        )
    };
}

pub(crate) use assert_near;
