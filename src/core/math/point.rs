use super::{Coord, SCALED_EPSILON_SQR};
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 2D point (or vector) in scaled integer coordinates.
///
/// Equality is exact integer equality; near-coincidence checks go through
/// [`Point::coincides_with_epsilon`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub x: Coord,
    pub y: Coord,
}

impl Point {
    #[inline]
    pub const fn new(x: Coord, y: Coord) -> Self {
        Point { x, y }
    }

    /// Exact squared distance to `other`.
    #[inline]
    pub fn distance_sqr(self, other: Self) -> i128 {
        let dx = (self.x - other.x) as i128;
        let dy = (self.y - other.y) as i128;
        dx * dx + dy * dy
    }

    /// True if `other` lies within [`SCALED_EPSILON`](super::SCALED_EPSILON)
    /// of this point.
    #[inline]
    pub fn coincides_with_epsilon(self, other: Self) -> bool {
        self.distance_sqr(other) < SCALED_EPSILON_SQR
    }

    /// z component of the cross product, treating both points as vectors.
    #[inline]
    pub fn cross(self, other: Self) -> i128 {
        self.x as i128 * other.y as i128 - self.y as i128 * other.x as i128
    }

    /// Dot product, treating both points as vectors.
    #[inline]
    pub fn dot(self, other: Self) -> i128 {
        self.x as i128 * other.x as i128 + self.y as i128 * other.y as i128
    }

    #[inline]
    pub fn to_f64(self) -> [f64; 2] {
        [self.x as f64, self.y as f64]
    }

    /// Round a float coordinate pair to the nearest scaled integer point.
    #[inline]
    pub fn from_f64(x: f64, y: f64) -> Self {
        Point::new(x.round() as Coord, y.round() as Coord)
    }
}

impl Add for Point {
    type Output = Point;
    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    #[inline]
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Point;
    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Point {
    #[inline]
    fn sub_assign(&mut self, rhs: Point) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Neg for Point {
    type Output = Point;
    #[inline]
    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl From<(Coord, Coord)> for Point {
    #[inline]
    fn from((x, y): (Coord, Coord)) -> Self {
        Point::new(x, y)
    }
}

/// Point carrying a width/height tag that is linearly interpolated along any
/// intersection introduced while clipping extrusion paths.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ZPoint {
    pub x: Coord,
    pub y: Coord,
    pub z: Coord,
}

impl ZPoint {
    #[inline]
    pub const fn new(x: Coord, y: Coord, z: Coord) -> Self {
        ZPoint { x, y, z }
    }

    #[inline]
    pub const fn point(self) -> Point {
        Point::new(self.x, self.y)
    }

    #[inline]
    pub const fn from_point(p: Point, z: Coord) -> Self {
        ZPoint::new(p.x, p.y, z)
    }
}
