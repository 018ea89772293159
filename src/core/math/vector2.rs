use core::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use super::Point;

/// 2D float vector used by the offset curve generators. Scaled integer
/// coordinates convert losslessly (they stay far below 2^53).
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Vector2 { x, y }
    }

    pub fn from_point(p: Point) -> Self {
        Vector2::new(p.x as f64, p.y as f64)
    }

    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Perpendicular dot product (z component of the cross product).
    pub fn cross(self, other: Self) -> f64 {
        self.x * other.y - self.y * other.x
    }

    pub fn length_sqr(self) -> f64 {
        self.dot(self)
    }

    pub fn length(self) -> f64 {
        self.length_sqr().sqrt()
    }

    /// Unit vector in the same direction. The zero vector is returned
    /// unchanged.
    pub fn normalized(self) -> Self {
        let l = self.length();
        if l == 0.0 {
            self
        } else {
            Vector2::new(self.x / l, self.y / l)
        }
    }

    /// Clockwise perpendicular, `(y, -x)`.
    pub fn perp(self) -> Self {
        Vector2::new(self.y, -self.x)
    }
}

impl Add for Vector2 {
    type Output = Vector2;
    fn add(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, rhs: Vector2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vector2 {
    type Output = Vector2;
    fn sub(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vector2 {
    fn sub_assign(&mut self, rhs: Vector2) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Neg for Vector2 {
    type Output = Vector2;
    fn neg(self) -> Vector2 {
        Vector2::new(-self.x, -self.y)
    }
}

impl Mul<f64> for Vector2 {
    type Output = Vector2;
    fn mul(self, rhs: f64) -> Vector2 {
        Vector2::new(self.x * rhs, self.y * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perp_is_clockwise() {
        let v = Vector2::new(1.0, 0.0);
        assert_eq!(v.perp(), Vector2::new(0.0, -1.0));
        assert_fuzzy_eq!(v.cross(v.perp()), -1.0, 1e-12);
    }

    #[test]
    fn normalized_keeps_direction() {
        let v = Vector2::new(3.0, 4.0).normalized();
        assert_fuzzy_eq!(v.length(), 1.0, 1e-12);
        assert_fuzzy_eq!(v.x, 0.6, 1e-12);
        assert_eq!(Vector2::default().normalized(), Vector2::default());
    }
}
