//! 2D transformation matrices for rotating schema content on a page.

use crate::units::*;

/// A transformation matrix applied to a group of page contents.
///
/// Uses the standard PDF transformation matrix where (0,0) is at the bottom-left.
/// The matrix is represented as [a, b, c, d, e, f] corresponding to:
/// ```text
/// | a  b  0 |
/// | c  d  0 |
/// | e  f  1 |
/// ```
///
/// Transforms are chained with [`then`](Transform::then); operations apply in the order
/// they're chained.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub e: f32,
    pub f: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// Identity transform (no transformation)
    pub fn identity() -> Self {
        Transform {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }

    /// Create a translation transform
    pub fn translate(x: Pt, y: Pt) -> Self {
        Transform {
            e: *x,
            f: *y,
            ..Self::identity()
        }
    }

    /// Create a counter-clockwise rotation transform about the origin (angle in degrees)
    pub fn rotate_degrees(angle: f32) -> Self {
        let (sin, cos) = angle.to_radians().sin_cos();
        Transform {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            e: 0.0,
            f: 0.0,
        }
    }

    /// Counter-clockwise rotation about `pivot` (angle in degrees)
    pub fn rotate_about(angle: f32, pivot: (Pt, Pt)) -> Self {
        Transform::translate(-pivot.0, -pivot.1)
            .then(Transform::rotate_degrees(angle))
            .then(Transform::translate(pivot.0, pivot.1))
    }

    /// Combine this transform with another (self * other)
    pub fn then(self, other: Transform) -> Self {
        Transform {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Transform::identity()
    }

    /// Map a point through this transform
    pub fn apply(&self, point: (Pt, Pt)) -> (Pt, Pt) {
        let (x, y) = (*point.0, *point.1);
        (
            Pt(self.a * x + self.c * y + self.e),
            Pt(self.b * x + self.d * y + self.f),
        )
    }
}
