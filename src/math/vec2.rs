//! 2D vector type and the handful of operations `ultraviolet` does not provide.
//!
//! Angles throughout the crate are in degrees, so rotation helpers here take
//! degrees as well.

pub use ultraviolet as uv;

pub type Vec2 = uv::DVec2;

/// Extra operations on [`Vec2`] used by the collision and integration code.
pub trait Vec2Ext {
    /// Computes the 2D cross product (scalar). Equivalent to z-component of 3D cross product.
    fn cross(self, other: Self) -> f64;

    /// Returns a vector perpendicular to this vector (90-degree counter-clockwise rotation).
    fn perp(self) -> Self;

    /// Rotates the vector counter-clockwise by an angle given in degrees.
    fn rotated_deg(self, degrees: f64) -> Self;

    /// Distance between two points.
    fn distance(self, other: Self) -> f64;
}

impl Vec2Ext for Vec2 {
    #[inline]
    fn cross(self, other: Vec2) -> f64 {
        self.x * other.y - self.y * other.x
    }

    #[inline]
    fn perp(self) -> Vec2 {
        Vec2::new(-self.y, self.x)
    }

    fn rotated_deg(self, degrees: f64) -> Vec2 {
        let (sin_a, cos_a) = degrees.to_radians().sin_cos();
        Vec2::new(
            self.x * cos_a - self.y * sin_a,
            self.x * sin_a + self.y * cos_a,
        )
    }

    #[inline]
    fn distance(self, other: Vec2) -> f64 {
        (self - other).mag()
    }
}
