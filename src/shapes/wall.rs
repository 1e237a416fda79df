use crate::common::{PhysicsError, Result};
use crate::math::{Vec2, Vec2Ext};

/// An infinite static half-plane through two boundary points.
///
/// The normal is the counter-clockwise perpendicular of `point2 - point1` and marks the free
/// side; everything behind the line counts as solid regardless of the segment's length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wall {
    pub point1: Vec2,
    pub point2: Vec2,
    pub normal: Vec2,
}

impl Wall {
    pub fn new(point1: Vec2, point2: Vec2) -> Result<Self> {
        let direction = point2 - point1;
        if direction.mag_sq() < 1e-24 {
            return Err(PhysicsError::DegenerateWall);
        }
        Ok(Self {
            point1,
            point2,
            normal: direction.perp().normalized(),
        })
    }

    /// Moves the boundary points so that `point1` sits at `position`.
    /// The normal never changes after construction.
    pub fn update_world(&mut self, position: Vec2) {
        let span = self.point2 - self.point1;
        self.point1 = position;
        self.point2 = position + span;
    }

    /// Signed distance of `point` from the boundary line, positive on the free side.
    pub fn signed_distance(&self, point: Vec2) -> f64 {
        (point - self.point1).dot(self.normal)
    }

    /// Whether `point` lies in the solid half-plane (on the line counts as inside).
    pub fn contains(&self, point: Vec2) -> bool {
        self.signed_distance(point) <= 0.0
    }
}
