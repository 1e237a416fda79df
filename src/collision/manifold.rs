use crate::math::Vec2;

/// Geometry of a contact between two shapes, in the order the pair was given.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactGeometry {
    /// Signed penetration depth. Positive means the shapes overlap.
    pub overlap: f64,
    /// Unit normal pointing from the second shape toward the first. Resolution pushes the first
    /// body along `+normal` and the second along `-normal`.
    pub normal: Vec2,
    /// The single contact point in world coordinates.
    pub point: Vec2,
}

impl ContactGeometry {
    /// Whether the shapes actually intersect.
    #[inline]
    pub fn is_overlapping(&self) -> bool {
        self.overlap > 0.0
    }

    /// The same contact seen with the two shapes swapped.
    #[inline]
    pub fn flipped(self) -> Self {
        ContactGeometry {
            normal: -self.normal,
            ..self
        }
    }
}
