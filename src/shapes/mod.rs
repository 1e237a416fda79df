pub mod circle;
pub mod polygon;
pub mod wall;

// Re-export the specific shape types
pub use circle::Circle;
pub use polygon::ConvexPolygon;
pub use wall::Wall;

use crate::common::Result;
use crate::math::Vec2;

/// Enum representing the geometric shape of a body.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Circle(Circle),
    Polygon(ConvexPolygon),
    Wall(Wall),
}

/// Contact-type tag of a shape.
///
/// The derived ordering (Circle < Polygon < Wall) is the canonical order used to pick a
/// contact algorithm for an unordered pair of shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ShapeKind {
    Circle,
    Polygon,
    Wall,
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Circle(_) => ShapeKind::Circle,
            Shape::Polygon(_) => ShapeKind::Polygon,
            Shape::Wall(_) => ShapeKind::Wall,
        }
    }

    /// Recomputes the cached world-space geometry for a body at `position` rotated by `angle` degrees.
    pub fn refresh(&mut self, position: Vec2, angle: f64) {
        match self {
            Shape::Circle(_) => {}
            Shape::Polygon(polygon) => polygon.update_world(position, angle),
            Shape::Wall(wall) => wall.update_world(position),
        }
    }

    /// Mass properties at uniform `density`. A wall is an unbounded half-plane, so its mass
    /// and moment of inertia are infinite.
    pub fn mass_properties(&self, density: f64) -> Result<MassProperties> {
        match self {
            Shape::Circle(circle) => Ok(circle.mass_properties(density)),
            Shape::Polygon(polygon) => polygon.mass_properties(density),
            Shape::Wall(_) => Ok(MassProperties {
                mass: f64::INFINITY,
                moment_of_inertia: f64::INFINITY,
                center_of_mass: Vec2::zero(),
            }),
        }
    }

    /// Point containment for a shape whose body sits at `position`.
    /// The world-space caches must be current.
    pub fn contains(&self, position: Vec2, point: Vec2) -> bool {
        match self {
            Shape::Circle(circle) => circle.contains(position, point),
            Shape::Polygon(polygon) => polygon.contains(point),
            Shape::Wall(wall) => wall.contains(point),
        }
    }
}

/// Mass, moment of inertia about the centre of mass, and centre of mass in body-local space
/// of a shape with uniform density.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MassProperties {
    pub mass: f64,
    pub moment_of_inertia: f64,
    pub center_of_mass: Vec2,
}

impl MassProperties {
    /// Rescales to an explicit total mass, keeping the same distribution.
    pub fn with_mass(self, mass: f64) -> Self {
        MassProperties {
            mass,
            moment_of_inertia: self.moment_of_inertia * mass / self.mass,
            center_of_mass: self.center_of_mass,
        }
    }
}
