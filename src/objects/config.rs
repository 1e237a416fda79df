//! Plain-data descriptors a level loader fills in to construct bodies.

use crate::common::Result;
use crate::math::Vec2;
use crate::shapes::{Circle, ConvexPolygon, Shape, Wall};

/// Initial state and mass specification of a body.
///
/// Give at most one of `mass` and `density`. With neither, the body gets a mass of 1.
/// `f64::INFINITY` as mass makes a static body; as moment of inertia it makes a body that
/// never rotates. Vectors are stored as arrays to keep the serialised form flat.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde-types", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-types", serde(default))]
pub struct BodyConfig {
    pub mass: Option<f64>,
    pub density: Option<f64>,
    pub moment_of_inertia: Option<f64>,
    pub position: [f64; 2],
    pub velocity: [f64; 2],
    /// Degrees.
    pub angle: f64,
    /// Degrees per second.
    pub angular_velocity: f64,
}

impl BodyConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = Some(mass);
        self
    }

    #[inline]
    pub fn with_density(mut self, density: f64) -> Self {
        self.density = Some(density);
        self
    }

    #[inline]
    pub fn with_moment_of_inertia(mut self, moment_of_inertia: f64) -> Self {
        self.moment_of_inertia = Some(moment_of_inertia);
        self
    }

    /// Infinite mass and moment of inertia.
    #[inline]
    pub fn fixed(self) -> Self {
        self.with_mass(f64::INFINITY)
    }

    #[inline]
    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = [position.x, position.y];
        self
    }

    #[inline]
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = [velocity.x, velocity.y];
        self
    }

    #[inline]
    pub fn with_angle(mut self, degrees: f64) -> Self {
        self.angle = degrees;
        self
    }

    #[inline]
    pub fn with_angular_velocity(mut self, degrees_per_second: f64) -> Self {
        self.angular_velocity = degrees_per_second;
        self
    }

    pub fn position(&self) -> Vec2 {
        to_vec(self.position)
    }

    pub fn velocity(&self) -> Vec2 {
        to_vec(self.velocity)
    }
}

/// Which shape to build, with its geometry.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-types", derive(serde::Serialize, serde::Deserialize))]
pub enum ShapeDesc {
    Circle {
        radius: f64,
    },
    Polygon {
        /// Body-local points.
        points: Vec<[f64; 2]>,
        /// Move the local origin to the centre of mass when mass properties are derived.
        #[cfg_attr(feature = "serde-types", serde(default = "default_recenter"))]
        recenter: bool,
    },
    /// World-space boundary points. The body sits at `point1`.
    Wall { point1: [f64; 2], point2: [f64; 2] },
}

#[cfg(feature = "serde-types")]
fn default_recenter() -> bool {
    true
}

impl ShapeDesc {
    pub fn polygon(points: &[Vec2]) -> Self {
        ShapeDesc::Polygon {
            points: points.iter().map(|p| [p.x, p.y]).collect(),
            recenter: true,
        }
    }

    pub fn wall(point1: Vec2, point2: Vec2) -> Self {
        ShapeDesc::Wall {
            point1: [point1.x, point1.y],
            point2: [point2.x, point2.y],
        }
    }

    /// Validates the geometry and builds the shape.
    pub fn build(&self) -> Result<Shape> {
        Ok(match self {
            ShapeDesc::Circle { radius } => Shape::Circle(Circle::new(*radius)?),
            ShapeDesc::Polygon { points, .. } => Shape::Polygon(ConvexPolygon::new(
                points.iter().copied().map(to_vec).collect(),
            )?),
            ShapeDesc::Wall { point1, point2 } => {
                Shape::Wall(Wall::new(to_vec(*point1), to_vec(*point2))?)
            }
        })
    }

    pub fn recenter(&self) -> bool {
        match self {
            ShapeDesc::Polygon { recenter, .. } => *recenter,
            _ => false,
        }
    }
}

#[inline]
fn to_vec(a: [f64; 2]) -> Vec2 {
    Vec2::new(a[0], a[1])
}
