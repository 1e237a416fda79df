//! Errors raised while building bodies and addressing them in a simulation.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PhysicsError {
    #[error("cannot specify both mass and density")]
    MassAndDensity,

    #[error("mass must be positive or infinite, got {0}")]
    InvalidMass(f64),

    #[error("moment of inertia must be positive or infinite, got {0}")]
    InvalidInertia(f64),

    #[error("density must be positive and finite, got {0}")]
    InvalidDensity(f64),

    #[error("circle radius must be positive and finite, got {0}")]
    InvalidRadius(f64),

    #[error("polygon needs at least 3 points, got {0}")]
    TooFewPoints(usize),

    #[error("polygon edge ending at point {index} has zero length")]
    DegenerateEdge { index: usize },

    #[error("polygon encloses no area")]
    ZeroArea,

    #[error("wall boundary points coincide")]
    DegenerateWall,

    #[error("no body with index {0}")]
    UnknownBody(usize),

    #[error("body {0} cannot be paired with itself")]
    SameBody(usize),
}

pub type Result<T> = std::result::Result<T, PhysicsError>;
