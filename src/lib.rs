//! A small 2D rigid-body engine: circles, convex polygons and static walls, resolved with
//! impulses, Coulomb friction and positional correction.
//!
//! Angles are in degrees and angular velocities in degrees per second.

pub mod collision;
pub mod common;
pub mod integration;
pub mod math;
pub mod objects;
pub mod shapes;
pub mod world;

// Re-export key types for easier use
pub use collision::{generate, Contact, ContactGeometry, ContactParams, Impact};
pub use common::{BodyProperties, PhysicsError, Result};
pub use math::{Vec2, Vec2Ext};
pub use objects::{Body, BodyConfig, Mass, RigidBody, ShapeDesc};
pub use shapes::{Circle, ConvexPolygon, Shape, ShapeKind, Wall};
pub use world::{step, ContactEvent, ExternalLoad, Simulation, SimulationConfig};
