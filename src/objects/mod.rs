pub mod body;
pub mod config;
pub mod rigid_body;

pub use body::Body;
pub use config::{BodyConfig, ShapeDesc};
pub use rigid_body::{Mass, RigidBody};
