pub mod error;
pub mod properties;

pub use error::{PhysicsError, Result};
pub use properties::BodyProperties;
