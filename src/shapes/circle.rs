use std::f64::consts::PI;

use super::MassProperties;
use crate::common::{PhysicsError, Result};
use crate::math::Vec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub radius: f64,
}

impl Circle {
    pub fn new(radius: f64) -> Result<Self> {
        if !(radius > 0.0 && radius.is_finite()) {
            return Err(PhysicsError::InvalidRadius(radius));
        }
        Ok(Self { radius })
    }

    pub fn area(&self) -> f64 {
        PI * self.radius * self.radius
    }

    /// Mass properties of a uniform disc: `m = ρπr²`, `I = ½mr²`.
    pub fn mass_properties(&self, density: f64) -> MassProperties {
        let mass = density * self.area();
        MassProperties {
            mass,
            moment_of_inertia: 0.5 * mass * self.radius * self.radius,
            center_of_mass: Vec2::zero(),
        }
    }

    pub fn contains(&self, center: Vec2, point: Vec2) -> bool {
        (point - center).mag_sq() <= self.radius * self.radius
    }
}
