use crate::common::{PhysicsError, Result};
use crate::math::{Vec2, Vec2Ext};

/// Mass or moment of inertia of a body, which can be infinite.
///
/// Stores the inverse alongside the value since the contact solver only ever needs the inverse.
/// Infinite is the only way to make a body immovable or non-rotating.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mass {
    Finite { mass: f64, inverse: f64 },
    Infinite,
}

impl Mass {
    /// Validates a mass value. Positive finite values and `f64::INFINITY` are accepted.
    pub fn new(mass: f64) -> Result<Self> {
        if mass == f64::INFINITY {
            Ok(Mass::Infinite)
        } else if mass > 0.0 && mass.is_finite() {
            Ok(Mass::Finite {
                mass,
                inverse: 1.0 / mass,
            })
        } else {
            Err(PhysicsError::InvalidMass(mass))
        }
    }

    /// Validates a moment of inertia, with the same rules as [`Mass::new`].
    pub fn inertia(value: f64) -> Result<Self> {
        Mass::new(value).map_err(|_| PhysicsError::InvalidInertia(value))
    }

    /// Get the inverse of the mass, which is zero if the mass is infinite.
    #[inline]
    pub fn inv(&self) -> f64 {
        match self {
            Mass::Finite { inverse, .. } => *inverse,
            Mass::Infinite => 0.0,
        }
    }

    #[inline]
    pub fn value(&self) -> f64 {
        match self {
            Mass::Finite { mass, .. } => *mass,
            Mass::Infinite => f64::INFINITY,
        }
    }

    #[inline]
    pub fn is_infinite(&self) -> bool {
        matches!(self, Mass::Infinite)
    }
}

/// Motion state of a body: no geometry, just mass, kinematics and the force accumulators.
///
/// Angles are in degrees and angular velocity in degrees per second.
#[derive(Debug, Clone, PartialEq)]
pub struct RigidBody {
    pub mass: Mass,
    pub moment_of_inertia: Mass,

    // Primary state
    pub position: Vec2,
    pub velocity: Vec2,
    pub angle: f64,
    pub angular_velocity: f64,

    // Accumulators for forces/torques applied during a time step
    pub force: Vec2,
    pub torque: f64,
}

impl RigidBody {
    /// Creates a body at rest at the origin. An infinite mass always comes with an infinite
    /// moment of inertia, whatever `moment_of_inertia` says.
    pub fn new(mass: Mass, moment_of_inertia: Mass) -> Self {
        let moment_of_inertia = if mass.is_infinite() {
            Mass::Infinite
        } else {
            moment_of_inertia
        };
        Self {
            mass,
            moment_of_inertia,
            position: Vec2::zero(),
            velocity: Vec2::zero(),
            angle: 0.0,
            angular_velocity: 0.0,
            force: Vec2::zero(),
            torque: 0.0,
        }
    }

    /// Creates an immovable, non-rotating body at `position`.
    pub fn new_static(position: Vec2) -> Self {
        Self {
            position,
            ..Self::new(Mass::Infinite, Mass::Infinite)
        }
    }

    pub fn is_static(&self) -> bool {
        self.mass.is_infinite()
    }

    /// Zeroes the force and torque accumulators. Owners call this at the start of every tick.
    pub fn clear_force(&mut self) {
        self.force = Vec2::zero();
        self.torque = 0.0;
    }

    /// Applies a force at the center of mass.
    pub fn add_force(&mut self, force: Vec2) {
        self.force += force;
    }

    pub fn add_torque(&mut self, torque: f64) {
        self.torque += torque;
    }

    /// Applies a force at a specific point (in world coordinates).
    /// This generates both linear force and torque.
    pub fn add_force_at_point(&mut self, force: Vec2, point_world: Vec2) {
        self.force += force;
        self.torque += (point_world - self.position).cross(force);
    }

    /// Instantly changes velocity by `impulse / mass`. When a world-space `point` is given the
    /// off-centre part of the impulse also spins the body. Infinite mass or inertia ignores the
    /// corresponding part.
    pub fn apply_impulse(&mut self, impulse: Vec2, point: Option<Vec2>) {
        self.velocity += impulse * self.mass.inv();
        if let Some(point) = point {
            let arm = point - self.position;
            self.angular_velocity += (arm.cross(impulse) * self.moment_of_inertia.inv()).to_degrees();
        }
    }

    /// Overwrites position and/or angle without touching velocity.
    pub fn teleport(&mut self, position: Option<Vec2>, angle: Option<f64>) {
        if let Some(position) = position {
            self.position = position;
        }
        if let Some(angle) = angle {
            self.angle = angle;
        }
    }

    /// Linear momentum `m·v`, zero for an immovable body.
    pub fn momentum(&self) -> Vec2 {
        match self.mass {
            Mass::Finite { mass, .. } => self.velocity * mass,
            Mass::Infinite => Vec2::zero(),
        }
    }
}
