use super::manifold::ContactGeometry;
use crate::math::{Vec2, Vec2Ext};
use crate::objects::Body;

/// Material parameters for resolving one contact. Every field is optional so that values from
/// different sources can be layered with [`ContactParams::or`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde-types", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-types", serde(default))]
pub struct ContactParams {
    pub restitution: Option<f64>,
    /// Replaces restitution when present.
    pub rebound: Option<f64>,
    pub friction: Option<f64>,
}

impl ContactParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_restitution(mut self, restitution: f64) -> Self {
        self.restitution = Some(restitution);
        self
    }

    pub fn with_rebound(mut self, rebound: f64) -> Self {
        self.rebound = Some(rebound);
        self
    }

    pub fn with_friction(mut self, friction: f64) -> Self {
        self.friction = Some(friction);
        self
    }

    /// Keeps the values set on `self` and takes the rest from `fallback`.
    ///
    /// Restitution and rebound travel together: if `self` sets either one, both come from
    /// `self`, so a fallback rebound never beats a restitution set on `self`.
    pub fn or(self, fallback: ContactParams) -> Self {
        let bounce = if self.restitution.is_some() || self.rebound.is_some() {
            self
        } else {
            fallback
        };
        ContactParams {
            restitution: bounce.restitution,
            rebound: bounce.rebound,
            friction: self.friction.or(fallback.friction),
        }
    }

    /// Restitution actually used: rebound if set, else restitution, else 0.
    #[inline]
    pub fn effective_restitution(&self) -> f64 {
        self.rebound.or(self.restitution).unwrap_or(0.0)
    }

    /// Friction actually used, 0 if unset.
    #[inline]
    pub fn effective_friction(&self) -> f64 {
        self.friction.unwrap_or(0.0)
    }
}

/// The impulse applied by a resolved contact. The first body received `impulse` and the second
/// its negation, both at `point`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Impact {
    pub normal_impulse: f64,
    pub friction_impulse: f64,
    /// Unit tangent the friction impulse acts along.
    pub tangent: Vec2,
    pub impulse: Vec2,
    pub point: Vec2,
}

/// Velocity of the material point of `body` at offset `arm` from its centre.
#[inline]
fn point_velocity(body: &Body, arm: Vec2) -> Vec2 {
    body.velocity() + arm.perp() * body.angular_velocity().to_radians()
}

/// Moves `a` along `direction` and `b` against it, each in proportion to its share of the
/// effective mass.
fn shift_apart(a: &mut Body, b: &mut Body, direction: Vec2, effective_mass: f64, distance: f64) {
    let step = direction * (effective_mass * distance);
    a.translate(step * a.mass().inv());
    b.translate(-step * b.mass().inv());
}

/// Resolves a contact between `a` and `b` whose geometry was measured in that order.
///
/// Overlapping bodies are first pushed apart along the normal. If they are also approaching at
/// the contact point, a normal impulse with the given restitution and a Coulomb friction impulse
/// are applied and the resulting [`Impact`] returned. A separating pair keeps the positional
/// correction but gets no impulse.
///
/// When friction is strong enough to stop the sliding, the bodies are also shifted along the
/// tangent by `overlap * dot(v, t) / dot(v, n)` in the same mass proportions. Otherwise the
/// friction impulse is capped at `friction * Jn` and the bodies slide freely.
pub fn resolve(
    geometry: &ContactGeometry,
    a: &mut Body,
    b: &mut Body,
    params: &ContactParams,
) -> Option<Impact> {
    let ContactGeometry {
        overlap,
        normal,
        point,
    } = *geometry;
    if overlap <= 0.0 {
        return None;
    }
    let restitution = params.effective_restitution();
    let friction = params.effective_friction();

    let arm_a = point - a.position();
    let arm_b = point - b.position();
    let inverse_effective_mass = a.mass().inv()
        + b.mass().inv()
        + arm_a.cross(normal).powi(2) * a.moment_of_inertia().inv()
        + arm_b.cross(normal).powi(2) * b.moment_of_inertia().inv();
    if inverse_effective_mass <= 0.0 {
        // Neither body can move
        return None;
    }
    let effective_mass = 1.0 / inverse_effective_mass;

    shift_apart(a, b, normal, effective_mass, overlap);

    let v = point_velocity(a, arm_a) - point_velocity(b, arm_b);
    let v_dot_n = v.dot(normal);
    if v_dot_n >= 0.0 {
        log::trace!("separating contact, overlap {} corrected along {:?}", overlap, normal);
        return None;
    }

    let mut tangent = normal.perp();
    let mut v_dot_t = v.dot(tangent);
    if v_dot_t > 0.0 {
        tangent = -tangent;
        v_dot_t = -v_dot_t;
    }

    let normal_impulse = -(1.0 + restitution) * effective_mass * v_dot_n;
    let max_friction = friction * normal_impulse;
    let mut friction_impulse = -effective_mass * v_dot_t;
    if friction_impulse <= max_friction {
        // Friction holds: undo the tangential drift picked up while penetrating
        let creep = overlap * v_dot_t / v_dot_n;
        shift_apart(a, b, tangent, effective_mass, creep);
        log::trace!("sticking contact, creep shift {}", creep);
    } else {
        friction_impulse = max_friction;
    }

    let impulse = normal * normal_impulse + tangent * friction_impulse;
    a.apply_impulse(impulse, Some(point));
    b.apply_impulse(-impulse, Some(point));

    log::trace!(
        "resolved contact: overlap {}, normal {:?}, effective mass {}, Jn {}, Jf {}",
        overlap,
        normal,
        effective_mass,
        normal_impulse,
        friction_impulse
    );

    Some(Impact {
        normal_impulse,
        friction_impulse,
        tangent,
        impulse,
        point,
    })
}
