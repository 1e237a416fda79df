//! Level-authoring metadata carried alongside a body's physics state.

use crate::collision::ContactParams;

/// Per-body properties set once at load time that shape how the body's contacts are resolved.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-types", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-types", serde(default))]
pub struct BodyProperties {
    /// Coefficient of restitution (bounciness). Range [0, 1].
    /// 0 = perfectly inelastic (no bounce), 1 = perfectly elastic.
    pub restitution: f64,
    /// Extra bounce that replaces restitution when present.
    pub rebound: Option<f64>,
    /// Coulomb friction coefficient. Range [0, infinity).
    pub friction: f64,
    pub score: i64,
    /// When false the body is a sensor: contacts report overlap but never push.
    pub resolve: bool,
    /// Free-form label used by the game layer, e.g. "player" or "goal".
    pub tag: String,
}

impl BodyProperties {
    /// Creates properties with the given restitution and friction, clamped to their valid ranges.
    pub fn new(restitution: f64, friction: f64) -> Self {
        BodyProperties {
            restitution: restitution.clamp(0.0, 1.0),
            friction: friction.max(0.0),
            ..Default::default()
        }
    }

    pub fn sensor(mut self) -> Self {
        self.resolve = false;
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_rebound(mut self, rebound: f64) -> Self {
        self.rebound = Some(rebound);
        self
    }

    /// Combines the metadata of two bodies into the parameters for their shared contact.
    ///
    /// Restitution and rebound take the larger of whichever values are present, so a bouncy
    /// level object bounces everything that hits it. Friction takes the geometric mean.
    pub fn contact_params(&self, other: &BodyProperties) -> ContactParams {
        let rebound = match (self.rebound, other.rebound) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        };
        ContactParams {
            restitution: Some(self.restitution.max(other.restitution)),
            rebound,
            friction: Some((self.friction * other.friction).sqrt()),
        }
    }

    /// Whether contacts between the two bodies should push them apart.
    pub fn resolves_with(&self, other: &BodyProperties) -> bool {
        self.resolve && other.resolve
    }
}

impl Default for BodyProperties {
    fn default() -> Self {
        BodyProperties {
            restitution: 0.2,
            rebound: None,
            friction: 0.5,
            score: 0,
            resolve: true,
            tag: String::new(),
        }
    }
}
