pub mod detection;
pub mod manifold;
pub mod resolution;

// Re-export key types
pub use detection::{detect, measure};
pub use manifold::ContactGeometry;
pub use resolution::{resolve, ContactParams, Impact};

use crate::objects::Body;
use rand::Rng;

/// A contact between two bodies as returned by [`generate`].
///
/// Keeps the parameters given at generation time so the contact can be resolved later with
/// per-call overrides layered on top.
#[derive(Debug, Clone, PartialEq)]
pub struct Contact {
    pub geometry: ContactGeometry,
    pub params: ContactParams,
    /// Impulse applied by the last resolution, if any.
    pub impact: Option<Impact>,
    /// Whether resolution has run on this contact.
    pub resolved: bool,
}

impl Contact {
    /// Whether the contact counts as a hit: for a resolved contact, whether an impulse was
    /// applied; otherwise whether the shapes overlap.
    pub fn is_hit(&self) -> bool {
        if self.resolved {
            self.impact.is_some()
        } else {
            self.geometry.is_overlapping()
        }
    }

    #[inline]
    pub fn overlap(&self) -> f64 {
        self.geometry.overlap
    }

    /// Re-measures the geometry, since the bodies may have moved since generation, and resolves
    /// it. Values set in `overrides` win over the generation-time parameters.
    ///
    /// `a` and `b` must be given in the same order as to [`generate`].
    pub fn resolve<R: Rng + ?Sized>(
        &mut self,
        a: &mut Body,
        b: &mut Body,
        overrides: &ContactParams,
        rng: &mut R,
    ) -> bool {
        if let Some(geometry) = measure(a, b, rng) {
            self.geometry = geometry;
        }
        self.impact = resolution::resolve(&self.geometry, a, b, &overrides.or(self.params));
        self.resolved = true;
        self.impact.is_some()
    }
}

/// Computes the contact between `a` and `b` and, if `resolve` is set, resolves it right away
/// with `params`.
///
/// Returns `None` for pairs that never collide (two walls). Otherwise the contact is returned
/// even when the bodies are apart; check [`Contact::is_hit`]. Passing `resolve: false` gives
/// sensor behaviour: overlap is reported but neither body is touched.
pub fn generate<R: Rng + ?Sized>(
    a: &mut Body,
    b: &mut Body,
    resolve: bool,
    params: ContactParams,
    rng: &mut R,
) -> Option<Contact> {
    let geometry = measure(a, b, rng)?;
    let mut contact = Contact {
        geometry,
        params,
        impact: None,
        resolved: false,
    };
    if resolve {
        contact.impact = resolution::resolve(&contact.geometry, a, b, &params);
        contact.resolved = true;
    }
    Some(contact)
}
