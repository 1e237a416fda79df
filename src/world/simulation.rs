use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::collision::{self, Contact, ContactGeometry, ContactParams, Impact};
use crate::common::{PhysicsError, Result};
use crate::math::Vec2;
use crate::objects::{Body, Mass};

/// Settings of a [`Simulation`], typically loaded alongside the level.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-types", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-types", serde(default))]
pub struct SimulationConfig {
    /// Acceleration applied to every body with finite mass.
    pub gravity: [f64; 2],
    /// Fixed time step used by [`Simulation::update`].
    pub dt: f64,
    /// Seed of the random source used for degenerate contact normals.
    pub seed: u64,
    /// Skip contact checks between two immovable bodies.
    pub skip_static_pairs: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            gravity: [0.0, 0.0],
            dt: 1.0 / 60.0,
            seed: 0,
            skip_static_pairs: true,
        }
    }
}

impl SimulationConfig {
    pub fn with_gravity(mut self, gravity: Vec2) -> Self {
        self.gravity = [gravity.x, gravity.y];
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn gravity(&self) -> Vec2 {
        Vec2::new(self.gravity[0], self.gravity[1])
    }
}

/// A force, torque or impulse applied to one body for a single tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExternalLoad {
    Force { body: usize, force: Vec2 },
    /// A force at a world-space point, which also produces torque about the centre.
    ForceAtPoint { body: usize, force: Vec2, point: Vec2 },
    Torque { body: usize, torque: f64 },
    /// Applied at `point` (world coordinates) if given, otherwise at the centre of mass.
    Impulse {
        body: usize,
        impulse: Vec2,
        point: Option<Vec2>,
    },
}

impl ExternalLoad {
    pub fn body(&self) -> usize {
        match *self {
            ExternalLoad::Force { body, .. }
            | ExternalLoad::ForceAtPoint { body, .. }
            | ExternalLoad::Torque { body, .. }
            | ExternalLoad::Impulse { body, .. } => body,
        }
    }
}

/// An overlapping pair found during the last tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactEvent {
    pub a: usize,
    pub b: usize,
    /// Geometry before resolution, normal pointing from `b` toward `a`.
    pub geometry: ContactGeometry,
    pub impact: Option<Impact>,
    /// The pair only reported overlap because one of the bodies is a sensor.
    pub sensor: bool,
}

/// Gets mutable references to two different bodies.
fn pair_mut(bodies: &mut [Body], i: usize, j: usize) -> Result<(&mut Body, &mut Body)> {
    let len = bodies.len();
    if i >= len {
        return Err(PhysicsError::UnknownBody(i));
    }
    if j >= len {
        return Err(PhysicsError::UnknownBody(j));
    }
    if i == j {
        return Err(PhysicsError::SameBody(i));
    }
    if i < j {
        let (head, tail) = bodies.split_at_mut(j);
        Ok((&mut head[i], &mut tail[0]))
    } else {
        let (head, tail) = bodies.split_at_mut(i);
        Ok((&mut tail[0], &mut head[j]))
    }
}

/// The whole simulated state: bodies, tick counter and the seeded random source.
///
/// A tick runs, in order: clear forces, apply gravity and external loads, detect and resolve
/// contacts pair by pair, integrate. Pairs are handled sequentially in index order, so an
/// earlier pair's correction changes what later pairs see within the same tick.
#[derive(Debug, Clone)]
pub struct Simulation {
    bodies: Vec<Body>,
    tick: u64,
    config: SimulationConfig,
    rng: StdRng,
    events: Vec<ContactEvent>,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(SimulationConfig::default())
    }
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Self {
        Simulation {
            bodies: Vec::new(),
            tick: 0,
            rng: StdRng::seed_from_u64(config.seed),
            config,
            events: Vec::new(),
        }
    }

    /// Adds a body and returns its index.
    pub fn add_body(&mut self, body: Body) -> usize {
        let index = self.bodies.len();
        log::debug!("adding {:?} body {} tagged {:?}", body.kind(), index, body.properties.tag);
        self.bodies.push(body);
        index
    }

    /// Removes a body. Bodies after it shift down by one index.
    pub fn remove_body(&mut self, index: usize) -> Result<Body> {
        if index >= self.bodies.len() {
            return Err(PhysicsError::UnknownBody(index));
        }
        let body = self.bodies.remove(index);
        log::debug!("removed body {} tagged {:?}", index, body.properties.tag);
        Ok(body)
    }

    pub fn body(&self, index: usize) -> Option<&Body> {
        self.bodies.get(index)
    }

    pub fn body_mut(&mut self, index: usize) -> Option<&mut Body> {
        self.bodies.get_mut(index)
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Contacts found during the last tick.
    pub fn events(&self) -> &[ContactEvent] {
        &self.events
    }

    /// Shifts every body by the same offset, e.g. to follow the player with the camera.
    pub fn translate_all(&mut self, offset: Vec2) {
        for body in self.bodies.iter_mut() {
            body.translate(offset);
        }
    }

    /// Queries the contact between two bodies directly, outside a tick.
    ///
    /// Values set in `params` win over the pair's combined properties. With `resolve` false
    /// neither body is touched.
    pub fn contact_between(
        &mut self,
        a: usize,
        b: usize,
        resolve: bool,
        params: ContactParams,
    ) -> Result<Option<Contact>> {
        let (body_a, body_b) = pair_mut(&mut self.bodies, a, b)?;
        let params = params.or(body_a.properties.contact_params(&body_b.properties));
        Ok(collision::generate(body_a, body_b, resolve, params, &mut self.rng))
    }

    /// Runs one tick of length `dt` in place.
    ///
    /// Fails without changing anything if a load names a body that does not exist. A
    /// non-positive `dt` leaves the state unchanged.
    pub fn advance(&mut self, dt: f64, loads: &[ExternalLoad]) -> Result<()> {
        if let Some(load) = loads.iter().find(|load| load.body() >= self.bodies.len()) {
            return Err(PhysicsError::UnknownBody(load.body()));
        }
        if dt <= 0.0 {
            return Ok(());
        }

        // 1. Forces
        let gravity = self.config.gravity();
        for body in self.bodies.iter_mut() {
            body.clear_force();
            if let Mass::Finite { mass, .. } = body.mass() {
                body.add_force(gravity * mass);
            }
        }
        for load in loads {
            let body = &mut self.bodies[load.body()];
            match *load {
                ExternalLoad::Force { force, .. } => body.add_force(force),
                ExternalLoad::ForceAtPoint { force, point, .. } => body.add_force_at_point(force, point),
                ExternalLoad::Torque { torque, .. } => body.add_torque(torque),
                ExternalLoad::Impulse { impulse, point, .. } => body.apply_impulse(impulse, point),
            }
        }

        // 2. Contacts
        self.events.clear();
        for i in 0..self.bodies.len() {
            for j in (i + 1)..self.bodies.len() {
                self.process_pair(i, j)?;
            }
        }

        // 3. Integration
        for body in self.bodies.iter_mut() {
            body.integrate(dt);
        }
        self.tick += 1;
        Ok(())
    }

    /// Runs one tick with the configured fixed time step.
    pub fn update(&mut self, loads: &[ExternalLoad]) -> Result<()> {
        let dt = self.config.dt;
        self.advance(dt, loads)
    }

    fn process_pair(&mut self, i: usize, j: usize) -> Result<()> {
        let skip_static = self.config.skip_static_pairs;
        let (a, b) = pair_mut(&mut self.bodies, i, j)?;
        if skip_static && a.is_static() && b.is_static() {
            return Ok(());
        }

        let resolve = a.properties.resolves_with(&b.properties);
        let params = a.properties.contact_params(&b.properties);
        let Some(contact) = collision::generate(a, b, resolve, params, &mut self.rng) else {
            return Ok(());
        };
        if !contact.geometry.is_overlapping() {
            return Ok(());
        }

        if !resolve {
            log::debug!(
                "sensor overlap between {} ({:?}) and {} ({:?})",
                i,
                a.properties.tag,
                j,
                b.properties.tag
            );
        }
        self.events.push(ContactEvent {
            a: i,
            b: j,
            geometry: contact.geometry,
            impact: contact.impact,
            sensor: !resolve,
        });
        Ok(())
    }
}

/// Runs one tick of length `dt` on `state` and returns the new state.
pub fn step(mut state: Simulation, dt: f64, loads: &[ExternalLoad]) -> Result<Simulation> {
    state.advance(dt, loads)?;
    Ok(state)
}
