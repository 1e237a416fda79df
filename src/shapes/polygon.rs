use super::MassProperties;
use crate::common::{PhysicsError, Result};
use crate::math::{Vec2, Vec2Ext};

/// A convex polygon defined by its points in body-local space.
///
/// Points are ordered consistently (either winding works, normals are oriented outward
/// during construction). `normals[i]` is the outward normal of the edge running from
/// point `i - 1` to point `i`.
///
/// The world-space points and normals are a cache recomputed by [`update_world`](Self::update_world)
/// whenever the owning body moves or turns.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvexPolygon {
    local_points: Vec<Vec2>,
    local_normals: Vec<Vec2>,
    world_points: Vec<Vec2>,
    world_normals: Vec<Vec2>,
    convex: bool,
}

impl ConvexPolygon {
    /// Creates a polygon from its local points.
    ///
    /// Fails on fewer than three points or a zero-length edge. A polygon that is not convex is
    /// accepted with a warning; its collisions will be wrong but it stays usable.
    pub fn new(local_points: Vec<Vec2>) -> Result<Self> {
        let n = local_points.len();
        if n < 3 {
            return Err(PhysicsError::TooFewPoints(n));
        }

        let mut local_normals = Vec::with_capacity(n);
        for i in 0..n {
            let edge = local_points[i] - local_points[(i + n - 1) % n];
            if edge.mag_sq() < 1e-24 {
                return Err(PhysicsError::DegenerateEdge { index: i });
            }
            // Quarter turn of the edge, flipped below where that points inward
            local_normals.push(edge.normalized().rotated_deg(90.0));
        }

        let mut polygon = ConvexPolygon {
            world_points: local_points.clone(),
            world_normals: local_normals.clone(),
            local_points,
            local_normals,
            convex: true,
        };
        polygon.orient_normals();
        polygon.world_normals = polygon.local_normals.clone();
        Ok(polygon)
    }

    /// Points every edge normal away from the rest of the polygon and records whether the
    /// polygon is convex. A polygon is convex when all other points lie on one side of
    /// every edge.
    fn orient_normals(&mut self) {
        let n = self.local_points.len();
        let mut convex = true;
        for i in 0..n {
            let base = self.local_points[i];
            let normal = self.local_normals[i];
            let (mut min_d, mut max_d) = (f64::INFINITY, f64::NEG_INFINITY);
            // Every point except the two ends of edge i
            for j in (i + 1)..(i + n - 1) {
                let d = (self.local_points[j % n] - base).dot(normal);
                min_d = min_d.min(d);
                max_d = max_d.max(d);
            }
            if max_d <= 0.0 {
                continue;
            } else if min_d >= 0.0 {
                self.local_normals[i] = -normal;
            } else {
                convex = false;
            }
        }
        if !convex {
            log::warn!(
                "non-convex polygon with {} points defined, its collisions will be incorrect",
                n
            );
        }
        self.convex = convex;
    }

    pub fn is_convex(&self) -> bool {
        self.convex
    }

    pub fn local_points(&self) -> &[Vec2] {
        &self.local_points
    }

    pub fn local_normals(&self) -> &[Vec2] {
        &self.local_normals
    }

    /// World-space points, as of the last [`update_world`](Self::update_world).
    pub fn points(&self) -> &[Vec2] {
        &self.world_points
    }

    /// World-space outward edge normals, parallel to [`points`](Self::points).
    pub fn normals(&self) -> &[Vec2] {
        &self.world_normals
    }

    pub fn len(&self) -> usize {
        self.local_points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.local_points.is_empty()
    }

    /// Rotates (degrees) and translates the local geometry into the world-space cache.
    pub fn update_world(&mut self, position: Vec2, angle: f64) {
        for (world, local) in self.world_points.iter_mut().zip(&self.local_points) {
            *world = local.rotated_deg(angle) + position;
        }
        for (world, local) in self.world_normals.iter_mut().zip(&self.local_normals) {
            *world = local.rotated_deg(angle);
        }
    }

    /// Shifts the local points so that `center` becomes the local origin.
    /// The world cache is stale until the next [`update_world`](Self::update_world).
    pub fn recenter(&mut self, center: Vec2) {
        for p in self.local_points.iter_mut() {
            *p -= center;
        }
    }

    /// Mass, moment of inertia and centre of mass for a uniform `density`.
    ///
    /// Sums the triangles fanned out from the local origin over every edge, then moves the
    /// moment of inertia to the centre of mass with the parallel axis theorem. The winding
    /// sign cancels out, so either winding gives positive results.
    pub fn mass_properties(&self, density: f64) -> Result<MassProperties> {
        let n = self.local_points.len();
        let mut total_mass = 0.0;
        let mut total_inertia = 0.0;
        let mut com_numerator = Vec2::zero();

        for i in 0..n {
            let s0 = self.local_points[i];
            let s1 = self.local_points[(i + n - 1) % n];
            let delta_mass = density * 0.5 * s0.cross(s1);
            total_mass += delta_mass;
            total_inertia += delta_mass / 6.0 * (s0.dot(s0) + s1.dot(s1) + s0.dot(s1));
            com_numerator += delta_mass * (s0 + s1) / 3.0;
        }

        if total_mass.abs() < 1e-12 {
            return Err(PhysicsError::ZeroArea);
        }

        let center_of_mass = com_numerator / total_mass;
        let inertia_about_com = total_inertia - total_mass * center_of_mass.mag_sq();

        Ok(MassProperties {
            mass: total_mass.abs(),
            moment_of_inertia: inertia_about_com.abs(),
            center_of_mass,
        })
    }

    /// Whether a world-space point is inside (or on the boundary of) every edge half-plane.
    pub fn contains(&self, point: Vec2) -> bool {
        self.world_points
            .iter()
            .zip(&self.world_normals)
            .all(|(p, n)| (point - *p).dot(*n) <= 0.0)
    }
}
