use super::config::{BodyConfig, ShapeDesc};
use super::rigid_body::{Mass, RigidBody};
use crate::common::{BodyProperties, PhysicsError, Result};
use crate::integration::integrator;
use crate::math::{Vec2, Vec2Ext};
use crate::shapes::{MassProperties, Shape, ShapeKind};

/// A simulated object: motion state, collision shape and level metadata.
///
/// The shape's world-space cache is refreshed every time the motion state changes position or
/// angle through this type, so the body's fields are only reachable through methods.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    rigid: RigidBody,
    shape: Shape,
    pub properties: BodyProperties,
}

impl Body {
    /// Builds a body from a shape descriptor and its configuration.
    pub fn new(shape: &ShapeDesc, config: &BodyConfig, properties: BodyProperties) -> Result<Self> {
        Self::from_shape(shape.build()?, config, shape.recenter(), properties)
    }

    /// Builds a body around an already-constructed shape.
    ///
    /// Mass and moment of inertia follow these rules:
    /// - walls are always static,
    /// - `density` derives mass, and the moment of inertia unless one is given,
    /// - an explicit finite `mass` derives the moment of inertia of a uniform body of that mass
    ///   unless one is given,
    /// - an infinite `mass` makes a static body whose moment of inertia is infinite too, even
    ///   when one is given,
    /// - with neither, the mass is 1.
    ///
    /// When mass properties are derived for a polygon and `recenter` is set, the polygon's
    /// local origin moves to its centre of mass and the position follows so the world-space
    /// outline stays put.
    pub fn from_shape(
        mut shape: Shape,
        config: &BodyConfig,
        recenter: bool,
        properties: BodyProperties,
    ) -> Result<Self> {
        if config.mass.is_some() && config.density.is_some() {
            return Err(PhysicsError::MassAndDensity);
        }
        let wall_anchor = match &shape {
            Shape::Wall(wall) => Some(wall.point1),
            _ => None,
        };
        let mut rigid = match wall_anchor {
            Some(point1) => RigidBody::new_static(point1),
            None => {
                let (mass, inertia, derived) = Self::mass_model(&shape, config)?;
                let mut rigid = RigidBody::new(mass, inertia);
                rigid.position = config.position();
                rigid.angle = config.angle;
                if let (Shape::Polygon(polygon), Some(props), true) = (&mut shape, derived, recenter) {
                    polygon.recenter(props.center_of_mass);
                    rigid.position += props.center_of_mass.rotated_deg(config.angle);
                }
                rigid
            }
        };
        rigid.velocity = config.velocity();
        rigid.angular_velocity = if rigid.moment_of_inertia.is_infinite() {
            0.0
        } else {
            config.angular_velocity
        };

        let mut body = Body {
            rigid,
            shape,
            properties,
        };
        body.refresh();
        log::debug!(
            "built {:?} body at {:?} with mass {}",
            body.kind(),
            body.position(),
            body.rigid.mass.value()
        );
        Ok(body)
    }

    /// Resolves mass and moment of inertia for a non-wall shape. Also returns the uniform
    /// mass properties when they were needed.
    fn mass_model(
        shape: &Shape,
        config: &BodyConfig,
    ) -> Result<(Mass, Mass, Option<MassProperties>)> {
        let explicit_inertia = config.moment_of_inertia.map(Mass::inertia).transpose()?;

        match config.density {
            Some(density) => {
                if !(density > 0.0 && density.is_finite()) {
                    return Err(PhysicsError::InvalidDensity(density));
                }
                let props = shape.mass_properties(density)?;
                let inertia = match explicit_inertia {
                    Some(inertia) => inertia,
                    None => Mass::inertia(props.moment_of_inertia)?,
                };
                Ok((Mass::new(props.mass)?, inertia, Some(props)))
            }
            None => match Mass::new(config.mass.unwrap_or(1.0))? {
                // Immovable bodies never rotate either
                Mass::Infinite => Ok((Mass::Infinite, Mass::Infinite, None)),
                finite => match explicit_inertia {
                    Some(inertia) => Ok((finite, inertia, None)),
                    None => {
                        let props = shape.mass_properties(1.0)?.with_mass(finite.value());
                        Ok((finite, Mass::inertia(props.moment_of_inertia)?, Some(props)))
                    }
                },
            },
        }
    }

    /// Convenience constructor for a circle with default metadata.
    pub fn circle(radius: f64, config: &BodyConfig) -> Result<Self> {
        Self::new(&ShapeDesc::Circle { radius }, config, BodyProperties::default())
    }

    /// Convenience constructor for a re-centred polygon with default metadata.
    pub fn polygon(points: &[Vec2], config: &BodyConfig) -> Result<Self> {
        Self::new(&ShapeDesc::polygon(points), config, BodyProperties::default())
    }

    /// Convenience constructor for a wall with default metadata.
    pub fn wall(point1: Vec2, point2: Vec2) -> Result<Self> {
        Self::new(
            &ShapeDesc::wall(point1, point2),
            &BodyConfig::default(),
            BodyProperties::default(),
        )
    }

    pub fn with_properties(mut self, properties: BodyProperties) -> Self {
        self.properties = properties;
        self
    }

    fn refresh(&mut self) {
        self.shape.refresh(self.rigid.position, self.rigid.angle);
    }

    pub fn rigid(&self) -> &RigidBody {
        &self.rigid
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    pub fn position(&self) -> Vec2 {
        self.rigid.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.rigid.velocity
    }

    pub fn angle(&self) -> f64 {
        self.rigid.angle
    }

    pub fn angular_velocity(&self) -> f64 {
        self.rigid.angular_velocity
    }

    pub fn mass(&self) -> Mass {
        self.rigid.mass
    }

    pub fn moment_of_inertia(&self) -> Mass {
        self.rigid.moment_of_inertia
    }

    pub fn is_static(&self) -> bool {
        self.rigid.is_static()
    }

    /// World-space polygon points, for polygons only.
    pub fn world_points(&self) -> Option<&[Vec2]> {
        match &self.shape {
            Shape::Polygon(polygon) => Some(polygon.points()),
            _ => None,
        }
    }

    /// World-space polygon edge normals, for polygons only.
    pub fn world_normals(&self) -> Option<&[Vec2]> {
        match &self.shape {
            Shape::Polygon(polygon) => Some(polygon.normals()),
            _ => None,
        }
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.rigid.velocity = velocity;
    }

    pub fn set_angular_velocity(&mut self, angular_velocity: f64) {
        self.rigid.angular_velocity = angular_velocity;
    }

    pub fn clear_force(&mut self) {
        self.rigid.clear_force();
    }

    pub fn add_force(&mut self, force: Vec2) {
        self.rigid.add_force(force);
    }

    pub fn add_torque(&mut self, torque: f64) {
        self.rigid.add_torque(torque);
    }

    /// Applies a force at a world-space point, adding the torque it produces about the centre.
    pub fn add_force_at_point(&mut self, force: Vec2, point: Vec2) {
        self.rigid.add_force_at_point(force, point);
    }

    pub fn apply_impulse(&mut self, impulse: Vec2, point: Option<Vec2>) {
        self.rigid.apply_impulse(impulse, point);
    }

    /// Advances the motion state by `dt` and refreshes the shape's world-space geometry.
    pub fn integrate(&mut self, dt: f64) {
        integrator::integrate(&mut self.rigid, dt);
        self.refresh();
    }

    /// Overwrites position and/or angle without touching velocity.
    pub fn teleport(&mut self, position: Option<Vec2>, angle: Option<f64>) {
        self.rigid.teleport(position, angle);
        self.refresh();
    }

    /// Moves the body by `offset`, e.g. for positional correction or a camera shift.
    pub fn translate(&mut self, offset: Vec2) {
        let position = self.rigid.position + offset;
        self.teleport(Some(position), None);
    }

    /// Hit test for picking.
    pub fn contains(&self, point: Vec2) -> bool {
        self.shape.contains(self.rigid.position, point)
    }
}
