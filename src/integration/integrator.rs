use crate::objects::rigid_body::RigidBody;

/// Integrates the rigid body's state forward in time using Semi-Implicit Euler.
///
/// Velocity is updated from the accumulated force first and the new velocity moves the body,
/// likewise for torque and angle. Infinite mass or inertia contributes no acceleration, but a
/// body that already has velocity keeps moving. Accumulators are left for the owner to clear.
pub fn integrate(body: &mut RigidBody, dt: f64) {
    // --- Linear Motion --- //
    let linear_acceleration = body.force * body.mass.inv();
    body.velocity += linear_acceleration * dt;
    body.position += body.velocity * dt;

    // --- Angular Motion (degrees) --- //
    let angular_acceleration = body.torque * body.moment_of_inertia.inv();
    body.angular_velocity += angular_acceleration * dt;
    body.angle += body.angular_velocity * dt;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec2;
    use crate::objects::rigid_body::Mass;
    const EPSILON: f64 = 1e-9; // Slightly larger epsilon for integration tests

    fn body(mass: f64, inertia: f64) -> RigidBody {
        RigidBody::new(Mass::new(mass).unwrap(), Mass::inertia(inertia).unwrap())
    }

    #[test]
    fn test_integrate_linear_motion_no_force() {
        let mut rb = body(1.0, 1.0);
        rb.velocity = Vec2::new(10.0, -5.0);

        integrate(&mut rb, 0.1);

        assert!((rb.position.x - 1.0).abs() < EPSILON);
        assert!((rb.position.y - -0.5).abs() < EPSILON);
        assert_eq!(rb.velocity, Vec2::new(10.0, -5.0)); // Velocity unchanged
    }

    #[test]
    fn test_integrate_linear_motion_constant_force() {
        let mut rb = body(2.0, 1.0);
        rb.add_force(Vec2::new(10.0, 0.0));
        // Expected acceleration a = F/m = (5, 0)

        integrate(&mut rb, 0.1);

        // v = v0 + a*dt = (0.5, 0)
        assert!((rb.velocity.x - 0.5).abs() < EPSILON);
        assert!(rb.velocity.y.abs() < EPSILON);
        // p = p0 + v*dt uses the updated velocity = (0.05, 0)
        assert!((rb.position.x - 0.05).abs() < EPSILON);
        assert!(rb.position.y.abs() < EPSILON);
        // Accumulators are not cleared by integration
        assert_eq!(rb.force, Vec2::new(10.0, 0.0));
    }

    #[test]
    fn test_integrate_angular_motion_constant_torque() {
        let mut rb = body(1.0, 4.0);
        rb.add_torque(8.0);
        let dt = 0.1;

        integrate(&mut rb, dt);

        // omega = T/I*dt = 0.2, theta = omega*dt = 0.02
        assert!((rb.angular_velocity - 0.2).abs() < EPSILON);
        assert!((rb.angle - 0.02).abs() < EPSILON);
    }

    #[test]
    fn test_integrate_static_object_ignores_force() {
        let mut rb = RigidBody::new_static(Vec2::new(1.0, 1.0));
        rb.add_force(Vec2::new(10.0, 10.0));
        rb.add_torque(10.0);

        let initial_state = rb.clone();
        integrate(&mut rb, 0.1);

        assert_eq!(rb, initial_state);
    }

    #[test]
    fn test_integrate_static_object_with_velocity_moves() {
        // Kinematic platform: infinite mass but an initial velocity
        let mut rb = RigidBody::new_static(Vec2::zero());
        rb.velocity = Vec2::new(2.0, 0.0);
        integrate(&mut rb, 0.5);
        assert!((rb.position.x - 1.0).abs() < EPSILON);
        assert_eq!(rb.velocity, Vec2::new(2.0, 0.0));
    }
}
