//! End-to-end scenarios through the public API.

use impulse2d::collision::{measure, resolve};
use impulse2d::{
    generate, Body, BodyConfig, BodyProperties, ContactParams, ExternalLoad, Mass, Shape, ShapeDesc,
    Simulation, SimulationConfig, Vec2, Vec2Ext,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

const EPSILON: f64 = 1e-9;

// ============================================================================
// Helpers
// ============================================================================

fn rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn circle(position: Vec2, velocity: Vec2, radius: f64, mass: f64) -> Body {
    let config = BodyConfig::new()
        .with_mass(mass)
        .with_position(position)
        .with_velocity(velocity);
    Body::circle(radius, &config).unwrap()
}

fn square_points(min: Vec2, size: f64) -> Vec<Vec2> {
    vec![
        min,
        min + Vec2::new(size, 0.0),
        min + Vec2::new(size, size),
        min + Vec2::new(0.0, size),
    ]
}

fn total_momentum(bodies: &[&Body]) -> Vec2 {
    bodies
        .iter()
        .fold(Vec2::zero(), |sum, body| sum + body.rigid().momentum())
}

// ============================================================================
// Scenario 1: equal circles, head-on, elastic
// ============================================================================

#[test]
fn test_equal_circles_elastic_head_on() {
    let mut a = circle(Vec2::new(0.0, 0.0), Vec2::zero(), 5.0, 1.0);
    let mut b = circle(Vec2::new(8.0, 0.0), Vec2::new(-4.0, 0.0), 5.0, 1.0);

    let geometry = measure(&a, &b, &mut rng()).unwrap();
    assert!((geometry.overlap - 2.0).abs() < EPSILON);

    let params = ContactParams::new().with_restitution(1.0).with_friction(0.0);
    let contact = generate(&mut a, &mut b, true, params, &mut rng()).unwrap();
    assert!(contact.is_hit());

    // Separating afterwards
    let relative = (a.velocity() - b.velocity()).dot(geometry.normal);
    assert!(relative >= 0.0);
    // Equal masses swap velocities
    assert!((a.velocity() - Vec2::new(-4.0, 0.0)).mag() < EPSILON);
    assert!(b.velocity().mag() < EPSILON);
    assert!((total_momentum(&[&a, &b]) - Vec2::new(-4.0, 0.0)).mag() < EPSILON);
}

// ============================================================================
// Scenario 2: circle near a polygon corner
// ============================================================================

#[test]
fn test_circle_against_polygon_corner() {
    let ball = circle(Vec2::new(5.0, 5.0), Vec2::zero(), 5.0, 1.0);
    let block = Body::polygon(
        &square_points(Vec2::new(8.0, 8.0), 10.0),
        &BodyConfig::new().fixed(),
    )
    .unwrap();

    let geometry = measure(&ball, &block, &mut rng()).unwrap();

    let vertex_to_center = (Vec2::new(5.0, 5.0) - Vec2::new(8.0, 8.0)).normalized();
    assert!((geometry.normal - vertex_to_center).mag() < EPSILON);
    // Neither adjacent edge normal
    assert!((geometry.normal - Vec2::new(-1.0, 0.0)).mag() > 0.1);
    assert!((geometry.normal - Vec2::new(0.0, -1.0)).mag() > 0.1);
    assert!((geometry.overlap - (5.0 - 18.0f64.sqrt())).abs() < EPSILON);
}

// ============================================================================
// Scenario 3: non-convex polygon stays usable
// ============================================================================

#[test]
fn test_non_convex_polygon_is_usable() {
    let notch = [
        Vec2::new(0.0, 0.0),
        Vec2::new(4.0, 0.0),
        Vec2::new(4.0, 4.0),
        Vec2::new(2.0, 2.0),
        Vec2::new(0.0, 4.0),
    ];
    let desc = ShapeDesc::polygon(&notch);
    let config = BodyConfig::new()
        .with_density(1.0)
        .with_position(Vec2::new(0.0, 10.0));
    let body = Body::new(&desc, &config, BodyProperties::default()).unwrap();

    match body.shape() {
        Shape::Polygon(polygon) => assert!(!polygon.is_convex()),
        other => panic!("expected a polygon, got {:?}", other),
    }
    assert!(body.mass().value() > 0.0);

    let config = SimulationConfig::default().with_gravity(Vec2::new(0.0, -10.0));
    let mut sim = Simulation::new(config);
    sim.add_body(body);
    sim.add_body(Body::wall(Vec2::new(-10.0, 0.0), Vec2::new(10.0, 0.0)).unwrap());
    for _ in 0..60 {
        sim.update(&[]).unwrap();
    }
    assert_eq!(sim.tick(), 60);
    assert!(sim.body(0).unwrap().position().y.is_finite());
}

// ============================================================================
// Scenario 4: walls never collide
// ============================================================================

#[test]
fn test_wall_wall_never_collides() {
    let layouts = [
        (Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.0, 0.0), Vec2::new(-1.0, 0.0)),
        (Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.5, -1.0), Vec2::new(0.5, 1.0)),
        (Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.0, 5.0), Vec2::new(1.0, 5.0)),
    ];
    for (a1, a2, b1, b2) in layouts {
        let mut a = Body::wall(a1, a2).unwrap();
        let mut b = Body::wall(b1, b2).unwrap();
        assert!(measure(&a, &b, &mut rng()).is_none());
        assert!(generate(&mut a, &mut b, true, ContactParams::new(), &mut rng()).is_none());
    }

    let mut sim = Simulation::new(SimulationConfig {
        skip_static_pairs: false,
        ..SimulationConfig::default()
    });
    sim.add_body(Body::wall(Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0)).unwrap());
    sim.add_body(Body::wall(Vec2::new(0.0, 0.0), Vec2::new(0.0, 1.0)).unwrap());
    sim.update(&[]).unwrap();
    assert!(sim.events().is_empty());
    assert_eq!(sim.contact_between(0, 1, true, ContactParams::new()), Ok(None));
}

// ============================================================================
// Scenario 5: falling circle comes to rest on a wall
// ============================================================================

#[test]
fn test_falling_circle_rests_on_wall() {
    let config = SimulationConfig::default().with_gravity(Vec2::new(0.0, -10.0));
    let mut sim = Simulation::new(config);
    let ball = sim.add_body(circle(Vec2::new(0.0, 3.0), Vec2::zero(), 1.0, 1.0));
    let floor = sim.add_body(Body::wall(Vec2::new(-50.0, 0.0), Vec2::new(50.0, 0.0)).unwrap());

    for _ in 0..300 {
        sim.update(&[]).unwrap();
    }

    let contact = sim
        .contact_between(ball, floor, false, ContactParams::new())
        .unwrap()
        .unwrap();
    assert!(contact.overlap().abs() < 0.01, "overlap {}", contact.overlap());
    assert!(sim.body(ball).unwrap().velocity().y.abs() < 0.2);

    let wall = sim.body(floor).unwrap();
    assert_eq!(wall.position(), Vec2::new(-50.0, 0.0));
    assert_eq!(wall.velocity(), Vec2::zero());
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn test_circle_overlap_matches_distance() {
    for (d, radii) in [(3.0, (2.0, 2.0)), (1.0, (0.5, 1.5)), (5.0, (2.0, 2.0)), (4.0, (2.0, 2.0))] {
        let a = circle(Vec2::zero(), Vec2::zero(), radii.0, 1.0);
        let b = circle(Vec2::new(0.0, d), Vec2::zero(), radii.1, 1.0);
        let geometry = measure(&a, &b, &mut rng()).unwrap();
        assert!((geometry.overlap - (radii.0 + radii.1 - d)).abs() < EPSILON);
        assert!((geometry.normal.mag() - 1.0).abs() < EPSILON);
        assert_eq!(geometry.is_overlapping(), d < radii.0 + radii.1);
    }
}

#[test]
fn test_restitution_sets_separation_speed() {
    for e in [0.0, 0.25, 0.8, 1.0] {
        let mut a = circle(Vec2::new(0.0, 0.0), Vec2::new(2.0, 0.0), 1.0, 3.0);
        let mut b = circle(Vec2::new(1.9, 0.0), Vec2::new(-1.0, 0.0), 1.0, 3.0);
        let geometry = measure(&a, &b, &mut rng()).unwrap();
        let closing = -(a.velocity() - b.velocity()).dot(geometry.normal);

        resolve(&geometry, &mut a, &mut b, &ContactParams::new().with_restitution(e)).unwrap();

        let separating = (a.velocity() - b.velocity()).dot(geometry.normal);
        assert!(separating >= -EPSILON);
        assert!((separating - e * closing).abs() < 1e-9);
    }
}

#[test]
fn test_momentum_conserved_off_centre_with_friction() {
    let config = BodyConfig::new()
        .with_density(0.5)
        .with_position(Vec2::new(0.0, 0.0))
        .with_velocity(Vec2::new(0.5, 0.0))
        .with_angular_velocity(20.0);
    let mut block = Body::polygon(&square_points(Vec2::new(-1.0, -1.0), 2.0), &config).unwrap();
    let mut ball = circle(Vec2::new(1.8, 0.7), Vec2::new(-3.0, 1.0), 1.0, 2.0);

    let before = total_momentum(&[&block, &ball]);
    let params = ContactParams::new().with_restitution(0.5).with_friction(0.4);
    let contact = generate(&mut ball, &mut block, true, params, &mut rng()).unwrap();
    assert!(contact.is_hit());
    let after = total_momentum(&[&block, &ball]);

    assert!((after - before).mag() < EPSILON);
    // The block received the negated impulse at the contact point and spins accordingly
    let impact = contact.impact.unwrap();
    let arm = impact.point - block.position();
    let spin_change = block.angular_velocity() - 20.0;
    assert!(spin_change.abs() > EPSILON);
    assert_eq!(spin_change.signum(), arm.cross(-impact.impulse).signum());
}

#[test]
fn test_infinite_mass_is_never_moved() {
    let anchor_config = BodyConfig::new().fixed().with_position(Vec2::new(0.0, 0.0));
    let mut anchor = Body::circle(2.0, &anchor_config).unwrap();
    assert_eq!(anchor.mass(), Mass::Infinite);

    let mut rng = rng();
    for angle in [0.0, 45.0, 130.0, 270.0] {
        let direction = Vec2::unit_x().rotated_deg(angle);
        let mut ball = circle(direction * 2.5, direction * -10.0, 1.0, 1.0);
        let params = ContactParams::new().with_restitution(0.9).with_friction(1.0);
        let contact = generate(&mut ball, &mut anchor, true, params, &mut rng).unwrap();
        assert!(contact.is_hit());
        anchor.apply_impulse(Vec2::new(1e3, -1e3), Some(Vec2::new(2.0, 0.0)));

        assert_eq!(anchor.position(), Vec2::zero());
        assert_eq!(anchor.velocity(), Vec2::zero());
        assert_eq!(anchor.angular_velocity(), 0.0);
    }
}

#[test]
fn test_correction_reduces_overlap() {
    let mut a = Body::polygon(
        &square_points(Vec2::new(0.0, 0.0), 2.0),
        &BodyConfig::new().with_density(1.0),
    )
    .unwrap();
    let b_config = BodyConfig::new()
        .with_density(1.0)
        .with_position(Vec2::new(2.4, 0.5))
        .with_angle(30.0);
    let b_points = [
        Vec2::new(-1.0, -1.0),
        Vec2::new(1.0, -1.0),
        Vec2::new(1.0, 1.0),
        Vec2::new(-1.0, 1.0),
    ];
    let mut b = Body::polygon(&b_points, &b_config).unwrap();

    let before = measure(&a, &b, &mut rng()).unwrap();
    assert!(before.is_overlapping());

    resolve(&before, &mut a, &mut b, &ContactParams::new());

    let after = measure(&a, &b, &mut rng()).unwrap();
    assert!(after.overlap < before.overlap);
}

#[test]
fn test_sensor_goal_reports_player() {
    let mut sim = Simulation::default();
    let player = circle(Vec2::new(-3.0, 0.0), Vec2::new(60.0, 0.0), 1.0, 1.0)
        .with_properties(BodyProperties::default().with_tag("player"));
    let goal_config = BodyConfig::new().fixed();
    let goal = Body::polygon(&square_points(Vec2::new(-1.0, -1.0), 2.0), &goal_config)
        .unwrap()
        .with_properties(BodyProperties::default().sensor().with_tag("goal"));
    let player = sim.add_body(player);
    sim.add_body(goal);

    let mut reached = false;
    for _ in 0..10 {
        sim.update(&[]).unwrap();
        if sim.events().iter().any(|event| event.sensor) {
            reached = true;
            break;
        }
    }

    assert!(reached);
    // The sensor never slowed the player down
    assert!((sim.body(player).unwrap().velocity().x - 60.0).abs() < EPSILON);
}

#[test]
fn test_same_seed_same_outcome() {
    fn run() -> Vec<Vec2> {
        let mut sim = Simulation::new(SimulationConfig::default().with_seed(9));
        // Coincident centres need the random fallback normal
        sim.add_body(circle(Vec2::new(1.0, 1.0), Vec2::zero(), 1.0, 1.0));
        sim.add_body(circle(Vec2::new(1.0, 1.0), Vec2::zero(), 1.0, 1.0));
        let push = ExternalLoad::Force {
            body: 0,
            force: Vec2::new(0.0, 1.0),
        };
        for _ in 0..10 {
            sim.update(&[push]).unwrap();
        }
        sim.bodies().iter().map(|body| body.position()).collect()
    }

    let first = run();
    let second = run();
    assert_eq!(first, second);
    assert!((first[0] - first[1]).mag() > 0.0);
}
