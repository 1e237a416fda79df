//! Contact geometry for every pair of shape kinds.
//!
//! Each algorithm takes its shapes in canonical order (Circle < Polygon < Wall) and reports a
//! normal pointing from the second shape toward the first. [`measure`] does the ordering for
//! arbitrary pairs of bodies.

use rand::Rng;

use super::manifold::ContactGeometry;
use crate::math::{Vec2, Vec2Ext};
use crate::objects::Body;
use crate::shapes::{Circle, ConvexPolygon, Shape, Wall};

/// Checks two circles.
///
/// Coincident centres have no defined normal, so a uniformly random direction drawn from `rng`
/// is used instead.
pub fn check_circle_circle<R: Rng + ?Sized>(
    center_a: Vec2,
    circle_a: &Circle,
    center_b: Vec2,
    circle_b: &Circle,
    rng: &mut R,
) -> ContactGeometry {
    let offset = center_a - center_b;
    let distance = offset.mag();
    let normal = if distance > 0.0 {
        offset / distance
    } else {
        Vec2::unit_x().rotated_deg(rng.gen_range(0.0..360.0))
    };
    ContactGeometry {
        overlap: circle_a.radius + circle_b.radius - distance,
        normal,
        point: center_a - normal * circle_a.radius,
    }
}

/// Checks a circle against a polygon's world-space edges.
///
/// Starts from the edge the circle penetrates least. When the circle is in front of that edge
/// but its centre is past one of the edge's end points, the end point is the closest feature
/// and the normal is taken from it instead.
pub fn check_circle_polygon(center: Vec2, circle: &Circle, polygon: &ConvexPolygon) -> ContactGeometry {
    let points = polygon.points();
    let normals = polygon.normals();
    let n = points.len();

    let mut overlap = f64::INFINITY;
    let mut normal = Vec2::zero();
    let mut edge = 0;
    for (i, (point, edge_normal)) in points.iter().zip(normals).enumerate() {
        let candidate = circle.radius - (center - *point).dot(*edge_normal);
        if candidate < overlap {
            overlap = candidate;
            normal = *edge_normal;
            edge = i;
        }
    }

    if 0.0 < overlap && overlap < circle.radius {
        let end = points[edge];
        let start = points[(edge + n - 1) % n];

        let r = center - end;
        if r.dot(start - end) < 0.0 {
            normal = r.normalized();
            overlap = circle.radius - center.distance(end);
        }
        let r = center - start;
        if r.dot(end - start) < 0.0 {
            normal = r.normalized();
            overlap = circle.radius - center.distance(start);
        }
    }

    ContactGeometry {
        overlap,
        normal,
        point: center - normal * circle.radius,
    }
}

/// Checks a circle against a wall's half-plane.
pub fn check_circle_wall(center: Vec2, circle: &Circle, wall: &Wall) -> ContactGeometry {
    ContactGeometry {
        overlap: circle.radius - wall.signed_distance(center),
        normal: wall.normal,
        point: center - wall.normal * circle.radius,
    }
}

/// Finds the point that sits deepest behind the line through `base` facing `normal`, and its
/// depth. The first point wins ties.
fn deepest_point(points: &[Vec2], base: Vec2, normal: Vec2) -> (Vec2, f64) {
    let mut deepest = (base, f64::NEG_INFINITY);
    for point in points {
        let depth = -(*point - base).dot(normal);
        if depth > deepest.1 {
            deepest = (*point, depth);
        }
    }
    deepest
}

/// Checks a polygon against a wall: the contact is at the polygon point deepest behind the wall.
pub fn check_polygon_wall(polygon: &ConvexPolygon, wall: &Wall) -> ContactGeometry {
    let (point, overlap) = deepest_point(polygon.points(), wall.point1, wall.normal);
    ContactGeometry {
        overlap,
        normal: wall.normal,
        point,
    }
}

/// Checks two polygons by treating every edge of each as a separating axis against the other's
/// points, keeping the axis with the least penetration.
///
/// This is not a complete separating axis test: it never looks at edge-edge crossings where
/// no point of either polygon is inside the other.
pub fn check_polygon_polygon(polygon_a: &ConvexPolygon, polygon_b: &ConvexPolygon) -> ContactGeometry {
    let mut best = ContactGeometry {
        overlap: f64::INFINITY,
        normal: Vec2::zero(),
        point: Vec2::zero(),
    };

    // B's edges against A's points: B's outward normal already points toward A
    for (base, normal) in polygon_b.points().iter().zip(polygon_b.normals()) {
        let (point, overlap) = deepest_point(polygon_a.points(), *base, *normal);
        if overlap < best.overlap {
            best = ContactGeometry {
                overlap,
                normal: *normal,
                point,
            };
        }
    }

    // A's edges against B's points
    for (base, normal) in polygon_a.points().iter().zip(polygon_a.normals()) {
        let (point, overlap) = deepest_point(polygon_b.points(), *base, *normal);
        if overlap < best.overlap {
            best = ContactGeometry {
                overlap,
                normal: -*normal,
                point,
            };
        }
    }

    best
}

/// Measures the contact geometry between two bodies in the given order, whether or not they
/// overlap.
///
/// The pair is swapped into canonical order to pick an algorithm and the result is flipped back,
/// so the normal always points from `b` toward `a`. Returns `None` for two walls, which never
/// collide.
pub fn measure<R: Rng + ?Sized>(a: &Body, b: &Body, rng: &mut R) -> Option<ContactGeometry> {
    let swapped = b.kind() < a.kind();
    let (first, second) = if swapped { (b, a) } else { (a, b) };

    let geometry = match (first.shape(), second.shape()) {
        (Shape::Circle(circle_a), Shape::Circle(circle_b)) => {
            check_circle_circle(first.position(), circle_a, second.position(), circle_b, rng)
        }
        (Shape::Circle(circle), Shape::Polygon(polygon)) => {
            check_circle_polygon(first.position(), circle, polygon)
        }
        (Shape::Circle(circle), Shape::Wall(wall)) => check_circle_wall(first.position(), circle, wall),
        (Shape::Polygon(polygon_a), Shape::Polygon(polygon_b)) => {
            check_polygon_polygon(polygon_a, polygon_b)
        }
        (Shape::Polygon(polygon), Shape::Wall(wall)) => check_polygon_wall(polygon, wall),
        // Wall-Wall, the only pair left in canonical order
        _ => return None,
    };

    Some(if swapped { geometry.flipped() } else { geometry })
}

/// Like [`measure`], but only reports geometry for bodies that actually overlap.
pub fn detect<R: Rng + ?Sized>(a: &Body, b: &Body, rng: &mut R) -> Option<ContactGeometry> {
    measure(a, b, rng).filter(ContactGeometry::is_overlapping)
}
