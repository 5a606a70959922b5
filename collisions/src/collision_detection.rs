use common::shapes::{Circle, Point, Polygon, Rectangle, Segment};
use nalgebra::{Point2, Vector2};

// Rounding slack, in units of f32::EPSILON relative to the largest coordinate
// involved, under which a point counts as lying on a segment.
const ON_SEGMENT_ULPS: f32 = 4.0;

pub fn point_point(a: &Point, b: &Point) -> bool {
    a.x == b.x && a.y == b.y
}

pub fn point_circle(point: &Point, circle: &Circle) -> bool {
    let dx = point.x - circle.x;
    let dy = point.y - circle.y;
    dx * dx + dy * dy < circle.radius * circle.radius
}

pub fn point_rectangle(point: &Point, rectangle: &Rectangle) -> bool {
    rectangle.contains_point(point.x, point.y)
}

pub fn point_segment(point: &Point, segment: &Segment) -> bool {
    let p = Point2::new(point.x, point.y);
    let magnitude = [p, segment.a, segment.b]
        .iter()
        .map(|q| q.coords.amax())
        .fold(1.0, f32::max);
    let tolerance = ON_SEGMENT_ULPS * f32::EPSILON * magnitude;
    distance_sq_to_segment(p, segment) <= tolerance * tolerance
}

// Inclusive containment in a convex polygon of either winding.
pub fn point_polygon(point: &Point, polygon: &Polygon) -> bool {
    if !polygon.bounding_box.contains_point(point.x, point.y) {
        return false;
    }
    let p = Point2::new(point.x, point.y);
    let mut has_positive = false;
    let mut has_negative = false;
    for (a, b) in polygon.edges() {
        let cross = (b - a).perp(&(p - a));
        if cross > 0.0 {
            has_positive = true;
        } else if cross < 0.0 {
            has_negative = true;
        }
        if has_positive && has_negative {
            return false;
        }
    }
    true
}

pub fn circle_circle(a: &Circle, b: &Circle) -> bool {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    let distance_sq = dx * dx + dy * dy;
    let collision_distance = a.radius + b.radius;
    distance_sq < collision_distance * collision_distance
}

pub fn circle_rectangle(circle: &Circle, rectangle: &Rectangle) -> bool {
    let circle_distance_x = (circle.x - rectangle.center_x()).abs();
    let circle_distance_y = (circle.y - rectangle.center_y()).abs();

    if circle_distance_x > rectangle.width / 2.0 + circle.radius {
        return false;
    }
    if circle_distance_y > rectangle.height / 2.0 + circle.radius {
        return false;
    }

    if circle_distance_x <= rectangle.width / 2.0 || circle_distance_y <= rectangle.height / 2.0 {
        return true;
    }

    let corner_dx = circle_distance_x - rectangle.width / 2.0;
    let corner_dy = circle_distance_y - rectangle.height / 2.0;
    let corner_distance_sq = corner_dx * corner_dx + corner_dy * corner_dy;

    corner_distance_sq <= circle.radius * circle.radius
}

pub fn circle_segment(circle: &Circle, segment: &Segment) -> bool {
    distance_sq_to_segment(circle.center(), segment) <= circle.radius * circle.radius
}

pub fn circle_polygon(circle: &Circle, polygon: &Polygon) -> bool {
    point_polygon(&Point::new(circle.x, circle.y), polygon)
        || polygon
            .edges()
            .any(|(a, b)| circle_segment(circle, &Segment::new(a, b)))
}

// Touching edges do not count as an overlap.
pub fn rectangle_rectangle(a: &Rectangle, b: &Rectangle) -> bool {
    a.left() < b.right() && a.right() > b.left() && a.top() < b.bottom() && a.bottom() > b.top()
}

pub fn rectangle_segment(rectangle: &Rectangle, segment: &Segment) -> bool {
    convex_convex(&rectangle.corners(), &[segment.a, segment.b])
}

pub fn rectangle_polygon(rectangle: &Rectangle, polygon: &Polygon) -> bool {
    convex_convex(&rectangle.corners(), &polygon.points)
}

pub fn polygon_polygon(a: &Polygon, b: &Polygon) -> bool {
    convex_convex(&a.points, &b.points)
}

pub fn polygon_segment(polygon: &Polygon, segment: &Segment) -> bool {
    convex_convex(&polygon.points, &[segment.a, segment.b])
}

pub fn segment_segment(a: &Segment, b: &Segment) -> bool {
    let o1 = orientation(a.a, a.b, b.a);
    let o2 = orientation(a.a, a.b, b.b);
    let o3 = orientation(b.a, b.b, a.a);
    let o4 = orientation(b.a, b.b, a.b);

    if o1 != o2 && o3 != o4 {
        return true;
    }
    (o1 == 0 && within_bounds(a.a, a.b, b.a))
        || (o2 == 0 && within_bounds(a.a, a.b, b.b))
        || (o3 == 0 && within_bounds(b.a, b.b, a.a))
        || (o4 == 0 && within_bounds(b.a, b.b, a.b))
}

/// Separating-axis test for two convex point sets (segments count as two-point sets).
/// Touching counts as an overlap.
pub fn convex_convex(a: &[Point2<f32>], b: &[Point2<f32>]) -> bool {
    let world_axes = [Vector2::x(), Vector2::y()];
    world_axes
        .into_iter()
        .chain(edge_normals(a))
        .chain(edge_normals(b))
        .all(|axis| {
            let (min_a, max_a) = project(a, &axis);
            let (min_b, max_b) = project(b, &axis);
            !(max_a < min_b || max_b < min_a)
        })
}

fn edge_normals(points: &[Point2<f32>]) -> impl Iterator<Item = Vector2<f32>> + '_ {
    let count = points.len();
    (0..count).filter_map(move |i| {
        let edge = points[(i + 1) % count] - points[i];
        if edge.x == 0.0 && edge.y == 0.0 {
            None
        } else {
            Some(Vector2::new(-edge.y, edge.x))
        }
    })
}

fn project(points: &[Point2<f32>], axis: &Vector2<f32>) -> (f32, f32) {
    points
        .iter()
        .map(|point| point.coords.dot(axis))
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(min, max), value| {
            (min.min(value), max.max(value))
        })
}

fn orientation(a: Point2<f32>, b: Point2<f32>, c: Point2<f32>) -> i8 {
    let cross = (b - a).perp(&(c - a));
    if cross > 0.0 {
        1
    } else if cross < 0.0 {
        -1
    } else {
        0
    }
}

// Assumes `p` is collinear with `a`-`b`.
fn within_bounds(a: Point2<f32>, b: Point2<f32>, p: Point2<f32>) -> bool {
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}

pub fn distance_sq_to_segment(p: Point2<f32>, segment: &Segment) -> f32 {
    let ab = segment.b - segment.a;
    let length_sq = ab.norm_squared();
    if length_sq == 0.0 {
        return (p - segment.a).norm_squared();
    }
    let t = ((p - segment.a).dot(&ab) / length_sq).clamp(0.0, 1.0);
    let closest = segment.a + ab * t;
    (p - closest).norm_squared()
}
