use crate::descriptor::{ShapeDescriptor, Transform};
use crate::shapes::{Circle, LineStrip, Point, Polygon, Rectangle, Segment, ShapeEnum};
use nalgebra::{Point2, Rotation2, Vector2};

/// Number of vertices used to approximate a non-uniformly scaled circle.
pub const CIRCLE_PRECISION: usize = 16;

/// Turns a local shape descriptor plus a transform into a world-space primitive.
pub fn resolve(descriptor: &ShapeDescriptor, transform: &Transform) -> ShapeEnum {
    match descriptor {
        ShapeDescriptor::Rect {
            left,
            top,
            right,
            bottom,
        } => resolve_rect(*left, *top, *right, *bottom, transform),
        ShapeDescriptor::Circle { radius } => resolve_circle(*radius, transform),
        ShapeDescriptor::Strip { points, closed } => resolve_strip(points, *closed, transform),
        ShapeDescriptor::Line { x1, y1, x2, y2 } => {
            let a = place(transform, *x1, *y1);
            let b = place(transform, *x2, *y2);
            ShapeEnum::Segment(Segment::new(a, b))
        }
        ShapeDescriptor::Point => ShapeEnum::Point(Point::new(transform.x, transform.y)),
    }
}

impl ShapeDescriptor {
    pub fn resolve(&self, transform: &Transform) -> ShapeEnum {
        resolve(self, transform)
    }
}

fn resolve_rect(left: f32, top: f32, right: f32, bottom: f32, t: &Transform) -> ShapeEnum {
    if t.angle == 0.0 {
        // A negative scale mirrors the box, so the opposite offset becomes the leading edge.
        let x = t.x
            - if t.scale_x > 0.0 {
                left * t.scale_x
            } else {
                -t.scale_x * right
            };
        let y = t.y
            - if t.scale_y > 0.0 {
                top * t.scale_y
            } else {
                -t.scale_y * bottom
            };
        return ShapeEnum::Rectangle(Rectangle::new(
            x,
            y,
            ((left + right) * t.scale_x).abs(),
            ((top + bottom) * t.scale_y).abs(),
        ));
    }
    let corners = [(-left, -top), (-left, bottom), (right, bottom), (right, -top)];
    let points = corners
        .iter()
        .map(|(x, y)| place(t, *x, *y))
        .collect();
    ShapeEnum::Polygon(Polygon::new(points))
}

fn resolve_circle(radius: f32, t: &Transform) -> ShapeEnum {
    if t.scale_x.abs() == t.scale_y.abs() {
        return ShapeEnum::Circle(Circle::new(t.x, t.y, radius * t.scale_x.abs()));
    }
    let step = 360.0 / CIRCLE_PRECISION as f32;
    let points = (0..CIRCLE_PRECISION)
        .map(|i| {
            let direction = (step * i as f32).to_radians();
            let offset = Vector2::new(
                radius * t.scale_x * direction.cos(),
                radius * t.scale_y * direction.sin(),
            );
            Point2::new(t.x, t.y) + rotate(offset, t.angle)
        })
        .collect();
    ShapeEnum::Polygon(Polygon::new(points))
}

fn resolve_strip(points: &[(f32, f32)], closed: bool, t: &Transform) -> ShapeEnum {
    let points = points.iter().map(|(x, y)| place(t, *x, *y)).collect();
    ShapeEnum::LineStrip(LineStrip::new(points, closed))
}

// Scale, rotate, then translate a local point.
fn place(t: &Transform, x: f32, y: f32) -> Point2<f32> {
    let offset = Vector2::new(x * t.scale_x, y * t.scale_y);
    Point2::new(t.x, t.y) + rotate(offset, t.angle)
}

pub fn rotate(v: Vector2<f32>, degrees: f32) -> Vector2<f32> {
    if degrees == 0.0 {
        return v;
    }
    Rotation2::new(degrees.to_radians()) * v
}
