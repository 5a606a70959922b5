pub mod collision_detection;

use collision_detection::*;
use common::shapes::{self, Shape, ShapeEnum};
use nalgebra::Point2;
use parry2d::bounding_volume::{Aabb, BoundingVolume};

pub fn aabb(shape: &ShapeEnum) -> Aabb {
    let bb = shape.bounding_box();
    Aabb::new(
        Point2::new(bb.left(), bb.top()),
        Point2::new(bb.right(), bb.bottom()),
    )
}

/// Narrow phase: do two world-space shapes overlap? Symmetric in its arguments.
pub fn shape_shape(a: &ShapeEnum, b: &ShapeEnum) -> bool {
    if (a.is_complex() || b.is_complex()) && !aabb(a).intersects(&aabb(b)) {
        return false;
    }
    exact(a, b)
}

fn exact(a: &ShapeEnum, b: &ShapeEnum) -> bool {
    use ShapeEnum::*;
    match (a, b) {
        (LineStrip(strip), other) | (other, LineStrip(strip)) => strip_shape(strip, other),

        (Point(a), Point(b)) => point_point(a, b),
        (Point(point), Circle(circle)) | (Circle(circle), Point(point)) => {
            point_circle(point, circle)
        }
        (Point(point), Rectangle(rectangle)) | (Rectangle(rectangle), Point(point)) => {
            point_rectangle(point, rectangle)
        }
        (Point(point), Polygon(polygon)) | (Polygon(polygon), Point(point)) => {
            point_polygon(point, polygon)
        }
        (Point(point), Segment(segment)) | (Segment(segment), Point(point)) => {
            point_segment(point, segment)
        }

        (Circle(a), Circle(b)) => circle_circle(a, b),
        (Circle(circle), Rectangle(rectangle)) | (Rectangle(rectangle), Circle(circle)) => {
            circle_rectangle(circle, rectangle)
        }
        (Circle(circle), Polygon(polygon)) | (Polygon(polygon), Circle(circle)) => {
            circle_polygon(circle, polygon)
        }
        (Circle(circle), Segment(segment)) | (Segment(segment), Circle(circle)) => {
            circle_segment(circle, segment)
        }

        (Rectangle(a), Rectangle(b)) => rectangle_rectangle(a, b),
        (Rectangle(rectangle), Polygon(polygon)) | (Polygon(polygon), Rectangle(rectangle)) => {
            rectangle_polygon(rectangle, polygon)
        }
        (Rectangle(rectangle), Segment(segment)) | (Segment(segment), Rectangle(rectangle)) => {
            rectangle_segment(rectangle, segment)
        }

        (Polygon(a), Polygon(b)) => polygon_polygon(a, b),
        (Polygon(polygon), Segment(segment)) | (Segment(segment), Polygon(polygon)) => {
            polygon_segment(polygon, segment)
        }

        (Segment(a), Segment(b)) => segment_segment(a, b),
    }
}

// Polylines are hollow: any colliding segment is a hit.
fn strip_shape(strip: &shapes::LineStrip, other: &ShapeEnum) -> bool {
    strip.segments().any(|segment| {
        let segment = ShapeEnum::Segment(segment);
        exact(&segment, other)
    })
}
