use nalgebra::Point2;
use std::fmt::Debug;

pub trait Shape: Debug {
    fn bounding_box(&self) -> Rectangle;
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Shape for Point {
    fn bounding_box(&self) -> Rectangle {
        Rectangle::new(self.x, self.y, 0.0, 0.0)
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Circle {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

impl Circle {
    pub fn new(x: f32, y: f32, radius: f32) -> Self {
        Self { x, y, radius }
    }

    pub fn center(&self) -> Point2<f32> {
        Point2::new(self.x, self.y)
    }
}

impl Default for Circle {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

impl Shape for Circle {
    fn bounding_box(&self) -> Rectangle {
        Rectangle {
            x: self.x - self.radius,
            y: self.y - self.radius,
            width: self.radius * 2.0,
            height: self.radius * 2.0,
        }
    }
}

/// Axis-aligned box anchored at its top-left corner.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rectangle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rectangle {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_min_max(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            x: min_x,
            y: min_y,
            width: max_x - min_x,
            height: max_y - min_y,
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    pub fn top_left(&self) -> (f32, f32) {
        (self.left(), self.top())
    }

    pub fn top_right(&self) -> (f32, f32) {
        (self.right(), self.top())
    }

    pub fn bottom_left(&self) -> (f32, f32) {
        (self.left(), self.bottom())
    }

    pub fn bottom_right(&self) -> (f32, f32) {
        (self.right(), self.bottom())
    }

    // Clockwise in screen space (y down), starting at the top-left corner.
    pub fn corners(&self) -> [Point2<f32>; 4] {
        [
            Point2::new(self.left(), self.top()),
            Point2::new(self.right(), self.top()),
            Point2::new(self.right(), self.bottom()),
            Point2::new(self.left(), self.bottom()),
        ]
    }

    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x >= self.left() && x <= self.right() && y >= self.top() && y <= self.bottom()
    }

    pub fn expand_to_include(&mut self, other: &Rectangle) {
        let left = f32::min(self.left(), other.left());
        let right = f32::max(self.right(), other.right());
        let top = f32::min(self.top(), other.top());
        let bottom = f32::max(self.bottom(), other.bottom());
        *self = Self::from_min_max(left, top, right, bottom);
    }
}

impl Default for Rectangle {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
        }
    }
}

impl Shape for Rectangle {
    fn bounding_box(&self) -> Rectangle {
        *self
    }
}

/// Filled convex polygon: rotated boxes and ellipse approximations.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub points: Vec<Point2<f32>>,
    pub bounding_box: Rectangle,
}

impl Polygon {
    pub fn new(points: Vec<Point2<f32>>) -> Self {
        let bounding_box = bounds_of(&points);
        Self {
            points,
            bounding_box,
        }
    }

    pub fn edges(&self) -> impl Iterator<Item = (Point2<f32>, Point2<f32>)> + '_ {
        closed_edges(&self.points)
    }
}

impl Shape for Polygon {
    fn bounding_box(&self) -> Rectangle {
        self.bounding_box
    }
}

/// Hollow polyline; only its segments collide.
#[derive(Debug, Clone, PartialEq)]
pub struct LineStrip {
    pub points: Vec<Point2<f32>>,
    pub closed: bool,
    pub bounding_box: Rectangle,
}

impl LineStrip {
    pub fn new(points: Vec<Point2<f32>>, closed: bool) -> Self {
        let bounding_box = bounds_of(&points);
        Self {
            points,
            closed,
            bounding_box,
        }
    }

    pub fn segments(&self) -> Box<dyn Iterator<Item = Segment> + '_> {
        if self.closed && self.points.len() > 2 {
            Box::new(closed_edges(&self.points).map(|(a, b)| Segment::new(a, b)))
        } else {
            Box::new(
                self.points
                    .windows(2)
                    .map(|pair| Segment::new(pair[0], pair[1])),
            )
        }
    }
}

impl Shape for LineStrip {
    fn bounding_box(&self) -> Rectangle {
        self.bounding_box
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Segment {
    pub a: Point2<f32>,
    pub b: Point2<f32>,
}

impl Segment {
    pub fn new(a: Point2<f32>, b: Point2<f32>) -> Self {
        Self { a, b }
    }
}

impl Shape for Segment {
    fn bounding_box(&self) -> Rectangle {
        Rectangle::from_min_max(
            self.a.x.min(self.b.x),
            self.a.y.min(self.b.y),
            self.a.x.max(self.b.x),
            self.a.y.max(self.b.y),
        )
    }
}

/// A concrete, world-space primitive ready for the narrow phase.
#[derive(Clone, Debug, PartialEq)]
pub enum ShapeEnum {
    Point(Point),
    Circle(Circle),
    Rectangle(Rectangle),
    Polygon(Polygon),
    LineStrip(LineStrip),
    Segment(Segment),
}

impl ShapeEnum {
    /// Polygons and polylines get an AABB rejection before the exact test.
    pub fn is_complex(&self) -> bool {
        matches!(self, ShapeEnum::Polygon(_) | ShapeEnum::LineStrip(_))
    }
}

impl Shape for ShapeEnum {
    fn bounding_box(&self) -> Rectangle {
        match self {
            ShapeEnum::Point(point) => point.bounding_box(),
            ShapeEnum::Circle(circle) => circle.bounding_box(),
            ShapeEnum::Rectangle(rectangle) => rectangle.bounding_box(),
            ShapeEnum::Polygon(polygon) => polygon.bounding_box(),
            ShapeEnum::LineStrip(strip) => strip.bounding_box(),
            ShapeEnum::Segment(segment) => segment.bounding_box(),
        }
    }
}

fn closed_edges(
    points: &[Point2<f32>],
) -> impl Iterator<Item = (Point2<f32>, Point2<f32>)> + '_ {
    let count = points.len();
    (0..count).map(move |i| (points[i], points[(i + 1) % count]))
}

fn bounds_of(points: &[Point2<f32>]) -> Rectangle {
    let mut iter = points.iter();
    let Some(first) = iter.next() else {
        return Rectangle::default();
    };
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
    for point in iter {
        min_x = min_x.min(point.x);
        min_y = min_y.min(point.y);
        max_x = max_x.max(point.x);
        max_y = max_y.max(point.y);
    }
    Rectangle::from_min_max(min_x, min_y, max_x, max_y)
}
