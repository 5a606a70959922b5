use crate::error::ShapeError;
use serde::{Deserialize, Serialize};

/// Position, scale and rotation of a collider. Angles are in degrees.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub x: f32,
    pub y: f32,
    #[serde(default = "unit_scale")]
    pub scale_x: f32,
    #[serde(default = "unit_scale")]
    pub scale_y: f32,
    #[serde(default)]
    pub angle: f32,
}

fn unit_scale() -> f32 {
    1.0
}

impl Transform {
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            ..Self::default()
        }
    }

    pub fn with_position(&self, x: f32, y: f32) -> Self {
        Self { x, y, ..*self }
    }

    pub fn with_scale(self, scale_x: f32, scale_y: f32) -> Self {
        Self {
            scale_x,
            scale_y,
            ..self
        }
    }

    pub fn with_angle(self, angle: f32) -> Self {
        Self { angle, ..self }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            angle: 0.0,
        }
    }
}

/// Local-space collision shape attached to a collider.
///
/// `Rect` offsets are distances from the origin towards each side, so
/// `Rect { left: 0, top: 0, right: 10, bottom: 10 }` puts the origin at the
/// top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ShapeDescriptor {
    Rect {
        left: f32,
        top: f32,
        right: f32,
        bottom: f32,
    },
    Circle {
        radius: f32,
    },
    Strip {
        points: Vec<(f32, f32)>,
        #[serde(default)]
        closed: bool,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
    },
    Point,
}

impl ShapeDescriptor {
    pub fn validate(&self) -> Result<(), ShapeError> {
        match self {
            ShapeDescriptor::Rect {
                left,
                top,
                right,
                bottom,
            } => ensure_finite(&[*left, *top, *right, *bottom]),
            ShapeDescriptor::Circle { radius } => {
                if !radius.is_finite() || *radius < 0.0 {
                    return Err(ShapeError::NegativeRadius { radius: *radius });
                }
                Ok(())
            }
            ShapeDescriptor::Strip { points, .. } => {
                if points.len() < 2 {
                    return Err(ShapeError::TooFewPoints {
                        count: points.len(),
                    });
                }
                if points.iter().any(|(x, y)| !x.is_finite() || !y.is_finite()) {
                    return Err(ShapeError::NonFinite);
                }
                Ok(())
            }
            ShapeDescriptor::Line { x1, y1, x2, y2 } => ensure_finite(&[*x1, *y1, *x2, *y2]),
            ShapeDescriptor::Point => Ok(()),
        }
    }
}

impl Default for ShapeDescriptor {
    fn default() -> Self {
        ShapeDescriptor::Point
    }
}

fn ensure_finite(values: &[f32]) -> Result<(), ShapeError> {
    if values.iter().all(|value| value.is_finite()) {
        Ok(())
    } else {
        Err(ShapeError::NonFinite)
    }
}
