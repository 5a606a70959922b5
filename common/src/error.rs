use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShapeError {
    #[error("shape values must be finite")]
    NonFinite,
    #[error("circle radius must be finite and non-negative (radius: {radius})")]
    NegativeRadius { radius: f32 },
    #[error("strip needs at least two points (count: {count})")]
    TooFewPoints { count: usize },
}
