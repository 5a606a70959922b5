use common::ShapeError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlaceError {
    #[error("tile layer {layer} already has collisions enabled")]
    TilemapCollisionsAlreadyEnabled { layer: u32 },
    #[error("unknown tile layer {layer}")]
    UnknownTileLayer { layer: u32 },
    #[error("unknown collider {id}")]
    UnknownCollider { id: u32 },
    #[error("invalid collision shape: {0}")]
    InvalidShape(#[from] ShapeError),
    #[error("grid cell size must be finite and positive (grid_x: {grid_x}, grid_y: {grid_y})")]
    InvalidGridConfig { grid_x: f32, grid_y: f32 },
    #[error("failed to parse grid config: {0}")]
    Config(String),
}

pub type PlaceResult<T> = Result<T, PlaceError>;
