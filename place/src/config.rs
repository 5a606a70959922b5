use crate::error::{PlaceError, PlaceResult};
use serde::{Deserialize, Serialize};

/// Size of one spatial hash cell. Fixed for the lifetime of a `Place`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub grid_x: f32,
    pub grid_y: f32,
}

impl GridConfig {
    pub fn new(grid_x: f32, grid_y: f32) -> Self {
        Self { grid_x, grid_y }
    }

    pub fn from_ron(source: &str) -> PlaceResult<Self> {
        let config: GridConfig =
            ron::from_str(source).map_err(|err| PlaceError::Config(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> PlaceResult<()> {
        let valid = |size: f32| size.is_finite() && size > 0.0;
        if valid(self.grid_x) && valid(self.grid_y) {
            Ok(())
        } else {
            Err(PlaceError::InvalidGridConfig {
                grid_x: self.grid_x,
                grid_y: self.grid_y,
            })
        }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            grid_x: 1024.0,
            grid_y: 1024.0,
        }
    }
}
