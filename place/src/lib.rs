pub mod collider;
pub mod config;
pub mod error;
pub mod filter;
pub mod grid;
pub mod place;

pub use collider::{Collider, ColliderDesc, ColliderId, ColliderKind};
pub use config::GridConfig;
pub use error::{PlaceError, PlaceResult};
pub use filter::Filter;
pub use grid::{CellKey, CellList, Partition, SpatialIndex};
pub use place::{
    AxisObstacles, BiasOscillator, Hits, Place, Probe, QueryMode, Steer, TileDesc, TileLayer,
    TileLayerDesc, TileLayerId, TraceRect,
};
