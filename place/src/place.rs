use crate::collider::{Collider, ColliderId};
use crate::config::GridConfig;
use crate::error::{PlaceError, PlaceResult};
use crate::filter::Filter;
use crate::grid::{CellList, Partition, SpatialIndex};
use common::shapes::ShapeEnum;
use common::{ShapeDescriptor, Transform};
use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::cell::Ref;
use std::ops::Deref;

mod movement;
mod nearest;
mod query;
mod registry;
mod steering;
mod tiles;
mod trace;

pub use movement::AxisObstacles;
pub use steering::{BiasOscillator, Steer};
pub use trace::TraceRect;

/// Query results. Single-hit queries never allocate.
pub type Hits = SmallVec<[ColliderId; 4]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryMode {
    /// Stop at the first collider found.
    Single,
    /// Collect every distinct collider found.
    Multiple,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileLayerId(pub(crate) u32);

impl TileLayerId {
    pub fn index(self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileDesc {
    pub transform: Transform,
    pub shape: ShapeDescriptor,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TileLayerDesc {
    #[serde(default)]
    pub cgroup: Option<String>,
    pub tiles: Vec<TileDesc>,
}

#[derive(Debug)]
pub struct TileLayer {
    cgroup: Option<String>,
    pending: Vec<TileDesc>,
    tiles: Vec<ColliderId>,
    collisions_enabled: bool,
}

impl TileLayer {
    pub fn cgroup(&self) -> Option<&str> {
        self.cgroup.as_deref()
    }

    pub fn collisions_enabled(&self) -> bool {
        self.collisions_enabled
    }

    /// Colliders registered for this layer; empty until collisions are enabled.
    pub fn tiles(&self) -> &[ColliderId] {
        &self.tiles
    }
}

enum ProbeShape<'a> {
    Cached(Ref<'a, ShapeEnum>),
    Owned(ShapeEnum),
}

impl Deref for ProbeShape<'_> {
    type Target = ShapeEnum;

    fn deref(&self) -> &ShapeEnum {
        match self {
            ProbeShape::Cached(shape) => &**shape,
            ProbeShape::Owned(shape) => shape,
        }
    }
}

/// The shape and cells a query tests against. Building a probe never moves
/// the collider it was built from.
pub struct Probe<'a> {
    id: Option<ColliderId>,
    shape: ProbeShape<'a>,
    cells: CellList,
}

impl Probe<'_> {
    pub fn id(&self) -> Option<ColliderId> {
        self.id
    }

    pub fn shape(&self) -> &ShapeEnum {
        &self.shape
    }

    pub fn cells(&self) -> &CellList {
        &self.cells
    }
}

/// Collision world of one room: the collider registry, the tile layers and
/// the spatial index over both.
pub struct Place {
    index: SpatialIndex,
    colliders: FxHashMap<ColliderId, Collider>,
    // Live copies in registration order.
    stack: Vec<ColliderId>,
    layers: Vec<TileLayer>,
    next_id: u32,
}

impl Place {
    pub fn new(config: GridConfig) -> PlaceResult<Self> {
        config.validate()?;
        Ok(Self {
            index: SpatialIndex::new(&config),
            colliders: FxHashMap::default(),
            stack: Vec::new(),
            layers: Vec::new(),
            next_id: 0,
        })
    }

    pub fn grid_x(&self) -> f32 {
        self.index.grid_x()
    }

    pub fn grid_y(&self) -> f32 {
        self.index.grid_y()
    }

    pub fn index(&self) -> &SpatialIndex {
        &self.index
    }

    pub fn get(&self, id: ColliderId) -> Option<&Collider> {
        self.colliders.get(&id)
    }

    pub fn position(&self, id: ColliderId) -> Option<(f32, f32)> {
        self.colliders.get(&id).map(|collider| (collider.x(), collider.y()))
    }

    /// Live copies in the order they were registered.
    pub fn copies_in_order(&self) -> &[ColliderId] {
        &self.stack
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    fn collider(&self, id: ColliderId) -> PlaceResult<&Collider> {
        self.colliders
            .get(&id)
            .ok_or(PlaceError::UnknownCollider { id: id.0 })
    }

    fn collider_mut(&mut self, id: ColliderId) -> PlaceResult<&mut Collider> {
        self.colliders
            .get_mut(&id)
            .ok_or(PlaceError::UnknownCollider { id: id.0 })
    }

    fn take_id(&mut self) -> ColliderId {
        let id = ColliderId(self.next_id);
        self.next_id += 1;
        id
    }
}

impl Default for Place {
    fn default() -> Self {
        Self {
            index: SpatialIndex::new(&GridConfig::default()),
            colliders: FxHashMap::default(),
            stack: Vec::new(),
            layers: Vec::new(),
            next_id: 0,
        }
    }
}
