use crate::grid::{CellList, Partition};
use crate::place::TileLayerId;
use common::shapes::ShapeEnum;
use common::{ShapeDescriptor, Transform};
use serde::{Deserialize, Serialize};
use std::cell::{Ref, RefCell};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColliderId(pub(crate) u32);

impl ColliderId {
    pub fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ColliderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColliderKind {
    Copy,
    Tile(TileLayerId),
}

/// Everything the lifecycle hands over when a copy is created.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColliderDesc {
    #[serde(default)]
    pub transform: Transform,
    #[serde(default)]
    pub shape: ShapeDescriptor,
    #[serde(default)]
    pub cgroup: Option<String>,
    #[serde(default)]
    pub template: Option<String>,
}

impl ColliderDesc {
    pub fn new(shape: ShapeDescriptor) -> Self {
        Self {
            shape,
            ..Self::default()
        }
    }

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.transform.x = x;
        self.transform.y = y;
        self
    }

    pub fn transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn group(mut self, cgroup: &str) -> Self {
        self.cgroup = Some(cgroup.to_owned());
        self
    }

    pub fn template(mut self, template: &str) -> Self {
        self.template = Some(template.to_owned());
        self
    }
}

struct CachedShape {
    version: u64,
    shape: ShapeEnum,
}

/// A copy or tile as seen by the collision core.
pub struct Collider {
    pub(crate) transform: Transform,
    descriptor: ShapeDescriptor,
    pub(crate) cgroup: Option<String>,
    template: Option<String>,
    kind: ColliderKind,
    // Bumped on every transform change; the shape cache and the grid compare against it.
    pub(crate) version: u64,
    pub(crate) indexed_version: u64,
    pub(crate) chashes: CellList,
    cache: RefCell<CachedShape>,
}

impl Collider {
    pub(crate) fn new(
        transform: Transform,
        descriptor: ShapeDescriptor,
        cgroup: Option<String>,
        template: Option<String>,
        kind: ColliderKind,
    ) -> Self {
        let shape = descriptor.resolve(&transform);
        Self {
            transform,
            descriptor,
            cgroup,
            template,
            kind,
            version: 0,
            indexed_version: 0,
            chashes: CellList::new(),
            cache: RefCell::new(CachedShape { version: 0, shape }),
        }
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn x(&self) -> f32 {
        self.transform.x
    }

    pub fn y(&self) -> f32 {
        self.transform.y
    }

    pub fn descriptor(&self) -> &ShapeDescriptor {
        &self.descriptor
    }

    pub fn cgroup(&self) -> Option<&str> {
        self.cgroup.as_deref()
    }

    pub fn template(&self) -> Option<&str> {
        self.template.as_deref()
    }

    pub fn kind(&self) -> ColliderKind {
        self.kind
    }

    pub fn partition(&self) -> Partition {
        match self.kind {
            ColliderKind::Copy => Partition::Entities,
            ColliderKind::Tile(_) => Partition::Tiles,
        }
    }

    /// Cells the collider was hashed into at its last refresh.
    pub fn cells(&self) -> &[crate::grid::CellKey] {
        &self.chashes
    }

    /// Whether the transform changed since the collider was last hashed.
    pub fn is_stale(&self) -> bool {
        self.version != self.indexed_version
    }

    /// World-space shape, recomputed only when the transform version moved on.
    pub fn shape(&self) -> Ref<'_, ShapeEnum> {
        let stale = self.cache.borrow().version != self.version;
        if stale {
            let shape = self.descriptor.resolve(&self.transform);
            *self.cache.borrow_mut() = CachedShape {
                version: self.version,
                shape,
            };
        }
        Ref::map(self.cache.borrow(), |cached| &cached.shape)
    }

    pub(crate) fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
        self.version += 1;
    }
}

impl fmt::Debug for Collider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collider")
            .field("transform", &self.transform)
            .field("descriptor", &self.descriptor)
            .field("cgroup", &self.cgroup)
            .field("template", &self.template)
            .field("kind", &self.kind)
            .field("version", &self.version)
            .field("chashes", &self.chashes)
            .finish()
    }
}
