use crate::collider::ColliderId;
use crate::config::GridConfig;
use fxhash::FxHashMap;
use smallvec::SmallVec;
use std::fmt;

/// Logical grid a collider lives in. Queries read exactly one partition at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Partition {
    Entities,
    Tiles,
}

impl Partition {
    fn slot(self) -> usize {
        match self {
            Partition::Entities => 0,
            Partition::Tiles => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellKey {
    pub x: i32,
    pub y: i32,
}

impl CellKey {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.x, self.y)
    }
}

/// A collider is hashed into at most four cells.
pub type CellList = SmallVec<[CellKey; 4]>;

/// Uniform spatial hash: cell key to the colliders registered under it.
pub struct SpatialIndex {
    grid_x: f32,
    grid_y: f32,
    cells: [FxHashMap<CellKey, Vec<ColliderId>>; 2],
}

impl SpatialIndex {
    pub fn new(config: &GridConfig) -> Self {
        Self {
            grid_x: config.grid_x,
            grid_y: config.grid_y,
            cells: [FxHashMap::default(), FxHashMap::default()],
        }
    }

    pub fn grid_x(&self) -> f32 {
        self.grid_x
    }

    pub fn grid_y(&self) -> f32 {
        self.grid_y
    }

    /// The cell nearest to the position plus the neighbours on the side the
    /// position leans towards.
    pub fn cells_for(&self, x: f32, y: f32) -> CellList {
        let cell_x = round_half_up(x / self.grid_x);
        let cell_y = round_half_up(y / self.grid_y);
        let dx = sign(x - self.grid_x * cell_x);
        let dy = sign(y - self.grid_y * cell_y);
        let (cell_x, cell_y) = (cell_x as i32, cell_y as i32);

        let mut cells = CellList::new();
        cells.push(CellKey::new(cell_x, cell_y));
        if dx != 0 {
            cells.push(CellKey::new(cell_x + dx, cell_y));
            if dy != 0 {
                cells.push(CellKey::new(cell_x + dx, cell_y + dy));
            }
        }
        if dy != 0 {
            cells.push(CellKey::new(cell_x, cell_y + dy));
        }
        cells
    }

    pub fn insert(&mut self, partition: Partition, id: ColliderId, cells: &[CellKey]) {
        let grid = &mut self.cells[partition.slot()];
        for key in cells {
            let members = grid.entry(*key).or_default();
            if !members.contains(&id) {
                members.push(id);
            }
        }
    }

    pub fn remove(&mut self, partition: Partition, id: ColliderId, cells: &[CellKey]) {
        let grid = &mut self.cells[partition.slot()];
        for key in cells {
            let Some(members) = grid.get_mut(key) else {
                continue;
            };
            if let Some(position) = members.iter().position(|member| *member == id) {
                members.swap_remove(position);
            }
            if members.is_empty() {
                grid.remove(key);
            }
        }
    }

    /// Moves `id` from the `old` cells to the `new` ones, touching only the
    /// difference. Returns whether any cell list changed.
    pub fn refresh(
        &mut self,
        partition: Partition,
        id: ColliderId,
        old: &[CellKey],
        new: &[CellKey],
    ) -> bool {
        let left: CellList = old.iter().filter(|key| !new.contains(key)).copied().collect();
        let entered: CellList = new.iter().filter(|key| !old.contains(key)).copied().collect();
        if left.is_empty() && entered.is_empty() {
            return false;
        }
        self.remove(partition, id, &left);
        self.insert(partition, id, &entered);
        true
    }

    /// Every collider stored under `cells`. A collider spanning several of the
    /// cells is yielded once per cell.
    pub fn candidates<'a>(
        &'a self,
        partition: Partition,
        cells: &'a [CellKey],
    ) -> impl Iterator<Item = ColliderId> + 'a {
        let grid = &self.cells[partition.slot()];
        cells
            .iter()
            .filter_map(move |key| grid.get(key))
            .flat_map(|members| members.iter().copied())
    }

    pub fn cell(&self, partition: Partition, key: CellKey) -> &[ColliderId] {
        self.cells[partition.slot()]
            .get(&key)
            .map(|members| members.as_slice())
            .unwrap_or(&[])
    }

    pub fn occupied_cell_count(&self, partition: Partition) -> usize {
        self.cells[partition.slot()].len()
    }

    /// Cells in which `id` is currently listed, in no particular order.
    pub fn cells_containing(&self, partition: Partition, id: ColliderId) -> Vec<CellKey> {
        self.cells[partition.slot()]
            .iter()
            .filter(|(_, members)| members.contains(&id))
            .map(|(key, _)| *key)
            .collect()
    }
}

// Rounds to the nearest integer, halves towards positive infinity.
fn round_half_up(value: f32) -> f32 {
    (value + 0.5).floor()
}

fn sign(value: f32) -> i32 {
    if value > 0.0 {
        1
    } else if value < 0.0 {
        -1
    } else {
        0
    }
}
