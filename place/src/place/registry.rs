use super::*;
use crate::collider::{ColliderDesc, ColliderKind};

impl Place {
    /// Registers a copy and hashes it into the entity partition.
    pub fn insert(&mut self, desc: ColliderDesc) -> PlaceResult<ColliderId> {
        desc.shape.validate()?;
        let id = self.take_id();
        let mut collider = Collider::new(
            desc.transform,
            desc.shape,
            desc.cgroup,
            desc.template,
            ColliderKind::Copy,
        );
        self.hash_collider(id, &mut collider);
        log::trace!("registered copy {} in cells {:?}", id, collider.chashes);
        self.colliders.insert(id, collider);
        self.stack.push(id);
        Ok(id)
    }

    /// Unhashes and forgets a copy or tile.
    pub fn remove(&mut self, id: ColliderId) -> PlaceResult<()> {
        let collider = self
            .colliders
            .remove(&id)
            .ok_or(PlaceError::UnknownCollider { id: id.0 })?;
        self.index.remove(collider.partition(), id, &collider.chashes);
        match collider.kind() {
            ColliderKind::Copy => self.stack.retain(|other| *other != id),
            ColliderKind::Tile(layer) => {
                if let Some(layer) = self.layers.get_mut(layer.0 as usize) {
                    layer.tiles.retain(|other| *other != id);
                }
            }
        }
        log::trace!("removed collider {}", id);
        Ok(())
    }

    pub fn set_transform(&mut self, id: ColliderId, transform: Transform) -> PlaceResult<()> {
        self.collider_mut(id)?.set_transform(transform);
        Ok(())
    }

    pub fn set_position(&mut self, id: ColliderId, x: f32, y: f32) -> PlaceResult<()> {
        let collider = self.collider_mut(id)?;
        let transform = collider.transform.with_position(x, y);
        collider.set_transform(transform);
        Ok(())
    }

    pub fn translate(&mut self, id: ColliderId, dx: f32, dy: f32) -> PlaceResult<()> {
        let collider = self.collider_mut(id)?;
        let transform = collider
            .transform
            .with_position(collider.x() + dx, collider.y() + dy);
        collider.set_transform(transform);
        Ok(())
    }

    pub fn set_scale(&mut self, id: ColliderId, scale_x: f32, scale_y: f32) -> PlaceResult<()> {
        let collider = self.collider_mut(id)?;
        let transform = collider.transform.with_scale(scale_x, scale_y);
        collider.set_transform(transform);
        Ok(())
    }

    pub fn set_angle(&mut self, id: ColliderId, angle: f32) -> PlaceResult<()> {
        let collider = self.collider_mut(id)?;
        let transform = collider.transform.with_angle(angle);
        collider.set_transform(transform);
        Ok(())
    }

    /// Re-hashes one collider after it moved. Returns whether its cells changed.
    pub fn refresh(&mut self, id: ColliderId) -> PlaceResult<bool> {
        let collider = self
            .colliders
            .get_mut(&id)
            .ok_or(PlaceError::UnknownCollider { id: id.0 })?;
        Ok(Self::rehash(&mut self.index, id, collider))
    }

    /// Post-step hook: re-hashes every collider whose transform changed since
    /// it was last hashed. Returns how many were refreshed.
    pub fn refresh_moved(&mut self) -> usize {
        let mut refreshed = 0;
        for (id, collider) in self.colliders.iter_mut() {
            if collider.is_stale() {
                Self::rehash(&mut self.index, *id, collider);
                refreshed += 1;
            }
        }
        refreshed
    }

    fn rehash(index: &mut SpatialIndex, id: ColliderId, collider: &mut Collider) -> bool {
        let fresh = index.cells_for(collider.x(), collider.y());
        let changed = index.refresh(collider.partition(), id, &collider.chashes, &fresh);
        collider.chashes = fresh;
        collider.indexed_version = collider.version;
        changed
    }

    pub(super) fn hash_collider(&mut self, id: ColliderId, collider: &mut Collider) {
        let cells = self.index.cells_for(collider.x(), collider.y());
        self.index.insert(collider.partition(), id, &cells);
        collider.chashes = cells;
        collider.indexed_version = collider.version;
    }
}
