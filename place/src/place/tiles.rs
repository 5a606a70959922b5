use super::*;
use crate::collider::ColliderKind;

impl Place {
    /// Stores a tile layer. Its tiles stay invisible to queries until
    /// `enable_tilemap_collisions` is called for it.
    pub fn add_tile_layer(&mut self, desc: TileLayerDesc) -> PlaceResult<TileLayerId> {
        for tile in &desc.tiles {
            tile.shape.validate()?;
        }
        let id = TileLayerId(self.layers.len() as u32);
        self.layers.push(TileLayer {
            cgroup: desc.cgroup,
            pending: desc.tiles,
            tiles: Vec::new(),
            collisions_enabled: false,
        });
        Ok(id)
    }

    pub fn tile_layer(&self, id: TileLayerId) -> Option<&TileLayer> {
        self.layers.get(id.0 as usize)
    }

    pub fn tile_layers(&self) -> impl Iterator<Item = (TileLayerId, &TileLayer)> {
        self.layers
            .iter()
            .enumerate()
            .map(|(index, layer)| (TileLayerId(index as u32), layer))
    }

    /// Registers every tile of the layer in the tile partition. A non-empty
    /// `exact_cgroup` replaces the layer's own collision group.
    pub fn enable_tilemap_collisions(
        &mut self,
        layer: TileLayerId,
        exact_cgroup: Option<&str>,
    ) -> PlaceResult<()> {
        let slot = layer.0 as usize;
        let entry = self
            .layers
            .get_mut(slot)
            .ok_or(PlaceError::UnknownTileLayer { layer: layer.0 })?;
        if entry.collisions_enabled {
            return Err(PlaceError::TilemapCollisionsAlreadyEnabled { layer: layer.0 });
        }
        if let Some(cgroup) = exact_cgroup.filter(|cgroup| !cgroup.is_empty()) {
            entry.cgroup = Some(cgroup.to_owned());
        }
        entry.collisions_enabled = true;
        let cgroup = entry.cgroup.clone();
        let pending = std::mem::take(&mut entry.pending);

        let mut registered = Vec::with_capacity(pending.len());
        for tile in pending {
            let id = self.take_id();
            let mut collider = Collider::new(
                tile.transform,
                tile.shape,
                cgroup.clone(),
                None,
                ColliderKind::Tile(layer),
            );
            self.hash_collider(id, &mut collider);
            self.colliders.insert(id, collider);
            registered.push(id);
        }
        log::debug!(
            "enabled collisions for tile layer {} ({} tiles, group {:?})",
            layer.0,
            registered.len(),
            cgroup
        );
        self.layers[slot].tiles = registered;
        Ok(())
    }
}
