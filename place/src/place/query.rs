use super::*;

impl Place {
    /// Builds the probe for `id`, optionally moved to `at`. The collider
    /// itself is left untouched. Without a new position the probe reuses the
    /// memoised shape and the cells the collider was last hashed into.
    pub fn probe(&self, id: ColliderId, at: Option<(f32, f32)>) -> Option<Probe<'_>> {
        let Some(collider) = self.colliders.get(&id) else {
            log::warn!("probing unknown collider {}", id);
            return None;
        };
        // Probing at the current position is the same as not moving at all.
        let at = at.filter(|&(x, y)| x != collider.x() || y != collider.y());
        let probe = match at {
            Some((x, y)) => {
                let transform = collider.transform.with_position(x, y);
                Probe {
                    id: Some(id),
                    shape: ProbeShape::Owned(collider.descriptor().resolve(&transform)),
                    cells: self.index.cells_for(x, y),
                }
            }
            None => {
                let cells = if collider.chashes.is_empty() {
                    self.index.cells_for(collider.x(), collider.y())
                } else {
                    collider.chashes.clone()
                };
                Probe {
                    id: Some(id),
                    shape: ProbeShape::Cached(collider.shape()),
                    cells,
                }
            }
        };
        Some(probe)
    }

    /// A probe that belongs to no collider, hashed at `(x, y)`.
    pub fn probe_shape(&self, shape: ShapeEnum, x: f32, y: f32) -> Probe<'static> {
        Probe {
            id: None,
            shape: ProbeShape::Owned(shape),
            cells: self.index.cells_for(x, y),
        }
    }

    pub fn query(
        &self,
        probe: &Probe<'_>,
        partition: Partition,
        mode: QueryMode,
        filter: Filter<'_>,
    ) -> Hits {
        let mut hits = Hits::new();
        for other in self.index.candidates(partition, probe.cells()) {
            if probe.id() == Some(other) || hits.contains(&other) {
                continue;
            }
            let Some(collider) = self.colliders.get(&other) else {
                continue;
            };
            if !filter.accepts(collider) {
                continue;
            }
            if collisions::shape_shape(probe.shape(), &collider.shape()) {
                hits.push(other);
                if mode == QueryMode::Single {
                    break;
                }
            }
        }
        hits
    }

    /// Entities first; tiles are only consulted when a single-hit query found
    /// no entity.
    pub(super) fn occupied_by(&self, probe: &Probe<'_>, filter: Filter<'_>, mode: QueryMode) -> Hits {
        let mut hits = self.query(probe, Partition::Entities, mode, filter);
        if mode == QueryMode::Single && !hits.is_empty() {
            return hits;
        }
        for tile in self.query(probe, Partition::Tiles, mode, filter) {
            if !hits.contains(&tile) {
                hits.push(tile);
            }
        }
        hits
    }

    fn probe_hits(
        &self,
        id: ColliderId,
        at: Option<(f32, f32)>,
        partition: Option<Partition>,
        filter: Filter<'_>,
        mode: QueryMode,
    ) -> Hits {
        let Some(probe) = self.probe(id, at) else {
            return Hits::new();
        };
        match partition {
            Some(partition) => self.query(&probe, partition, mode, filter),
            None => self.occupied_by(&probe, filter, mode),
        }
    }

    pub fn occupied(
        &self,
        id: ColliderId,
        at: Option<(f32, f32)>,
        cgroup: Option<&str>,
    ) -> Option<ColliderId> {
        self.probe_hits(id, at, None, Filter::group(cgroup), QueryMode::Single)
            .first()
            .copied()
    }

    pub fn occupied_multiple(
        &self,
        id: ColliderId,
        at: Option<(f32, f32)>,
        cgroup: Option<&str>,
    ) -> Vec<ColliderId> {
        self.probe_hits(id, at, None, Filter::group(cgroup), QueryMode::Multiple)
            .into_vec()
    }

    pub fn free(&self, id: ColliderId, at: Option<(f32, f32)>, cgroup: Option<&str>) -> bool {
        self.occupied(id, at, cgroup).is_none()
    }

    /// First copy of `template` touching the collider.
    pub fn meet(
        &self,
        id: ColliderId,
        at: Option<(f32, f32)>,
        template: &str,
    ) -> Option<ColliderId> {
        self.probe_hits(
            id,
            at,
            Some(Partition::Entities),
            Filter::Template(template),
            QueryMode::Single,
        )
        .first()
        .copied()
    }

    pub fn meet_multiple(
        &self,
        id: ColliderId,
        at: Option<(f32, f32)>,
        template: &str,
    ) -> Vec<ColliderId> {
        self.probe_hits(
            id,
            at,
            Some(Partition::Entities),
            Filter::Template(template),
            QueryMode::Multiple,
        )
        .into_vec()
    }

    pub fn copies(
        &self,
        id: ColliderId,
        at: Option<(f32, f32)>,
        cgroup: Option<&str>,
    ) -> Option<ColliderId> {
        self.probe_hits(
            id,
            at,
            Some(Partition::Entities),
            Filter::group(cgroup),
            QueryMode::Single,
        )
        .first()
        .copied()
    }

    pub fn copies_multiple(
        &self,
        id: ColliderId,
        at: Option<(f32, f32)>,
        cgroup: Option<&str>,
    ) -> Vec<ColliderId> {
        self.probe_hits(
            id,
            at,
            Some(Partition::Entities),
            Filter::group(cgroup),
            QueryMode::Multiple,
        )
        .into_vec()
    }

    pub fn tiles(
        &self,
        id: ColliderId,
        at: Option<(f32, f32)>,
        cgroup: Option<&str>,
    ) -> Option<ColliderId> {
        self.probe_hits(
            id,
            at,
            Some(Partition::Tiles),
            Filter::group(cgroup),
            QueryMode::Single,
        )
        .first()
        .copied()
    }

    pub fn tiles_multiple(
        &self,
        id: ColliderId,
        at: Option<(f32, f32)>,
        cgroup: Option<&str>,
    ) -> Vec<ColliderId> {
        self.probe_hits(
            id,
            at,
            Some(Partition::Tiles),
            Filter::group(cgroup),
            QueryMode::Multiple,
        )
        .into_vec()
    }
}
