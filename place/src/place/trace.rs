use super::*;

/// Area swept by `trace_rect`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraceRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl TraceRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_corners(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self::new(x1, y1, x2 - x1, y2 - y1)
    }

    /// Same area with a non-negative width and height.
    pub fn normalized(self) -> Self {
        let (x, width) = if self.width < 0.0 {
            (self.x + self.width, -self.width)
        } else {
            (self.x, self.width)
        };
        let (y, height) = if self.height < 0.0 {
            (self.y + self.height, -self.height)
        } else {
            (self.y, self.height)
        };
        Self::new(x, y, width, height)
    }
}

impl Place {
    pub fn trace_line(
        &self,
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        cgroup: Option<&str>,
        mode: QueryMode,
    ) -> Hits {
        let oversized = (x2 - x1).abs() > self.grid_x() || (y2 - y1).abs() > self.grid_y();
        let descriptor = ShapeDescriptor::Line {
            x1: 0.0,
            y1: 0.0,
            x2: x2 - x1,
            y2: y2 - y1,
        };
        let mut hits = self.trace_custom(&descriptor, x1, y1, oversized, cgroup, mode);
        if mode == QueryMode::Multiple {
            // Closest to the line's start first.
            let distance = |id: &ColliderId| {
                self.position(*id)
                    .map(|(x, y)| (x - x1).hypot(y - y1))
                    .unwrap_or(f32::INFINITY)
            };
            hits.sort_by(|a, b| distance(a).total_cmp(&distance(b)));
        }
        hits
    }

    pub fn trace_rect(&self, rect: TraceRect, cgroup: Option<&str>, mode: QueryMode) -> Hits {
        let rect = rect.normalized();
        let oversized = rect.width > self.grid_x() || rect.height > self.grid_y();
        let descriptor = ShapeDescriptor::Rect {
            left: 0.0,
            top: 0.0,
            right: rect.width,
            bottom: rect.height,
        };
        self.trace_custom(&descriptor, rect.x, rect.y, oversized, cgroup, mode)
    }

    pub fn trace_circle(
        &self,
        x: f32,
        y: f32,
        radius: f32,
        cgroup: Option<&str>,
        mode: QueryMode,
    ) -> Hits {
        let oversized = radius * 2.0 > self.grid_x() || radius * 2.0 > self.grid_y();
        let descriptor = ShapeDescriptor::Circle { radius };
        self.trace_custom(&descriptor, x, y, oversized, cgroup, mode)
    }

    /// Traces an open polyline given in world coordinates. Always scans every
    /// collider, since a polyline can stretch over any number of cells.
    pub fn trace_polyline(
        &self,
        points: &[(f32, f32)],
        cgroup: Option<&str>,
        mode: QueryMode,
    ) -> Hits {
        if points.len() < 2 {
            return Hits::new();
        }
        let descriptor = ShapeDescriptor::Strip {
            points: points.to_vec(),
            closed: false,
        };
        self.trace_custom(&descriptor, 0.0, 0.0, true, cgroup, mode)
    }

    pub fn trace_point(&self, x: f32, y: f32, cgroup: Option<&str>, mode: QueryMode) -> Hits {
        self.trace_custom(&ShapeDescriptor::Point, x, y, false, cgroup, mode)
    }

    fn trace_custom(
        &self,
        descriptor: &ShapeDescriptor,
        x: f32,
        y: f32,
        oversized: bool,
        cgroup: Option<&str>,
        mode: QueryMode,
    ) -> Hits {
        let filter = Filter::group(cgroup);
        let shape = descriptor.resolve(&Transform::at(x, y));
        if !oversized {
            let probe = self.probe_shape(shape, x, y);
            return self.occupied_by(&probe, filter, mode);
        }

        log::trace!("oversized trace at ({}, {}), scanning every collider", x, y);
        let tiles = self
            .layers
            .iter()
            .filter(|layer| layer.collisions_enabled)
            .flat_map(|layer| layer.tiles.iter());
        let mut hits = Hits::new();
        for id in self.stack.iter().chain(tiles) {
            let Some(collider) = self.colliders.get(id) else {
                continue;
            };
            if !filter.accepts(collider) {
                continue;
            }
            if collisions::shape_shape(&shape, &collider.shape()) {
                hits.push(*id);
                if mode == QueryMode::Single {
                    break;
                }
            }
        }
        hits
    }
}
