use super::*;

impl Place {
    /// Closest copy of `template` to the point. Ties go to the copy registered first.
    pub fn nearest(&self, x: f32, y: f32, template: &str) -> Option<ColliderId> {
        self.nearest_with_distance(x, y, template).map(|(id, _)| id)
    }

    pub fn furthest(&self, x: f32, y: f32, template: &str) -> Option<ColliderId> {
        self.furthest_with_distance(x, y, template).map(|(id, _)| id)
    }

    pub fn nearest_with_distance(&self, x: f32, y: f32, template: &str) -> Option<(ColliderId, f32)> {
        self.pick_by_distance(x, y, template, |candidate, best| candidate < best)
    }

    pub fn furthest_with_distance(
        &self,
        x: f32,
        y: f32,
        template: &str,
    ) -> Option<(ColliderId, f32)> {
        self.pick_by_distance(x, y, template, |candidate, best| candidate > best)
    }

    fn pick_by_distance(
        &self,
        x: f32,
        y: f32,
        template: &str,
        better: impl Fn(f32, f32) -> bool,
    ) -> Option<(ColliderId, f32)> {
        let mut best: Option<(ColliderId, f32)> = None;
        for id in &self.stack {
            let Some(collider) = self.colliders.get(id) else {
                continue;
            };
            if collider.template() != Some(template) {
                continue;
            }
            let distance = (collider.x() - x).hypot(collider.y() - y);
            match best {
                Some((_, best_distance)) if !better(distance, best_distance) => {}
                _ => best = Some((*id, distance)),
            }
        }
        best
    }
}
