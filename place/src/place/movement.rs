use super::*;

/// Colliders that stopped a `move_by_axes` call, per axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AxisObstacles {
    pub x: Option<ColliderId>,
    pub y: Option<ColliderId>,
}

impl AxisObstacles {
    pub fn is_clear(&self) -> bool {
        self.x.is_none() && self.y.is_none()
    }
}

fn step_size(step: f32) -> f32 {
    if step == 0.0 {
        1.0
    } else {
        step.abs()
    }
}

// Whole steps that fit into `distance` plus the fraction left over. Counted
// up front: subtracting a step from an f32 above 2^24 may change nothing.
fn split_steps(distance: f32, step: f32) -> (u64, f32) {
    let whole = (distance / step).floor();
    let leftover = (distance - whole * step).max(0.0);
    (whole as u64, leftover)
}

impl Place {
    /// Moves `id` along `direction` (degrees) in steps of at most `step`,
    /// stopping in front of the first obstacle, which is returned.
    pub fn move_along(
        &mut self,
        id: ColliderId,
        direction: f32,
        distance: f32,
        cgroup: Option<&str>,
        step: f32,
    ) -> PlaceResult<Option<ColliderId>> {
        self.collider(id)?;
        let (direction, distance) = if distance < 0.0 {
            (direction + 180.0, -distance)
        } else {
            (direction, distance)
        };
        let step = step_size(step);
        let (sin, cos) = direction.to_radians().sin_cos();
        let (whole, leftover) = split_steps(distance, step);
        let lengths = std::iter::repeat(step)
            .take(whole as usize)
            .chain(Some(leftover).filter(|length| *length > 0.0));
        for length in lengths {
            if let Some(obstacle) = self.shift(id, cos * length, sin * length, cgroup)? {
                return Ok(Some(obstacle));
            }
        }
        Ok(None)
    }

    /// Moves `id` by `dx` then `dy` in axis-aligned steps. Each axis stops on
    /// its own obstacle; a leftover fraction of a step is taken only if free.
    pub fn move_by_axes(
        &mut self,
        id: ColliderId,
        dx: f32,
        dy: f32,
        cgroup: Option<&str>,
        step: f32,
    ) -> PlaceResult<Option<AxisObstacles>> {
        self.collider(id)?;
        if dx == 0.0 && dy == 0.0 {
            return Ok(None);
        }
        let step = step_size(step);
        let obstacles = AxisObstacles {
            x: self.step_axis(id, dx, step, cgroup, |delta| (delta, 0.0))?,
            y: self.step_axis(id, dy, step, cgroup, |delta| (0.0, delta))?,
        };

        if obstacles.is_clear() {
            Ok(None)
        } else {
            Ok(Some(obstacles))
        }
    }

    // Whole steps first, stopping at a blocker; then the leftover if it is free.
    fn step_axis(
        &mut self,
        id: ColliderId,
        delta: f32,
        step: f32,
        cgroup: Option<&str>,
        offset: impl Fn(f32) -> (f32, f32),
    ) -> PlaceResult<Option<ColliderId>> {
        let (whole, leftover) = split_steps(delta.abs(), step);
        let (dx, dy) = offset(step.copysign(delta));
        for _ in 0..whole {
            if let Some(obstacle) = self.shift(id, dx, dy, cgroup)? {
                return Ok(Some(obstacle));
            }
        }
        if leftover > 0.0 {
            let (dx, dy) = offset(leftover.copysign(delta));
            self.shift(id, dx, dy, cgroup)?;
        }
        Ok(None)
    }

    /// Moves by the offset when the target is free. Returns the blocker otherwise.
    pub(super) fn shift(
        &mut self,
        id: ColliderId,
        dx: f32,
        dy: f32,
        cgroup: Option<&str>,
    ) -> PlaceResult<Option<ColliderId>> {
        let collider = self.collider(id)?;
        let (x, y) = (collider.x() + dx, collider.y() + dy);
        if let Some(obstacle) = self.occupied(id, Some((x, y)), cgroup) {
            return Ok(Some(obstacle));
        }
        self.set_position(id, x, y)?;
        Ok(None)
    }
}
