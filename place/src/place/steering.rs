use super::*;
use std::time::Duration;

const BIAS_PERIOD: Duration = Duration::from_millis(789);

/// Side preference for `go`. Flips every 789 ms of game time so a copy stuck
/// in front of a wall eventually tries the other way round.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiasOscillator {
    sign: f32,
    elapsed: Duration,
}

impl BiasOscillator {
    pub fn new() -> Self {
        Self {
            sign: 1.0,
            elapsed: Duration::ZERO,
        }
    }

    pub fn advance(&mut self, delta: Duration) {
        self.elapsed += delta;
        while self.elapsed >= BIAS_PERIOD {
            self.elapsed -= BIAS_PERIOD;
            self.sign = -self.sign;
        }
    }

    pub fn sign(&self) -> f32 {
        self.sign
    }
}

impl Default for BiasOscillator {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Steer {
    /// Jumped onto the goal.
    Arrived,
    /// Took one step in the given direction (degrees).
    Moved { direction: f32 },
    /// Every candidate position was occupied.
    Blocked,
}

const DEFLECTIONS: [f32; 4] = [30.0, 60.0, 90.0, 120.0];

impl Place {
    /// One step of naive obstacle avoidance towards `(x, y)`.
    pub fn go(
        &mut self,
        id: ColliderId,
        x: f32,
        y: f32,
        length: f32,
        cgroup: Option<&str>,
        bias: &BiasOscillator,
    ) -> PlaceResult<Steer> {
        let collider = self.collider(id)?;
        let (from_x, from_y) = (collider.x(), collider.y());
        if (x - from_x).hypot(y - from_y) < length {
            if self.free(id, Some((x, y)), cgroup) {
                self.set_position(id, x, y)?;
                return Ok(Steer::Arrived);
            }
            return Ok(Steer::Blocked);
        }

        let heading = ((y - from_y).atan2(x - from_x).to_degrees() + 360.0) % 360.0;
        let side = bias.sign();
        let candidates = std::iter::once(heading).chain([-1.0f32, 1.0].into_iter().flat_map(
            move |turn| {
                DEFLECTIONS
                    .iter()
                    .map(move |deflection| heading + deflection * side * turn)
            },
        ));
        for direction in candidates {
            let (sin, cos) = direction.to_radians().sin_cos();
            let target = (from_x + cos * length, from_y + sin * length);
            if self.free(id, Some(target), cgroup) {
                self.set_position(id, target.0, target.1)?;
                log::trace!("{} steered towards {} degrees", id, direction);
                return Ok(Steer::Moved { direction });
            }
        }
        Ok(Steer::Blocked)
    }
}
