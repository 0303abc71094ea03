// SPDX-License-Identifier: MPL-2.0
//! Ballistic fling scrolling.
//!
//! A [`FlingScroll`] carries the translation along a decelerating
//! trajectory after the pointer is released. The simulation is driven by
//! explicit timestamps, so trajectories are reproducible with synthetic
//! clocks; the epoch is the first tick, not construction.

use std::time::Instant;

use iced_core::{Size, Vector};

use crate::config::defaults::FLING_SETTLE_VELOCITY;

/// Longest time step the simulation will integrate in one tick. A stalled
/// host resuming after a long pause must not teleport the content.
const MAX_TICK_SECONDS: f32 = 0.1;

/// A decelerating scroll trajectory over the legal translation extents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct FlingScroll {
    position: Vector,
    velocity: Vector,
    range_x: (f32, f32),
    range_y: (f32, f32),
    friction: f32,
    last_tick: Option<Instant>,
    finished: bool,
}

impl FlingScroll {
    /// Seeds a trajectory at the current translation with the release
    /// velocity.
    ///
    /// On an axis where the content overflows the view the legal extent is
    /// `[view - content, 0]`; otherwise the extent collapses to the current
    /// translation and no movement is possible there.
    pub fn new(
        start: Vector,
        velocity: Vector,
        view: Size,
        content: Size,
        friction: f32,
    ) -> Self {
        let range_x = if content.width > view.width {
            (view.width - content.width, 0.0)
        } else {
            (start.x, start.x)
        };
        let range_y = if content.height > view.height {
            (view.height - content.height, 0.0)
        } else {
            (start.y, start.y)
        };

        Self {
            position: start,
            velocity,
            range_x,
            range_y,
            friction,
            last_tick: None,
            finished: false,
        }
    }

    /// Advances the simulation to `now` and returns the translation delta
    /// since the previous tick.
    ///
    /// The first call only records the epoch. Returns `None` once the
    /// trajectory has settled; the caller owns the resulting state
    /// transition.
    pub fn tick(&mut self, now: Instant) -> Option<Vector> {
        if self.finished {
            return None;
        }

        let Some(last) = self.last_tick else {
            self.last_tick = Some(now);
            return Some(Vector::new(0.0, 0.0));
        };

        let dt = now
            .saturating_duration_since(last)
            .as_secs_f32()
            .min(MAX_TICK_SECONDS);
        self.last_tick = Some(now);

        let mut next_x = self.position.x + self.velocity.x * dt;
        let mut next_y = self.position.y + self.velocity.y * dt;

        // An axis that hits its extent stops there.
        if next_x <= self.range_x.0 || next_x >= self.range_x.1 {
            next_x = next_x.clamp(self.range_x.0, self.range_x.1);
            self.velocity.x = 0.0;
        }
        if next_y <= self.range_y.0 || next_y >= self.range_y.1 {
            next_y = next_y.clamp(self.range_y.0, self.range_y.1);
            self.velocity.y = 0.0;
        }

        let delta = Vector::new(next_x - self.position.x, next_y - self.position.y);
        self.position = Vector::new(next_x, next_y);

        let decay = (1.0 - self.friction * dt).max(0.0);
        self.velocity = Vector::new(self.velocity.x * decay, self.velocity.y * decay);

        if self.velocity.x.abs() < FLING_SETTLE_VELOCITY
            && self.velocity.y.abs() < FLING_SETTLE_VELOCITY
        {
            self.finished = true;
        }

        Some(delta)
    }

    /// Forces the trajectory to its finished state immediately.
    pub fn cancel(&mut self) {
        self.finished = true;
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}
