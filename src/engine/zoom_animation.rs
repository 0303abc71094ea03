// SPDX-License-Identifier: MPL-2.0
//! The double-tap / snap-back zoom animation.
//!
//! Interpolates the normalized zoom toward a target over a fixed duration
//! while steering a content-anchored focus point to the view center. The
//! focus is held fixed in content space, not view pixels: the same content
//! pixel is tracked for the whole animation. Driven by explicit
//! timestamps; the epoch is the first tick.

use std::time::{Duration, Instant};

use iced_core::Point;

use crate::config::defaults::ZOOM_ANIMATION_MS;
use crate::zoom::BoundTier;

/// Accelerate-decelerate easing over `t` in `[0, 1]`.
pub(crate) fn ease_in_out(t: f32) -> f32 {
    0.5 - (std::f32::consts::PI * t).cos() / 2.0
}

/// An in-flight zoom animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ZoomAnimation {
    start_zoom: f32,
    target_zoom: f32,
    tier: BoundTier,
    /// The tracked focus, in content coordinates.
    content_focus: Point,
    /// Where the focus projected to in view space when the animation began.
    start_touch: Point,
    /// Where the focus should project to when the animation ends.
    end_touch: Point,
    started: Option<Instant>,
}

impl ZoomAnimation {
    pub fn new(
        start_zoom: f32,
        target_zoom: f32,
        tier: BoundTier,
        content_focus: Point,
        start_touch: Point,
        end_touch: Point,
    ) -> Self {
        Self {
            start_zoom,
            target_zoom,
            tier,
            content_focus,
            start_touch,
            end_touch,
            started: None,
        }
    }

    /// Raw progress in `[0, 1]` at `now`, recording the epoch on the first
    /// call.
    pub fn progress(&mut self, now: Instant) -> f32 {
        let started = *self.started.get_or_insert(now);
        let elapsed = now.saturating_duration_since(started);
        let duration = Duration::from_millis(ZOOM_ANIMATION_MS);
        (elapsed.as_secs_f32() / duration.as_secs_f32()).min(1.0)
    }

    /// The zoom level the animation should be at for eased progress `t`.
    #[must_use]
    pub fn zoom_at(&self, t: f32) -> f32 {
        self.start_zoom + t * (self.target_zoom - self.start_zoom)
    }

    /// Where the content focus should project to in view space for eased
    /// progress `t`.
    #[must_use]
    pub fn touch_at(&self, t: f32) -> Point {
        Point::new(
            self.start_touch.x + t * (self.end_touch.x - self.start_touch.x),
            self.start_touch.y + t * (self.end_touch.y - self.start_touch.y),
        )
    }

    #[must_use]
    pub fn tier(&self) -> BoundTier {
        self.tier
    }

    #[must_use]
    pub fn content_focus(&self) -> Point {
        self.content_focus
    }
}
