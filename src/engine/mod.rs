// SPDX-License-Identifier: MPL-2.0
//! The transform engine.
//!
//! [`TouchEngine`] is the single owning state container behind a zoomable
//! image view: it holds the display transform, the normalized zoom level,
//! the viewport geometry, and the interaction state, and it is the only
//! place any of them are mutated. A thin platform wrapper feeds it raw
//! gesture events and size notifications, drives its animations from the
//! frame clock, and applies the resulting transform when rendering.
//!
//! Everything runs on one logical thread: events, ticks, and cancellation
//! are plain synchronous calls, so there is no locking and no race window
//! between cancelling an animation and starting its replacement.

mod fling;
mod zoom_animation;

use std::fmt;
use std::time::Instant;

use iced_core::{Point, Size, Vector};
use log::debug;

use crate::bounds::{drag_delta, fix_scale_and_translation, fix_translation};
use crate::config::{FlingBehavior, TouchConfig};
use crate::error::{Error, Result};
use crate::gesture::{
    classify_fling, FlingDirection, FlingListener, GestureEffect, GestureEvent, InteractionState,
};
use crate::persisted_state::SavedView;
use crate::transform::Transform;
use crate::viewport::{fit_content_to_view, ViewGeometry};
use crate::zoom::{BoundTier, ZoomBounds};

use fling::FlingScroll;
use zoom_animation::{ease_in_out, ZoomAnimation};

/// What a frame tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No animation is active.
    Inactive,
    /// An animation advanced; redraw and keep ticking.
    Running,
    /// The active animation finished this tick; redraw once more.
    Finished,
}

/// The gesture-to-transform engine of a zoomable image view.
pub struct TouchEngine {
    config: TouchConfig,
    bounds: ZoomBounds,
    transform: Transform,
    prev_transform: Transform,
    normalized_scale: f32,
    geometry: ViewGeometry,
    content_size: Option<Size>,
    state: InteractionState,
    drag_anchor: Option<Point>,
    recenter_on_next_fit: bool,
    fling: Option<FlingScroll>,
    zoom_animation: Option<ZoomAnimation>,
    fling_listener: Option<Box<dyn FlingListener>>,
}

impl TouchEngine {
    pub fn new(config: TouchConfig) -> Self {
        let bounds = ZoomBounds::new(
            config.min_scale,
            config.max_scale,
            config.min_bounce_multiplier,
            config.max_bounce_multiplier,
        );
        Self {
            config,
            bounds,
            transform: Transform::IDENTITY,
            prev_transform: Transform::IDENTITY,
            normalized_scale: 1.0,
            geometry: ViewGeometry::default(),
            content_size: None,
            state: InteractionState::Idle,
            drag_anchor: None,
            recenter_on_next_fit: false,
            fling: None,
            zoom_animation: None,
            fling_listener: None,
        }
    }

    // ======================================================================
    // Host notifications
    // ======================================================================

    /// Notifies the engine of a new view size (layout pass, window resize,
    /// rotation) and refits the content.
    ///
    /// While zoomed in, the previously visible content region stays
    /// visually anchored across the change.
    pub fn set_view_size(&mut self, size: Size) {
        if size == self.geometry.view {
            return;
        }
        self.snapshot_previous();
        self.geometry.view = size;
        self.fit();
    }

    /// Notifies the engine that the content (and its intrinsic size)
    /// changed. `None` means no content is loaded.
    ///
    /// Depending on `maintain_zoom_after_image_change`, the current zoom
    /// either carries over to the new content or the view re-fits and
    /// re-centers.
    pub fn set_content_size(&mut self, size: Option<Size>) {
        self.snapshot_previous();
        self.content_size = size;
        if !self.config.maintain_zoom_after_image_change {
            self.recenter_on_next_fit = true;
        }
        self.fit();
    }

    // ======================================================================
    // Gesture handling
    // ======================================================================

    /// Handles a raw gesture event.
    pub fn handle(&mut self, event: GestureEvent) -> GestureEffect {
        match event {
            GestureEvent::PointerDown(position) => self.on_pointer_down(position),
            GestureEvent::PointerMove(position) => self.on_pointer_move(position),
            GestureEvent::PointerUp => self.on_pointer_up(),
            GestureEvent::PinchBegin => self.on_pinch_begin(),
            GestureEvent::PinchUpdate { factor, focus } => self.on_pinch_update(factor, focus),
            GestureEvent::PinchEnd => self.on_pinch_end(),
            GestureEvent::Tap => GestureEffect::Click,
            GestureEvent::LongPress => GestureEffect::LongClick,
            GestureEvent::DoubleTap(position) => self.on_double_tap(position),
            GestureEvent::Fling {
                start,
                end,
                velocity,
            } => self.on_fling(start, end, velocity),
        }
    }

    fn on_pointer_down(&mut self, position: Point) -> GestureEffect {
        if matches!(
            self.state,
            InteractionState::Idle | InteractionState::Dragging | InteractionState::Flinging
        ) {
            self.cancel_fling();
            self.drag_anchor = Some(position);
            self.set_state(InteractionState::Dragging);
        }
        GestureEffect::None
    }

    fn on_pointer_move(&mut self, position: Point) -> GestureEffect {
        if self.state != InteractionState::Dragging || !self.config.allow_drag {
            return GestureEffect::None;
        }
        let Some(anchor) = self.drag_anchor else {
            return GestureEffect::None;
        };

        let view = self.geometry.view;
        let image = self.image_size();
        let delta = Vector::new(
            drag_delta(position.x - anchor.x, view.width, image.width),
            drag_delta(position.y - anchor.y, view.height, image.height),
        );
        self.transform.translate(delta);
        fix_translation(&mut self.transform, view, image);
        self.drag_anchor = Some(position);

        GestureEffect::TransformChanged
    }

    fn on_pointer_up(&mut self) -> GestureEffect {
        if matches!(
            self.state,
            InteractionState::Idle | InteractionState::Dragging | InteractionState::Flinging
        ) {
            self.drag_anchor = None;
            self.set_state(InteractionState::Idle);
        }
        GestureEffect::None
    }

    fn on_pinch_begin(&mut self) -> GestureEffect {
        if self.config.allow_scale {
            self.set_state(InteractionState::Pinching);
        }
        GestureEffect::None
    }

    fn on_pinch_update(&mut self, factor: f32, focus: Point) -> GestureEffect {
        if self.state != InteractionState::Pinching {
            return GestureEffect::None;
        }
        // Live pinches run against the wider bounce tier; the overshoot is
        // snapped back at pinch end.
        self.apply_scale(factor, focus, BoundTier::Bounce);
        GestureEffect::TransformChanged
    }

    fn on_pinch_end(&mut self) -> GestureEffect {
        if self.state != InteractionState::Pinching {
            return GestureEffect::None;
        }
        self.set_state(InteractionState::Idle);

        if let Some(target) = self.bounds.nearest_hard_bound(self.normalized_scale) {
            self.start_zoom_animation(target, self.view_center(), BoundTier::Bounce);
            return GestureEffect::AnimationStarted;
        }
        GestureEffect::None
    }

    fn on_double_tap(&mut self, position: Point) -> GestureEffect {
        if self.state != InteractionState::Idle
            || !self.config.allow_double_tap
            || !self.config.allow_scale
        {
            return GestureEffect::None;
        }

        let target = if self.normalized_scale == self.bounds.min_scale() {
            self.bounds.max_scale()
        } else {
            self.bounds.min_scale()
        };
        self.start_zoom_animation(target, position, BoundTier::Hard);

        match self.state {
            InteractionState::AnimatingZoom => GestureEffect::AnimationStarted,
            _ => GestureEffect::None,
        }
    }

    fn on_fling(&mut self, start: Point, end: Point, velocity: Vector) -> GestureEffect {
        match self.config.fling_behavior {
            FlingBehavior::Scroll => {
                if !matches!(
                    self.state,
                    InteractionState::Idle
                        | InteractionState::Dragging
                        | InteractionState::Flinging
                ) {
                    return GestureEffect::None;
                }
                self.cancel_fling();
                self.fling = Some(FlingScroll::new(
                    Vector::new(self.transform.trans_x, self.transform.trans_y),
                    velocity,
                    self.geometry.view,
                    self.image_size(),
                    self.config.tuning.fling_friction,
                ));
                self.set_state(InteractionState::Flinging);
                GestureEffect::AnimationStarted
            }
            FlingBehavior::Listener => {
                let Some(listener) = self.fling_listener.as_mut() else {
                    return GestureEffect::None;
                };
                let Some(fling) = classify_fling(&self.config.tuning, start, end, velocity)
                else {
                    return GestureEffect::None;
                };
                let consumed = match fling.direction {
                    FlingDirection::Right => listener.on_fling_right(fling.distance, fling.velocity),
                    FlingDirection::Left => listener.on_fling_left(fling.distance, fling.velocity),
                    FlingDirection::Up => listener.on_fling_up(fling.distance, fling.velocity),
                    FlingDirection::Down => listener.on_fling_down(fling.distance, fling.velocity),
                };
                GestureEffect::FlingForwarded { consumed }
            }
            FlingBehavior::Disabled => GestureEffect::None,
        }
    }

    // ======================================================================
    // Frame driving
    // ======================================================================

    /// Advances the active animation, if any.
    ///
    /// Hosts call this once per frame while
    /// [`needs_animation`](Self::needs_animation) is true, passing their
    /// frame timestamp.
    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        if self.zoom_animation.is_some() {
            self.tick_zoom_animation(now)
        } else if self.fling.is_some() {
            self.tick_fling(now)
        } else {
            TickOutcome::Inactive
        }
    }

    /// Whether an animation is in flight and [`tick`](Self::tick) should be
    /// driven.
    #[must_use]
    pub fn needs_animation(&self) -> bool {
        self.zoom_animation.is_some() || self.fling.is_some()
    }

    fn tick_zoom_animation(&mut self, now: Instant) -> TickOutcome {
        let Some(mut animation) = self.zoom_animation.take() else {
            return TickOutcome::Inactive;
        };

        let raw = animation.progress(now);
        let t = ease_in_out(raw);

        // Scale to exactly the interpolated zoom level, then steer the
        // tracked content point along its path toward the view center.
        let delta = animation.zoom_at(t) / self.normalized_scale;
        self.apply_scale(delta, animation.content_focus(), animation.tier());
        if let Some(current) = self.view_point_from_content_point(animation.content_focus()) {
            let target = animation.touch_at(t);
            self.transform
                .translate(Vector::new(target.x - current.x, target.y - current.y));
        }
        let image_size = self.image_size();
        fix_scale_and_translation(&mut self.transform, self.geometry.view, image_size);

        if raw < 1.0 {
            self.zoom_animation = Some(animation);
            TickOutcome::Running
        } else {
            // Per-tick multiplicative deltas accumulate rounding error;
            // the animation must end at the target, not next to it.
            self.normalized_scale = animation.zoom_at(1.0);
            self.set_state(InteractionState::Idle);
            TickOutcome::Finished
        }
    }

    fn tick_fling(&mut self, now: Instant) -> TickOutcome {
        let Some(mut fling) = self.fling.take() else {
            return TickOutcome::Inactive;
        };

        match fling.tick(now) {
            Some(delta) => {
                self.transform.translate(delta);
                let image_size = self.image_size();
                fix_translation(&mut self.transform, self.geometry.view, image_size);
                if fling.is_finished() {
                    self.set_state(InteractionState::Idle);
                    TickOutcome::Finished
                } else {
                    self.fling = Some(fling);
                    TickOutcome::Running
                }
            }
            None => {
                self.set_state(InteractionState::Idle);
                TickOutcome::Finished
            }
        }
    }

    // ======================================================================
    // Queries
    // ======================================================================

    /// The current zoom level relative to the fit scale (1.0 = content
    /// exactly fits the view).
    #[must_use]
    pub fn current_zoom(&self) -> f32 {
        self.normalized_scale
    }

    #[must_use]
    pub fn min_zoom(&self) -> f32 {
        self.bounds.min_scale()
    }

    #[must_use]
    pub fn max_zoom(&self) -> f32 {
        self.bounds.max_scale()
    }

    #[must_use]
    pub fn fling_behavior(&self) -> FlingBehavior {
        self.config.fling_behavior
    }

    #[must_use]
    pub fn interaction_state(&self) -> InteractionState {
        self.state
    }

    /// The transform to apply when rendering the content.
    #[must_use]
    pub fn transform(&self) -> Transform {
        self.transform
    }

    #[must_use]
    pub fn geometry(&self) -> ViewGeometry {
        self.geometry
    }

    #[must_use]
    pub fn content_size(&self) -> Option<Size> {
        self.content_size
    }

    /// Whether one-finger panning is enabled.
    #[must_use]
    pub fn allows_drag(&self) -> bool {
        self.config.allow_drag
    }

    /// Whether double-tap zoom toggling is enabled.
    #[must_use]
    pub fn allows_double_tap(&self) -> bool {
        self.config.allow_double_tap
    }

    /// Whether pinch zooming is enabled.
    #[must_use]
    pub fn allows_scaling(&self) -> bool {
        self.config.allow_scale
    }

    /// Maps a view-space point (e.g. a touch position) to content
    /// coordinates, clipped to the content bounds.
    ///
    /// Returns `None` while no content is loaded.
    #[must_use]
    pub fn content_point_from_view_point(&self, point: Point) -> Option<Point> {
        let content = self.content_size?;
        let image = self.image_size();
        if image.width <= 0.0 || image.height <= 0.0 {
            return None;
        }
        let x = (point.x - self.transform.trans_x) * content.width / image.width;
        let y = (point.y - self.transform.trans_y) * content.height / image.height;
        Some(Point::new(
            x.clamp(0.0, content.width),
            y.clamp(0.0, content.height),
        ))
    }

    /// Maps a content-space point to view coordinates. The inverse of
    /// [`content_point_from_view_point`](Self::content_point_from_view_point).
    #[must_use]
    pub fn view_point_from_content_point(&self, point: Point) -> Option<Point> {
        let content = self.content_size?;
        if content.width <= 0.0 || content.height <= 0.0 {
            return None;
        }
        let image = self.image_size();
        Some(Point::new(
            self.transform.trans_x + image.width * (point.x / content.width),
            self.transform.trans_y + image.height * (point.y / content.height),
        ))
    }

    // ======================================================================
    // Runtime configuration
    // ======================================================================

    /// Sets the minimum zoom and re-derives the lower bounce-back bound.
    pub fn set_min_zoom(&mut self, min: f32) {
        self.bounds.set_min_scale(min);
    }

    /// Sets the maximum zoom and re-derives the upper bounce-back bound.
    pub fn set_max_zoom(&mut self, max: f32) {
        self.bounds.set_max_scale(max);
    }

    /// Controls whether replacing the content keeps the current zoom.
    pub fn set_maintain_zoom_after_image_change(&mut self, maintain: bool) {
        self.config.maintain_zoom_after_image_change = maintain;
    }

    /// Registers (or clears, with `None`) the listener that receives
    /// directional fling callbacks.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::FlingBehavior`] unless the engine was configured
    /// with [`FlingBehavior::Listener`]; registering a listener that could
    /// never fire is a programming error worth surfacing immediately.
    pub fn set_fling_listener(
        &mut self,
        listener: Option<Box<dyn FlingListener>>,
    ) -> Result<()> {
        if self.config.fling_behavior != FlingBehavior::Listener {
            return Err(Error::FlingBehavior(
                "fling behaviour is not 'listener'".to_string(),
            ));
        }
        self.fling_listener = listener;
        Ok(())
    }

    // ======================================================================
    // Persistence
    // ======================================================================

    /// Captures the view state that survives a destroy-recreate cycle.
    #[must_use]
    pub fn save_view(&self) -> SavedView {
        SavedView {
            normalized_scale: self.normalized_scale,
            match_width: self.geometry.match_size.width,
            match_height: self.geometry.match_size.height,
            view_width: self.geometry.view.width,
            view_height: self.geometry.view.height,
            transform: self.transform.values(),
        }
    }

    /// Restores a previously saved view state.
    ///
    /// The saved values land in the "previous geometry" slots; the next
    /// content/view-size notification refits against them, which remaps the
    /// saved region into the new geometry exactly like a live resize.
    pub fn restore_view(&mut self, saved: &SavedView) {
        self.normalized_scale = saved.normalized_scale;
        self.prev_transform.set_values(saved.transform);
        self.geometry.prev_match = Size::new(saved.match_width, saved.match_height);
        self.geometry.prev_view = Size::new(saved.view_width, saved.view_height);
    }

    // ======================================================================
    // Internals
    // ======================================================================

    /// The displayed content size at the current zoom level.
    fn image_size(&self) -> Size {
        self.geometry.image_size(self.normalized_scale)
    }

    fn view_center(&self) -> Point {
        Point::new(self.geometry.view.width / 2.0, self.geometry.view.height / 2.0)
    }

    /// Snapshots the current transform and geometry into the "previous"
    /// slots, but only once a real fit has happened; before that the slots
    /// may hold restored state that the next fit still needs.
    fn snapshot_previous(&mut self) {
        let has_layout = self.geometry.view.width > 0.0
            && self.geometry.view.height > 0.0
            && self.geometry.match_size.width > 0.0
            && self.geometry.match_size.height > 0.0;
        if has_layout {
            self.prev_transform = self.transform;
            self.geometry.snapshot_previous();
        }
    }

    /// Refits the content into the current view. A no-op while the content
    /// or view is absent or zero-sized.
    fn fit(&mut self) {
        let Some(content) = self.content_size else {
            return;
        };
        let Some(outcome) = fit_content_to_view(
            content,
            &self.geometry,
            &self.prev_transform,
            self.normalized_scale,
            self.recenter_on_next_fit,
        ) else {
            return;
        };

        debug!(
            "fit content {}x{} into view {}x{} (zoom {})",
            content.width,
            content.height,
            self.geometry.view.width,
            self.geometry.view.height,
            outcome.normalized_scale
        );

        self.transform = outcome.transform;
        self.geometry.match_size = outcome.match_size;
        self.normalized_scale = outcome.normalized_scale;
        if outcome.normalized_scale == 1.0 {
            self.recenter_on_next_fit = false;
        }
    }

    /// Applies a multiplicative zoom delta about a focus point, clamped to
    /// the given bound tier, and fixes up the translation.
    fn apply_scale(&mut self, delta: f32, focus: Point, tier: BoundTier) {
        let (scale, effective) =
            self.bounds
                .clamp_delta(self.normalized_scale, delta, tier);
        self.normalized_scale = scale;
        self.transform.scale_about(effective, focus);
        let image_size = self.image_size();
        fix_scale_and_translation(&mut self.transform, self.geometry.view, image_size);
    }

    /// Starts a zoom animation toward `target`, anchored at the content
    /// under `focus`. Replaces any animation already in flight.
    fn start_zoom_animation(&mut self, target: f32, focus: Point, tier: BoundTier) {
        let Some(content_focus) = self.content_point_from_view_point(focus) else {
            return;
        };
        let Some(start_touch) = self.view_point_from_content_point(content_focus) else {
            return;
        };

        self.cancel_fling();
        self.zoom_animation = Some(ZoomAnimation::new(
            self.normalized_scale,
            target,
            tier,
            content_focus,
            start_touch,
            self.view_center(),
        ));
        self.set_state(InteractionState::AnimatingZoom);
    }

    fn cancel_fling(&mut self) {
        if let Some(fling) = &mut self.fling {
            fling.cancel();
        }
        self.fling = None;
    }

    fn set_state(&mut self, state: InteractionState) {
        if self.state != state {
            debug!("interaction {:?} -> {:?}", self.state, state);
            self.state = state;
        }
    }
}

impl Default for TouchEngine {
    fn default() -> Self {
        Self::new(TouchConfig::default())
    }
}

impl fmt::Debug for TouchEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TouchEngine")
            .field("state", &self.state)
            .field("normalized_scale", &self.normalized_scale)
            .field("transform", &self.transform)
            .field("geometry", &self.geometry)
            .field("content_size", &self.content_size)
            .finish_non_exhaustive()
    }
}
