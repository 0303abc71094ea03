// SPDX-License-Identifier: MPL-2.0
//! `touch_lens` is a toolkit-agnostic transform engine for zoomable image
//! views: pinch-to-zoom, panning, fling scrolling, and double-tap zoom,
//! with boundary enforcement and bounce-back behavior.
//!
//! The crate contains no rendering or event-dispatch machinery. A thin
//! platform wrapper owns a [`TouchEngine`], forwards its toolkit's raw
//! input as [`GestureEvent`]s, notifies it of view and content size
//! changes, drives animations from the frame clock via
//! [`TouchEngine::tick`], and applies [`TouchEngine::transform`] when
//! drawing the content.
//!
//! ```
//! use iced_core::{Point, Size};
//! use touch_lens::{GestureEvent, TouchEngine};
//!
//! let mut engine = TouchEngine::default();
//! engine.set_view_size(Size::new(1000.0, 1000.0));
//! engine.set_content_size(Some(Size::new(2000.0, 1000.0)));
//!
//! engine.handle(GestureEvent::PinchBegin);
//! engine.handle(GestureEvent::PinchUpdate {
//!     factor: 2.0,
//!     focus: Point::new(500.0, 500.0),
//! });
//! engine.handle(GestureEvent::PinchEnd);
//!
//! assert_eq!(engine.current_zoom(), 2.0);
//! ```

pub mod bounds;
pub mod config;
pub mod engine;
pub mod error;
pub mod gesture;
pub mod persisted_state;
pub mod transform;
pub mod viewport;
pub mod zoom;

#[cfg(test)]
pub mod test_utils;

pub use config::{FlingBehavior, GestureTuning, TouchConfig};
pub use engine::{TickOutcome, TouchEngine};
pub use error::{Error, Result};
pub use gesture::{
    FlingDirection, FlingListener, GestureEffect, GestureEvent, InteractionState,
};
pub use persisted_state::SavedView;
pub use transform::Transform;
pub use viewport::{MeasureMode, ViewGeometry};
pub use zoom::{BoundTier, ZoomBounds};
