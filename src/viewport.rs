// SPDX-License-Identifier: MPL-2.0
//! Viewport geometry and content fitting.
//!
//! Tracks the current and previous view/fit dimensions and computes how the
//! transform maps content into the view: the initial aspect-preserving fit,
//! and the continuity-preserving remap that keeps the same content region
//! visible when the view is resized or rotated while zoomed in.

use iced_core::{Size, Vector};

use crate::transform::Transform;

/// How a host resolves a view extent from the space offered to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureMode {
    /// The host dictates the exact extent.
    Exactly,
    /// The view may be at most this large; shrink to the content if smaller.
    AtMost,
    /// No constraint; use the content extent.
    Unspecified,
}

/// Resolves one view extent from a measure mode, the offered extent, and
/// the content extent.
#[must_use]
pub fn resolve_view_extent(mode: MeasureMode, offered: f32, content: f32) -> f32 {
    match mode {
        MeasureMode::Exactly => offered,
        MeasureMode::AtMost => content.min(offered),
        MeasureMode::Unspecified => content,
    }
}

/// Current and previous view and fit dimensions.
///
/// The `prev_*` fields are snapshotted immediately before every mutation
/// (view resize or content change), which is what lets the fitter
/// interpolate the old geometry into the new one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewGeometry {
    /// Current view size.
    pub view: Size,
    /// View size before the last change.
    pub prev_view: Size,
    /// Content size when scaled to exactly fit the view.
    pub match_size: Size,
    /// Fit size before the last change.
    pub prev_match: Size,
}

impl Default for ViewGeometry {
    fn default() -> Self {
        Self {
            view: Size::new(0.0, 0.0),
            prev_view: Size::new(0.0, 0.0),
            match_size: Size::new(0.0, 0.0),
            prev_match: Size::new(0.0, 0.0),
        }
    }
}

impl ViewGeometry {
    /// Copies the current dimensions into the `prev_*` fields. Call right
    /// before overwriting them.
    pub(crate) fn snapshot_previous(&mut self) {
        self.prev_view = self.view;
        self.prev_match = self.match_size;
    }

    /// The displayed content size at a normalized zoom level.
    #[must_use]
    pub fn image_size(&self, normalized_scale: f32) -> Size {
        Size::new(
            self.match_size.width * normalized_scale,
            self.match_size.height * normalized_scale,
        )
    }
}

/// The result of fitting content into the view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct FitOutcome {
    pub transform: Transform,
    pub match_size: Size,
    pub normalized_scale: f32,
}

/// Fits `content` into the current view.
///
/// At a normalized scale of 1 (or when a recenter was requested by a content
/// change) the content is stretched to fit and centered. Otherwise the
/// user's zoom level is preserved and each translation axis is remapped so
/// the previously visible content region stays visually anchored.
///
/// Returns `None` when the content or view is degenerate (absent or
/// zero-sized); callers treat that as a no-op.
pub(crate) fn fit_content_to_view(
    content: Size,
    geometry: &ViewGeometry,
    prev_transform: &Transform,
    normalized_scale: f32,
    recenter: bool,
) -> Option<FitOutcome> {
    let view = geometry.view;
    if content.width <= 0.0 || content.height <= 0.0 || view.width <= 0.0 || view.height <= 0.0 {
        return None;
    }

    let scale = (view.width / content.width).min(view.height / content.height);
    let match_size = Size::new(content.width * scale, content.height * scale);

    if normalized_scale == 1.0 || recenter {
        // Stretch to fit and center.
        let offset = Vector::new(
            (view.width - match_size.width) / 2.0,
            (view.height - match_size.height) / 2.0,
        );
        return Some(FitOutcome {
            transform: Transform::scaled(scale, offset),
            match_size,
            normalized_scale: 1.0,
        });
    }

    // The view changed while zoomed in: keep the zoom level and remap each
    // translation axis so the same content region stays anchored.
    let scale_x = match_size.width * normalized_scale / content.width;
    let scale_y = match_size.height * normalized_scale / content.height;

    let transform = Transform {
        scale_x,
        scale_y,
        trans_x: translate_after_resize(
            prev_transform.trans_x,
            geometry.prev_match.width * normalized_scale,
            match_size.width * normalized_scale,
            geometry.prev_view.width,
            view.width,
            content.width,
            scale_x,
        ),
        trans_y: translate_after_resize(
            prev_transform.trans_y,
            geometry.prev_match.height * normalized_scale,
            match_size.height * normalized_scale,
            geometry.prev_view.height,
            view.height,
            content.height,
            scale_y,
        ),
    };

    Some(FitOutcome {
        transform,
        match_size,
        normalized_scale,
    })
}

/// Remaps one translation axis across a view-size change.
///
/// Finds the content region that was previously centered in the view and
/// adjusts the translation so it is centered again afterwards.
fn translate_after_resize(
    prev_trans: f32,
    prev_image_size: f32,
    image_size: f32,
    prev_view_size: f32,
    view_size: f32,
    content_size: f32,
    scale_axis: f32,
) -> f32 {
    if image_size < view_size {
        // The content is smaller than the view on this axis. Center it.
        (view_size - content_size * scale_axis) * 0.5
    } else if prev_trans > 0.0 {
        // The content overflows now but did not before. Center it.
        -((image_size - view_size) * 0.5)
    } else {
        // Keep the fraction of the content that sat at the view center at
        // the view center of the new geometry.
        let percentage = (prev_trans.abs() + 0.5 * prev_view_size) / prev_image_size;
        -(percentage * image_size - view_size * 0.5)
    }
}
