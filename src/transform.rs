// SPDX-License-Identifier: MPL-2.0
//! The display transform.
//!
//! A [`Transform`] is the explicit value that maps content coordinates onto
//! view coordinates: a uniform scale followed by a translation. It is owned
//! by a single engine instance and only ever handed around by value, so
//! there is no hidden aliasing between the "current" and "previous"
//! snapshots.

use iced_core::{Point, Vector};

/// Uniform scale plus translation, mapping content space into view space.
///
/// `scale_x` and `scale_y` are kept equal at all times; both are stored so
/// the four live components round-trip through persistence unchanged. The
/// skew and perspective terms of the notional 3×3 matrix are identity and
/// are not represented.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub scale_x: f32,
    pub scale_y: f32,
    pub trans_x: f32,
    pub trans_y: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        scale_x: 1.0,
        scale_y: 1.0,
        trans_x: 0.0,
        trans_y: 0.0,
    };

    /// A transform that scales by `scale` and then translates by `offset`.
    pub fn scaled(scale: f32, offset: Vector) -> Self {
        Self {
            scale_x: scale,
            scale_y: scale,
            trans_x: offset.x,
            trans_y: offset.y,
        }
    }

    /// Multiplies both scale axes by `delta`, keeping the view-space point
    /// `focus` fixed: content that was under the focus point before the
    /// scale change is still under it afterwards.
    pub fn scale_about(&mut self, delta: f32, focus: Point) {
        self.scale_x *= delta;
        self.scale_y *= delta;
        self.trans_x = focus.x + (self.trans_x - focus.x) * delta;
        self.trans_y = focus.y + (self.trans_y - focus.y) * delta;
    }

    /// Adds `delta` to the translation components.
    pub fn translate(&mut self, delta: Vector) {
        self.trans_x += delta.x;
        self.trans_y += delta.y;
    }

    /// The four live components, in `[scale_x, scale_y, trans_x, trans_y]`
    /// order, for persistence.
    #[must_use]
    pub fn values(&self) -> [f32; 4] {
        [self.scale_x, self.scale_y, self.trans_x, self.trans_y]
    }

    /// Restores the four live components from [`values`](Self::values).
    pub fn set_values(&mut self, values: [f32; 4]) {
        self.scale_x = values[0];
        self.scale_y = values[1];
        self.trans_x = values[2];
        self.trans_y = values[3];
    }

    /// Maps a content-space point to view space.
    #[must_use]
    pub fn apply(&self, point: Point) -> Point {
        Point::new(
            point.x * self.scale_x + self.trans_x,
            point.y * self.scale_y + self.trans_y,
        )
    }

    /// Maps a view-space point back to content space.
    ///
    /// The inverse of [`apply`](Self::apply); the scale components must be
    /// non-zero.
    #[must_use]
    pub fn unapply(&self, point: Point) -> Point {
        Point::new(
            (point.x - self.trans_x) / self.scale_x,
            (point.y - self.trans_y) / self.scale_y,
        )
    }
}
