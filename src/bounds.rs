// SPDX-License-Identifier: MPL-2.0
//! Translation boundary enforcement.
//!
//! Content smaller than the view is kept centered; content larger than the
//! view must cover it without exposing empty margins. Corrections are
//! minimal deltas applied as post-translates, so they compose with whatever
//! transform change produced the violation in the same frame.

use iced_core::{Size, Vector};

use crate::transform::Transform;

/// The correction needed to bring a translation back into its legal range,
/// or `0.0` if it is already legal.
///
/// When the content fits the view on an axis the legal range is
/// `[0, view - content]`; when it overflows, `[view - content, 0]`.
pub(crate) fn translation_correction(trans: f32, view: f32, content: f32) -> f32 {
    let (min_trans, max_trans) = if content <= view {
        (0.0, view - content)
    } else {
        (view - content, 0.0)
    };

    if trans < min_trans {
        min_trans - trans
    } else if trans > max_trans {
        max_trans - trans
    } else {
        0.0
    }
}

/// Filters a drag delta: panning is only possible on an axis where the
/// content overflows the view.
pub(crate) fn drag_delta(delta: f32, view: f32, content: f32) -> f32 {
    if content <= view {
        0.0
    } else {
        delta
    }
}

/// Post-translates `transform` by the minimal delta that brings both axes
/// back into their legal ranges. Returns whether anything changed.
pub(crate) fn fix_translation(transform: &mut Transform, view: Size, content: Size) -> bool {
    let fix_x = translation_correction(transform.trans_x, view.width, content.width);
    let fix_y = translation_correction(transform.trans_y, view.height, content.height);

    if fix_x != 0.0 || fix_y != 0.0 {
        transform.translate(Vector::new(fix_x, fix_y));
        true
    } else {
        false
    }
}

/// Like [`fix_translation`], but additionally force-centers any axis whose
/// content is smaller than the view. Rapid focus-point scaling can leave
/// small content off-center; the plain range check alone does not catch
/// that, because every position inside the slack is legal.
pub(crate) fn fix_scale_and_translation(transform: &mut Transform, view: Size, content: Size) {
    fix_translation(transform, view, content);

    if content.width < view.width {
        transform.trans_x = (view.width - content.width) / 2.0;
    }
    if content.height < view.height {
        transform.trans_y = (view.height - content.height) / 2.0;
    }
}
