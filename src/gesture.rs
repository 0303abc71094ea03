// SPDX-License-Identifier: MPL-2.0
//! Gesture vocabulary and fling classification.
//!
//! Hosts translate their toolkit's raw input into [`GestureEvent`]s and
//! feed them to the engine, which answers with a [`GestureEffect`] telling
//! the host what happened (redraw, click passthrough, animation started).

use iced_core::{Point, Vector};

use crate::config::GestureTuning;

/// A raw interaction event, in view coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    /// A pointer went down.
    PointerDown(Point),
    /// The pointer moved while down.
    PointerMove(Point),
    /// The pointer (or one finger of several) was lifted.
    PointerUp,
    /// A two-finger scale gesture began.
    PinchBegin,
    /// The scale gesture progressed by `factor` about `focus`.
    PinchUpdate { factor: f32, focus: Point },
    /// The scale gesture ended.
    PinchEnd,
    /// A single tap was confirmed (not part of a double tap).
    Tap,
    /// A long press was detected.
    LongPress,
    /// A double tap at the given position.
    DoubleTap(Point),
    /// A fling gesture from `start` to `end` with the given release
    /// velocity in pixels per second.
    Fling {
        start: Point,
        end: Point,
        velocity: Vector,
    },
}

/// What the engine did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureEffect {
    /// Nothing to do.
    None,
    /// The display transform changed; the host should redraw.
    TransformChanged,
    /// An animation task started; the host should begin driving
    /// [`tick`](crate::TouchEngine::tick) until it settles.
    AnimationStarted,
    /// Pass a click through to the host's own handling.
    Click,
    /// Pass a long click through to the host's own handling.
    LongClick,
    /// A listener-mode fling was forwarded; `consumed` is the listener's
    /// return value.
    FlingForwarded { consumed: bool },
}

/// The engine's interaction state. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Dragging,
    Pinching,
    Flinging,
    AnimatingZoom,
}

/// Direction of a classified listener-mode fling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlingDirection {
    Left,
    Right,
    Up,
    Down,
}

/// Receives directional fling notifications in listener mode.
///
/// Each callback returns whether the event was consumed.
pub trait FlingListener {
    fn on_fling_right(&mut self, distance: f32, velocity: f32) -> bool;
    fn on_fling_left(&mut self, distance: f32, velocity: f32) -> bool;
    fn on_fling_up(&mut self, distance: f32, velocity: f32) -> bool;
    fn on_fling_down(&mut self, distance: f32, velocity: f32) -> bool;
}

/// A fling reduced to its dominant axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifiedFling {
    pub direction: FlingDirection,
    pub distance: f32,
    pub velocity: f32,
}

/// Classifies a fling by dominant axis and sign.
///
/// Travel below the paging touch slop and velocities outside the
/// fling-velocity window are zeroed; a fling with no surviving dominant
/// axis produces no event.
#[must_use]
pub fn classify_fling(
    tuning: &GestureTuning,
    start: Point,
    end: Point,
    velocity: Vector,
) -> Option<ClassifiedFling> {
    let diff_x = zero_if_touch_slop(tuning, end.x - start.x);
    let diff_y = zero_if_touch_slop(tuning, end.y - start.y);
    let speed_x = zero_if_not_fling_speed(tuning, velocity.x.abs());
    let speed_y = zero_if_not_fling_speed(tuning, velocity.y.abs());

    if diff_x != 0.0 && speed_x != 0.0 && diff_x.abs() > diff_y.abs() {
        let direction = if diff_x > 0.0 {
            FlingDirection::Right
        } else {
            FlingDirection::Left
        };
        return Some(ClassifiedFling {
            direction,
            distance: diff_x.abs(),
            velocity: speed_x,
        });
    }

    if diff_y != 0.0 && speed_y != 0.0 && diff_y.abs() > diff_x.abs() {
        let direction = if diff_y > 0.0 {
            FlingDirection::Down
        } else {
            FlingDirection::Up
        };
        return Some(ClassifiedFling {
            direction,
            distance: diff_y.abs(),
            velocity: speed_y,
        });
    }

    None
}

fn zero_if_touch_slop(tuning: &GestureTuning, value: f32) -> f32 {
    if value.abs() > tuning.paging_touch_slop {
        value
    } else {
        0.0
    }
}

fn zero_if_not_fling_speed(tuning: &GestureTuning, speed: f32) -> f32 {
    if speed >= tuning.min_fling_velocity && speed <= tuning.max_fling_velocity {
        speed
    } else {
        0.0
    }
}
