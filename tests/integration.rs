// SPDX-License-Identifier: MPL-2.0
//! End-to-end scenarios exercised through the public API, the way a
//! platform wrapper would drive the engine.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use approx::assert_abs_diff_eq;
use iced_core::{Point, Size, Vector};
use touch_lens::{
    FlingBehavior, FlingListener, GestureEffect, GestureEvent, InteractionState, SavedView,
    TickOutcome, TouchConfig, TouchEngine,
};

/// Drives the active animation to completion with a synthetic clock.
fn run_animation(engine: &mut TouchEngine) {
    let epoch = Instant::now();
    engine.tick(epoch);
    let mut now = epoch;
    for _ in 0..1000 {
        now += Duration::from_millis(16);
        if engine.tick(now) != TickOutcome::Running {
            break;
        }
    }
    assert!(!engine.needs_animation(), "animation did not settle");
}

#[test]
fn wide_image_scenario_fit_then_pinch() {
    // A 2000x1000 image in a 1000x1000 view: the fit scale is 0.5, the
    // image fills the width and centers vertically at (0, 250).
    let mut engine = TouchEngine::default();
    engine.set_view_size(Size::new(1000.0, 1000.0));
    engine.set_content_size(Some(Size::new(2000.0, 1000.0)));

    assert_eq!(engine.current_zoom(), 1.0);
    assert_eq!(engine.transform().scale_x, 0.5);
    assert_eq!(engine.transform().trans_x, 0.0);
    assert_eq!(engine.transform().trans_y, 250.0);

    // Pinch x2 about the view center: zoom 2, matrix scale 1.0, and the
    // content point under the focus stays put.
    let focus = Point::new(500.0, 500.0);
    let before = engine.content_point_from_view_point(focus).unwrap();

    engine.handle(GestureEvent::PinchBegin);
    engine.handle(GestureEvent::PinchUpdate { factor: 2.0, focus });
    engine.handle(GestureEvent::PinchEnd);

    assert_eq!(engine.current_zoom(), 2.0);
    assert_eq!(engine.transform().scale_x, 1.0);
    let after = engine.content_point_from_view_point(focus).unwrap();
    assert_abs_diff_eq!(after.x, before.x, epsilon = 1e-3);
    assert_abs_diff_eq!(after.y, before.y, epsilon = 1e-3);
}

#[test]
fn rotation_keeps_the_centered_pixel_centered() {
    let mut engine = TouchEngine::default();
    engine.set_view_size(Size::new(1000.0, 1000.0));
    engine.set_content_size(Some(Size::new(2000.0, 1000.0)));

    engine.handle(GestureEvent::PinchBegin);
    engine.handle(GestureEvent::PinchUpdate {
        factor: 2.0,
        focus: Point::new(500.0, 500.0),
    });
    engine.handle(GestureEvent::PinchEnd);

    // The content pixel at the view center before the rotation...
    let anchored = engine
        .content_point_from_view_point(Point::new(500.0, 500.0))
        .unwrap();

    // ...is still at the view center after a portrait-flip resize.
    engine.set_view_size(Size::new(500.0, 800.0));
    let projected = engine.view_point_from_content_point(anchored).unwrap();
    assert_abs_diff_eq!(projected.x, 250.0, epsilon = 1.0);
    assert_abs_diff_eq!(projected.y, 400.0, epsilon = 1.0);
    assert_eq!(engine.current_zoom(), 2.0);
}

#[test]
fn double_tap_round_trip_ends_exactly_on_the_bounds() {
    let mut engine = TouchEngine::default();
    engine.set_view_size(Size::new(1000.0, 1000.0));
    engine.set_content_size(Some(Size::new(2000.0, 1000.0)));

    let tap = Point::new(700.0, 400.0);
    assert_eq!(
        engine.handle(GestureEvent::DoubleTap(tap)),
        GestureEffect::AnimationStarted
    );
    run_animation(&mut engine);
    assert_eq!(engine.current_zoom(), engine.max_zoom());
    assert_eq!(engine.interaction_state(), InteractionState::Idle);

    engine.handle(GestureEvent::DoubleTap(tap));
    run_animation(&mut engine);
    assert_eq!(engine.current_zoom(), engine.min_zoom());
}

#[test]
fn overstretched_pinch_bounces_back() {
    let mut engine = TouchEngine::default();
    engine.set_view_size(Size::new(1000.0, 1000.0));
    engine.set_content_size(Some(Size::new(2000.0, 1000.0)));

    engine.handle(GestureEvent::PinchBegin);
    engine.handle(GestureEvent::PinchUpdate {
        factor: 50.0,
        focus: Point::new(500.0, 500.0),
    });
    // Live pinch may overshoot the hard maximum...
    assert!(engine.current_zoom() > engine.max_zoom());

    // ...but the release snaps back to it.
    assert_eq!(
        engine.handle(GestureEvent::PinchEnd),
        GestureEffect::AnimationStarted
    );
    run_animation(&mut engine);
    assert_eq!(engine.current_zoom(), engine.max_zoom());
}

#[test]
fn fling_scrolls_within_bounds_and_settles() {
    let mut engine = TouchEngine::default();
    engine.set_view_size(Size::new(1000.0, 1000.0));
    engine.set_content_size(Some(Size::new(2000.0, 1000.0)));

    engine.handle(GestureEvent::PinchBegin);
    engine.handle(GestureEvent::PinchUpdate {
        factor: 2.0,
        focus: Point::new(500.0, 500.0),
    });
    engine.handle(GestureEvent::PinchEnd);

    // Pan to the far left edge, then fling back to the right.
    engine.handle(GestureEvent::PointerDown(Point::new(900.0, 500.0)));
    engine.handle(GestureEvent::PointerMove(Point::new(100.0, 500.0)));
    engine.handle(GestureEvent::PointerUp);
    assert_eq!(engine.transform().trans_x, -1000.0);

    let effect = engine.handle(GestureEvent::Fling {
        start: Point::new(100.0, 500.0),
        end: Point::new(700.0, 500.0),
        velocity: Vector::new(2000.0, 0.0),
    });
    assert_eq!(effect, GestureEffect::AnimationStarted);

    run_animation(&mut engine);
    assert_eq!(engine.interaction_state(), InteractionState::Idle);
    // Moved right, but never past the legal extent.
    assert!(engine.transform().trans_x > -1000.0);
    assert!(engine.transform().trans_x <= 0.0);
    // Vertical axis cannot move: the image exactly fits it.
    assert_eq!(engine.transform().trans_y, 0.0);
}

struct DirectionLog {
    calls: Rc<RefCell<Vec<(&'static str, f32, f32)>>>,
}

impl FlingListener for DirectionLog {
    fn on_fling_right(&mut self, distance: f32, velocity: f32) -> bool {
        self.calls.borrow_mut().push(("right", distance, velocity));
        true
    }
    fn on_fling_left(&mut self, distance: f32, velocity: f32) -> bool {
        self.calls.borrow_mut().push(("left", distance, velocity));
        true
    }
    fn on_fling_up(&mut self, distance: f32, velocity: f32) -> bool {
        self.calls.borrow_mut().push(("up", distance, velocity));
        true
    }
    fn on_fling_down(&mut self, distance: f32, velocity: f32) -> bool {
        self.calls.borrow_mut().push(("down", distance, velocity));
        true
    }
}

#[test]
fn listener_mode_dispatches_only_the_dominant_direction() {
    let mut engine = TouchEngine::new(TouchConfig {
        fling_behavior: FlingBehavior::Listener,
        ..TouchConfig::default()
    });
    engine.set_view_size(Size::new(1000.0, 1000.0));
    engine.set_content_size(Some(Size::new(2000.0, 1000.0)));

    let calls = Rc::new(RefCell::new(Vec::new()));
    engine
        .set_fling_listener(Some(Box::new(DirectionLog {
            calls: calls.clone(),
        })))
        .expect("listener mode accepts a listener");

    // diffX = 150 (above slop), diffY = 10 (below), speedX = 800 within
    // the velocity window: exactly one call, to the right.
    let effect = engine.handle(GestureEvent::Fling {
        start: Point::new(100.0, 100.0),
        end: Point::new(250.0, 110.0),
        velocity: Vector::new(800.0, 5.0),
    });
    assert_eq!(effect, GestureEffect::FlingForwarded { consumed: true });

    let calls = calls.borrow();
    assert_eq!(calls.as_slice(), &[("right", 150.0, 800.0)]);
}

#[test]
fn listener_registration_outside_listener_mode_is_an_error() {
    let mut engine = TouchEngine::default();
    let calls = Rc::new(RefCell::new(Vec::new()));
    assert!(engine
        .set_fling_listener(Some(Box::new(DirectionLog { calls })))
        .is_err());
}

#[test]
fn saved_view_survives_an_opaque_byte_round_trip() {
    let mut engine = TouchEngine::default();
    engine.set_view_size(Size::new(1000.0, 1000.0));
    engine.set_content_size(Some(Size::new(2000.0, 1000.0)));
    engine.handle(GestureEvent::PinchBegin);
    engine.handle(GestureEvent::PinchUpdate {
        factor: 2.0,
        focus: Point::new(500.0, 500.0),
    });
    engine.handle(GestureEvent::PinchEnd);

    let bytes = engine.save_view().to_bytes().expect("encode");
    let saved = SavedView::from_bytes(&bytes).expect("decode");

    // Recreate the widget, as after a device rotation, with a new size.
    let mut recreated = TouchEngine::default();
    recreated.restore_view(&saved);
    recreated.set_content_size(Some(Size::new(2000.0, 1000.0)));
    recreated.set_view_size(Size::new(500.0, 800.0));

    assert_eq!(recreated.current_zoom(), 2.0);
    // The content pixel that was centered is centered again.
    let projected = recreated
        .view_point_from_content_point(Point::new(1000.0, 500.0))
        .unwrap();
    assert_abs_diff_eq!(projected.x, 250.0, epsilon = 1.0);
    assert_abs_diff_eq!(projected.y, 400.0, epsilon = 1.0);
}

#[test]
fn config_from_toml_drives_the_engine() {
    let config: TouchConfig = toml::from_str(
        r#"
            min_scale = 1.0
            max_scale = 4.0
            allow_double_tap = false
            fling_behavior = "disabled"
        "#,
    )
    .expect("parse config");

    let mut engine = TouchEngine::new(config);
    engine.set_view_size(Size::new(1000.0, 1000.0));
    engine.set_content_size(Some(Size::new(2000.0, 1000.0)));

    assert_eq!(engine.max_zoom(), 4.0);
    assert!(!engine.allows_double_tap());
    assert_eq!(engine.fling_behavior(), FlingBehavior::Disabled);
    assert_eq!(
        engine.handle(GestureEvent::DoubleTap(Point::new(500.0, 500.0))),
        GestureEffect::None
    );
    assert_eq!(
        engine.handle(GestureEvent::Fling {
            start: Point::new(100.0, 100.0),
            end: Point::new(400.0, 100.0),
            velocity: Vector::new(900.0, 0.0),
        }),
        GestureEffect::None
    );
}
