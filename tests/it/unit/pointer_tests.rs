//! Unit tests for pointer, touch and modifier normalization.

use gridboard::input::{KeyCode, KeyEvent, KeyState, MouseButton, PointerEvent, PointerNormalizer, TouchGesture};
use gridboard::Point;

#[test]
fn test_pinch_reports_relative_scale_and_pan() {
    let mut input = PointerNormalizer::default();
    let start = input.handle_touch_start(&[Point::new(400.0, 400.0), Point::new(600.0, 400.0)]);
    assert_eq!(start, vec![TouchGesture::PinchStart { center: Point::new(500.0, 400.0) }]);
    assert!(start[0].prevents_default());

    let moved = input.handle_touch_move(&[Point::new(350.0, 420.0), Point::new(650.0, 420.0)]);
    assert_eq!(
        moved,
        vec![TouchGesture::Pinch {
            center: Point::new(500.0, 420.0),
            scale: 1.5,
            pan: Point::new(0.0, 20.0),
        }]
    );

    // the next move is relative to the previous one
    let moved = input.handle_touch_move(&[Point::new(350.0, 420.0), Point::new(650.0, 420.0)]);
    assert_eq!(
        moved,
        vec![TouchGesture::Pinch {
            center: Point::new(500.0, 420.0),
            scale: 1.0,
            pan: Point::ZERO,
        }]
    );
}

#[test]
fn test_lifting_one_finger_ends_pinch() {
    let mut input = PointerNormalizer::default();
    input.handle_touch_start(&[Point::new(0.0, 0.0), Point::new(100.0, 0.0)]);
    let ended = input.handle_touch_end(&[Point::new(100.0, 0.0)]);
    assert_eq!(ended, vec![TouchGesture::PinchEnd]);
    assert!(!input.touch_state().is_pinching);
    assert_eq!(input.touch_state().start_touches, None);

    // the remaining finger does not start pointer moves
    assert!(input.handle_touch_move(&[Point::new(120.0, 0.0)]).is_empty());
}

#[test]
fn test_single_finger_acts_as_pointer() {
    let mut input = PointerNormalizer::new(5.0);
    assert_eq!(
        input.handle_touch_start(&[Point::new(10.0, 10.0)]),
        vec![TouchGesture::PointerDown(Point::new(10.0, 10.0))]
    );
    assert_eq!(
        input.handle_touch_move(&[Point::new(30.0, 10.0)]),
        vec![TouchGesture::PointerMove(Point::new(30.0, 10.0))]
    );
    assert!(input.has_moved_beyond_threshold());
    assert_eq!(
        input.handle_touch_end(&[]),
        vec![TouchGesture::PointerUp(Point::new(30.0, 10.0))]
    );
    assert!(!input.pointer_state().is_down);
}

#[test]
fn test_pointer_moves_ignored_while_up() {
    let mut input = PointerNormalizer::default();
    input.handle_pointer_move(Point::new(50.0, 50.0));
    assert_eq!(input.pointer_state().current, Point::ZERO);
}

#[test]
fn test_modifiers_are_tracked() {
    let mut input = PointerNormalizer::default();
    input.handle_key_down(&KeyEvent::new(KeyCode::MetaLeft));
    input.handle_key_down(&KeyEvent::new(KeyCode::ShiftRight));
    let keys = input.key_state();
    assert!(keys.meta && keys.shift && keys.command());
    assert!(!keys.ctrl && !keys.alt && !keys.space);

    input.handle_key_up(&KeyEvent::new(KeyCode::MetaLeft));
    assert!(!input.key_state().command());
}

#[test]
fn test_repeated_space_does_not_latch_again() {
    let mut input = PointerNormalizer::default();
    input.handle_key_down(&KeyEvent::repeated(KeyCode::Space));
    assert!(!input.key_state().space);

    input.handle_key_down(&KeyEvent::new(KeyCode::Space));
    input.handle_key_down(&KeyEvent::repeated(KeyCode::Space));
    assert!(input.key_state().space);
}

#[test]
fn test_blur_releases_everything() {
    let mut input = PointerNormalizer::default();
    for code in [KeyCode::Space, KeyCode::AltLeft, KeyCode::ControlRight] {
        input.handle_key_down(&KeyEvent::new(code));
    }
    input.handle_blur();
    assert_eq!(input.key_state(), KeyState::default());
}

#[test]
fn test_should_pan_sources() {
    let mut input = PointerNormalizer::default();
    let primary = PointerEvent::at(0.0, 0.0);
    assert!(!input.should_pan(Some(&primary)));
    assert!(!input.should_pan(None));

    assert!(input.should_pan(Some(&primary.with_button(MouseButton::Middle))));
    assert!(input.should_pan(Some(&primary.with_alt())));

    input.handle_key_down(&KeyEvent::new(KeyCode::AltRight));
    assert!(input.should_pan(Some(&primary)));
    input.handle_key_up(&KeyEvent::new(KeyCode::AltRight));

    input.handle_key_down(&KeyEvent::new(KeyCode::Space));
    assert!(input.should_pan(None));
}

#[test]
fn test_button_codes() {
    assert_eq!(MouseButton::from_code(0), Some(MouseButton::Primary));
    assert_eq!(MouseButton::from_code(1), Some(MouseButton::Middle));
    assert_eq!(MouseButton::from_code(2), Some(MouseButton::Secondary));
    assert_eq!(MouseButton::from_code(3), None);
}
