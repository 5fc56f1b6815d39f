//! Collection edits and the undo/redo ledger through the canvas.

use crate::helpers::*;
use gridboard::history::ActionKind;
use gridboard::input::{InputEvent, InteractionState, KeyCode};
use gridboard::types::is_contiguous_permutation;
use gridboard::{CanvasError, Point};

#[test]
fn test_undo_redo_reorder() {
    let mut canvas = canvas_with_items(8);
    drag_item(&mut canvas, 2, 5);

    assert!(canvas.undo());
    assert_eq!(indices_by_id(&canvas), (0..8).collect::<Vec<_>>());
    assert!(canvas.can_redo());

    assert!(canvas.redo());
    assert_eq!(indices_by_id(&canvas), vec![0, 1, 5, 2, 3, 4, 6, 7]);
    assert!(!canvas.redo());
}

#[test]
fn test_undo_is_refused_mid_drag() {
    let mut canvas = canvas_with_items(4);
    drag_item(&mut canvas, 0, 1);
    let before = indices_by_id(&canvas);

    play(&mut canvas, &[down(30.0, 30.0), move_to(250.0, 30.0), InputEvent::Undo]);
    assert_eq!(canvas.interaction_state(), InteractionState::DraggingImage);
    assert_eq!(indices_by_id(&canvas), before);
    assert!(canvas.can_undo());

    canvas.dispatch(&up(250.0, 30.0));
    assert_eq!(canvas.history().len(), 2);
}

#[test]
fn test_undo_is_refused_on_pending_press() {
    let mut canvas = canvas_with_items(4);
    drag_item(&mut canvas, 0, 1);
    canvas.dispatch(&down(30.0, 30.0));
    assert!(canvas.is_busy());
    assert!(!canvas.undo());

    canvas.dispatch(&up(30.0, 30.0));
    assert!(canvas.undo());
}

#[test]
fn test_keyboard_shortcuts() {
    let mut canvas = canvas_with_items(4);
    drag_item(&mut canvas, 0, 3);
    let dragged = indices_by_id(&canvas);

    play(&mut canvas, &[key_down(KeyCode::MetaLeft), key_down(KeyCode::KeyZ)]);
    assert_eq!(indices_by_id(&canvas), vec![0, 1, 2, 3]);

    play(&mut canvas, &[key_down(KeyCode::ShiftLeft), key_down(KeyCode::KeyZ)]);
    assert_eq!(indices_by_id(&canvas), dragged);

    play(&mut canvas, &[key_up(KeyCode::ShiftLeft), key_up(KeyCode::MetaLeft)]);
    // a bare Z does nothing
    canvas.dispatch(&key_down(KeyCode::KeyZ));
    assert_eq!(indices_by_id(&canvas), dragged);

    play(
        &mut canvas,
        &[key_down(KeyCode::ControlLeft), key_down(KeyCode::KeyZ), key_down(KeyCode::KeyY)],
    );
    assert_eq!(indices_by_id(&canvas), dragged);
}

#[test]
fn test_add_and_remove_are_undoable() {
    let mut canvas = canvas_with_items(3);
    let added = canvas.add_item(50.0, 60.0).unwrap();
    assert_eq!(added, 3);
    assert_eq!(ids_by_index(&canvas), vec![0, 1, 2, 3]);

    let removed = canvas.remove_item(1).unwrap();
    assert_eq!(removed.index, 1);
    assert_eq!(ids_by_index(&canvas), vec![0, 2, 3]);
    assert!(is_contiguous_permutation(canvas.items()));

    assert_eq!(
        canvas.history().kinds().collect::<Vec<_>>(),
        vec![ActionKind::Add, ActionKind::Remove]
    );

    canvas.undo();
    assert_eq!(ids_by_index(&canvas), vec![0, 1, 2, 3]);
    canvas.undo();
    assert_eq!(ids_by_index(&canvas), vec![0, 1, 2]);

    canvas.redo();
    canvas.redo();
    assert_eq!(ids_by_index(&canvas), vec![0, 2, 3]);
    assert!(is_contiguous_permutation(canvas.items()));
}

#[test]
fn test_add_rejects_degenerate_sizes() {
    let mut canvas = canvas_with_items(2);
    assert!(matches!(canvas.add_item(0.0, -5.0), Err(CanvasError::Other(_))));
    assert!(canvas.add_item_at(0, 100.0, 0.0).is_err());
    assert!(canvas.add_item(f64::INFINITY, 100.0).is_err());
    assert!(canvas.add_item(100.0, f64::NAN).is_err());

    assert_eq!(ids_by_index(&canvas), vec![0, 1]);
    assert!(canvas.history().is_empty());
    // a rejected add does not burn an id
    assert_eq!(canvas.add_item(100.0, 100.0).unwrap(), 2);
}

#[test]
fn test_add_item_at_shifts_later_items() {
    let mut canvas = canvas_with_items(3);
    let id = canvas.add_item_at(1, 100.0, 100.0).unwrap();
    assert_eq!(ids_by_index(&canvas), vec![0, id, 1, 2]);

    canvas.undo();
    assert_eq!(ids_by_index(&canvas), vec![0, 1, 2]);
}

#[test]
fn test_remove_missing_item() {
    let mut canvas = canvas_with_items(2);
    assert!(canvas.remove_item(42).is_none());
    assert!(canvas.history().is_empty());
}

#[test]
fn test_remove_dragged_item_cancels_gesture() {
    let mut canvas = canvas_with_items(4);
    play(&mut canvas, &[down(30.0, 30.0), move_to(250.0, 30.0)]);
    assert_eq!(canvas.interaction_state(), InteractionState::DraggingImage);

    canvas.remove_item(0);
    assert_eq!(canvas.interaction_state(), InteractionState::Idle);
    assert_eq!(canvas.selected_id(), None);
    assert_eq!(ids_by_index(&canvas), vec![1, 2, 3]);

    canvas.dispatch(&up(250.0, 30.0));
    assert_eq!(ids_by_index(&canvas), vec![1, 2, 3]);
}

#[test]
fn test_undo_clears_selection_of_vanished_item() {
    let mut canvas = canvas_with_items(3);
    canvas.add_item(100.0, 100.0).unwrap();
    // the new item sits in cell 3
    play(&mut canvas, &[down(360.0, 30.0), up(360.0, 30.0)]);
    assert_eq!(canvas.selected_id(), Some(3));

    canvas.undo();
    assert_eq!(canvas.selected_id(), None);
    // hit testing follows the undo: cell 3 is empty again
    assert_eq!(canvas.item_at(Point::new(360.0, 30.0)), None);
}

#[test]
fn test_new_edit_discards_redo() {
    let mut canvas = canvas_with_items(4);
    drag_item(&mut canvas, 0, 1);
    drag_item(&mut canvas, 2, 3);
    canvas.undo();
    assert!(canvas.can_redo());

    canvas.add_item(10.0, 10.0).unwrap();
    assert!(!canvas.can_redo());
    assert_eq!(canvas.history().len(), 2);
}

#[test]
fn test_history_limit() {
    let mut canvas = TestCanvasBuilder::new()
        .with_items(4)
        .with_settings(|s| s.history_limit = 3)
        .build();
    for _ in 0..5 {
        drag_item(&mut canvas, 0, 1);
    }
    assert_eq!(canvas.history().len(), 3);

    let mut undone = 0;
    while canvas.undo() {
        undone += 1;
    }
    assert_eq!(undone, 3);
    // five swaps of the first two slots, three undone: two remain
    assert_eq!(indices_by_id(&canvas), vec![0, 1, 2, 3]);
}

#[test]
fn test_settings_shrinking_history_limit() {
    let mut canvas = canvas_with_items(4);
    for _ in 0..4 {
        drag_item(&mut canvas, 0, 1);
    }
    let mut settings = canvas.settings().clone();
    settings.history_limit = 2;
    canvas.apply_settings(settings).unwrap();
    assert_eq!(canvas.history().len(), 2);
    assert!(canvas.can_undo());
}

#[test]
fn test_shrinking_history_limit_drops_redo_tail() {
    let mut canvas = canvas_with_items(4);
    canvas.add_item(100.0, 100.0).unwrap();
    canvas.remove_item(0).unwrap();
    canvas.remove_item(1).unwrap();
    canvas.undo();
    canvas.undo();
    let before = indices_by_id(&canvas);
    assert_eq!(before, vec![0, 1, 2, 3, 4]);

    let mut settings = canvas.settings().clone();
    settings.history_limit = 1;
    canvas.apply_settings(settings).unwrap();
    assert_eq!(canvas.history().len(), 1);
    assert!(!canvas.can_redo());
    assert!(!canvas.redo());
    assert_eq!(indices_by_id(&canvas), before);

    // the surviving entry is the add, which still undoes cleanly
    assert!(canvas.undo());
    assert_eq!(ids_by_index(&canvas), vec![0, 1, 2, 3]);
    assert!(is_contiguous_permutation(canvas.items()));
}
