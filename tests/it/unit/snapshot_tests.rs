//! Snapshot tests for host-facing output.
//!
//! Floating-point structures are snapshotted through compact serde_json
//! lines so the recorded text is exactly what a host would receive.

use crate::helpers::*;
use gridboard::input::{InteractionState, KeyCode};
use insta::{assert_json_snapshot, assert_snapshot};

fn json_lines<T: serde::Serialize>(values: &[T]) -> String {
    values
        .iter()
        .map(|v| serde_json::to_string(v).unwrap())
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_frames_during_drag() {
    let mut canvas = canvas_with_items(4);
    // grab item 0 and hover it over slot 2
    play(&mut canvas, &[down(30.0, 30.0), move_to(250.0, 30.0)]);
    assert_eq!(canvas.interaction_state(), InteractionState::DraggingImage);

    assert_snapshot!(json_lines(&canvas.frames()), @r###"
    {"id":0,"index":0,"display_index":null,"bounds":{"left":20.0,"top":20.0,"right":120.0,"bottom":120.0},"hidden":true}
    {"id":1,"index":1,"display_index":0,"bounds":{"left":20.0,"top":20.0,"right":120.0,"bottom":120.0},"hidden":false}
    {"id":2,"index":2,"display_index":1,"bounds":{"left":130.0,"top":20.0,"right":230.0,"bottom":120.0},"hidden":false}
    {"id":3,"index":3,"display_index":3,"bounds":{"left":350.0,"top":20.0,"right":450.0,"bottom":120.0},"hidden":false}
    "###);

    let overlay = canvas.drag_overlay().unwrap();
    assert_snapshot!(serde_json::to_string(&overlay).unwrap(), @r###"{"id":0,"position":{"x":240.0,"y":20.0},"width":100.0,"height":100.0,"hover_index":2}"###);
}

#[test]
fn test_overlay_scales_with_zoom() {
    let mut canvas = TestCanvasBuilder::new().with_items(2).with_zoom(0.5).build();
    // cell 0 spans screen 10..60 at half zoom; half a cell of travel
    // puts the floating center over slot 1
    play(&mut canvas, &[down(15.0, 15.0), move_to(40.0, 15.0)]);

    let overlay = canvas.drag_overlay().unwrap();
    assert_snapshot!(serde_json::to_string(&overlay).unwrap(), @r###"{"id":0,"position":{"x":35.0,"y":10.0},"width":50.0,"height":50.0,"hover_index":1}"###);
}

#[test]
fn test_transform_style_css() {
    let mut canvas = canvas_with_items(1);
    canvas.set_zoom(50.0);
    assert_snapshot!(canvas.transform_style().to_string(), @"translate(250px, 200px) scale(0.5)");
}

#[test]
fn test_cursor_per_state() {
    let cursors: Vec<(InteractionState, &str)> = InteractionState::ALL
        .into_iter()
        .map(|state| (state, state.cursor()))
        .collect();
    assert_json_snapshot!(cursors, @r###"
    [
      [
        "idle",
        "default"
      ],
      [
        "ready_to_pan",
        "grab"
      ],
      [
        "panning",
        "grabbing"
      ],
      [
        "dragging_image",
        "grabbing"
      ],
      [
        "resizing",
        "nwse-resize"
      ],
      [
        "selecting",
        "crosshair"
      ]
    ]
    "###);
}

#[test]
fn test_key_state_after_chord() {
    let mut canvas = canvas_with_items(1);
    play(
        &mut canvas,
        &[key_down(KeyCode::Space), key_down(KeyCode::ShiftLeft), key_down(KeyCode::MetaRight)],
    );
    assert_json_snapshot!(canvas.key_state(), @r###"
    {
      "space": true,
      "alt": false,
      "ctrl": false,
      "meta": true,
      "shift": true
    }
    "###);
}
