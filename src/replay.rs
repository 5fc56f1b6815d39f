//! Scripted input replay.
//!
//! A script sets up a canvas (settings, container, items) and feeds it a
//! list of input events. The report captures where everything ended up,
//! which makes gesture regressions easy to pin down from the command line.

use crate::canvas::Canvas;
use crate::error::CanvasResult;
use crate::input::{InputEvent, InteractionState};
use crate::settings::CanvasSettings;
use crate::types::{CanvasItem, ContainerRect, ItemId};
use crate::viewport::Viewport;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

/// Size of one initial item; ids and slots follow list order from 0
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemSize {
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplayScript {
    #[serde(default)]
    pub settings: CanvasSettings,
    #[serde(default)]
    pub container: ContainerRect,
    #[serde(default)]
    pub viewport: Option<Viewport>,
    #[serde(default)]
    pub items: Vec<ItemSize>,
    #[serde(default)]
    pub events: Vec<InputEvent>,
}

impl ReplayScript {
    pub fn from_json(json: &str) -> CanvasResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Final canvas state after a replay
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReplayReport {
    pub events_processed: usize,
    pub state: InteractionState,
    pub selected_id: Option<ItemId>,
    pub viewport: Viewport,
    pub zoom_percent: u32,
    /// Items in grid order
    pub items: Vec<CanvasItem>,
    pub history_len: usize,
    pub can_undo: bool,
    pub can_redo: bool,
}

impl ReplayReport {
    pub fn from_canvas(canvas: &Canvas, events_processed: usize) -> Self {
        Self {
            events_processed,
            state: canvas.interaction_state(),
            selected_id: canvas.selected_id(),
            viewport: canvas.viewport(),
            zoom_percent: canvas.zoom_percent(),
            items: canvas.items_by_index().into_iter().cloned().collect(),
            history_len: canvas.history().len(),
            can_undo: canvas.can_undo(),
            can_redo: canvas.can_redo(),
        }
    }
}

pub fn load_script(path: &Path) -> CanvasResult<ReplayScript> {
    let content = fs::read_to_string(path)?;
    ReplayScript::from_json(&content)
}

/// Build the canvas a script describes, without running its events.
pub fn build_canvas(script: &ReplayScript) -> CanvasResult<Canvas> {
    let items = script
        .items
        .iter()
        .enumerate()
        .map(|(i, size)| CanvasItem::new(i as ItemId, i, size.width, size.height))
        .collect();
    let mut canvas = Canvas::with_items(script.settings.clone(), items)?;
    canvas.set_container(script.container);
    if let Some(viewport) = script.viewport {
        canvas.set_viewport(viewport);
    }
    Ok(canvas)
}

/// Run every event of the script in order.
pub fn run(script: &ReplayScript) -> CanvasResult<ReplayReport> {
    let mut canvas = build_canvas(script)?;
    for event in &script.events {
        canvas.dispatch(event);
    }
    info!(
        events = script.events.len(),
        state = ?canvas.interaction_state(),
        "Replay finished"
    );
    canvas.perf().log_summary_if_slow();
    Ok(ReplayReport::from_canvas(&canvas, script.events.len()))
}
