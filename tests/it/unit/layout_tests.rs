//! Unit tests for grid layout.

use gridboard::layout::{GridConfig, GridLayout};
use gridboard::{Bounds, CanvasItem, Point};

fn test_grid() -> GridLayout {
    GridLayout::new(GridConfig {
        cols: 4,
        cell_width: 100.0,
        cell_height: 100.0,
        gap: 10.0,
        padding: 20.0,
    })
}

#[test]
fn test_default_grid_positions() {
    let layout = GridLayout::default();
    assert_eq!(layout.grid_position(0), Point::new(192.0, 192.0));
    assert_eq!(layout.grid_position(5), Point::new(2016.0, 2592.0));
}

#[test]
fn test_target_index_inverts_grid_position() {
    let layout = GridLayout::default();
    for index in 0..12 {
        let p = layout.grid_position(index);
        assert_eq!(layout.target_index(p.x, p.y, 12), Some(index));
    }
}

#[test]
fn test_target_index_rounds_to_nearest_cell() {
    let layout = test_grid();
    // 60% of the way from cell 0 to cell 1
    assert_eq!(layout.target_index(20.0 + 66.0, 20.0, 8), Some(1));
    // 40% of the way
    assert_eq!(layout.target_index(20.0 + 44.0, 20.0, 8), Some(0));
}

#[test]
fn test_target_index_clamps_outside_grid() {
    let layout = test_grid();
    assert_eq!(layout.target_index(-500.0, -500.0, 8), Some(0));
    assert_eq!(layout.target_index(5000.0, 20.0, 8), Some(3));
    assert_eq!(layout.target_index(5000.0, 5000.0, 8), Some(7));
}

#[test]
fn test_target_index_never_points_past_last_item() {
    let layout = test_grid();
    // row 1, col 3 would be slot 7, but only 6 items exist
    let p = layout.grid_position(7);
    assert_eq!(layout.target_index(p.x, p.y, 6), Some(5));
}

#[test]
fn test_target_index_empty_grid() {
    assert_eq!(test_grid().target_index(0.0, 0.0, 0), None);
}

#[test]
fn test_frame_dimensions() {
    let layout = GridLayout::default();
    assert_eq!(layout.frame_width(), 7584.0);
    assert_eq!(layout.frame_height(0), 384.0);
    assert_eq!(layout.frame_height(4), 384.0 + 2304.0);
    assert_eq!(layout.frame_height(8), 384.0 + 2.0 * 2304.0 + 96.0);
}

#[test]
fn test_is_in_viewport_counts_touching_edges() {
    let layout = test_grid();
    // cell 0 spans 20..120
    assert!(layout.is_in_viewport(0, &Bounds::new(120.0, 120.0, 300.0, 300.0)));
    assert!(!layout.is_in_viewport(0, &Bounds::new(120.5, 0.0, 300.0, 300.0)));
}

#[test]
fn test_visible_items_filters_by_cell() {
    let layout = test_grid();
    let items: Vec<CanvasItem> = (0..8).map(|i| CanvasItem::new(i as u64, i, 100.0, 100.0)).collect();
    let bounds = Bounds::new(0.0, 0.0, 125.0, 125.0);
    let visible: Vec<u64> = layout.visible_items(&items, &bounds).iter().map(|i| i.id()).collect();
    // neighbours of cell 0 start at 130
    assert_eq!(visible, vec![0]);
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = GridConfig {
        cell_width: 0.0,
        ..GridConfig::default()
    };
    assert!(config.validate().is_err());
    assert!(GridConfig::default().validate().is_ok());
}
