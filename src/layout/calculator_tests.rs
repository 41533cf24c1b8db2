//! Tests for layout computation.

use super::*;

fn base() -> GridBase {
    GridBase::new(3, 4)
}

#[test]
fn zero_pages_is_none_regardless_of_selection() {
    for t in [
        LayoutType::Grid,
        LayoutType::SingleScrollable,
        LayoutType::SinglePage,
    ] {
        let layout = compute_layout(&LayoutSelection::new(t), 0, base());
        assert_eq!(layout.layout_type, LayoutType::None);
        assert_eq!((layout.rows, layout.columns), (0, 0));
        assert!(layout.available_actions.is_empty());
    }
}

#[test]
fn grid_clamps_columns_to_page_count() {
    let layout = compute_layout(&LayoutSelection::new(LayoutType::Grid), 2, base());
    assert_eq!(layout.columns, 2);
    assert_eq!(layout.rows, 1);
}

#[test]
fn grid_clamps_rows_to_needed_rows() {
    // 5 pages over 4 columns need 2 rows; base allows 3.
    let layout = compute_layout(&LayoutSelection::new(LayoutType::Grid), 5, base());
    assert_eq!((layout.rows, layout.columns), (2, 4));
}

#[test]
fn grid_caps_at_base_for_large_documents() {
    let layout = compute_layout(&LayoutSelection::new(LayoutType::Grid), 100, base());
    assert_eq!((layout.rows, layout.columns), (3, 4));
    assert_eq!(layout.direction, Direction::Horizontal);
}

#[test]
fn grid_override_replaces_base() {
    let selection = LayoutSelection::grid(GridOverride::new(5, 6));
    let layout = compute_layout(&selection, 100, base());
    assert_eq!((layout.rows, layout.columns), (5, 6));
}

#[test]
fn zero_column_override_yields_empty_grid() {
    let selection = LayoutSelection::grid(GridOverride::new(2, 0));
    let layout = compute_layout(&selection, 10, base());
    assert_eq!((layout.rows, layout.columns), (0, 0));
}

#[test]
fn single_scrollable_is_one_column() {
    let layout = compute_layout(
        &LayoutSelection::new(LayoutType::SingleScrollable),
        7,
        base(),
    );
    assert_eq!((layout.rows, layout.columns), (7, 1));
    assert_eq!(layout.direction, Direction::Vertical);
}

#[test]
fn single_page_is_one_by_one_with_navigation() {
    let layout = compute_layout(&LayoutSelection::new(LayoutType::SinglePage), 7, base());
    assert_eq!((layout.rows, layout.columns), (1, 1));
    assert!(layout.is_action_available(ToolbarItem::PageNavigation));
}

#[test]
fn grid_disables_rotation_and_text_layer() {
    let actions = available_actions(LayoutType::Grid);
    assert!(!actions.contains(&ToolbarItem::RotateLeft));
    assert!(!actions.contains(&ToolbarItem::TextLayer));
    assert!(actions.contains(&ToolbarItem::ZoomOut));
}

#[test]
fn grid_override_for_clamps_to_pages() {
    assert_eq!(grid_override_for(2, base()), GridOverride::new(1, 2));
    assert_eq!(grid_override_for(50, base()), GridOverride::new(3, 4));
}
