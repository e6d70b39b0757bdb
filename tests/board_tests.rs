//! Board tests - grid access, zone sections and band collapse

use zonefall::core::Board;
use zonefall::types::{Color, BOARD_HEIGHT, BOARD_WIDTH};

fn fill_band(board: &mut Board, y: i8, color: Color) {
    let (start, end) = color.zone_columns().unwrap();
    for x in start..=end {
        assert!(board.place(x as i8, y, color, false));
    }
}

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);

    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            assert!(board.in_bounds(x, y), "Cell ({}, {}) should be valid", x, y);
            assert!(board.is_free(x, y));
            assert_eq!(board.cell(x, y), Some(None));
        }
    }
    assert_eq!(board.occupied_count(), 0);
}

#[test]
fn test_board_out_of_bounds() {
    let mut board = Board::new();

    assert_eq!(board.cell(-1, 0), None);
    assert_eq!(board.cell(0, -1), None);
    assert_eq!(board.cell(BOARD_WIDTH as i8, 0), None);
    assert_eq!(board.cell(0, BOARD_HEIGHT as i8), None);

    // Out of bounds is neither free nor occupied
    assert!(!board.is_free(-1, 5));
    assert!(!board.is_occupied(-1, 5));

    assert!(!board.place(BOARD_WIDTH as i8, 0, Color::Red, false));
    assert_eq!(board.occupied_count(), 0);
}

#[test]
fn test_place_records_bonus_flags() {
    let mut board = Board::new();
    board.place(1, 19, Color::Red, false);
    board.place(2, 19, Color::Red, true);

    let plain = board.cell(1, 19).unwrap().unwrap();
    assert!(!plain.placed_during_bonus && !plain.bonus_display);

    let bonus = board.cell(2, 19).unwrap().unwrap();
    assert!(bonus.placed_during_bonus && bonus.bonus_display);

    board.clear_bonus_placement();
    board.set_bonus_display_all(false);
    let bonus = board.cell(2, 19).unwrap().unwrap();
    assert!(!bonus.placed_during_bonus && !bonus.bonus_display);
    // Recorded color survives bonus toggles
    assert_eq!(bonus.color, Color::Red);
}

#[test]
fn test_zone_colors_by_column() {
    let board = Board::new();
    for x in 0..4 {
        assert_eq!(board.zone_color_for(x), Color::Red);
    }
    for x in 4..8 {
        assert_eq!(board.zone_color_for(x), Color::Blue);
    }
    for x in 8..12 {
        assert_eq!(board.zone_color_for(x), Color::Green);
    }
}

#[test]
fn test_section_complete_needs_matching_color() {
    let mut board = Board::new();
    fill_band(&mut board, 19, Color::Blue);
    assert!(board.is_section_complete(19, 4, 7, Color::Blue));
    assert!(!board.is_section_complete(19, 4, 7, Color::Red));
    assert!(!board.is_section_complete(19, 0, 3, Color::Red));

    board.clear(5, 19);
    board.place(5, 19, Color::Gray, false);
    assert!(!board.is_section_complete(19, 4, 7, Color::Blue));

    // Invalid ranges are never complete
    assert!(!board.is_section_complete(19, 7, 4, Color::Blue));
    assert!(!board.is_section_complete(20, 4, 7, Color::Blue));
}

#[test]
fn test_collapse_row_range_only_moves_its_columns() {
    let mut board = Board::new();
    fill_band(&mut board, 19, Color::Red);
    // Stack above, one cell inside the band and one outside
    board.place(2, 18, Color::Gray, false);
    board.place(5, 18, Color::Blue, false);

    board.collapse_row_range(19, 0, 3);

    assert_eq!(board.cell(2, 19).unwrap().unwrap().color, Color::Gray);
    assert!(board.is_free(2, 18));
    assert!(board.is_free(0, 19));
    // Outside the band nothing moved
    assert_eq!(board.cell(5, 18).unwrap().unwrap().color, Color::Blue);
    assert!(board.is_free(5, 19));
}

#[test]
fn test_collapse_full_row_shifts_everything() {
    let mut board = Board::new();
    for x in 0..BOARD_WIDTH as i8 {
        board.place(x, 19, Color::Gray, false);
    }
    board.place(0, 17, Color::Green, false);
    assert!(board.is_row_full(19));

    board.collapse_row(19);

    assert!(!board.is_row_full(19));
    assert_eq!(board.occupied_count(), 1);
    assert_eq!(board.cell(0, 18).unwrap().unwrap().color, Color::Green);
}

#[test]
fn test_top_row_cleared_after_collapse() {
    let mut board = Board::new();
    for x in 0..4 {
        board.place(x, 0, Color::Red, false);
    }
    board.collapse_row_range(0, 0, 3);
    assert_eq!(board.occupied_count(), 0);
}

#[test]
fn test_row_has_bonus_cells() {
    let mut board = Board::new();
    board.place(3, 10, Color::Red, false);
    assert!(!board.row_has_bonus_cells(10));
    board.place(4, 10, Color::Blue, true);
    assert!(board.row_has_bonus_cells(10));
    assert!(!board.row_has_bonus_cells(BOARD_HEIGHT as usize));
}

#[test]
fn test_reset_clears_board() {
    let mut board = Board::new();
    fill_band(&mut board, 5, Color::Green);
    board.reset();
    assert_eq!(board.occupied_count(), 0);
    assert!(board.cells().iter().all(|c| c.is_none()));
}
