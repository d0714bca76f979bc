use std::ops::RangeInclusive;

/// The number of boxes on the path. Box ids run from 1 to `BOARD_SIZE`.
pub const BOARD_SIZE: u8 = 20;

/// The box every player starts on.
pub const START_BOX: u8 = 1;

pub const GRID_ROWS: usize = 5;
pub const GRID_COLS: usize = 6;

/// Where each box is drawn.
///
/// `None` cells are empty placeholders. The layout is purely presentational,
/// the order of play is given by the box ids alone.
pub const GRID_LAYOUT: [[Option<u8>; GRID_COLS]; GRID_ROWS] = [
    [Some(15), Some(16), Some(17), Some(18), Some(19), Some(20)],
    [Some(14), None, None, None, None, None],
    [Some(13), Some(12), Some(11), Some(10), Some(9), Some(8)],
    [None, None, None, None, None, Some(7)],
    [Some(1), Some(2), Some(3), Some(4), Some(5), Some(6)],
];

/// The box a player standing on `position` ends up on after rolling `roll`.
///
/// Rolls that would overshoot the last box stop on it.
pub fn target_position(position: u8, roll: u8) -> u8 {
    position.saturating_add(roll).min(BOARD_SIZE)
}

/// The boxes walked over when moving from `from` to `to`, both included.
pub fn path(from: u8, to: u8) -> RangeInclusive<u8> {
    from..=to
}

pub fn is_finish_box(position: u8) -> bool {
    position == BOARD_SIZE
}

/// Grid coordinates `(row, col)` of a box, if it is on the board.
pub fn grid_coordinates(box_id: u8) -> Option<(usize, usize)> {
    GRID_LAYOUT.iter().enumerate().find_map(|(row, cells)| {
        cells
            .iter()
            .position(|cell| *cell == Some(box_id))
            .map(|col| (row, col))
    })
}
