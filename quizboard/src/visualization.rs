use crate::{board_view, TurnEngine, GRID_COLS};

const CELL_WIDTH: usize = 7;

/// Draws the board as text.
///
/// Each box shows its number and the first letter of every player on it.
/// The highlighted box is marked with `*`, bouncing boxes with `^`.
pub fn visualize_board(engine: &TurnEngine) -> String {
    let players = engine.players();
    let horizontal = "─".repeat(CELL_WIDTH * GRID_COLS);
    let mut result = format!("╭{}╮\n", horizontal);
    for row in board_view(engine) {
        result += "│";
        for cell in row {
            let Some(view) = cell else {
                result += &" ".repeat(CELL_WIDTH);
                continue;
            };
            let markers: String = view
                .occupants
                .iter()
                .map(|&i| players[i].name.chars().next().unwrap_or('?'))
                .collect();
            let flag = if view.highlighted {
                '*'
            } else if view.bouncing {
                '^'
            } else {
                ' '
            };
            result += &format!("{:>2}{}{:<3} ", view.id, flag, markers);
        }
        result += "│\n";
    }
    result += &format!("╰{}╯", horizontal);
    result
}
