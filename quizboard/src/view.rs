use crate::{TurnEngine, GRID_LAYOUT};

/// How a single box should be drawn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoxView {
    pub id: u8,
    /// Indices of the players standing on this box.
    pub occupants: Vec<usize>,
    pub highlighted: bool,
    pub bouncing: bool,
}

/// The board as it should be drawn right now, row by row.
///
/// Placeholder cells of the layout are `None`.
pub fn board_view(engine: &TurnEngine) -> Vec<Vec<Option<BoxView>>> {
    let state = engine.state();
    GRID_LAYOUT
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| {
                    cell.map(|id| BoxView {
                        id,
                        occupants: engine
                            .players()
                            .iter()
                            .enumerate()
                            .filter(|(_, p)| p.position == id)
                            .map(|(i, _)| i)
                            .collect(),
                        highlighted: state.highlight_box == Some(id),
                        bouncing: state.bouncing_boxes.contains(&id),
                    })
                })
                .collect()
        })
        .collect()
}
