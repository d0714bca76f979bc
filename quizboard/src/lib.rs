pub use board::*;
pub use engine::*;
pub use errors::*;
pub use player::*;
pub use question::*;
pub use sequencer::*;
pub use turn::*;
pub use view::*;
pub use visualization::*;

#[cfg(test)]
mod arbitrary;
mod board;
mod engine;
mod errors;
mod player;
mod question;
mod sequencer;
mod turn;
mod view;
mod visualization;
