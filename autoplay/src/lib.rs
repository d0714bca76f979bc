mod contestant;
mod game;
mod recording;

pub use contestant::*;
pub use game::*;
pub use recording::*;
