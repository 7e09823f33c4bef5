//! Durak rules: state, legal actions, action application, snapshots.
//!
//! - `state`: `GameState`, dealing and the rules proper
//! - `view`: wire `Snapshot` and information stripping
//! - `engine`: the `Position` trait the endgame search works through

pub mod engine;
pub mod state;
pub mod view;

pub use engine::Position;
pub use state::{Field, GameState};
pub use view::{CardToken, Snapshot, FACE_DOWN};
