//! Earcon playback arbitration.

mod arbiter;
mod controller;

pub use arbiter::{ArbiterSource, PriorityArbiter};
pub use controller::{Beep, BeepPlaybackController};
