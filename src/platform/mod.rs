//! Platform abstraction layer
//!
//! Collaborators the simulation reads from but does not own:
//! - Time (monotonic millisecond clock)
//! - Input (key identifier -> pressed state)

pub mod clock;
pub mod input;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use input::{InputState, Key};
