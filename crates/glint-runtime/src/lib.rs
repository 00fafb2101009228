//! Glint Runtime - Frame loop infrastructure
//!
//! Provides the building blocks a renderer uses to drive a scene:
//! - `FrameClock`: monotonic elapsed-time clock, real or simulated feed
//! - `FrameTime`: the per-frame sample handed to every system
//! - `SceneSystem`: trait for systems ticked once per rendered frame

mod clock;
mod system;

pub use clock::{FrameClock, FrameTime, MAX_FRAME_DELTA};
pub use system::SceneSystem;
