//! Scene system trait

use crate::FrameTime;
use glint_core::Result;

/// A system that can be ticked by the frame loop
///
/// `update` runs exactly once per rendered frame with a clock sample taken
/// before any system is ticked, so every system in a frame sees the same time.
pub trait SceneSystem {
    /// Called once before the first frame
    fn initialize(&mut self) -> Result<()>;

    /// Called once per frame
    fn update(&mut self, frame: &FrameTime) -> Result<()>;

    /// Called when the scene is torn down. Updates after this must not
    /// touch simulation state.
    fn shutdown(&mut self) -> Result<()>;

    /// Human-readable name for this system
    fn name(&self) -> &str;
}
