//! Glint Particles - particle choreography for the animated greeting
//!
//! Drives ~1000 independently timed glitter particles through entry flight
//! along a written "MM" letterform, a looping wave, and a final dispersal,
//! while the greeting text is revealed letter by letter with sparkles:
//! - Pure easing curves and precomputed letterform/wave paths
//! - Fixed-size glitter and ambient pools, fixed-capacity sparkle arena
//! - Clock-comparison phase controller with particle/text cross-fade
//! - GPU instance packing for instanced draw calls

pub mod ambient;
pub mod config;
pub mod easing;
pub mod layout;
pub mod particle;
pub mod path;
pub mod phase;
pub mod rand;
pub mod reveal;
pub mod scene;
pub mod sparkle;
pub mod stepper;

pub use config::{SceneConfig, PRESETS};
pub use particle::{GlitterPool, IndividualPhase, ParticleInstance};
pub use phase::{Phase, PhaseController, PhaseSnapshot, PhaseTiming};
pub use scene::{FrameOutput, GreetingScene, TextTransform};
pub use stepper::ParticleStepper;
