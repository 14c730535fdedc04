//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Time comes in as arguments, never read from the OS
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod effects;
pub mod entity;
pub mod state;
pub mod tick;
pub mod timer;
pub mod typing;

pub use collision::{Bounds, circles_overlap, reflect_axis};
pub use effects::{Effect, EffectPool, Particle};
pub use entity::{Entity, Role};
pub use state::{GameEvent, GamePhase, GameSession, ResultStats};
pub use tick::{TickInput, tick};
pub use timer::{TimerEvent, TimerQueue};
pub use typing::{CharResult, SubmitResult, TypingSession};
