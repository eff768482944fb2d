//! Foraging particle simulation core.
//!
//! Particles walk an arena one orthogonal step at a time, home in on food
//! inside their search radius, and carry over into the next cycle only if
//! they ate. Everything here runs headless; the binary adds the window.

pub mod arena;
pub mod config;
pub mod food;
pub mod particle;
pub mod settings;

pub use arena::{Arena, ArenaBounds, EndReason, Meal, Phase, TickReport};
pub use food::Food;
pub use particle::{BlockReason, MoveOutcome, Particle};
pub use settings::{Parameter, PartialSettings, SettingsError, SimulationSettings};
