//! PawFit Shared Library
//!
//! Pure domain logic for the PawFit virtual pet: progression, mood,
//! daily health derivations, missions and pet care rules. Everything in
//! this crate is synchronous and side-effect free so it can be reused by
//! the engine and the WASM bindings alike.

pub mod care;
pub mod errors;
pub mod health_metrics;
pub mod missions;
pub mod models;
pub mod mood;
pub mod progression;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use health_metrics::{calorie_balance, calories_from_steps, distance_km};
pub use missions::{mission_progress, MissionReward, MissionType};
pub use mood::{mood, Mood};
pub use progression::{experience_threshold, level, level_progress, next_level_threshold};
pub use types::*;

pub use models::{DailyGoals, DailyStats, Gender, Mission, Need, Pet, UserProfile};
