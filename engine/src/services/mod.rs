//! Business logic services
//!
//! Each service is a unit struct of async functions taking the shared
//! [`AppState`](crate::state::AppState) and an explicit `now`.

pub mod health;
pub mod missions;
pub mod pet;
pub mod profile;
pub mod scheduler;

pub use health::{HealthEntry, HealthService, LogResult};
pub use missions::{MissionService, RollOver};
pub use pet::{CareResult, PetService};
pub use profile::{ProfileService, UpdateProfileInput};
pub use scheduler::{CareScheduler, TickReport};
