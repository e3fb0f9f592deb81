//! PawFit Engine Library
//!
//! Application layer around the shared domain rules: storage ports,
//! services the UI calls into, and the background care scheduler.

pub mod config;
pub mod error;
pub mod repositories;
pub mod services;
pub mod state;
