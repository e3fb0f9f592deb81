//! Error types for the PawFit domain

use thiserror::Error;

/// Reasons a care action is refused by the pet rules
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CareError {
    #[error("{0} is asleep")]
    Sleeping(String),

    #[error("{0} is already awake")]
    Awake(String),

    #[error("Too tired to play (energy {energy}, need at least {required})")]
    TooTired { energy: u8, required: u8 },

    #[error("No food points left")]
    NotEnoughFood,

    #[error("Not enough coins: need {needed}, have {available}")]
    NotEnoughCoins { needed: u32, available: u32 },

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
}

impl CareError {
    /// Stable machine-readable code for UI layers
    pub fn code(&self) -> &'static str {
        match self {
            CareError::Sleeping(_) => "PET_SLEEPING",
            CareError::Awake(_) => "PET_AWAKE",
            CareError::TooTired { .. } => "PET_TOO_TIRED",
            CareError::NotEnoughFood => "NOT_ENOUGH_FOOD",
            CareError::NotEnoughCoins { .. } => "NOT_ENOUGH_COINS",
            CareError::InvalidAmount(_) => "INVALID_AMOUNT",
        }
    }
}
