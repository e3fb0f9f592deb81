//! Pet care service
//!
//! Loads the pet, brings its needs up to date with the clock, applies one
//! care rule from [`pawfit_shared::care`] and persists the result. Every
//! experience award is mirrored into the profile's lifetime total.

use crate::error::{EngineError, EngineResult};
use crate::services::profile::ProfileService;
use crate::state::AppState;
use chrono::{DateTime, Duration, Utc};
use pawfit_shared::care::{self, ActivityReward, CareOutcome, DecayReport};
use pawfit_shared::progression::LevelUp;
use pawfit_shared::validation::{validate_pet_name, validate_sleep_hours};
use pawfit_shared::{MissionReward, Pet, PetStatus};
use tracing::{debug, info};

/// Result of a care action
#[derive(Debug, Clone, PartialEq)]
pub struct CareResult {
    pub status: PetStatus,
    pub experience_gained: u32,
    pub level_up: Option<LevelUp>,
}

/// Pet service for business logic
pub struct PetService;

impl PetService {
    /// Get the pet, adopting one with the default name on first launch
    pub async fn get_or_create(state: &AppState, now: DateTime<Utc>) -> EngineResult<Pet> {
        let _guard = state.write_lock().await;
        Self::load_or_create(state, now).await
    }

    /// Current pet status with needs decayed up to `now`
    pub async fn status(state: &AppState, now: DateTime<Utc>) -> EngineResult<PetStatus> {
        let _guard = state.write_lock().await;
        let pet = Self::current(state, now).await?;
        state.pets.save(&pet).await?;
        Ok(PetStatus::from(&pet))
    }

    /// Give the pet a new name
    pub async fn rename(state: &AppState, name: &str, now: DateTime<Utc>) -> EngineResult<PetStatus> {
        validate_pet_name(name).map_err(EngineError::Validation)?;

        let _guard = state.write_lock().await;
        let mut pet = Self::current(state, now).await?;
        pet.name = name.trim().to_string();
        state.pets.save(&pet).await?;
        Ok(PetStatus::from(&pet))
    }

    pub async fn feed(state: &AppState, now: DateTime<Utc>) -> EngineResult<CareResult> {
        let _guard = state.write_lock().await;
        let mut pet = Self::current(state, now).await?;
        let outcome = care::feed(&mut pet, now)?;
        Self::commit(state, &pet, outcome, now).await
    }

    pub async fn play(state: &AppState, now: DateTime<Utc>) -> EngineResult<CareResult> {
        let _guard = state.write_lock().await;
        let mut pet = Self::current(state, now).await?;
        let outcome = care::play(&mut pet, now)?;
        Self::commit(state, &pet, outcome, now).await
    }

    /// Pet the cat
    pub async fn stroke(state: &AppState, now: DateTime<Utc>) -> EngineResult<CareResult> {
        let _guard = state.write_lock().await;
        let mut pet = Self::current(state, now).await?;
        let outcome = care::stroke(&mut pet, now);
        Self::commit(state, &pet, outcome, now).await
    }

    /// Put the pet to bed, for the configured default when `hours` is `None`
    pub async fn sleep(
        state: &AppState,
        hours: Option<i64>,
        now: DateTime<Utc>,
    ) -> EngineResult<PetStatus> {
        let hours = hours.unwrap_or(state.config().care.default_sleep_hours);
        validate_sleep_hours(hours).map_err(EngineError::Validation)?;

        let _guard = state.write_lock().await;
        let mut pet = Self::current(state, now).await?;
        care::put_to_sleep(&mut pet, now, Duration::hours(hours))?;
        state.pets.save(&pet).await?;

        info!(name = %pet.name, hours, "Pet went to sleep");
        Ok(PetStatus::from(&pet))
    }

    pub async fn wake(state: &AppState, now: DateTime<Utc>) -> EngineResult<PetStatus> {
        let _guard = state.write_lock().await;
        let mut pet = Self::current(state, now).await?;
        care::wake(&mut pet, now)?;
        state.pets.save(&pet).await?;

        info!(name = %pet.name, "Pet woken up");
        Ok(PetStatus::from(&pet))
    }

    /// Spend coins on food packs
    pub async fn buy_food(state: &AppState, packs: u32, now: DateTime<Utc>) -> EngineResult<PetStatus> {
        let _guard = state.write_lock().await;
        let mut pet = Self::current(state, now).await?;
        let food = care::buy_food(&mut pet, packs)?;
        state.pets.save(&pet).await?;

        info!(packs, food_points = food, coins_left = pet.coins, "Food purchased");
        Ok(PetStatus::from(&pet))
    }

    /// Background decay pass
    ///
    /// Does nothing before the pet is adopted.
    pub async fn tick(state: &AppState, now: DateTime<Utc>) -> EngineResult<Option<DecayReport>> {
        let _guard = state.write_lock().await;
        let Some(mut pet) = state.pets.find().await? else {
            return Ok(None);
        };

        let report = care::decay(&mut pet, now, &state.config().care.decay);
        if !report.is_noop() {
            state.pets.save(&pet).await?;
            debug!(
                hours_awake = report.hours_awake,
                hours_asleep = report.hours_asleep,
                hunger = pet.hunger.value(),
                energy = pet.energy.value(),
                happiness = pet.happiness.value(),
                "Pet needs decayed"
            );
        }
        if report.woke_up {
            info!(name = %pet.name, "Pet woke up");
        }
        Ok(Some(report))
    }

    /// Grant experience and coins
    pub async fn reward(
        state: &AppState,
        reward: MissionReward,
        now: DateTime<Utc>,
    ) -> EngineResult<CareResult> {
        let _guard = state.write_lock().await;
        Self::grant(state, reward, now).await
    }

    // ------------------------------------------------------------------------
    // Lock-free helpers; callers hold the write lock
    // ------------------------------------------------------------------------

    pub(crate) async fn load_or_create(state: &AppState, now: DateTime<Utc>) -> EngineResult<Pet> {
        if let Some(pet) = state.pets.find().await? {
            return Ok(pet);
        }

        let name = &state.config().defaults.pet_name;
        validate_pet_name(name)
            .map_err(|e| EngineError::Validation(format!("Invalid default pet name: {}", e)))?;

        let pet = Pet::new(name.trim(), now);
        state.pets.save(&pet).await?;
        info!(name = %pet.name, "Pet adopted");
        Ok(pet)
    }

    /// Pet with decay applied, not yet saved
    async fn current(state: &AppState, now: DateTime<Utc>) -> EngineResult<Pet> {
        let mut pet = Self::load_or_create(state, now).await?;
        care::decay(&mut pet, now, &state.config().care.decay);
        Ok(pet)
    }

    pub(crate) async fn grant(
        state: &AppState,
        reward: MissionReward,
        now: DateTime<Utc>,
    ) -> EngineResult<CareResult> {
        let mut pet = Self::current(state, now).await?;
        let outcome = care::grant_reward(&mut pet, reward);
        Self::commit(state, &pet, outcome, now).await
    }

    pub(crate) async fn credit_activity(
        state: &AppState,
        reward: &ActivityReward,
        now: DateTime<Utc>,
    ) -> EngineResult<Pet> {
        let mut pet = Self::current(state, now).await?;
        care::apply_activity(&mut pet, reward);
        state.pets.save(&pet).await?;

        debug!(
            food_points = reward.food_points,
            coins = reward.coins,
            happiness = reward.happiness,
            "Activity credited to pet"
        );
        Ok(pet)
    }

    async fn commit(
        state: &AppState,
        pet: &Pet,
        outcome: CareOutcome,
        now: DateTime<Utc>,
    ) -> EngineResult<CareResult> {
        state.pets.save(pet).await?;
        ProfileService::credit_experience(state, outcome.experience_gained, now).await?;

        if let Some(up) = outcome.level_up {
            info!(
                name = %pet.name,
                from = up.from,
                to = up.to,
                bonus_coins = up.coin_bonus(),
                "Level up"
            );
        }

        Ok(CareResult {
            status: PetStatus::from(pet),
            experience_gained: outcome.experience_gained,
            level_up: outcome.level_up,
        })
    }
}
