//! Pet care rules
//!
//! Pure state transitions on a [`Pet`]: need decay over elapsed time,
//! interactive actions (feed, play, stroke, sleep, wake), the food shop,
//! experience awards and the conversion of real-life activity into
//! in-game resources.
//!
//! # Design Principles
//!
//! 1. **Explicit time**: every transition takes `now` from the caller
//! 2. **Clamped needs**: needs only change through [`crate::models::Need`]
//! 3. **Whole hours**: decay consumes whole elapsed hours and carries the
//!    remainder to the next call, so frequent ticks lose nothing

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::CareError;
use crate::missions::MissionReward;
use crate::models::{DailyStats, Pet};
use crate::progression::LevelUp;

// ============================================================================
// Action Tuning
// ============================================================================

pub const FEED_HUNGER_GAIN: i64 = 25;
pub const FEED_HAPPINESS_GAIN: i64 = 5;
pub const FEED_EXPERIENCE: u32 = 5;

pub const PLAY_HAPPINESS_GAIN: i64 = 15;
pub const PLAY_ENERGY_COST: i64 = 10;
pub const PLAY_HUNGER_COST: i64 = 5;
pub const PLAY_EXPERIENCE: u32 = 10;
/// Minimum energy required to play
pub const PLAY_MIN_ENERGY: u8 = 15;

pub const STROKE_HAPPINESS_GAIN: i64 = 5;
pub const STROKE_EXPERIENCE: u32 = 1;

/// Coins per food pack
pub const FOOD_PACK_COST: u32 = 20;
/// Food points per food pack
pub const FOOD_PACK_SIZE: u32 = 5;

/// Steps needed to earn one food point
pub const STEPS_PER_FOOD_POINT: u32 = 500;
/// Water needed for one happiness bonus
pub const WATER_ML_PER_BONUS: u32 = 250;
pub const WATER_HAPPINESS_BONUS: u32 = 3;
/// Burned calories needed for one coin bonus
pub const KCAL_PER_COIN_BONUS: u32 = 100;
pub const COINS_PER_KCAL_BONUS: u32 = 2;

// ============================================================================
// Decay
// ============================================================================

/// Per-hour need changes applied by [`decay`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecayRates {
    pub awake_hunger: u32,
    pub awake_energy: u32,
    pub awake_happiness: u32,
    pub asleep_hunger: u32,
    /// Energy regained per hour of sleep
    pub asleep_energy_gain: u32,
}

impl Default for DecayRates {
    fn default() -> Self {
        Self {
            awake_hunger: 4,
            awake_energy: 3,
            awake_happiness: 2,
            asleep_hunger: 2,
            asleep_energy_gain: 12,
        }
    }
}

/// What a call to [`decay`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecayReport {
    pub hours_awake: i64,
    pub hours_asleep: i64,
    pub woke_up: bool,
}

impl DecayReport {
    pub fn is_noop(&self) -> bool {
        self.hours_awake == 0 && self.hours_asleep == 0 && !self.woke_up
    }
}

/// Bring the pet's needs up to date with `now`
///
/// Sleep time runs until `sleep_end` (or `now` if sooner); once the end has
/// passed the pet wakes and any remaining time decays as awake time.
pub fn decay(pet: &mut Pet, now: DateTime<Utc>, rates: &DecayRates) -> DecayReport {
    let mut report = DecayReport::default();
    if now <= pet.last_updated {
        return report;
    }

    if pet.sleeping {
        let sleep_until = pet.sleep_end.map_or(now, |end| end.min(now));
        let hours = whole_hours(pet.last_updated, sleep_until);
        if hours > 0 {
            pet.hunger.adjust(-i64::from(rates.asleep_hunger) * hours);
            pet.energy.adjust(i64::from(rates.asleep_energy_gain) * hours);
            pet.last_updated += Duration::hours(hours);
            report.hours_asleep = hours;
        }

        if let Some(end) = pet.sleep_end.filter(|end| *end <= now) {
            pet.sleeping = false;
            pet.sleep_end = None;
            // The partial hour before waking is dropped
            pet.last_updated = pet.last_updated.max(end);
            report.woke_up = true;
        }
    }

    if !pet.sleeping {
        let hours = whole_hours(pet.last_updated, now);
        if hours > 0 {
            pet.hunger.adjust(-i64::from(rates.awake_hunger) * hours);
            pet.energy.adjust(-i64::from(rates.awake_energy) * hours);
            pet.happiness.adjust(-i64::from(rates.awake_happiness) * hours);
            pet.last_updated += Duration::hours(hours);
            report.hours_awake = hours;
        }
    }

    report
}

fn whole_hours(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    (to - from).num_hours().max(0)
}

// ============================================================================
// Experience & Rewards
// ============================================================================

/// Result of an action that may grant experience
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CareOutcome {
    pub experience_gained: u32,
    pub level_up: Option<LevelUp>,
}

/// Add experience, paying the level-up coin bonus when a level is crossed
pub fn grant_experience(pet: &mut Pet, amount: u32) -> Option<LevelUp> {
    let before = pet.experience;
    pet.experience = before.saturating_add(u64::from(amount));
    let level_up = LevelUp::between(before, pet.experience);
    if let Some(up) = level_up {
        pet.coins = pet.coins.saturating_add(up.coin_bonus());
    }
    level_up
}

/// Pay out a mission reward
pub fn grant_reward(pet: &mut Pet, reward: MissionReward) -> CareOutcome {
    pet.coins = pet.coins.saturating_add(reward.coins);
    CareOutcome {
        experience_gained: reward.experience,
        level_up: grant_experience(pet, reward.experience),
    }
}

fn interaction(pet: &mut Pet, now: DateTime<Utc>, experience: u32) -> CareOutcome {
    pet.last_interaction = now;
    CareOutcome {
        experience_gained: experience,
        level_up: grant_experience(pet, experience),
    }
}

// ============================================================================
// Actions
// ============================================================================

/// Spend one food point to fill the pet's belly
pub fn feed(pet: &mut Pet, now: DateTime<Utc>) -> Result<CareOutcome, CareError> {
    if pet.sleeping {
        return Err(CareError::Sleeping(pet.name.clone()));
    }
    if pet.food_points == 0 {
        return Err(CareError::NotEnoughFood);
    }

    pet.food_points -= 1;
    pet.hunger.adjust(FEED_HUNGER_GAIN);
    pet.happiness.adjust(FEED_HAPPINESS_GAIN);
    Ok(interaction(pet, now, FEED_EXPERIENCE))
}

/// Play with the pet: happier, but tired and hungrier
pub fn play(pet: &mut Pet, now: DateTime<Utc>) -> Result<CareOutcome, CareError> {
    if pet.sleeping {
        return Err(CareError::Sleeping(pet.name.clone()));
    }
    if pet.energy.value() < PLAY_MIN_ENERGY {
        return Err(CareError::TooTired {
            energy: pet.energy.value(),
            required: PLAY_MIN_ENERGY,
        });
    }

    pet.happiness.adjust(PLAY_HAPPINESS_GAIN);
    pet.energy.adjust(-PLAY_ENERGY_COST);
    pet.hunger.adjust(-PLAY_HUNGER_COST);
    Ok(interaction(pet, now, PLAY_EXPERIENCE))
}

/// Stroke the pet; allowed while asleep but earns nothing then
pub fn stroke(pet: &mut Pet, now: DateTime<Utc>) -> CareOutcome {
    pet.happiness.adjust(STROKE_HAPPINESS_GAIN);
    let experience = if pet.sleeping { 0 } else { STROKE_EXPERIENCE };
    interaction(pet, now, experience)
}

/// Put the pet to bed for `duration`
pub fn put_to_sleep(pet: &mut Pet, now: DateTime<Utc>, duration: Duration) -> Result<(), CareError> {
    if pet.sleeping {
        return Err(CareError::Sleeping(pet.name.clone()));
    }
    if duration <= Duration::zero() {
        return Err(CareError::InvalidAmount(
            "Sleep duration must be positive".to_string(),
        ));
    }

    pet.sleeping = true;
    pet.sleep_end = Some(now + duration);
    pet.last_interaction = now;
    Ok(())
}

/// Wake the pet before its sleep ends
pub fn wake(pet: &mut Pet, now: DateTime<Utc>) -> Result<(), CareError> {
    if !pet.sleeping {
        return Err(CareError::Awake(pet.name.clone()));
    }

    pet.sleeping = false;
    pet.sleep_end = None;
    pet.last_interaction = now;
    Ok(())
}

/// Buy food packs with coins, returns the food points gained
pub fn buy_food(pet: &mut Pet, packs: u32) -> Result<u32, CareError> {
    if packs == 0 {
        return Err(CareError::InvalidAmount(
            "Must buy at least one pack".to_string(),
        ));
    }
    let cost = packs
        .checked_mul(FOOD_PACK_COST)
        .ok_or_else(|| CareError::InvalidAmount("Too many packs".to_string()))?;
    if pet.coins < cost {
        return Err(CareError::NotEnoughCoins {
            needed: cost,
            available: pet.coins,
        });
    }

    let food = packs.saturating_mul(FOOD_PACK_SIZE);
    pet.coins -= cost;
    pet.food_points = pet.food_points.saturating_add(food);
    Ok(food)
}

// ============================================================================
// Activity
// ============================================================================

/// In-game resources earned from real-life activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActivityReward {
    pub food_points: u32,
    pub coins: u32,
    pub happiness: u32,
}

impl ActivityReward {
    pub fn is_empty(&self) -> bool {
        *self == ActivityReward::default()
    }
}

/// Reward for the counters added between two snapshots of the same day
///
/// Computed on cumulative totals so partial units carry over between logs.
pub fn activity_reward(before: &DailyStats, after: &DailyStats) -> ActivityReward {
    let food_points = units_crossed(before.steps, after.steps, STEPS_PER_FOOD_POINT);
    let water_bonuses = units_crossed(before.water_ml, after.water_ml, WATER_ML_PER_BONUS);
    let kcal_bonuses = units_crossed(
        before.calories_burned,
        after.calories_burned,
        KCAL_PER_COIN_BONUS,
    );

    ActivityReward {
        food_points,
        coins: kcal_bonuses.saturating_mul(COINS_PER_KCAL_BONUS),
        happiness: food_points.saturating_add(water_bonuses.saturating_mul(WATER_HAPPINESS_BONUS)),
    }
}

/// Credit an activity reward to the pet
pub fn apply_activity(pet: &mut Pet, reward: &ActivityReward) {
    pet.food_points = pet.food_points.saturating_add(reward.food_points);
    pet.coins = pet.coins.saturating_add(reward.coins);
    pet.happiness.adjust(i64::from(reward.happiness));
}

fn units_crossed(before: u32, after: u32, unit: u32) -> u32 {
    (after / unit).saturating_sub(before / unit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Need;
    use crate::mood::Mood;
    use chrono::{NaiveDate, TimeZone};
    use proptest::prelude::*;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap()
    }

    fn pet() -> Pet {
        Pet::new("Mochi", t0())
    }

    // =========================================================================
    // Decay Tests
    // =========================================================================

    #[test]
    fn test_awake_decay_whole_hours() {
        let mut pet = pet();
        let report = decay(&mut pet, t0() + Duration::hours(5), &DecayRates::default());

        assert_eq!(report.hours_awake, 5);
        assert_eq!(pet.hunger.value(), 60);
        assert_eq!(pet.energy.value(), 65);
        assert_eq!(pet.happiness.value(), 70);
        assert_eq!(pet.last_updated, t0() + Duration::hours(5));
    }

    #[test]
    fn test_partial_hours_carry_over() {
        let mut pet = pet();
        let rates = DecayRates::default();

        // Four 15-minute ticks add up to exactly one hour of decay
        for quarter in 1..=4 {
            decay(&mut pet, t0() + Duration::minutes(15 * quarter), &rates);
        }
        assert_eq!(pet.hunger.value(), 76);
        assert_eq!(pet.last_updated, t0() + Duration::hours(1));
    }

    #[test]
    fn test_decay_clamps_at_zero() {
        let mut pet = pet();
        decay(&mut pet, t0() + Duration::days(3), &DecayRates::default());
        assert_eq!(pet.hunger, Need::EMPTY);
        assert_eq!(pet.energy, Need::EMPTY);
        assert_eq!(pet.happiness, Need::EMPTY);
        assert_eq!(pet.mood(), Mood::Hungry);
    }

    #[test]
    fn test_decay_ignores_clock_going_backwards() {
        let mut pet = pet();
        let report = decay(&mut pet, t0() - Duration::hours(2), &DecayRates::default());
        assert!(report.is_noop());
        assert_eq!(pet.last_updated, t0());
    }

    #[test]
    fn test_sleep_restores_energy_then_wakes() {
        let mut pet = pet();
        pet.energy = Need::new(20);
        put_to_sleep(&mut pet, t0(), Duration::hours(4)).unwrap();

        // Two hours after waking
        let report = decay(&mut pet, t0() + Duration::hours(6), &DecayRates::default());
        assert_eq!(report.hours_asleep, 4);
        assert_eq!(report.hours_awake, 2);
        assert!(report.woke_up);
        assert!(!pet.sleeping);
        assert_eq!(pet.sleep_end, None);
        // 20 + 4×12 − 2×3
        assert_eq!(pet.energy.value(), 62);
        // 80 − 4×2 − 2×4
        assert_eq!(pet.hunger.value(), 64);
    }

    #[test]
    fn test_still_sleeping_before_end() {
        let mut pet = pet();
        put_to_sleep(&mut pet, t0(), Duration::hours(8)).unwrap();
        let report = decay(&mut pet, t0() + Duration::hours(3), &DecayRates::default());
        assert!(pet.sleeping);
        assert!(!report.woke_up);
        assert_eq!(report.hours_asleep, 3);
        assert_eq!(pet.mood(), Mood::Sleeping);
    }

    // =========================================================================
    // Action Tests
    // =========================================================================

    #[test]
    fn test_feed() {
        let mut pet = pet();
        pet.hunger = Need::new(10);
        let outcome = feed(&mut pet, t0()).unwrap();

        assert_eq!(pet.hunger.value(), 35);
        assert_eq!(pet.food_points, Pet::STARTING_FOOD_POINTS - 1);
        assert_eq!(outcome.experience_gained, FEED_EXPERIENCE);
        assert_eq!(pet.experience, u64::from(FEED_EXPERIENCE));
    }

    #[test]
    fn test_feed_without_food() {
        let mut pet = pet();
        pet.food_points = 0;
        assert_eq!(feed(&mut pet, t0()), Err(CareError::NotEnoughFood));
    }

    #[test]
    fn test_actions_refused_while_sleeping() {
        let mut pet = pet();
        put_to_sleep(&mut pet, t0(), Duration::hours(1)).unwrap();
        assert!(matches!(feed(&mut pet, t0()), Err(CareError::Sleeping(_))));
        assert!(matches!(play(&mut pet, t0()), Err(CareError::Sleeping(_))));
        assert!(matches!(
            put_to_sleep(&mut pet, t0(), Duration::hours(1)),
            Err(CareError::Sleeping(_))
        ));

        // Stroking works but earns nothing
        let outcome = stroke(&mut pet, t0());
        assert_eq!(outcome.experience_gained, 0);
    }

    #[test]
    fn test_play_requires_energy() {
        let mut pet = pet();
        pet.energy = Need::new(14);
        assert_eq!(
            play(&mut pet, t0()),
            Err(CareError::TooTired { energy: 14, required: PLAY_MIN_ENERGY })
        );

        pet.energy = Need::new(15);
        let outcome = play(&mut pet, t0()).unwrap();
        assert_eq!(outcome.experience_gained, PLAY_EXPERIENCE);
        assert_eq!(pet.energy.value(), 5);
        assert_eq!(pet.happiness.value(), 95);
    }

    #[test]
    fn test_wake() {
        let mut pet = pet();
        assert!(matches!(wake(&mut pet, t0()), Err(CareError::Awake(_))));
        put_to_sleep(&mut pet, t0(), Duration::hours(8)).unwrap();
        wake(&mut pet, t0() + Duration::minutes(30)).unwrap();
        assert!(!pet.sleeping);
        assert_eq!(pet.last_interaction, t0() + Duration::minutes(30));
    }

    #[test]
    fn test_sleep_requires_positive_duration() {
        let mut pet = pet();
        assert!(matches!(
            put_to_sleep(&mut pet, t0(), Duration::zero()),
            Err(CareError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_buy_food() {
        let mut pet = pet();
        pet.coins = 45;
        assert_eq!(buy_food(&mut pet, 2).unwrap(), 10);
        assert_eq!(pet.coins, 5);
        assert_eq!(pet.food_points, Pet::STARTING_FOOD_POINTS + 10);

        assert_eq!(
            buy_food(&mut pet, 1),
            Err(CareError::NotEnoughCoins { needed: 20, available: 5 })
        );
        assert!(matches!(buy_food(&mut pet, 0), Err(CareError::InvalidAmount(_))));
    }

    #[test]
    fn test_level_up_pays_bonus() {
        let mut pet = pet();
        pet.experience = 195;
        let coins = pet.coins;
        let outcome = grant_reward(&mut pet, MissionReward { experience: 10, coins: 3 });

        assert_eq!(outcome.level_up, Some(LevelUp { from: 1, to: 2 }));
        assert_eq!(pet.level(), 2);
        assert_eq!(pet.coins, coins + 3 + crate::progression::COINS_PER_LEVEL_UP);
    }

    // =========================================================================
    // Activity Tests
    // =========================================================================

    #[test]
    fn test_activity_reward_carries_partial_units() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let mut before = DailyStats::empty(date);
        let mut after = before;

        after.steps = 400;
        assert!(activity_reward(&before, &after).is_empty());

        before = after;
        after.steps = 1100;
        after.water_ml = 500;
        after.calories_burned = 250;
        let reward = activity_reward(&before, &after);
        assert_eq!(reward.food_points, 2);
        assert_eq!(reward.coins, 4);
        assert_eq!(reward.happiness, 2 + 2 * WATER_HAPPINESS_BONUS);

        let mut pet = pet();
        apply_activity(&mut pet, &reward);
        assert_eq!(pet.food_points, Pet::STARTING_FOOD_POINTS + 2);
        assert_eq!(pet.happiness.value(), 88);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: needs stay inside [0, 100] whatever the elapsed time
        #[test]
        fn prop_decay_keeps_needs_in_range(
            minutes in 0i64..20_000,
            hunger in 0i64..=100,
            energy in 0i64..=100,
            asleep in any::<bool>()
        ) {
            let mut pet = pet();
            pet.hunger = Need::new(hunger);
            pet.energy = Need::new(energy);
            if asleep {
                put_to_sleep(&mut pet, t0(), Duration::hours(8)).unwrap();
            }
            decay(&mut pet, t0() + Duration::minutes(minutes), &DecayRates::default());
            prop_assert!(pet.hunger.value() <= 100);
            prop_assert!(pet.energy.value() <= 100);
            prop_assert!(pet.happiness.value() <= 100);
            prop_assert!(pet.last_updated <= t0() + Duration::minutes(minutes));
        }

        /// Property: experience never decreases
        #[test]
        fn prop_experience_monotonic(start in 0u64..1_000_000, amount in any::<u32>()) {
            let mut pet = pet();
            pet.experience = start;
            grant_experience(&mut pet, amount);
            prop_assert!(pet.experience >= start);
        }
    }
}
