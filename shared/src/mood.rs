//! Mood classification
//!
//! Several conditions can hold at once (a sleeping pet may also be
//! starving), so the rules are checked in a fixed priority order and the
//! first match wins:
//!
//! 1. sleeping → [`Mood::Sleeping`]
//! 2. hunger < 20 → [`Mood::Hungry`]
//! 3. energy < 20 → [`Mood::Idle`]
//! 4. happiness > 80 and energy > 60 → [`Mood::Excited`]
//! 5. happiness > 50 → [`Mood::Happy`]
//! 6. otherwise → [`Mood::Idle`]

use serde::{Deserialize, Serialize};
use std::fmt;

/// Hunger strictly below this makes the pet hungry
pub const HUNGRY_BELOW: u8 = 20;
/// Energy strictly below this makes the pet idle
pub const TIRED_BELOW: u8 = 20;
/// Happiness strictly above this (with enough energy) makes the pet excited
pub const EXCITED_HAPPINESS_ABOVE: u8 = 80;
/// Energy strictly above this is needed for excitement
pub const EXCITED_ENERGY_ABOVE: u8 = 60;
/// Happiness strictly above this makes the pet happy
pub const HAPPY_ABOVE: u8 = 50;

/// Display state of the pet avatar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Sleeping,
    Hungry,
    Idle,
    Excited,
    Happy,
}

impl Mood {
    /// Lowercase label used by UI layers and animations
    pub fn label(&self) -> &'static str {
        match self {
            Mood::Sleeping => "sleeping",
            Mood::Hungry => "hungry",
            Mood::Idle => "idle",
            Mood::Excited => "excited",
            Mood::Happy => "happy",
        }
    }

    /// Short caption shown under the avatar
    pub fn caption(&self) -> &'static str {
        match self {
            Mood::Sleeping => "Zzz... taking a nap",
            Mood::Hungry => "I'm hungry!",
            Mood::Idle => "Just hanging around",
            Mood::Excited => "Let's play!",
            Mood::Happy => "Feeling good",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for Mood {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sleeping" => Ok(Mood::Sleeping),
            "hungry" => Ok(Mood::Hungry),
            "idle" => Ok(Mood::Idle),
            "excited" => Ok(Mood::Excited),
            "happy" => Ok(Mood::Happy),
            _ => Err(format!("Unknown mood: {}", s)),
        }
    }
}

/// Classify the pet's mood from its sleeping flag and needs
pub fn mood(sleeping: bool, hunger: u8, happiness: u8, energy: u8) -> Mood {
    if sleeping {
        Mood::Sleeping
    } else if hunger < HUNGRY_BELOW {
        Mood::Hungry
    } else if energy < TIRED_BELOW {
        Mood::Idle
    } else if happiness > EXCITED_HAPPINESS_ABOVE && energy > EXCITED_ENERGY_ABOVE {
        Mood::Excited
    } else if happiness > HAPPY_ABOVE {
        Mood::Happy
    } else {
        Mood::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case::sleeping_dominates(true, 0, 100, 100, Mood::Sleeping)]
    #[case::hunger_dominates(false, 10, 100, 100, Mood::Hungry)]
    #[case::excited(false, 50, 90, 70, Mood::Excited)]
    #[case::happy(false, 50, 60, 50, Mood::Happy)]
    #[case::idle(false, 50, 30, 50, Mood::Idle)]
    #[case::tired_overrides_happiness(false, 50, 95, 10, Mood::Idle)]
    #[case::hunger_before_tired(false, 5, 95, 5, Mood::Hungry)]
    #[case::hunger_boundary(false, 20, 60, 50, Mood::Happy)]
    #[case::energy_boundary(false, 50, 90, 20, Mood::Happy)]
    #[case::excited_needs_energy_above_60(false, 50, 90, 60, Mood::Happy)]
    #[case::excited_needs_happiness_above_80(false, 50, 80, 90, Mood::Happy)]
    #[case::happy_boundary(false, 50, 50, 50, Mood::Idle)]
    fn test_mood_table(
        #[case] sleeping: bool,
        #[case] hunger: u8,
        #[case] happiness: u8,
        #[case] energy: u8,
        #[case] expected: Mood,
    ) {
        assert_eq!(mood(sleeping, hunger, happiness, energy), expected);
    }

    #[test]
    fn test_mood_parsing_and_display() {
        assert_eq!("Excited".parse::<Mood>().unwrap(), Mood::Excited);
        assert_eq!(Mood::Hungry.to_string(), "hungry");
        assert!("grumpy".parse::<Mood>().is_err());
    }

    #[test]
    fn test_mood_serializes_lowercase() {
        let json = serde_json::to_string(&Mood::Sleeping).unwrap();
        assert_eq!(json, "\"sleeping\"");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: a sleeping pet is always shown sleeping
        #[test]
        fn prop_sleeping_always_wins(h in 0u8..=100, p in 0u8..=100, e in 0u8..=100) {
            prop_assert_eq!(mood(true, h, p, e), Mood::Sleeping);
        }

        /// Property: an awake pet with hunger under 20 is always hungry
        #[test]
        fn prop_starving_is_hungry(h in 0u8..20, p in 0u8..=100, e in 0u8..=100) {
            prop_assert_eq!(mood(false, h, p, e), Mood::Hungry);
        }
    }
}
