//! PawFit WASM Module
//!
//! This crate provides WebAssembly bindings for the pet's progression,
//! mood and daily-stat calculations so a web UI computes exactly what the
//! engine does.

use pawfit_shared::models::NEED_MAX;
use pawfit_shared::{Pet, PetStatus};
use wasm_bindgen::prelude::*;

/// Level reached with `experience` cumulative points
#[wasm_bindgen]
pub fn level(experience: u64) -> u32 {
    pawfit_shared::level(experience)
}

/// Cumulative experience at which `level` starts
#[wasm_bindgen]
pub fn experience_threshold(level: u32) -> u64 {
    pawfit_shared::experience_threshold(level)
}

/// Progress toward the next level, in [0, 1]
#[wasm_bindgen]
pub fn level_progress(experience: u64) -> f64 {
    pawfit_shared::level_progress(experience, pawfit_shared::level(experience))
}

/// Mood label ("sleeping", "hungry", "idle", "excited", "happy")
///
/// Needs above 100 are treated as 100.
#[wasm_bindgen]
pub fn mood(sleeping: bool, hunger: u32, happiness: u32, energy: u32) -> String {
    pawfit_shared::mood(sleeping, clamp_need(hunger), clamp_need(happiness), clamp_need(energy))
        .label()
        .to_string()
}

#[wasm_bindgen]
pub fn mission_progress(current: u32, target: u32) -> f64 {
    pawfit_shared::mission_progress(current, target)
}

#[wasm_bindgen]
pub fn distance_km(steps: u32) -> f64 {
    pawfit_shared::distance_km(steps)
}

#[wasm_bindgen]
pub fn calories_from_steps(steps: u32) -> u32 {
    pawfit_shared::calories_from_steps(steps)
}

/// Consumed minus burned; negative means a deficit
#[wasm_bindgen]
pub fn calorie_balance(consumed: u32, burned: u32) -> i64 {
    pawfit_shared::calorie_balance(consumed, burned)
}

/// Derive the display status from a stored pet record (both JSON)
#[wasm_bindgen]
pub fn pet_status(pet_json: &str) -> Result<String, JsValue> {
    pet_status_json(pet_json).map_err(|e| JsValue::from_str(&e))
}

fn pet_status_json(pet_json: &str) -> Result<String, String> {
    let pet: Pet = serde_json::from_str(pet_json).map_err(|e| format!("Invalid pet: {}", e))?;
    serde_json::to_string(&PetStatus::from(&pet)).map_err(|e| e.to_string())
}

fn clamp_need(value: u32) -> u8 {
    value.min(u32::from(NEED_MAX)) as u8
}
