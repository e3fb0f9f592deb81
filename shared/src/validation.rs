//! Input validation functions
//!
//! Range checks for values logged by the user or the health data source.
//! Profile-level rules live on the models as `validator` derives; this
//! module also flattens those into user-facing [`ValidationError`]s.

/// Maximum steps accepted in a single log entry
pub const MAX_STEPS_PER_LOG: u32 = 100_000;
/// Maximum water accepted in a single log entry (ml)
pub const MAX_WATER_ML_PER_LOG: u32 = 5_000;
/// Maximum calories accepted in a single log entry (kcal)
pub const MAX_CALORIES_PER_LOG: u32 = 10_000;
/// Maximum sleep duration for a nap (hours)
pub const MAX_SLEEP_HOURS: i64 = 12;
/// Maximum pet name length in characters
pub const MAX_PET_NAME_LEN: usize = 24;

/// Validate pet name
pub fn validate_pet_name(name: &str) -> Result<(), String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Name cannot be empty".to_string());
    }
    if trimmed.chars().count() > MAX_PET_NAME_LEN {
        return Err(format!("Name must be at most {} characters", MAX_PET_NAME_LEN));
    }
    if trimmed.chars().any(|c| c.is_control()) {
        return Err("Name contains invalid characters".to_string());
    }
    Ok(())
}

/// Validate a step count log entry
pub fn validate_steps(steps: u32) -> Result<(), String> {
    if steps == 0 {
        return Err("Steps must be greater than 0".to_string());
    }
    if steps > MAX_STEPS_PER_LOG {
        return Err(format!("Steps cannot exceed {} per entry", MAX_STEPS_PER_LOG));
    }
    Ok(())
}

/// Validate a water intake log entry (ml)
pub fn validate_water_ml(amount_ml: u32) -> Result<(), String> {
    if amount_ml == 0 {
        return Err("Amount must be greater than 0".to_string());
    }
    if amount_ml > MAX_WATER_ML_PER_LOG {
        return Err(format!("Amount cannot exceed {}ml", MAX_WATER_ML_PER_LOG));
    }
    Ok(())
}

/// Validate a calorie log entry (kcal)
pub fn validate_calories(calories: u32) -> Result<(), String> {
    if calories == 0 {
        return Err("Calories must be greater than 0".to_string());
    }
    if calories > MAX_CALORIES_PER_LOG {
        return Err("Calorie value unreasonably high".to_string());
    }
    Ok(())
}

/// Validate duration in minutes
pub fn validate_duration_minutes(minutes: u32) -> Result<(), String> {
    if minutes == 0 {
        return Err("Duration must be greater than 0".to_string());
    }
    if minutes > 1440 {
        // 24 hours
        return Err("Duration cannot exceed 24 hours".to_string());
    }
    Ok(())
}

/// Validate a nap length in hours
pub fn validate_sleep_hours(hours: i64) -> Result<(), String> {
    if hours < 1 {
        return Err("Sleep must last at least 1 hour".to_string());
    }
    if hours > MAX_SLEEP_HOURS {
        return Err(format!("Sleep cannot exceed {} hours", MAX_SLEEP_HOURS));
    }
    Ok(())
}

// ============================================================================
// User-Friendly Field Labels
// ============================================================================

/// Map technical field names to user-friendly display labels
pub fn get_field_display_label(field_name: &str) -> &str {
    match field_name {
        "name" => "Name",
        "pet_name" => "Pet Name",
        "gender" => "Gender",
        "goals" => "Daily Goals",
        "steps" | "daily_step_goal" => "Daily Step Goal",
        "water_ml" | "daily_water_goal_ml" => "Daily Water Goal",
        "calories" | "daily_calorie_goal" => "Daily Calorie Goal",
        "amount_ml" => "Water Amount",
        "active_minutes" => "Active Minutes",
        "sleep_hours" => "Sleep Duration",
        _ => field_name,
    }
}

/// Validation error with field context
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub display_label: String,
}

impl ValidationError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
            display_label: get_field_display_label(field).to_string(),
        }
    }

    /// Format as user-friendly error message
    pub fn user_message(&self) -> String {
        format!("{}: {}", self.display_label, self.message)
    }
}

/// Flatten `validator` derive errors (including nested structs) into
/// field-level errors, sorted by field name
pub fn collect_errors(errors: &validator::ValidationErrors) -> Vec<ValidationError> {
    let mut collected = Vec::new();
    for (field, kind) in errors.errors() {
        match kind {
            validator::ValidationErrorsKind::Field(field_errors) => {
                for err in field_errors {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| err.code.to_string());
                    collected.push(ValidationError::new(field.as_ref(), &message));
                }
            }
            validator::ValidationErrorsKind::Struct(nested) => {
                collected.extend(collect_errors(nested));
            }
            validator::ValidationErrorsKind::List(items) => {
                for nested in items.values() {
                    collected.extend(collect_errors(nested));
                }
            }
        }
    }
    collected.sort_by(|a, b| a.field.cmp(&b.field));
    collected
}
