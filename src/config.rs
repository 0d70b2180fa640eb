//! Static configuration: model paths, feature schemas, encodings, and the
//! per-variant error/confidence constants reported alongside predictions.

use crate::types::{Compound, ModelVariant};

pub const API_TITLE: &str = "F1 Pit Strategy Optimizer API";
pub const API_VERSION: &str = "1.0.0";
pub const API_STATUS: &str = "API is running";
pub const API_MESSAGE: &str = "F1 Pit Strategy Optimizer API is running successfully.";

pub const SINGLE_MODEL_PATH_ENV: &str = "SINGLE_MODEL_PATH";
pub const MULTI_MODEL_PATH_ENV: &str = "MULTI_MODEL_PATH";
pub const SINGLE_MODEL_PATH_DEFAULT: &str = "models/pit_strategy_single_season_2023.pt";
pub const MULTI_MODEL_PATH_DEFAULT: &str = "models/pit_strategy_multi_season.pt";

/// Authoritative input ordering for the single-season model.
pub const SINGLE_SEASON_FEATURES: [&str; 13] = [
    "TyreLife",
    "FreshTyre",
    "Position",
    "Stint",
    "race_round",
    "SpeedFL",
    "LapTime_seconds",
    "has_safety_car",
    "has_vsc",
    "has_yellow",
    "Compound_encoded",
    "Driver_encoded",
    "RaceName_encoded",
];

/// Authoritative input ordering for the multi-season model. Uses the season
/// year instead of the round within a season, and adds the red-flag state.
pub const MULTI_SEASON_FEATURES: [&str; 14] = [
    "TyreLife",
    "FreshTyre",
    "Position",
    "Stint",
    "SpeedFL",
    "Year",
    "LapTime_seconds",
    "has_safety_car",
    "has_vsc",
    "has_red_flag",
    "has_yellow",
    "Compound_encoded",
    "Driver_encoded",
    "RaceName_encoded",
];

pub const fn features_for(variant: ModelVariant) -> &'static [&'static str] {
    match variant {
        ModelVariant::Single => &SINGLE_SEASON_FEATURES,
        ModelVariant::Multi => &MULTI_SEASON_FEATURES,
    }
}

pub const fn compound_code(compound: Compound) -> i64 {
    match compound {
        Compound::Soft => 1,
        Compound::Medium => 2,
        Compound::Hard => 3,
        Compound::Intermediate => 4,
        Compound::Wet => 5,
    }
}

/// Mean absolute error measured on the held-out set when each model was
/// trained. Static; not derived from the live prediction.
pub const fn mae(variant: ModelVariant) -> f64 {
    match variant {
        ModelVariant::Single => 4.47,
        ModelVariant::Multi => 5.36,
    }
}

pub const fn confidence(variant: ModelVariant) -> f64 {
    match variant {
        ModelVariant::Single => 0.851,
        ModelVariant::Multi => 0.772,
    }
}

/// Scripted strategy variants: (label, lap offset, risk level, advantage).
pub const STRATEGY_ALTERNATIVES: [(&str, i64, &str, &str); 3] = [
    ("Aggressive", -4, "HIGH", "+2.3s"),
    ("Optimal", 0, "MEDIUM", "+4.1s"),
    ("Conservative", 4, "LOW", "+1.8s"),
];

pub const DRIVER_CODES: [&str; 20] = [
    "VER", "HAM", "LEC", "SAI", "PER", "RUS", "NOR", "PIA", "ALO", "STR", "GAS", "OCO", "ALB",
    "SAR", "MAG", "HUL", "TSU", "RIC", "ZHO", "BOT",
];

pub const RACE_NAMES: [&str; 24] = [
    "Bahrain Grand Prix",
    "Saudi Arabian Grand Prix",
    "Australian Grand Prix",
    "Japanese Grand Prix",
    "Chinese Grand Prix",
    "Miami Grand Prix",
    "Emilia Romagna Grand Prix",
    "Monaco Grand Prix",
    "Canadian Grand Prix",
    "Spanish Grand Prix",
    "Austrian Grand Prix",
    "British Grand Prix",
    "Hungarian Grand Prix",
    "Belgian Grand Prix",
    "Dutch Grand Prix",
    "Italian Grand Prix",
    "Azerbaijan Grand Prix",
    "Singapore Grand Prix",
    "United States Grand Prix",
    "Mexico City Grand Prix",
    "São Paulo Grand Prix",
    "Las Vegas Grand Prix",
    "Qatar Grand Prix",
    "Abu Dhabi Grand Prix",
];
