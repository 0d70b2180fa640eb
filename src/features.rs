//! Builds the name -> value feature frame each model variant expects from a
//! validated request, and orders it into the model input vector.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use crate::config;
use crate::error::ApiError;
use crate::types::{ModelVariant, PredictionRequest};

/// Ephemeral per-request feature mapping. Never persisted.
pub struct FeatureFrame {
    values: HashMap<&'static str, f32>,
}

impl FeatureFrame {
    /// Orders the frame into the authoritative input vector for a schema.
    /// A schema name missing from the frame is an encoding bug, not a model
    /// fault, and is reported as such.
    pub fn ordered(&self, feature_list: &[&'static str]) -> Result<Vec<f32>, ApiError> {
        feature_list
            .iter()
            .map(|name| {
                self.values
                    .get(name)
                    .copied()
                    .ok_or_else(|| ApiError::Encoding(format!("missing feature '{name}'")))
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn get(&self, name: &str) -> Option<f32> {
        self.values.get(name).copied()
    }
}

/// Placeholder label encoding: a stable string hash folded into 0..1000.
/// The training pipeline fitted a label encoder instead, so these codes do
/// not line up with training-time codes. Kept to preserve the served
/// interface until re-trained artifacts ship with their encoder tables.
fn hash_label(value: &str) -> f32 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    (hasher.finish() % 1000) as f32
}

/// Builds the feature frame for the variant the request selected. Single
/// season carries the round within the season (defaulting to 1); multi season
/// swaps that for the year and adds the red-flag state.
pub fn encode(request: &PredictionRequest) -> FeatureFrame {
    let mut values = HashMap::new();

    values.insert("TyreLife", request.tyre_life as f32);
    values.insert("FreshTyre", request.fresh_tyre as f32);
    values.insert("Position", request.position as f32);
    values.insert("Stint", request.stint as f32);
    values.insert("SpeedFL", request.speed_fl as f32);
    values.insert("LapTime_seconds", request.lap_time_seconds as f32);
    values.insert("has_safety_car", request.has_safety_car as f32);
    values.insert("has_vsc", request.has_vsc as f32);
    values.insert("has_yellow", request.has_yellow as f32);
    values.insert(
        "Compound_encoded",
        config::compound_code(request.compound) as f32,
    );
    values.insert("Driver_encoded", hash_label(&request.driver));
    values.insert("RaceName_encoded", hash_label(&request.race_name));

    match request.model_type {
        ModelVariant::Single => {
            values.insert("race_round", request.race_round.unwrap_or(1) as f32);
        }
        ModelVariant::Multi => {
            values.insert("Year", request.year as f32);
            values.insert("has_red_flag", request.has_red_flag as f32);
        }
    }

    FeatureFrame { values }
}
