use serde::{Deserialize, Serialize};

use crate::config;
use crate::error::FieldViolation;

/// Tyre compound. Closed set; anything else fails deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Compound {
    Soft,
    Medium,
    Hard,
    Intermediate,
    Wet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelVariant {
    #[default]
    Single,
    Multi,
}

fn default_year() -> i64 {
    2024
}

/// One inference request. Built fresh per call, dropped once the response is
/// out. Numeric bounds are enforced by `validate`, the closed string sets by
/// serde.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictionRequest {
    /// Laps on the current set of tyres.
    pub tyre_life: i64,
    /// 1 if the set went on fresh, 0 if used.
    pub fresh_tyre: i64,
    pub position: i64,
    pub stint: i64,
    /// Speed trap on the fastest lap, km/h.
    pub speed_fl: f64,
    pub lap_time_seconds: f64,
    #[serde(default)]
    pub has_safety_car: i64,
    #[serde(default)]
    pub has_vsc: i64,
    #[serde(default)]
    pub has_red_flag: i64,
    #[serde(default)]
    pub has_yellow: i64,
    pub compound: Compound,
    /// Driver three-letter code, e.g. "VER".
    pub driver: String,
    /// Race name, e.g. "Monaco Grand Prix".
    pub race_name: String,
    #[serde(default = "default_year")]
    pub year: i64,
    #[serde(default)]
    pub model_type: ModelVariant,
    /// Round within the season; defaults to 1 for the single-season schema.
    #[serde(default)]
    pub race_round: Option<i64>,
}

impl PredictionRequest {
    /// Checks every numeric bound and returns the full list of violations,
    /// not just the first one.
    pub fn validate(&self) -> Result<(), Vec<FieldViolation>> {
        let mut violations = Vec::new();

        let mut check_int = |field: &'static str, value: i64, lo: i64, hi: i64| {
            if value < lo || value > hi {
                violations.push(FieldViolation::new(
                    field,
                    format!("must be between {lo} and {hi}, got {value}"),
                ));
            }
        };

        check_int("tyre_life", self.tyre_life, 1, 50);
        check_int("fresh_tyre", self.fresh_tyre, 0, 1);
        check_int("position", self.position, 1, 20);
        check_int("stint", self.stint, 1, 5);
        check_int("has_safety_car", self.has_safety_car, 0, 1);
        check_int("has_vsc", self.has_vsc, 0, 1);
        check_int("has_red_flag", self.has_red_flag, 0, 1);
        check_int("has_yellow", self.has_yellow, 0, 1);
        check_int("year", self.year, 2020, 2025);
        if let Some(round) = self.race_round {
            check_int("race_round", round, 1, 24);
        }

        if !(0.0..=400.0).contains(&self.speed_fl) {
            violations.push(FieldViolation::new(
                "speed_fl",
                format!("must be between 0 and 400, got {}", self.speed_fl),
            ));
        }
        if !(60.0..=200.0).contains(&self.lap_time_seconds) {
            violations.push(FieldViolation::new(
                "lap_time_seconds",
                format!("must be between 60 and 200, got {}", self.lap_time_seconds),
            ));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Alternative {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub lap: i64,
    pub risk_level: &'static str,
    pub advantage: &'static str,
}

/// Echo of the request fields the pit wall cares about.
#[derive(Debug, Serialize)]
pub struct InputSummary {
    pub driver: String,
    pub race: String,
    pub position: i64,
    pub stint: i64,
    pub tyre_life: i64,
    pub compound: Compound,
}

#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub optimal_lap: f64,
    pub confidence: f64,
    pub model_used: ModelVariant,
    pub mae: f64,
    pub prediction_lower: f64,
    pub prediction_upper: f64,
    pub alternatives: Vec<Alternative>,
    pub input_summary: InputSummary,
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

impl PredictionResponse {
    /// Shapes the raw model scalar into the response envelope. The error band
    /// and confidence are the static per-variant constants; the alternatives
    /// are fixed offsets from the rounded point prediction.
    pub fn assemble(prediction: f64, request: &PredictionRequest) -> Self {
        let variant = request.model_type;
        let mae = config::mae(variant);
        let base = prediction.round() as i64;

        let alternatives = config::STRATEGY_ALTERNATIVES
            .iter()
            .map(|&(kind, offset, risk_level, advantage)| Alternative {
                kind,
                lap: base + offset,
                risk_level,
                advantage,
            })
            .collect();

        PredictionResponse {
            optimal_lap: round1(prediction),
            confidence: config::confidence(variant),
            model_used: variant,
            mae,
            prediction_lower: round1(prediction - mae),
            prediction_upper: round1(prediction + mae),
            alternatives,
            input_summary: InputSummary {
                driver: request.driver.clone(),
                race: request.race_name.clone(),
                position: request.position,
                stint: request.stint,
                tyre_life: request.tyre_life,
                compound: request.compound,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ModelsLoaded {
    #[serde(rename = "single-year")]
    pub single_year: bool,
    #[serde(rename = "multi-year")]
    pub multi_year: bool,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub models_loaded: ModelsLoaded,
}

impl HealthResponse {
    /// Startup is all-or-nothing, so a process that reached any handler has
    /// both models loaded. The per-model booleans keep the wire shape.
    pub fn up() -> Self {
        HealthResponse {
            status: config::API_STATUS,
            message: config::API_MESSAGE,
            models_loaded: ModelsLoaded {
                single_year: true,
                multi_year: true,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_request() -> PredictionRequest {
        PredictionRequest {
            tyre_life: 10,
            fresh_tyre: 1,
            position: 3,
            stint: 2,
            speed_fl: 310.5,
            lap_time_seconds: 92.3,
            has_safety_car: 0,
            has_vsc: 0,
            has_red_flag: 0,
            has_yellow: 0,
            compound: Compound::Medium,
            driver: "VER".to_string(),
            race_name: "Monaco Grand Prix".to_string(),
            year: 2024,
            model_type: ModelVariant::Single,
            race_round: None,
        }
    }

    #[test]
    fn valid_request_passes_validation() {
        assert!(sample_request().validate().is_ok());
    }

    #[test]
    fn out_of_range_position_is_rejected() {
        let mut req = sample_request();
        req.position = 25;
        let violations = req.validate().unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "position");
    }

    #[test]
    fn all_violations_are_collected() {
        let mut req = sample_request();
        req.tyre_life = 0;
        req.stint = 9;
        req.lap_time_seconds = 30.0;
        let violations = req.validate().unwrap_err();
        let fields: Vec<_> = violations.iter().map(|v| v.field).collect();
        assert_eq!(fields, vec!["tyre_life", "stint", "lap_time_seconds"]);
    }

    #[test]
    fn race_round_bound_only_applies_when_present() {
        let mut req = sample_request();
        req.race_round = Some(25);
        assert!(req.validate().is_err());
        req.race_round = None;
        assert!(req.validate().is_ok());
    }

    #[test]
    fn missing_optional_fields_take_defaults() {
        let req: PredictionRequest = serde_json::from_value(serde_json::json!({
            "tyre_life": 10,
            "fresh_tyre": 1,
            "position": 3,
            "stint": 2,
            "speed_fl": 310.5,
            "lap_time_seconds": 92.3,
            "compound": "MEDIUM",
            "driver": "VER",
            "race_name": "Monaco Grand Prix"
        }))
        .unwrap();
        assert_eq!(req.model_type, ModelVariant::Single);
        assert_eq!(req.year, 2024);
        assert_eq!(req.has_safety_car, 0);
        assert_eq!(req.race_round, None);
    }

    #[test]
    fn unknown_compound_fails_deserialization() {
        let result: Result<Compound, _> = serde_json::from_str("\"SUPERSOFT\"");
        assert!(result.is_err());
    }

    #[test]
    fn model_variant_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ModelVariant::Single).unwrap(),
            "\"single\""
        );
        assert_eq!(
            serde_json::to_string(&ModelVariant::Multi).unwrap(),
            "\"multi\""
        );
    }

    #[test]
    fn response_envelope_uses_single_season_constants() {
        let resp = PredictionResponse::assemble(31.62, &sample_request());
        assert_eq!(resp.optimal_lap, 31.6);
        assert_eq!(resp.mae, 4.47);
        assert_eq!(resp.confidence, 0.851);
        assert_eq!(resp.model_used, ModelVariant::Single);
        assert_eq!(resp.prediction_lower, round1(31.62 - 4.47));
        assert_eq!(resp.prediction_upper, round1(31.62 + 4.47));
    }

    #[test]
    fn response_envelope_uses_multi_season_constants() {
        let mut req = sample_request();
        req.model_type = ModelVariant::Multi;
        let resp = PredictionResponse::assemble(28.0, &req);
        assert_eq!(resp.mae, 5.36);
        assert_eq!(resp.confidence, 0.772);
        assert_eq!(resp.model_used, ModelVariant::Multi);
        assert_eq!(resp.prediction_lower, 22.6);
        assert_eq!(resp.prediction_upper, 33.4);
    }

    #[test]
    fn alternatives_are_fixed_offsets_from_rounded_prediction() {
        let resp = PredictionResponse::assemble(30.4, &sample_request());
        assert_eq!(resp.alternatives.len(), 3);
        let laps: Vec<_> = resp.alternatives.iter().map(|a| a.lap).collect();
        assert_eq!(laps, vec![26, 30, 34]);
        let kinds: Vec<_> = resp.alternatives.iter().map(|a| a.kind).collect();
        assert_eq!(kinds, vec!["Aggressive", "Optimal", "Conservative"]);
        let risks: Vec<_> = resp.alternatives.iter().map(|a| a.risk_level).collect();
        assert_eq!(risks, vec!["HIGH", "MEDIUM", "LOW"]);
    }

    #[test]
    fn input_summary_echoes_the_request() {
        let resp = PredictionResponse::assemble(30.0, &sample_request());
        assert_eq!(resp.input_summary.driver, "VER");
        assert_eq!(resp.input_summary.race, "Monaco Grand Prix");
        assert_eq!(resp.input_summary.position, 3);
        assert_eq!(resp.input_summary.compound, Compound::Medium);
    }
}
