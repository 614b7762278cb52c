//! Planner configuration: a fully enumerated JSON structure, validated at
//! load. A missing or mistyped key aborts the run before any assignment work;
//! this is the only fatal error class in the planner.

use std::fmt;
use std::fs;

use serde::Deserialize;

fn default_country() -> String {
    "Germany".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlannerConfig {
    /// Credential for the routing service.
    pub api_key: String,
    /// Address all commute calculations pivot on.
    pub school_address: String,
    /// Country appended to postal-code fallback queries.
    #[serde(default = "default_country")]
    pub country: String,
    /// Postal-code prefix defining the regional-affinity area.
    pub regional_prefix: String,
    pub scoring: ScoringWeights,
    pub travel_thresholds: TravelThresholds,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringWeights {
    /// Bonus when the staff member teaches the student's class.
    pub class_match: f64,
    pub travel_excellent: f64,
    pub travel_good: f64,
    pub travel_acceptable: f64,
    pub travel_long_penalty: f64,
    pub travel_very_long_penalty: f64,
    /// Bonus when home and institution share the regional postal prefix.
    pub regional: f64,
    /// Bonus when the staff member already supervises at the institution.
    pub continuity: f64,
    /// Penalty per assignment beyond the target caseload.
    pub over_target_penalty: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TravelThresholds {
    pub excellent_max_min: f64,
    pub good_max_min: f64,
    pub acceptable_max_min: f64,
    pub long_min: f64,
    pub very_long_min: f64,
}

#[derive(Debug)]
pub enum ConfigError {
    Read(std::io::Error),
    Parse(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read(err) => write!(f, "failed to read config file: {err}"),
            Self::Parse(err) => write!(f, "failed to parse config: {err}"),
            Self::Invalid(detail) => write!(f, "invalid config: {detail}"),
        }
    }
}

pub fn load_config(path: &str) -> Result<PlannerConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(ConfigError::Read)?;
    let config: PlannerConfig = serde_json::from_str(&raw).map_err(ConfigError::Parse)?;
    config.validate()?;
    Ok(config)
}

impl PlannerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.travel_thresholds;
        if !(t.excellent_max_min < t.good_max_min && t.good_max_min < t.acceptable_max_min) {
            return Err(ConfigError::Invalid(
                "travel bonus thresholds must increase: excellent < good < acceptable".to_string(),
            ));
        }
        if t.long_min >= t.very_long_min {
            return Err(ConfigError::Invalid(
                "travel penalty thresholds must increase: long < very_long".to_string(),
            ));
        }

        let w = &self.scoring;
        let weights = [
            ("class_match", w.class_match),
            ("travel_excellent", w.travel_excellent),
            ("travel_good", w.travel_good),
            ("travel_acceptable", w.travel_acceptable),
            ("travel_long_penalty", w.travel_long_penalty),
            ("travel_very_long_penalty", w.travel_very_long_penalty),
            ("regional", w.regional),
            ("continuity", w.continuity),
            ("over_target_penalty", w.over_target_penalty),
        ];
        for (name, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "scoring weight '{name}' must be finite and non-negative, got {value}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::PlannerConfig;

    fn sample_json() -> serde_json::Value {
        serde_json::json!({
            "api_key": "test-key",
            "school_address": "Paradeplatz 3, 24768 Rendsburg",
            "regional_prefix": "247",
            "scoring": {
                "class_match": 50.0,
                "travel_excellent": 30.0,
                "travel_good": 20.0,
                "travel_acceptable": 10.0,
                "travel_long_penalty": 10.0,
                "travel_very_long_penalty": 25.0,
                "regional": 15.0,
                "continuity": 25.0,
                "over_target_penalty": 20.0
            },
            "travel_thresholds": {
                "excellent_max_min": 20.0,
                "good_max_min": 35.0,
                "acceptable_max_min": 50.0,
                "long_min": 60.0,
                "very_long_min": 90.0
            }
        })
    }

    #[test]
    fn parses_and_validates_complete_config() {
        let config: PlannerConfig = serde_json::from_value(sample_json()).expect("should parse");
        assert!(config.validate().is_ok());
        assert_eq!(config.country, "Germany");
        assert_eq!(config.regional_prefix, "247");
    }

    #[test]
    fn missing_scoring_key_fails_at_parse() {
        let mut json = sample_json();
        json["scoring"]
            .as_object_mut()
            .unwrap()
            .remove("continuity");
        let result: Result<PlannerConfig, _> = serde_json::from_value(json);
        assert!(result.is_err());
    }

    #[test]
    fn missing_threshold_key_fails_at_parse() {
        let mut json = sample_json();
        json["travel_thresholds"]
            .as_object_mut()
            .unwrap()
            .remove("very_long_min");
        let result: Result<PlannerConfig, _> = serde_json::from_value(json);
        assert!(result.is_err());
    }

    #[test]
    fn non_increasing_bonus_thresholds_are_rejected() {
        let mut json = sample_json();
        json["travel_thresholds"]["good_max_min"] = serde_json::json!(15.0);
        let config: PlannerConfig = serde_json::from_value(json).expect("should parse");
        assert!(config.validate().is_err());
    }

    #[test]
    fn non_increasing_penalty_thresholds_are_rejected() {
        let mut json = sample_json();
        json["travel_thresholds"]["very_long_min"] = serde_json::json!(60.0);
        let config: PlannerConfig = serde_json::from_value(json).expect("should parse");
        assert!(config.validate().is_err());
    }

    #[test]
    fn negative_weight_is_rejected() {
        let mut json = sample_json();
        json["scoring"]["regional"] = serde_json::json!(-1.0);
        let config: PlannerConfig = serde_json::from_value(json).expect("should parse");
        assert!(config.validate().is_err());
    }

    #[test]
    fn country_can_be_overridden() {
        let mut json = sample_json();
        json["country"] = serde_json::json!("Denmark");
        let config: PlannerConfig = serde_json::from_value(json).expect("should parse");
        assert_eq!(config.country, "Denmark");
    }
}
