use crate::server::types::{HealthResponse, ModelInfoResponse, PredictResponse};
use chrono::{DateTime, Local};

use super::ClientError;

pub fn prediction(response: &PredictResponse, at: DateTime<Local>) -> String {
    let mut out = String::from("Prediction Successful!\n");
    out.push_str(&format!("  Predicted Sales:  {:.2}\n", response.prediction));
    out.push_str(&format!("  Model Type:       {}\n", response.model_type));
    out.push_str(&format!(
        "  Prediction Time:  {}\n",
        at.format("%Y-%m-%d %H:%M:%S")
    ));
    if let Some(probabilities) = &response.prediction_probabilities {
        let formatted: Vec<String> = probabilities.iter().map(|p| format!("{p:.3}")).collect();
        out.push_str(&format!("  Probabilities:    [{}]\n", formatted.join(", ")));
    }
    out
}

pub fn model_info(info: &ModelInfoResponse) -> String {
    let mut out = format!(
        "Model Type:          {}\nModel Loaded:        {}\nPreprocessor Loaded: {}\nFeatures:\n",
        info.model_type,
        yes_no(info.model_loaded),
        yes_no(info.preprocessor_loaded)
    );
    for feature in &info.features {
        out.push_str(&format!("  - {feature}\n"));
    }
    out
}

pub fn health(health: &HealthResponse) -> String {
    format!(
        "{}: {} (model loaded: {}, preprocessor loaded: {})\n",
        health.message,
        health.status,
        yes_no(health.model_loaded),
        yes_no(health.preprocessor_loaded)
    )
}

/// The single failure outcome shown inline.
pub fn failure(error: &ClientError) -> String {
    format!("Prediction failed: {error}\n")
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::Map;

    fn response(probabilities: Option<Vec<f64>>) -> PredictResponse {
        PredictResponse {
            prediction: 3412.456,
            input_data: Map::new(),
            timestamp: "2026-10-19T08:00:00Z".to_string(),
            model_type: "RandomForestRegressor".to_string(),
            prediction_probabilities: probabilities,
        }
    }

    #[test]
    fn test_prediction_shows_value_model_and_time() {
        let at = Local.with_ymd_and_hms(2026, 10, 19, 9, 30, 0).unwrap();
        let text = prediction(&response(None), at);
        assert!(text.contains("3412.46"));
        assert!(text.contains("RandomForestRegressor"));
        assert!(text.contains("2026-10-19 09:30:00"));
        assert!(!text.contains("Probabilities"));
    }

    #[test]
    fn test_prediction_shows_probabilities() {
        let at = Local.with_ymd_and_hms(2026, 10, 19, 9, 30, 0).unwrap();
        let text = prediction(&response(Some(vec![0.25, 0.75])), at);
        assert!(text.contains("[0.250, 0.750]"));
    }

    #[test]
    fn test_failure_is_inline() {
        let error = ClientError::Status {
            status: 500,
            body: "{\"error\":\"Prediction failed\"}".to_string(),
        };
        let text = failure(&error);
        assert!(text.starts_with("Prediction failed: API Error: 500"));
    }
}
