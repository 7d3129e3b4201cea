use crate::config::ArtifactConfig;
use crate::features::{
    FeatureRecord, PRODUCT_TYPES, STORE_LOCATION_TYPES, STORE_SIZES, STORE_TYPES, SUGAR_CONTENTS,
};
use crate::model::linear::{LinearHead, LinearModel};
use crate::model::Artifacts;
use crate::preprocessing::{ColumnStep, ColumnTransformer};
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;

pub(crate) fn sample_body() -> Value {
    json!({
        "Product_Weight": 19.2,
        "Product_Sugar_Content": "Low Fat",
        "Product_Visibility": 0.073,
        "Product_Type": "Dairy",
        "Product_MRP": 226.8,
        "Store_Size": "Medium",
        "Store_Location_Type": "Tier 1",
        "Store_Type": "Supermarket Type1"
    })
}

pub(crate) fn sample_record() -> FeatureRecord {
    serde_json::from_value(sample_body()).unwrap()
}

fn one_hot(column: &str, categories: &[&str]) -> ColumnStep {
    ColumnStep::OneHot {
        column: column.to_string(),
        categories: categories.iter().map(|c| c.to_string()).collect(),
    }
}

fn scaler(column: &str, mean: f64, scale: f64) -> ColumnStep {
    ColumnStep::StandardScaler {
        column: column.to_string(),
        mean,
        scale,
    }
}

/// Scales the three numeric features and one-hot encodes the rest: 31 outputs.
pub(crate) fn sample_transformer() -> ColumnTransformer {
    ColumnTransformer::new(vec![
        scaler("Product_Weight", 12.5, 4.5),
        scaler("Product_Visibility", 0.0625, 0.03125),
        scaler("Product_MRP", 147.0, 30.0),
        one_hot("Product_Sugar_Content", &SUGAR_CONTENTS),
        one_hot("Product_Type", &PRODUCT_TYPES),
        one_hot("Store_Size", &STORE_SIZES),
        one_hot("Store_Location_Type", &STORE_LOCATION_TYPES),
        one_hot("Store_Type", &STORE_TYPES),
    ])
    .unwrap()
}

pub(crate) fn sample_estimator() -> LinearModel {
    LinearModel {
        model_type: "LinearRegression".to_string(),
        head: LinearHead::Regressor,
        coefficients: (0..31).map(|i| (i % 5) as f64 * 25.0).collect(),
        intercept: 3000.0,
    }
}

pub(crate) fn sample_classifier() -> LinearModel {
    LinearModel {
        model_type: "LogisticRegression".to_string(),
        head: LinearHead::Classifier { classes: [0.0, 1.0] },
        coefficients: (0..31).map(|i| if i < 3 { 0.5 } else { 0.0 }).collect(),
        intercept: -0.25,
    }
}

pub(crate) fn sample_artifacts() -> Artifacts {
    Artifacts::new(
        Some(Arc::new(sample_transformer())),
        Some(Arc::new(sample_estimator())),
    )
}

/// Writes the sample transformer and estimator as JSON artifacts into `dir`.
pub(crate) fn write_artifacts(dir: &Path) -> ArtifactConfig {
    let config = ArtifactConfig {
        model_path: dir.join("superkart_model.json"),
        preprocessor_path: dir.join("superkart_preprocessor.json"),
    };
    std::fs::write(
        &config.model_path,
        serde_json::to_string(&sample_estimator()).unwrap(),
    )
    .unwrap();
    std::fs::write(
        &config.preprocessor_path,
        serde_json::to_string(&sample_transformer()).unwrap(),
    )
    .unwrap();
    config
}
