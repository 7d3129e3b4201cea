//! The fixed 8-field input schema shared by the service and the client.
//!
//! The service only checks presence and JSON type. Numeric bounds and the
//! enumerated choices are enforced client-side before a request is sent.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::PredictionError;

pub const PRODUCT_WEIGHT: &str = "Product_Weight";
pub const PRODUCT_SUGAR_CONTENT: &str = "Product_Sugar_Content";
pub const PRODUCT_VISIBILITY: &str = "Product_Visibility";
pub const PRODUCT_TYPE: &str = "Product_Type";
pub const PRODUCT_MRP: &str = "Product_MRP";
pub const STORE_SIZE: &str = "Store_Size";
pub const STORE_LOCATION_TYPE: &str = "Store_Location_Type";
pub const STORE_TYPE: &str = "Store_Type";

/// Required features, in schema order.
pub const FEATURE_NAMES: [&str; 8] = [
    PRODUCT_WEIGHT,
    PRODUCT_SUGAR_CONTENT,
    PRODUCT_VISIBILITY,
    PRODUCT_TYPE,
    PRODUCT_MRP,
    STORE_SIZE,
    STORE_LOCATION_TYPE,
    STORE_TYPE,
];

pub const FEATURE_DESCRIPTIONS: [(&str, &str); 8] = [
    (PRODUCT_WEIGHT, "Weight of the product"),
    (PRODUCT_SUGAR_CONTENT, "Sugar content (Low Fat/Regular)"),
    (PRODUCT_VISIBILITY, "Product visibility in store"),
    (PRODUCT_TYPE, "Type/category of product"),
    (PRODUCT_MRP, "Maximum Retail Price"),
    (STORE_SIZE, "Size of the store (Small/Medium/High)"),
    (STORE_LOCATION_TYPE, "Location type (Tier 1/Tier 2/Tier 3)"),
    (
        STORE_TYPE,
        "Type of store (Grocery Store/Supermarket Type1/etc)",
    ),
];

pub const SUGAR_CONTENTS: [&str; 2] = ["Low Fat", "Regular"];

pub const PRODUCT_TYPES: [&str; 16] = [
    "Dairy",
    "Soft Drinks",
    "Meat",
    "Fruits and Vegetables",
    "Household",
    "Baking Goods",
    "Snack Foods",
    "Frozen Foods",
    "Breakfast",
    "Health and Hygiene",
    "Hard Drinks",
    "Canned",
    "Breads",
    "Starchy Foods",
    "Others",
    "Seafood",
];

pub const STORE_SIZES: [&str; 3] = ["Small", "Medium", "High"];

pub const STORE_LOCATION_TYPES: [&str; 3] = ["Tier 1", "Tier 2", "Tier 3"];

pub const STORE_TYPES: [&str; 4] = [
    "Grocery Store",
    "Supermarket Type1",
    "Supermarket Type2",
    "Supermarket Type3",
];

/// Inclusive bounds for a numeric feature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericDomain {
    pub min: f64,
    pub max: f64,
}

impl NumericDomain {
    pub fn contains(&self, value: f64) -> bool {
        value.is_finite() && value >= self.min && value <= self.max
    }
}

pub const PRODUCT_WEIGHT_DOMAIN: NumericDomain = NumericDomain { min: 0.1, max: 100.0 };
pub const PRODUCT_VISIBILITY_DOMAIN: NumericDomain = NumericDomain { min: 0.0, max: 1.0 };
pub const PRODUCT_MRP_DOMAIN: NumericDomain = NumericDomain { min: 1.0, max: 500.0 };

/// A borrowed view of one feature value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeatureValue<'a> {
    Number(f64),
    Category(&'a str),
}

/// A complete, typed prediction request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    #[serde(rename = "Product_Weight")]
    pub product_weight: f64,
    #[serde(rename = "Product_Sugar_Content")]
    pub product_sugar_content: String,
    #[serde(rename = "Product_Visibility")]
    pub product_visibility: f64,
    #[serde(rename = "Product_Type")]
    pub product_type: String,
    #[serde(rename = "Product_MRP")]
    pub product_mrp: f64,
    #[serde(rename = "Store_Size")]
    pub store_size: String,
    #[serde(rename = "Store_Location_Type")]
    pub store_location_type: String,
    #[serde(rename = "Store_Type")]
    pub store_type: String,
}

/// Features absent or null in `data`, in schema order.
pub fn missing_features(data: &Map<String, Value>) -> Vec<String> {
    FEATURE_NAMES
        .iter()
        .filter(|name| data.get(**name).map_or(true, Value::is_null))
        .map(|name| name.to_string())
        .collect()
}

impl FeatureRecord {
    /// Validates presence first, then JSON types.
    pub fn from_json(data: &Map<String, Value>) -> Result<Self, PredictionError> {
        let missing = missing_features(data);
        if !missing.is_empty() {
            return Err(PredictionError::MissingFeatures(missing));
        }

        Ok(Self {
            product_weight: number(data, PRODUCT_WEIGHT)?,
            product_sugar_content: category(data, PRODUCT_SUGAR_CONTENT)?,
            product_visibility: number(data, PRODUCT_VISIBILITY)?,
            product_type: category(data, PRODUCT_TYPE)?,
            product_mrp: number(data, PRODUCT_MRP)?,
            store_size: category(data, STORE_SIZE)?,
            store_location_type: category(data, STORE_LOCATION_TYPE)?,
            store_type: category(data, STORE_TYPE)?,
        })
    }

    /// Looks up a feature by its wire name.
    pub fn get(&self, column: &str) -> Option<FeatureValue<'_>> {
        let value = match column {
            PRODUCT_WEIGHT => FeatureValue::Number(self.product_weight),
            PRODUCT_SUGAR_CONTENT => FeatureValue::Category(&self.product_sugar_content),
            PRODUCT_VISIBILITY => FeatureValue::Number(self.product_visibility),
            PRODUCT_TYPE => FeatureValue::Category(&self.product_type),
            PRODUCT_MRP => FeatureValue::Number(self.product_mrp),
            STORE_SIZE => FeatureValue::Category(&self.store_size),
            STORE_LOCATION_TYPE => FeatureValue::Category(&self.store_location_type),
            STORE_TYPE => FeatureValue::Category(&self.store_type),
            _ => return None,
        };
        Some(value)
    }
}

fn number(data: &Map<String, Value>, feature: &str) -> Result<f64, PredictionError> {
    data.get(feature)
        .and_then(Value::as_f64)
        .ok_or_else(|| PredictionError::InvalidFeature {
            feature: feature.to_string(),
            expected: "a number",
        })
}

fn category(data: &Map<String, Value>, feature: &str) -> Result<String, PredictionError> {
    data.get(feature)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| PredictionError::InvalidFeature {
            feature: feature.to_string(),
            expected: "a string",
        })
}
