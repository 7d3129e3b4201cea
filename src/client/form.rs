//! Input collection for the prediction client.
//!
//! Mirrors the dashboard's controls: numeric fields are bounded steppers and
//! the categorical fields are fixed choice lists. A form only turns into a
//! request once every value is inside its domain.

use crate::features::{
    FeatureRecord, NumericDomain, PRODUCT_MRP, PRODUCT_MRP_DOMAIN, PRODUCT_SUGAR_CONTENT,
    PRODUCT_TYPE, PRODUCT_TYPES, PRODUCT_VISIBILITY, PRODUCT_VISIBILITY_DOMAIN, PRODUCT_WEIGHT,
    PRODUCT_WEIGHT_DOMAIN, STORE_LOCATION_TYPE, STORE_LOCATION_TYPES, STORE_SIZE, STORE_SIZES,
    STORE_TYPE, STORE_TYPES, SUGAR_CONTENTS,
};

use super::ClientError;

#[derive(Debug, Clone, PartialEq)]
pub struct PredictionForm {
    pub product_weight: f64,
    pub product_sugar_content: String,
    pub product_visibility: f64,
    pub product_type: String,
    pub product_mrp: f64,
    pub store_size: String,
    pub store_location_type: String,
    pub store_type: String,
}

impl Default for PredictionForm {
    fn default() -> Self {
        Self {
            product_weight: 19.2,
            product_sugar_content: SUGAR_CONTENTS[0].to_string(),
            product_visibility: 0.073,
            product_type: PRODUCT_TYPES[0].to_string(),
            product_mrp: 226.8,
            store_size: STORE_SIZES[0].to_string(),
            store_location_type: STORE_LOCATION_TYPES[0].to_string(),
            store_type: STORE_TYPES[0].to_string(),
        }
    }
}

fn check_range(field: &'static str, value: f64, domain: NumericDomain) -> Result<f64, ClientError> {
    if domain.contains(value) {
        Ok(value)
    } else {
        Err(ClientError::OutOfRange {
            field,
            value,
            min: domain.min,
            max: domain.max,
        })
    }
}

fn check_choice(field: &'static str, value: &str, choices: &[&str]) -> Result<String, ClientError> {
    if choices.contains(&value) {
        Ok(value.to_string())
    } else {
        Err(ClientError::UnknownChoice {
            field,
            value: value.to_string(),
            choices: choices.join(", "),
        })
    }
}

impl PredictionForm {
    /// Sets a field by its wire name, parsing numeric input.
    pub fn set(&mut self, field: &str, raw: &str) -> Result<(), ClientError> {
        let number = |field: &'static str| {
            raw.trim()
                .parse::<f64>()
                .map_err(|_| ClientError::NotANumber {
                    field,
                    value: raw.to_string(),
                })
        };

        match field {
            PRODUCT_WEIGHT => self.product_weight = number(PRODUCT_WEIGHT)?,
            PRODUCT_VISIBILITY => self.product_visibility = number(PRODUCT_VISIBILITY)?,
            PRODUCT_MRP => self.product_mrp = number(PRODUCT_MRP)?,
            PRODUCT_SUGAR_CONTENT => self.product_sugar_content = raw.to_string(),
            PRODUCT_TYPE => self.product_type = raw.to_string(),
            STORE_SIZE => self.store_size = raw.to_string(),
            STORE_LOCATION_TYPE => self.store_location_type = raw.to_string(),
            STORE_TYPE => self.store_type = raw.to_string(),
            other => return Err(ClientError::UnknownField(other.to_string())),
        }
        Ok(())
    }

    /// Checks every domain and assembles exactly the 8 request fields.
    pub fn to_record(&self) -> Result<FeatureRecord, ClientError> {
        Ok(FeatureRecord {
            product_weight: check_range(PRODUCT_WEIGHT, self.product_weight, PRODUCT_WEIGHT_DOMAIN)?,
            product_sugar_content: check_choice(
                PRODUCT_SUGAR_CONTENT,
                &self.product_sugar_content,
                &SUGAR_CONTENTS,
            )?,
            product_visibility: check_range(
                PRODUCT_VISIBILITY,
                self.product_visibility,
                PRODUCT_VISIBILITY_DOMAIN,
            )?,
            product_type: check_choice(PRODUCT_TYPE, &self.product_type, &PRODUCT_TYPES)?,
            product_mrp: check_range(PRODUCT_MRP, self.product_mrp, PRODUCT_MRP_DOMAIN)?,
            store_size: check_choice(STORE_SIZE, &self.store_size, &STORE_SIZES)?,
            store_location_type: check_choice(
                STORE_LOCATION_TYPE,
                &self.store_location_type,
                &STORE_LOCATION_TYPES,
            )?,
            store_type: check_choice(STORE_TYPE, &self.store_type, &STORE_TYPES)?,
        })
    }
}
