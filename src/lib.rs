pub mod client;
pub mod config;
pub mod error;
pub mod features;
pub mod model;
pub mod observability;
pub mod preprocessing;
pub mod server;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export common types
pub use error::PredictionError;
pub use features::FeatureRecord;
pub use model::Artifacts;
