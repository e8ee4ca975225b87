//! Ports: interfaces the application layer depends on, implemented by
//! adapters.

mod prediction_service;

pub use prediction_service::{PredictionError, PredictionService};
