//! Adapters: concrete implementations of the ports plus the terminal
//! rendering surface.

pub mod api;
pub mod mock;
pub mod terminal;

pub use api::HttpPredictionService;
pub use mock::MockPredictionService;
