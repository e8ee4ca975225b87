//! Application layer: session orchestration over the domain and ports.

mod wizard_controller;

pub use wizard_controller::{SubmitError, WizardController};
