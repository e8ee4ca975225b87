//! Loan Sherpa - Interactive Loan Approval Prediction Wizard
//!
//! This crate implements a four-step application wizard that collects a
//! loan applicant's financial profile, submits it to a remote prediction
//! service, and renders the returned decision analysis.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
