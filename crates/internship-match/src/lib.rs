//! Candidate scoring, ranking and quota-constrained allotment for limited-capacity positions.

pub mod config;
pub mod engine;
pub mod error;
pub mod telemetry;
