//! Shared types and models for the Sistema WMS inventory backend
//!
//! This crate contains request DTOs, domain enums, and pure helpers shared
//! between the backend and other components of the system.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
