//! Infrastructure layer: read-model storage, fixture seeding, configuration.

pub mod config;
pub mod fixtures;
pub mod read_model;
