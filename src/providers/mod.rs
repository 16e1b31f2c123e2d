//! Data source provider implementations

pub mod local;

pub use local::{FixtureLocation, LocalDataSourceProvider};
