pub mod aggregation;
pub mod config;
pub mod http;
pub mod persistence;
pub mod queue;
pub mod workers;
