pub mod accounting;
pub mod errors;
pub mod payment;
pub mod processor;
pub mod processor_client;
pub mod queue;
pub mod repository;
pub mod retry_policy;
pub mod summary;
