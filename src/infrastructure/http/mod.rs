pub mod buffer_pool;
pub mod processor_client;
