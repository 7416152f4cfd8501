pub mod dispatch_pipeline;
pub mod dispatch_worker_pool;
