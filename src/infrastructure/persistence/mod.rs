pub mod in_memory_summary_repository;
pub mod redis_summary_repository;
