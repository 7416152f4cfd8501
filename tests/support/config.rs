use rinha_gateway::infrastructure::config::settings::Config;

/// Settings sized for tests: small pools, short delays.
pub fn test_config(redis_url: &str, default_url: &str, fallback_url: &str) -> Config {
	Config {
		redis_url: redis_url.to_string(),
		default_payment_processor_url: default_url.to_string(),
		fallback_payment_processor_url: fallback_url.to_string(),
		server_port: 0,
		server_keepalive: 5,
		queue_capacity: 10_000,
		workers: 8,
		max_concurrent_requests: 8,
		processor_timeout_ms: 1_000,
		default_max_attempts: 3,
		retry_delay_ms: 10,
		retry_max_delay_ms: 10,
		batch_size: 1_000,
		batch_interval_ms: 100,
		batch_channel_capacity: 10_000,
		purge_on_startup: false,
		report_url: None,
	}
}
