use std::time::Duration;

use serde::Deserialize;

use crate::domain::processor::ProcessorEndpoints;
use crate::domain::retry_policy::RetryPolicy;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
	pub redis_url: String,
	pub default_payment_processor_url: String,
	pub fallback_payment_processor_url: String,
	pub server_port: u16,
	pub server_keepalive: u64,
	pub queue_capacity: usize,
	pub workers: usize,
	pub max_concurrent_requests: usize,
	pub processor_timeout_ms: u64,
	pub default_max_attempts: u32,
	pub retry_delay_ms: u64,
	pub retry_max_delay_ms: u64,
	pub batch_size: usize,
	pub batch_interval_ms: u64,
	pub batch_channel_capacity: usize,
	pub purge_on_startup: bool,
	pub report_url: Option<String>,
}

impl Config {
	pub fn load() -> Result<Self, config::ConfigError> {
		let config_builder = config::Config::builder()
			.set_default("redis_url", "redis://127.0.0.1:6379/")?
			.set_default(
				"default_payment_processor_url",
				"http://payment-processor-default:8080",
			)?
			.set_default(
				"fallback_payment_processor_url",
				"http://payment-processor-fallback:8080",
			)?
			.set_default("server_port", 9999)?
			.set_default("server_keepalive", 75)?
			.set_default("queue_capacity", 100_000)?
			.set_default("workers", 30)?
			.set_default("max_concurrent_requests", 30)?
			.set_default("processor_timeout_ms", 5_000)?
			.set_default("default_max_attempts", 5)?
			.set_default("retry_delay_ms", 100)?
			.set_default("retry_max_delay_ms", 100)?
			.set_default("batch_size", 1_000)?
			.set_default("batch_interval_ms", 100)?
			.set_default("batch_channel_capacity", 10_000)?
			.set_default("purge_on_startup", true)?
			.add_source(config::Environment::with_prefix("APP"))
			.build()?;

		config_builder.try_deserialize()
	}

	pub fn processor_endpoints(&self) -> ProcessorEndpoints {
		ProcessorEndpoints::new(
			self.default_payment_processor_url.as_str(),
			self.fallback_payment_processor_url.as_str(),
		)
	}

	pub fn processor_timeout(&self) -> Duration {
		Duration::from_millis(self.processor_timeout_ms)
	}

	pub fn retry_policy(&self) -> RetryPolicy {
		RetryPolicy::exponential(
			self.default_max_attempts,
			Duration::from_millis(self.retry_delay_ms),
			Duration::from_millis(self.retry_max_delay_ms),
		)
	}

	pub fn batch_interval(&self) -> Duration {
		Duration::from_millis(self.batch_interval_ms)
	}
}

#[cfg(test)]
mod tests {
	use std::env;

	use super::*;

	const OVERRIDDEN: [(&str, &str); 6] = [
		("APP_REDIS_URL", "redis://test_redis/"),
		("APP_DEFAULT_PAYMENT_PROCESSOR_URL", "http://test_default/"),
		("APP_FALLBACK_PAYMENT_PROCESSOR_URL", "http://test_fallback/"),
		("APP_SERVER_KEEPALIVE", "120"),
		("APP_WORKERS", "8"),
		("APP_REPORT_URL", "/tmp/reports"),
	];

	#[test]
	fn test_config_load() {
		// Both phases share one test so the env mutations cannot interleave.
		unsafe {
			for (key, _) in OVERRIDDEN {
				env::remove_var(key);
			}
		}

		let config = Config::load().expect("Failed to load config in test");

		assert_eq!(config.redis_url, "redis://127.0.0.1:6379/");
		assert_eq!(config.server_port, 9999);
		assert_eq!(config.queue_capacity, 100_000);
		assert_eq!(config.workers, 30);
		assert_eq!(config.max_concurrent_requests, 30);
		assert_eq!(config.batch_size, 1_000);
		assert_eq!(config.batch_interval(), Duration::from_millis(100));
		assert_eq!(config.processor_timeout(), Duration::from_secs(5));
		assert_eq!(
			config.retry_policy(),
			RetryPolicy::fixed(5, Duration::from_millis(100))
		);
		assert!(config.purge_on_startup);
		assert_eq!(config.report_url, None);

		unsafe {
			for (key, value) in OVERRIDDEN {
				env::set_var(key, value);
			}
		}

		let config = Config::load().expect("Failed to load config in test");

		assert_eq!(config.redis_url, "redis://test_redis/");
		assert_eq!(config.default_payment_processor_url, "http://test_default/");
		assert_eq!(
			config.processor_endpoints().url_of(
				crate::domain::processor::Processor::Fallback
			),
			"http://test_fallback"
		);
		assert_eq!(config.server_keepalive, 120);
		assert_eq!(config.workers, 8);
		assert_eq!(config.report_url, Some("/tmp/reports".to_string()));

		unsafe {
			for (key, _) in OVERRIDDEN {
				env::remove_var(key);
			}
		}
	}
}
