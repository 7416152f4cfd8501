use std::time::Duration;

/// Bounded retry schedule applied to the default processor before the
/// fallback is tried.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
	max_attempts: u32,
	delay:        Duration,
	max_delay:    Duration,
}

impl RetryPolicy {
	/// `max_attempts` attempts separated by a constant `delay`.
	pub fn fixed(max_attempts: u32, delay: Duration) -> Self {
		Self {
			max_attempts: max_attempts.max(1),
			delay,
			max_delay: delay,
		}
	}

	/// Delay doubles after every attempt, capped at `max_delay`.
	pub fn exponential(
		max_attempts: u32,
		initial_delay: Duration,
		max_delay: Duration,
	) -> Self {
		Self {
			max_attempts: max_attempts.max(1),
			delay: initial_delay,
			max_delay: max_delay.max(initial_delay),
		}
	}

	/// A single attempt, no retries.
	pub fn no_retry() -> Self {
		Self::fixed(1, Duration::ZERO)
	}

	pub fn max_attempts(&self) -> u32 {
		self.max_attempts
	}

	/// Whether another attempt may follow attempt number `attempt` (1-based).
	pub fn allows_retry_after(&self, attempt: u32) -> bool {
		attempt < self.max_attempts
	}

	/// Pause to observe after attempt number `attempt` (1-based) failed.
	pub fn delay_after(&self, attempt: u32) -> Duration {
		if self.delay == self.max_delay {
			return self.delay;
		}
		let exponent = attempt.saturating_sub(1).min(31);
		self.delay
			.checked_mul(1u32 << exponent)
			.map_or(self.max_delay, |delay| delay.min(self.max_delay))
	}
}

impl Default for RetryPolicy {
	fn default() -> Self {
		Self::fixed(5, Duration::from_millis(100))
	}
}
