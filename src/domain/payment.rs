use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A payment as admitted at ingress, before any worker has picked it up.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PaymentRequest {
	pub correlation_id: String,
	pub amount:         f64,
}

impl PaymentRequest {
	pub fn new(correlation_id: impl Into<String>, amount: f64) -> Self {
		Self {
			correlation_id: correlation_id.into(),
			amount,
		}
	}

	/// Stamps the request with the moment a worker accepted it, truncated to
	/// millisecond precision.
	pub fn accept_at(self, at: OffsetDateTime) -> Payment {
		let requested_at = at
			.to_offset(time::UtcOffset::UTC)
			.replace_nanosecond(u32::from(at.millisecond()) * 1_000_000)
			.unwrap_or(at);

		Payment {
			correlation_id: self.correlation_id,
			amount: self.amount,
			requested_at,
		}
	}
}

/// The body forwarded to a processor: `{correlationId, amount, requestedAt}`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
	pub correlation_id: String,
	pub amount:         f64,
	#[serde(with = "time::serde::rfc3339")]
	pub requested_at:   OffsetDateTime,
}

impl Payment {
	pub fn requested_at_millis(&self) -> i64 {
		unix_millis(self.requested_at)
	}
}

pub fn unix_millis(at: OffsetDateTime) -> i64 {
	(at.unix_timestamp_nanos() / 1_000_000) as i64
}
