use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize, Serialize, Clone, Copy, PartialEq)]
pub struct SummaryData {
	#[serde(rename = "totalRequests")]
	pub total_requests: u64,
	#[serde(rename = "totalAmount")]
	pub total_amount:   f64,
}

impl SummaryData {
	/// Counts and sums `amounts`, rounding the total to cents (half away from
	/// zero).
	pub fn from_amounts(amounts: impl IntoIterator<Item = f64>) -> Self {
		let (total_requests, total_amount) = amounts
			.into_iter()
			.fold((0u64, 0.0f64), |(count, sum), amount| (count + 1, sum + amount));

		Self {
			total_requests,
			total_amount: round_to_cents(total_amount),
		}
	}
}

#[derive(Debug, Default, Deserialize, Serialize, Clone, Copy, PartialEq)]
pub struct PaymentsSummary {
	pub default:  SummaryData,
	pub fallback: SummaryData,
}

pub fn round_to_cents(amount: f64) -> f64 {
	(amount * 100.0).round() / 100.0
}
