use log::warn;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::use_cases::dto::{CreatePaymentCommand, GetPaymentSummaryQuery};

/// Body of `POST /payments`. The correlation id is opaque and forwarded
/// verbatim.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PaymentPayload {
	pub correlation_id: String,
	pub amount:         f64,
}

impl From<&PaymentPayload> for CreatePaymentCommand {
	fn from(payload: &PaymentPayload) -> Self {
		Self {
			correlation_id: payload.correlation_id.clone(),
			amount:         payload.amount,
		}
	}
}

#[derive(Debug, Serialize)]
pub struct PaymentAccepted {
	pub payment: PaymentPayload,
	pub status:  &'static str,
}

/// Query of `GET /payments-summary`. Bounds are inclusive RFC 3339 instants
/// and stay raw here; a bound that does not parse counts as absent.
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct SummaryWindow {
	#[serde(default)]
	pub from: Option<String>,
	#[serde(default)]
	pub to:   Option<String>,
}

impl From<SummaryWindow> for GetPaymentSummaryQuery {
	fn from(window: SummaryWindow) -> Self {
		Self {
			from: window.from.as_deref().and_then(parse_bound),
			to:   window.to.as_deref().and_then(parse_bound),
		}
	}
}

/// An unencoded `+hh:mm` offset reaches us as ` hh:mm`, so a failed parse is
/// retried with spaces read back as `+`.
fn parse_bound(raw: &str) -> Option<OffsetDateTime> {
	let raw = raw.trim_start();
	OffsetDateTime::parse(raw, &Rfc3339)
		.or_else(|_| OffsetDateTime::parse(&raw.replace(' ', "+"), &Rfc3339))
		.inspect_err(|e| warn!("Ignoring unparseable summary bound {raw:?}: {e}"))
		.ok()
}

#[derive(Debug, Serialize)]
pub struct PurgeOutcome {
	pub status: &'static str,
}
