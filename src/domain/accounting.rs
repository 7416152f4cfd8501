use crate::domain::payment::Payment;
use crate::domain::processor::Processor;

/// Record that `processor` accepted the payment `correlation_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountingEvent {
	pub processor:        Processor,
	pub correlation_id:   String,
	pub amount:           f64,
	pub timestamp_millis: i64,
}

impl AccountingEvent {
	pub fn accepted_by(processor: Processor, payment: &Payment) -> Self {
		Self {
			processor,
			correlation_id: payment.correlation_id.clone(),
			amount: payment.amount,
			timestamp_millis: payment.requested_at_millis(),
		}
	}
}
