use derive_more::derive::{Display, Error};

use crate::domain::processor::Processor;

#[derive(Debug, Display, Error, Clone, PartialEq)]
pub enum GatewayError {
	#[display("Admission queue is full.")]
	AdmissionRejected,
	#[display("Invalid payment: {reason}")]
	InvalidPayment { reason: String },
	#[display("{processor} processor rejected the payment: {reason}")]
	ProcessorRejected {
		processor: Processor,
		reason:    String,
	},
	#[display("Payment {correlation_id} was rejected by every processor.")]
	BothProcessorsFailed { correlation_id: String },
	#[display("Could not write to the summary store: {reason}")]
	StoreWriteFailed { reason: String },
	#[display("Could not read from the summary store: {reason}")]
	StoreReadFailed { reason: String },
}

impl GatewayError {
	pub fn store_write(err: impl std::fmt::Display) -> Self {
		GatewayError::StoreWriteFailed {
			reason: err.to_string(),
		}
	}

	pub fn store_read(err: impl std::fmt::Display) -> Self {
		GatewayError::StoreReadFailed {
			reason: err.to_string(),
		}
	}

	pub fn rejected_by(processor: Processor, reason: impl Into<String>) -> Self {
		GatewayError::ProcessorRejected {
			processor,
			reason: reason.into(),
		}
	}
}
