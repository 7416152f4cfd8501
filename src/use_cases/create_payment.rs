use crate::domain::errors::GatewayError;
use crate::domain::payment::PaymentRequest;
use crate::domain::queue::Queue;
use crate::use_cases::dto::CreatePaymentCommand;

#[derive(Clone)]
pub struct CreatePaymentUseCase<Q: Queue<PaymentRequest>> {
	payment_queue: Q,
}

impl<Q: Queue<PaymentRequest>> CreatePaymentUseCase<Q> {
	pub fn new(payment_queue: Q) -> Self {
		Self { payment_queue }
	}

	/// Validates and admits the payment without waiting on the queue.
	pub fn execute(&self, command: CreatePaymentCommand) -> Result<(), GatewayError> {
		if command.correlation_id.trim().is_empty() {
			return Err(GatewayError::InvalidPayment {
				reason: "correlationId must not be empty".to_string(),
			});
		}
		if !command.amount.is_finite() || command.amount <= 0.0 {
			return Err(GatewayError::InvalidPayment {
				reason: format!("amount must be positive, got {}", command.amount),
			});
		}

		self.payment_queue
			.submit(PaymentRequest::new(command.correlation_id, command.amount))
	}
}
