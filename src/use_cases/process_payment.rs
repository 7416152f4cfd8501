use log::{debug, warn};
use tokio::time::sleep;

use crate::domain::accounting::AccountingEvent;
use crate::domain::errors::GatewayError;
use crate::domain::payment::Payment;
use crate::domain::processor::Processor;
use crate::domain::processor_client::PaymentProcessorClient;
use crate::domain::repository::SummaryRepository;
use crate::domain::retry_policy::RetryPolicy;
use crate::infrastructure::aggregation::batcher::AggregationBatcher;

/// Selection policy: the default processor under `retry_policy`, then the
/// fallback exactly once. Exactly one accounting event is emitted, and only
/// for the processor that answered 200.
#[derive(Clone)]
pub struct ProcessPaymentUseCase<C, R>
where
	C: PaymentProcessorClient + Clone,
	R: SummaryRepository + Clone,
{
	processor_client: C,
	batcher:          AggregationBatcher<R>,
	retry_policy:     RetryPolicy,
}

impl<C, R> ProcessPaymentUseCase<C, R>
where
	C: PaymentProcessorClient + Clone,
	R: SummaryRepository + Clone,
{
	pub fn new(
		processor_client: C,
		batcher: AggregationBatcher<R>,
		retry_policy: RetryPolicy,
	) -> Self {
		Self {
			processor_client,
			batcher,
			retry_policy,
		}
	}

	/// Returns the processor that accepted the payment, or
	/// `BothProcessorsFailed` after which nothing is accounted.
	pub async fn execute(&self, payment: Payment) -> Result<Processor, GatewayError> {
		let mut attempt = 1;
		loop {
			match self
				.processor_client
				.forward(&payment, Processor::Default)
				.await
			{
				Ok(()) => return Ok(self.account(Processor::Default, &payment).await),
				Err(e) => warn!(
					"Payment {} attempt {attempt}/{}: {e}",
					payment.correlation_id,
					self.retry_policy.max_attempts()
				),
			}

			if !self.retry_policy.allows_retry_after(attempt) {
				break;
			}
			sleep(self.retry_policy.delay_after(attempt)).await;
			attempt += 1;
		}

		match self
			.processor_client
			.forward(&payment, Processor::Fallback)
			.await
		{
			Ok(()) => Ok(self.account(Processor::Fallback, &payment).await),
			Err(e) => {
				warn!("Payment {}: {e}", payment.correlation_id);
				Err(GatewayError::BothProcessorsFailed {
					correlation_id: payment.correlation_id,
				})
			}
		}
	}

	async fn account(&self, processor: Processor, payment: &Payment) -> Processor {
		let path = self
			.batcher
			.record(AccountingEvent::accepted_by(processor, payment))
			.await;
		debug!(
			"Payment {} processed by {processor} ({path:?})",
			payment.correlation_id
		);
		processor
	}
}
