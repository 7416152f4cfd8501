use async_trait::async_trait;

use crate::domain::errors::GatewayError;
use crate::domain::payment::Payment;
use crate::domain::processor::Processor;

#[async_trait]
pub trait PaymentProcessorClient: Send + Sync + 'static {
	/// `Ok(())` only when `processor` answered 200. Every other outcome is
	/// `GatewayError::ProcessorRejected`.
	async fn forward(
		&self,
		payment: &Payment,
		processor: Processor,
	) -> Result<(), GatewayError>;
}
