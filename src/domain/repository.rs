use std::sync::Arc;

use async_trait::async_trait;
use time::OffsetDateTime;

use crate::domain::accounting::AccountingEvent;
use crate::domain::errors::GatewayError;
use crate::domain::processor::Processor;
use crate::domain::summary::SummaryData;

#[async_trait]
pub trait SummaryRepository: Send + Sync + 'static {
	/// Writes every event in one round trip. Writes are keyed by correlation
	/// id, so replaying a batch leaves the store unchanged.
	async fn record_batch(
		&self,
		events: &[AccountingEvent],
	) -> Result<(), GatewayError>;

	async fn summary_of(
		&self,
		processor: Processor,
		from: OffsetDateTime,
		to: OffsetDateTime,
	) -> Result<SummaryData, GatewayError>;

	async fn clear(&self) -> Result<(), GatewayError>;
}

pub type SharedSummaryRepository = Arc<dyn SummaryRepository>;

#[async_trait]
impl<T: SummaryRepository + ?Sized> SummaryRepository for Arc<T> {
	async fn record_batch(
		&self,
		events: &[AccountingEvent],
	) -> Result<(), GatewayError> {
		(**self).record_batch(events).await
	}

	async fn summary_of(
		&self,
		processor: Processor,
		from: OffsetDateTime,
		to: OffsetDateTime,
	) -> Result<SummaryData, GatewayError> {
		(**self).summary_of(processor, from, to).await
	}

	async fn clear(&self) -> Result<(), GatewayError> {
		(**self).clear().await
	}
}
