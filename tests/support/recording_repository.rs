use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rinha_gateway::domain::accounting::AccountingEvent;
use rinha_gateway::domain::errors::GatewayError;
use rinha_gateway::domain::processor::Processor;
use rinha_gateway::domain::repository::SummaryRepository;
use rinha_gateway::domain::summary::SummaryData;
use rinha_gateway::infrastructure::persistence::in_memory_summary_repository::InMemorySummaryRepository;
use time::OffsetDateTime;

/// In-memory store that remembers the size of every write attempt and can
/// be told to fail.
#[derive(Clone, Default)]
pub struct RecordingSummaryRepository {
	pub inner:   InMemorySummaryRepository,
	batch_sizes: Arc<Mutex<Vec<usize>>>,
	failing:     Arc<AtomicBool>,
}

impl RecordingSummaryRepository {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn set_failing(&self, failing: bool) {
		self.failing.store(failing, Ordering::SeqCst);
	}

	pub fn batch_sizes(&self) -> Vec<usize> {
		self.batch_sizes.lock().unwrap().clone()
	}

	pub fn recorded(&self, processor: Processor) -> usize {
		self.inner.recorded(processor)
	}

	fn check(&self, operation: &str) -> Result<(), String> {
		if self.failing.load(Ordering::SeqCst) {
			return Err(format!("{operation}: connection refused"));
		}
		Ok(())
	}
}

#[async_trait]
impl SummaryRepository for RecordingSummaryRepository {
	async fn record_batch(
		&self,
		events: &[AccountingEvent],
	) -> Result<(), GatewayError> {
		let outcome = self.check("record_batch");
		self.batch_sizes.lock().unwrap().push(events.len());
		outcome.map_err(GatewayError::store_write)?;
		self.inner.record_batch(events).await
	}

	async fn summary_of(
		&self,
		processor: Processor,
		from: OffsetDateTime,
		to: OffsetDateTime,
	) -> Result<SummaryData, GatewayError> {
		self.check("summary_of").map_err(GatewayError::store_read)?;
		self.inner.summary_of(processor, from, to).await
	}

	async fn clear(&self) -> Result<(), GatewayError> {
		self.check("clear").map_err(GatewayError::store_write)?;
		self.inner.clear().await
	}
}
