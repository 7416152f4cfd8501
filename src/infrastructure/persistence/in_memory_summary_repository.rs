use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use time::OffsetDateTime;

use crate::domain::accounting::AccountingEvent;
use crate::domain::errors::GatewayError;
use crate::domain::payment::unix_millis;
use crate::domain::processor::Processor;
use crate::domain::repository::SummaryRepository;
use crate::domain::summary::SummaryData;

#[derive(Default)]
struct ProcessorLedger {
	amounts: HashMap<String, f64>,
	scores:  HashMap<String, i64>,
	history: BTreeSet<(i64, String)>,
}

impl ProcessorLedger {
	fn record(&mut self, event: &AccountingEvent) {
		self.amounts
			.insert(event.correlation_id.clone(), event.amount);
		if let Some(previous) = self
			.scores
			.insert(event.correlation_id.clone(), event.timestamp_millis)
		{
			self.history.remove(&(previous, event.correlation_id.clone()));
		}
		self.history
			.insert((event.timestamp_millis, event.correlation_id.clone()));
	}

	fn summary(&self, from: i64, to: i64) -> SummaryData {
		if from > to {
			return SummaryData::default();
		}
		SummaryData::from_amounts(
			self.history
				.range((from, String::new())..)
				.take_while(|(score, _)| *score <= to)
				.filter_map(|(_, id)| self.amounts.get(id).copied()),
		)
	}
}

/// Process-local summary store with the same overwrite-by-key semantics as the
/// Redis adapter.
#[derive(Clone, Default)]
pub struct InMemorySummaryRepository {
	ledgers: Arc<RwLock<HashMap<Processor, ProcessorLedger>>>,
}

impl InMemorySummaryRepository {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn recorded(&self, processor: Processor) -> usize {
		self.ledgers
			.read()
			.unwrap_or_else(PoisonError::into_inner)
			.get(&processor)
			.map_or(0, |ledger| ledger.amounts.len())
	}

	pub fn contains(&self, processor: Processor, correlation_id: &str) -> bool {
		self.ledgers
			.read()
			.unwrap_or_else(PoisonError::into_inner)
			.get(&processor)
			.is_some_and(|ledger| ledger.amounts.contains_key(correlation_id))
	}
}

#[async_trait]
impl SummaryRepository for InMemorySummaryRepository {
	async fn record_batch(
		&self,
		events: &[AccountingEvent],
	) -> Result<(), GatewayError> {
		let mut ledgers =
			self.ledgers.write().unwrap_or_else(PoisonError::into_inner);
		for event in events {
			ledgers.entry(event.processor).or_default().record(event);
		}
		Ok(())
	}

	async fn summary_of(
		&self,
		processor: Processor,
		from: OffsetDateTime,
		to: OffsetDateTime,
	) -> Result<SummaryData, GatewayError> {
		let ledgers = self.ledgers.read().unwrap_or_else(PoisonError::into_inner);
		Ok(ledgers
			.get(&processor)
			.map(|ledger| ledger.summary(unix_millis(from), unix_millis(to)))
			.unwrap_or_default())
	}

	async fn clear(&self) -> Result<(), GatewayError> {
		self.ledgers
			.write()
			.unwrap_or_else(PoisonError::into_inner)
			.clear();
		Ok(())
	}
}
