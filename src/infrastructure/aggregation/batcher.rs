//! Coalesces accounting events into batched writes to the summary store.
//!
//! ```text
//! [Dispatch workers] ──try_send──► [bounded channel] ──► [batching loop] ──► [store]
//!        │                                                    ▲
//!        └──── channel full or closed: direct single write ───┘
//! ```
//!
//! The loop flushes when the batch reaches `batch_size` or when the periodic
//! tick fires with a non-empty batch, whichever happens first. When every
//! [`AggregationBatcher`] handle is dropped the loop flushes what is left and
//! exits.

use std::time::Duration;

use log::{debug, error, info, warn};
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::mpsc::{self, Receiver, Sender};
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};

use crate::domain::accounting::AccountingEvent;
use crate::domain::repository::SummaryRepository;
use crate::infrastructure::config::settings::Config;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatchSettings {
	pub batch_size:       usize,
	pub interval:         Duration,
	pub channel_capacity: usize,
}

impl Default for BatchSettings {
	fn default() -> Self {
		Self {
			batch_size:       1_000,
			interval:         Duration::from_millis(100),
			channel_capacity: 10_000,
		}
	}
}

impl From<&Config> for BatchSettings {
	fn from(config: &Config) -> Self {
		Self {
			batch_size:       config.batch_size.max(1),
			interval:         config.batch_interval(),
			channel_capacity: config.batch_channel_capacity.max(1),
		}
	}
}

/// Which path an event took into the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestPath {
	/// Queued for the batching loop.
	Batched,
	/// Channel full or closed; written on its own by the caller.
	Direct,
}

#[derive(Clone)]
pub struct AggregationBatcher<R: SummaryRepository> {
	sender:     Sender<AccountingEvent>,
	repository: R,
}

impl<R: SummaryRepository + Clone> AggregationBatcher<R> {
	/// Starts the batching loop and returns the ingest handle together with the
	/// loop's task.
	pub fn spawn(repository: R, settings: BatchSettings) -> (Self, JoinHandle<()>) {
		let (sender, receiver) = mpsc::channel(settings.channel_capacity.max(1));
		let handle =
			tokio::spawn(run_batching_loop(receiver, repository.clone(), settings));

		(Self { sender, repository }, handle)
	}

	pub async fn record(&self, event: AccountingEvent) -> IngestPath {
		match self.sender.try_send(event) {
			Ok(()) => IngestPath::Batched,
			Err(TrySendError::Full(event)) => {
				warn!(
					"Accounting channel full, writing {} directly",
					event.correlation_id
				);
				self.write_direct(event).await;
				IngestPath::Direct
			}
			Err(TrySendError::Closed(event)) => {
				warn!(
					"Batching loop stopped, writing {} directly",
					event.correlation_id
				);
				self.write_direct(event).await;
				IngestPath::Direct
			}
		}
	}

	async fn write_direct(&self, event: AccountingEvent) {
		if let Err(e) = self
			.repository
			.record_batch(std::slice::from_ref(&event))
			.await
		{
			error!(
				"Accounting for payment {} by {} lost: {e}",
				event.correlation_id, event.processor
			);
		}
	}
}

async fn run_batching_loop<R: SummaryRepository>(
	mut receiver: Receiver<AccountingEvent>,
	repository: R,
	settings: BatchSettings,
) {
	let mut batch: Vec<AccountingEvent> = Vec::with_capacity(settings.batch_size);
	let mut ticker = interval(settings.interval);
	ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

	info!(
		"Aggregation batcher started (batch_size={}, interval={:?})",
		settings.batch_size, settings.interval
	);

	loop {
		tokio::select! {
			event = receiver.recv() => match event {
				Some(event) => {
					batch.push(event);
					if batch.len() >= settings.batch_size {
						flush(&repository, &mut batch).await;
					}
				}
				None => {
					flush(&repository, &mut batch).await;
					break;
				}
			},
			_ = ticker.tick() => {
				if !batch.is_empty() {
					flush(&repository, &mut batch).await;
				}
			}
		}
	}

	info!("Aggregation batcher stopped");
}

/// Writes `batch` and clears it, keeping its allocation. A failed write is
/// logged and the events are dropped.
async fn flush<R: SummaryRepository>(repository: &R, batch: &mut Vec<AccountingEvent>) {
	if batch.is_empty() {
		return;
	}

	match repository.record_batch(batch).await {
		Ok(()) => debug!("Flushed {} accounting events", batch.len()),
		Err(e) => error!("Lost a batch of {} accounting events: {e}", batch.len()),
	}
	batch.clear();
}
