use std::time::Duration;

use futures::future::join_all;
use log::{error, info, warn};
use tokio::task::JoinHandle;

use crate::domain::processor_client::PaymentProcessorClient;
use crate::domain::repository::SummaryRepository;
use crate::infrastructure::aggregation::batcher::{AggregationBatcher, BatchSettings};
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::queue::admission_queue::AdmissionQueue;
use crate::infrastructure::workers::dispatch_worker_pool::DispatchWorkerPool;
use crate::use_cases::process_payment::ProcessPaymentUseCase;

/// Background tasks behind the admission queue: the dispatch workers and the
/// aggregation batcher.
pub struct DispatchPipeline {
	worker_handles: Vec<JoinHandle<()>>,
	batcher_handle: JoinHandle<()>,
}

impl DispatchPipeline {
	/// Spawns the batcher and `config.workers` dispatch workers, returning the
	/// admission queue that feeds them.
	pub fn start<C, R>(
		config: &Config,
		processor_client: C,
		repository: R,
	) -> (AdmissionQueue, Self)
	where
		C: PaymentProcessorClient + Clone,
		R: SummaryRepository + Clone,
	{
		let (batcher, batcher_handle) =
			AggregationBatcher::spawn(repository, BatchSettings::from(config));

		let (admission_queue, admission_receiver) =
			AdmissionQueue::bounded(config.queue_capacity);
		let process_payment_use_case = ProcessPaymentUseCase::new(
			processor_client,
			batcher,
			config.retry_policy(),
		);
		let worker_handles = DispatchWorkerPool::new(
			admission_receiver,
			process_payment_use_case,
			config.workers,
		)
		.spawn();

		(admission_queue, Self {
			worker_handles,
			batcher_handle,
		})
	}

	/// Waits for queued payments to be dispatched and the last batch to be
	/// flushed. Every `AdmissionQueue` handle must be dropped first, otherwise
	/// this returns `false` once `timeout` elapses.
	pub async fn drain(self, timeout: Duration) -> bool {
		let Self {
			worker_handles,
			batcher_handle,
		} = self;

		let drained = tokio::time::timeout(timeout, async {
			join_all(worker_handles).await;
			batcher_handle.await
		})
		.await;

		match drained {
			Ok(Ok(())) => {
				info!("Dispatch pipeline drained");
				true
			}
			Ok(Err(e)) => {
				error!("Aggregation batcher ended abnormally: {e}");
				false
			}
			Err(_) => {
				warn!("Dispatch pipeline did not drain within {timeout:?}");
				false
			}
		}
	}
}
