use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use log::{error, info};
use time::OffsetDateTime;
use tokio::task::JoinHandle;

use crate::domain::processor_client::PaymentProcessorClient;
use crate::domain::repository::SummaryRepository;
use crate::infrastructure::queue::admission_queue::AdmissionReceiver;
use crate::use_cases::process_payment::ProcessPaymentUseCase;

/// `workers` tasks, each taking one payment at a time from the admission queue
/// and running it through the selection policy.
pub struct DispatchWorkerPool<C, R>
where
	C: PaymentProcessorClient + Clone,
	R: SummaryRepository + Clone,
{
	receiver:                 AdmissionReceiver,
	process_payment_use_case: ProcessPaymentUseCase<C, R>,
	workers:                  usize,
}

impl<C, R> DispatchWorkerPool<C, R>
where
	C: PaymentProcessorClient + Clone,
	R: SummaryRepository + Clone,
{
	pub fn new(
		receiver: AdmissionReceiver,
		process_payment_use_case: ProcessPaymentUseCase<C, R>,
		workers: usize,
	) -> Self {
		Self {
			receiver,
			process_payment_use_case,
			workers: workers.max(1),
		}
	}

	/// Workers exit once the admission queue is closed and drained.
	pub fn spawn(self) -> Vec<JoinHandle<()>> {
		info!("Starting {} payment dispatch workers", self.workers);
		(0..self.workers)
			.map(|worker_id| {
				tokio::spawn(payment_dispatch_worker(
					worker_id,
					self.receiver.clone(),
					self.process_payment_use_case.clone(),
				))
			})
			.collect()
	}
}

pub async fn payment_dispatch_worker<C, R>(
	worker_id: usize,
	receiver: AdmissionReceiver,
	process_payment_use_case: ProcessPaymentUseCase<C, R>,
) where
	C: PaymentProcessorClient + Clone,
	R: SummaryRepository + Clone,
{
	while let Some(request) = receiver.next().await {
		let correlation_id = request.correlation_id.clone();
		let payment = request.accept_at(OffsetDateTime::now_utc());

		let outcome = AssertUnwindSafe(process_payment_use_case.execute(payment))
			.catch_unwind()
			.await;

		match outcome {
			Ok(Ok(_)) => {}
			Ok(Err(e)) => error!("Dropping payment {correlation_id}: {e}"),
			Err(_) => error!(
				"Worker {worker_id} panicked while dispatching payment \
				 {correlation_id}; continuing"
			),
		}
	}

	info!("Dispatch worker {worker_id} stopped: admission queue closed");
}
