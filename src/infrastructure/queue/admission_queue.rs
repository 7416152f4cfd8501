use std::sync::Arc;

use log::warn;
use tokio::sync::Mutex;
use tokio::sync::mpsc::{self, Receiver, Sender};
use tokio::sync::mpsc::error::TrySendError;

use crate::domain::errors::GatewayError;
use crate::domain::payment::PaymentRequest;
use crate::domain::queue::Queue;

/// Fixed-capacity in-memory queue between ingress and the dispatch workers.
#[derive(Clone)]
pub struct AdmissionQueue {
	sender: Sender<PaymentRequest>,
}

/// Consumer half shared by every dispatch worker.
#[derive(Clone)]
pub struct AdmissionReceiver {
	receiver: Arc<Mutex<Receiver<PaymentRequest>>>,
}

impl AdmissionQueue {
	pub fn bounded(capacity: usize) -> (Self, AdmissionReceiver) {
		let (sender, receiver) = mpsc::channel(capacity.max(1));
		(
			Self { sender },
			AdmissionReceiver {
				receiver: Arc::new(Mutex::new(receiver)),
			},
		)
	}

	pub fn capacity(&self) -> usize {
		self.sender.max_capacity()
	}

	pub fn len(&self) -> usize {
		self.sender.max_capacity() - self.sender.capacity()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

impl Queue<PaymentRequest> for AdmissionQueue {
	fn submit(&self, message: PaymentRequest) -> Result<(), GatewayError> {
		match self.sender.try_send(message) {
			Ok(()) => Ok(()),
			Err(TrySendError::Full(_)) => Err(GatewayError::AdmissionRejected),
			Err(TrySendError::Closed(payment)) => {
				warn!(
					"Admission queue is closed, rejecting payment {}",
					payment.correlation_id
				);
				Err(GatewayError::AdmissionRejected)
			}
		}
	}
}

impl AdmissionReceiver {
	/// Waits for the next admitted payment. `None` once every
	/// `AdmissionQueue` handle has been dropped and the queue is drained.
	pub async fn next(&self) -> Option<PaymentRequest> {
		self.receiver.lock().await.recv().await
	}
}
