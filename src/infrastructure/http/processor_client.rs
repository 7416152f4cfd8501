use std::sync::Arc;

use async_trait::async_trait;
use bytes::BufMut;
use log::debug;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use tokio::sync::Semaphore;

use crate::domain::errors::GatewayError;
use crate::domain::payment::Payment;
use crate::domain::processor::{Processor, ProcessorEndpoints};
use crate::domain::processor_client::PaymentProcessorClient;
use crate::infrastructure::http::buffer_pool::BufferPool;

/// Forwards payments to the processors over HTTP.
///
/// At most `max_concurrent_requests` calls are in flight at any time,
/// across both processors. The request timeout is configured on the
/// underlying `reqwest::Client`.
#[derive(Clone)]
pub struct HttpPaymentProcessorClient {
	http_client: Client,
	endpoints:   ProcessorEndpoints,
	limiter:     Arc<Semaphore>,
	buffers:     Arc<BufferPool>,
}

impl HttpPaymentProcessorClient {
	pub fn new(
		http_client: Client,
		endpoints: ProcessorEndpoints,
		max_concurrent_requests: usize,
	) -> Self {
		let permits = max_concurrent_requests.max(1);
		Self {
			http_client,
			endpoints,
			limiter: Arc::new(Semaphore::new(permits)),
			buffers: Arc::new(BufferPool::new(permits)),
		}
	}

	pub fn available_permits(&self) -> usize {
		self.limiter.available_permits()
	}

	/// POSTs `payment` to `{endpoint}/payments`. Success means status 200
	/// exactly.
	pub async fn forward_to(
		&self,
		payment: &Payment,
		endpoint: &str,
	) -> Result<(), String> {
		// Held until the call resolves, whatever the outcome.
		let _permit = self
			.limiter
			.acquire()
			.await
			.map_err(|e| format!("concurrency limiter closed: {e}"))?;

		let mut buffer = self.buffers.acquire();
		if let Err(e) = serde_json::to_writer((&mut buffer).writer(), payment) {
			self.buffers.release(buffer);
			return Err(format!("failed to serialize payment: {e}"));
		}
		let body = buffer.split().freeze();

		let result = self
			.http_client
			.post(format!("{endpoint}/payments"))
			.header(CONTENT_TYPE, "application/json")
			.body(body)
			.send()
			.await;
		self.buffers.release(buffer);

		match result {
			Ok(resp) if resp.status() == StatusCode::OK => {
				debug!(
					"Payment {} accepted by {endpoint}",
					payment.correlation_id
				);
				Ok(())
			}
			Ok(resp) => Err(format!("status {}", resp.status())),
			Err(e) if e.is_timeout() => Err(format!("timed out: {e}")),
			Err(e) => Err(format!("transport error: {e}")),
		}
	}
}

#[async_trait]
impl PaymentProcessorClient for HttpPaymentProcessorClient {
	async fn forward(
		&self,
		payment: &Payment,
		processor: Processor,
	) -> Result<(), GatewayError> {
		self.forward_to(payment, self.endpoints.url_of(processor))
			.await
			.map_err(|reason| GatewayError::rejected_by(processor, reason))
	}
}
