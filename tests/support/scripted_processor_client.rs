use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rinha_gateway::domain::errors::GatewayError;
use rinha_gateway::domain::payment::Payment;
use rinha_gateway::domain::processor::Processor;
use rinha_gateway::domain::processor_client::PaymentProcessorClient;

#[derive(Debug, Clone, Copy)]
pub enum Behaviour {
	Accept,
	Reject,
	/// Rejects the first `n` calls, then accepts.
	RejectTimes(u32),
}

/// In-process stand-in for the processors, scripted per processor.
#[derive(Clone)]
pub struct ScriptedProcessorClient {
	default:  Arc<Mutex<Behaviour>>,
	fallback: Arc<Mutex<Behaviour>>,
	calls:    Arc<Mutex<Vec<(Processor, String)>>>,
	panic_on: Option<String>,
}

impl ScriptedProcessorClient {
	pub fn new(default: Behaviour, fallback: Behaviour) -> Self {
		Self {
			default:  Arc::new(Mutex::new(default)),
			fallback: Arc::new(Mutex::new(fallback)),
			calls:    Arc::new(Mutex::new(Vec::new())),
			panic_on: None,
		}
	}

	/// Panics while forwarding the payment with this correlation id.
	pub fn panicking_on(mut self, correlation_id: &str) -> Self {
		self.panic_on = Some(correlation_id.to_string());
		self
	}

	pub fn calls_to(&self, processor: Processor) -> usize {
		self.calls
			.lock()
			.unwrap()
			.iter()
			.filter(|(p, _)| *p == processor)
			.count()
	}
}

#[async_trait]
impl PaymentProcessorClient for ScriptedProcessorClient {
	async fn forward(
		&self,
		payment: &Payment,
		processor: Processor,
	) -> Result<(), GatewayError> {
		self.calls
			.lock()
			.unwrap()
			.push((processor, payment.correlation_id.clone()));

		if self.panic_on.as_deref() == Some(payment.correlation_id.as_str()) {
			panic!("scripted panic for {}", payment.correlation_id);
		}

		let behaviour = match processor {
			Processor::Default => &self.default,
			Processor::Fallback => &self.fallback,
		};
		let mut behaviour = behaviour.lock().unwrap();
		match *behaviour {
			Behaviour::Accept => Ok(()),
			Behaviour::Reject => Err(GatewayError::rejected_by(processor, "status 500")),
			Behaviour::RejectTimes(0) => Ok(()),
			Behaviour::RejectTimes(n) => {
				*behaviour = Behaviour::RejectTimes(n - 1);
				Err(GatewayError::rejected_by(processor, "status 500"))
			}
		}
	}
}
