use std::net::TcpListener;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU16, AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use actix_web::dev::ServerHandle;
use actix_web::http::StatusCode;
use actix_web::{App, HttpResponse, HttpServer, web};
use serde_json::Value;

/// Minimal payment processor answering `POST /payments` with a configurable
/// status. Every body it receives is kept, whatever the answer.
pub struct ProcessorStub {
	pub url: String,
	state:   web::Data<StubState>,
	handle:  ServerHandle,
}

struct StubState {
	status:        AtomicU16,
	delay_ms:      AtomicU64,
	in_flight:     AtomicUsize,
	max_in_flight: AtomicUsize,
	received:      Mutex<Vec<Value>>,
}

impl ProcessorStub {
	pub fn set_status(&self, status: u16) {
		self.state.status.store(status, Ordering::SeqCst);
	}

	pub fn set_delay(&self, delay: Duration) {
		self.state
			.delay_ms
			.store(delay.as_millis() as u64, Ordering::SeqCst);
	}

	pub fn received(&self) -> Vec<Value> {
		self.state.received.lock().unwrap().clone()
	}

	pub fn received_count(&self) -> usize {
		self.state.received.lock().unwrap().len()
	}

	pub fn received_ids(&self) -> Vec<String> {
		self.received()
			.iter()
			.filter_map(|body| body["correlationId"].as_str().map(str::to_string))
			.collect()
	}

	pub fn max_in_flight(&self) -> usize {
		self.state.max_in_flight.load(Ordering::SeqCst)
	}

	pub async fn stop(&self) {
		self.handle.stop(false).await;
	}
}

/// Must be called from inside an actix system, e.g. an `#[actix_web::test]`.
pub async fn start_processor_stub(status: u16) -> ProcessorStub {
	let listener = TcpListener::bind("127.0.0.1:0").unwrap();
	let port = listener.local_addr().unwrap().port();

	let state = web::Data::new(StubState {
		status:        AtomicU16::new(status),
		delay_ms:      AtomicU64::new(0),
		in_flight:     AtomicUsize::new(0),
		max_in_flight: AtomicUsize::new(0),
		received:      Mutex::new(Vec::new()),
	});

	let app_state = state.clone();
	let server = HttpServer::new(move || {
		App::new()
			.app_data(app_state.clone())
			.route("/payments", web::post().to(accept_payment))
	})
	.workers(2)
	.listen(listener)
	.unwrap()
	.run();
	let handle = server.handle();
	actix_web::rt::spawn(server);

	ProcessorStub {
		url: format!("http://127.0.0.1:{port}"),
		state,
		handle,
	}
}

/// A URL nothing listens on.
pub fn unreachable_processor_url() -> String {
	let listener = TcpListener::bind("127.0.0.1:0").unwrap();
	let port = listener.local_addr().unwrap().port();
	drop(listener);
	format!("http://127.0.0.1:{port}")
}

async fn accept_payment(
	body: web::Json<Value>,
	state: web::Data<StubState>,
) -> HttpResponse {
	let now_in_flight = state.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
	state.max_in_flight.fetch_max(now_in_flight, Ordering::SeqCst);

	let delay = state.delay_ms.load(Ordering::SeqCst);
	if delay > 0 {
		actix_web::rt::time::sleep(Duration::from_millis(delay)).await;
	}

	state.received.lock().unwrap().push(body.into_inner());
	state.in_flight.fetch_sub(1, Ordering::SeqCst);

	let status = StatusCode::from_u16(state.status.load(Ordering::SeqCst))
		.unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
	HttpResponse::build(status).finish()
}
