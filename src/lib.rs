use std::sync::Arc;
use std::time::Duration;

use actix_web::{App, HttpServer, web};
use log::{info, warn};
use reqwest::Client;

use crate::domain::repository::SharedSummaryRepository;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::http::processor_client::HttpPaymentProcessorClient;
use crate::infrastructure::persistence::redis_summary_repository::RedisSummaryRepository;
use crate::infrastructure::workers::dispatch_pipeline::DispatchPipeline;
use crate::use_cases::create_payment::CreatePaymentUseCase;
use crate::use_cases::get_payment_summary::GetPaymentSummaryUseCase;
use crate::use_cases::purge_payments::PurgePaymentsUseCase;

pub mod adapters;
pub mod domain;
pub mod infrastructure;
pub mod use_cases;

const SHUTDOWN_DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

pub async fn run(config: Arc<Config>) -> std::io::Result<()> {
	let redis_client = redis::Client::open(config.redis_url.as_str())
		.map_err(std::io::Error::other)?;
	let summary_repository: SharedSummaryRepository =
		Arc::new(RedisSummaryRepository::new(redis_client));

	let purge_payments_use_case =
		PurgePaymentsUseCase::new(summary_repository.clone());
	if config.purge_on_startup {
		match purge_payments_use_case.execute().await {
			Ok(()) => info!("Summary store cleared for a fresh run"),
			Err(e) => warn!("Could not clear the summary store on startup: {e}"),
		}
	}

	let http_client = Client::builder()
		.timeout(config.processor_timeout())
		.build()
		.map_err(std::io::Error::other)?;
	let processor_client = HttpPaymentProcessorClient::new(
		http_client,
		config.processor_endpoints(),
		config.max_concurrent_requests,
	);

	let (admission_queue, pipeline) = DispatchPipeline::start(
		&config,
		processor_client,
		summary_repository.clone(),
	);

	let create_payment_use_case = CreatePaymentUseCase::new(admission_queue);
	let get_payment_summary_use_case =
		GetPaymentSummaryUseCase::new(summary_repository);

	info!("Starting Actix-Web server on 0.0.0.0:{}...", config.server_port);
	let server = HttpServer::new(move || {
		App::new()
			.app_data(web::Data::new(create_payment_use_case.clone()))
			.app_data(web::Data::new(get_payment_summary_use_case.clone()))
			.app_data(web::Data::new(purge_payments_use_case.clone()))
			.configure(adapters::web::routes)
	})
	.keep_alive(Duration::from_secs(config.server_keepalive))
	.bind(("0.0.0.0", config.server_port))?
	.run()
	.await;

	// The server owned every admission handle, so the workers can now drain
	// the queue and let the batcher flush.
	pipeline.drain(SHUTDOWN_DRAIN_TIMEOUT).await;

	server
}
