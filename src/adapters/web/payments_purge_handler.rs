use actix_web::{HttpResponse, Responder, ResponseError, post, web};
use log::{error, warn};

use crate::adapters::web::errors::ApiError;
use crate::adapters::web::schema::PurgeOutcome;
use crate::domain::repository::SharedSummaryRepository;
use crate::use_cases::purge_payments::PurgePaymentsUseCase;

/// Clears every recorded accounting event for both processors.
#[post("/purge-payments")]
pub async fn payments_purge(
	purge_use_case: web::Data<PurgePaymentsUseCase<SharedSummaryRepository>>,
) -> impl Responder {
	warn!("Purging the payment summary store");

	if let Err(e) = purge_use_case.execute().await {
		error!("Summary store could not be purged: {e}");
		return ApiError::from(e).error_response();
	}

	HttpResponse::Ok().json(PurgeOutcome { status: "purged" })
}
