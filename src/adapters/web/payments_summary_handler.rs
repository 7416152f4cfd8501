use actix_web::{HttpResponse, Responder, ResponseError, get, web};
use log::{debug, error};

use crate::adapters::web::errors::ApiError;
use crate::adapters::web::schema::SummaryWindow;
use crate::domain::repository::SharedSummaryRepository;
use crate::use_cases::get_payment_summary::GetPaymentSummaryUseCase;

type SummaryUseCase = GetPaymentSummaryUseCase<SharedSummaryRepository>;

#[get("/payments-summary")]
pub async fn payments_summary(
	window: web::Query<SummaryWindow>,
	summary_use_case: web::Data<SummaryUseCase>,
) -> impl Responder {
	let window = window.into_inner();
	debug!("Summarizing payments from {:?} to {:?}", window.from, window.to);

	summary_use_case
		.execute(window.into())
		.await
		.map_or_else(
			|e| {
				error!("Summary store unavailable: {e}");
				ApiError::from(e).error_response()
			},
			|summary| HttpResponse::Ok().json(summary),
		)
}
