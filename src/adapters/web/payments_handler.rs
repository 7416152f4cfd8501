use actix_web::{HttpResponse, Responder, ResponseError, post, web};
use log::{debug, warn};

use crate::adapters::web::errors::ApiError;
use crate::adapters::web::schema::{PaymentAccepted, PaymentPayload};
use crate::domain::errors::GatewayError;
use crate::infrastructure::queue::admission_queue::AdmissionQueue;
use crate::use_cases::create_payment::CreatePaymentUseCase;

/// Admits the payment and answers before any processor is contacted.
#[post("/payments")]
pub async fn payments(
	payload: web::Json<PaymentPayload>,
	create_payment_use_case: web::Data<CreatePaymentUseCase<AdmissionQueue>>,
) -> impl Responder {
	match create_payment_use_case.execute((&*payload).into()) {
		Ok(()) => {
			debug!("Payment received and queued: {}", payload.correlation_id);
			HttpResponse::Created().json(PaymentAccepted {
				payment: payload.into_inner(),
				status:  "queued",
			})
		}
		Err(GatewayError::AdmissionRejected) => {
			warn!("Shedding payment {}: queue full", payload.correlation_id);
			ApiError::TooManyRequests.error_response()
		}
		Err(e) => {
			warn!("Rejecting payment {}: {e}", payload.correlation_id);
			ApiError::from(e).error_response()
		}
	}
}
