use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, error};
use derive_more::derive::{Display, Error};
use serde::Serialize;

use crate::domain::errors::GatewayError;

#[derive(Serialize)]
struct ErrorResponse {
	#[serde(rename = "statusCode")]
	status_code: u16,
	error:       String,
	message:     String,
}

#[derive(Debug, Display, Error, PartialEq)]
pub enum ApiError {
	#[display("Request data is invalid.")]
	BadClientDataError,
	#[display("Payment queue is full, retry later.")]
	TooManyRequests,
	#[display("Payment summary is currently unavailable.")]
	SummaryUnavailable,
	#[display("Internal server error.")]
	InternalServerError,
}

impl ApiError {
	pub fn name(&self) -> String {
		match self {
			ApiError::BadClientDataError => "Bad request".to_string(),
			ApiError::TooManyRequests => "Too Many Requests".to_string(),
			ApiError::SummaryUnavailable => "Service Unavailable".to_string(),
			ApiError::InternalServerError => "Internal Server Error".to_string(),
		}
	}
}

impl error::ResponseError for ApiError {
	fn error_response(&self) -> HttpResponse {
		HttpResponse::build(self.status_code())
			.content_type(ContentType::json())
			.json(ErrorResponse {
				status_code: self.status_code().as_u16(),
				error:       self.to_string(),
				message:     self.name(),
			})
	}

	fn status_code(&self) -> StatusCode {
		match self {
			ApiError::BadClientDataError => StatusCode::BAD_REQUEST,
			ApiError::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
			ApiError::SummaryUnavailable => StatusCode::SERVICE_UNAVAILABLE,
			ApiError::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}
}

impl From<GatewayError> for ApiError {
	fn from(err: GatewayError) -> Self {
		match err {
			GatewayError::AdmissionRejected => ApiError::TooManyRequests,
			GatewayError::InvalidPayment { .. } => ApiError::BadClientDataError,
			GatewayError::StoreReadFailed { .. } => ApiError::SummaryUnavailable,
			GatewayError::ProcessorRejected { .. } |
			GatewayError::BothProcessorsFailed { .. } |
			GatewayError::StoreWriteFailed { .. } => ApiError::InternalServerError,
		}
	}
}
