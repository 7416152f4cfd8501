use actix_web::{HttpRequest, error, web};
use log::warn;

use crate::adapters::web::errors::ApiError;

pub mod errors;
pub mod payments_handler;
pub mod payments_purge_handler;
pub mod payments_summary_handler;
pub mod schema;

/// Registers every gateway route. Malformed bodies and query strings are
/// answered with `ApiError::BadClientDataError`.
pub fn routes(cfg: &mut web::ServiceConfig) {
	cfg.app_data(web::JsonConfig::default().error_handler(
		|err: error::JsonPayloadError, req: &HttpRequest| {
			warn!("Malformed body on {}: {err}", req.path());
			ApiError::BadClientDataError.into()
		},
	))
	.app_data(web::QueryConfig::default().error_handler(
		|err: error::QueryPayloadError, req: &HttpRequest| {
			warn!("Malformed query on {}: {err}", req.path());
			ApiError::BadClientDataError.into()
		},
	))
	.service(payments_handler::payments)
	.service(payments_summary_handler::payments_summary)
	.service(payments_purge_handler::payments_purge);
}
