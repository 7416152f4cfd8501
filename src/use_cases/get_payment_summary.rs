use time::OffsetDateTime;

use crate::domain::errors::GatewayError;
use crate::domain::processor::Processor;
use crate::domain::repository::SummaryRepository;
use crate::domain::summary::PaymentsSummary;
use crate::use_cases::dto::GetPaymentSummaryQuery;

#[derive(Clone)]
pub struct GetPaymentSummaryUseCase<R: SummaryRepository> {
	payment_repo: R,
}

impl<R: SummaryRepository> GetPaymentSummaryUseCase<R> {
	pub fn new(payment_repo: R) -> Self {
		Self { payment_repo }
	}

	/// Missing bounds default to the unix epoch and now.
	pub async fn execute(
		&self,
		query: GetPaymentSummaryQuery,
	) -> Result<PaymentsSummary, GatewayError> {
		let from = query.from.unwrap_or(OffsetDateTime::UNIX_EPOCH);
		let to = query.to.unwrap_or_else(OffsetDateTime::now_utc);

		let (default, fallback) = tokio::try_join!(
			self.payment_repo.summary_of(Processor::Default, from, to),
			self.payment_repo.summary_of(Processor::Fallback, from, to),
		)?;

		Ok(PaymentsSummary { default, fallback })
	}
}
