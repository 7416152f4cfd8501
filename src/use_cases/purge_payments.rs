use crate::domain::errors::GatewayError;
use crate::domain::repository::SummaryRepository;

#[derive(Clone)]
pub struct PurgePaymentsUseCase<R: SummaryRepository> {
	repository: R,
}

impl<R: SummaryRepository> PurgePaymentsUseCase<R> {
	pub fn new(repository: R) -> Self {
		Self { repository }
	}

	pub async fn execute(&self) -> Result<(), GatewayError> {
		self.repository.clear().await
	}
}
