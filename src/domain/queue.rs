use crate::domain::errors::GatewayError;

/// Ingress side of the admission queue. Submitting never waits: a full queue
/// rejects immediately.
pub trait Queue<B>: Send + Sync + 'static {
	fn submit(&self, message: B) -> Result<(), GatewayError>;
}
