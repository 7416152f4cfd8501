use std::time::Duration;

/// Polls `condition` every 10ms until it holds or `timeout` elapses.
pub async fn eventually(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
	let deadline = tokio::time::Instant::now() + timeout;
	loop {
		if condition() {
			return true;
		}
		if tokio::time::Instant::now() >= deadline {
			return false;
		}
		tokio::time::sleep(Duration::from_millis(10)).await;
	}
}
