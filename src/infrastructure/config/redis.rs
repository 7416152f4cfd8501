use crate::domain::processor::Processor;

const SUMMARY_KEY_PREFIX: &str = "summary";

/// Hash of `correlationId -> amount` for payments accepted by `processor`.
pub fn summary_data_key(processor: Processor) -> String {
	format!("{SUMMARY_KEY_PREFIX}:{processor}:data")
}

/// Sorted set of correlation ids scored by `requestedAt` in unix millis.
pub fn summary_history_key(processor: Processor) -> String {
	format!("{SUMMARY_KEY_PREFIX}:{processor}:history")
}

pub fn all_summary_keys() -> Vec<String> {
	Processor::ALL
		.iter()
		.flat_map(|processor| {
			[summary_data_key(*processor), summary_history_key(*processor)]
		})
		.collect()
}
