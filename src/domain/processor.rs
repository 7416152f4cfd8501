use derive_more::derive::Display;
use serde::{Deserialize, Serialize};

/// The two downstream payment processors. `Default` charges the lower fee.
#[derive(
	Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Processor {
	#[display("default")]
	Default,
	#[display("fallback")]
	Fallback,
}

impl Processor {
	pub const ALL: [Processor; 2] = [Processor::Default, Processor::Fallback];
}

#[derive(Debug, Clone)]
pub struct ProcessorEndpoints {
	pub default:  String,
	pub fallback: String,
}

impl ProcessorEndpoints {
	pub fn new(default: impl Into<String>, fallback: impl Into<String>) -> Self {
		Self {
			default:  default.into().trim_end_matches('/').to_string(),
			fallback: fallback.into().trim_end_matches('/').to_string(),
		}
	}

	pub fn url_of(&self, processor: Processor) -> &str {
		match processor {
			Processor::Default => &self.default,
			Processor::Fallback => &self.fallback,
		}
	}
}
