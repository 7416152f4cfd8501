use std::sync::{Mutex, PoisonError};

use bytes::BytesMut;

const DEFAULT_BUFFER_CAPACITY: usize = 256;

/// Serialization buffers reused across processor calls.
///
/// A buffer handed out by [`BufferPool::acquire`] is split into a frozen
/// request body; once that body is dropped, the next `reserve` on the
/// returned buffer reclaims the same allocation.
pub struct BufferPool {
	buffers:         Mutex<Vec<BytesMut>>,
	max_pooled:      usize,
	buffer_capacity: usize,
}

impl BufferPool {
	pub fn new(max_pooled: usize) -> Self {
		Self {
			buffers: Mutex::new(Vec::with_capacity(max_pooled)),
			max_pooled,
			buffer_capacity: DEFAULT_BUFFER_CAPACITY,
		}
	}

	pub fn acquire(&self) -> BytesMut {
		let pooled = self
			.buffers
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.pop();

		let mut buffer = pooled.unwrap_or_default();
		buffer.clear();
		buffer.reserve(self.buffer_capacity);
		buffer
	}

	pub fn release(&self, mut buffer: BytesMut) {
		buffer.clear();
		let mut buffers =
			self.buffers.lock().unwrap_or_else(PoisonError::into_inner);
		if buffers.len() < self.max_pooled {
			buffers.push(buffer);
		}
	}

	pub fn pooled(&self) -> usize {
		self.buffers
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.len()
	}
}
