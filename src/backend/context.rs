//! The process-wide backend handle.

//---------------------------------------------------------------------------------------------------- Use
use std::sync::{
	Mutex,
	OnceLock,
	PoisonError,
};
use crate::error::BackendError;

//---------------------------------------------------------------------------------------------------- BackendContext
/// Lazily initialized, process-wide storage for one backend.
///
/// - Initialization happens at most once successfully
/// - Concurrent first use is serialized, only one thread runs `init`
/// - A failed `init` leaves this uninitialized, the next use retries
/// - Once initialized, access is a single atomic load
///
/// There is no teardown, the backend lives until the process exits.
pub(crate) struct BackendContext<B> {
	/// The backend, once initialized.
	backend: OnceLock<B>,
	/// Held while `init` runs.
	init_lock: Mutex<()>,
}

impl<B> BackendContext<B> {
	/// An uninitialized context.
	pub(crate) const fn new() -> Self {
		Self {
			backend: OnceLock::new(),
			init_lock: Mutex::new(()),
		}
	}

	#[inline]
	/// Returns the backend if it is initialized.
	pub(crate) fn get(&self) -> Option<&B> {
		self.backend.get()
	}

	/// Returns the backend, running `init` first if needed.
	///
	/// # Errors
	/// Whatever `init` returns, in which case
	/// nothing is stored and the next call retries.
	pub(crate) fn get_or_try_init<F>(&self, init: F) -> Result<&B, BackendError>
	where
		F: FnOnce() -> Result<B, BackendError>,
	{
		// Fast path.
		if let Some(backend) = self.backend.get() {
			return Ok(backend);
		}

		// A panicking `init` stored nothing, so
		// a poisoned lock is safe to continue with.
		let _guard = self.init_lock.lock().unwrap_or_else(PoisonError::into_inner);

		// Someone else may have finished while we waited.
		if let Some(backend) = self.backend.get() {
			return Ok(backend);
		}

		let backend = init()?;
		Ok(self.backend.get_or_init(|| backend))
	}
}
