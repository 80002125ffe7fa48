//! Audio backends.
//!
//! Exactly one backend is compiled in and brought up lazily,
//! once per process, the first time anything needs it.

mod backend;
pub(crate) use backend::{
	Backend,
	StreamHandle,
	RawDevice,
	DeviceTarget,
	StreamRequest,
	RenderFn,
	ErrorFn,
};

mod sink;
pub(crate) use sink::{BackendLog,LogLevel};

mod context;
use context::BackendContext;

use crate::{
	error::RtaError,
	macros::{error2,info2},
};

// Use the dummy backend if:
// - testing
// - it is explicitly enabled
//
// else, a real backend must be enabled.
cfg_if::cfg_if! {
	if #[cfg(any(test, feature = "dummy"))] {
		pub(crate) mod dummy;
		pub(crate) use dummy::Dummy as BackendStruct;
		/// The audio backend used.
		pub(crate) const BACKEND_NAME: &str = "dummy";
	} else if #[cfg(feature = "cpal")] {
		mod cpal;
		pub(crate) use self::cpal::Cpal as BackendStruct;
		/// The audio backend used.
		pub(crate) const BACKEND_NAME: &str = "cpal";
	} else {
		compile_error!("rtaudio: enable a backend feature, `cpal` (real hardware) or `dummy` (no audio)");
	}
}

/// The stream type of the compiled-in backend.
pub(crate) type StreamStruct = <BackendStruct as Backend>::Stream;

//---------------------------------------------------------------------------------------------------- Statics
/// The one backend handle every query and context goes through.
static BACKEND: BackendContext<BackendStruct> = BackendContext::new();

//---------------------------------------------------------------------------------------------------- Free functions
/// Returns the backend, initializing it if needed.
pub(crate) fn backend() -> Result<&'static BackendStruct, RtaError> {
	BACKEND
		.get_or_try_init(|| {
			info2!("rtaudio - initializing backend [{BACKEND_NAME}]");
			BackendStruct::init(BackendLog::new(BACKEND_NAME))
		})
		.map_err(|error| {
			error2!("rtaudio - backend [{BACKEND_NAME}] failed to initialize: {error}");
			RtaError::BackendInit(error)
		})
}

/// Bring up the audio backend, if it isn't already.
///
/// This is called implicitly by every device query and context
/// creation, calling it explicitly just moves the cost (and the
/// failure) to a point of your choosing.
///
/// Concurrent first use from multiple threads is safe,
/// the backend is only initialized once.
///
/// # Errors
/// [`RtaError::BackendInit`] if the backend could not be brought up.
/// Nothing is retained, the next call tries again.
pub fn ensure_initialized() -> Result<(), RtaError> {
	backend().map(|_| ())
}

#[must_use]
/// Returns `true` if the audio backend has been initialized.
pub fn is_initialized() -> bool {
	BACKEND.get().is_some()
}

#[must_use]
/// The name of the compiled-in audio backend, e.g. `"cpal"`.
pub const fn backend_name() -> &'static str {
	BACKEND_NAME
}

//---------------------------------------------------------------------------------------------------- Tests
#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	#[test]
	fn init() {
		ensure_initialized().unwrap();
		assert!(is_initialized());
		ensure_initialized().unwrap();
		assert_eq!(backend_name(), "dummy");
	}
}
