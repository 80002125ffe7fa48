//! These are helper functions used for testing throughout the codebase.

//---------------------------------------------------------------------------------------------------- Use
use std::{
	sync::{
		Arc,
		Mutex,
		MutexGuard,
		PoisonError,
		atomic::{AtomicUsize,Ordering},
	},
	time::{Duration,Instant},
};
use crate::config::ContextConfig;

//---------------------------------------------------------------------------------------------------- Serial
/// Held by every test that opens streams.
static SERIAL: Mutex<()> = Mutex::new(());

/// Serialize tests that open streams, so the
/// process-wide live-stream counter is stable.
///
/// A failed (panicked) test does not poison the others.
pub(crate) fn serial() -> MutexGuard<'static, ()> {
	SERIAL.lock().unwrap_or_else(PoisonError::into_inner)
}

//---------------------------------------------------------------------------------------------------- Callbacks
/// A config whose callback writes silence and counts its invocations.
pub(crate) fn counting_config(channel_count: u16, sample_rate: u32) -> (ContextConfig, Arc<AtomicUsize>) {
	let calls  = Arc::new(AtomicUsize::new(0));
	let calls2 = Arc::clone(&calls);

	let config = ContextConfig::new(channel_count, sample_rate, move |output: &mut [f32], frames: usize| {
		assert!(output.len() >= frames * usize::from(channel_count));
		output.fill(0.0);
		calls2.fetch_add(1, Ordering::SeqCst);
	});

	(config, calls)
}

/// Wait (up to a few seconds) until `calls` reaches `n`.
pub(crate) fn wait_for_calls(calls: &AtomicUsize, n: usize) -> bool {
	let deadline = Instant::now() + Duration::from_secs(5);

	while calls.load(Ordering::SeqCst) < n {
		if Instant::now() > deadline {
			return false;
		}
		std::thread::sleep(Duration::from_millis(1));
	}

	true
}
