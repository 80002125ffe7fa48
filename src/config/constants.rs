//! Shared constants.

//---------------------------------------------------------------------------------------------------- Constants
/// The channel count used when none is configured (stereo).
pub const DEFAULT_CHANNEL_COUNT: u16 = 2;

/// The sample rate used when none is configured.
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// The maximum amount of bytes kept from a backend-reported device name.
///
/// Longer names are truncated (on a `char` boundary) without error.
pub const DEVICE_NAME_MAX_BYTES: usize = 255;

/// Buffer size (in frames) requested by [`PerformanceProfile::LowLatency`].
///
/// This is a request, backends will clamp it to what the device supports.
///
/// [`PerformanceProfile::LowLatency`]: crate::config::PerformanceProfile::LowLatency
pub const LOW_LATENCY_BUFFER_FRAMES: u32 = 256;

/// Buffer size (in frames) used by [`PerformanceProfile::Conservative`]
/// on backends that don't pick their own.
///
/// [`PerformanceProfile::Conservative`]: crate::config::PerformanceProfile::Conservative
pub const CONSERVATIVE_BUFFER_FRAMES: u32 = 1024;

/// How many backend stream errors a context holds
/// before new ones are dropped (they are still logged).
pub(crate) const STREAM_ERROR_QUEUE_LEN: usize = 16;

//---------------------------------------------------------------------------------------------------- Tests
#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn buffer_frames() {
		assert!(LOW_LATENCY_BUFFER_FRAMES < CONSERVATIVE_BUFFER_FRAMES);
		assert!(LOW_LATENCY_BUFFER_FRAMES.is_power_of_two());
		assert!(CONSERVATIVE_BUFFER_FRAMES.is_power_of_two());
	}
}
