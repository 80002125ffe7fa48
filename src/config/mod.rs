//! Configuration for a [`PlaybackContext`](crate::PlaybackContext).

mod callback;
pub use callback::SampleCallback;

mod config;
pub use config::ContextConfig;

mod profile;
pub use profile::PerformanceProfile;

mod constants;
pub use constants::{
	DEFAULT_CHANNEL_COUNT,
	DEFAULT_SAMPLE_RATE,
	DEVICE_NAME_MAX_BYTES,
	LOW_LATENCY_BUFFER_FRAMES,
	CONSERVATIVE_BUFFER_FRAMES,
};
pub(crate) use constants::STREAM_ERROR_QUEUE_LEN;
