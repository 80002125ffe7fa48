//---------------------------------------------------------------------------------------------------- use
use std::fmt;
use crate::{
	config::{
		SampleCallback,
		PerformanceProfile,
		DEFAULT_CHANNEL_COUNT,
		DEFAULT_SAMPLE_RATE,
	},
	error::RtaError,
};

#[allow(unused_imports)] // docs
use crate::PlaybackContext;

//---------------------------------------------------------------------------------------------------- ContextConfig
/// Everything needed to create a [`PlaybackContext`].
///
/// A [`PlaybackContext`] takes this by value, so
/// it is immutable for the lifetime of the context.
///
/// ```rust
/// # use rtaudio::config::*;
/// let mut config = ContextConfig::DEFAULT;
/// assert_eq!(config.channel_count, DEFAULT_CHANNEL_COUNT);
/// assert_eq!(config.sample_rate, DEFAULT_SAMPLE_RATE);
/// assert!(config.sample_callback.is_none());
///
/// // A config without a callback is invalid.
/// assert!(config.validate().is_err());
///
/// config
/// 	.channels(1)
/// 	.sample_rate(48_000)
/// 	.callback(|output: &mut [f32], _: usize| output.fill(0.0));
/// assert!(config.validate().is_ok());
/// ```
pub struct ContextConfig {
	/// Amount of interleaved channels, must be non-zero.
	pub channel_count: u16,

	/// Frames per second, must be non-zero.
	pub sample_rate: u32,

	/// The sample producer.
	///
	/// This must be `Some` by the time the config reaches a [`PlaybackContext`].
	pub sample_callback: Option<Box<dyn SampleCallback>>,

	/// Latency/CPU trade-off requested from the backend.
	pub performance_profile: PerformanceProfile,
}

//---------------------------------------------------------------------------------------------------- ContextConfig Impl
impl ContextConfig {
	/// Stereo, [`DEFAULT_SAMPLE_RATE`], low-latency, no callback.
	pub const DEFAULT: Self = Self {
		channel_count:       DEFAULT_CHANNEL_COUNT,
		sample_rate:         DEFAULT_SAMPLE_RATE,
		sample_callback:     None,
		performance_profile: PerformanceProfile::LowLatency,
	};

	#[cold]
	#[must_use]
	/// Create a config with the default [`PerformanceProfile`].
	pub fn new<C: SampleCallback>(channel_count: u16, sample_rate: u32, sample_callback: C) -> Self {
		Self {
			channel_count,
			sample_rate,
			sample_callback: Some(Box::new(sample_callback)),
			performance_profile: PerformanceProfile::default(),
		}
	}

	#[cold]
	/// Set the channel count.
	pub fn channels(&mut self, channel_count: u16) -> &mut Self {
		self.channel_count = channel_count;
		self
	}

	#[cold]
	/// Set the sample rate.
	pub fn sample_rate(&mut self, sample_rate: u32) -> &mut Self {
		self.sample_rate = sample_rate;
		self
	}

	#[cold]
	/// Set the sample callback, replacing any previous one.
	pub fn callback<C: SampleCallback>(&mut self, sample_callback: C) -> &mut Self {
		self.sample_callback = Some(Box::new(sample_callback));
		self
	}

	#[cold]
	/// Set the [`PerformanceProfile`].
	pub fn performance_profile(&mut self, performance_profile: PerformanceProfile) -> &mut Self {
		self.performance_profile = performance_profile;
		self
	}

	/// Check the config before any backend resource is touched.
	///
	/// # Errors
	/// [`RtaError::InvalidConfig`] if:
	/// - `channel_count` is `0`
	/// - `sample_rate` is `0`
	/// - `sample_callback` is `None`
	pub fn validate(&self) -> Result<(), RtaError> {
		if self.channel_count == 0 {
			return Err(RtaError::InvalidConfig("channel_count"));
		}
		if self.sample_rate == 0 {
			return Err(RtaError::InvalidConfig("sample_rate"));
		}
		if self.sample_callback.is_none() {
			return Err(RtaError::InvalidConfig("sample_callback"));
		}
		Ok(())
	}
}

//---------------------------------------------------------------------------------------------------- ContextConfig Trait Impl
impl Default for ContextConfig {
	#[cold]
	/// Same as [`Self::DEFAULT`].
	fn default() -> Self {
		Self::DEFAULT
	}
}

impl fmt::Debug for ContextConfig {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ContextConfig")
			.field("channel_count",       &self.channel_count)
			.field("sample_rate",         &self.sample_rate)
			.field("sample_callback",     &self.sample_callback.as_ref().map(|_| "Some(_)"))
			.field("performance_profile", &self.performance_profile)
			.finish()
	}
}

//---------------------------------------------------------------------------------------------------- Tests
#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	fn silence(output: &mut [f32], _: usize) {
		output.fill(0.0);
	}

	#[test]
	fn validate() {
		let config = ContextConfig::new(2, 44_100, silence);
		assert!(config.validate().is_ok());

		let mut config = ContextConfig::new(0, 44_100, silence);
		assert!(matches!(config.validate(), Err(RtaError::InvalidConfig("channel_count"))));

		config.channels(2).sample_rate(0);
		assert!(matches!(config.validate(), Err(RtaError::InvalidConfig("sample_rate"))));

		let config = ContextConfig::DEFAULT;
		assert!(matches!(config.validate(), Err(RtaError::InvalidConfig("sample_callback"))));
	}

	#[test]
	fn debug_hides_callback() {
		let config = ContextConfig::new(2, 44_100, silence);
		let debug = format!("{config:?}");
		assert!(debug.contains("Some(\"Some(_)\")"));

		let debug = format!("{:?}", ContextConfig::DEFAULT);
		assert!(debug.contains("sample_callback: None"));
	}

	#[test]
	fn setters() {
		let mut config = ContextConfig::default();
		config
			.channels(6)
			.sample_rate(96_000)
			.performance_profile(PerformanceProfile::Conservative)
			.callback(silence);

		assert_eq!(config.channel_count, 6);
		assert_eq!(config.sample_rate, 96_000);
		assert_eq!(config.performance_profile, PerformanceProfile::Conservative);
		assert!(config.sample_callback.is_some());
	}
}
