//! A [`DataSource`] driven by a [`SampleCallback`].
//!
//! This is the bridge between the user's "fill this buffer"
//! function and the render thread, which only knows how to
//! pull frames out of a [`DataSource`].

//---------------------------------------------------------------------------------------------------- use
use std::fmt;
use crate::{
	config::{SampleCallback,DEFAULT_CHANNEL_COUNT,DEFAULT_SAMPLE_RATE},
	error::DataSourceError,
	source::{DataSource,DataFormat,SampleFormat},
};

//---------------------------------------------------------------------------------------------------- CallbackDataSource
/// A logically infinite [`DataSource`] whose frames
/// come from a user-supplied [`SampleCallback`].
///
/// - `read()` calls the callback exactly once and reports the full
///   frame count (no end-of-stream), clamped to what `output` holds
/// - `format()` is always `f32` with the identity channel map
/// - `seek()`, `cursor()` and `length()` are not supported
///
/// The fields are set before the source is handed to the render
/// thread, after which it is owned (and only touched) by that thread.
///
/// ```rust
/// # use rtaudio::source::*;
/// let mut source = CallbackDataSource::new();
/// source
/// 	.set_channel_count(1)
/// 	.set_callback(|output: &mut [f32], frames: usize| output[..frames].fill(0.5));
///
/// let mut buf = [0.0; 4];
/// assert_eq!(source.read(&mut buf, 4), Ok(4));
/// assert_eq!(buf, [0.5; 4]);
///
/// assert!(source.seek(0).is_err());
/// assert!(source.cursor().is_err());
/// assert!(source.length().is_err());
/// ```
pub struct CallbackDataSource {
	/// The sample producer.
	callback: Option<Box<dyn SampleCallback>>,
	/// Interleaved channels per frame.
	channel_count: u16,
	/// Frames per second.
	sample_rate: u32,
}

//---------------------------------------------------------------------------------------------------- CallbackDataSource Impl
impl CallbackDataSource {
	#[cold]
	#[must_use]
	/// Stereo, [`DEFAULT_SAMPLE_RATE`], no callback.
	///
	/// Without a callback, `read()` writes silence.
	///
	/// ```rust
	/// # use rtaudio::source::*;
	/// # use rtaudio::config::*;
	/// let source = CallbackDataSource::new();
	/// assert_eq!(source.format().channel_count, DEFAULT_CHANNEL_COUNT);
	/// assert_eq!(source.format().sample_rate, DEFAULT_SAMPLE_RATE);
	/// assert!(!source.has_callback());
	/// ```
	pub const fn new() -> Self {
		Self {
			callback:      None,
			channel_count: DEFAULT_CHANNEL_COUNT,
			sample_rate:   DEFAULT_SAMPLE_RATE,
		}
	}

	#[cold]
	#[must_use]
	/// Create a source with every field set.
	pub fn with_callback(
		channel_count: u16,
		sample_rate: u32,
		callback: Box<dyn SampleCallback>,
	) -> Self {
		Self {
			callback: Some(callback),
			channel_count,
			sample_rate,
		}
	}

	#[cold]
	/// Install the sample callback, replacing any previous one.
	pub fn set_callback<C: SampleCallback>(&mut self, callback: C) -> &mut Self {
		self.callback = Some(Box::new(callback));
		self
	}

	#[cold]
	/// Set the channel count reported by `format()`.
	pub fn set_channel_count(&mut self, channel_count: u16) -> &mut Self {
		self.channel_count = channel_count;
		self
	}

	#[cold]
	/// Set the sample rate reported by `format()`.
	pub fn set_sample_rate(&mut self, sample_rate: u32) -> &mut Self {
		self.sample_rate = sample_rate;
		self
	}

	#[inline]
	#[must_use]
	/// Returns `true` if a sample callback is installed.
	pub const fn has_callback(&self) -> bool {
		self.callback.is_some()
	}
}

//---------------------------------------------------------------------------------------------------- DataSource Impl
impl DataSource for CallbackDataSource {
	#[inline]
	/// Fill `output` with `frame_count` frames.
	///
	/// The stream is infinite, so this reports every frame that was
	/// asked for. If `output` can't hold `frame_count` frames, only as
	/// many whole frames as fit are produced (and reported), the callback
	/// is never handed fewer samples than its `frame_count` promises.
	fn read(&mut self, output: &mut [f32], frame_count: usize) -> Result<usize, DataSourceError> {
		let channels = usize::from(self.channel_count);

		// Never more than fits, so `frames * channels` can't overflow.
		let frames = match channels {
			0 => 0,
			c => frame_count.min(output.len() / c),
		};

		let output = &mut output[..frames * channels];
		match self.callback.as_mut() {
			Some(callback) => callback.fill(output, frames),
			None => output.fill(0.0),
		}

		Ok(frames)
	}

	#[cold]
	fn seek(&mut self, _: u64) -> Result<(), DataSourceError> {
		Err(DataSourceError::NotSupported { operation: "seek" })
	}

	#[inline]
	fn format(&self) -> DataFormat {
		DataFormat {
			sample_format: SampleFormat::F32,
			channel_count: self.channel_count,
			sample_rate:   self.sample_rate,
		}
	}

	#[cold]
	fn cursor(&self) -> Result<u64, DataSourceError> {
		Err(DataSourceError::NotSupported { operation: "cursor" })
	}

	#[cold]
	fn length(&self) -> Result<u64, DataSourceError> {
		Err(DataSourceError::NotSupported { operation: "length" })
	}
}

//---------------------------------------------------------------------------------------------------- Trait Impl
impl Default for CallbackDataSource {
	#[cold]
	/// Same as [`Self::new`].
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Debug for CallbackDataSource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("CallbackDataSource")
			.field("callback",      &self.callback.as_ref().map(|_| "Some(_)"))
			.field("channel_count", &self.channel_count)
			.field("sample_rate",   &self.sample_rate)
			.finish()
	}
}

//---------------------------------------------------------------------------------------------------- Tests
#[cfg(test)]
mod tests {
	use super::*;
	use std::sync::{
		Arc,
		atomic::{AtomicUsize,Ordering},
	};
	use pretty_assertions::assert_eq;

	/// A source whose callback counts its invocations
	/// and writes the invocation number into every sample.
	fn counting_source(channel_count: u16) -> (CallbackDataSource, Arc<AtomicUsize>) {
		let calls = Arc::new(AtomicUsize::new(0));
		let calls2 = Arc::clone(&calls);

		let callback = move |output: &mut [f32], frames: usize| {
			let n = calls2.fetch_add(1, Ordering::Relaxed) + 1;
			output[..frames * channel_count as usize].fill(n as f32);
		};

		let source = CallbackDataSource::with_callback(channel_count, 48_000, Box::new(callback));
		(source, calls)
	}

	#[test]
	fn read_reports_every_frame_and_calls_once() {
		let (mut source, calls) = counting_source(2);
		let mut buf = vec![0.0; 2048];

		for (i, frames) in [1_usize, 7, 64, 512, 1024].into_iter().enumerate() {
			let read = source.read(&mut buf, frames).unwrap();
			assert_eq!(read, frames);
			assert_eq!(calls.load(Ordering::Relaxed), i + 1);
			assert!(buf[..frames * 2].iter().all(|s| *s == (i + 1) as f32));
		}
	}

	#[test]
	fn unsupported_regardless_of_reads() {
		let (mut source, _) = counting_source(2);
		let mut buf = [0.0; 64];

		for _ in 0..3 {
			source.read(&mut buf, 32).unwrap();
			assert_eq!(source.seek(0),   Err(DataSourceError::NotSupported { operation: "seek" }));
			assert_eq!(source.seek(100), Err(DataSourceError::NotSupported { operation: "seek" }));
			assert_eq!(source.cursor(),  Err(DataSourceError::NotSupported { operation: "cursor" }));
			assert_eq!(source.length(),  Err(DataSourceError::NotSupported { operation: "length" }));
		}
	}

	#[test]
	fn format_is_f32_with_identity_map() {
		let (source, _) = counting_source(6);
		let format = source.format();

		assert_eq!(format.sample_format, SampleFormat::F32);
		assert_eq!(format.channel_count, 6);
		assert_eq!(format.sample_rate, 48_000);
		assert_eq!(format.channel_map().collect::<Vec<u16>>(), [0, 1, 2, 3, 4, 5]);
	}

	#[test]
	fn no_callback_is_silence() {
		let mut source = CallbackDataSource::default();
		let mut buf = [1.0; 16];

		assert_eq!(source.read(&mut buf, 8), Ok(8));
		assert_eq!(buf, [0.0; 16]);
	}

	#[test]
	fn short_buffer_is_clamped() {
		let (mut source, calls) = counting_source(2);
		let mut buf = [0.0; 5];

		// 2 whole stereo frames fit, the odd sample is untouched.
		assert_eq!(source.read(&mut buf, usize::MAX), Ok(2));
		assert_eq!(source.read(&mut buf, 3), Ok(2));
		assert_eq!(calls.load(Ordering::Relaxed), 2);
		assert_eq!(buf, [2.0, 2.0, 2.0, 2.0, 0.0]);

		// Fitting requests are untouched.
		assert_eq!(source.read(&mut buf, 1), Ok(1));
		assert_eq!(buf[..2], [3.0, 3.0]);
	}

	#[test]
	fn zero_channels_reads_nothing() {
		let (mut source, calls) = counting_source(0);
		let mut buf = [1.0; 4];

		assert_eq!(source.read(&mut buf, 4), Ok(0));
		assert_eq!(calls.load(Ordering::Relaxed), 1);
		assert_eq!(buf, [1.0; 4]);
	}

	#[test]
	fn drop_releases_callback() {
		let (source, calls) = counting_source(2);
		assert_eq!(Arc::strong_count(&calls), 2);
		drop(source);
		assert_eq!(Arc::strong_count(&calls), 1);
	}
}
