//! The data source contract.

//---------------------------------------------------------------------------------------------------- use
use std::ops::Range;
use strum::{
	AsRefStr,
	Display,
	EnumCount,
	EnumIter,
	IntoStaticStr,
};
use crate::error::DataSourceError;

//---------------------------------------------------------------------------------------------------- SampleFormat
/// The format of a single sample.
///
/// `rtaudio` does not convert between formats, everything is `f32`.
///
/// ```rust
/// # use rtaudio::source::*;
/// assert_eq!(SampleFormat::F32.bytes(), 4);
/// assert_eq!(SampleFormat::F32.as_ref(), "f32");
/// ```
#[derive(Copy,Clone,Debug,Default,PartialEq,PartialOrd,Eq,Ord,Hash)]
#[derive(AsRefStr,Display,EnumCount,EnumIter,IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SampleFormat {
	#[default]
	/// 32-bit IEEE floating point, nominal range `-1.0..=1.0`.
	F32,
}

impl SampleFormat {
	#[inline]
	#[must_use]
	/// Size of one sample in bytes.
	pub const fn bytes(self) -> usize {
		match self {
			Self::F32 => std::mem::size_of::<f32>(),
		}
	}
}

//---------------------------------------------------------------------------------------------------- DataFormat
/// The layout of the frames a [`DataSource`] produces.
///
/// Samples are always interleaved by channel.
///
/// ```rust
/// # use rtaudio::source::*;
/// let format = DataFormat {
/// 	sample_format: SampleFormat::F32,
/// 	channel_count: 2,
/// 	sample_rate: 44_100,
/// };
/// assert_eq!(format.channel_map().collect::<Vec<u16>>(), [0, 1]);
/// assert_eq!(format.samples_per_frame(), 2);
/// assert_eq!(format.bytes_per_frame(), 8);
/// ```
#[derive(Copy,Clone,Debug,PartialEq,Eq,Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DataFormat {
	/// Format of each sample.
	pub sample_format: SampleFormat,
	/// Amount of interleaved channels.
	pub channel_count: u16,
	/// Frames per second.
	pub sample_rate: u32,
}

impl DataFormat {
	#[inline]
	#[must_use]
	/// The channel map, which is always the identity
	/// mapping, `0..channel_count`.
	pub const fn channel_map(&self) -> Range<u16> {
		0..self.channel_count
	}

	#[inline]
	#[must_use]
	/// Samples in one frame (one per channel).
	pub const fn samples_per_frame(&self) -> usize {
		self.channel_count as usize
	}

	#[inline]
	#[must_use]
	/// Bytes in one frame.
	pub const fn bytes_per_frame(&self) -> usize {
		self.samples_per_frame() * self.sample_format.bytes()
	}
}

//---------------------------------------------------------------------------------------------------- DataSource
/// A pull-based stream of interleaved PCM frames.
///
/// The render thread calls [`DataSource::read`] whenever the
/// device needs more audio, the rest of the capability set
/// describes (and optionally navigates) the stream.
///
/// # Real-time
/// `read()` is called on the render thread,
/// implementations must not block or allocate.
pub trait DataSource: Send {
	/// Write `frame_count` frames into `output`.
	///
	/// `output` holds at least `frame_count * channel_count` samples.
	///
	/// Returns the amount of frames written.
	///
	/// # Errors
	/// Implementation specific.
	fn read(&mut self, output: &mut [f32], frame_count: usize) -> Result<usize, DataSourceError>;

	/// Move the read position to `frame`.
	///
	/// # Errors
	/// [`DataSourceError::NotSupported`] if this source has no position.
	fn seek(&mut self, frame: u64) -> Result<(), DataSourceError>;

	/// The layout of the frames this source produces.
	fn format(&self) -> DataFormat;

	/// The current read position, in frames.
	///
	/// # Errors
	/// [`DataSourceError::NotSupported`] if this source has no position.
	fn cursor(&self) -> Result<u64, DataSourceError>;

	/// The total length of the stream, in frames.
	///
	/// # Errors
	/// [`DataSourceError::NotSupported`] if this source has no length.
	fn length(&self) -> Result<u64, DataSourceError>;
}
