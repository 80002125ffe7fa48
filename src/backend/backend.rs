//! The narrow capability interface every audio backend provides.
//!
//! `rtaudio` never talks to audio hardware itself, it consumes a
//! backend through these traits: enumerate, open a device with a
//! push-style render function, start and stop the stream.
//!
//! # Safety Notes
//! Implementors are expected to implement these functions
//! correctly according to the documentation invariants,
//! in particular the drop ordering of [`StreamHandle`].

//---------------------------------------------------------------------------------------------------- use
use crate::{
	backend::BackendLog,
	config::PerformanceProfile,
	device::{BackendInfo,PlatformDevice},
	error::BackendError,
	source::SampleFormat,
};

//---------------------------------------------------------------------------------------------------- Types
/// Called on the render thread with the device's interleaved output buffer.
pub(crate) type RenderFn = Box<dyn FnMut(&mut [f32]) + Send + 'static>;

/// Called (possibly on the render thread) when the stream fails.
pub(crate) type ErrorFn = Box<dyn FnMut(BackendError) + Send + 'static>;

/// A device as reported by the backend, before it is given an index.
pub(crate) struct RawDevice {
	/// Backend-reported name, untruncated.
	pub(crate) name: String,
	/// What the backend needs to open this device again.
	pub(crate) info: BackendInfo,
}

/// How a device to open is addressed.
#[derive(Clone,Debug)]
pub(crate) enum DeviceTarget {
	/// A descriptor this backend handed out during enumeration.
	Descriptor(BackendInfo),
	/// A raw platform-specific numeric id.
	PlatformId(i32),
}

/// The stream a device should be opened with.
#[derive(Copy,Clone,Debug,PartialEq,Eq)]
pub(crate) struct StreamRequest {
	/// Interleaved channels per frame.
	pub(crate) channel_count: u16,
	/// Frames per second.
	pub(crate) sample_rate: u32,
	/// Always [`SampleFormat::F32`], there is no conversion.
	pub(crate) sample_format: SampleFormat,
	/// Requested latency/CPU trade-off.
	pub(crate) profile: PerformanceProfile,
}

//---------------------------------------------------------------------------------------------------- StreamHandle
/// An opened playback stream.
///
/// Invariants:
/// 1. A freshly opened stream is not running
/// 2. `stop()` blocks until the render function will not be called again
/// 3. Dropping the handle stops the stream and only _then_ drops the render function
pub(crate) trait StreamHandle {
	/// Start calling the render function.
	fn start(&mut self) -> Result<(), BackendError>;

	/// Stop calling the render function, blocking until it has returned.
	fn stop(&mut self) -> Result<(), BackendError>;

	/// Is the render function currently being called?
	fn is_running(&self) -> bool;
}

//---------------------------------------------------------------------------------------------------- Backend
/// The process-wide handle to an audio subsystem.
pub(crate) trait Backend: Sized + Send + Sync + 'static {
	/// The opened-stream type.
	type Stream: StreamHandle;

	/// Bring up the audio subsystem.
	///
	/// `log` is the sink all backend diagnostics are sent to.
	fn init(log: BackendLog) -> Result<Self, BackendError>;

	/// List every output device, in backend order.
	fn output_devices(&self) -> Result<Vec<RawDevice>, BackendError>;

	/// List every output device addressable by a platform id.
	fn platform_devices(&self) -> Result<Vec<PlatformDevice>, BackendError>;

	/// Open `target` for playback.
	///
	/// The returned stream is _not_ running.
	///
	/// If this fails, `render` and `on_error` are dropped
	/// before returning and no thread was started.
	fn open(
		&self,
		target: DeviceTarget,
		request: &StreamRequest,
		render: RenderFn,
		on_error: ErrorFn,
	) -> Result<Self::Stream, BackendError>;
}
