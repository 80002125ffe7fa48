//! Errors from the audio backend.

//---------------------------------------------------------------------------------------------------- use
use std::borrow::Cow;

//---------------------------------------------------------------------------------------------------- BackendError
/// Error reported by the underlying audio backend.
///
/// Backends will generally fail in the same ways, so instead
/// of being generic per backend, each one maps its native
/// errors onto this enum.
///
/// This is never returned on its own, it is always wrapped by
/// an [`RtaError`](crate::error::RtaError) variant that says
/// _which_ operation the backend failed in.
#[derive(thiserror::Error, Debug)]
pub enum BackendError {
	#[error("audio host is unavailable")]
	/// The audio host/server could not be connected to.
	HostUnavailable,

	#[error("audio device is unavailable")]
	/// The audio device is unavailable, e.g. it was unplugged.
	DeviceUnavailable,

	#[error("device descriptor does not belong to the active backend")]
	/// The opaque device descriptor could not be interpreted
	/// by the backend that is currently compiled in.
	InvalidDescriptor,

	#[error("unknown platform device id: {0}")]
	/// The platform-specific numeric device id does not
	/// address any output device.
	UnknownPlatformId(i32),

	#[error("stream configuration is not supported by the device")]
	/// The channel count, sample rate or sample
	/// format is not supported by the device.
	UnsupportedConfig,

	#[error("failed to spawn render thread: {0}")]
	/// Failed to spawn an OS thread.
	ThreadSpawn(std::io::Error),

	#[error("unknown error: {0}")]
	/// An unknown or very specific error occurred.
	///
	/// The `str` will contain more information.
	Unknown(Cow<'static, str>),
}
