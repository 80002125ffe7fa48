//---------------------------------------------------------------------------------------------------- use
use crate::error::{BackendError,DataSourceError,ResultCode};

//---------------------------------------------------------------------------------------------------- RtaError
#[derive(thiserror::Error, Debug)]
/// All `rtaudio` errors.
///
/// Each variant names the operation that failed, the
/// inner [`BackendError`] (if any) names the reason.
///
/// Nothing is retried automatically, re-invoking
/// the operation is up to the caller.
pub enum RtaError {
	#[error("failed to initialize audio backend: {0}")]
	/// The audio backend could not be brought up.
	///
	/// Initialization will be attempted again on next use.
	BackendInit(#[source] BackendError),

	#[error("failed to query audio devices: {0}")]
	/// The backend failed to produce a device list.
	DeviceQuery(#[source] BackendError),

	#[error("failed to initialize audio device: {0}")]
	/// The device could not be opened or its stream could not be started.
	///
	/// No render thread is running and no resources are held.
	DeviceInit(#[source] BackendError),

	#[error("invalid device index: {index}, device count: {count}")]
	/// The device index was outside `0..count`.
	InvalidIndex {
		/// The requested index.
		index: usize,
		/// The amount of devices in the enumeration snapshot.
		count: usize,
	},

	#[error("invalid context config: {0}")]
	/// A [`ContextConfig`](crate::config::ContextConfig) field was invalid.
	///
	/// The `str` names the offending field.
	InvalidConfig(&'static str),

	#[error("data source error: {0}")]
	/// A data source operation failed.
	DataSource(#[from] DataSourceError),

	#[error("audio stream error: {0}")]
	/// The backend reported an error while streaming.
	Stream(#[source] BackendError),
}

impl RtaError {
	#[must_use]
	/// The boundary [`ResultCode`] for this error.
	///
	/// ```rust
	/// # use rtaudio::error::*;
	/// let error = RtaError::InvalidConfig("sample_rate");
	/// assert_eq!(error.code(), ResultCode::InvalidArgument);
	/// ```
	pub const fn code(&self) -> ResultCode {
		match self {
			Self::BackendInit(_) => ResultCode::BackendInitFailed,
			Self::DeviceQuery(_) => ResultCode::DeviceQueryFailed,
			Self::DeviceInit(_)  => ResultCode::DeviceInitFailed,
			Self::InvalidIndex { .. } | Self::InvalidConfig(_) => ResultCode::InvalidArgument,
			Self::DataSource(_) | Self::Stream(_) => ResultCode::GenericError,
		}
	}
}
