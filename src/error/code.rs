//! Boundary result codes.

//---------------------------------------------------------------------------------------------------- use
use crate::error::RtaError;
use strum::{
	AsRefStr,
	Display,
	EnumCount,
	EnumIter,
	IntoStaticStr,
};

//---------------------------------------------------------------------------------------------------- ResultCode
/// Integer result code for every `rtaudio` operation.
///
/// This is the flat, language-agnostic view of [`RtaError`],
/// meant for callers sitting on the other side of a binding layer.
///
/// `0` is success, everything else is a failure category.
///
/// ```rust
/// # use rtaudio::error::*;
/// assert_eq!(ResultCode::Success as i32,         0);
/// assert_eq!(ResultCode::GenericError as i32,    1);
/// assert_eq!(ResultCode::BackendInitFailed as i32, 2);
/// assert_eq!(ResultCode::DeviceQueryFailed as i32, 3);
/// assert_eq!(ResultCode::DeviceInitFailed as i32,  4);
/// assert_eq!(ResultCode::InvalidArgument as i32,   5);
///
/// assert_eq!(ResultCode::DeviceInitFailed.as_ref(), "DEVICE_INIT_FAILED");
/// ```
#[repr(i32)]
#[derive(Copy,Clone,Debug,PartialEq,PartialOrd,Eq,Ord,Hash)]
#[derive(AsRefStr,Display,EnumCount,EnumIter,IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum ResultCode {
	/// The operation succeeded.
	Success = 0,
	/// Something failed that has no more specific category.
	GenericError,
	/// The audio backend could not be initialized.
	BackendInitFailed,
	/// The device list could not be queried.
	DeviceQueryFailed,
	/// The device could not be opened or started.
	DeviceInitFailed,
	/// An index or argument was out of range.
	InvalidArgument,
}

impl ResultCode {
	#[must_use]
	/// Map any `rtaudio` result onto its code.
	///
	/// ```rust
	/// # use rtaudio::error::*;
	/// let ok: Result<(), RtaError> = Ok(());
	/// assert_eq!(ResultCode::from_result(&ok), ResultCode::Success);
	///
	/// let err: Result<(), RtaError> = Err(RtaError::InvalidIndex { index: 3, count: 3 });
	/// assert_eq!(ResultCode::from_result(&err), ResultCode::InvalidArgument);
	/// ```
	pub fn from_result<T>(result: &Result<T, RtaError>) -> Self {
		match result {
			Ok(_) => Self::Success,
			Err(e) => e.code(),
		}
	}

	#[inline]
	#[must_use]
	/// Returns the raw integer value.
	pub const fn as_i32(self) -> i32 {
		self as i32
	}

	#[inline]
	#[must_use]
	/// Returns `true` if `self == ResultCode::Success`.
	pub const fn is_success(self) -> bool {
		matches!(self, Self::Success)
	}
}

impl From<&RtaError> for ResultCode {
	fn from(error: &RtaError) -> Self {
		error.code()
	}
}

impl From<ResultCode> for i32 {
	#[inline]
	fn from(code: ResultCode) -> Self {
		code.as_i32()
	}
}

impl TryFrom<i32> for ResultCode {
	/// The unknown integer is handed back.
	type Error = i32;

	/// ```rust
	/// # use rtaudio::error::*;
	/// assert_eq!(ResultCode::try_from(4), Ok(ResultCode::DeviceInitFailed));
	/// assert_eq!(ResultCode::try_from(6), Err(6));
	/// assert_eq!(ResultCode::try_from(-1), Err(-1));
	/// ```
	fn try_from(code: i32) -> Result<Self, Self::Error> {
		Ok(match code {
			0 => Self::Success,
			1 => Self::GenericError,
			2 => Self::BackendInitFailed,
			3 => Self::DeviceQueryFailed,
			4 => Self::DeviceInitFailed,
			5 => Self::InvalidArgument,
			_ => return Err(code),
		})
	}
}
