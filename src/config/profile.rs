//---------------------------------------------------------------------------------------------------- use
use strum::{
	AsRefStr,
	Display,
	EnumCount,
	EnumIter,
	EnumString,
	IntoStaticStr,
};
use crate::config::{LOW_LATENCY_BUFFER_FRAMES,CONSERVATIVE_BUFFER_FRAMES};

//---------------------------------------------------------------------------------------------------- PerformanceProfile
/// How aggressively the backend should trade CPU for latency.
///
/// ```rust
/// # use rtaudio::config::*;
/// assert_eq!(PerformanceProfile::default(), PerformanceProfile::LowLatency);
/// assert_eq!(PerformanceProfile::LowLatency.as_ref(), "low_latency");
/// assert_eq!("conservative".parse(), Ok(PerformanceProfile::Conservative));
/// ```
#[derive(Copy,Clone,Debug,Default,PartialEq,PartialOrd,Eq,Ord,Hash)]
#[derive(AsRefStr,Display,EnumCount,EnumIter,EnumString,IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PerformanceProfile {
	#[default]
	/// Small buffers, the render thread wakes often.
	LowLatency,
	/// Larger buffers, fewer wakeups, more latency.
	Conservative,
}

impl PerformanceProfile {
	#[inline]
	#[must_use]
	/// The buffer size (in frames) this profile asks for.
	///
	/// ```rust
	/// # use rtaudio::config::*;
	/// assert_eq!(PerformanceProfile::LowLatency.buffer_frames(), LOW_LATENCY_BUFFER_FRAMES);
	/// assert_eq!(PerformanceProfile::Conservative.buffer_frames(), CONSERVATIVE_BUFFER_FRAMES);
	/// ```
	pub const fn buffer_frames(self) -> u32 {
		match self {
			Self::LowLatency   => LOW_LATENCY_BUFFER_FRAMES,
			Self::Conservative => CONSERVATIVE_BUFFER_FRAMES,
		}
	}

	#[inline]
	#[must_use]
	/// The fixed buffer size (in frames) to ask a backend for.
	///
	/// `None` means the backend should pick its own,
	/// backends that can't pick use [`Self::buffer_frames`].
	///
	/// ```rust
	/// # use rtaudio::config::*;
	/// assert_eq!(PerformanceProfile::LowLatency.fixed_buffer_frames(), Some(LOW_LATENCY_BUFFER_FRAMES));
	/// assert_eq!(PerformanceProfile::Conservative.fixed_buffer_frames(), None);
	/// ```
	pub const fn fixed_buffer_frames(self) -> Option<u32> {
		match self {
			Self::LowLatency   => Some(LOW_LATENCY_BUFFER_FRAMES),
			Self::Conservative => None,
		}
	}
}
