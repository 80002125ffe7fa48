//---------------------------------------------------------------------------------------------------- use
use strum::{
	AsRefStr,
	Display,
	EnumCount,
	EnumIter,
	EnumString,
	IntoStaticStr,
};

#[allow(unused_imports)] // docs
use crate::PlaybackContext;

//---------------------------------------------------------------------------------------------------- ContextState
/// The lifecycle state of a [`PlaybackContext`].
///
/// A context is only handed out once its stream is running,
/// and once destroyed it cannot be restarted.
///
/// ```rust
/// # use rtaudio::*;
/// assert_eq!(ContextState::Running.as_ref(), "running");
/// assert_eq!("destroyed".parse(), Ok(ContextState::Destroyed));
/// ```
#[derive(Copy,Clone,Debug,PartialEq,PartialOrd,Eq,Ord,Hash)]
#[derive(AsRefStr,Display,EnumCount,EnumIter,EnumString,IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ContextState {
	/// The render thread is pulling samples from the callback.
	Running,
	/// The stream was stopped and every resource released.
	Destroyed,
}

impl ContextState {
	#[inline]
	#[must_use]
	/// Returns `true` if this is [`ContextState::Destroyed`].
	pub const fn is_destroyed(self) -> bool {
		matches!(self, Self::Destroyed)
	}
}
