//! Devices addressed by platform-specific numeric ids.
//!
//! Some platforms (e.g. mobile audio APIs) address output devices
//! with a raw integer rather than an opaque handle, and their own
//! device pickers hand out those integers. These are listed here
//! and opened with [`create_context_from_platform_id`](crate::create_context_from_platform_id).

//---------------------------------------------------------------------------------------------------- use
use strum::{
	AsRefStr,
	Display,
	EnumCount,
	EnumIter,
	EnumString,
	IntoStaticStr,
};

//---------------------------------------------------------------------------------------------------- DeviceKind
/// What kind of hardware a platform device is.
///
/// Backends that cannot tell report [`DeviceKind::Unknown`].
///
/// ```rust
/// # use rtaudio::device::*;
/// assert_eq!(DeviceKind::WiredHeadphones.as_ref(), "wired_headphones");
/// assert_eq!("hdmi_arc".parse(), Ok(DeviceKind::HdmiArc));
/// assert_eq!(DeviceKind::default(), DeviceKind::Unknown);
/// ```
#[derive(Copy,Clone,Debug,Default,PartialEq,PartialOrd,Eq,Ord,Hash)]
#[derive(AsRefStr,Display,EnumCount,EnumIter,EnumString,IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DeviceKind {
	/// Auxiliary line-level connector.
	Auxiliary,
	/// Bluetooth device supporting A2DP.
	Bluetooth,
	/// Built-in earpiece speaker.
	Earpiece,
	/// Built-in speaker.
	Speaker,
	/// Audio bus.
	Bus,
	/// Docking station.
	Dock,
	/// FM transmission path.
	Fm,
	/// FM tuner.
	FmTuner,
	/// HDMI connection.
	Hdmi,
	/// HDMI audio return channel.
	HdmiArc,
	/// Network (IP) device.
	Ip,
	/// Analog line connection.
	LineAnalog,
	/// Digital line connection.
	LineDigital,
	/// Telephony voice path.
	///
	/// These are never listed as playback devices.
	Telephony,
	/// TV tuner.
	TvTuner,
	/// USB accessory.
	UsbAccessory,
	/// USB audio device.
	UsbDevice,
	/// Wired headphones.
	WiredHeadphones,
	/// Wired headset (headphones + microphone).
	WiredHeadset,
	#[default]
	/// Unknown or unreported.
	Unknown,
}

impl DeviceKind {
	#[inline]
	#[must_use]
	/// Returns `true` if this kind can be used for media playback.
	///
	/// ```rust
	/// # use rtaudio::device::*;
	/// assert!(DeviceKind::Speaker.is_playback());
	/// assert!(!DeviceKind::Telephony.is_playback());
	/// ```
	pub const fn is_playback(self) -> bool {
		!matches!(self, Self::Telephony)
	}
}

//---------------------------------------------------------------------------------------------------- PlatformDevice
/// An output device with a platform-specific numeric id.
#[derive(Clone,Debug,PartialEq,Eq,Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlatformDevice {
	/// The platform's id for this device.
	pub id: i32,
	/// Product name.
	pub name: String,
	/// Kind of hardware.
	pub kind: DeviceKind,
}

impl PlatformDevice {
	#[must_use]
	/// `"<name> (<kind>)"`.
	///
	/// ```rust
	/// # use rtaudio::device::*;
	/// let device = PlatformDevice {
	/// 	id: 3,
	/// 	name: "Pixel".into(),
	/// 	kind: DeviceKind::Speaker,
	/// };
	/// assert_eq!(device.display_name(), "Pixel (speaker)");
	/// ```
	pub fn display_name(&self) -> String {
		format!("{} ({})", self.name, self.kind)
	}
}
