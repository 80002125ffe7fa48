//---------------------------------------------------------------------------------------------------- use
use crate::{
	backend::{backend,Backend},
	device::{AudioDevice,PlatformDevice,truncate_name},
	error::RtaError,
	macros::{debug2,trace2},
};

//---------------------------------------------------------------------------------------------------- Free functions
/// Returns the amount of output devices.
///
/// This initializes the backend if needed.
///
/// ```rust,no_run
/// let count = rtaudio::device_count().unwrap();
/// assert_eq!(count, rtaudio::devices().unwrap().len());
/// ```
///
/// # Errors
/// - [`RtaError::BackendInit`] if the backend could not be brought up
/// - [`RtaError::DeviceQuery`] if the backend failed to list devices
pub fn device_count() -> Result<usize, RtaError> {
	let count = backend()?
		.output_devices()
		.map_err(RtaError::DeviceQuery)?
		.len();

	trace2!("rtaudio - device_count(): {count}");
	Ok(count)
}

/// Returns every output device, in backend order.
///
/// The returned `Vec` is one consistent snapshot,
/// device `i` is at index `i` and has [`AudioDevice::index`] `== i`.
///
/// # Errors
/// - [`RtaError::BackendInit`] if the backend could not be brought up
/// - [`RtaError::DeviceQuery`] if the backend failed to list devices
pub fn devices() -> Result<Vec<AudioDevice>, RtaError> {
	let mut vec = Vec::new();
	devices_into(&mut vec)?;
	Ok(vec)
}

/// Same as [`devices`], but reuses `buf`.
///
/// `buf` is cleared first, then filled with the snapshot.
///
/// Returns the amount of devices written.
///
/// ```rust,no_run
/// let mut buf = Vec::new();
/// let count = rtaudio::devices_into(&mut buf).unwrap();
/// assert_eq!(count, buf.len());
///
/// // Calling again replaces, it does not append.
/// assert_eq!(rtaudio::devices_into(&mut buf).unwrap(), count);
/// assert_eq!(buf.len(), count);
/// ```
///
/// # Errors
/// - [`RtaError::BackendInit`] if the backend could not be brought up
/// - [`RtaError::DeviceQuery`] if the backend failed to list devices
///
/// `buf` is left empty on error.
pub fn devices_into(buf: &mut Vec<AudioDevice>) -> Result<usize, RtaError> {
	buf.clear();

	let raw = backend()?
		.output_devices()
		.map_err(RtaError::DeviceQuery)?;

	buf.extend(
		raw
			.into_iter()
			.enumerate()
			.map(|(index, raw)| AudioDevice::new(index, raw.name, raw.info)),
	);

	debug2!("rtaudio - enumerated {} output devices", buf.len());
	Ok(buf.len())
}

/// Returns the output device at `index`.
///
/// `index` is only meaningful within one enumeration snapshot,
/// this takes a fresh one.
///
/// ```rust,no_run
/// # use rtaudio::error::*;
/// let first = rtaudio::device(0).unwrap();
/// assert_eq!(first.index(), 0);
///
/// let count = rtaudio::device_count().unwrap();
/// assert!(matches!(rtaudio::device(count), Err(RtaError::InvalidIndex { .. })));
/// ```
///
/// # Errors
/// - [`RtaError::BackendInit`] if the backend could not be brought up
/// - [`RtaError::DeviceQuery`] if the backend failed to list devices
/// - [`RtaError::InvalidIndex`] if `index >= device_count()`
pub fn device(index: usize) -> Result<AudioDevice, RtaError> {
	let mut raw = backend()?
		.output_devices()
		.map_err(RtaError::DeviceQuery)?;

	let count = raw.len();
	if index >= count {
		return Err(RtaError::InvalidIndex { index, count });
	}

	let raw = raw.swap_remove(index);
	Ok(AudioDevice::new(index, raw.name, raw.info))
}

/// Returns every output device addressable by a platform id.
///
/// Devices that cannot be used for media playback
/// (e.g. the telephony voice path) are not listed.
///
/// ```rust,no_run
/// for device in rtaudio::platform_devices().unwrap() {
/// 	assert!(device.kind.is_playback());
/// }
/// ```
///
/// # Errors
/// - [`RtaError::BackendInit`] if the backend could not be brought up
/// - [`RtaError::DeviceQuery`] if the backend failed to list devices
pub fn platform_devices() -> Result<Vec<PlatformDevice>, RtaError> {
	Ok(backend()?
		.platform_devices()
		.map_err(RtaError::DeviceQuery)?
		.into_iter()
		.filter(|device| device.kind.is_playback())
		.map(|mut device| {
			device.name = truncate_name(device.name);
			device
		})
		.collect())
}

//---------------------------------------------------------------------------------------------------- Tests
#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		backend::dummy::{DEVICES,LONG_NAME},
		config::DEVICE_NAME_MAX_BYTES,
		device::DeviceKind,
	};
	use pretty_assertions::assert_eq;

	#[test]
	fn count_matches_list() {
		let count = device_count().unwrap();
		let list  = devices().unwrap();
		assert_eq!(count, list.len());
		assert_eq!(count, DEVICES.len());
	}

	#[test]
	fn index_and_name_match() {
		let list = devices().unwrap();

		for (i, listed) in list.iter().enumerate() {
			assert_eq!(listed.index(), i);

			let single = device(i).unwrap();
			assert_eq!(single.index(), i);
			assert_eq!(single.name(), listed.name());
		}

		assert_eq!(list[0].name(), "Dummy Speakers");
	}

	#[test]
	fn index_out_of_range() {
		let count = device_count().unwrap();

		match device(count) {
			Err(RtaError::InvalidIndex { index, count: c }) => {
				assert_eq!(index, count);
				assert_eq!(c, count);
			},
			other => panic!("expected InvalidIndex, got: {other:?}"),
		}

		assert!(matches!(device(usize::MAX), Err(RtaError::InvalidIndex { .. })));
	}

	#[test]
	fn long_names_are_truncated() {
		let list = devices().unwrap();
		let long = &list[2];

		assert_eq!(long.name().len(), DEVICE_NAME_MAX_BYTES);
		assert!(LONG_NAME.starts_with(long.name()));
		assert!(list.iter().all(|d| d.name().len() <= DEVICE_NAME_MAX_BYTES));
	}

	#[test]
	fn devices_into_replaces() {
		let mut buf = devices().unwrap();
		buf.extend(devices().unwrap());
		assert_eq!(buf.len(), DEVICES.len() * 2);

		assert_eq!(devices_into(&mut buf).unwrap(), DEVICES.len());
		assert_eq!(buf.len(), DEVICES.len());
	}

	#[test]
	fn telephony_is_not_listed() {
		let list = platform_devices().unwrap();

		assert_eq!(list.len(), DEVICES.len() - 1);
		assert!(list.iter().all(|d| d.kind != DeviceKind::Telephony));
		assert_eq!(list[0].id, 100);
		assert_eq!(list[0].display_name(), "Dummy Speakers (speaker)");
		assert!(list.iter().all(|d| d.name.len() <= DEVICE_NAME_MAX_BYTES));
	}
}
