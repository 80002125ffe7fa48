//---------------------------------------------------------------------------------------------------- use
use std::{
	any::Any,
	fmt,
	sync::Arc,
};
use crate::config::DEVICE_NAME_MAX_BYTES;

//---------------------------------------------------------------------------------------------------- BackendInfo
/// An opaque, backend-specific device descriptor.
///
/// This is carried around so that a device returned by
/// enumeration can later be opened, its contents are
/// only ever interpreted by the backend that created it.
#[derive(Clone)]
pub struct BackendInfo(Arc<dyn Any + Send + Sync>);

impl BackendInfo {
	#[inline]
	/// Wrap a backend descriptor.
	pub(crate) fn new<T: Any + Send + Sync>(descriptor: T) -> Self {
		Self(Arc::new(descriptor))
	}

	#[inline]
	/// Returns the descriptor if it is a `T`.
	pub(crate) fn downcast_ref<T: Any>(&self) -> Option<&T> {
		self.0.downcast_ref::<T>()
	}
}

impl fmt::Debug for BackendInfo {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("BackendInfo(_)")
	}
}

//---------------------------------------------------------------------------------------------------- AudioDevice
/// An output device, as returned by enumeration.
///
/// Its identity is its `index` within one enumeration snapshot,
/// the same physical device may have a different index later on.
#[derive(Clone,Debug)]
pub struct AudioDevice {
	/// Zero-based position in the snapshot.
	pub(crate) index: usize,
	/// Backend-reported name, at most [`DEVICE_NAME_MAX_BYTES`].
	pub(crate) name: String,
	/// What the backend needs to open this device again.
	pub(crate) info: BackendInfo,
}

impl AudioDevice {
	/// Create a device record, truncating `name` if needed.
	pub(crate) fn new(index: usize, name: String, info: BackendInfo) -> Self {
		Self {
			index,
			name: truncate_name(name),
			info,
		}
	}

	#[inline]
	#[must_use]
	/// Zero-based position in the enumeration snapshot.
	pub const fn index(&self) -> usize {
		self.index
	}

	#[inline]
	#[must_use]
	/// Human-readable device name.
	///
	/// This is at most [`DEVICE_NAME_MAX_BYTES`] long,
	/// longer backend names are silently truncated.
	pub fn name(&self) -> &str {
		&self.name
	}

	#[inline]
	#[must_use]
	/// The opaque backend descriptor.
	pub const fn backend_info(&self) -> &BackendInfo {
		&self.info
	}
}

//---------------------------------------------------------------------------------------------------- Free functions
/// Truncate `name` to [`DEVICE_NAME_MAX_BYTES`], on a `char` boundary.
pub(crate) fn truncate_name(mut name: String) -> String {
	if name.len() <= DEVICE_NAME_MAX_BYTES {
		return name;
	}

	// Walk back to the nearest `char` boundary,
	// index 0 is always one so this terminates.
	let mut end = DEVICE_NAME_MAX_BYTES;
	while !name.is_char_boundary(end) {
		end -= 1;
	}

	name.truncate(end);
	name
}

//---------------------------------------------------------------------------------------------------- Tests
#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	#[test]
	fn short_names_are_untouched() {
		assert_eq!(truncate_name(String::new()), "");
		assert_eq!(truncate_name("Speakers".into()), "Speakers");

		let exact = "a".repeat(DEVICE_NAME_MAX_BYTES);
		assert_eq!(truncate_name(exact.clone()), exact);
	}

	#[test]
	fn long_names_are_truncated() {
		let long = "b".repeat(DEVICE_NAME_MAX_BYTES + 100);
		let name = truncate_name(long);
		assert_eq!(name.len(), DEVICE_NAME_MAX_BYTES);
	}

	#[test]
	fn truncation_respects_char_boundaries() {
		// 254 ASCII bytes, then a 3-byte char straddling the limit.
		let mut long = "c".repeat(DEVICE_NAME_MAX_BYTES - 1);
		long.push('音');
		long.push_str("tail");

		let name = truncate_name(long);
		assert_eq!(name.len(), DEVICE_NAME_MAX_BYTES - 1);
		assert!(name.chars().all(|c| c == 'c'));
	}

	#[test]
	fn backend_info_downcast() {
		let info = BackendInfo::new(7_u32);
		assert_eq!(info.downcast_ref::<u32>(), Some(&7));
		assert_eq!(info.downcast_ref::<i64>(), None);
		assert_eq!(format!("{info:?}"), "BackendInfo(_)");
	}
}
