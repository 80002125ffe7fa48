//! Output device enumeration.
//!
//! Every function here re-queries the backend, so indices are
//! only meaningful within one enumeration snapshot - devices
//! may be (dis)connected between two calls. Take one snapshot
//! with [`devices`] and index into that if consistency matters.

mod device;
pub use device::{AudioDevice,BackendInfo};
pub(crate) use device::truncate_name;

mod platform;
pub use platform::{PlatformDevice,DeviceKind};

mod catalog;
pub use catalog::{
	device_count,
	devices,
	devices_into,
	device,
	platform_devices,
};
