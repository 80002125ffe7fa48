//! Audio hardware output.
//!
//! This file implements the `Backend` trait
//! using `cpal` and the host's default audio API.
//!
//! For documentation on `Backend`, see `backend.rs`.

//---------------------------------------------------------------------------------------------------- use
use std::borrow::Cow;
use cpal::traits::{DeviceTrait,HostTrait,StreamTrait};
use crate::{
	backend::{
		Backend,
		BackendLog,
		LogLevel,
		StreamHandle,
		RawDevice,
		DeviceTarget,
		StreamRequest,
		RenderFn,
		ErrorFn,
	},
	device::{BackendInfo,DeviceKind,PlatformDevice},
	error::BackendError,
	source::SampleFormat,
};

//---------------------------------------------------------------------------------------------------- Constants
/// Name reported for devices whose name cannot be read.
const UNKNOWN_DEVICE_NAME: &str = "Unknown Device";

//---------------------------------------------------------------------------------------------------- CpalDescriptor
/// The opaque descriptor stored in a `cpal` device's `BackendInfo`.
///
/// `cpal` devices are re-found on open, the
/// position alone could point to a different
/// device after a (dis)connect, so the name
/// must match as well.
#[derive(Clone,Debug,PartialEq,Eq)]
struct CpalDescriptor {
	/// Position in `Host::devices()`.
	position: usize,
	/// Name at enumeration time.
	name: String,
}

//---------------------------------------------------------------------------------------------------- Cpal
/// The `cpal` backend, bound to the default host.
#[derive(Debug)]
pub(crate) struct Cpal {
	/// Which host API this was initialized with.
	host_id: cpal::HostId,
	/// Diagnostic sink.
	log: BackendLog,
}

impl Cpal {
	/// Connect to the host.
	fn host(&self) -> Result<cpal::Host, BackendError> {
		Ok(cpal::host_from_id(self.host_id)?)
	}

	/// Every device that can play, with its position in `Host::devices()`.
	fn playable(&self) -> Result<Vec<(usize, cpal::Device)>, BackendError> {
		let host = self.host()?;

		Ok(host
			.devices()?
			.enumerate()
			.filter(|(_, device)| {
				device
					.supported_output_configs()
					.map(|mut configs| configs.next().is_some())
					.unwrap_or(false)
			})
			.collect())
	}

	/// The device's name, or a placeholder.
	fn name(&self, device: &cpal::Device) -> String {
		match device.name() {
			Ok(name) => name,
			Err(error) => {
				self.log.emit(LogLevel::Warn, &format!("device name unavailable: {error}"));
				UNKNOWN_DEVICE_NAME.to_string()
			},
		}
	}

	/// Find the device `target` addresses.
	fn find(&self, target: DeviceTarget) -> Result<cpal::Device, BackendError> {
		let playable = self.playable()?;

		match target {
			DeviceTarget::Descriptor(info) => {
				let Some(descriptor) = info.downcast_ref::<CpalDescriptor>() else {
					return Err(BackendError::InvalidDescriptor);
				};
				playable
					.into_iter()
					.find(|(position, device)| {
						*position == descriptor.position &&
						device.name().map(|n| n == descriptor.name).unwrap_or(false)
					})
					.map(|(_, device)| device)
					.ok_or(BackendError::DeviceUnavailable)
			},
			DeviceTarget::PlatformId(id) => {
				let position = usize::try_from(id).map_err(|_| BackendError::UnknownPlatformId(id))?;
				playable
					.into_iter()
					.find(|(p, _)| *p == position)
					.map(|(_, device)| device)
					.ok_or(BackendError::UnknownPlatformId(id))
			},
		}
	}

	/// Build the `cpal` stream config for `request`, if the device supports it.
	fn stream_config(
		&self,
		device: &cpal::Device,
		request: &StreamRequest,
	) -> Result<cpal::StreamConfig, BackendError> {
		// SOMEDAY: support non-f32.
		if request.sample_format != SampleFormat::F32 {
			return Err(BackendError::UnsupportedConfig);
		}

		let rate = cpal::SampleRate(request.sample_rate);
		let Some(supported) = device
			.supported_output_configs()?
			.find(|c| {
				c.sample_format() == cpal::SampleFormat::F32 &&
				c.channels() == request.channel_count &&
				c.min_sample_rate() <= rate &&
				rate <= c.max_sample_rate()
			})
		else {
			return Err(BackendError::UnsupportedConfig);
		};

		// Only pin the buffer if asked to, and the device says what it accepts.
		let buffer_size = match (request.profile.fixed_buffer_frames(), supported.buffer_size()) {
			(Some(frames), cpal::SupportedBufferSize::Range { min, max }) => {
				cpal::BufferSize::Fixed(frames.clamp(*min, *max))
			},
			_ => cpal::BufferSize::Default,
		};

		Ok(cpal::StreamConfig {
			channels: request.channel_count,
			sample_rate: rate,
			buffer_size,
		})
	}
}

impl Backend for Cpal {
	type Stream = CpalStream;

	#[cold]
	#[inline(never)]
	fn init(log: BackendLog) -> Result<Self, BackendError> {
		let host_id = cpal::default_host().id();

		// Make sure the host is actually reachable.
		let host = cpal::host_from_id(host_id)?;
		drop(host.devices()?);

		log.emit(LogLevel::Info, &format!("initialized with host: {host_id:?}"));
		Ok(Self { host_id, log })
	}

	fn output_devices(&self) -> Result<Vec<RawDevice>, BackendError> {
		Ok(self
			.playable()?
			.into_iter()
			.map(|(position, device)| {
				let name = self.name(&device);
				RawDevice {
					info: BackendInfo::new(CpalDescriptor { position, name: name.clone() }),
					name,
				}
			})
			.collect())
	}

	fn platform_devices(&self) -> Result<Vec<PlatformDevice>, BackendError> {
		Ok(self
			.playable()?
			.into_iter()
			.filter_map(|(position, device)| {
				// Positions past `i32::MAX` are not addressable.
				let id = i32::try_from(position).ok()?;
				Some(PlatformDevice {
					id,
					name: self.name(&device),
					// `cpal` does not report form factors.
					kind: DeviceKind::Unknown,
				})
			})
			.collect())
	}

	#[cold]
	#[inline(never)]
	fn open(
		&self,
		target: DeviceTarget,
		request: &StreamRequest,
		mut render: RenderFn,
		mut on_error: ErrorFn,
	) -> Result<Self::Stream, BackendError> {
		self.log.emit(LogLevel::Trace, &format!("open() - target: {target:?}, request: {request:?}"));

		let device = self.find(target)?;
		let config = self.stream_config(&device, request)?;
		self.log.emit(LogLevel::Debug, &format!("config: {config:?}"));

		// The actual callback `cpal` will call when polling for audio data.
		let data_callback = move |output: &mut [f32], _: &cpal::OutputCallbackInfo| {
			render(output);
		};

		// The callback `cpal` will call when errors occur.
		let log = self.log;
		let error_callback = move |error: cpal::StreamError| {
			log.emit(LogLevel::Error, &format!("stream error: {error}"));
			on_error(error.into());
		};

		// `cpal` streams may start playing as soon as they are
		// built, pause it so a freshly opened stream is not running.
		let stream = device.build_output_stream(&config, data_callback, error_callback, None)?;
		stream.pause()?;

		Ok(CpalStream {
			stream,
			playing: false,
			log: self.log,
		})
	}
}

//---------------------------------------------------------------------------------------------------- CpalStream
/// An opened `cpal` output stream.
///
/// Dropping the inner `cpal::Stream` blocks until the
/// host's audio thread has exited, only after that are
/// the data/error callbacks (and everything they own) dropped.
pub(crate) struct CpalStream {
	/// The actual audio stream.
	stream: cpal::Stream,
	/// Are we currently playing?
	playing: bool,
	/// Diagnostic sink.
	log: BackendLog,
}

impl StreamHandle for CpalStream {
	fn start(&mut self) -> Result<(), BackendError> {
		self.log.emit(LogLevel::Debug, "start()");
		self.stream.play()?;
		self.playing = true;
		Ok(())
	}

	fn stop(&mut self) -> Result<(), BackendError> {
		self.log.emit(LogLevel::Debug, "stop()");
		self.stream.pause()?;
		self.playing = false;
		Ok(())
	}

	fn is_running(&self) -> bool {
		self.playing
	}
}

//---------------------------------------------------------------------------------------------------- Error re-map
impl From<cpal::HostUnavailable> for BackendError {
	fn from(_: cpal::HostUnavailable) -> Self {
		Self::HostUnavailable
	}
}

impl From<cpal::DevicesError> for BackendError {
	fn from(error: cpal::DevicesError) -> Self {
		use cpal::DevicesError as E;
		match error {
			E::BackendSpecific { err } => Self::Unknown(Cow::Owned(err.description)),
		}
	}
}

impl From<cpal::SupportedStreamConfigsError> for BackendError {
	fn from(error: cpal::SupportedStreamConfigsError) -> Self {
		use cpal::SupportedStreamConfigsError as E;
		match error {
			E::DeviceNotAvailable => Self::DeviceUnavailable,
			E::InvalidArgument => Self::UnsupportedConfig,
			E::BackendSpecific { err } => Self::Unknown(Cow::Owned(err.description)),
		}
	}
}

impl From<cpal::StreamError> for BackendError {
	fn from(error: cpal::StreamError) -> Self {
		use cpal::StreamError as E;
		match error {
			E::DeviceNotAvailable => Self::DeviceUnavailable,
			E::BackendSpecific { err } => Self::Unknown(Cow::Owned(err.description)),
		}
	}
}

impl From<cpal::BuildStreamError> for BackendError {
	fn from(error: cpal::BuildStreamError) -> Self {
		use cpal::BuildStreamError as E;
		match error {
			E::DeviceNotAvailable | E::InvalidArgument | E::StreamIdOverflow => Self::DeviceUnavailable,
			E::StreamConfigNotSupported => Self::UnsupportedConfig,
			E::BackendSpecific { err } => Self::Unknown(Cow::Owned(err.description)),
		}
	}
}

impl From<cpal::PlayStreamError> for BackendError {
	fn from(error: cpal::PlayStreamError) -> Self {
		use cpal::PlayStreamError as E;
		match error {
			E::DeviceNotAvailable => Self::DeviceUnavailable,
			E::BackendSpecific { err } => Self::Unknown(Cow::Owned(err.description)),
		}
	}
}

impl From<cpal::PauseStreamError> for BackendError {
	fn from(error: cpal::PauseStreamError) -> Self {
		use cpal::PauseStreamError as E;
		match error {
			E::DeviceNotAvailable => Self::DeviceUnavailable,
			E::BackendSpecific { err } => Self::Unknown(Cow::Owned(err.description)),
		}
	}
}
