//! Dummy audio backend.
//!
//! This implements the `Backend` trait without
//! connecting to any audio hardware/server.
//!
//! It has a fixed table of fake output devices, and a started
//! stream spawns a real render thread that calls the render
//! function at the pace real hardware would (`frames / sample_rate`),
//! writing into a buffer that goes nowhere.
//!
//! Functionally, it should behave the exact same
//! as other backends, except it doesn't actually
//! play any audio.
//!
//! This is used for testing purposes, and as the
//! fallback when no real backend is compiled in.

//---------------------------------------------------------------------------------------------------- use
use std::{
	borrow::Cow,
	ops::RangeInclusive,
	sync::atomic::{AtomicUsize,Ordering},
	thread::JoinHandle,
	time::Duration,
};
use crossbeam::channel::{Sender,RecvTimeoutError};
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
/// Sample rates every dummy device accepts.
pub(crate) const SAMPLE_RATE_RANGE: RangeInclusive<u32> = 8_000..=384_000;

/// Name of the render threads.
const RENDER_THREAD_NAME: &str = "rtaudio-dummy-render";

/// A name longer than any backend should report.
pub(crate) const LONG_NAME: &str = concat!(
	"Dummy USB Audio Interface with an Unreasonably Long Product Name ",
	"That Keeps Going Past Every Sensible Limit a Device Name Could Have ",
	"Because Some Vendors Really Do Put the Serial Number, the Firmware ",
	"Revision, the Marketing Tagline and the Country of Origin Into It ",
	"Just to Be Sure",
);

/// The fake output devices, in enumeration order.
pub(crate) static DEVICES: [DummyDevice; 4] = [
	DummyDevice { platform_id: 100, name: "Dummy Speakers",       kind: DeviceKind::Speaker,   max_channels: 2 },
	DummyDevice { platform_id: 101, name: "Dummy HDMI Surround",  kind: DeviceKind::Hdmi,      max_channels: 8 },
	DummyDevice { platform_id: 102, name: LONG_NAME,              kind: DeviceKind::UsbDevice, max_channels: 2 },
	DummyDevice { platform_id: 103, name: "Dummy Voice Earpiece", kind: DeviceKind::Telephony, max_channels: 1 },
];

//---------------------------------------------------------------------------------------------------- Statics
/// Amount of opened (not yet dropped) streams, process-wide.
static LIVE_STREAMS: AtomicUsize = AtomicUsize::new(0);

#[cfg(test)]
/// Amount of opened (not yet dropped) streams, process-wide.
pub(crate) fn live_streams() -> usize {
	LIVE_STREAMS.load(Ordering::SeqCst)
}

//---------------------------------------------------------------------------------------------------- DummyDevice
/// A fake output device.
#[derive(Copy,Clone,Debug,PartialEq,Eq)]
pub(crate) struct DummyDevice {
	/// Platform id, also used as the descriptor.
	pub(crate) platform_id: i32,
	/// Product name.
	pub(crate) name: &'static str,
	/// Kind of hardware.
	pub(crate) kind: DeviceKind,
	/// Most channels the device accepts.
	pub(crate) max_channels: u16,
}

impl DummyDevice {
	/// Find a device by platform id.
	fn find(platform_id: i32) -> Option<&'static Self> {
		DEVICES.iter().find(|d| d.platform_id == platform_id)
	}

	/// Would this device accept `request`?
	fn supports(&self, request: &StreamRequest) -> bool {
		request.sample_format == SampleFormat::F32 &&
		request.channel_count != 0 &&
		request.channel_count <= self.max_channels &&
		SAMPLE_RATE_RANGE.contains(&request.sample_rate)
	}
}

/// The opaque descriptor stored in a dummy device's `BackendInfo`.
#[derive(Copy,Clone,Debug,PartialEq,Eq)]
struct DummyDescriptor {
	/// Which device in `DEVICES`.
	platform_id: i32,
}

//---------------------------------------------------------------------------------------------------- Dummy
/// A backend that plays into the void.
#[derive(Debug)]
pub(crate) struct Dummy {
	/// Diagnostic sink.
	log: BackendLog,
}

impl Backend for Dummy {
	type Stream = DummyStream;

	#[cold]
	#[inline(never)]
	fn init(log: BackendLog) -> Result<Self, BackendError> {
		log.emit(LogLevel::Info, &format!("initialized with {} devices", DEVICES.len()));
		Ok(Self { log })
	}

	fn output_devices(&self) -> Result<Vec<RawDevice>, BackendError> {
		Ok(DEVICES
			.iter()
			.map(|d| RawDevice {
				name: d.name.to_string(),
				info: BackendInfo::new(DummyDescriptor { platform_id: d.platform_id }),
			})
			.collect())
	}

	fn platform_devices(&self) -> Result<Vec<PlatformDevice>, BackendError> {
		Ok(DEVICES
			.iter()
			.map(|d| PlatformDevice {
				id: d.platform_id,
				name: d.name.to_string(),
				kind: d.kind,
			})
			.collect())
	}

	#[cold]
	#[inline(never)]
	fn open(
		&self,
		target: DeviceTarget,
		request: &StreamRequest,
		render: RenderFn,
		on_error: ErrorFn,
	) -> Result<Self::Stream, BackendError> {
		self.log.emit(LogLevel::Trace, &format!("open() - target: {target:?}, request: {request:?}"));

		let device = match target {
			DeviceTarget::Descriptor(info) => {
				let Some(descriptor) = info.downcast_ref::<DummyDescriptor>() else {
					return Err(BackendError::InvalidDescriptor);
				};
				DummyDevice::find(descriptor.platform_id).ok_or(BackendError::DeviceUnavailable)?
			},
			DeviceTarget::PlatformId(id) => {
				DummyDevice::find(id).ok_or(BackendError::UnknownPlatformId(id))?
			},
		};

		if !device.supports(request) {
			self.log.emit(LogLevel::Warn, &format!("[{}] does not support {request:?}", device.name));
			return Err(BackendError::UnsupportedConfig);
		}

		LIVE_STREAMS.fetch_add(1, Ordering::SeqCst);
		self.log.emit(LogLevel::Debug, &format!("opened [{}]", device.name));

		Ok(DummyStream {
			render: Some(render),
			on_error,
			thread: None,
			shutdown: None,
			channel_count: request.channel_count,
			sample_rate: request.sample_rate,
			period_frames: request.profile.buffer_frames(),
			log: self.log,
		})
	}
}

//---------------------------------------------------------------------------------------------------- DummyStream
/// A stream on a fake device.
pub(crate) struct DummyStream {
	/// The render function, while the stream is stopped.
	///
	/// While running, the render thread owns it
	/// and hands it back when joined.
	render: Option<RenderFn>,
	/// Where render thread failures are reported.
	on_error: ErrorFn,
	/// The render thread, while running.
	thread: Option<JoinHandle<RenderFn>>,
	/// Dropping or sending to this stops the render thread.
	shutdown: Option<Sender<()>>,
	/// Interleaved channels per frame.
	channel_count: u16,
	/// Frames per second.
	sample_rate: u32,
	/// Frames per render call.
	period_frames: u32,
	/// Diagnostic sink.
	log: BackendLog,
}

impl DummyStream {
	/// How long one render call's worth of frames lasts.
	fn period(&self) -> Duration {
		Duration::from_secs_f64(f64::from(self.period_frames) / f64::from(self.sample_rate))
	}
}

impl StreamHandle for DummyStream {
	#[cold]
	fn start(&mut self) -> Result<(), BackendError> {
		if self.thread.is_some() {
			return Ok(());
		}

		let Some(mut render) = self.render.take() else {
			return Err(BackendError::Unknown(Cow::Borrowed("render function was lost")));
		};

		let samples = self.period_frames as usize * self.channel_count as usize;
		let period  = self.period();
		let (shutdown, shutdown_recv) = crossbeam::channel::bounded::<()>(1);

		let spawn = std::thread::Builder::new()
			.name(RENDER_THREAD_NAME.into())
			.spawn(move || {
				// The only allocation this thread does.
				let mut buf = vec![0.0_f32; samples];

				loop {
					match shutdown_recv.recv_timeout(period) {
						Err(RecvTimeoutError::Timeout) => render(&mut buf),
						// Stop signal, or the stream was dropped.
						Ok(()) | Err(RecvTimeoutError::Disconnected) => return render,
					}
				}
			});

		match spawn {
			Ok(thread) => {
				self.thread   = Some(thread);
				self.shutdown = Some(shutdown);
				self.log.emit(LogLevel::Debug, &format!("started, period: {period:?}"));
				Ok(())
			},
			Err(error) => Err(BackendError::ThreadSpawn(error)),
		}
	}

	#[cold]
	fn stop(&mut self) -> Result<(), BackendError> {
		let Some(thread) = self.thread.take() else {
			return Ok(());
		};

		if let Some(shutdown) = self.shutdown.take() {
			drop(shutdown.try_send(()));
		}

		// Hang until the render thread has returned,
		// after this the render function is never called again.
		match thread.join() {
			Ok(render) => {
				self.render = Some(render);
				self.log.emit(LogLevel::Debug, "stopped");
				Ok(())
			},
			Err(_) => {
				self.log.emit(LogLevel::Error, "render thread panicked");
				(self.on_error)(BackendError::Unknown(Cow::Borrowed("render thread panicked")));
				Err(BackendError::Unknown(Cow::Borrowed("render thread panicked")))
			},
		}
	}

	fn is_running(&self) -> bool {
		self.thread.is_some()
	}
}

impl Drop for DummyStream {
	#[cold]
	#[inline(never)]
	fn drop(&mut self) {
		// INVARIANT: the render thread must be joined
		// before `self.render` (and the data source it
		// owns) is dropped with the rest of the fields.
		drop(self.stop());
		LIVE_STREAMS.fetch_sub(1, Ordering::SeqCst);
	}
}

//---------------------------------------------------------------------------------------------------- Tests
#[cfg(test)]
mod tests {
	use super::*;
	use std::sync::Arc;
	use crate::config::PerformanceProfile;
	use pretty_assertions::assert_eq;

	fn request(channel_count: u16, sample_rate: u32) -> StreamRequest {
		StreamRequest {
			channel_count,
			sample_rate,
			sample_format: SampleFormat::F32,
			profile: PerformanceProfile::LowLatency,
		}
	}

	fn dummy() -> Dummy {
		Dummy::init(BackendLog::new("dummy")).unwrap()
	}

	fn counting_render() -> (RenderFn, Arc<AtomicUsize>) {
		let calls  = Arc::new(AtomicUsize::new(0));
		let calls2 = Arc::clone(&calls);
		let render: RenderFn = Box::new(move |output: &mut [f32]| {
			output.fill(0.0);
			calls2.fetch_add(1, Ordering::SeqCst);
		});
		(render, calls)
	}

	#[test]
	fn device_table() {
		assert!(LONG_NAME.len() > crate::config::DEVICE_NAME_MAX_BYTES);

		let backend = dummy();
		let devices = backend.output_devices().unwrap();
		assert_eq!(devices.len(), DEVICES.len());
		for (raw, device) in devices.iter().zip(DEVICES.iter()) {
			assert_eq!(raw.name, device.name);
		}

		let platform = backend.platform_devices().unwrap();
		let ids: Vec<i32> = platform.iter().map(|d| d.id).collect();
		assert_eq!(ids, [100, 101, 102, 103]);
	}

	#[test]
	fn open_rejects_unsupported() {
		let backend = dummy();

		let (render, _) = counting_render();
		let result = backend.open(DeviceTarget::PlatformId(100), &request(3, 44_100), render, Box::new(|_| {}));
		assert!(matches!(result, Err(BackendError::UnsupportedConfig)));

		let (render, _) = counting_render();
		let result = backend.open(DeviceTarget::PlatformId(100), &request(2, 1_000_000), render, Box::new(|_| {}));
		assert!(matches!(result, Err(BackendError::UnsupportedConfig)));

		let (render, calls) = counting_render();
		let result = backend.open(DeviceTarget::PlatformId(-1), &request(2, 44_100), render, Box::new(|_| {}));
		assert!(matches!(result, Err(BackendError::UnknownPlatformId(-1))));
		// The render function was dropped.
		assert_eq!(Arc::strong_count(&calls), 1);

		let info = BackendInfo::new("not a dummy descriptor");
		let (render, _) = counting_render();
		let result = backend.open(DeviceTarget::Descriptor(info), &request(2, 44_100), render, Box::new(|_| {}));
		assert!(matches!(result, Err(BackendError::InvalidDescriptor)));
	}

	#[test]
	fn start_stop_restart() {
		let _lock = crate::tests::serial();
		let backend = dummy();
		let (render, calls) = counting_render();
		let devices = backend.output_devices().unwrap();

		let mut stream = backend
			.open(DeviceTarget::Descriptor(devices[0].info.clone()), &request(2, 48_000), render, Box::new(|_| {}))
			.unwrap();
		assert!(!stream.is_running());
		assert_eq!(calls.load(Ordering::SeqCst), 0);

		stream.start().unwrap();
		assert!(stream.is_running());
		assert!(crate::tests::wait_for_calls(&calls, 1));

		stream.stop().unwrap();
		assert!(!stream.is_running());
		let after_stop = calls.load(Ordering::SeqCst);
		std::thread::sleep(Duration::from_millis(20));
		assert_eq!(calls.load(Ordering::SeqCst), after_stop);

		// The render function came back, the stream can start again.
		stream.start().unwrap();
		stream.stop().unwrap();

		drop(stream);
		assert_eq!(Arc::strong_count(&calls), 1);
	}

	#[test]
	fn period() {
		let _lock = crate::tests::serial();
		let backend = dummy();
		let (render, _) = counting_render();
		let stream = backend
			.open(DeviceTarget::PlatformId(101), &request(8, 32_000), render, Box::new(|_| {}))
			.unwrap();

		// 256 frames at 32kHz.
		assert_eq!(stream.period(), Duration::from_millis(8));
	}
}
