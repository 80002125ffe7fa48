//---------------------------------------------------------------------------------------------------- use
use std::fmt;
use crossbeam::channel::Receiver;
use crate::{
	backend::{
		backend,
		Backend,
		StreamHandle,
		StreamStruct,
		DeviceTarget,
		StreamRequest,
		RenderFn,
		ErrorFn,
	},
	config::{ContextConfig,STREAM_ERROR_QUEUE_LEN},
	context::ContextState,
	device::AudioDevice,
	error::{BackendError,RtaError},
	source::{CallbackDataSource,DataSource,DataFormat,SampleFormat},
	macros::{debug2,trace2,warn2},
};

//---------------------------------------------------------------------------------------------------- PlaybackContext
/// One output device, playing samples produced by one callback.
///
/// Playback starts as soon as the context is created and
/// continues until it is destroyed (or dropped).
///
/// The context exclusively owns the device stream and the
/// [`CallbackDataSource`] the stream's render thread pulls from.
///
/// ## Teardown ordering
/// Destroying a context always:
/// 1. Stops the stream, blocking until the render thread has quiesced
/// 2. Releases the data source (and the user callback inside it)
/// 3. Releases the device handle
///
/// so the callback is never invoked after [`PlaybackContext::destroy`] returns.
///
/// ```rust,no_run
/// # use rtaudio::*;
/// # use rtaudio::config::*;
/// let device = rtaudio::device(0).unwrap();
/// let config = ContextConfig::new(2, 44_100, |output: &mut [f32], _: usize| output.fill(0.0));
///
/// let mut context = PlaybackContext::create(config, &device).unwrap();
/// assert_eq!(context.state(), ContextState::Running);
/// assert!(context.is_running());
///
/// context.destroy();
/// assert_eq!(context.state(), ContextState::Destroyed);
/// assert!(!context.is_running());
///
/// // Idempotent.
/// context.destroy();
/// ```
pub struct PlaybackContext {
	/// The device stream, owning the render function
	/// which owns the data source.
	///
	/// `None` after `destroy()`.
	stream: Option<StreamStruct>,

	/// Format the stream was opened with.
	format: DataFormat,

	/// Lifecycle state.
	state: ContextState,

	/// Errors the backend reported while streaming.
	errors: Receiver<BackendError>,
}

//---------------------------------------------------------------------------------------------------- PlaybackContext Impl
impl PlaybackContext {
	#[cold]
	#[inline(never)]
	/// Open `device` and start playing samples from `config`'s callback.
	///
	/// This initializes the backend if needed.
	///
	/// # Errors
	/// - [`RtaError::BackendInit`] if the backend could not be brought up
	/// - [`RtaError::InvalidConfig`] if `config` fails [`ContextConfig::validate`]
	/// - [`RtaError::DeviceInit`] if the device could not be opened or started
	///
	/// On error, no render thread is running and
	/// every resource (including the callback) has been released.
	pub fn create(config: ContextConfig, device: &AudioDevice) -> Result<Self, RtaError> {
		trace2!("PlaybackContext - create(), device: {}", device.name());
		Self::create_inner(config, DeviceTarget::Descriptor(device.backend_info().clone()))
	}

	#[cold]
	#[inline(never)]
	/// Same as [`PlaybackContext::create`], but addresses the device
	/// with a raw platform-specific id instead of an [`AudioDevice`].
	///
	/// The ids of [`platform_devices`](crate::platform_devices) are always accepted.
	///
	/// ```rust,no_run
	/// # use rtaudio::*;
	/// # use rtaudio::config::*;
	/// # use rtaudio::error::*;
	/// let id = rtaudio::platform_devices().unwrap()[0].id;
	/// let config = ContextConfig::new(2, 44_100, |output: &mut [f32], _: usize| output.fill(0.0));
	/// let context = PlaybackContext::create_from_platform_id(config, id).unwrap();
	/// rtaudio::destroy_context(context);
	///
	/// let config = ContextConfig::new(2, 44_100, |output: &mut [f32], _: usize| output.fill(0.0));
	/// let error = PlaybackContext::create_from_platform_id(config, -1).unwrap_err();
	/// assert_eq!(error.code(), ResultCode::DeviceInitFailed);
	/// ```
	///
	/// # Errors
	/// Same as [`PlaybackContext::create`].
	pub fn create_from_platform_id(config: ContextConfig, platform_id: i32) -> Result<Self, RtaError> {
		trace2!("PlaybackContext - create_from_platform_id(), platform_id: {platform_id}");
		Self::create_inner(config, DeviceTarget::PlatformId(platform_id))
	}

	/// Both creation paths.
	///
	/// Every early return drops whatever was built so far
	/// in reverse order, there is nothing to clean up by hand.
	fn create_inner(config: ContextConfig, target: DeviceTarget) -> Result<Self, RtaError> {
		let backend = backend()?;

		config.validate()?;

		let ContextConfig {
			channel_count,
			sample_rate,
			sample_callback,
			performance_profile,
		} = config;

		let Some(sample_callback) = sample_callback else {
			return Err(RtaError::InvalidConfig("sample_callback"));
		};

		let source = CallbackDataSource::with_callback(channel_count, sample_rate, sample_callback);
		let format = source.format();

		let request = StreamRequest {
			channel_count,
			sample_rate,
			sample_format: SampleFormat::F32,
			profile: performance_profile,
		};

		let (on_error, errors) = error_queue();

		// `render` owns `source`, which owns the callback.
		let render = render_fn(source);

		// If this fails, `render` (and so the source) was already dropped.
		let mut stream = backend
			.open(target, &request, render, on_error)
			.map_err(RtaError::DeviceInit)?;

		// If this fails, `stream` is dropped on return, which
		// makes sure the render thread is gone before the source is.
		stream.start().map_err(RtaError::DeviceInit)?;

		debug2!("PlaybackContext - running: {format:?}");

		Ok(Self {
			stream: Some(stream),
			format,
			state: ContextState::Running,
			errors,
		})
	}

	#[cold]
	#[inline(never)]
	/// Stop playback and release every resource.
	///
	/// This blocks until the render thread has quiesced,
	/// the callback is never invoked after this returns.
	///
	/// Calling this on an already destroyed context does nothing.
	pub fn destroy(&mut self) {
		let Some(mut stream) = self.stream.take() else {
			return;
		};

		trace2!("PlaybackContext - destroy()");

		// Dropping the stream stops it as well,
		// this is just to surface the failure.
		if let Err(error) = stream.stop() {
			warn2!("PlaybackContext - stop failed: {error}");
		}

		drop(stream);
		self.state = ContextState::Destroyed;
	}

	#[inline]
	#[must_use]
	/// The current lifecycle state.
	pub const fn state(&self) -> ContextState {
		self.state
	}

	#[inline]
	#[must_use]
	/// The format the stream was opened with.
	///
	/// This is always `f32` with the identity channel map.
	pub const fn format(&self) -> DataFormat {
		self.format
	}

	#[must_use]
	/// Is the render thread currently calling the callback?
	pub fn is_running(&self) -> bool {
		self.stream.as_ref().is_some_and(|stream| stream.is_running())
	}

	#[must_use]
	/// Pop the oldest error the backend reported while streaming.
	///
	/// This never blocks. Up to a fixed amount of errors are
	/// queued, errors reported while the queue is full are lost.
	pub fn take_stream_error(&self) -> Option<RtaError> {
		self.errors.try_recv().ok().map(RtaError::Stream)
	}
}

//---------------------------------------------------------------------------------------------------- Free functions
/// The backend's error function, and the context's end of its queue.
///
/// At most [`STREAM_ERROR_QUEUE_LEN`] errors are held,
/// errors reported while the queue is full are dropped.
fn error_queue() -> (ErrorFn, Receiver<BackendError>) {
	let (error_send, errors) = crossbeam::channel::bounded(STREAM_ERROR_QUEUE_LEN);

	let on_error: ErrorFn = Box::new(move |error: BackendError| {
		// Never block the render thread.
		drop(error_send.try_send(error));
	});

	(on_error, errors)
}

/// Build the function the backend's render thread calls.
///
/// Each call pulls exactly as many frames
/// as the device's output buffer holds.
fn render_fn(mut source: CallbackDataSource) -> RenderFn {
	let channels = usize::from(source.format().channel_count);

	Box::new(move |output: &mut [f32]| {
		let frame_count = output.len() / channels;
		if source.read(output, frame_count).is_err() {
			output.fill(0.0);
		}
	})
}

/// Create a [`PlaybackContext`] on `device`.
///
/// Same as [`PlaybackContext::create`].
///
/// # Errors
/// Same as [`PlaybackContext::create`].
pub fn create_context(config: ContextConfig, device: &AudioDevice) -> Result<PlaybackContext, RtaError> {
	PlaybackContext::create(config, device)
}

/// Create a [`PlaybackContext`] on a platform device id.
///
/// Same as [`PlaybackContext::create_from_platform_id`].
///
/// # Errors
/// Same as [`PlaybackContext::create`].
pub fn create_context_from_platform_id(config: ContextConfig, platform_id: i32) -> Result<PlaybackContext, RtaError> {
	PlaybackContext::create_from_platform_id(config, platform_id)
}

/// Destroy a [`PlaybackContext`].
///
/// Same as [`PlaybackContext::destroy`], but consumes the context.
pub fn destroy_context(mut context: PlaybackContext) {
	context.destroy();
}

//---------------------------------------------------------------------------------------------------- Trait Impl
impl Drop for PlaybackContext {
	#[cold]
	#[inline(never)]
	fn drop(&mut self) {
		self.destroy();
	}
}

impl fmt::Debug for PlaybackContext {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("PlaybackContext")
			.field("format",  &self.format)
			.field("state",   &self.state)
			.field("running", &self.is_running())
			.finish_non_exhaustive()
	}
}

//---------------------------------------------------------------------------------------------------- Tests
#[cfg(test)]
mod tests {
	use super::*;
	use std::{
		sync::{Arc,atomic::Ordering},
		time::Duration,
	};
	use crate::{
		backend::dummy::live_streams,
		config::PerformanceProfile,
		error::ResultCode,
		tests::{serial,counting_config,wait_for_calls},
	};
	use pretty_assertions::assert_eq;

	fn silence_config() -> ContextConfig {
		ContextConfig::new(2, 44_100, |output: &mut [f32], _: usize| output.fill(0.0))
	}

	#[test]
	fn create_destroy_silence() {
		let _lock = serial();
		let device = crate::device(0).unwrap();

		let (config, calls) = counting_config(2, 44_100);
		let mut context = create_context(config, &device).unwrap();
		assert_eq!(context.state(), ContextState::Running);
		assert!(context.is_running());

		context.destroy();
		assert_eq!(context.state(), ContextState::Destroyed);
		assert!(!context.is_running());

		// Not invoked after `destroy()` returns.
		let after = calls.load(Ordering::SeqCst);
		std::thread::sleep(Duration::from_millis(30));
		assert_eq!(calls.load(Ordering::SeqCst), after);

		// The callback was released.
		assert_eq!(Arc::strong_count(&calls), 1);
	}

	#[test]
	fn callback_is_invoked() {
		let _lock = serial();
		let device = crate::device(1).unwrap();

		let (mut config, calls) = counting_config(8, 48_000);
		config.performance_profile(PerformanceProfile::Conservative);

		let context = create_context(config, &device).unwrap();
		assert!(wait_for_calls(&calls, 3));

		assert_eq!(context.format().channel_count, 8);
		assert_eq!(context.format().sample_rate, 48_000);
		assert_eq!(context.format().sample_format, SampleFormat::F32);

		destroy_context(context);
		assert_eq!(Arc::strong_count(&calls), 1);
	}

	#[test]
	fn cycles_do_not_leak() {
		let _lock = serial();
		let baseline = live_streams();
		let device   = crate::device(0).unwrap();

		for _ in 0..100 {
			let (config, calls) = counting_config(2, 44_100);
			let context = create_context(config, &device).unwrap();
			assert_eq!(live_streams(), baseline + 1);

			destroy_context(context);
			assert_eq!(live_streams(), baseline);
			assert_eq!(Arc::strong_count(&calls), 1);
		}
	}

	#[test]
	fn drop_destroys() {
		let _lock = serial();
		let baseline = live_streams();

		let (config, calls) = counting_config(2, 44_100);
		let context = create_context_from_platform_id(config, 100).unwrap();
		assert_eq!(live_streams(), baseline + 1);

		drop(context);
		assert_eq!(live_streams(), baseline);
		assert_eq!(Arc::strong_count(&calls), 1);
	}

	#[test]
	fn double_destroy() {
		let _lock = serial();
		let baseline = live_streams();

		let mut context = create_context_from_platform_id(silence_config(), 101).unwrap();
		context.destroy();
		context.destroy();
		assert_eq!(context.state(), ContextState::Destroyed);
		drop(context);

		assert_eq!(live_streams(), baseline);
	}

	#[test]
	fn every_platform_id_is_accepted() {
		let _lock = serial();

		for device in crate::platform_devices().unwrap() {
			let context = create_context_from_platform_id(silence_config(), device.id).unwrap();
			assert!(context.is_running());
		}
	}

	#[test]
	fn unknown_platform_id() {
		let _lock = serial();
		let baseline = live_streams();

		for id in [-1, 0, 99, 104, i32::MAX] {
			let (config, calls) = counting_config(2, 44_100);
			let error = create_context_from_platform_id(config, id).unwrap_err();

			assert!(matches!(error, RtaError::DeviceInit(BackendError::UnknownPlatformId(i)) if i == id));
			assert_eq!(error.code(), ResultCode::DeviceInitFailed);
			assert_eq!(live_streams(), baseline);
			assert_eq!(Arc::strong_count(&calls), 1);
			assert_eq!(calls.load(Ordering::SeqCst), 0);
		}
	}

	#[test]
	fn unsupported_config_releases_source() {
		let _lock = serial();
		let baseline = live_streams();
		let device   = crate::device(0).unwrap();

		// More channels than the device has.
		let (config, calls) = counting_config(64, 44_100);
		let error = create_context(config, &device).unwrap_err();

		assert!(matches!(error, RtaError::DeviceInit(BackendError::UnsupportedConfig)));
		assert_eq!(live_streams(), baseline);
		assert_eq!(Arc::strong_count(&calls), 1);
		assert_eq!(calls.load(Ordering::SeqCst), 0);
	}

	#[test]
	fn invalid_config() {
		let device = crate::device(0).unwrap();

		let error = create_context(ContextConfig::DEFAULT, &device).unwrap_err();
		assert!(matches!(error, RtaError::InvalidConfig("sample_callback")));
		assert_eq!(error.code(), ResultCode::InvalidArgument);

		let mut config = silence_config();
		config.channels(0);
		let error = create_context(config, &device).unwrap_err();
		assert!(matches!(error, RtaError::InvalidConfig("channel_count")));

		let mut config = silence_config();
		config.sample_rate(0);
		let error = create_context_from_platform_id(config, 100).unwrap_err();
		assert!(matches!(error, RtaError::InvalidConfig("sample_rate")));
	}

	#[test]
	fn render_thread_panic_is_reported() {
		let _lock = serial();
		let baseline = live_streams();

		let calls  = Arc::new(std::sync::atomic::AtomicUsize::new(0));
		let calls2 = Arc::clone(&calls);
		let config = ContextConfig::new(2, 44_100, move |_: &mut [f32], _: usize| {
			calls2.fetch_add(1, Ordering::SeqCst);
			panic!("callback failure");
		});

		let mut context = create_context_from_platform_id(config, 100).unwrap();
		assert!(wait_for_calls(&calls, 1));
		assert!(context.take_stream_error().is_none());

		// Joining the dead render thread surfaces the panic.
		context.destroy();
		assert_eq!(context.state(), ContextState::Destroyed);
		assert_eq!(live_streams(), baseline);

		match context.take_stream_error() {
			Some(RtaError::Stream(BackendError::Unknown(_))) => (),
			other => panic!("expected a stream error, got: {other:?}"),
		}
		assert!(context.take_stream_error().is_none());

		// The callback was released during the unwind.
		assert_eq!(Arc::strong_count(&calls), 1);
		assert_eq!(calls.load(Ordering::SeqCst), 1);
	}

	#[test]
	fn error_queue_drops_newest_when_full() {
		let (mut on_error, errors) = error_queue();
		let len = i32::try_from(STREAM_ERROR_QUEUE_LEN).unwrap();

		// Report more than fit.
		for id in 0..len + 4 {
			on_error(BackendError::UnknownPlatformId(id));
		}

		let queued: Vec<i32> = errors
			.try_iter()
			.map(|error| match error {
				BackendError::UnknownPlatformId(id) => id,
				other => panic!("unexpected error: {other:?}"),
			})
			.collect();

		// The oldest are kept, in order.
		assert_eq!(queued, (0..len).collect::<Vec<i32>>());

		// Space frees up once drained.
		on_error(BackendError::DeviceUnavailable);
		assert!(matches!(errors.try_recv(), Ok(BackendError::DeviceUnavailable)));
	}

	#[test]
	fn no_stream_errors_on_healthy_stream() {
		let _lock = serial();
		let context = create_context_from_platform_id(silence_config(), 100).unwrap();
		assert!(context.take_stream_error().is_none());
	}

	#[test]
	fn debug() {
		let _lock = serial();
		let context = create_context_from_platform_id(silence_config(), 100).unwrap();
		let debug = format!("{context:?}");
		assert!(debug.contains("state: Running"));
		assert!(debug.contains("running: true"));
	}
}
