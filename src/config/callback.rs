//! The user-supplied sample production capability.

//---------------------------------------------------------------------------------------------------- SampleCallback
/// Something that produces interleaved `f32` samples on demand.
///
/// This is called on the backend's real-time render thread,
/// every time the device needs more audio.
///
/// `output` holds (at least) `frame_count * channel_count` samples,
/// interleaved by channel, e.g. for stereo: `[L0, R0, L1, R1, ...]`.
/// Every sample should be written, the previous contents are unspecified.
///
/// # Real-time contract
/// Implementations must:
/// - Return in bounded time (well under one buffer period)
/// - Not block (no locks, no channels that can wait, no I/O)
/// - Not allocate or free memory
/// - Not log
///
/// None of these can be checked, breaking them causes audible dropouts.
///
/// Any `FnMut(&mut [f32], usize) + Send + 'static` closure is a `SampleCallback`:
/// ```rust
/// # use rtaudio::config::*;
/// let mut phase = 0.0_f32;
/// let mut sine = move |output: &mut [f32], frame_count: usize| {
/// 	for frame in output.chunks_exact_mut(2).take(frame_count) {
/// 		let sample = (phase * std::f32::consts::TAU).sin() * 0.2;
/// 		frame.fill(sample);
/// 		phase = (phase + 440.0 / 48_000.0).fract();
/// 	}
/// };
///
/// let mut buf = [1.0; 8];
/// SampleCallback::fill(&mut sine, &mut buf, 4);
/// assert_eq!(buf[0], 0.0);
/// assert_eq!(buf[0], buf[1]);
/// ```
pub trait SampleCallback: Send + 'static {
	/// Fill `output` with `frame_count` frames.
	fn fill(&mut self, output: &mut [f32], frame_count: usize);
}

impl<F> SampleCallback for F
where
	F: FnMut(&mut [f32], usize) + Send + 'static,
{
	#[inline]
	fn fill(&mut self, output: &mut [f32], frame_count: usize) {
		self(output, frame_count);
	}
}
