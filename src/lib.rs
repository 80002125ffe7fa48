//! Low-latency, callback-driven audio playback.
//!
//! `rtaudio` does two things:
//! - Enumerate the output devices of the host's default audio backend
//! - Play audio on one of them, where the samples are produced by a
//!   callback that the backend's real-time render thread pulls from
//!
//! ```rust,no_run
//! # fn main() -> Result<(), rtaudio::error::RtaError> {
//! use rtaudio::config::ContextConfig;
//!
//! // Pick the first output device.
//! let device = rtaudio::device(0)?;
//!
//! // Stereo silence at 48kHz.
//! let config = ContextConfig::new(2, 48_000, |output: &mut [f32], _frames: usize| {
//! 	output.fill(0.0);
//! });
//!
//! // Playback starts immediately.
//! let context = rtaudio::create_context(config, &device)?;
//!
//! // Stops the render thread, then releases the data source.
//! rtaudio::destroy_context(context);
//! # Ok(()) }
//! ```
//!
//! ## Real-time contract
//! The sample callback runs on the backend's render thread.
//! It must not block, allocate, lock or log - breaking this
//! will not be detected, it will just sound bad.
//!
//! ## Initialization
//! The backend is brought up lazily on first use (or explicitly with
//! [`ensure_initialized`]) and lives until the process exits.

//---------------------------------------------------------------------------------------------------- Lints
#![allow(
    clippy::len_zero,
    clippy::type_complexity,
    clippy::module_inception,
)]

#![deny(
    nonstandard_style,
    deprecated,
    missing_docs,
)]

#![forbid(
    unused_mut,
    unused_unsafe,
    future_incompatible,
    break_with_label_and_loop,
    coherence_leak_check,
    duplicate_macro_attributes,
    exported_private_dependencies,
    for_loops_over_fallibles,
    large_assignments,
    overlapping_range_endpoints,
    semicolon_in_expressions_from_macros,
    redundant_semicolons,
    unconditional_recursion,
    unreachable_patterns,
    unused_allocation,
    unused_braces,
    unused_comparisons,
    unused_doc_comments,
    unused_parens,
    unused_labels,
    while_true,
    keyword_idents,
    non_ascii_idents,
    noop_method_call,
	unreachable_pub,
    single_use_lifetimes,
)]

//---------------------------------------------------------------------------------------------------- Public API
pub mod config;
pub mod device;
pub mod error;
pub mod source;
pub mod context;

pub use backend::{
	ensure_initialized,
	is_initialized,
	backend_name,
};
pub use device::{
	device_count,
	devices,
	devices_into,
	device,
	platform_devices,
};
pub use context::{
	create_context,
	create_context_from_platform_id,
	destroy_context,
	PlaybackContext,
	ContextState,
};

//---------------------------------------------------------------------------------------------------- Private Usage
mod backend;
mod macros;

#[cfg(test)]
mod tests;

//----------------------------------------------------------------------------------------------------
