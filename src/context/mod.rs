//! Playback contexts.
//!
//! A [`PlaybackContext`] is one opened device with one
//! [`CallbackDataSource`](crate::source::CallbackDataSource)
//! attached to its render thread.

mod state;
pub use state::ContextState;

mod context;
pub use context::{
	PlaybackContext,
	create_context,
	create_context_from_platform_id,
	destroy_context,
};
