//! The backend diagnostic sink.

//---------------------------------------------------------------------------------------------------- use
use strum::{
	AsRefStr,
	Display,
	IntoStaticStr,
};

//---------------------------------------------------------------------------------------------------- Constants
/// The `log` target backend diagnostics are written under.
#[cfg_attr(not(feature = "log"), allow(dead_code))]
pub(crate) const LOG_TARGET: &str = "rtaudio::backend";

//---------------------------------------------------------------------------------------------------- LogLevel
/// Severity of a backend diagnostic.
#[derive(Copy,Clone,Debug,PartialEq,PartialOrd,Eq,Ord,Hash)]
#[derive(AsRefStr,Display,IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub(crate) enum LogLevel {
	Error,
	Warn,
	Info,
	Debug,
	Trace,
}

#[cfg(feature = "log")]
impl From<LogLevel> for log::Level {
	fn from(level: LogLevel) -> Self {
		match level {
			LogLevel::Error => Self::Error,
			LogLevel::Warn  => Self::Warn,
			LogLevel::Info  => Self::Info,
			LogLevel::Debug => Self::Debug,
			LogLevel::Trace => Self::Trace,
		}
	}
}

//---------------------------------------------------------------------------------------------------- BackendLog
/// Forwards backend diagnostics to the process log.
///
/// Installed into the backend when it is initialized.
/// Never used on the render path (except for errors,
/// which already mean the audio is broken).
#[derive(Copy,Clone,Debug,PartialEq,Eq)]
pub(crate) struct BackendLog {
	/// Name of the backend emitting diagnostics.
	backend: &'static str,
}

impl BackendLog {
	#[inline]
	pub(crate) const fn new(backend: &'static str) -> Self {
		Self { backend }
	}

	/// Format a diagnostic, `[<level>] <backend>: <message>`.
	#[cfg_attr(not(feature = "log"), allow(dead_code))]
	pub(crate) fn format(self, level: LogLevel, message: &str) -> String {
		format!("[{level}] {}: {message}", self.backend)
	}

	/// Send a diagnostic to the process log.
	pub(crate) fn emit(self, level: LogLevel, message: &str) {
		#[cfg(feature = "log")]
		{
			let log_level: log::Level = level.into();
			if log::log_enabled!(target: LOG_TARGET, log_level) {
				log::log!(target: LOG_TARGET, log_level, "{}", self.format(level, message));
			}
		}

		#[cfg(not(feature = "log"))]
		{
			let _ = (self, level, message);
		}
	}
}

//---------------------------------------------------------------------------------------------------- Tests
#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	#[test]
	fn format() {
		let log = BackendLog::new("dummy");
		assert_eq!(log.format(LogLevel::Warn, "device vanished"), "[warn] dummy: device vanished");
		assert_eq!(log.format(LogLevel::Error, ""), "[error] dummy: ");
	}

	#[test]
	fn levels_are_ordered_by_severity() {
		assert!(LogLevel::Error < LogLevel::Warn);
		assert!(LogLevel::Debug < LogLevel::Trace);
	}

	#[cfg(feature = "log")]
	#[test]
	fn maps_onto_log_levels() {
		assert_eq!(log::Level::from(LogLevel::Error), log::Level::Error);
		assert_eq!(log::Level::from(LogLevel::Trace), log::Level::Trace);
	}
}
