//---------------------------------------------------------------------------------------------------- use
#[allow(unused_imports)] // docs
use crate::source::{DataSource,CallbackDataSource};

//---------------------------------------------------------------------------------------------------- DataSourceError
/// Errors returned by a [`DataSource`].
///
/// A [`CallbackDataSource`] is a logically infinite stream,
/// it has no position and no duration, so everything besides
/// `read()` and `format()` returns [`DataSourceError::NotSupported`].
#[derive(thiserror::Error)]
#[derive(Copy,Clone,Debug,PartialEq,Eq,Hash)]
pub enum DataSourceError {
	#[error("data source operation not supported: {operation}")]
	/// The operation is not supported by this data source.
	NotSupported {
		/// Name of the operation, e.g. `"seek"`.
		operation: &'static str,
	},
}
