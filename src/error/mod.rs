//! Errors that can occur.
//!
//! Every fallible operation returns [`RtaError`], which
//! maps onto exactly one boundary [`ResultCode`].

mod backend;
pub use backend::BackendError;

mod source;
pub use source::DataSourceError;

mod code;
pub use code::ResultCode;

mod error;
pub use error::RtaError;
