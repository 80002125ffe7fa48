//! Pull-based PCM data sources.

mod source;
pub use source::{DataSource,DataFormat,SampleFormat};

mod callback;
pub use callback::CallbackDataSource;
