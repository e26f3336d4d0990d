// Re-export model types and service functions
pub mod data_url;
pub mod error;
pub mod model;
pub mod service;
pub mod upload;

pub use error::{DataUrlError, EncodeError};
pub use model::{Photo, UploadFailure, UploadSummary};
pub use service::*;
pub use upload::*;
