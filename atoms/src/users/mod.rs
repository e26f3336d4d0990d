pub mod model;
pub mod service;

pub use model::{UpdateUserPayload, User};
pub use service::*;
