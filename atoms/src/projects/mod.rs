pub mod model;
pub mod service;

pub use model::{CategoryFilter, CreateProjectPayload, Project, UpdateProjectPayload};
pub use service::*;
