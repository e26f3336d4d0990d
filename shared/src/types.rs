// ========== PROJECT ==========
pub use sitecam_atoms::projects::model::{
    CategoryFilter, CreateProjectPayload, Project, UpdateProjectPayload,
};

// ========== USER ==========
pub use sitecam_atoms::users::model::{UpdateUserPayload, User};

// ========== NOTIFICATION ==========
pub use sitecam_atoms::notifications::model::{
    CreateNotificationPayload, Notification, NotificationKind,
};

// ========== PHOTO ==========
pub use sitecam_atoms::media::model::{Photo, UploadFailure, UploadSummary};
