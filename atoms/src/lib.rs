pub mod ids;
pub mod media;
pub mod notifications;
pub mod projects;
pub mod users;
