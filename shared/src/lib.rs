use sitecam_atoms::notifications::NotificationStore;
use sitecam_atoms::projects::ProjectStore;
use sitecam_atoms::users::UserStore;

pub mod project_page;
pub mod telemetry;
pub mod types;

pub use project_page::{PageError, ProjectPage};

/// Every store the dashboard needs, built once at startup and handed to
/// consumers by reference. Holding an `AppState` is proof the stores exist.
#[derive(Debug, Clone)]
pub struct AppState {
    pub projects: ProjectStore,
    pub users: UserStore,
    pub notifications: NotificationStore,
}

impl AppState {
    /// Build the stores from their seed data
    pub fn init() -> Self {
        let state = Self {
            projects: ProjectStore::seeded(),
            users: UserStore::seeded(),
            notifications: NotificationStore::seeded(),
        };

        tracing::info!(
            projects = state.projects.list().len(),
            notifications = state.notifications.list().len(),
            signed_in = state.users.current().is_some(),
            "dashboard state initialized"
        );
        state
    }

    /// Nothing external is held, so this only marks the end of the session
    pub fn teardown(self) {
        tracing::debug!("Dashboard state released");
    }
}
