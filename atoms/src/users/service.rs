use super::model::{UpdateUserPayload, User};

pub fn initial_user() -> User {
    User {
        id: 1,
        name: "John Doe".to_string(),
        email: "john@companycam.com".to_string(),
        avatar: "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?fit=facearea&facepad=2&w=256&h=256&q=80".to_string(),
        role: "Project Manager".to_string(),
        company: "CompanyCam".to_string(),
    }
}

/// Holds the signed-in user. Once logged out the session has no user for
/// the rest of its lifetime.
#[derive(Debug, Clone, Default)]
pub struct UserStore {
    current: Option<User>,
}

impl UserStore {
    pub fn new(user: Option<User>) -> Self {
        Self { current: user }
    }

    pub fn seeded() -> Self {
        Self::new(Some(initial_user()))
    }

    pub fn current(&self) -> Option<&User> {
        self.current.as_ref()
    }

    /// Merge into the current user; ignored when nobody is signed in
    pub fn update(&mut self, payload: UpdateUserPayload) {
        let Some(user) = self.current.as_mut() else {
            tracing::debug!("user update ignored, no current user");
            return;
        };

        if let Some(name) = payload.name {
            user.name = name;
        }
        if let Some(email) = payload.email {
            user.email = email;
        }
        if let Some(avatar) = payload.avatar {
            user.avatar = avatar;
        }
        if let Some(role) = payload.role {
            user.role = role;
        }
        if let Some(company) = payload.company {
            user.company = company;
        }
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.current.take() {
            tracing::info!("User logged out: {}", user.email);
        }
    }
}
