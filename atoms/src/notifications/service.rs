use super::model::{CreateNotificationPayload, Notification, NotificationKind};
use crate::ids::TimestampIds;

/// Display timestamp given to freshly added notifications
pub const JUST_NOW: &str = "Just now";

pub fn initial_notifications() -> Vec<Notification> {
    vec![
        Notification {
            id: 1,
            title: "New Project Comment".to_string(),
            message: "Sarah left a comment on Downtown Renovation".to_string(),
            timestamp: "5m ago".to_string(),
            read: false,
            kind: NotificationKind::Project,
            link: Some("#project/1".to_string()),
        },
        Notification {
            id: 2,
            title: "Team Member Added".to_string(),
            message: "Mike Johnson joined the team".to_string(),
            timestamp: "1h ago".to_string(),
            read: false,
            kind: NotificationKind::Team,
            link: Some("#team".to_string()),
        },
        Notification {
            id: 3,
            title: "Project Update".to_string(),
            message: "Hillside Estate has 15 new photos".to_string(),
            timestamp: "2h ago".to_string(),
            read: true,
            kind: NotificationKind::Project,
            link: Some("#project/2".to_string()),
        },
    ]
}

/// Owner of the notification list. Newest additions come first.
#[derive(Debug, Clone, Default)]
pub struct NotificationStore {
    notifications: Vec<Notification>,
    ids: TimestampIds,
}

impl NotificationStore {
    pub fn new(notifications: Vec<Notification>) -> Self {
        let floor = notifications.iter().map(|n| n.id).max().unwrap_or(0);
        Self {
            notifications,
            ids: TimestampIds::above(floor),
        }
    }

    pub fn seeded() -> Self {
        Self::new(initial_notifications())
    }

    pub fn list(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }

    pub fn mark_read(&mut self, id: i64) {
        match self.notifications.iter_mut().find(|n| n.id == id) {
            Some(notification) => notification.read = true,
            None => tracing::debug!(notification_id = id, "mark_read for unknown notification ignored"),
        }
    }

    pub fn mark_all_read(&mut self) {
        for notification in &mut self.notifications {
            notification.read = true;
        }
    }

    /// Prepend a new unread notification and return its id
    pub fn add(&mut self, payload: CreateNotificationPayload) -> i64 {
        let id = self.ids.next_id();
        self.notifications.insert(
            0,
            Notification {
                id,
                title: payload.title,
                message: payload.message,
                timestamp: JUST_NOW.to_string(),
                read: false,
                kind: payload.kind,
                link: payload.link,
            },
        );

        tracing::debug!("Notification {} added: {:?}", id, payload.kind);
        id
    }
}
