use chrono::Utc;

use super::model::Photo;
use crate::ids::TimestampIds;
use crate::projects::{Project, ProjectStore, UpdateProjectPayload};

pub const INITIAL_PHOTO_NOTES: &str = "Initial site photo";

/// Photos shown on one project's page.
///
/// The album is owned by the page, not the project store; it is the album's
/// job to push its size back into the project's `photo_count`.
#[derive(Debug, Clone)]
pub struct PhotoAlbum {
    project_id: u32,
    photos: Vec<Photo>,
    ids: TimestampIds,
}

impl PhotoAlbum {
    /// Start an album holding the project's cover image as its first photo
    pub fn for_project(project: &Project) -> Self {
        let cover = Photo {
            id: 1,
            url: project.image_url.clone(),
            date: project.last_updated,
            notes: Some(INITIAL_PHOTO_NOTES.to_string()),
        };

        Self {
            project_id: project.id,
            photos: vec![cover],
            ids: TimestampIds::above(1),
        }
    }

    pub fn project_id(&self) -> u32 {
        self.project_id
    }

    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    /// Append a freshly uploaded photo dated now
    pub fn push_uploaded(&mut self, url: String) -> &Photo {
        let photo = Photo {
            id: self.ids.next_id(),
            url,
            date: Utc::now(),
            notes: Some(String::new()),
        };
        self.photos.push(photo);
        &self.photos[self.photos.len() - 1]
    }

    pub fn delete(&mut self, photo_id: i64) -> bool {
        let before = self.photos.len();
        self.photos.retain(|p| p.id != photo_id);
        before != self.photos.len()
    }

    /// Write the album size into the project's `photo_count` if they differ.
    /// Returns true when the project was updated.
    pub fn sync_photo_count(&self, projects: &mut ProjectStore) -> bool {
        let count = self.photos.len() as u32;
        let stale = projects
            .find(self.project_id)
            .is_some_and(|project| project.photo_count != count);
        if !stale {
            return false;
        }

        projects.update(self.project_id, UpdateProjectPayload::photo_count(count))
    }
}
