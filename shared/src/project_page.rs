use std::path::{Path, PathBuf};

use chrono::Utc;
use report_block::{save_project_report, ReportError};
use thiserror::Error;
use sitecam_atoms::media::{self, PhotoAlbum, UploadSummary};
use sitecam_atoms::projects::{Project, UpdateProjectPayload};

use crate::AppState;

#[derive(Debug, Error)]
pub enum PageError {
    #[error("Project {0} not found")]
    ProjectNotFound(u32),

    #[error(transparent)]
    Report(#[from] ReportError),
}

/// One project's page: its album plus the operations the page offers.
/// Album changes are pushed back into the project's `photo_count`.
#[derive(Debug, Clone)]
pub struct ProjectPage {
    album: PhotoAlbum,
}

impl ProjectPage {
    /// `None` when the project does not exist ("Project not found")
    pub fn open(state: &AppState, project_id: u32) -> Option<Self> {
        let project = state.projects.find(project_id)?;
        Some(Self {
            album: PhotoAlbum::for_project(project),
        })
    }

    pub fn project_id(&self) -> u32 {
        self.album.project_id()
    }

    pub fn album(&self) -> &PhotoAlbum {
        &self.album
    }

    pub fn project<'a>(&self, state: &'a AppState) -> Option<&'a Project> {
        state.projects.find(self.project_id())
    }

    pub async fn upload<P: AsRef<Path>>(&mut self, state: &mut AppState, files: &[P]) -> UploadSummary {
        let summary = media::upload_files(&mut self.album, files).await;
        self.album.sync_photo_count(&mut state.projects);
        summary
    }

    pub fn delete_photo(&mut self, state: &mut AppState, photo_id: i64) -> bool {
        let removed = self.album.delete(photo_id);
        if removed {
            self.album.sync_photo_count(&mut state.projects);
        }
        removed
    }

    /// Save edits made in the page header (title, address)
    pub fn save_edits(&self, state: &mut AppState, edits: UpdateProjectPayload) -> bool {
        state.projects.update(self.project_id(), edits)
    }

    /// Export the PDF report into `dir`
    pub fn export_report(&self, state: &AppState, dir: &Path) -> Result<PathBuf, PageError> {
        let project = self
            .project(state)
            .ok_or(PageError::ProjectNotFound(self.project_id()))?;
        Ok(save_project_report(dir, project, self.album.photos(), Utc::now())?)
    }
}
