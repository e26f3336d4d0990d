use std::future::Future;
use std::path::{Path, PathBuf};

use futures::stream::{FuturesUnordered, StreamExt};

use super::data_url::{encode_data_url, sniff_mime};
use super::error::EncodeError;
use super::model::{UploadFailure, UploadSummary};
use super::service::PhotoAlbum;

/// Read a file and inline it as a `data:` URL
pub async fn encode_file(path: PathBuf) -> Result<String, EncodeError> {
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|source| EncodeError::Read {
            path: path.clone(),
            source,
        })?;
    if bytes.is_empty() {
        return Err(EncodeError::Empty { path });
    }

    let mime = sniff_mime(&bytes, Some(&path));
    Ok(encode_data_url(&bytes, mime))
}

/// Encode every file concurrently and append one photo per success
pub async fn upload_files<P: AsRef<Path>>(album: &mut PhotoAlbum, files: &[P]) -> UploadSummary {
    let jobs = files.iter().map(|file| {
        let path = file.as_ref().to_path_buf();
        (path.display().to_string(), encode_file(path))
    });

    upload_encoded(album, jobs).await
}

/// Run each encoding job as its own task and append the resulting photos in
/// the order the jobs finish, which need not match the order they were given.
///
/// A job that fails (or whose task dies) adds no photo; it is logged and
/// listed in the summary instead.
pub async fn upload_encoded<I, F>(album: &mut PhotoAlbum, jobs: I) -> UploadSummary
where
    I: IntoIterator<Item = (String, F)>,
    F: Future<Output = Result<String, EncodeError>> + Send + 'static,
{
    let batch = uuid::Uuid::new_v4();

    let mut pending: FuturesUnordered<_> = jobs
        .into_iter()
        .map(|(source, job)| {
            let handle = tokio::spawn(job);
            async move { (source, handle.await) }
        })
        .collect();

    tracing::info!(
        %batch,
        project_id = album.project_id(),
        files = pending.len(),
        "encoding photo uploads"
    );

    let mut summary = UploadSummary::default();
    while let Some((source, joined)) = pending.next().await {
        match joined {
            Ok(Ok(url)) => {
                let id = album.push_uploaded(url).id;
                tracing::debug!(%batch, photo_id = id, source = %source, "photo appended");
                summary.added.push(id);
            }
            Ok(Err(e)) => {
                tracing::warn!(%batch, source = %source, error = %e, "photo encoding failed");
                summary.failed.push(UploadFailure {
                    source,
                    error: e.to_string(),
                });
            }
            Err(e) => {
                tracing::error!(%batch, source = %source, error = %e, "photo encoding task aborted");
                summary.failed.push(UploadFailure {
                    source,
                    error: e.to_string(),
                });
            }
        }
    }

    tracing::info!(
        %batch,
        added = summary.added.len(),
        failed = summary.failed.len(),
        "photo upload finished"
    );
    summary
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use assert_matches::assert_matches;
    use temp_dir::TempDir;

    use super::*;
    use crate::projects::ProjectStore;

    fn album() -> PhotoAlbum {
        let projects = ProjectStore::seeded();
        PhotoAlbum::for_project(projects.find(1).unwrap())
    }

    fn delayed(
        millis: u64,
        result: Result<String, EncodeError>,
    ) -> impl Future<Output = Result<String, EncodeError>> + Send + 'static {
        async move {
            tokio::time::sleep(Duration::from_millis(millis)).await;
            result
        }
    }

    fn missing(name: &str) -> EncodeError {
        EncodeError::Read {
            path: PathBuf::from(name),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn photos_follow_completion_order() {
        let mut album = album();
        let jobs = vec![
            ("slow".to_string(), delayed(30, Ok("data:,slow".to_string()))),
            ("fast".to_string(), delayed(10, Ok("data:,fast".to_string()))),
            ("medium".to_string(), delayed(20, Ok("data:,medium".to_string()))),
        ];

        let summary = upload_encoded(&mut album, jobs).await;

        let urls: Vec<&str> = album.photos()[1..].iter().map(|p| p.url.as_str()).collect();
        assert_eq!(urls, vec!["data:,fast", "data:,medium", "data:,slow"]);
        assert_eq!(summary.added.len(), 3);
        assert!(summary.failed.is_empty());

        let ids: Vec<i64> = album.photos()[1..].iter().map(|p| p.id).collect();
        assert_eq!(ids, summary.added);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_encoding_adds_no_photo() {
        let mut album = album();
        let jobs = vec![
            ("broken.png".to_string(), delayed(5, Err(missing("broken.png")))),
            ("ok.png".to_string(), delayed(10, Ok("data:,ok".to_string()))),
        ];

        let summary = upload_encoded(&mut album, jobs).await;

        assert_eq!(album.len(), 2);
        assert_eq!(summary.added.len(), 1);
        assert_eq!(summary.failed.len(), 1);
        assert_eq!(summary.failed[0].source, "broken.png");
        assert!(summary.failed[0].error.contains("broken.png"));
    }

    #[tokio::test]
    async fn empty_batch_is_a_noop() {
        let mut album = album();
        let files: [PathBuf; 0] = [];
        let summary = upload_files(&mut album, &files).await;

        assert_eq!(album.len(), 1);
        assert!(summary.added.is_empty() && summary.failed.is_empty());
    }

    #[tokio::test]
    async fn files_on_disk_become_data_urls() {
        let dir = TempDir::new().unwrap();
        let png = dir.child("site.png");
        image::RgbImage::from_pixel(2, 2, image::Rgb([200, 10, 10]))
            .save(&png)
            .unwrap();
        let absent = dir.child("absent.jpg");

        let mut album = album();
        let summary = upload_files(&mut album, &[png, absent.clone()]).await;

        assert_eq!(summary.added.len(), 1);
        assert_eq!(summary.failed.len(), 1);
        assert_eq!(summary.failed[0].source, absent.display().to_string());

        let uploaded = album.photos().last().unwrap();
        assert!(uploaded.url.starts_with("data:image/png;base64,"));
        assert_eq!(uploaded.notes.as_deref(), Some(""));
    }

    #[tokio::test]
    async fn empty_file_is_reported_not_appended() {
        let dir = TempDir::new().unwrap();
        let empty = dir.child("empty.png");
        std::fs::write(&empty, b"").unwrap();

        assert_matches!(
            encode_file(empty.clone()).await,
            Err(EncodeError::Empty { path }) if path == empty
        );

        let mut album = album();
        let summary = upload_files(&mut album, &[empty]).await;
        assert_eq!(album.len(), 1);
        assert!(summary.added.is_empty());
        assert!(summary.failed[0].error.contains("is empty"));
    }
}
