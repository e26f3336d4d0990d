use std::path::Path;

use sitecam_atoms::projects::{CategoryFilter, CreateProjectPayload};
use sitecam_shared::types::{CreateNotificationPayload, NotificationKind, UpdateUserPayload};
use sitecam_shared::{AppState, PageError, ProjectPage};
use thiserror::Error;

use crate::config::Command;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Project {0} not found")]
    ProjectNotFound(u32),

    #[error(transparent)]
    Page(#[from] PageError),

    #[error("Serializing output: {0}")]
    Json(#[from] serde_json::Error),
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<(), CommandError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub async fn run(command: Command, state: &mut AppState, report_dir: &Path) -> Result<(), CommandError> {
    match command {
        Command::Projects {
            search,
            filter,
            add,
            address,
            category,
            json,
        } => {
            if let Some(title) = add {
                let mut payload = CreateProjectPayload::new(title);
                payload.address = address;
                if category.is_some() {
                    payload.category = category;
                }
                let id = state.projects.add(payload);
                println!("created project {id}");
            }

            state.projects.set_search_term(search);
            state.projects.set_active_filter(CategoryFilter::parse(&filter));
            let projects = state.projects.filtered_projects();

            if json {
                return print_json(&projects);
            }
            for project in &projects {
                println!(
                    "{:>3}  {:<32} {:<12} {:>3} photos  updated {}",
                    project.id,
                    project.title,
                    project.category.as_deref().unwrap_or("-"),
                    project.photo_count,
                    project.last_updated.format("%b %-d, %Y"),
                );
                if let Some(address) = project.address.as_deref() {
                    println!("     {address}");
                }
            }
            println!("{} of {} projects", projects.len(), state.projects.list().len());
        }

        Command::Notifications {
            mark_read,
            mark_all_read,
            json,
        } => {
            for id in mark_read {
                state.notifications.mark_read(id);
            }
            if mark_all_read {
                state.notifications.mark_all_read();
            }

            if json {
                return print_json(state.notifications.list());
            }
            for notification in state.notifications.list() {
                let marker = if notification.read { ' ' } else { '*' };
                println!(
                    "{marker} {:<24} {:<10} {}",
                    notification.title, notification.timestamp, notification.message
                );
            }
            println!("{} unread", state.notifications.unread_count());
        }

        Command::Whoami {
            role,
            company,
            logout,
            json,
        } => {
            if logout {
                state.users.logout();
            } else if role.is_some() || company.is_some() {
                state.users.update(UpdateUserPayload {
                    role,
                    company,
                    ..Default::default()
                });
            }

            match state.users.current() {
                Some(user) if json => print_json(user)?,
                Some(user) => println!("{} <{}>, {} at {}", user.name, user.email, user.role, user.company),
                None => println!("Not signed in"),
            }
        }

        Command::Report { project, photos } => {
            let mut page =
                ProjectPage::open(state, project).ok_or(CommandError::ProjectNotFound(project))?;

            if !photos.is_empty() {
                let summary = page.upload(state, &photos).await;
                for failure in &summary.failed {
                    eprintln!("skipped {}: {}", failure.source, failure.error);
                }
                println!("attached {} photo(s)", summary.added.len());
            }

            let path = page.export_report(state, report_dir)?;
            println!("wrote {}", path.display());

            state.notifications.add(CreateNotificationPayload {
                title: "Report ready".to_string(),
                message: format!("Project {project} report saved"),
                kind: NotificationKind::System,
                link: Some(path.display().to_string()),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn report_for_unknown_project_fails() {
        let mut state = AppState::init();
        let result = run(
            Command::Report {
                project: 77,
                photos: vec![],
            },
            &mut state,
            Path::new("."),
        )
        .await;

        assert!(matches!(result, Err(CommandError::ProjectNotFound(77))));
    }

    #[tokio::test]
    async fn projects_command_stores_the_query() {
        let mut state = AppState::init();
        run(
            Command::Projects {
                search: "austin".to_string(),
                filter: "Commercial".to_string(),
                add: None,
                address: None,
                category: None,
                json: true,
            },
            &mut state,
            Path::new("."),
        )
        .await
        .unwrap();

        assert_eq!(state.projects.search_term(), "austin");
        assert_eq!(state.projects.filtered_projects().len(), 1);
    }

    #[tokio::test]
    async fn mark_all_read_flag_clears_unread() {
        let mut state = AppState::init();
        run(
            Command::Notifications {
                mark_read: vec![],
                mark_all_read: true,
                json: false,
            },
            &mut state,
            Path::new("."),
        )
        .await
        .unwrap();

        assert_eq!(state.notifications.unread_count(), 0);
    }

    #[tokio::test]
    async fn add_flag_creates_a_commercial_project() {
        let mut state = AppState::init();
        run(
            Command::Projects {
                search: String::new(),
                filter: "All".to_string(),
                add: Some("Harbor Warehouse".to_string()),
                address: Some("5 Dock St".to_string()),
                category: None,
                json: true,
            },
            &mut state,
            Path::new("."),
        )
        .await
        .unwrap();

        let created = state.projects.find(4).unwrap();
        assert_eq!(created.title, "Harbor Warehouse");
        assert_eq!(created.address.as_deref(), Some("5 Dock St"));
        assert_eq!(created.category.as_deref(), Some("Commercial"));
        assert_eq!(created.photo_count, 0);
    }

    #[tokio::test]
    async fn add_flag_keeps_a_given_category() {
        let mut state = AppState::init();
        run(
            Command::Projects {
                search: String::new(),
                filter: "Industrial".to_string(),
                add: Some("Steel Mill".to_string()),
                address: None,
                category: Some("Industrial".to_string()),
                json: true,
            },
            &mut state,
            Path::new("."),
        )
        .await
        .unwrap();

        let listed = state.projects.filtered_projects();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].title, "Steel Mill");
    }

    #[tokio::test]
    async fn mark_read_flag_marks_only_that_notification() {
        let mut state = AppState::init();
        let target = state.notifications.list().iter().find(|n| !n.read).unwrap().id;

        run(
            Command::Notifications {
                mark_read: vec![target],
                mark_all_read: false,
                json: true,
            },
            &mut state,
            Path::new("."),
        )
        .await
        .unwrap();

        assert_eq!(state.notifications.unread_count(), 1);
        assert!(state.notifications.list().iter().any(|n| n.id == target && n.read));
    }

    #[tokio::test]
    async fn whoami_updates_profile_then_logs_out() {
        let mut state = AppState::init();
        let whoami = |role: Option<&str>, logout| Command::Whoami {
            role: role.map(str::to_string),
            company: None,
            logout,
            json: false,
        };

        run(whoami(Some("Site Lead"), false), &mut state, Path::new("."))
            .await
            .unwrap();
        let user = state.users.current().unwrap();
        assert_eq!(user.role, "Site Lead");
        assert_eq!(user.name, "John Doe");

        run(whoami(None, true), &mut state, Path::new("."))
            .await
            .unwrap();
        assert!(state.users.current().is_none());
    }

    #[tokio::test]
    async fn report_posts_a_notification() {
        let dir = temp_dir::TempDir::new().unwrap();
        let mut state = AppState::init();
        run(
            Command::Report {
                project: 2,
                photos: vec![],
            },
            &mut state,
            dir.path(),
        )
        .await
        .unwrap();

        let newest = &state.notifications.list()[0];
        assert_eq!(newest.title, "Report ready");
        assert!(!newest.read);
        assert_eq!(state.notifications.unread_count(), 3);
        assert!(dir.child("Product Photography Session-report.pdf").exists());
    }
}
