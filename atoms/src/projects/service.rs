use chrono::Utc;

use super::model::{CategoryFilter, CreateProjectPayload, Project, UpdateProjectPayload, COMMERCIAL};

/// Search predicate shared by `filtered` and `filtered_projects`.
/// The search term is expected to be lowercased already.
fn matches(project: &Project, term: &str, filter: &CategoryFilter) -> bool {
    let matches_search = project.title.to_lowercase().contains(term)
        || project
            .address
            .as_deref()
            .is_some_and(|address| address.to_lowercase().contains(term));

    matches_search && filter.admits(project.category.as_deref())
}

/// Projects present when the dashboard starts
pub fn initial_projects() -> Vec<Project> {
    let now = Utc::now();
    vec![
        Project {
            id: 1,
            title: "Downtown Renovation".to_string(),
            address: Some("123 Main St, Austin, TX".to_string()),
            image_url: "https://images.unsplash.com/photo-1503387762-592deb58ef4e".to_string(),
            photo_count: 1,
            last_updated: now,
            category: Some(COMMERCIAL.to_string()),
        },
        Project {
            id: 2,
            title: "Product Photography Session".to_string(),
            address: None,
            image_url: "https://images.unsplash.com/photo-1531971589569-0d9370cbe1e5".to_string(),
            photo_count: 1,
            last_updated: now,
            category: Some(COMMERCIAL.to_string()),
        },
        Project {
            id: 3,
            title: "Modern Office Complex".to_string(),
            address: Some("789 Business Blvd, Houston, TX".to_string()),
            image_url: "https://images.unsplash.com/photo-1486406146926-c627a92ad1ab".to_string(),
            photo_count: 1,
            last_updated: now,
            category: Some(COMMERCIAL.to_string()),
        },
    ]
}

/// Owner of the project list and the dashboard's search/filter query
#[derive(Debug, Clone, Default)]
pub struct ProjectStore {
    projects: Vec<Project>,
    search_term: String,
    active_filter: CategoryFilter,
}

impl ProjectStore {
    pub fn new(projects: Vec<Project>) -> Self {
        Self {
            projects,
            search_term: String::new(),
            active_filter: CategoryFilter::All,
        }
    }

    pub fn seeded() -> Self {
        Self::new(initial_projects())
    }

    /// All projects in insertion order
    pub fn list(&self) -> &[Project] {
        &self.projects
    }

    pub fn find(&self, id: u32) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Projects matching `search_term` (case-insensitive, title or address)
    /// and `filter`. Computed on every call.
    pub fn filtered(&self, search_term: &str, filter: &CategoryFilter) -> Vec<Project> {
        let term = search_term.to_lowercase();
        self.projects
            .iter()
            .filter(|p| matches(p, &term, filter))
            .cloned()
            .collect()
    }

    /// `filtered` applied with the stored dashboard query
    pub fn filtered_projects(&self) -> Vec<Project> {
        self.filtered(&self.search_term, &self.active_filter)
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn active_filter(&self) -> &CategoryFilter {
        &self.active_filter
    }

    pub fn set_active_filter(&mut self, filter: impl Into<CategoryFilter>) {
        self.active_filter = filter.into();
    }

    /// Append a new project and return its id.
    ///
    /// The id is `count + 1`. Projects are never removed, so this stays unique;
    /// adding deletion would require switching to a counter.
    pub fn add(&mut self, payload: CreateProjectPayload) -> u32 {
        let id = self.projects.len() as u32 + 1;
        tracing::info!("Creating project {} ({})", id, payload.title);

        self.projects.push(Project {
            id,
            title: payload.title,
            address: payload.address,
            image_url: payload.image_url,
            photo_count: 0,
            last_updated: Utc::now(),
            category: payload.category,
        });

        id
    }

    /// Merge `payload` into project `id`, always refreshing `last_updated`.
    /// Returns false (and changes nothing) when no such project exists.
    pub fn update(&mut self, id: u32, payload: UpdateProjectPayload) -> bool {
        let Some(project) = self.projects.iter_mut().find(|p| p.id == id) else {
            tracing::debug!("Project {} not found, update ignored", id);
            return false;
        };

        if let Some(title) = payload.title {
            project.title = title;
        }
        if let Some(address) = payload.address {
            project.address = Some(address);
        }
        if let Some(image_url) = payload.image_url {
            project.image_url = image_url;
        }
        if let Some(photo_count) = payload.photo_count {
            project.photo_count = photo_count;
        }
        if let Some(category) = payload.category {
            project.category = Some(category);
        }
        project.last_updated = Utc::now();

        tracing::debug!(project_id = id, "project updated");
        true
    }
}
