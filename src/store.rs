use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use thiserror::Error;
use ulid::Ulid;

use crate::types::{Brief, Feedback, Project, ProjectStatus, User};

const STORE_VERSION: u32 = 1;
const STORE_FILE: &str = "projects.json";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported store version {0} (this build reads up to {STORE_VERSION})")]
    UnsupportedVersion(u32),
}

#[derive(serde::Serialize, serde::Deserialize)]
struct StoreFile {
    version: u32,
    projects: Vec<Project>,
}

/// Merge-style update applied to an existing project. Absent fields are left
/// untouched, so applying the same patch twice is a no-op.
#[derive(Clone, Debug, Default)]
pub struct ProjectPatch {
    pub status: Option<ProjectStatus>,
    pub feedback: Option<Feedback>,
    pub submitted_image: Option<String>,
}

/// Owns the project list and is the sole writer of its file. Every mutation
/// serializes the full list back to disk.
pub struct ProjectStore {
    path: PathBuf,
    projects: Vec<Project>,
}

impl ProjectStore {
    pub fn open(data_dir: &Path) -> Result<Self, StorageError> {
        let path = data_dir.join(STORE_FILE);
        let projects = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            decode_store(&contents)?
        } else {
            Vec::new()
        };
        Ok(Self { path, projects })
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn get(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Accept a brief as a new active project, prepended so the list stays
    /// most-recent-first. The authenticated user is required by signature:
    /// there is no path into the store without a session.
    pub fn create_project(&mut self, user: &User, brief: Brief) -> Result<Project, StorageError> {
        let project = Project {
            id: Ulid::new().to_string(),
            brief,
            started_at: Utc::now(),
            status: ProjectStatus::Active,
            feedback: None,
            submitted_image: None,
        };
        tracing::debug!(user = %user.name, project = %project.id, "accepted brief");
        self.projects.insert(0, project.clone());
        self.save()?;
        Ok(project)
    }

    /// Merge fields into the matching project. `Ok(None)` when the id is
    /// unknown; nothing is written in that case.
    pub fn update_project(
        &mut self,
        id: &str,
        patch: ProjectPatch,
    ) -> Result<Option<Project>, StorageError> {
        let updated = {
            let Some(project) = self.projects.iter_mut().find(|p| p.id == id) else {
                return Ok(None);
            };
            if let Some(status) = patch.status {
                project.status = status;
            }
            if let Some(feedback) = patch.feedback {
                project.feedback = Some(feedback);
            }
            if let Some(image) = patch.submitted_image {
                project.submitted_image = Some(image);
            }
            project.clone()
        };
        self.save()?;
        Ok(Some(updated))
    }

    /// Flip active projects past their deadline to expired. Invoked explicitly
    /// (the timer never writes back); returns the ids that changed.
    pub fn reconcile_expired(&mut self, now: DateTime<Utc>) -> Result<Vec<String>, StorageError> {
        let mut expired = Vec::new();
        for project in &mut self.projects {
            if project.status != ProjectStatus::Active {
                continue;
            }
            let deadline =
                project.started_at + chrono::Duration::hours(i64::from(project.brief.deadline_hours));
            if now >= deadline {
                project.status = ProjectStatus::Expired;
                expired.push(project.id.clone());
            }
        }
        if !expired.is_empty() {
            self.save()?;
        }
        Ok(expired)
    }

    /// Persist with a temporary file and an atomic rename to avoid partial
    /// writes.
    fn save(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let envelope = StoreFile {
            version: STORE_VERSION,
            projects: self.projects.clone(),
        };
        let temp = self.path.with_extension("tmp");
        let mut f = File::create(&temp)?;
        let content = serde_json::to_string_pretty(&envelope)?;
        f.write_all(content.as_bytes())?;
        f.sync_all()?;
        fs::rename(temp, &self.path)?;
        Ok(())
    }
}

/// Read a store file, lifting the legacy bare-array layout (no envelope) to
/// the current versioned form.
fn decode_store(contents: &str) -> Result<Vec<Project>, StorageError> {
    let value: serde_json::Value = serde_json::from_str(contents)?;
    if value.is_array() {
        tracing::warn!("migrating legacy project store to versioned envelope");
        return Ok(serde_json::from_value(value)?);
    }
    let envelope: StoreFile = serde_json::from_value(value)?;
    if envelope.version > STORE_VERSION {
        return Err(StorageError::UnsupportedVersion(envelope.version));
    }
    Ok(envelope.projects)
}
