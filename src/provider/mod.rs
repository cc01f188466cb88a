pub mod seed;

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::ingest::{validate_all, ProjectRecord};
use crate::models::{Notification, Project};

/// Everything the dashboard displays, loaded in one piece.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub projects: Vec<Project>,
    pub notifications: Vec<Notification>,
}

impl Dataset {
    /// Keeps only the projects belonging to `client_id`, as the client
    /// space shows them.
    pub fn scoped_to_client(mut self, client_id: &str) -> Self {
        self.projects.retain(|p| p.client_id == client_id);
        self
    }
}

#[derive(Debug, Deserialize)]
struct FixtureFile {
    projects: Vec<ProjectRecord>,
    #[serde(default)]
    notifications: Vec<Notification>,
}

/// Where the project collection comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Seed,
    Fixture(PathBuf),
}

impl DataSource {
    pub fn from_path(path: Option<PathBuf>) -> Self {
        path.map_or(DataSource::Seed, DataSource::Fixture)
    }

    /// Loads and validates the full dataset. Either every record passes
    /// validation or nothing is returned.
    pub async fn load(&self) -> Result<Dataset> {
        match self {
            DataSource::Seed => {
                let projects = validate_all(seed::records())?;
                tracing::info!(projects = projects.len(), "loaded built-in seed");
                Ok(Dataset {
                    projects,
                    notifications: seed::notifications(),
                })
            }
            DataSource::Fixture(path) => {
                let raw = tokio::fs::read_to_string(path)
                    .await
                    .with_context(|| format!("reading fixture {}", path.display()))?;
                let file: FixtureFile = serde_json::from_str(&raw)
                    .with_context(|| format!("parsing fixture {}", path.display()))?;
                let projects = validate_all(file.projects)
                    .inspect_err(|err| tracing::warn!(field = err.field(), %err, "rejected fixture record"))
                    .with_context(|| format!("validating fixture {}", path.display()))?;
                tracing::info!(
                    path = %path.display(),
                    projects = projects.len(),
                    notifications = file.notifications.len(),
                    "loaded fixture"
                );
                Ok(Dataset {
                    projects,
                    notifications: file.notifications,
                })
            }
        }
    }
}
