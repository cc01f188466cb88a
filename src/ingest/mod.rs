use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

use crate::models::{Project, ProjectStatus, ProjectType};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("project '{id}': field `{field}` {problem}")]
    InvalidField {
        id: String,
        field: &'static str,
        problem: String,
    },
    #[error("duplicate project id '{0}'")]
    DuplicateId(String),
}

impl ValidationError {
    fn invalid(id: &str, field: &'static str, problem: impl Into<String>) -> Self {
        ValidationError::InvalidField {
            id: id.to_string(),
            field,
            problem: problem.into(),
        }
    }

    /// Name of the offending field, as spelled in fixture files.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::InvalidField { field, .. } => *field,
            ValidationError::DuplicateId(_) => "id",
        }
    }
}

/// A project as it arrives from a fixture, before any invariant is checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub client: String,
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub location: String,
    #[serde(rename = "type")]
    pub project_type: String,
    pub status: String,
    pub progress: i64,
    pub start_date: String,
    pub estimated_end_date: String,
    #[serde(default)]
    pub actual_end_date: Option<String>,
    pub budget: u64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub manager: String,
    #[serde(default)]
    pub team: Vec<String>,
}

impl ProjectRecord {
    pub fn validate(self) -> Result<Project, ValidationError> {
        let id = self.id.trim().to_string();
        if id.is_empty() {
            return Err(ValidationError::invalid(&self.id, "id", "must not be empty"));
        }
        if self.name.trim().is_empty() {
            return Err(ValidationError::invalid(&id, "name", "must not be empty"));
        }

        let project_type = self
            .project_type
            .parse::<ProjectType>()
            .map_err(|e| ValidationError::invalid(&id, "type", e.to_string()))?;
        let status = self
            .status
            .parse::<ProjectStatus>()
            .map_err(|e| ValidationError::invalid(&id, "status", e.to_string()))?;

        if !(0..=100).contains(&self.progress) {
            return Err(ValidationError::invalid(
                &id,
                "progress",
                format!("must be between 0 and 100, got {}", self.progress),
            ));
        }

        let start_date = parse_date(&id, "startDate", &self.start_date)?;
        let estimated_end_date = parse_date(&id, "estimatedEndDate", &self.estimated_end_date)?;
        if estimated_end_date < start_date {
            return Err(ValidationError::invalid(
                &id,
                "estimatedEndDate",
                "is before startDate",
            ));
        }

        let actual_end_date = match self.actual_end_date.as_deref() {
            None => None,
            Some(_) if status != ProjectStatus::Completed => {
                return Err(ValidationError::invalid(
                    &id,
                    "actualEndDate",
                    "is only allowed on completed projects",
                ));
            }
            Some(raw) => {
                let date = parse_date(&id, "actualEndDate", raw)?;
                if date < start_date {
                    return Err(ValidationError::invalid(
                        &id,
                        "actualEndDate",
                        "is before startDate",
                    ));
                }
                Some(date)
            }
        };

        Ok(Project {
            id,
            name: self.name,
            client: self.client,
            client_id: self.client_id,
            location: self.location,
            project_type,
            status,
            // Range checked above.
            progress: self.progress as u8,
            start_date,
            estimated_end_date,
            actual_end_date,
            budget: self.budget,
            description: self.description,
            manager: self.manager,
            team: self.team,
        })
    }
}

fn parse_date(id: &str, field: &'static str, raw: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| ValidationError::invalid(id, field, format!("'{raw}' is not a YYYY-MM-DD date")))
}

/// Validates a whole batch; the first bad record rejects all of them.
pub fn validate_all(records: Vec<ProjectRecord>) -> Result<Vec<Project>, ValidationError> {
    let mut seen = HashSet::new();
    let mut projects = Vec::with_capacity(records.len());
    for record in records {
        let project = record.validate()?;
        if !seen.insert(project.id.clone()) {
            return Err(ValidationError::DuplicateId(project.id));
        }
        projects.push(project);
    }
    Ok(projects)
}
