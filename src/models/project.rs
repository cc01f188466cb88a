use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use thiserror::Error;

/// A validated project record. Only `ingest` builds these from raw input,
/// so the progress, date and completion invariants always hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub client: String,
    pub client_id: String,
    pub location: String,
    pub project_type: ProjectType,
    pub status: ProjectStatus,
    pub progress: u8,
    pub start_date: NaiveDate,
    pub estimated_end_date: NaiveDate,
    pub actual_end_date: Option<NaiveDate>,
    pub budget: u64,
    pub description: String,
    pub manager: String,
    pub team: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectType {
    Forage,
    Solaire,
    Geophysique,
    Maintenance,
}

impl ProjectType {
    pub const ALL: [ProjectType; 4] = [
        ProjectType::Forage,
        ProjectType::Solaire,
        ProjectType::Geophysique,
        ProjectType::Maintenance,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ProjectType::Forage => "forage",
            ProjectType::Solaire => "solaire",
            ProjectType::Geophysique => "geophysique",
            ProjectType::Maintenance => "maintenance",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ProjectType::Forage => "Forage",
            ProjectType::Solaire => "Solaire",
            ProjectType::Geophysique => "Géophysique",
            ProjectType::Maintenance => "Maintenance",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectStatus {
    Planning,
    InProgress,
    Completed,
    OnHold,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 4] = [
        ProjectStatus::Planning,
        ProjectStatus::InProgress,
        ProjectStatus::Completed,
        ProjectStatus::OnHold,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ProjectStatus::Planning => "planning",
            ProjectStatus::InProgress => "in_progress",
            ProjectStatus::Completed => "completed",
            ProjectStatus::OnHold => "on_hold",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ProjectStatus::Planning => "Planification",
            ProjectStatus::InProgress => "En cours",
            ProjectStatus::Completed => "Terminé",
            ProjectStatus::OnHold => "En pause",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized {kind} '{value}'")]
pub struct ParseVariantError {
    pub kind: &'static str,
    pub value: String,
}

impl FromStr for ProjectType {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProjectType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ParseVariantError {
                kind: "project type",
                value: s.to_string(),
            })
    }
}

impl FromStr for ProjectStatus {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProjectStatus::ALL
            .into_iter()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| ParseVariantError {
                kind: "project status",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_parse_back() {
        for t in ProjectType::ALL {
            assert_eq!(t.as_str().parse::<ProjectType>(), Ok(t));
        }
        for s in ProjectStatus::ALL {
            assert_eq!(s.as_str().parse::<ProjectStatus>(), Ok(s));
        }
    }

    #[test]
    fn unknown_variant_is_rejected() {
        let err = "puits".parse::<ProjectType>().unwrap_err();
        assert_eq!(err.to_string(), "unrecognized project type 'puits'");
        assert!("In_Progress".parse::<ProjectStatus>().is_err());
    }

    #[test]
    fn labels_are_french() {
        assert_eq!(ProjectType::Geophysique.label(), "Géophysique");
        assert_eq!(ProjectStatus::Completed.label(), "Terminé");
    }
}
