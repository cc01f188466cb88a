use std::fmt;
use std::str::FromStr;

use super::project::{ParseVariantError, ProjectStatus, ProjectType};

/// Status selector of the filter bar. `All` is the "Tous les statuts" entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ProjectStatus),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Only(ProjectType),
}

impl StatusFilter {
    pub fn matches(self, status: ProjectStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == status,
        }
    }

    /// Next entry in dropdown order: all, planning, in_progress, completed, on_hold.
    pub fn cycle(self) -> Self {
        match self {
            StatusFilter::All => StatusFilter::Only(ProjectStatus::ALL[0]),
            StatusFilter::Only(current) => {
                let idx = ProjectStatus::ALL.iter().position(|s| *s == current).unwrap_or(0);
                ProjectStatus::ALL
                    .get(idx + 1)
                    .map_or(StatusFilter::All, |s| StatusFilter::Only(*s))
            }
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusFilter::All => "Tous les statuts",
            StatusFilter::Only(status) => status.label(),
        }
    }
}

impl TypeFilter {
    pub fn matches(self, project_type: ProjectType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Only(wanted) => wanted == project_type,
        }
    }

    pub fn cycle(self) -> Self {
        match self {
            TypeFilter::All => TypeFilter::Only(ProjectType::ALL[0]),
            TypeFilter::Only(current) => {
                let idx = ProjectType::ALL.iter().position(|t| *t == current).unwrap_or(0);
                ProjectType::ALL
                    .get(idx + 1)
                    .map_or(TypeFilter::All, |t| TypeFilter::Only(*t))
            }
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TypeFilter::All => "Tous les types",
            TypeFilter::Only(project_type) => project_type.label(),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            Ok(StatusFilter::All)
        } else {
            s.parse().map(StatusFilter::Only)
        }
    }
}

impl FromStr for TypeFilter {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            Ok(TypeFilter::All)
        } else {
            s.parse().map(TypeFilter::Only)
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str("all"),
            StatusFilter::Only(status) => write!(f, "{status}"),
        }
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeFilter::All => f.write_str("all"),
            TypeFilter::Only(project_type) => write!(f, "{project_type}"),
        }
    }
}

/// Transient selection owned by whoever renders the filter controls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub search_term: String,
    pub status: StatusFilter,
    pub project_type: TypeFilter,
}

impl FilterCriteria {
    pub fn new(search_term: impl Into<String>, status: StatusFilter, project_type: TypeFilter) -> Self {
        Self {
            search_term: search_term.into(),
            status,
            project_type,
        }
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}
