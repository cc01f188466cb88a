use std::sync::Arc;

use crate::models::{FilterCriteria, Project, ProjectStatus};

/// Counters behind the four summary tiles of the projects screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub planning: usize,
    pub on_hold: usize,
    pub total_budget: u128,
}

/// Projects matching `criteria`, in their original order.
///
/// The search term is matched case-insensitively as a substring of the name,
/// the client or the location; an empty term matches everything.
pub fn filter_projects<'a>(projects: &'a [Project], criteria: &FilterCriteria) -> Vec<&'a Project> {
    let needle = criteria.search_term.to_lowercase();
    projects
        .iter()
        .filter(|p| matches_search(p, &needle))
        .filter(|p| criteria.status.matches(p.status))
        .filter(|p| criteria.project_type.matches(p.project_type))
        .collect()
}

fn matches_search(project: &Project, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    [&project.name, &project.client, &project.location]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

pub fn aggregate(projects: &[Project]) -> Summary {
    projects.iter().fold(Summary::default(), |mut summary, project| {
        summary.total += 1;
        match project.status {
            ProjectStatus::InProgress => summary.in_progress += 1,
            ProjectStatus::Completed => summary.completed += 1,
            ProjectStatus::Planning => summary.planning += 1,
            ProjectStatus::OnHold => summary.on_hold += 1,
        }
        summary.total_budget += u128::from(project.budget);
        summary
    })
}

/// Read-only holder of the project collection the dashboard displays.
///
/// The collection is swapped as a whole by [`ProjectViewModel::replace`];
/// clones share it and keep seeing the collection they were made from.
#[derive(Debug, Clone)]
pub struct ProjectViewModel {
    projects: Arc<[Project]>,
}

impl ProjectViewModel {
    pub fn new(projects: Vec<Project>) -> Self {
        Self {
            projects: projects.into(),
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn filtered(&self, criteria: &FilterCriteria) -> Vec<&Project> {
        filter_projects(&self.projects, criteria)
    }

    pub fn summary(&self) -> Summary {
        aggregate(&self.projects)
    }

    pub fn get(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn replace(&mut self, projects: Vec<Project>) {
        self.projects = projects.into();
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}
