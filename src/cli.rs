use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::models::{FilterCriteria, StatusFilter, TypeFilter};

/// FAMILY FORAGE project dashboard
#[derive(Debug, Parser)]
#[command(name = "forage-dashboard", version)]
pub struct Cli {
    /// JSON fixture holding projects and notifications (overrides FORAGE_FIXTURE_PATH)
    #[arg(long, global = true, value_name = "PATH")]
    pub fixture: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactive dashboard (default)
    Dashboard {
        /// Open the client space of this client id instead of the admin view
        #[arg(long, value_name = "CLIENT_ID")]
        client: Option<String>,
    },
    /// Print the filtered project list
    List {
        /// Case-insensitive text matched against name, client and location
        #[arg(long, default_value = "")]
        search: String,
        /// all, planning, in_progress, completed or on_hold
        #[arg(long, default_value = "all")]
        status: StatusFilter,
        /// all, forage, solaire, geophysique or maintenance
        #[arg(long = "type", default_value = "all")]
        project_type: TypeFilter,
    },
    /// Print the summary tiles
    Summary,
}

/// Which side of the dashboard the session opens on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Space {
    Admin,
    Client(String),
}

/// Resolved once at startup; nothing downstream re-reads the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Dashboard(Space),
    List(FilterCriteria),
    Summary,
}

impl Cli {
    pub fn route(&self) -> Route {
        match &self.command {
            None | Some(Command::Dashboard { client: None }) => Route::Dashboard(Space::Admin),
            Some(Command::Dashboard {
                client: Some(client_id),
            }) => Route::Dashboard(Space::Client(client_id.clone())),
            Some(Command::List {
                search,
                status,
                project_type,
            }) => Route::List(FilterCriteria::new(search.clone(), *status, *project_type)),
            Some(Command::Summary) => Route::Summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ProjectStatus, ProjectType};

    fn route(args: &[&str]) -> Route {
        Cli::try_parse_from(args).unwrap().route()
    }

    #[test]
    fn no_subcommand_opens_admin_dashboard() {
        assert_eq!(route(&["forage-dashboard"]), Route::Dashboard(Space::Admin));
    }

    #[test]
    fn client_flag_opens_client_space() {
        assert_eq!(
            route(&["forage-dashboard", "dashboard", "--client", "1"]),
            Route::Dashboard(Space::Client("1".to_string()))
        );
    }

    #[test]
    fn list_parses_filters() {
        assert_eq!(
            route(&[
                "forage-dashboard",
                "list",
                "--status",
                "planning",
                "--type",
                "maintenance",
            ]),
            Route::List(FilterCriteria::new(
                "",
                StatusFilter::Only(ProjectStatus::Planning),
                TypeFilter::Only(ProjectType::Maintenance),
            ))
        );
        assert_eq!(
            route(&["forage-dashboard", "list", "--search", "Toamasina"]),
            Route::List(FilterCriteria::new("Toamasina", StatusFilter::All, TypeFilter::All))
        );
    }

    #[test]
    fn rejects_unknown_status() {
        assert!(Cli::try_parse_from(["forage-dashboard", "list", "--status", "done"]).is_err());
    }

    #[test]
    fn fixture_is_global() {
        let cli = Cli::try_parse_from(["forage-dashboard", "summary", "--fixture", "p.json"]).unwrap();
        assert_eq!(cli.fixture, Some(PathBuf::from("p.json")));
        assert_eq!(cli.route(), Route::Summary);
    }
}
