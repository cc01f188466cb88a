mod cli;
mod config;
mod format;
mod ingest;
mod models;
mod provider;
mod ui;
mod view_model;

use std::fs::File;
use std::io;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use tracing_subscriber::EnvFilter;
use tui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use crate::cli::{Cli, Route, Space};
use crate::config::Config;
use crate::format::{format_currency, format_date};
use crate::models::FilterCriteria;
use crate::provider::{seed, DataSource, Dataset};
use crate::ui::projects::{handle_input, render_projects, ProjectAction, ProjectsState};
use crate::ui::summary::tiles;
use crate::view_model::ProjectViewModel;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = config::init()?.with_fixture_override(cli.fixture.clone());
    init_logging(&config)?;

    let route = cli.route();
    tracing::info!(?route, "starting forage dashboard");

    let source = DataSource::from_path(config.fixture_path.clone());
    match route {
        Route::List(criteria) => print_list(&source, &criteria).await,
        Route::Summary => print_summary(&source).await,
        Route::Dashboard(space) => run_dashboard(&source, space).await,
    }
}

/// Logs go to `FORAGE_LOG_FILE` only; the terminal belongs to the dashboard.
fn init_logging(config: &Config) -> Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

async fn load_view_model(source: &DataSource) -> Result<ProjectViewModel> {
    let dataset = source.load().await?;
    Ok(ProjectViewModel::new(dataset.projects))
}

async fn print_list(source: &DataSource, criteria: &FilterCriteria) -> Result<()> {
    let view_model = load_view_model(source).await?;
    let projects = view_model.filtered(criteria);

    for project in &projects {
        println!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{} - {}\t{}%\t{}",
            project.id,
            project.name,
            project.project_type.label(),
            project.status.label(),
            project.client,
            project.location,
            format_date(project.start_date),
            format_date(project.estimated_end_date),
            project.progress,
            format_currency(u128::from(project.budget)),
        );
    }
    println!("{} projet(s) sur {}", projects.len(), view_model.projects().len());

    Ok(())
}

async fn print_summary(source: &DataSource) -> Result<()> {
    let view_model = load_view_model(source).await?;
    for (label, value, _) in tiles(&view_model.summary()) {
        println!("{label}: {value}");
    }
    Ok(())
}

/// Loads the dataset the given space is allowed to see.
async fn load_space(source: &DataSource, space: &Space) -> Result<Dataset> {
    let dataset = source.load().await?;
    Ok(match space {
        Space::Admin => dataset,
        Space::Client(client_id) => dataset.scoped_to_client(client_id),
    })
}

async fn run_dashboard(source: &DataSource, space: Space) -> Result<()> {
    let dataset = load_space(source, &space).await?;
    let user = match &space {
        Space::Admin => seed::admin_user(),
        Space::Client(client_id) => {
            let client_name = dataset.projects.first().map(|p| p.client.as_str());
            seed::client_user(client_id, client_name)
        }
    };
    tracing::info!(projects = dataset.projects.len(), ?space, "opening dashboard");

    let mut state = ProjectsState::new(
        ProjectViewModel::new(dataset.projects),
        dataset.notifications,
        user,
    );

    // Setup terminal
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut state, source, &space).await;

    // Restore terminal
    terminal::disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    match result.inspect_err(|err| tracing::error!(%err, "dashboard stopped"))? {
        ProjectAction::Logout => println!("Déconnecté."),
        _ => println!("Merci d'avoir utilisé FAMILY FORAGE !"),
    }

    Ok(())
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    state: &mut ProjectsState,
    source: &DataSource,
    space: &Space,
) -> Result<ProjectAction> {
    loop {
        terminal.draw(|f| render_projects(f, state))?;

        match handle_input(state)? {
            Some(ProjectAction::Reload) => match load_space(source, space).await {
                Ok(dataset) => {
                    tracing::info!(projects = dataset.projects.len(), "reloaded projects");
                    state.replace_projects(dataset.projects);
                }
                Err(err) => {
                    tracing::warn!(%err, "reload failed, keeping current projects");
                    state.reload_failed(&err);
                }
            },
            Some(action) => return Ok(action),
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[tokio::test]
    async fn client_space_only_loads_its_projects() {
        let dataset = load_space(&DataSource::Seed, &Space::Client("2".to_string()))
            .await
            .unwrap();
        assert_eq!(dataset.projects.len(), 1);
        assert_eq!(load_space(&DataSource::Seed, &Space::Admin).await.unwrap().projects.len(), 4);
    }

    #[tokio::test]
    async fn dashboard_load_error_reaches_the_caller() {
        let source = DataSource::Fixture(PathBuf::from("/nonexistent/forage-fixture.json"));
        let err = run_dashboard(&source, Space::Admin).await.unwrap_err();
        assert!(err.to_string().contains("reading fixture"));
    }
}
