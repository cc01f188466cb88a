use anyhow::Result;
use crossterm::event::{self, Event, KeyCode};
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::format::{format_currency, format_date, ProgressBand};
use crate::models::{FilterCriteria, Notification, Project, User};
use crate::ui::header::{render_dropdown, render_header, MenuState};
use crate::ui::project_form::{render_project_form, FormOutcome, ProjectFormState};
use crate::ui::summary::render_summary;
use crate::ui::{band_color, centered_rect, status_color, type_color, BRAND_BLUE};
use crate::view_model::ProjectViewModel;

const HEADER_HEIGHT: u16 = 2;
const GAUGE_WIDTH: usize = 20;

/// Which control of the screen receives typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    List,
    Search,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    None,
    Details(String),
    NewProject(ProjectFormState),
}

// Represents the state of the project management screen
pub struct ProjectsState {
    view_model: ProjectViewModel,
    notifications: Vec<Notification>,
    user: User,
    criteria: FilterCriteria,
    list_state: ListState,
    focus: Focus,
    modal: Modal,
    menu: MenuState,
    status_line: Option<String>,
}

pub enum ProjectAction {
    Quit,
    Logout,
    Reload,
}

impl ProjectsState {
    pub fn new(view_model: ProjectViewModel, notifications: Vec<Notification>, user: User) -> Self {
        let mut list_state = ListState::default();
        if !view_model.is_empty() {
            list_state.select(Some(0));
        }

        Self {
            view_model,
            notifications,
            user,
            criteria: FilterCriteria::default(),
            list_state,
            focus: Focus::List,
            modal: Modal::None,
            menu: MenuState::Closed,
            status_line: None,
        }
    }

    pub fn visible(&self) -> Vec<&Project> {
        self.view_model.filtered(&self.criteria)
    }

    pub fn selected_project(&self) -> Option<&Project> {
        let i = self.list_state.selected()?;
        self.visible().get(i).copied()
    }

    pub fn selected_project_id(&self) -> Option<String> {
        self.selected_project().map(|p| p.id.clone())
    }

    pub fn next(&mut self) {
        let len = self.visible().len();
        if len == 0 {
            return;
        }

        let i = match self.list_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.visible().len();
        if len == 0 {
            return;
        }

        let i = match self.list_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(i));
    }

    /// Swaps in a freshly loaded collection, keeping the current criteria.
    pub fn replace_projects(&mut self, projects: Vec<Project>) {
        self.view_model.replace(projects);
        self.status_line = Some(format!("{} projet(s) rechargé(s)", self.view_model.projects().len()));
        self.refilter();
    }

    pub fn reload_failed(&mut self, err: &anyhow::Error) {
        self.status_line = Some(format!("Rechargement impossible : {err}"));
    }

    /// Re-applies the criteria; keeps the selection inside the new view.
    fn refilter(&mut self) {
        let len = self.visible().len();
        let selected = match self.list_state.selected() {
            _ if len == 0 => None,
            Some(i) if i < len => Some(i),
            Some(_) => Some(len - 1),
            None => Some(0),
        };
        self.list_state.select(selected);
        log::debug!(
            "criteria search={:?} status={} type={} -> {} projects",
            self.criteria.search_term,
            self.criteria.status,
            self.criteria.project_type,
            len
        );
    }

    fn handle_modal_key(&mut self, key: KeyCode) {
        match &mut self.modal {
            Modal::None => {}
            Modal::Details(_) => {
                if matches!(key, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
                    self.modal = Modal::None;
                }
            }
            Modal::NewProject(form) => match form.handle_key(key) {
                FormOutcome::Pending => {}
                FormOutcome::Cancel => self.modal = Modal::None,
                FormOutcome::Submit(project) => {
                    log::info!("new project form submitted for {:?}; creation is disabled", project.name);
                    self.status_line = Some(format!(
                        "Création désactivée en mode démo : « {} » n'a pas été enregistré",
                        project.name
                    ));
                    self.modal = Modal::None;
                }
            },
        }
    }

    fn handle_menu_key(&mut self, key: KeyCode) -> Option<ProjectAction> {
        match (self.menu, key) {
            (_, KeyCode::Esc) => self.menu = MenuState::Closed,
            (_, KeyCode::Char('b')) => self.menu = self.menu.toggle_notifications(),
            (_, KeyCode::Char('u')) => self.menu = self.menu.toggle_user_menu(),
            (MenuState::UserMenu, KeyCode::Char('l')) => {
                self.menu = MenuState::Closed;
                return Some(ProjectAction::Logout);
            }
            _ => {}
        }
        None
    }

    fn handle_search_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Enter | KeyCode::Esc => self.focus = Focus::List,
            KeyCode::Char(c) => {
                self.criteria.search_term.push(c);
                self.refilter();
            }
            KeyCode::Backspace => {
                self.criteria.search_term.pop();
                self.refilter();
            }
            _ => {}
        }
    }

    fn handle_list_key(&mut self, key: KeyCode) -> Option<ProjectAction> {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => return Some(ProjectAction::Quit),
            KeyCode::Down => self.next(),
            KeyCode::Up => self.previous(),
            KeyCode::Enter => {
                if let Some(id) = self.selected_project_id() {
                    self.modal = Modal::Details(id);
                }
            }
            KeyCode::Char('/') => self.focus = Focus::Search,
            KeyCode::Char('s') => {
                self.criteria.status = self.criteria.status.cycle();
                self.refilter();
            }
            KeyCode::Char('t') => {
                self.criteria.project_type = self.criteria.project_type.cycle();
                self.refilter();
            }
            KeyCode::Char('c') => {
                self.criteria = FilterCriteria::default();
                self.refilter();
            }
            KeyCode::Char('r') => return Some(ProjectAction::Reload),
            KeyCode::Char('n') => self.modal = Modal::NewProject(ProjectFormState::new()),
            KeyCode::Char('e') => {
                if self.selected_project().is_some() {
                    self.status_line = Some("Modification désactivée en mode démo".to_string());
                }
            }
            KeyCode::Char('d') => {
                if self.selected_project().is_some() {
                    self.status_line = Some("Suppression désactivée en mode démo".to_string());
                }
            }
            KeyCode::Char('b') => self.menu = self.menu.toggle_notifications(),
            KeyCode::Char('u') => self.menu = self.menu.toggle_user_menu(),
            _ => {}
        }
        None
    }

    /// Applies one key press. Modals take precedence over dropdowns, which
    /// take precedence over the focused control.
    pub fn handle_key(&mut self, key: KeyCode) -> Option<ProjectAction> {
        if self.modal != Modal::None {
            self.handle_modal_key(key);
            return None;
        }
        if self.menu.is_open() {
            return self.handle_menu_key(key);
        }
        self.status_line = None;
        match self.focus {
            Focus::Search => {
                self.handle_search_key(key);
                None
            }
            Focus::List => self.handle_list_key(key),
        }
    }
}

pub fn render_projects<B: Backend>(frame: &mut Frame<B>, state: &mut ProjectsState) {
    let size = frame.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Length(4),
                Constraint::Length(3),
                Constraint::Min(1),
                Constraint::Length(2),
            ]
            .as_ref(),
        )
        .split(size);

    render_header(frame, chunks[0], &state.user, &state.notifications);
    render_summary(frame, &state.view_model.summary(), chunks[1]);
    render_filters(frame, state, chunks[2]);
    render_list(frame, state, chunks[3]);
    render_help(frame, state, chunks[4]);

    match &state.modal {
        Modal::None => {}
        Modal::Details(id) => {
            if let Some(project) = state.view_model.get(id) {
                render_details(frame, project, size);
            }
        }
        Modal::NewProject(form) => render_project_form(frame, form),
    }

    render_dropdown(frame, state.menu, &state.user, &state.notifications, HEADER_HEIGHT);
}

fn render_filters<B: Backend>(frame: &mut Frame<B>, state: &ProjectsState, area: Rect) {
    let search_style = if state.focus == Focus::Search {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let search_text = if state.criteria.search_term.is_empty() && state.focus == Focus::List {
        Span::styled(
            "Rechercher par nom, client ou localisation...",
            Style::default().fg(Color::DarkGray),
        )
    } else {
        let cursor = if state.focus == Focus::Search { "|" } else { "" };
        Span::styled(format!("{}{}", state.criteria.search_term, cursor), search_style)
    };

    let filters = Paragraph::new(Spans::from(vec![
        Span::styled("Recherche: ", search_style),
        search_text,
        Span::raw("   "),
        Span::styled("Statut: ", Style::default().fg(Color::Gray)),
        Span::raw(state.criteria.status.label()),
        Span::raw("   "),
        Span::styled("Type: ", Style::default().fg(Color::Gray)),
        Span::raw(state.criteria.project_type.label()),
    ]))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(filters, area);
}

fn gauge(progress: u8) -> String {
    let filled = usize::from(progress) * GAUGE_WIDTH / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(GAUGE_WIDTH - filled))
}

fn project_item(project: &Project) -> ListItem<'_> {
    let band = ProgressBand::of(project.progress);
    ListItem::new(vec![
        Spans::from(vec![
            Span::styled(project.name.as_str(), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(
                format!("[{}]", project.project_type.label()),
                Style::default().fg(type_color(project.project_type)),
            ),
            Span::raw(" "),
            Span::styled(
                format!("[{}]", project.status.label()),
                Style::default().fg(status_color(project.status)),
            ),
        ]),
        Spans::from(format!(
            "  Client: {} | {} | {} - {}",
            project.client,
            project.location,
            format_date(project.start_date),
            format_date(project.estimated_end_date),
        )),
        Spans::from(vec![
            Span::raw("  Progression "),
            Span::styled(gauge(project.progress), Style::default().fg(band_color(band))),
            Span::raw(format!(" {}%", project.progress)),
            Span::raw(format!(
                "   Budget: {} | Manager: {}",
                format_currency(u128::from(project.budget)),
                project.manager
            )),
        ]),
        Spans::from(""),
    ])
}

fn render_list<B: Backend>(frame: &mut Frame<B>, state: &mut ProjectsState, area: Rect) {
    let visible = state.view_model.filtered(&state.criteria);
    let title = if state.criteria.is_default() {
        format!("Projets ({})", visible.len())
    } else {
        format!("Projets ({}/{})", visible.len(), state.view_model.projects().len())
    };

    if visible.is_empty() {
        let empty = Paragraph::new("Aucun projet ne correspond aux filtres.")
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().title(title).borders(Borders::ALL));
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = visible.into_iter().map(project_item).collect();
    let projects_list = List::new(items)
        .block(Block::default().title(title).borders(Borders::ALL))
        .highlight_style(Style::default().bg(BRAND_BLUE).fg(Color::White));

    frame.render_stateful_widget(projects_list, area, &mut state.list_state);
}

fn render_help<B: Backend>(frame: &mut Frame<B>, state: &ProjectsState, area: Rect) {
    let (text, style) = if let Some(message) = &state.status_line {
        (message.clone(), Style::default().fg(Color::Yellow))
    } else if state.menu.is_open() {
        ("<B> Notifications | <U> Compte | <Esc> Fermer".to_string(), Style::default().fg(Color::White))
    } else if state.focus == Focus::Search {
        ("Tapez pour filtrer | <Enter>/<Esc> Retour à la liste".to_string(), Style::default().fg(Color::White))
    } else if state.selected_project().is_some() {
        (
            "</> Rechercher | <S> Statut | <T> Type | <C> Effacer | <Enter> Détails | <N> Nouveau | <E> Modifier | <D> Supprimer | <R> Recharger | <B> Notifications | <U> Compte | <Q> Quitter".to_string(),
            Style::default().fg(Color::White),
        )
    } else {
        (
            "</> Rechercher | <S> Statut | <T> Type | <C> Effacer | <N> Nouveau | <R> Recharger | <B> Notifications | <U> Compte | <Q> Quitter".to_string(),
            Style::default().fg(Color::White),
        )
    };

    let help = Paragraph::new(text)
        .block(Block::default().borders(Borders::TOP))
        .style(style);
    frame.render_widget(help, area);
}

fn field_line<'a>(label: &'a str, value: String) -> Spans<'a> {
    Spans::from(vec![
        Span::styled(format!("{label}: "), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(value),
    ])
}

fn render_details<B: Backend>(frame: &mut Frame<B>, project: &Project, size: Rect) {
    let popup_area = centered_rect(70, 80, size);

    let mut lines = vec![
        Spans::from(Span::styled(
            "Informations générales",
            Style::default().fg(BRAND_BLUE),
        )),
        field_line("Nom", project.name.clone()),
        field_line("Client", project.client.clone()),
        field_line("Localisation", project.location.clone()),
        field_line("Type", project.project_type.label().to_string()),
        field_line("Statut", project.status.label().to_string()),
        field_line("Budget", format_currency(u128::from(project.budget))),
        Spans::from(""),
        Spans::from(Span::styled("Planning", Style::default().fg(BRAND_BLUE))),
        field_line("Début", format_date(project.start_date)),
        field_line("Fin estimée", format_date(project.estimated_end_date)),
    ];
    if let Some(actual) = project.actual_end_date {
        lines.push(field_line("Fin réelle", format_date(actual)));
    }
    lines.push(field_line("Progression", format!("{}%", project.progress)));
    lines.push(Spans::from(""));
    lines.push(Spans::from(Span::styled("Description", Style::default().fg(BRAND_BLUE))));
    lines.push(Spans::from(project.description.clone()));
    lines.push(Spans::from(""));
    lines.push(Spans::from(Span::styled("Équipe", Style::default().fg(BRAND_BLUE))));
    lines.push(field_line("Chef de projet", project.manager.clone()));
    lines.extend(project.team.iter().map(|member| Spans::from(format!("  • {member}"))));
    lines.push(Spans::from(""));
    lines.push(Spans::from("<Esc> Fermer"));

    let popup = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().title("Détails du projet").borders(Borders::ALL))
        .style(Style::default().fg(Color::White).bg(Color::Black));

    frame.render_widget(Clear, popup_area);
    frame.render_widget(popup, popup_area);
}

pub fn handle_input(state: &mut ProjectsState) -> Result<Option<ProjectAction>> {
    if let Event::Key(key) = event::read()? {
        return Ok(state.handle_key(key.code));
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ProjectStatus, ProjectType, StatusFilter, TypeFilter};
    use crate::provider::seed;
    use tui::{backend::TestBackend, Terminal};

    fn state() -> ProjectsState {
        ProjectsState::new(
            ProjectViewModel::new(seed::projects()),
            seed::notifications(),
            seed::admin_user(),
        )
    }

    fn press(state: &mut ProjectsState, keys: &[KeyCode]) {
        for key in keys {
            state.handle_key(*key);
        }
    }

    fn type_chars(state: &mut ProjectsState, text: &str) {
        for c in text.chars() {
            state.handle_key(KeyCode::Char(c));
        }
    }

    #[test]
    fn starts_on_first_project() {
        let state = state();
        assert_eq!(state.selected_project_id().as_deref(), Some("1"));
        assert_eq!(state.visible().len(), 4);
    }

    #[test]
    fn navigation_wraps() {
        let mut state = state();
        press(&mut state, &[KeyCode::Up]);
        assert_eq!(state.selected_project_id().as_deref(), Some("4"));
        press(&mut state, &[KeyCode::Down]);
        assert_eq!(state.selected_project_id().as_deref(), Some("1"));
    }

    #[test]
    fn search_refilters_on_every_keystroke() {
        let mut state = state();
        press(&mut state, &[KeyCode::Char('/')]);
        assert_eq!(state.focus, Focus::Search);
        type_chars(&mut state, "toam");
        assert_eq!(state.visible().len(), 1);
        assert_eq!(state.selected_project_id().as_deref(), Some("3"));
        press(&mut state, &[KeyCode::Backspace, KeyCode::Backspace, KeyCode::Backspace, KeyCode::Backspace]);
        assert_eq!(state.visible().len(), 4);
    }

    #[test]
    fn q_while_searching_is_text_not_quit() {
        let mut state = state();
        press(&mut state, &[KeyCode::Char('/')]);
        assert!(state.handle_key(KeyCode::Char('q')).is_none());
        assert_eq!(state.criteria.search_term, "q");
        press(&mut state, &[KeyCode::Esc]);
        assert_eq!(state.focus, Focus::List);
        assert!(matches!(state.handle_key(KeyCode::Char('q')), Some(ProjectAction::Quit)));
    }

    #[test]
    fn status_and_type_filters_cycle() {
        let mut state = state();
        press(&mut state, &[KeyCode::Char('s')]);
        assert_eq!(state.criteria.status, StatusFilter::Only(ProjectStatus::Planning));
        for _ in 0..4 {
            press(&mut state, &[KeyCode::Char('t')]);
        }
        assert_eq!(state.criteria.project_type, TypeFilter::Only(ProjectType::Maintenance));
        let visible = state.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "4");
    }

    #[test]
    fn selection_is_cleared_when_nothing_matches() {
        let mut state = state();
        press(&mut state, &[KeyCode::Char('/')]);
        type_chars(&mut state, "zzz-no-match");
        assert!(state.visible().is_empty());
        assert!(state.selected_project().is_none());
        press(&mut state, &[KeyCode::Esc, KeyCode::Char('c')]);
        assert!(state.criteria.is_default());
        assert_eq!(state.selected_project_id().as_deref(), Some("1"));
    }

    #[test]
    fn selection_is_clamped_after_narrowing() {
        let mut state = state();
        press(&mut state, &[KeyCode::Up]);
        assert_eq!(state.selected_project_id().as_deref(), Some("4"));
        // Planning leaves a single project, so the selection falls back to it.
        press(&mut state, &[KeyCode::Char('s')]);
        assert_eq!(state.visible().len(), 1);
        assert_eq!(state.selected_project_id().as_deref(), Some("4"));
    }

    #[test]
    fn enter_opens_details_and_escape_closes() {
        let mut state = state();
        press(&mut state, &[KeyCode::Down, KeyCode::Enter]);
        assert_eq!(state.modal, Modal::Details("2".to_string()));
        // Keys do not reach the list while the modal is open.
        assert!(state.handle_key(KeyCode::Char('q')).is_none());
        assert_eq!(state.modal, Modal::None);
    }

    #[test]
    fn edit_and_delete_leave_collection_untouched() {
        let mut state = state();
        press(&mut state, &[KeyCode::Char('d')]);
        assert_eq!(state.status_line.as_deref(), Some("Suppression désactivée en mode démo"));
        press(&mut state, &[KeyCode::Char('e')]);
        assert_eq!(state.status_line.as_deref(), Some("Modification désactivée en mode démo"));
        assert_eq!(state.visible().len(), 4);
    }

    #[test]
    fn new_project_submission_does_not_add_a_project() {
        let mut state = state();
        press(&mut state, &[KeyCode::Char('n')]);
        let Modal::NewProject(form) = &mut state.modal else {
            panic!("form not open");
        };
        form.name = "Forage - Mahajanga".to_string();
        form.start_date = "2025-03-01".to_string();
        form.estimated_end_date = "2025-03-20".to_string();
        form.budget = "900000".to_string();
        press(&mut state, &[KeyCode::Char('s')]);
        assert_eq!(state.modal, Modal::None);
        assert!(state.status_line.as_deref().unwrap().contains("Forage - Mahajanga"));
        assert_eq!(state.visible().len(), 4);
    }

    #[test]
    fn user_menu_logout() {
        let mut state = state();
        press(&mut state, &[KeyCode::Char('u')]);
        assert_eq!(state.menu, MenuState::UserMenu);
        // 'q' is swallowed while a dropdown is open.
        assert!(state.handle_key(KeyCode::Char('q')).is_none());
        assert!(matches!(state.handle_key(KeyCode::Char('l')), Some(ProjectAction::Logout)));
        assert_eq!(state.menu, MenuState::Closed);
    }

    #[test]
    fn notifications_dropdown_toggles() {
        let mut state = state();
        press(&mut state, &[KeyCode::Char('b')]);
        assert_eq!(state.menu, MenuState::Notifications);
        press(&mut state, &[KeyCode::Char('l')]);
        assert_eq!(state.menu, MenuState::Notifications);
        press(&mut state, &[KeyCode::Char('b')]);
        assert_eq!(state.menu, MenuState::Closed);
    }

    #[test]
    fn reload_keeps_criteria_and_clamps_selection() {
        let mut state = state();
        press(&mut state, &[KeyCode::Up]);
        assert!(matches!(state.handle_key(KeyCode::Char('r')), Some(ProjectAction::Reload)));

        state.replace_projects(seed::projects().into_iter().take(2).collect());
        assert_eq!(state.view_model.projects().len(), 2);
        assert_eq!(state.selected_project_id().as_deref(), Some("2"));
        assert_eq!(state.status_line.as_deref(), Some("2 projet(s) rechargé(s)"));

        press(&mut state, &[KeyCode::Char('/')]);
        type_chars(&mut state, "toamasina");
        state.replace_projects(seed::projects());
        assert_eq!(state.criteria.search_term, "toamasina");
        assert_eq!(state.selected_project_id().as_deref(), Some("3"));
    }

    #[test]
    fn failed_reload_keeps_current_projects() {
        let mut state = state();
        state.reload_failed(&anyhow::anyhow!("reading fixture x.json"));
        assert_eq!(state.visible().len(), 4);
        assert_eq!(
            state.status_line.as_deref(),
            Some("Rechargement impossible : reading fixture x.json")
        );
    }

    #[test]
    fn gauge_has_fixed_width() {
        assert_eq!(gauge(0).chars().count(), GAUGE_WIDTH);
        assert_eq!(gauge(100), "█".repeat(GAUGE_WIDTH));
        assert_eq!(gauge(75).chars().filter(|c| *c == '█').count(), 15);
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol.as_str())
            .collect()
    }

    #[test]
    fn renders_tiles_and_projects() {
        let mut state = state();
        let mut terminal = Terminal::new(TestBackend::new(160, 40)).unwrap();
        terminal.draw(|f| render_projects(f, &mut state)).unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains("FAMILY FORAGE"));
        assert!(text.contains("Total projets"));
        assert!(text.contains("Projets (4)"));
        assert!(text.contains("Forage et installation solaire - Antsirabe"));
    }

    #[test]
    fn renders_details_modal() {
        let mut state = state();
        press(&mut state, &[KeyCode::Down, KeyCode::Down, KeyCode::Enter]);
        let mut terminal = Terminal::new(TestBackend::new(160, 50)).unwrap();
        terminal.draw(|f| render_projects(f, &mut state)).unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains("Détails du projet"));
        assert!(text.contains("Fin réelle"));
    }
}
