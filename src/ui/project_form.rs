use crossterm::event::KeyCode;
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

use crate::ingest::ProjectRecord;
use crate::models::{Project, ProjectStatus, ProjectType};
use crate::ui::centered_rect;

/// Result of feeding one key to the new-project form.
#[derive(Debug, Clone, PartialEq)]
pub enum FormOutcome {
    Pending,
    Cancel,
    Submit(Project),
}

#[derive(Clone, PartialEq, Copy, Debug)]
pub enum FormField {
    Name,
    Client,
    Location,
    Type,
    StartDate,
    EstimatedEndDate,
    Budget,
    Manager,
    Description,
}

const FIELDS: [FormField; 9] = [
    FormField::Name,
    FormField::Client,
    FormField::Location,
    FormField::Type,
    FormField::StartDate,
    FormField::EstimatedEndDate,
    FormField::Budget,
    FormField::Manager,
    FormField::Description,
];

impl FormField {
    fn label(self) -> &'static str {
        match self {
            FormField::Name => "Nom du projet",
            FormField::Client => "Client",
            FormField::Location => "Localisation",
            FormField::Type => "Type de projet",
            FormField::StartDate => "Date de début (AAAA-MM-JJ)",
            FormField::EstimatedEndDate => "Date de fin estimée (AAAA-MM-JJ)",
            FormField::Budget => "Budget (Ar)",
            FormField::Manager => "Chef de projet",
            FormField::Description => "Description",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectFormState {
    pub name: String,
    pub client: String,
    pub location: String,
    pub project_type: ProjectType,
    pub start_date: String,
    pub estimated_end_date: String,
    pub budget: String,
    pub manager: String,
    pub description: String,
    pub current_field: FormField,
    pub editing: bool,
    pub error: Option<String>,
}

impl Default for ProjectFormState {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectFormState {
    pub fn new() -> Self {
        Self {
            name: String::new(),
            client: String::new(),
            location: String::new(),
            project_type: ProjectType::Forage,
            start_date: String::new(),
            estimated_end_date: String::new(),
            budget: String::new(),
            manager: String::new(),
            description: String::new(),
            current_field: FormField::Name,
            editing: false,
            error: None,
        }
    }

    fn field_index(&self) -> usize {
        FIELDS.iter().position(|f| *f == self.current_field).unwrap_or(0)
    }

    pub fn next_field(&mut self) {
        self.current_field = FIELDS[(self.field_index() + 1) % FIELDS.len()];
    }

    pub fn previous_field(&mut self) {
        self.current_field = FIELDS[(self.field_index() + FIELDS.len() - 1) % FIELDS.len()];
    }

    fn text_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::Name => Some(&mut self.name),
            FormField::Client => Some(&mut self.client),
            FormField::Location => Some(&mut self.location),
            FormField::Type => None,
            FormField::StartDate => Some(&mut self.start_date),
            FormField::EstimatedEndDate => Some(&mut self.estimated_end_date),
            FormField::Budget => Some(&mut self.budget),
            FormField::Manager => Some(&mut self.manager),
            FormField::Description => Some(&mut self.description),
        }
    }

    fn display_value(&self, field: FormField) -> String {
        match field {
            FormField::Name => self.name.clone(),
            FormField::Client => self.client.clone(),
            FormField::Location => self.location.clone(),
            FormField::Type => format!("< {} >", self.project_type.label()),
            FormField::StartDate => self.start_date.clone(),
            FormField::EstimatedEndDate => self.estimated_end_date.clone(),
            FormField::Budget => self.budget.clone(),
            FormField::Manager => self.manager.clone(),
            FormField::Description => self.description.clone(),
        }
    }

    fn cycle_type(&mut self, forward: bool) {
        let idx = ProjectType::ALL
            .iter()
            .position(|t| *t == self.project_type)
            .unwrap_or(0);
        let len = ProjectType::ALL.len();
        let next = if forward { (idx + 1) % len } else { (idx + len - 1) % len };
        self.project_type = ProjectType::ALL[next];
    }

    fn edit_current_field(&mut self, key: KeyCode) {
        let field = self.current_field;
        let Some(value) = self.text_mut(field) else {
            return;
        };
        match key {
            KeyCode::Char(c) if field == FormField::Budget && !c.is_ascii_digit() => {}
            KeyCode::Char(c) => value.push(c),
            KeyCode::Backspace => {
                value.pop();
            }
            _ => {}
        }
    }

    /// Runs the entered values through the same validation fixtures get.
    /// New projects always start in planning with no progress.
    pub fn submit(&self) -> Result<Project, String> {
        let budget = self
            .budget
            .parse::<u64>()
            .map_err(|_| "Budget: montant requis".to_string())?;
        let record = ProjectRecord {
            id: "nouveau".to_string(),
            name: self.name.clone(),
            client: self.client.clone(),
            client_id: String::new(),
            location: self.location.clone(),
            project_type: self.project_type.as_str().to_string(),
            status: ProjectStatus::Planning.as_str().to_string(),
            progress: 0,
            start_date: self.start_date.clone(),
            estimated_end_date: self.estimated_end_date.clone(),
            actual_end_date: None,
            budget,
            description: self.description.clone(),
            manager: self.manager.clone(),
            team: Vec::new(),
        };
        record.validate().map_err(|e| e.to_string())
    }

    pub fn handle_key(&mut self, key: KeyCode) -> FormOutcome {
        if self.editing {
            match key {
                KeyCode::Enter | KeyCode::Esc => self.editing = false,
                _ => self.edit_current_field(key),
            }
            return FormOutcome::Pending;
        }

        match key {
            KeyCode::Esc => return FormOutcome::Cancel,
            KeyCode::Up | KeyCode::BackTab => self.previous_field(),
            KeyCode::Down | KeyCode::Tab => self.next_field(),
            KeyCode::Left if self.current_field == FormField::Type => self.cycle_type(false),
            KeyCode::Right if self.current_field == FormField::Type => self.cycle_type(true),
            KeyCode::Enter if self.current_field == FormField::Type => self.cycle_type(true),
            KeyCode::Enter => self.editing = true,
            KeyCode::Char('s') => match self.submit() {
                Ok(project) => return FormOutcome::Submit(project),
                Err(message) => self.error = Some(message),
            },
            _ => {}
        }
        FormOutcome::Pending
    }
}

pub fn render_project_form<B: Backend>(frame: &mut Frame<B>, state: &ProjectFormState) {
    let area = centered_rect(70, 80, frame.size());
    frame.render_widget(Clear, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Min(FIELDS.len() as u16 + 2),
                Constraint::Length(3),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(area);

    render_form(frame, state, chunks[0]);

    let error = Paragraph::new(state.error.clone().unwrap_or_default())
        .style(Style::default().fg(Color::Red))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(error, chunks[1]);

    let help_text = if state.editing {
        "Enter - Valider le champ | Esc - Terminer la saisie"
    } else {
        "Enter - Modifier | Haut/Bas - Naviguer | Gauche/Droite - Type | S - Créer le projet | Esc - Annuler"
    };
    let help = Paragraph::new(help_text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, chunks[2]);
}

fn render_form<B: Backend>(frame: &mut Frame<B>, state: &ProjectFormState, area: Rect) {
    let items: Vec<ListItem> = FIELDS
        .iter()
        .map(|field| {
            let selected = *field == state.current_field;
            let label_style = if selected {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            let mut value = state.display_value(*field);
            let value_style = if selected && state.editing {
                value.push('|');
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(Spans::from(vec![
                Span::styled(format!("{}: ", field.label()), label_style),
                Span::styled(value, value_style),
            ]))
        })
        .collect();

    let form_list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Nouveau projet")
            .style(Style::default().bg(Color::Black)),
    );
    frame.render_widget(form_list, area);
}
