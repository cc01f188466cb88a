use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

use crate::models::{unread_count, Notification, User};
use crate::ui::{dropdown_rect, BRAND_BLUE};

/// Which header dropdown, if any, is open. At most one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    #[default]
    Closed,
    Notifications,
    UserMenu,
}

impl MenuState {
    pub fn toggle_notifications(self) -> Self {
        match self {
            MenuState::Notifications => MenuState::Closed,
            _ => MenuState::Notifications,
        }
    }

    pub fn toggle_user_menu(self) -> Self {
        match self {
            MenuState::UserMenu => MenuState::Closed,
            _ => MenuState::UserMenu,
        }
    }

    pub fn is_open(self) -> bool {
        self != MenuState::Closed
    }
}

pub fn render_header<B: Backend>(
    frame: &mut Frame<B>,
    area: Rect,
    user: &User,
    notifications: &[Notification],
) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(48)].as_ref())
        .split(area);

    let brand = Paragraph::new(Spans::from(vec![
        Span::styled(
            "FAMILY FORAGE",
            Style::default().fg(BRAND_BLUE).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | "),
        Span::styled(user.role.label(), Style::default().fg(Color::Gray)),
    ]))
    .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(brand, chunks[0]);

    let unread = unread_count(notifications);
    let mut right = vec![Span::raw("Notifications")];
    if unread > 0 {
        right.push(Span::styled(
            format!(" {unread} "),
            Style::default().fg(Color::White).bg(Color::Red),
        ));
    }
    right.push(Span::raw("  "));
    right.push(Span::styled(
        user.name.as_str(),
        Style::default().add_modifier(Modifier::BOLD),
    ));

    let account = Paragraph::new(Spans::from(right)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(account, chunks[1]);
}

pub fn render_dropdown<B: Backend>(
    frame: &mut Frame<B>,
    menu: MenuState,
    user: &User,
    notifications: &[Notification],
    header_height: u16,
) {
    let size = frame.size();
    match menu {
        MenuState::Closed => {}
        MenuState::Notifications => {
            let height = u16::try_from(notifications.len())
                .unwrap_or(u16::MAX)
                .saturating_mul(2)
                .saturating_add(3);
            let area = dropdown_rect(size, header_height, 50, height);
            let items: Vec<ListItem> = notifications
                .iter()
                .map(|n| {
                    let title_style = if n.unread {
                        Style::default().fg(BRAND_BLUE).add_modifier(Modifier::BOLD)
                    } else {
                        Style::default()
                    };
                    ListItem::new(vec![
                        Spans::from(vec![
                            Span::styled(n.title.as_str(), title_style),
                            Span::styled(format!("  {}", n.time), Style::default().fg(Color::DarkGray)),
                        ]),
                        Spans::from(Span::styled(n.message.as_str(), Style::default().fg(Color::Gray))),
                    ])
                })
                .collect();
            let list = List::new(items).block(
                Block::default()
                    .title("Notifications")
                    .borders(Borders::ALL)
                    .style(Style::default().bg(Color::Black)),
            );
            frame.render_widget(Clear, area);
            frame.render_widget(list, area);
        }
        MenuState::UserMenu => {
            let area = dropdown_rect(size, header_height, 34, 6);
            let menu = Paragraph::new(vec![
                Spans::from(Span::styled(
                    user.name.as_str(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Spans::from(Span::styled(user.email.as_str(), Style::default().fg(Color::Gray))),
                Spans::from(""),
                Spans::from("<L> Déconnexion  <Esc> Fermer"),
            ])
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .style(Style::default().bg(Color::Black)),
            );
            frame.render_widget(Clear, area);
            frame.render_widget(menu, area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_notification_list_still_renders() {
        use crate::provider::seed;
        use tui::{backend::TestBackend, Terminal};

        let template = seed::notifications().remove(0);
        let notifications: Vec<Notification> = (0..40_000).map(|_| template.clone()).collect();
        let user = seed::admin_user();
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal
            .draw(|f| render_dropdown(f, MenuState::Notifications, &user, &notifications, 2))
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol.as_str())
            .collect();
        assert!(text.contains("Notifications"));
    }

    #[test]
    fn toggles_are_exclusive() {
        let menu = MenuState::Closed.toggle_notifications();
        assert_eq!(menu, MenuState::Notifications);
        let menu = menu.toggle_user_menu();
        assert_eq!(menu, MenuState::UserMenu);
        assert_eq!(menu.toggle_user_menu(), MenuState::Closed);
        assert!(!MenuState::Closed.is_open());
    }
}
