use serde::Deserialize;

/// Entry of the header's notifications dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Notification {
    pub id: u32,
    pub title: String,
    pub message: String,
    /// Relative age as displayed, e.g. "5 min" or "1h".
    pub time: String,
    #[serde(default)]
    pub unread: bool,
}

pub fn unread_count(notifications: &[Notification]) -> usize {
    notifications.iter().filter(|n| n.unread).count()
}
