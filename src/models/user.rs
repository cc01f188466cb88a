#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Client,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Role::Admin => "Administration",
            Role::Client => "Espace Client",
        }
    }
}

/// The signed-in demo user shown in the header's user menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub name: String,
    pub email: String,
    pub role: Role,
}
