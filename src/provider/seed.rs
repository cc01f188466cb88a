use crate::ingest::ProjectRecord;
use crate::models::{Notification, Role, User};

fn team(members: &[&str]) -> Vec<String> {
    members.iter().map(|m| m.to_string()).collect()
}

/// The four sample projects the demo dashboard ships with.
pub fn records() -> Vec<ProjectRecord> {
    vec![
        ProjectRecord {
            id: "1".to_string(),
            name: "Forage et installation solaire - Antsirabe".to_string(),
            client: "Jean Rakoto".to_string(),
            client_id: "1".to_string(),
            location: "Antsirabe, Vakinankaratra".to_string(),
            project_type: "forage".to_string(),
            status: "in_progress".to_string(),
            progress: 75,
            start_date: "2024-12-01".to_string(),
            estimated_end_date: "2025-01-30".to_string(),
            actual_end_date: None,
            budget: 2_500_000,
            description: "Forage de puits avec installation de pompe solaire pour irrigation".to_string(),
            manager: "Ing. Ratsimba Michel".to_string(),
            team: team(&["Technicien A", "Technicien B", "Géophysicien"]),
        },
        ProjectRecord {
            id: "2".to_string(),
            name: "Installation pompe solaire - Itasy".to_string(),
            client: "Marie Ratsimba".to_string(),
            client_id: "2".to_string(),
            location: "Miarinarivo, Itasy".to_string(),
            project_type: "solaire".to_string(),
            status: "in_progress".to_string(),
            progress: 45,
            start_date: "2025-01-05".to_string(),
            estimated_end_date: "2025-02-15".to_string(),
            actual_end_date: None,
            budget: 1_800_000,
            description: "Installation système de pompage solaire sur puits existant".to_string(),
            manager: "Ing. Andriamahefa Paul".to_string(),
            team: team(&["Électricien", "Technicien solaire"]),
        },
        ProjectRecord {
            id: "3".to_string(),
            name: "Étude géophysique - Toamasina".to_string(),
            client: "Paul Andry".to_string(),
            client_id: "3".to_string(),
            location: "Toamasina, Atsinanana".to_string(),
            project_type: "geophysique".to_string(),
            status: "completed".to_string(),
            progress: 100,
            start_date: "2024-11-15".to_string(),
            estimated_end_date: "2024-12-15".to_string(),
            actual_end_date: Some("2024-12-10".to_string()),
            budget: 800_000,
            description: "Étude géophysique pour localisation optimale de forage".to_string(),
            manager: "Dr. Rakotomanga".to_string(),
            team: team(&["Géophysicien senior", "Assistant terrain"]),
        },
        ProjectRecord {
            id: "4".to_string(),
            name: "Maintenance système - Vakinankaratra".to_string(),
            client: "Sophie Hery".to_string(),
            client_id: "4".to_string(),
            location: "Antsirabe, Vakinankaratra".to_string(),
            project_type: "maintenance".to_string(),
            status: "planning".to_string(),
            progress: 0,
            start_date: "2025-02-01".to_string(),
            estimated_end_date: "2025-02-05".to_string(),
            actual_end_date: None,
            budget: 350_000,
            description: "Maintenance préventive annuelle du système de pompage".to_string(),
            manager: "Technicien Chef".to_string(),
            team: team(&["Technicien maintenance"]),
        },
    ]
}

pub fn notifications() -> Vec<Notification> {
    let entry = |id, title: &str, message: &str, time: &str, unread| Notification {
        id,
        title: title.to_string(),
        message: message.to_string(),
        time: time.to_string(),
        unread,
    };
    vec![
        entry(1, "Nouveau projet créé", "Projet forage Antsirabe", "5 min", true),
        entry(2, "Document uploadé", "Rapport géophysique", "1h", true),
        entry(3, "Utilisateur inscrit", "Jean Rakoto", "2h", false),
    ]
}

pub fn admin_user() -> User {
    User {
        name: "Administrateur".to_string(),
        email: "admin@familyforage.mg".to_string(),
        role: Role::Admin,
    }
}

/// Demo account for the client space; falls back to a generic label for ids
/// the seed does not know.
pub fn client_user(client_id: &str, client_name: Option<&str>) -> User {
    User {
        name: client_name.unwrap_or("Client").to_string(),
        email: format!("client{client_id}@familyforage.mg"),
        role: Role::Client,
    }
}

#[cfg(test)]
pub fn projects() -> Vec<crate::models::Project> {
    crate::ingest::validate_all(records()).expect("seed fixture is valid")
}
