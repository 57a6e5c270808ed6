//! User profile as returned by the auth backend, and greeting text.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Teacher,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    pub role: Role,
    pub is_approved: bool,
}

impl UserProfile {
    /// Name shown in the UI; falls back to "friend" for blank usernames.
    pub fn display_name(&self) -> &str {
        let name = self.username.trim();
        if name.is_empty() {
            "friend"
        } else {
            name
        }
    }
}

/// Greeting for the lesson home screen.
pub fn greeting(profile: Option<&UserProfile>) -> String {
    match profile {
        None => "Welcome, guest!".to_string(),
        Some(p) if !p.is_approved => format!(
            "Welcome back, {}! Your account is waiting for approval.",
            p.display_name()
        ),
        Some(p) => format!("Welcome back, {}!", p.display_name()),
    }
}
