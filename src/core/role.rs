//! The four mutually exclusive UI variants

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[value(name = "superadmin")]
    #[serde(rename = "superadmin")]
    SuperAdmin,
    #[default]
    Admin,
    Teacher,
    Student,
}

impl Role {
    /// Column heading for `CoursePlacement::secondary_label`
    pub fn secondary_heading(self) -> &'static str {
        match self {
            Role::Teacher => "Promotion",
            Role::SuperAdmin | Role::Admin | Role::Student => "Enseignant",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Role::SuperAdmin => "Vue plateforme",
            Role::Admin => "Gestion Emploi du Temps",
            Role::Teacher => "Espace Enseignant",
            Role::Student => "Espace Étudiant",
        }
    }

    /// Only the admin grid offers move/add/edit/delete controls
    pub fn allows_editing(self) -> bool {
        matches!(self, Role::Admin)
    }

    /// Context used when none is configured
    pub fn default_context(self) -> &'static str {
        match self {
            Role::Teacher => "Prof. Jean Dupont",
            Role::SuperAdmin | Role::Admin | Role::Student => "L3-INFO",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::SuperAdmin => "superadmin",
            Role::Admin => "admin",
            Role::Teacher => "teacher",
            Role::Student => "student",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_admin_edits() {
        assert!(Role::Admin.allows_editing());
        assert!(!Role::Teacher.allows_editing());
        assert!(!Role::Student.allows_editing());
        assert!(!Role::SuperAdmin.allows_editing());
    }

    #[test]
    fn test_teacher_view_labels_promotions() {
        assert_eq!(Role::Teacher.secondary_heading(), "Promotion");
        assert_eq!(Role::Student.secondary_heading(), "Enseignant");
        assert_eq!(Role::Teacher.default_context(), "Prof. Jean Dupont");
    }

    #[test]
    fn test_role_roundtrips_through_config_names() {
        let role: Role = serde_json::from_str("\"superadmin\"").unwrap();
        assert_eq!(role, Role::SuperAdmin);
        let role: Role = serde_json::from_str("\"teacher\"").unwrap();
        assert_eq!(role, Role::Teacher);
        assert_eq!(Role::SuperAdmin.to_string(), "superadmin");
    }
}
