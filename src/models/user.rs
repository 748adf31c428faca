// Allow dead code: role capability checks cover actions the CLI does not
// expose yet
#![allow(dead_code)]

use serde::{Deserialize, Serialize};

/// Account role. The backend serializes these capitalized ("Admin"),
/// and no other value is valid for authorization decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Doctor,
    Patient,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "Admin"),
            Role::Doctor => write!(f, "Doctor"),
            Role::Patient => write!(f, "Patient"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Admin" => Ok(Role::Admin),
            "Doctor" => Ok(Role::Doctor),
            "Patient" => Ok(Role::Patient),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// The authenticated identity record returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub role: Role,
}

/// Application section, mirroring the navigation structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Dashboard,
    Patients,
    Doctors,
    Appointments,
    Billing,
    Inventory,
    Reports,
}

impl Section {
    /// All sections in navigation order.
    pub const ALL: [Section; 7] = [
        Section::Dashboard,
        Section::Patients,
        Section::Doctors,
        Section::Appointments,
        Section::Billing,
        Section::Inventory,
        Section::Reports,
    ];

    /// Whether a role may see this section at all.
    pub fn visible_to(&self, role: Role) -> bool {
        match self {
            Section::Dashboard | Section::Appointments | Section::Billing => true,
            Section::Patients | Section::Reports => {
                matches!(role, Role::Admin | Role::Doctor)
            }
            Section::Doctors | Section::Inventory => matches!(role, Role::Admin),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Section::Dashboard => "Dashboard",
            Section::Patients => "Patients",
            Section::Doctors => "Doctors",
            Section::Appointments => "Appointments",
            Section::Billing => "Billing",
            Section::Inventory => "Inventory",
            Section::Reports => "Reports",
        }
    }
}

impl Role {
    /// Sections this role is allowed to navigate to.
    pub fn allowed_sections(&self) -> Vec<Section> {
        Section::ALL
            .iter()
            .copied()
            .filter(|s| s.visible_to(*self))
            .collect()
    }

    /// Action-level checks beyond navigation filtering.
    pub fn can_delete_records(&self) -> bool {
        matches!(self, Role::Admin)
    }

    pub fn can_manage_inventory(&self) -> bool {
        matches!(self, Role::Admin)
    }

    pub fn can_write_medical_records(&self) -> bool {
        matches!(self, Role::Doctor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        let json = serde_json::to_string(&Role::Doctor).unwrap();
        assert_eq!(json, "\"Doctor\"");
        let back: Role = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Role::Doctor);
    }

    #[test]
    fn test_unknown_role_rejected() {
        let result = serde_json::from_str::<Role>("\"Nurse\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_section_visibility_matches_navigation() {
        // Patients see only dashboard, appointments, and billing
        assert_eq!(
            Role::Patient.allowed_sections(),
            vec![Section::Dashboard, Section::Appointments, Section::Billing]
        );
        // Doctors additionally see patients and reports
        assert!(Section::Patients.visible_to(Role::Doctor));
        assert!(Section::Reports.visible_to(Role::Doctor));
        assert!(!Section::Inventory.visible_to(Role::Doctor));
        // Only admins see the doctor roster and inventory
        assert!(Section::Doctors.visible_to(Role::Admin));
        assert!(Section::Inventory.visible_to(Role::Admin));
    }

    #[test]
    fn test_parse_user() {
        let json = r#"{"id": 7, "name": "Ada Obi", "email": "ada@example.org", "role": "Admin"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, 7);
        assert_eq!(user.role, Role::Admin);
        assert_eq!(user.email.as_deref(), Some("ada@example.org"));
    }
}
