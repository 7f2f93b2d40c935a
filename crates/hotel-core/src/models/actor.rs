//! Acting agent identity
//!
//! Authentication is an external collaborator; the core receives the already
//! resolved identity and role at its interface boundary.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of the acting agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Role {
    Admin,
    Manager,
    Receptionist,
    #[default]
    Guest,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "Admin"),
            Role::Manager => write!(f, "Manager"),
            Role::Receptionist => write!(f, "Receptionist"),
            Role::Guest => write!(f, "Guest"),
        }
    }
}

impl Role {
    /// Parse from string, defaulting unknown values to Guest
    pub fn from_str(s: &str) -> Self {
        match s {
            "Admin" => Role::Admin,
            "Manager" => Role::Manager,
            "Receptionist" => Role::Receptionist,
            _ => Role::Guest,
        }
    }
}

/// The agent performing an operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    /// User id, when booked through an authenticated channel
    pub id: Option<i32>,

    /// Display name used in audit entries
    pub name: String,

    /// Resolved role
    pub role: Role,
}

impl Actor {
    pub fn new(id: Option<i32>, name: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            name: name.into(),
            role,
        }
    }

    /// Elevated roles may bypass the late-cancellation window
    pub fn is_privileged(&self) -> bool {
        matches!(self.role, Role::Admin | Role::Manager)
    }

    /// Staff roles may mutate bookings they do not own
    pub fn is_staff(&self) -> bool {
        matches!(self.role, Role::Admin | Role::Manager | Role::Receptionist)
    }

    /// System actor for internally triggered actions
    pub fn system() -> Self {
        Self {
            id: None,
            name: "System".to_string(),
            role: Role::Admin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_privilege() {
        assert!(Actor::new(None, "m", Role::Manager).is_privileged());
        assert!(Actor::new(None, "a", Role::Admin).is_privileged());
        assert!(!Actor::new(None, "r", Role::Receptionist).is_privileged());
        assert!(!Actor::new(Some(1), "g", Role::Guest).is_privileged());
    }

    #[test]
    fn test_role_parse_defaults_to_guest() {
        assert_eq!(Role::from_str("Manager"), Role::Manager);
        assert_eq!(Role::from_str("root"), Role::Guest);
    }
}
