//! Employee identity and roles.
//!
//! The backend keeps a registry linking Telegram identities to staff
//! roles. Absence of a record means the identity is an ordinary customer,
//! which is an expected outcome, never an error.

use serde::{Deserialize, Serialize};

use super::id::TelegramUserId;

/// Staff role with different permission levels in the admin panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeRole {
    /// Shop owner; full access including staff management.
    Owner,
    /// Full access to store management features.
    Admin,
    /// Order and catalog management.
    Manager,
    /// Warehouse/assembly operations.
    Worker,
    /// Read access to financial reports.
    Finance,
}

impl std::fmt::Display for EmployeeRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Owner => write!(f, "owner"),
            Self::Admin => write!(f, "admin"),
            Self::Manager => write!(f, "manager"),
            Self::Worker => write!(f, "worker"),
            Self::Finance => write!(f, "finance"),
        }
    }
}

impl std::str::FromStr for EmployeeRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "owner" => Ok(Self::Owner),
            "admin" => Ok(Self::Admin),
            "manager" => Ok(Self::Manager),
            "worker" => Ok(Self::Worker),
            "finance" => Ok(Self::Finance),
            _ => Err(format!("invalid employee role: {s}")),
        }
    }
}

/// Backend record linking a Telegram identity to a staff role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeIdentity {
    /// Telegram identity this record is linked to.
    pub telegram_id: TelegramUserId,
    /// Staff role.
    pub role: EmployeeRole,
    /// Display name as registered in the staff directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_role_roundtrip() {
        for role in [
            EmployeeRole::Owner,
            EmployeeRole::Admin,
            EmployeeRole::Manager,
            EmployeeRole::Worker,
            EmployeeRole::Finance,
        ] {
            assert_eq!(role.to_string().parse::<EmployeeRole>().unwrap(), role);
        }
    }

    #[test]
    fn test_identity_deserialize() {
        let json = r#"{ "telegram_id": 42, "role": "worker" }"#;
        let identity: EmployeeIdentity = serde_json::from_str(json).unwrap();
        assert_eq!(identity.telegram_id, TelegramUserId::new(42));
        assert_eq!(identity.role, EmployeeRole::Worker);
        assert!(identity.display_name.is_none());
    }
}
