//! Telegram platform identity.

use serde::{Deserialize, Serialize};

use super::id::TelegramUserId;

/// Fixed identity used when the app runs outside the Telegram host and no
/// platform user can ever appear (local development, plain browser tab).
const GUEST_ID: i64 = 0;
const GUEST_FIRST_NAME: &str = "Guest";
const GUEST_USERNAME: &str = "guest";

/// User identity object injected by the Telegram WebApp host.
///
/// Available only when the page is embedded in Telegram; the resolver in
/// `petal-gateway` handles late injection and the guest fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelegramUser {
    /// Telegram-assigned user ID.
    pub id: TelegramUserId,
    /// First name (always present on platform identities).
    pub first_name: String,
    /// Last name, if set in the Telegram profile.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Public @username, if set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// IETF language tag of the user's client.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
}

impl TelegramUser {
    /// Deterministic fallback identity for non-platform browser contexts.
    ///
    /// Produced at most once per session, and only when the host is
    /// confirmed not to be Telegram.
    #[must_use]
    pub fn guest() -> Self {
        Self {
            id: TelegramUserId::new(GUEST_ID),
            first_name: GUEST_FIRST_NAME.to_string(),
            last_name: None,
            username: Some(GUEST_USERNAME.to_string()),
            language_code: None,
        }
    }

    /// Whether this is the deterministic guest fallback.
    #[must_use]
    pub fn is_guest(&self) -> bool {
        self.id == TelegramUserId::new(GUEST_ID)
    }

    /// Display name: first name plus last name when present.
    #[must_use]
    pub fn display_name(&self) -> String {
        match &self.last_name {
            Some(last) => format!("{} {last}", self.first_name),
            None => self.first_name.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_guest_is_deterministic() {
        let a = TelegramUser::guest();
        let b = TelegramUser::guest();
        assert_eq!(a, b);
        assert!(a.is_guest());
        assert_eq!(a.first_name, "Guest");
        assert_eq!(a.username.as_deref(), Some("guest"));
    }

    #[test]
    fn test_platform_user_is_not_guest() {
        let user = TelegramUser {
            id: TelegramUserId::new(123),
            first_name: "Anna".to_string(),
            last_name: Some("Petrova".to_string()),
            username: None,
            language_code: Some("ru".to_string()),
        };
        assert!(!user.is_guest());
        assert_eq!(user.display_name(), "Anna Petrova");
    }

    #[test]
    fn test_deserialize_webapp_shape() {
        let json = r#"{ "id": 987654321, "first_name": "Ivan", "username": "ivan_f" }"#;
        let user: TelegramUser = serde_json::from_str(json).unwrap();
        assert_eq!(user.id.as_i64(), 987_654_321);
        assert!(user.last_name.is_none());
    }
}
