//! Back-office user accounts

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Resource;

/// Permission level of an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Staff,
    Seller,
    Customer,
}

crate::impl_domain_status_conversions!(UserRole {
    Admin => "admin",
    Staff => "staff",
    Seller => "seller",
    Customer => "customer",
});

/// Account managed from the users screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub role: UserRole,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    /// Name shown in tables, falling back to the e-mail address
    #[must_use]
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(first), None) => first.clone(),
            (None, Some(last)) => last.clone(),
            (None, None) => self.email.clone(),
        }
    }
}

/// Create/update payload for [`User`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl Resource for User {
    const PATH: &'static str = "/users";
    type Input = UserInput;
}

fn default_active() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn user(first: Option<&str>, last: Option<&str>) -> User {
        User {
            id: "u1".to_string(),
            email: "ops@example.com".to_string(),
            first_name: first.map(String::from),
            last_name: last.map(String::from),
            phone: None,
            role: UserRole::Staff,
            is_active: true,
            created_at: None,
        }
    }

    #[test]
    fn display_name_prefers_full_name() {
        assert_eq!(user(Some("Ana"), Some("Lopes")).display_name(), "Ana Lopes");
        assert_eq!(user(Some("Ana"), None).display_name(), "Ana");
        assert_eq!(user(None, None).display_name(), "ops@example.com");
    }

    #[test]
    fn role_parses_case_insensitively() {
        assert_eq!(UserRole::from_str("ADMIN").unwrap(), UserRole::Admin);
        assert_eq!(UserRole::Seller.to_string(), "seller");
        assert!(UserRole::from_str("owner").is_err());
    }

    #[test]
    fn input_skips_unset_fields() {
        let input = UserInput { role: Some(UserRole::Admin), ..UserInput::default() };
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json, serde_json::json!({"role": "admin"}));
    }
}
