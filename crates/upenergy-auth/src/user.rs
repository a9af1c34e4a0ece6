//! User types.

use crate::AuthError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use upenergy_commerce::ids::AccountId;

/// User role for authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Buys and retires credits.
    #[default]
    Investor,
    /// Platform administrator.
    Admin,
}

impl Role {
    /// Get role as string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Investor => "investor",
            Role::Admin => "admin",
        }
    }

    /// Label shown on the login form.
    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Investor => "Investor",
            Role::Admin => "Administrator",
        }
    }
}

impl FromStr for Role {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "investor" => Ok(Role::Investor),
            "admin" => Ok(Role::Admin),
            other => Err(AuthError::UnknownRole(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The logged-in user record, as persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Login timestamp in milliseconds, doubling as the id.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Role picked at login.
    #[serde(default)]
    pub role: Role,
    /// When the user logged in.
    pub login_time: DateTime<Utc>,
    /// Linked Hedera account, once one has been created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hedera_account: Option<AccountId>,
    /// Public key of the linked account.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hedera_public_key: Option<String>,
}

impl User {
    /// Build the user record for a login at `now`.
    pub fn from_login(form: LoginForm, now: DateTime<Utc>) -> Self {
        Self {
            id: now.timestamp_millis(),
            name: form.name,
            email: form.email,
            role: form.role,
            login_time: now,
            hedera_account: None,
            hedera_public_key: None,
        }
    }

    /// Check if user is an administrator.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Check if user is an investor.
    pub fn is_investor(&self) -> bool {
        self.role == Role::Investor
    }

    /// Merge a patch into this record. Unset patch fields are left alone.
    pub fn apply(&mut self, patch: UserPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(role) = patch.role {
            self.role = role;
        }
        if let Some(account) = patch.hedera_account {
            self.hedera_account = Some(account);
        }
        if let Some(key) = patch.hedera_public_key {
            self.hedera_public_key = Some(key);
        }
    }
}

/// What the login form collects. No password: any input is accepted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LoginForm {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Requested role.
    #[serde(default)]
    pub role: Role,
}

impl LoginForm {
    /// Create a form for an investor.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            role: Role::default(),
        }
    }

    /// Set the role.
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    /// Both fields are required; their content is not checked.
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.name.trim().is_empty() {
            return Err(AuthError::InvalidCredentials("name is required".to_string()));
        }
        if self.email.trim().is_empty() {
            return Err(AuthError::InvalidCredentials("email is required".to_string()));
        }
        Ok(())
    }
}

/// Partial update to a [`User`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPatch {
    /// New display name.
    pub name: Option<String>,
    /// New email address.
    pub email: Option<String>,
    /// New role.
    pub role: Option<Role>,
    /// Linked Hedera account.
    pub hedera_account: Option<AccountId>,
    /// Public key of the linked account.
    pub hedera_public_key: Option<String>,
}

impl UserPatch {
    /// Patch that links a Hedera account.
    pub fn hedera_account(account: impl Into<AccountId>, public_key: Option<String>) -> Self {
        Self {
            hedera_account: Some(account.into()),
            hedera_public_key: public_key,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!(Role::default(), Role::Investor);
        assert!(matches!(
            "owner".parse::<Role>(),
            Err(AuthError::UnknownRole(_))
        ));
    }

    #[test]
    fn test_user_from_login() {
        let user = User::from_login(LoginForm::new("Ada", "ada@example.com"), at());
        assert_eq!(user.id, at().timestamp_millis());
        assert!(user.is_investor());
        assert!(!user.is_admin());
        assert!(user.hedera_account.is_none());
    }

    #[test]
    fn test_user_json_shape() {
        let user = User::from_login(
            LoginForm::new("Ada", "ada@example.com").with_role(Role::Admin),
            at(),
        );
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["role"], "admin");
        assert!(json.get("loginTime").is_some());
        assert!(json.get("hederaAccount").is_none());
    }

    #[test]
    fn test_reads_browser_record() {
        let raw = r#"{
            "id": 1709285400000,
            "name": "Ada",
            "email": "ada@example.com",
            "role": "investor",
            "loginTime": "2024-03-01T09:30:00.000Z",
            "hederaAccount": "0.0.4567",
            "hederaPrivateKey": "ignored"
        }"#;
        let user: User = serde_json::from_str(raw).unwrap();
        assert_eq!(user.login_time, at());
        assert_eq!(user.hedera_account, Some(AccountId::new("0.0.4567")));
    }

    #[test]
    fn test_apply_patch() {
        let mut user = User::from_login(LoginForm::new("Ada", "ada@example.com"), at());
        user.apply(UserPatch::hedera_account("0.0.9", Some("302a".to_string())));
        assert_eq!(user.name, "Ada");
        assert_eq!(user.hedera_account, Some(AccountId::new("0.0.9")));
        assert_eq!(user.hedera_public_key.as_deref(), Some("302a"));
    }

    #[test]
    fn test_blank_fields_rejected() {
        assert!(LoginForm::new("", "a@b.c").validate().is_err());
        assert!(LoginForm::new("Ada", "  ").validate().is_err());
        assert!(LoginForm::new("Ada", "not-an-email").validate().is_ok());
    }
}
