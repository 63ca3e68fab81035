//! Mutable signup session owned by the wizard controller.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use super::state::SignupStep;
use super::validate::{email_valid, password_strong};

/// User role choice on the profile step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    User,
    Creator,
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Creator => write!(f, "creator"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

/// Theme choice on the preferences step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemePreference {
    #[default]
    Dark,
    Light,
    System,
}

impl std::fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dark => write!(f, "dark"),
            Self::Light => write!(f, "light"),
            Self::System => write!(f, "system"),
        }
    }
}

/// All mutable state for one signup attempt.
///
/// Created when the wizard starts, discarded when it ends; never persisted.
/// Only the controller mutates it, in response to discrete user commands or
/// API responses.
#[derive(Debug)]
pub struct SignupSession {
    pub step: SignupStep,
    pub email: String,
    pub full_name: String,
    password: SecretString,
    pub role: Role,
    pub newsletter_opt_in: bool,
    pub theme_preference: ThemePreference,
    /// Advisory in-flight flag; submissions are rejected while set.
    pub busy: bool,
    pub last_error: Option<String>,
    pub last_success: Option<String>,
    /// Set once the preferences step has been accepted by the backend.
    pub onboarded: bool,
}

impl Default for SignupSession {
    fn default() -> Self {
        Self {
            step: SignupStep::default(),
            email: String::new(),
            full_name: String::new(),
            password: SecretString::from(String::new()),
            role: Role::default(),
            newsletter_opt_in: false,
            theme_preference: ThemePreference::default(),
            busy: false,
            last_error: None,
            last_success: None,
            onboarded: false,
        }
    }
}

impl SignupSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = SecretString::from(password.into());
    }

    /// Raw password, exposed only to build request bodies and gates.
    pub(crate) fn password(&self) -> &str {
        self.password.expose_secret()
    }

    /// Gate for "Create account": plausible email and a strong password.
    pub fn can_submit_account(&self) -> bool {
        email_valid(&self.email) && password_strong(self.password())
    }

    /// Gate for "I already have an account": plausible email and any
    /// non-empty password — no minimum length on the login path.
    pub fn can_submit_login(&self) -> bool {
        email_valid(&self.email) && !self.password().is_empty()
    }

    pub(crate) fn clear_banners(&mut self) {
        self.last_error = None;
        self.last_success = None;
    }
}
