//! Wire models for the auth and onboarding endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Public user representation returned by `/auth/register` and `/auth/me`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
}

impl UserProfile {
    /// Name to greet the user with: full name when set, email otherwise.
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.email)
    }
}

/// Body for `/auth/register`. A missing full name is sent as `null`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
}

/// Token grant returned by `/auth/login`. The backend may omit the token
/// (`access_token: None`), in which case the stored token stays untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenGrant {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Supported social sign-in providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SocialProvider {
    Google,
    Apple,
}

impl SocialProvider {
    /// Capitalized provider name for user-facing banners.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Google => "Google",
            Self::Apple => "Apple",
        }
    }
}

impl std::fmt::Display for SocialProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Google => write!(f, "google"),
            Self::Apple => write!(f, "apple"),
        }
    }
}

/// Completion status reported for an onboarding step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Completed,
    Skipped,
    Pending,
}

impl std::fmt::Display for StepStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Completed => write!(f, "completed"),
            Self::Skipped => write!(f, "skipped"),
            Self::Pending => write!(f, "pending"),
        }
    }
}

/// Body for `/onboarding/step`. `data` is an open key-value mapping the
/// backend stores verbatim; it is never persisted client-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnboardingStepUpdate {
    pub step: String,
    pub status: StepStatus,
    pub data: Value,
}
