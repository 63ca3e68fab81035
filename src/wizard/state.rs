//! Signup wizard state machine — which step the user is on.

use serde::{Deserialize, Serialize};

/// The steps of the signup wizard.
///
/// Progresses linearly: Account → Profile → Preferences. Preferences is the
/// terminal step; completion is tracked on the session, not as a step.
/// Forward moves only happen on a successful dependent API call; backward
/// moves are always allowed and never touch the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignupStep {
    Account,
    Profile,
    Preferences,
}

impl SignupStep {
    /// Check if a forward transition from `self` to `target` is valid.
    pub fn can_advance_to(&self, target: SignupStep) -> bool {
        use SignupStep::*;
        matches!((self, target), (Account, Profile) | (Profile, Preferences))
    }

    /// The next step in the linear progression, if any.
    pub fn next(&self) -> Option<SignupStep> {
        match self {
            Self::Account => Some(Self::Profile),
            Self::Profile => Some(Self::Preferences),
            Self::Preferences => None,
        }
    }

    /// The previous step, if any. Back navigation is unconditional.
    pub fn previous(&self) -> Option<SignupStep> {
        match self {
            Self::Account => None,
            Self::Profile => Some(Self::Account),
            Self::Preferences => Some(Self::Profile),
        }
    }

    /// Whether this is the final step of the wizard.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Preferences)
    }
}

impl Default for SignupStep {
    fn default() -> Self {
        Self::Account
    }
}

impl std::fmt::Display for SignupStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Account => "account",
            Self::Profile => "profile",
            Self::Preferences => "preferences",
        };
        write!(f, "{s}")
    }
}
