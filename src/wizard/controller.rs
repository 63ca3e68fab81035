//! Wizard controller — owns the session and decides step transitions.
//!
//! Every transition-triggering operation follows the same shape: set busy,
//! clear banners (unless silent), issue exactly one API call, then report the
//! outcome through the banners and maybe advance the step. Failures never
//! move the step; busy is always cleared. Errors from the client become
//! user-visible messages, nothing is fatal.

use std::sync::Arc;

use serde_json::json;

use crate::api::{
    AuthApi, OnboardingStepUpdate, RegisterRequest, SocialProvider, StepStatus,
};
use crate::error::ApiError;

use super::session::SignupSession;
use super::state::SignupStep;

/// UI-triggered commands accepted by the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardCommand {
    SubmitRegistration,
    SubmitLogin,
    SocialSignIn {
        provider: SocialProvider,
        id_token: String,
    },
    SubmitProfile,
    FinishPreferences,
    Back,
}

/// Why the dispatcher refused to run a command. No network call was made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// A previous submission is still in flight.
    Busy,
    /// A local validation gate failed.
    Invalid(&'static str),
    /// The command does not apply to the current step.
    WrongStep,
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Busy => write!(f, "a request is already in flight"),
            Self::Invalid(reason) => write!(f, "{reason}"),
            Self::WrongStep => write!(f, "not available on this step"),
        }
    }
}

/// Coordinates the signup flow: session state, API calls, and step
/// transitions.
pub struct WizardController {
    api: Arc<dyn AuthApi>,
    session: SignupSession,
}

impl WizardController {
    pub fn new(api: Arc<dyn AuthApi>) -> Self {
        Self {
            api,
            session: SignupSession::new(),
        }
    }

    pub fn session(&self) -> &SignupSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SignupSession {
        &mut self.session
    }

    /// Serialize UI commands against the busy flag and local validation
    /// gates. `Ok(())` means the command ran; its outcome is reported through
    /// the session banners, never through this result.
    ///
    /// The busy gate is advisory: it mirrors disabled controls, and a caller
    /// invoking the operations below directly bypasses it.
    pub async fn dispatch(&mut self, command: WizardCommand) -> Result<(), Rejection> {
        if self.session.busy {
            return Err(Rejection::Busy);
        }
        match command {
            WizardCommand::SubmitRegistration => {
                if self.session.step != SignupStep::Account {
                    return Err(Rejection::WrongStep);
                }
                if !self.session.can_submit_account() {
                    return Err(Rejection::Invalid(
                        "email must look like an address and the password needs at least 8 characters",
                    ));
                }
                self.submit_registration().await;
            }
            WizardCommand::SubmitLogin => {
                if self.session.step != SignupStep::Account {
                    return Err(Rejection::WrongStep);
                }
                if !self.session.can_submit_login() {
                    return Err(Rejection::Invalid(
                        "email must look like an address and the password must not be empty",
                    ));
                }
                self.submit_login().await;
            }
            WizardCommand::SocialSignIn { provider, id_token } => {
                if self.session.step != SignupStep::Account {
                    return Err(Rejection::WrongStep);
                }
                self.social_sign_in(provider, &id_token).await;
            }
            WizardCommand::SubmitProfile => {
                if self.session.step != SignupStep::Profile {
                    return Err(Rejection::WrongStep);
                }
                self.submit_profile().await;
            }
            WizardCommand::FinishPreferences => {
                if self.session.step != SignupStep::Preferences {
                    return Err(Rejection::WrongStep);
                }
                self.finish_preferences().await;
            }
            WizardCommand::Back => {
                if !self.go_back() {
                    return Err(Rejection::WrongStep);
                }
            }
        }
        Ok(())
    }

    /// Register, auto-login silently, then advance to the profile step.
    pub async fn submit_registration(&mut self) {
        self.session.clear_banners();
        self.session.busy = true;

        let request = RegisterRequest {
            email: self.session.email.clone(),
            password: self.session.password().to_string(),
            full_name: non_empty(&self.session.full_name),
        };
        match self.api.register(&request).await {
            Ok(user) => {
                self.session.last_success =
                    Some(format!("Welcome, {}! Account created.", user.display_name()));
                // Silent auto-login so the onboarding calls carry a token.
                // Its outcome must never block the step change or replace the
                // registration banner.
                self.login_inner(true).await;
                self.session.step = SignupStep::Profile;
            }
            Err(e) => {
                self.session.last_error = Some(banner_message(&e, "Registration failed"));
            }
        }
        self.session.busy = false;
    }

    /// Login path: establishes a token but never advances the step.
    pub async fn submit_login(&mut self) {
        self.session.clear_banners();
        self.session.busy = true;
        self.login_inner(false).await;
        self.session.busy = false;
    }

    async fn login_inner(&mut self, silent: bool) {
        let result = self
            .api
            .login(&self.session.email, self.session.password())
            .await;
        match result {
            Ok(_grant) => {
                if !silent {
                    self.session.last_success = Some("Logged in successfully.".to_string());
                }
                // Best-effort probes that the token works; failures ignored.
                if let Err(e) = self.api.current_user().await {
                    tracing::debug!("post-login profile probe failed: {e}");
                }
                if let Err(e) = self.api.onboarding_progress().await {
                    tracing::debug!("post-login progress probe failed: {e}");
                }
            }
            Err(e) => {
                if !silent {
                    self.session.last_error = Some(banner_message(&e, "Login failed"));
                }
                // Silent failures are discarded entirely.
            }
        }
    }

    /// Social sign-in: on success the account step is considered done.
    pub async fn social_sign_in(&mut self, provider: SocialProvider, id_token: &str) {
        self.session.clear_banners();
        self.session.busy = true;
        match self.api.social_sign_in(provider, id_token).await {
            Ok(_) => {
                self.session.last_success =
                    Some(format!("{} sign-in successful.", provider.title()));
                self.session.step = SignupStep::Profile;
            }
            Err(e) => {
                self.session.last_error = Some(banner_message(&e, "Social sign-in failed"));
            }
        }
        self.session.busy = false;
    }

    /// Record the profile step; on success advance to preferences.
    pub async fn submit_profile(&mut self) {
        self.session.clear_banners();
        self.session.busy = true;
        let update = OnboardingStepUpdate {
            step: "profile".to_string(),
            status: StepStatus::Completed,
            data: json!({
                "fullName": self.session.full_name,
                "role": self.session.role,
                "newsletter": self.session.newsletter_opt_in,
            }),
        };
        match self.api.update_onboarding_step(&update).await {
            Ok(_) => {
                self.session.step = SignupStep::Preferences;
                self.session.last_success = Some("Profile saved.".to_string());
            }
            Err(e) => {
                self.session.last_error = Some(banner_message(&e, "Could not save profile"));
            }
        }
        self.session.busy = false;
    }

    /// Record the preferences step; on success the session is onboarded.
    pub async fn finish_preferences(&mut self) {
        self.session.clear_banners();
        self.session.busy = true;
        let update = OnboardingStepUpdate {
            step: "preferences".to_string(),
            status: StepStatus::Completed,
            data: json!({ "themePref": self.session.theme_preference }),
        };
        match self.api.update_onboarding_step(&update).await {
            Ok(_) => {
                self.session.onboarded = true;
                self.session.last_success = Some("All set! Onboarding completed.".to_string());
            }
            Err(e) => {
                self.session.last_error = Some(banner_message(&e, "Could not save preferences"));
            }
        }
        self.session.busy = false;
    }

    /// Back navigation: pure state change — no network, banners untouched.
    /// Returns false when already on the first step.
    pub fn go_back(&mut self) -> bool {
        match self.session.step.previous() {
            Some(previous) => {
                self.session.step = previous;
                true
            }
            None => false,
        }
    }
}

fn banner_message(err: &ApiError, fallback: &str) -> String {
    let message = err.to_string();
    if message.is_empty() {
        fallback.to_string()
    } else {
        message
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
