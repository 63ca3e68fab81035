//! Signup wizard — session state, validation, and the controller state
//! machine.
//!
//! The wizard is a linear three-step flow: account creation (or login /
//! social sign-in), profile details, then preferences. The controller owns
//! all mutable state and is the only thing that moves the step; the API
//! client below it never decides transitions.

pub mod controller;
pub mod session;
pub mod state;
pub mod validate;

pub use controller::{Rejection, WizardCommand, WizardController};
pub use session::{Role, SignupSession, ThemePreference};
pub use state::SignupStep;
pub use validate::{email_valid, password_strong};
