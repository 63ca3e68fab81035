//! Local validation gates — computed client-side, never asserted by the server.

use std::sync::OnceLock;

use regex::Regex;

/// Basic email shape check: non-whitespace, `@`, non-whitespace, `.`,
/// non-whitespace somewhere in the string.
pub fn email_valid(email: &str) -> bool {
    static EMAIL_SHAPE: OnceLock<Regex> = OnceLock::new();
    let re = EMAIL_SHAPE.get_or_init(|| Regex::new(r"\S+@\S+\.\S+").expect("static email regex"));
    re.is_match(email)
}

/// Registration requires at least 8 characters. Login deliberately does not
/// use this check; any non-empty password is accepted there.
pub fn password_strong(password: &str) -> bool {
    password.len() >= 8
}
