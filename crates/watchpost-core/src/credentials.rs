//! Admin credential pair.

use std::fmt;

/// A username/password pair submitted at the dashboard login prompt.
///
/// `Debug` replaces the password with a placeholder so the pair can appear
/// in tracing fields without leaking the secret.
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// The raw password. Only the credential verifier should read this.
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_redacts_the_password() {
        let creds = Credentials::new("operator", "hunter2");
        let shown = format!("{creds:?}");
        assert!(shown.contains("operator"));
        assert!(shown.contains("[REDACTED]"));
        assert!(!shown.contains("hunter2"));
    }

    #[test]
    fn accessors_return_what_was_given() {
        let creds = Credentials::new("operator", "hunter2");
        assert_eq!(creds.username(), "operator");
        assert_eq!(creds.password(), "hunter2");
    }
}
