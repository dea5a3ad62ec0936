//! Shared-password gate in front of the reports.
//!
//! Access is an explicit [`AuthContext`] value owned by the shell; nothing
//! global is flipped on login. The aggregation crates never see it.

use chrono::{DateTime, Utc};

/// How a session was let in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    /// No password configured.
    Open,
    Password,
}

/// Proof of access handed out by [`SessionGate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    mode: AccessMode,
    granted_at: DateTime<Utc>,
}

impl AuthContext {
    pub fn mode(&self) -> AccessMode {
        self.mode
    }

    pub fn granted_at(&self) -> DateTime<Utc> {
        self.granted_at
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    #[error("Mot de passe incorrect.")]
    WrongPassword,
}

#[derive(Debug, Clone, Default)]
pub struct SessionGate {
    password: Option<String>,
}

impl SessionGate {
    /// An empty or missing password leaves the gate open.
    pub fn new(password: Option<String>) -> Self {
        Self {
            password: password.filter(|value| !value.is_empty()),
        }
    }

    pub fn requires_password(&self) -> bool {
        self.password.is_some()
    }

    /// Context granted without a password, when the gate is open.
    pub fn open_context(&self, now: DateTime<Utc>) -> Option<AuthContext> {
        if self.requires_password() {
            return None;
        }
        Some(AuthContext {
            mode: AccessMode::Open,
            granted_at: now,
        })
    }

    pub fn authenticate(&self, attempt: &str, now: DateTime<Utc>) -> Result<AuthContext, AccessError> {
        match &self.password {
            None => Ok(AuthContext {
                mode: AccessMode::Open,
                granted_at: now,
            }),
            Some(expected) if expected == attempt => {
                tracing::info!("session unlocked");
                Ok(AuthContext {
                    mode: AccessMode::Password,
                    granted_at: now,
                })
            }
            Some(_) => {
                tracing::warn!("rejected login attempt");
                Err(AccessError::WrongPassword)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_720_000_000, 0).unwrap()
    }

    #[test]
    fn no_password_means_open_access() {
        let gate = SessionGate::new(None);
        assert!(!gate.requires_password());
        let context = gate.open_context(now()).unwrap();
        assert_eq!(context.mode(), AccessMode::Open);

        let blank = SessionGate::new(Some(String::new()));
        assert!(blank.open_context(now()).is_some());
    }

    #[test]
    fn password_gate_checks_the_attempt() {
        let gate = SessionGate::new(Some("tellthem".into()));
        assert!(gate.open_context(now()).is_none());
        assert_eq!(gate.authenticate("TellThem", now()), Err(AccessError::WrongPassword));
        let context = gate.authenticate("tellthem", now()).unwrap();
        assert_eq!(context.mode(), AccessMode::Password);
        assert_eq!(context.granted_at(), now());
    }
}
