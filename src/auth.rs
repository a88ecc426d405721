use crate::config::Config;
use crate::error::{JournalError, Result};
use crate::session::SessionSigner;
use log::error;

/// The single configured admin account.
pub struct AdminIdentity {
    username: String,
    password_hash: String,
}

impl AdminIdentity {
    pub fn new(username: &str, password_hash: &str) -> Self {
        Self {
            username: username.to_owned(),
            password_hash: password_hash.to_owned(),
        }
    }

    /// Checks a submitted username/password pair.
    ///
    /// Missing or empty fields are an [`JournalError::InvalidInput`]; a wrong
    /// username or password is `Ok(false)`.
    pub fn check(&self, username: Option<&str>, password: Option<&str>) -> Result<bool> {
        let (username, password) = match (username, password) {
            (Some(u), Some(p)) if !u.is_empty() && !p.is_empty() => (u, p),
            _ => return Err(JournalError::InvalidInput),
        };
        if username != self.username {
            return Ok(false);
        }
        match bcrypt::verify(password, &self.password_hash) {
            Ok(valid) => Ok(valid),
            Err(e) => {
                error!("configured admin password hash is unusable: {}", e);
                Ok(false)
            }
        }
    }
}

/// Immutable per-process state shared with every handler.
pub struct AppState {
    pub admin: AdminIdentity,
    pub session: SessionSigner,
}

impl AppState {
    pub fn from_config(config: &Config) -> Self {
        Self {
            admin: AdminIdentity::new(&config.admin_username, &config.admin_password_hash),
            session: SessionSigner::new(&config.session_secret, &config.auth_secret),
        }
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;

    /// State with `admin`/`secret` credentials, hashed at the cheapest cost.
    pub fn test_state() -> AppState {
        let hash = bcrypt::hash("secret", 4).expect("hashing must succeed");
        AppState {
            admin: AdminIdentity::new("admin", &hash),
            session: SessionSigner::new("test-session-secret", "test-auth-secret"),
        }
    }
}
