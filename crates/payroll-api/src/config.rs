use serde::{Deserialize, Serialize};

/// Server configuration.
///
/// Nothing here persists; the store is process-lifetime in-memory, so
/// the only knobs are the listen address, the token-signing secret,
/// and the demo credential seeded at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Secret used to sign and verify bearer tokens. Opaque to the
    /// controllers beyond "verify gives back the original claims".
    pub jwt_secret: String,
    /// Credential inserted into the users table at startup so the API
    /// is usable out of the box.
    pub seed_user_email: String,
    pub seed_user_password: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            jwt_secret: "dev-secret-change-me".to_string(),
            seed_user_email: "dummy@clipboardhealth.com".to_string(),
            seed_user_password: "dummy".to_string(),
        }
    }
}

impl ServerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the socket address string to bind.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
