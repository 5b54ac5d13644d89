//! Runtime settings loaded from the environment (`.env` via dotenvy in main).

use std::net::SocketAddr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing env var: {0}")]
    Missing(&'static str),
    #[error("invalid {name}: {message}")]
    Invalid { name: &'static str, message: String },
}

/// Signing parameters for issued tokens.
#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub key: String,
    pub issuer: String,
    pub audience: String,
    pub lifetime_secs: i64,
}

/// The single configured login pair. There is no user table; this replaces the
/// hard-coded literal pair of the original service (a known security gap).
#[derive(Clone, Debug)]
pub struct AdminCredential {
    pub username: String,
    pub password: String,
}

impl AdminCredential {
    /// Both fields are compared without short-circuiting so a username mismatch
    /// does not return faster than a password mismatch.
    pub fn matches(&self, username: &str, password: &str) -> bool {
        let u = ct_eq(self.username.as_bytes(), username.as_bytes());
        let p = ct_eq(self.password.as_bytes(), password.as_bytes());
        u & p
    }
}

fn ct_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b) {
        diff |= x ^ y;
    }
    diff == 0
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub jwt: JwtConfig,
    pub admin: AdminCredential,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = require("DATABASE_URL")?;
        let bind_addr = env_or("BIND_ADDR", "127.0.0.1:3000")
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                name: "BIND_ADDR",
                message: e.to_string(),
            })?;
        let jwt = JwtConfig {
            key: require("JWT_KEY")?,
            issuer: env_or("JWT_ISSUER", "catalogo-api"),
            audience: env_or("JWT_AUDIENCE", "catalogo-api"),
            lifetime_secs: env_or("JWT_LIFETIME_SECS", "7200").parse().map_err(
                |e: std::num::ParseIntError| ConfigError::Invalid {
                    name: "JWT_LIFETIME_SECS",
                    message: e.to_string(),
                },
            )?,
        };
        let admin = AdminCredential {
            username: env_or("ADMIN_USERNAME", "lvgvspe"),
            password: env_or("ADMIN_PASSWORD", "lvgvspe"),
        };
        Ok(AppConfig {
            database_url,
            bind_addr,
            jwt,
            admin,
        })
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::Missing(name))
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> AdminCredential {
        AdminCredential {
            username: "lvgvspe".into(),
            password: "lvgvspe".into(),
        }
    }

    #[test]
    fn matching_pair_accepted() {
        assert!(admin().matches("lvgvspe", "lvgvspe"));
    }

    #[test]
    fn any_other_pair_rejected() {
        let a = admin();
        assert!(!a.matches("lvgvspe", "wrong"));
        assert!(!a.matches("wrong", "lvgvspe"));
        assert!(!a.matches("", ""));
        // Case matters.
        assert!(!a.matches("Lvgvspe", "lvgvspe"));
    }

    #[test]
    fn ct_eq_handles_length_mismatch() {
        assert!(!ct_eq(b"abc", b"abcd"));
        assert!(ct_eq(b"", b""));
        assert!(ct_eq(b"abc", b"abc"));
    }
}
