use std::{env, fmt::Display, str::FromStr};

use anyhow::{anyhow, Result};
use tracing::{info, warn};

/// What the privilege gate does for a user with no privilege record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingPrivilege {
    #[default]
    Allow,
    Deny,
}

impl FromStr for MissingPrivilege {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "allow" => Ok(MissingPrivilege::Allow),
            "deny" => Ok(MissingPrivilege::Deny),
            other => Err(anyhow!("expected `allow` or `deny`, got `{other}`")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub db_path: String,
    /// Throw the database away on shutdown.
    pub temporary_db: bool,
    pub missing_privilege: MissingPrivilege,
    pub session_cookie: String,
    pub secure_cookies: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 4000,
            db_path: "tuiter-db".to_string(),
            temporary_db: false,
            missing_privilege: MissingPrivilege::Allow,
            session_cookie: "tuiter.sid".to_string(),
            secure_cookies: false,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let environment: String = try_load("TUITER_ENV", "development")?;
        Ok(Self {
            port: try_load("TUITER_PORT", "4000")?,
            db_path: try_load("TUITER_DB_PATH", "tuiter-db")?,
            temporary_db: try_load("TUITER_TEMPORARY_DB", "false")?,
            missing_privilege: try_load("TUITER_MISSING_PRIVILEGE", "allow")?,
            session_cookie: try_load("TUITER_SESSION_COOKIE", "tuiter.sid")?,
            secure_cookies: environment.eq_ignore_ascii_case("production"),
        })
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T>
where
    T::Err: Display,
{
    let raw = env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    raw.parse().map_err(|e| {
        warn!("Invalid {key} value: {e}");
        anyhow!("Environment misconfigured: {key}={raw}: {e}")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_privilege_policy_parses() {
        assert_eq!("allow".parse::<MissingPrivilege>().unwrap(), MissingPrivilege::Allow);
        assert_eq!("DENY".parse::<MissingPrivilege>().unwrap(), MissingPrivilege::Deny);
        assert!("maybe".parse::<MissingPrivilege>().is_err());
    }

    #[test]
    fn defaults_are_permissive() {
        let config = Config::default();
        assert_eq!(config.missing_privilege, MissingPrivilege::Allow);
        assert_eq!(config.session_cookie, "tuiter.sid");
        assert!(!config.secure_cookies);
    }
}
