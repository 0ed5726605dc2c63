use crate::activity::DEFAULT_ACTIVITY_LIMIT;
use crate::auth::LocalAuthProvider;
use crate::dashboard::DEFAULT_NOTIFICATION_TTL_SECS;
use clap::Parser;
use std::path::PathBuf;

/// Portfolio admin server configuration
///
/// Every flag can also be set through its environment variable.
#[derive(Parser, Debug, Clone)]
#[command(name = "folio-admin")]
#[command(about = "Admin backend for editing portfolio content")]
pub struct AppConfig {
    /// Interface to bind
    #[arg(long, env = "FOLIO_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "FOLIO_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Directory for the content snapshot and activity journal.
    /// Content lives in memory only when unset.
    #[arg(long, env = "FOLIO_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Email of the seeded admin account
    #[arg(long, env = "FOLIO_ADMIN_EMAIL", default_value = LocalAuthProvider::DEFAULT_ADMIN_EMAIL)]
    pub admin_email: String,

    /// Password of the seeded admin account. There is no default.
    #[arg(long, env = "FOLIO_ADMIN_PASSWORD", hide_env_values = true)]
    pub admin_password: String,

    /// Maximum number of entries shown in the activity log
    #[arg(long, env = "FOLIO_ACTIVITY_LIMIT", default_value_t = DEFAULT_ACTIVITY_LIMIT)]
    pub activity_limit: usize,

    /// Seconds before a notification is dismissed automatically
    #[arg(long, env = "FOLIO_NOTIFICATION_TTL_SECS", default_value_t = DEFAULT_NOTIFICATION_TTL_SECS)]
    pub notification_ttl_secs: i64,

    /// Seconds a sign-in stays valid
    #[arg(long, env = "FOLIO_SESSION_TTL_SECS", default_value_t = LocalAuthProvider::DEFAULT_SESSION_TTL_SECS)]
    pub session_ttl_secs: i64,

    /// bcrypt work factor for stored passwords
    #[arg(long, env = "FOLIO_BCRYPT_COST", default_value_t = bcrypt::DEFAULT_COST)]
    pub bcrypt_cost: u32,
}

impl AppConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Set the host
    pub fn host(mut self, host: &str) -> Self {
        self.host = host.to_string();
        self
    }

    /// Set the port
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Persist to `dir` instead of keeping content in memory
    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    /// Set the seeded admin credentials
    pub fn admin(mut self, email: &str, password: &str) -> Self {
        self.admin_email = email.to_string();
        self.admin_password = password.to_string();
        self
    }

    pub fn activity_limit(mut self, limit: usize) -> Self {
        self.activity_limit = limit;
        self
    }

    pub fn notification_ttl_secs(mut self, secs: i64) -> Self {
        self.notification_ttl_secs = secs;
        self
    }

    pub fn session_ttl_secs(mut self, secs: i64) -> Self {
        self.session_ttl_secs = secs;
        self
    }

    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            data_dir: None,
            admin_email: LocalAuthProvider::DEFAULT_ADMIN_EMAIL.to_string(),
            admin_password: String::new(),
            activity_limit: DEFAULT_ACTIVITY_LIMIT,
            notification_ttl_secs: DEFAULT_NOTIFICATION_TTL_SECS,
            session_ttl_secs: LocalAuthProvider::DEFAULT_SESSION_TTL_SECS,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags_with_defaults() {
        let config = AppConfig::try_parse_from([
            "folio-admin",
            "--port",
            "9000",
            "--admin-password",
            "correct-horse",
        ])
        .unwrap();

        assert_eq!(config.address(), "0.0.0.0:9000");
        assert_eq!(config.data_dir, None);
        assert_eq!(config.activity_limit, 50);
        assert_eq!(config.notification_ttl_secs, 5);
        assert_eq!(config.admin_email, "admin@example.com");
        assert_eq!(config.admin_password, "correct-horse");
        assert_eq!(config.session_ttl_secs, 8 * 60 * 60);
    }

    #[test]
    fn admin_password_has_no_default() {
        if std::env::var_os("FOLIO_ADMIN_PASSWORD").is_some() {
            return;
        }
        let err = AppConfig::try_parse_from(["folio-admin"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);

        // The library default carries no password either, so no admin can be seeded from it.
        let config = AppConfig::default();
        assert!(config.admin_password.is_empty());
        assert!(
            LocalAuthProvider::with_admin(&config.admin_email, &config.admin_password, 4).is_err()
        );
    }

    #[test]
    fn builder_overrides_defaults() {
        let config = AppConfig::default()
            .host("127.0.0.1")
            .port(3000)
            .data_dir("/tmp/folio")
            .admin("me@example.com", "secret123");

        assert_eq!(config.address(), "127.0.0.1:3000");
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/folio")));
        assert_eq!(config.admin_password, "secret123");
    }
}
