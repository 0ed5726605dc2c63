use super::{AuthProvider, AuthUser, Session};
use crate::core::{AdminError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Debug, Clone)]
struct Account {
    user: AuthUser,
    password_hash: String,
}

#[derive(Debug, Clone)]
struct SessionEntry {
    user: AuthUser,
    expires_at: DateTime<Utc>,
}

impl SessionEntry {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Email/password accounts with bcrypt hashes and opaque, expiring session tokens.
pub struct LocalAuthProvider {
    accounts: RwLock<HashMap<String, Account>>,
    sessions: RwLock<HashMap<String, SessionEntry>>,
    cost: u32,
    session_ttl: Duration,
}

impl LocalAuthProvider {
    pub const DEFAULT_ADMIN_EMAIL: &'static str = "admin@example.com";
    pub const DEFAULT_SESSION_TTL_SECS: i64 = 8 * 60 * 60;

    /// Creates a provider with a single administrator account.
    pub fn with_admin(email: &str, password: &str, cost: u32) -> Result<Self> {
        validate_email(email)?;
        validate_password(password)?;

        let account = Account {
            user: AuthUser {
                id: Uuid::new_v4(),
                email: email.to_string(),
            },
            password_hash: hash_password(password, cost)?,
        };

        let mut accounts = HashMap::new();
        accounts.insert(normalize(email), account);

        Ok(Self {
            accounts: RwLock::new(accounts),
            sessions: RwLock::new(HashMap::new()),
            cost,
            session_ttl: Duration::seconds(Self::DEFAULT_SESSION_TTL_SECS),
        })
    }

    /// How long a session token stays valid after sign-in.
    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = ttl;
        self
    }

    pub async fn create_account(&self, email: &str, password: &str) -> Result<AuthUser> {
        validate_email(email)?;
        validate_password(password)?;

        let key = normalize(email);
        if self.accounts.read().await.contains_key(&key) {
            return Err(AdminError::auth(format!("Account '{}' already exists", email)));
        }

        let password = password.to_string();
        let cost = self.cost;
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password, cost))
            .await
            .map_err(|e| AdminError::auth(format!("Password hashing task failed: {}", e)))??;

        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(&key) {
            return Err(AdminError::auth(format!("Account '{}' already exists", email)));
        }

        let user = AuthUser {
            id: Uuid::new_v4(),
            email: email.to_string(),
        };
        accounts.insert(
            key,
            Account {
                user: user.clone(),
                password_hash,
            },
        );
        Ok(user)
    }

    /// Number of sessions that have not expired yet.
    pub async fn session_count(&self) -> usize {
        let now = Utc::now();
        self.sessions
            .read()
            .await
            .values()
            .filter(|session| !session.is_expired(now))
            .count()
    }

    /// Drops every expired session. Returns how many were removed.
    pub async fn prune_expired(&self) -> usize {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired(now));
        let removed = before - sessions.len();
        if removed > 0 {
            debug!(removed, "expired sessions pruned");
        }
        removed
    }
}

#[async_trait]
impl AuthProvider for LocalAuthProvider {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        let account = self
            .accounts
            .read()
            .await
            .get(&normalize(email))
            .cloned()
            .ok_or_else(|| AdminError::auth("Invalid email or password"))?;

        let password = password.to_string();
        let hash = account.password_hash;
        let verified = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash).unwrap_or(false))
            .await
            .map_err(|e| AdminError::auth(format!("Password check task failed: {}", e)))?;
        if !verified {
            return Err(AdminError::auth("Invalid email or password"));
        }

        self.prune_expired().await;

        let user = account.user;
        let token = Uuid::new_v4().simple().to_string();
        let session = SessionEntry {
            user: user.clone(),
            expires_at: Utc::now() + self.session_ttl,
        };
        self.sessions.write().await.insert(token.clone(), session);
        info!(user_id = %user.id, "admin signed in");

        Ok(Session { token, user })
    }

    async fn sign_out(&self, token: &str) -> Result<()> {
        match self.sessions.write().await.remove(token) {
            Some(session) if !session.is_expired(Utc::now()) => {
                info!(user_id = %session.user.id, "admin signed out");
                Ok(())
            }
            _ => Err(AdminError::auth("Unknown session")),
        }
    }

    async fn current_user(&self, token: &str) -> Option<AuthUser> {
        let now = Utc::now();
        {
            let sessions = self.sessions.read().await;
            match sessions.get(token) {
                Some(session) if !session.is_expired(now) => return Some(session.user.clone()),
                Some(_) => {}
                None => return None,
            }
        }
        self.sessions.write().await.remove(token);
        None
    }
}

fn normalize(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

fn hash_password(password: &str, cost: u32) -> Result<String> {
    bcrypt::hash(password, cost).map_err(|e| AdminError::auth(format!("Failed to hash password: {}", e)))
}

fn validate_email(email: &str) -> Result<()> {
    let email = email.trim();
    if email.is_empty() {
        return Err(AdminError::auth("Email cannot be empty"));
    }
    if email.len() > 254 {
        return Err(AdminError::auth("Email too long (max 254 characters)"));
    }
    if !email.contains('@') {
        return Err(AdminError::auth("Email must contain '@'"));
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<()> {
    if password.is_empty() {
        return Err(AdminError::auth("Password cannot be empty"));
    }
    if password.len() < 8 {
        return Err(AdminError::auth("Password must be at least 8 characters long"));
    }
    Ok(())
}
