//! Authentication collaborator.
//!
//! Sign-in and credential handling belong to the auth provider; the admin
//! panel only needs to know who is signed in and whether to show the login
//! form, the loading screen, or the dashboard.

mod local;

use crate::core::{Result, UserId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use local::LocalAuthProvider;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: UserId,
    pub email: String,
}

/// A signed-in session handed back by [`AuthProvider::sign_in`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub token: String,
    pub user: AuthUser,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    Loading,
    Authenticated(AuthUser),
    Unauthenticated,
}

/// What the protected admin route shows for a given [`AuthState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    ShowLoading,
    ShowLogin,
    Render(AuthUser),
}

/// Gate in front of every admin view.
pub struct RouteGuard;

impl RouteGuard {
    pub fn decide(state: &AuthState) -> GuardOutcome {
        match state {
            AuthState::Loading => GuardOutcome::ShowLoading,
            AuthState::Authenticated(user) => GuardOutcome::Render(user.clone()),
            AuthState::Unauthenticated => GuardOutcome::ShowLogin,
        }
    }
}

impl AuthState {
    pub fn user(&self) -> Option<&AuthUser> {
        match self {
            AuthState::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}

#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session>;

    async fn sign_out(&self, token: &str) -> Result<()>;

    async fn current_user(&self, token: &str) -> Option<AuthUser>;

    async fn state(&self, token: Option<&str>) -> AuthState {
        let Some(token) = token else {
            return AuthState::Unauthenticated;
        };
        match self.current_user(token).await {
            Some(user) => AuthState::Authenticated(user),
            None => AuthState::Unauthenticated,
        }
    }
}
