use super::WebError;
use crate::auth::{AuthProvider, AuthUser};
use crate::dashboard::{DashboardController, Notifier};
use crate::store::{AuditLog, ContentStore};
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use chrono::Duration;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

/// Open dashboards keyed by session token.
#[derive(Default)]
pub struct SessionRegistry {
    dashboards: RwLock<HashMap<String, Arc<Mutex<DashboardController>>>>,
}

impl SessionRegistry {
    pub async fn insert(&self, token: String, dashboard: DashboardController) -> Arc<Mutex<DashboardController>> {
        let dashboard = Arc::new(Mutex::new(dashboard));
        self.dashboards.write().await.insert(token, dashboard.clone());
        dashboard
    }

    pub async fn get(&self, token: &str) -> Option<Arc<Mutex<DashboardController>>> {
        self.dashboards.read().await.get(token).cloned()
    }

    pub async fn remove(&self, token: &str) -> bool {
        self.dashboards.write().await.remove(token).is_some()
    }

    pub async fn tokens(&self) -> Vec<String> {
        self.dashboards.read().await.keys().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.dashboards.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.dashboards.read().await.is_empty()
    }
}

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ContentStore>,
    pub audit: Arc<dyn AuditLog>,
    pub auth: Arc<dyn AuthProvider>,
    pub sessions: Arc<SessionRegistry>,
    pub activity_limit: usize,
    pub notification_ttl: Duration,
}

impl AppState {
    pub fn new(
        store: Arc<dyn ContentStore>,
        audit: Arc<dyn AuditLog>,
        auth: Arc<dyn AuthProvider>,
    ) -> Self {
        Self {
            store,
            audit,
            auth,
            sessions: Arc::new(SessionRegistry::default()),
            activity_limit: crate::activity::DEFAULT_ACTIVITY_LIMIT,
            notification_ttl: Duration::seconds(crate::dashboard::DEFAULT_NOTIFICATION_TTL_SECS),
        }
    }

    pub fn with_activity_limit(mut self, limit: usize) -> Self {
        self.activity_limit = limit;
        self
    }

    pub fn with_notification_ttl(mut self, ttl: Duration) -> Self {
        self.notification_ttl = ttl;
        self
    }

    /// Closes dashboards whose session the auth provider no longer accepts.
    pub async fn prune_sessions(&self) -> usize {
        let mut removed = 0;
        for token in self.sessions.tokens().await {
            if self.auth.current_user(&token).await.is_none() && self.sessions.remove(&token).await {
                removed += 1;
            }
        }
        if removed > 0 {
            debug!(removed, "stale dashboards closed");
        }
        removed
    }

    /// Opens a dashboard for a freshly signed-in user and loads its content.
    pub async fn open_dashboard(&self, token: String, user: AuthUser) -> Arc<Mutex<DashboardController>> {
        self.prune_sessions().await;
        let mut dashboard = DashboardController::new(
            self.store.clone(),
            self.audit.clone(),
            user,
            Notifier::new(self.notification_ttl),
        );
        // A failed load is already surfaced as a notification.
        let _ = dashboard.load_all().await;
        self.sessions.insert(token, dashboard).await
    }
}

/// Signed-in admin resolved from the `Authorization: Bearer` header.
pub struct AdminSession {
    pub token: String,
    pub user: AuthUser,
    pub dashboard: Arc<Mutex<DashboardController>>,
}

#[async_trait]
impl FromRequestParts<AppState> for AdminSession {
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| WebError::Unauthorized("missing bearer token".to_string()))?
            .to_string();

        let Some(user) = state.auth.current_user(&token).await else {
            state.sessions.remove(&token).await;
            return Err(WebError::Unauthorized("invalid or expired session".to_string()));
        };

        let dashboard = match state.sessions.get(&token).await {
            Some(dashboard) => dashboard,
            None => state.open_dashboard(token.clone(), user.clone()).await,
        };

        Ok(Self {
            token,
            user,
            dashboard,
        })
    }
}
