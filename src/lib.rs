// ============================================================================
// Folio Admin Library
// ============================================================================

pub mod activity;
pub mod auth;
pub mod config;
pub mod core;
pub mod dashboard;
pub mod editor;
pub mod reveal;
pub mod schema;
pub mod store;
pub mod web;

// Re-export main types for convenience
pub use core::{
    ActivityAction, ActivityEntry, AdminError, ContentDocument, ContentMap, ContentRecord, Result,
    Section, UserId,
};

pub use activity::{ActivityRow, ActivityViewer, format_distance};
pub use auth::{AuthProvider, AuthState, AuthUser, GuardOutcome, LocalAuthProvider, RouteGuard};
pub use config::AppConfig;
pub use dashboard::{DashboardController, Notification, NotificationKind, Notifier};
pub use editor::{FieldPath, Preview, PreviewBlock, SectionEditor};
pub use reveal::RevealWatcher;
pub use store::{
    AuditLog, ContentStore, FileAuditLog, FileContentStore, MemoryAuditLog, MemoryContentStore,
};
pub use web::{AppState, build_router};
