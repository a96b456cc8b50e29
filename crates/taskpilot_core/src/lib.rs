//! Core of TaskPilot, a personal productivity assistant.
//! Persistence, view synchronization and the AI adapter live here; front-ends
//! only drive `AppController`.

pub mod ai;
pub mod app;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod runner;
pub mod view;

pub use ai::{ActivitySnapshot, AiAdapter, AiError, GeminiClient, TextGenerator};
pub use app::{AppController, AppState, Appearance, NotificationLevel, Panel};
pub use config::{AiConfig, AppConfig, ConfigError, LogConfig, StoreConfig};
pub use db::{Gateway, GatewayError, GatewayErrorKind};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::list::{NewTaskList, TaskList};
pub use model::reminder::Reminder;
pub use model::task::{Importance, NewTask, Task};
pub use model::{RecordId, ValidationError};
pub use repo::list_repo::{ListRepository, SqliteListRepository};
pub use repo::reminder_repo::{ReminderRepository, SqliteReminderRepository};
pub use repo::task_repo::{SqliteTaskRepository, TaskRepository};
pub use repo::{RepoError, RepoResult};

/// Minimal health-check API for front-end wiring.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
