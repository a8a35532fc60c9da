//! Global application configuration manager.
//!
//! `AppConfig` is a lazily initialized, globally accessible singleton holding
//! the runtime values the `migration` and `seeder` binaries read from the
//! environment. Tests can override individual fields through the setters.

use std::env;
use std::sync::{OnceLock, RwLock};

/// Process configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub project_name: String,
    pub log_level: String,
    pub log_file: String,
    pub log_to_stdout: bool,
    pub database_path: String,
}

static CONFIG_INSTANCE: OnceLock<RwLock<AppConfig>> = OnceLock::new();

impl AppConfig {
    /// Loads the configuration from `.env` and the environment.
    ///
    /// Every field has a default, so this never fails. `DATABASE_PATH` falls
    /// back to a sqlite file under `data/`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            env: env::var("APP_ENV").unwrap_or_else(|_| "development".into()),
            project_name: env::var("PROJECT_NAME").unwrap_or_else(|_| "quizforge".into()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_file: env::var("LOG_FILE").unwrap_or_else(|_| "logs/seeder.log".into()),
            log_to_stdout: env::var("LOG_TO_STDOUT").unwrap_or_else(|_| "false".into()) == "true",
            database_path: env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "data/quizforge.db".into()),
        }
    }

    /// Returns a shared reference to the global configuration.
    ///
    /// # Panics
    /// Panics if the lock is poisoned.
    pub fn global() -> std::sync::RwLockReadGuard<'static, AppConfig> {
        CONFIG_INSTANCE
            .get_or_init(|| RwLock::new(AppConfig::from_env()))
            .read()
            .expect("Failed to acquire AppConfig read lock")
    }

    /// Reloads the configuration from the environment, dropping overrides.
    pub fn reset() {
        if let Some(lock) = CONFIG_INSTANCE.get() {
            let mut guard = lock
                .write()
                .expect("Failed to acquire AppConfig write lock");
            *guard = AppConfig::from_env();
        }
    }

    /// The sqlite file behind `database_path`, or `None` when it already holds
    /// a connection URL.
    pub fn sqlite_file(&self) -> Option<&str> {
        const SCHEMES: [&str; 3] = ["sqlite:", "postgres://", "mysql://"];
        if SCHEMES.iter().any(|s| self.database_path.starts_with(s)) {
            None
        } else {
            Some(&self.database_path)
        }
    }

    /// Connection URL for `database_path`. Plain paths become a sqlite URL
    /// that creates the file on first use.
    pub fn database_url(&self) -> String {
        match self.sqlite_file() {
            Some(path) => format!("sqlite://{path}?mode=rwc"),
            None => self.database_path.clone(),
        }
    }

    fn set_field<F>(setter: F)
    where
        F: FnOnce(&mut AppConfig),
    {
        let lock = CONFIG_INSTANCE.get_or_init(|| RwLock::new(AppConfig::from_env()));
        let mut guard = lock
            .write()
            .expect("Failed to acquire AppConfig write lock");
        setter(&mut guard);
    }

    pub fn set_log_to_stdout(value: bool) {
        AppConfig::set_field(|cfg| cfg.log_to_stdout = value);
    }

    pub fn set_database_path(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.database_path = value.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setters_override_and_reset_restores() {
        AppConfig::set_database_path("sqlite::memory:");
        AppConfig::set_log_to_stdout(true);
        {
            let cfg = AppConfig::global();
            assert_eq!(cfg.database_path, "sqlite::memory:");
            assert!(cfg.log_to_stdout);
        }

        AppConfig::reset();
        let cfg = AppConfig::global();
        assert_eq!(cfg.database_path, AppConfig::from_env().database_path);
    }

    #[test]
    fn database_url_keeps_dsn_and_wraps_paths() {
        let mut cfg = AppConfig::from_env();

        cfg.database_path = "data/quiz.db".into();
        assert_eq!(cfg.sqlite_file(), Some("data/quiz.db"));
        assert_eq!(cfg.database_url(), "sqlite://data/quiz.db?mode=rwc");

        cfg.database_path = "sqlite::memory:".into();
        assert_eq!(cfg.sqlite_file(), None);
        assert_eq!(cfg.database_url(), "sqlite::memory:");

        cfg.database_path = "postgres://localhost/quiz".into();
        assert_eq!(cfg.database_url(), "postgres://localhost/quiz");
    }
}
