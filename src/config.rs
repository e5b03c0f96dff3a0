use std::path::PathBuf;

/// Composer limit, in characters. Enforced by the HTTP consumer, never the store.
pub const MAX_POST_LENGTH: usize = 280;

pub const DEFAULT_CURRENT_USER_ID: &str = "user1";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_LOG_FILTER: &str = "info";
pub const LOG_ENV: &str = "CHIRP_LOG";

pub fn current_user_id() -> String {
    std::env::var("CHIRP_CURRENT_USER")
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_CURRENT_USER_ID.to_string())
}

pub fn bind_addr() -> String {
    std::env::var("CHIRP_BIND_ADDR")
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
}

/// Optional JSON fixture replacing the built-in demo data.
pub fn fixture_path() -> Option<PathBuf> {
    std::env::var("CHIRP_FIXTURE")
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub current_user_id: String,
    pub fixture_path: Option<PathBuf>,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        ServerConfig {
            bind_addr: bind_addr(),
            current_user_id: current_user_id(),
            fixture_path: fixture_path(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            current_user_id: DEFAULT_CURRENT_USER_ID.to_string(),
            fixture_path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn lock_env() -> std::sync::MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn clear_env() {
        std::env::remove_var("CHIRP_CURRENT_USER");
        std::env::remove_var("CHIRP_BIND_ADDR");
        std::env::remove_var("CHIRP_FIXTURE");
    }

    #[test]
    fn defaults_apply_when_unset() {
        let _lock = lock_env();
        clear_env();

        let config = ServerConfig::from_env();
        assert_eq!(config.current_user_id, DEFAULT_CURRENT_USER_ID);
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
        assert!(config.fixture_path.is_none());
    }

    #[test]
    fn empty_values_fall_back_to_defaults() {
        let _lock = lock_env();
        std::env::set_var("CHIRP_CURRENT_USER", "");
        std::env::set_var("CHIRP_BIND_ADDR", "");
        std::env::set_var("CHIRP_FIXTURE", "");

        assert_eq!(current_user_id(), DEFAULT_CURRENT_USER_ID);
        assert_eq!(bind_addr(), DEFAULT_BIND_ADDR);
        assert!(fixture_path().is_none());
        clear_env();
    }

    #[test]
    fn env_overrides_defaults() {
        let _lock = lock_env();
        std::env::set_var("CHIRP_CURRENT_USER", "user3");
        std::env::set_var("CHIRP_BIND_ADDR", "0.0.0.0:9000");
        std::env::set_var("CHIRP_FIXTURE", "/tmp/fixture.json");

        let config = ServerConfig::from_env();
        assert_eq!(config.current_user_id, "user3");
        assert_eq!(config.bind_addr, "0.0.0.0:9000");
        assert_eq!(config.fixture_path, Some(PathBuf::from("/tmp/fixture.json")));
        clear_env();
    }

    #[test]
    fn default_config_matches_constants() {
        let config = ServerConfig::default();
        assert_eq!(config.current_user_id, DEFAULT_CURRENT_USER_ID);
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
        assert!(config.fixture_path.is_none());
    }
}
