//! Runtime configuration sourced from the process environment.

use std::str::FromStr;

use veranda_core::domain::media::UploadLimits;

/// Server configuration with environment overrides.
///
/// Keys: `HOST`, `PORT`, `DATABASE_URL`, `MAX_UPLOAD_MB`, `RAZORPAY_KEY_ID`,
/// `RAZORPAY_KEY_SECRET`, `CORS_PERMISSIVE`. Empty values are treated as unset.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: Option<String>,
    pub max_upload_mib: usize,
    pub razorpay_key_id: Option<String>,
    pub razorpay_key_secret: Option<String>,
    pub cors_permissive: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            database_url: None,
            max_upload_mib: 10,
            razorpay_key_id: None,
            razorpay_key_secret: None,
            cors_permissive: true,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(host) = env_string("HOST") {
            config.host = host;
        }
        if let Some(port) = env_parsed("PORT") {
            config.port = port;
        }
        config.database_url = env_string("DATABASE_URL");
        if let Some(mib) = env_parsed("MAX_UPLOAD_MB") {
            config.max_upload_mib = mib;
        }
        config.razorpay_key_id = env_string("RAZORPAY_KEY_ID");
        config.razorpay_key_secret = env_string("RAZORPAY_KEY_SECRET");
        if let Some(flag) = env_parsed("CORS_PERMISSIVE") {
            config.cors_permissive = flag;
        }

        config
    }

    /// Upload ceilings enforced by the media stores.
    pub fn upload_limits(&self) -> UploadLimits {
        UploadLimits::default().with_max_file_mib(self.max_upload_mib)
    }

    /// Request-body ceiling sized so a maximal multipart batch fits, with
    /// headroom for text fields and part framing.
    pub fn body_limit_bytes(&self) -> usize {
        let limits = self.upload_limits();
        (limits.max_images + limits.max_videos) * limits.max_file_bytes + 1024 * 1024
    }
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn env_parsed<T: FromStr>(key: &str) -> Option<T> {
    env_string(key).and_then(|value| value.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    struct EnvVarGuard {
        key: &'static str,
        previous: Option<OsString>,
    }

    impl EnvVarGuard {
        fn unset(key: &'static str) -> Self {
            let previous = std::env::var_os(key);
            // SAFETY: tests run in isolation and restore previous environment state on drop.
            unsafe {
                std::env::remove_var(key);
            }
            Self { key, previous }
        }

        fn set(key: &'static str, value: impl AsRef<std::ffi::OsStr>) -> Self {
            let previous = std::env::var_os(key);
            // SAFETY: tests run in isolation and restore previous environment state on drop.
            unsafe {
                std::env::set_var(key, value);
            }
            Self { key, previous }
        }
    }

    impl Drop for EnvVarGuard {
        fn drop(&mut self) {
            // SAFETY: we reinstate the environment variable to its prior state.
            unsafe {
                match &self.previous {
                    Some(prev) => std::env::set_var(self.key, prev),
                    None => std::env::remove_var(self.key),
                }
            }
        }
    }

    #[test]
    fn defaults_match_documented_values() {
        let config = Config::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 5000);
        assert_eq!(config.max_upload_mib, 10);
        assert!(config.database_url.is_none());
        assert!(config.cors_permissive);
    }

    #[test]
    fn from_env_overrides_and_ignores_blanks() {
        let _host = EnvVarGuard::set("HOST", "127.0.0.1");
        let _port = EnvVarGuard::set("PORT", "8099");
        let _db = EnvVarGuard::set("DATABASE_URL", "   ");
        let _mib = EnvVarGuard::unset("MAX_UPLOAD_MB");
        let _cors = EnvVarGuard::set("CORS_PERMISSIVE", "false");

        let config = Config::from_env();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8099);
        // Whitespace-only value counts as unset.
        assert!(config.database_url.is_none());
        assert_eq!(config.max_upload_mib, 10);
        assert!(!config.cors_permissive);
    }

    #[test]
    fn body_limit_covers_a_full_batch() {
        let config = Config {
            max_upload_mib: 2,
            ..Config::default()
        };
        let limits = config.upload_limits();
        assert_eq!(limits.max_file_bytes, 2 * 1024 * 1024);
        // 5 images + 2 videos at the per-file ceiling, plus framing headroom.
        assert_eq!(config.body_limit_bytes(), 7 * 2 * 1024 * 1024 + 1024 * 1024);
    }
}
