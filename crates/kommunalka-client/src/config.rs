use std::path::PathBuf;
use std::time::Duration;

use crate::error::{ClientError, Result};

pub const DEFAULT_AUTH_URL: &str =
    "https://functions.poehali.dev/27952831-fa5c-43a1-8177-575cd7a32963";
pub const DEFAULT_SUBSCRIPTIONS_URL: &str =
    "https://functions.poehali.dev/ea187727-c615-4c36-9833-3a1a96be4b76";
pub const DEFAULT_SESSION_PATH: &str = "kommunalka-session.json";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub auth_url: String,
    pub subscriptions_url: String,
    pub session_path: PathBuf,
    pub http_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            auth_url: DEFAULT_AUTH_URL.into(),
            subscriptions_url: DEFAULT_SUBSCRIPTIONS_URL.into(),
            session_path: DEFAULT_SESSION_PATH.into(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Read `KOMMUNALKA_*` variables from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let auth_url = lookup("KOMMUNALKA_AUTH_URL").unwrap_or(defaults.auth_url);
        let subscriptions_url =
            lookup("KOMMUNALKA_SUBSCRIPTIONS_URL").unwrap_or(defaults.subscriptions_url);
        let session_path = lookup("KOMMUNALKA_SESSION_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.session_path);

        let http_timeout = match lookup("KOMMUNALKA_HTTP_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| {
                    ClientError::Config(format!("KOMMUNALKA_HTTP_TIMEOUT_SECS is not a number: {raw}"))
                })?;
                if secs == 0 {
                    return Err(ClientError::Config(
                        "KOMMUNALKA_HTTP_TIMEOUT_SECS must be positive".into(),
                    ));
                }
                Duration::from_secs(secs)
            }
            None => defaults.http_timeout,
        };

        for (name, url) in [
            ("KOMMUNALKA_AUTH_URL", &auth_url),
            ("KOMMUNALKA_SUBSCRIPTIONS_URL", &subscriptions_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ClientError::Config(format!("{name} must be an http(s) URL: {url}")));
            }
        }

        Ok(Self {
            auth_url,
            subscriptions_url,
            session_path,
            http_timeout,
        })
    }

    pub fn http_client(&self) -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.http_timeout)
            .build()
            .map_err(ClientError::Transport)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn falls_back_to_defaults() {
        let config = ClientConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.auth_url, DEFAULT_AUTH_URL);
        assert_eq!(config.subscriptions_url, DEFAULT_SUBSCRIPTIONS_URL);
        assert_eq!(config.session_path, PathBuf::from(DEFAULT_SESSION_PATH));
        assert_eq!(config.http_timeout, Duration::from_secs(30));
    }

    #[test]
    fn reads_overrides() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            ("KOMMUNALKA_AUTH_URL", "http://127.0.0.1:9000/auth"),
            ("KOMMUNALKA_SUBSCRIPTIONS_URL", "http://127.0.0.1:9000/subs"),
            ("KOMMUNALKA_SESSION_PATH", "/tmp/session.json"),
            ("KOMMUNALKA_HTTP_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.auth_url, "http://127.0.0.1:9000/auth");
        assert_eq!(config.session_path, PathBuf::from("/tmp/session.json"));
        assert_eq!(config.http_timeout, Duration::from_secs(5));
    }

    #[test]
    fn rejects_bad_values() {
        let err = ClientConfig::from_lookup(lookup_from(&[("KOMMUNALKA_HTTP_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));

        let err = ClientConfig::from_lookup(lookup_from(&[("KOMMUNALKA_HTTP_TIMEOUT_SECS", "0")]))
            .unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));

        let err = ClientConfig::from_lookup(lookup_from(&[("KOMMUNALKA_AUTH_URL", "ftp://x")]))
            .unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }
}
