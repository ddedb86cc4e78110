use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

/// Paths that bypass the session gate. Matched as prefixes of the request
/// path with its leading slash removed; the root path is always public.
pub const DEFAULT_PUBLIC_PATHS: &[&str] = &[
    "_next/static",
    "_next/image",
    "favicon.ico",
    "api/auth",
    "logo.svg",
    "sign-in",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub assets: AssetsConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Without a URL the app serves from the in-memory user store.
    pub url: Option<String>,
    pub max_connections: u32,
    pub connection_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    pub session_secret: String,
    pub session_cookie: String,
    pub session_ttl_hours: u64,
    pub sign_in_path: String,
    /// Hosted sign-in page of the identity provider.
    pub provider_url: Option<String>,
    pub public_paths: Vec<String>,
    pub secure_cookies: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetsConfig {
    pub static_dir: String,
}

impl AuthConfig {
    /// Extend the exclusion list; the defaults are never dropped
    pub fn add_public_paths<I, S>(&mut self, paths: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for path in paths {
            let path = path.as_ref().trim().trim_start_matches('/');
            if !path.is_empty() && !self.public_paths.iter().any(|p| p == path) {
                self.public_paths.push(path.to_string());
            }
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Server overrides
        if let Ok(v) = env::var("FINBOARD_BIND") {
            self.server.bind = v;
        }
        if let Some(port) = env::var("FINBOARD_PORT")
            .ok()
            .or_else(|| env::var("PORT").ok())
            .and_then(|s| s.parse::<u16>().ok())
        {
            self.server.port = port;
        }

        // Database overrides
        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.url = Some(v).filter(|url| !url.trim().is_empty());
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout_secs =
                v.parse().unwrap_or(self.database.connection_timeout_secs);
        }

        // Auth overrides
        if let Ok(v) = env::var("AUTH_SESSION_SECRET") {
            self.auth.session_secret = v;
        }
        if let Ok(v) = env::var("AUTH_SESSION_COOKIE") {
            self.auth.session_cookie = v;
        }
        if let Ok(v) = env::var("AUTH_SESSION_TTL_HOURS") {
            self.auth.session_ttl_hours = v.parse().unwrap_or(self.auth.session_ttl_hours);
        }
        if let Ok(v) = env::var("AUTH_SIGN_IN_PATH") {
            self.auth.sign_in_path = v;
        }
        if let Ok(v) = env::var("AUTH_PROVIDER_URL") {
            self.auth.provider_url = Some(v).filter(|url| !url.trim().is_empty());
        }
        if let Ok(v) = env::var("AUTH_PUBLIC_PATHS") {
            self.auth.add_public_paths(v.split(','));
        }
        if let Ok(v) = env::var("AUTH_SECURE_COOKIES") {
            self.auth.secure_cookies = v.parse().unwrap_or(self.auth.secure_cookies);
        }

        // A moved sign-in page must stay reachable without a session
        let sign_in = self.auth.sign_in_path.clone();
        self.auth.add_public_paths([sign_in]);

        // Asset overrides
        if let Ok(v) = env::var("ASSETS_STATIC_DIR") {
            self.assets.static_dir = v;
        }

        self
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                bind: "127.0.0.1".to_string(),
                port: 3000,
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 5,
                connection_timeout_secs: 30,
            },
            auth: AuthConfig {
                session_secret: "dev-session-secret-change-me".to_string(),
                session_cookie: "__session".to_string(),
                session_ttl_hours: 24 * 7,
                sign_in_path: "/sign-in".to_string(),
                provider_url: None,
                public_paths: default_public_paths(),
                secure_cookies: false,
            },
            assets: AssetsConfig {
                static_dir: "public/static".to_string(),
            },
        }
    }

    fn staging() -> Self {
        let mut config = Self::development();
        config.environment = Environment::Staging;
        config.server.bind = "0.0.0.0".to_string();
        config.database.max_connections = 10;
        config.database.connection_timeout_secs = 10;
        config.auth.session_secret = String::new();
        config.auth.session_ttl_hours = 24;
        config.auth.secure_cookies = true;
        config
    }

    fn production() -> Self {
        let mut config = Self::staging();
        config.environment = Environment::Production;
        config.database.max_connections = 25;
        config.database.connection_timeout_secs = 5;
        config.auth.session_ttl_hours = 8;
        config
    }
}

fn default_public_paths() -> Vec<String> {
    DEFAULT_PUBLIC_PATHS.iter().map(|p| p.to_string()).collect()
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

pub fn config() -> &'static AppConfig {
    &CONFIG
}
