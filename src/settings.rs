use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::oauth::{GOOGLE_AUTH_ENDPOINT, GOOGLE_TOKEN_ENDPOINT};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SiteSettings {
    pub application: ApplicationSettings,
    pub session: SessionSettings,
    pub google: GoogleSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SessionSettings {
    /// HMAC key for session cookies; at least 16 characters. Never generated:
    /// an unset secret fails the requests that need it.
    pub session_secret: Option<String>,
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GoogleSettings {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub authorization_endpoint: String,
    pub token_endpoint: String,
    /// Timeout for the token exchange request; 0 disables it
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
}

impl Default for ApplicationSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for GoogleSettings {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            authorization_endpoint: GOOGLE_AUTH_ENDPOINT.to_string(),
            token_endpoint: GOOGLE_TOKEN_ENDPOINT.to_string(),
            request_timeout_secs: 10,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

// Secrets stay out of debug output
impl fmt::Debug for SessionSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionSettings")
            .field("session_secret", &redacted(self.session_secret.as_ref()))
            .finish()
    }
}

impl fmt::Debug for GoogleSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleSettings")
            .field("client_id", &self.client_id)
            .field("client_secret", &redacted(self.client_secret.as_ref()))
            .field("authorization_endpoint", &self.authorization_endpoint)
            .field("token_endpoint", &self.token_endpoint)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

fn redacted(value: Option<&String>) -> Option<&'static str> {
    value.map(|_| "<redacted>")
}

impl SiteSettings {
    /// Load settings from configuration files and environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A settings file cannot be read or parsed
    /// - Logger initialization fails
    pub fn load() -> Result<Self> {
        // A missing .env file is fine
        let _ = dotenvy::dotenv();

        let settings = Self::load_from(Path::new("."))?;

        Self::initialize_logging(&settings.logging)?;
        Ok(settings)
    }

    /// Files, then environment overrides, then normalization, with
    /// `working_dir` standing in for the current directory
    fn load_from(working_dir: &Path) -> Result<Self> {
        // Load base settings from TOML or defaults
        let mut settings = Self::load_base_settings(working_dir)?;

        // Apply environment variable overrides
        settings.apply_env_overrides();
        settings.normalize();
        Ok(settings)
    }

    /// Initialize `env_logger`, `RUST_LOG` taking precedence over the configured level
    fn initialize_logging(logging: &LoggingSettings) -> Result<()> {
        env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(logging.level.as_str()),
        )
        .try_init()
        .context("Failed to initialize logger")
    }

    /// Load base settings from TOML file(s) or use defaults
    /// Settings are loaded with the following priority (highest to lowest):
    /// 1. Environment variables (applied separately after loading base settings)
    /// 2. Settings.toml in `SITEAUTH_SECRETS_DIR` (if specified and exists)
    /// 3. Settings.toml in `working_dir` (if exists)
    /// 4. Default settings
    ///
    /// A file found in `SITEAUTH_SECRETS_DIR` replaces the working directory
    /// file as a whole; the two are not merged.
    fn load_base_settings(working_dir: &Path) -> Result<Self> {
        let mut settings = Self::default();

        let default_config_path = working_dir.join("Settings.toml");
        if default_config_path.exists() {
            settings = Self::from_toml_file(&default_config_path)?;
            println!(
                "✓ Loaded base settings from {}",
                default_config_path.display()
            );
        }

        if let Ok(secrets_dir) = std::env::var("SITEAUTH_SECRETS_DIR") {
            let secrets_path = Path::new(&secrets_dir).join("Settings.toml");
            if secrets_path.exists() {
                settings = Self::from_toml_file(&secrets_path)?;
                println!("✓ Overriding settings from {}", secrets_path.display());
            } else {
                println!(
                    "ℹ SITEAUTH_SECRETS_DIR set but no Settings.toml found at: {}",
                    secrets_path.display()
                );
            }
        }

        Ok(settings)
    }

    /// Parse a TOML settings file; missing sections and keys take defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid settings TOML
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        basic_toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Apply environment variable overrides to settings
    pub fn apply_env_overrides(&mut self) {
        if let Some(host) = env_value("HOST") {
            self.application.host = host;
        }
        if let Some(port) = env_value("PORT").and_then(|port| port.parse::<u16>().ok()) {
            self.application.port = port;
        }

        if let Some(secret) = env_value("SESSION_SECRET") {
            self.session.session_secret = Some(secret);
        }

        if let Some(client_id) = env_value("GOOGLE_CLIENT_ID") {
            self.google.client_id = Some(client_id);
        }
        if let Some(client_secret) = env_value("GOOGLE_CLIENT_SECRET") {
            self.google.client_secret = Some(client_secret);
        }
        if let Some(endpoint) = env_value("GOOGLE_AUTH_ENDPOINT") {
            self.google.authorization_endpoint = endpoint;
        }
        if let Some(endpoint) = env_value("GOOGLE_TOKEN_ENDPOINT") {
            self.google.token_endpoint = endpoint;
        }
        if let Some(timeout) =
            env_value("GOOGLE_REQUEST_TIMEOUT_SECS").and_then(|secs| secs.parse::<u64>().ok())
        {
            self.google.request_timeout_secs = timeout;
        }

        if let Some(level) = env_value("RUST_LOG") {
            self.logging.level = level;
        }
    }

    /// Treat empty credentials from files the same as unset ones
    pub fn normalize(&mut self) {
        for value in [
            &mut self.session.session_secret,
            &mut self.google.client_id,
            &mut self.google.client_secret,
        ] {
            if value.as_deref().is_some_and(str::is_empty) {
                *value = None;
            }
        }
    }

    /// Get the bind address for the server
    #[must_use]
    pub fn get_bind_address(&self) -> String {
        format!("{}:{}", self.application.host, self.application.port)
    }
}

/// Non-empty environment variable value
fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}
