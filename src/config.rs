use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Main configuration structure for the assistant service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub gemini: GeminiConfig,
    pub rate_limiter: RateLimiterConfig,
    pub chat: ChatConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub name: String,
    pub version: String,
    pub bind: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    /// Wall-clock bound per provider call, measured from dispatch.
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimiterConfig {
    pub max_requests: u32,
    pub window_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Trailing turns kept as model context.
    pub history_window: usize,
    pub max_message_chars: usize,
}

impl Config {
    /// Load configuration from file with environment variable overrides.
    /// ALWAYS returns a valid config - never fails.
    pub fn load() -> Self {
        // Load environment variables from .env files.
        let env_paths = ["../.env", ".env"];

        let mut env_loaded = false;
        for path in &env_paths {
            if dotenvy::from_path(path).is_ok() {
                tracing::info!("Loaded .env from: {}", path);
                env_loaded = true;
                break;
            }
        }

        if !env_loaded {
            tracing::warn!(
                "No .env file found in any expected location - continuing with env vars only"
            );
        }

        let config_path =
            env::var("SALAT_CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());

        let mut config = if Path::new(&config_path).exists() {
            match fs::read_to_string(&config_path) {
                Ok(contents) => match serde_yaml::from_str::<Config>(&contents) {
                    Ok(config) => {
                        tracing::info!("Loaded configuration from {}", config_path);
                        config
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to parse config file {}: {} - using defaults",
                            config_path,
                            e
                        );
                        Self::default()
                    }
                },
                Err(e) => {
                    tracing::error!(
                        "Failed to read config file {}: {} - using defaults",
                        config_path,
                        e
                    );
                    Self::default()
                }
            }
        } else {
            tracing::warn!("Config file not found at {} - using defaults", config_path);
            Self::default()
        };

        config.apply_env_overrides();

        // Validate configuration - log warnings but don't fail. A
        // missing provider credential must not stop the service from
        // starting; it surfaces per request instead.
        if let Err(e) = config.validate() {
            tracing::warn!("Config validation warnings: {} - continuing anyway", e);
        }

        config
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        if let Ok(name) = env::var("SALAT_SERVER_NAME") {
            self.server.name = name;
        }
        if let Ok(bind) = env::var("SALAT_HTTP_BIND") {
            self.server.bind = bind;
        }

        if let Ok(api_key) = env::var("GEMINI_API_KEY") {
            self.gemini.api_key = api_key;
        }
        if let Ok(model) = env::var("GEMINI_MODEL") {
            self.gemini.model = model;
        }
        if let Ok(timeout) = env::var("SALAT_TIMEOUT_MS") {
            if let Ok(timeout_ms) = timeout.parse() {
                self.gemini.timeout_ms = timeout_ms;
            }
        }

        if let Ok(max_requests) = env::var("SALAT_RATE_LIMIT_MAX_REQUESTS") {
            if let Ok(max) = max_requests.parse() {
                self.rate_limiter.max_requests = max;
            }
        }
        if let Ok(window) = env::var("SALAT_RATE_LIMIT_WINDOW_SECONDS") {
            if let Ok(window_secs) = window.parse() {
                self.rate_limiter.window_seconds = window_secs;
            }
        }

        if let Ok(window) = env::var("SALAT_HISTORY_WINDOW") {
            if let Ok(turns) = window.parse() {
                self.chat.history_window = turns;
            }
        }
    }

    /// Validate configuration
    fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        if self.rate_limiter.max_requests == 0 {
            return Err("Rate limiter max_requests cannot be 0".into());
        }
        if self.rate_limiter.window_seconds == 0 {
            return Err("Rate limiter window_seconds cannot be 0".into());
        }

        if self.gemini.timeout_ms == 0 {
            return Err("Gemini timeout_ms cannot be 0".into());
        }
        if self.gemini.api_key.is_empty() {
            return Err("GEMINI_API_KEY environment variable is not set".into());
        }

        if self.chat.history_window == 0 {
            return Err("Chat history_window cannot be 0".into());
        }
        if self.chat.max_message_chars == 0 {
            return Err("Chat max_message_chars cannot be 0".into());
        }

        Ok(())
    }

    /// Provider call timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.gemini.timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "salat-assistant".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                bind: "127.0.0.1:8080".to_string(),
            },
            gemini: GeminiConfig {
                api_key: env::var("GEMINI_API_KEY").unwrap_or_else(|_| {
                    tracing::warn!("GEMINI_API_KEY not set; chat requests will fail until it is");
                    String::new()
                }),
                model: "gemini-1.5-flash".to_string(),
                timeout_ms: 15_000,
            },
            rate_limiter: RateLimiterConfig {
                max_requests: 20,
                window_seconds: 60,
            },
            chat: ChatConfig {
                history_window: 8,
                max_message_chars: 1000,
            },
        }
    }
}
