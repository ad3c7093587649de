use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::workflows::booking::confirmation::DEFAULT_CODE_PREFIX;
use crate::workflows::booking::{
    BookingWizard, ConfirmationCodeGenerator, RoomCatalog, StayDefaults,
};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub booking: BookingConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            booking: BookingConfig::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Booking flow dials: confirmation code prefix and the criteria a visitor starts from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingConfig {
    pub code_prefix: String,
    pub default_nights: u32,
    pub default_guests: u32,
}

impl BookingConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let code_prefix = match env::var("BOOKING_CODE_PREFIX") {
            Ok(raw) => parse_code_prefix(&raw)?,
            Err(_) => DEFAULT_CODE_PREFIX.to_string(),
        };

        let defaults = StayDefaults::default();
        let default_nights = parse_positive("BOOKING_DEFAULT_NIGHTS", defaults.nights)?;
        let default_guests = parse_positive("BOOKING_DEFAULT_GUESTS", defaults.guests)?;

        Ok(Self {
            code_prefix,
            default_nights,
            default_guests,
        })
    }

    pub fn stay_defaults(&self) -> StayDefaults {
        StayDefaults {
            nights: self.default_nights,
            guests: self.default_guests,
        }
    }

    pub fn wizard(&self) -> BookingWizard {
        BookingWizard::new(
            RoomCatalog::standard(),
            self.stay_defaults(),
            ConfirmationCodeGenerator::with_prefix(self.code_prefix.clone()),
        )
    }
}

impl Default for BookingConfig {
    fn default() -> Self {
        let defaults = StayDefaults::default();
        Self {
            code_prefix: DEFAULT_CODE_PREFIX.to_string(),
            default_nights: defaults.nights,
            default_guests: defaults.guests,
        }
    }
}

fn parse_code_prefix(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.len() == 3 && trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(trimmed.to_ascii_uppercase())
    } else {
        Err(ConfigError::InvalidCodePrefix(raw.to_string()))
    }
}

fn parse_positive(key: &'static str, default: u32) -> Result<u32, ConfigError> {
    match env::var(key) {
        Ok(raw) => match raw.trim().parse::<u32>() {
            Ok(value) if value > 0 => Ok(value),
            _ => Err(ConfigError::InvalidCount { key }),
        },
        Err(_) => Ok(default),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidCodePrefix(String),
    InvalidCount { key: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidCodePrefix(value) => write!(
                f,
                "BOOKING_CODE_PREFIX must be exactly three letters (found '{}')",
                value
            ),
            ConfigError::InvalidCount { key } => {
                write!(f, "{} must be a positive integer", key)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidCodePrefix(_)
            | ConfigError::InvalidCount { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_HOST");
        env::remove_var("APP_PORT");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("BOOKING_CODE_PREFIX");
        env::remove_var("BOOKING_DEFAULT_NIGHTS");
        env::remove_var("BOOKING_DEFAULT_GUESTS");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.booking, BookingConfig::default());
        assert_eq!(config.booking.code_prefix, "HYA");
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn booking_overrides_are_applied() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_ENV", "production");
        env::set_var("BOOKING_CODE_PREFIX", "grd");
        env::set_var("BOOKING_DEFAULT_NIGHTS", "5");
        env::set_var("BOOKING_DEFAULT_GUESTS", "1");

        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.environment, AppEnvironment::Production);
        assert_eq!(config.booking.code_prefix, "GRD");
        assert_eq!(
            config.booking.stay_defaults(),
            StayDefaults {
                nights: 5,
                guests: 1
            }
        );
        reset_env();
    }

    #[test]
    fn rejects_malformed_booking_settings() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("BOOKING_CODE_PREFIX", "HY4");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidCodePrefix(_))
        ));

        reset_env();
        env::set_var("BOOKING_DEFAULT_NIGHTS", "0");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidCount {
                key: "BOOKING_DEFAULT_NIGHTS"
            })
        ));
        reset_env();
    }
}
