use chrono_tz::Tz;
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

pub const DEFAULT_TIME_FORMAT: &str = "%-I:%M %p";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Settings {
    /// Base URL of the gym API. Missing is not fatal at startup; every view
    /// reports it when it first needs the API.
    pub api_url: Option<String>,
    pub debug: bool,
    pub port: u16,
    pub timezone: String,
    pub time_format: String,
    pub secure_cookie: bool,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let config = Config::builder()
            .add_source(File::with_name("ironfit").required(false))
            // APP_API_URL, APP_TIME_FORMAT, ...
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_default("debug", false)?
            .set_default("port", 8080)?
            .set_default("timezone", "UTC")?
            .set_default("time_format", DEFAULT_TIME_FORMAT)?
            .set_default("secure_cookie", false)?
            .build()?;

        config.try_deserialize()
    }

    pub fn tz(&self) -> Result<Tz, ConfigError> {
        self.timezone.parse::<Tz>().map_err(|err| {
            ConfigError::Message(format!("invalid timezone {:?}: {err}", self.timezone))
        })
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    fn clear_env() {
        for key in [
            "APP_API_URL",
            "APP_DEBUG",
            "APP_PORT",
            "APP_TIMEZONE",
            "APP_TIME_FORMAT",
            "APP_SECURE_COOKIE",
        ] {
            // SAFETY: serialized by #[serial]; no other thread reads the environment.
            unsafe { std::env::remove_var(key) };
        }
    }

    #[test]
    #[serial]
    fn test_defaults_without_api_url() {
        clear_env();
        let settings = Settings::from_env().unwrap();
        assert!(settings.api_url.is_none());
        assert!(!settings.debug);
        assert_eq!(settings.port, 8080);
        assert_eq!(settings.timezone, "UTC");
        assert_eq!(settings.time_format, DEFAULT_TIME_FORMAT);
    }

    #[test]
    #[serial]
    fn test_reads_prefixed_env() {
        clear_env();
        unsafe {
            std::env::set_var("APP_API_URL", "http://api.example.com");
            std::env::set_var("APP_PORT", "9090");
            std::env::set_var("APP_TIMEZONE", "Europe/Madrid");
        }
        let settings = Settings::from_env().unwrap();
        clear_env();

        assert_eq!(settings.api_url.as_deref(), Some("http://api.example.com"));
        assert_eq!(settings.port, 9090);
        assert_eq!(settings.tz().unwrap(), chrono_tz::Europe::Madrid);
    }

    #[test]
    fn test_invalid_timezone() {
        let settings = Settings {
            api_url: None,
            debug: false,
            port: 8080,
            timezone: "Mars/Olympus".to_string(),
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            secure_cookie: false,
        };
        assert!(settings.tz().is_err());
    }
}
