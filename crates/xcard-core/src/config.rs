use config::{Config, ConfigBuilder, builder::DefaultState};
use serde::Deserialize;

use crate::error::{CoreError, CoreResult};

/// Name of the optional configuration file, looked up in the working directory.
pub const CONFIG_FILE: &str = "xcard.toml";

/// Prefix of environment variables that override configuration values.
pub const ENV_PREFIX: &str = "XCARD";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub logging: LoggingConfig,
    pub reader: ReaderConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReaderConfig {
    /// Stop reading after this many cards have been delivered.
    pub max_cards: Option<usize>,
    /// Whether parse warnings are reported alongside each card.
    pub show_warnings: bool,
}

impl ReaderConfig {
    /// ## Summary
    /// Returns whether the given number of delivered cards reaches the limit.
    #[must_use]
    pub fn limit_reached(&self, delivered: usize) -> bool {
        self.max_cards.is_some_and(|max| delivered >= max)
    }
}

impl Settings {
    /// ## Summary
    /// Loads configuration from defaults, `xcard.toml`, and `XCARD_*` environment
    /// variables. Environment variables take precedence over file values.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails,
    /// or if the resulting values are out of range.
    pub fn load() -> CoreResult<Self> {
        Self::defaults()?
            .add_source(config::File::with_name(CONFIG_FILE).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()
            .map_err(CoreError::from)
            .and_then(Self::from_config)
    }

    /// ## Summary
    /// Loads configuration from defaults overlaid with a TOML document.
    ///
    /// ## Errors
    /// Returns an error if the TOML is invalid or the values are out of range.
    pub fn from_toml_str(toml: &str) -> CoreResult<Self> {
        Self::defaults()?
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .map_err(CoreError::from)
            .and_then(Self::from_config)
    }

    fn defaults() -> CoreResult<ConfigBuilder<DefaultState>> {
        Ok(Config::builder()
            .set_default("logging.level", "info")?
            .set_default("reader.show_warnings", true)?)
    }

    fn from_config(config: Config) -> CoreResult<Self> {
        let settings = config.try_deserialize::<Settings>()?;
        if settings.reader.max_cards == Some(0) {
            return Err(CoreError::InvalidConfiguration(
                "reader.max_cards must be at least 1".to_owned(),
            ));
        }
        Ok(settings)
    }
}

/// ## Summary
/// Loads configuration from environment variables, `.env` file, and `xcard.toml`.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> CoreResult<Settings> {
    if let Err(err) = dotenvy::dotenv() {
        tracing::trace!(error = %err, "No .env file loaded");
    }

    Settings::load()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn defaults_apply_without_overrides() {
        let settings = Settings::from_toml_str("").unwrap();
        assert_eq!(settings.logging.level, "info");
        assert!(settings.reader.show_warnings);
        assert_eq!(settings.reader.max_cards, None);
    }

    #[test_log::test]
    fn toml_overrides_defaults() {
        let settings = Settings::from_toml_str(
            r#"
[logging]
level = "trace"

[reader]
max_cards = 2
show_warnings = false
"#,
        )
        .unwrap();
        assert_eq!(settings.logging.level, "trace");
        assert_eq!(settings.reader.max_cards, Some(2));
        assert!(!settings.reader.show_warnings);
    }

    #[test_log::test]
    fn zero_card_limit_is_rejected() {
        let err = Settings::from_toml_str("[reader]\nmax_cards = 0\n").unwrap_err();
        assert!(matches!(err, CoreError::InvalidConfiguration(_)));
    }

    #[test]
    fn limit_reached_counts_delivered_cards() {
        let reader = ReaderConfig {
            max_cards: Some(2),
            show_warnings: true,
        };
        assert!(!reader.limit_reached(1));
        assert!(reader.limit_reached(2));

        let unlimited = ReaderConfig {
            max_cards: None,
            show_warnings: true,
        };
        assert!(!unlimited.limit_reached(usize::MAX));
    }
}
