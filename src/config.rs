//! Runtime settings from the environment.
//!
//! A `.env` file in the working directory is loaded first (dotenvy), then:
//!
//! - `NPI_LANG`        output language, `en` | `cs` (default `en`)
//! - `NPI_LOG`         log level, `off` | `error` | `warn` | `info` | `debug` | `trace` (default `warn`)
//! - `NPI_PLOT_WIDTH`  chart width in columns (default 80)
//! - `NPI_PLOT_HEIGHT` chart height in rows (default 20)

use log::LevelFilter;

use crate::domain::Lang;
use crate::error::AppError;

pub const DEFAULT_PLOT_WIDTH: usize = 80;
pub const DEFAULT_PLOT_HEIGHT: usize = 20;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub lang: Lang,
    pub log_level: LevelFilter,
    pub plot_width: usize,
    pub plot_height: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            lang: Lang::En,
            log_level: LevelFilter::Warn,
            plot_width: DEFAULT_PLOT_WIDTH,
            plot_height: DEFAULT_PLOT_HEIGHT,
        }
    }
}

impl Settings {
    /// Load `.env` (if present) and read settings from the process environment.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let mut settings = Settings::default();

        if let Some(value) = lookup("NPI_LANG") {
            settings.lang = Lang::parse(&value)?;
        }
        if let Some(value) = lookup("NPI_LOG") {
            settings.log_level = value.trim().parse().map_err(|_| {
                AppError::input(format!("Invalid NPI_LOG level '{value}'."))
            })?;
        }
        if let Some(value) = lookup("NPI_PLOT_WIDTH") {
            settings.plot_width = parse_size("NPI_PLOT_WIDTH", &value)?;
        }
        if let Some(value) = lookup("NPI_PLOT_HEIGHT") {
            settings.plot_height = parse_size("NPI_PLOT_HEIGHT", &value)?;
        }

        Ok(settings)
    }
}

fn parse_size(key: &str, value: &str) -> Result<usize, AppError> {
    match value.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(AppError::input(format!(
            "{key} must be a positive integer, got '{value}'."
        ))),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(Settings::from_lookup(lookup(&[])).unwrap(), Settings::default());
    }

    #[test]
    fn reads_all_keys() {
        let s = Settings::from_lookup(lookup(&[
            ("NPI_LANG", "cs"),
            ("NPI_LOG", "debug"),
            ("NPI_PLOT_WIDTH", "120"),
            ("NPI_PLOT_HEIGHT", "30"),
        ]))
        .unwrap();
        assert_eq!(s.lang, Lang::Cs);
        assert_eq!(s.log_level, LevelFilter::Debug);
        assert_eq!(s.plot_width, 120);
        assert_eq!(s.plot_height, 30);
    }

    #[test]
    fn invalid_values_are_input_errors() {
        for pairs in [
            [("NPI_LANG", "fr")],
            [("NPI_LOG", "loud")],
            [("NPI_PLOT_WIDTH", "0")],
            [("NPI_PLOT_HEIGHT", "tall")],
        ] {
            let err = Settings::from_lookup(lookup(&pairs)).unwrap_err();
            assert_eq!(err.exit_code(), crate::error::EXIT_INPUT);
        }
    }
}
