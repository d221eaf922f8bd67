//! Runtime configuration for the page behaviors.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Errors from loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid JSON for this schema
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A value is out of range
    #[error("invalid config value: {0}")]
    Invalid(&'static str),
}

/// Fixed delays used by the behaviors.
///
/// These are UX heuristics, not correctness guarantees. In particular the
/// submit reset fires whether or not the browser has already navigated away.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    /// Delay before an auto-hide alert starts fading (milliseconds).
    pub alert_hide_ms: u64,

    /// Delay between the fade and removal of an alert (milliseconds).
    pub alert_remove_ms: u64,

    /// How long the search button stays in its loading state (milliseconds).
    pub submit_reset_ms: u64,

    /// Duration of the search box pulse (milliseconds).
    pub pulse_ms: u64,

    /// Delay before the plane icon gets its float class (milliseconds).
    pub float_interval_ms: u64,
}

impl Timings {
    pub fn alert_hide(&self) -> Duration {
        Duration::from_millis(self.alert_hide_ms)
    }

    pub fn alert_remove(&self) -> Duration {
        Duration::from_millis(self.alert_remove_ms)
    }

    pub fn submit_reset(&self) -> Duration {
        Duration::from_millis(self.submit_reset_ms)
    }

    pub fn pulse(&self) -> Duration {
        Duration::from_millis(self.pulse_ms)
    }

    pub fn float_interval(&self) -> Duration {
        Duration::from_millis(self.float_interval_ms)
    }
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            alert_hide_ms: 5000,
            alert_remove_ms: 300,
            submit_reset_ms: 3000,
            pulse_ms: 200,
            float_interval_ms: 100,
        }
    }
}

/// Which deployed copy of the site script the page markup was written for.
///
/// The two copies disagree on selector conventions and on which search
/// helpers exist, so the profile has to match the markup actually served.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchFormProfile {
    /// `static/js` copy: underscored ids, all search helpers.
    #[default]
    Underscored,

    /// `staticfiles/js` copy: hyphenated ids, same-location guard only.
    Hyphenated,
}

/// Selectors and feature switches for the flight search helpers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFormSelectors {
    /// Selector locating the search form.
    pub form: &'static str,
    pub origin_id: &'static str,
    pub destination_id: &'static str,
    pub domestic_id: &'static str,
    pub international_id: &'static str,
    /// Selector for the container pulsed on route-type change.
    pub search_box: &'static str,
    /// Selector, within the form, for the button put into loading state.
    pub submit_button: &'static str,
    /// Id of the date input cleared when a past date is chosen.
    pub future_date_id: Option<&'static str>,
    pub route_type_toggle: bool,
    pub submit_loading: bool,
}

impl SearchFormProfile {
    pub fn selectors(self) -> SearchFormSelectors {
        match self {
            SearchFormProfile::Underscored => SearchFormSelectors {
                form: r#"form[action*="search_flights"]"#,
                origin_id: "from_location",
                destination_id: "to_location",
                domestic_id: "domestic",
                international_id: "international",
                search_box: ".search-box",
                submit_button: r#"button[type="submit"]"#,
                future_date_id: Some("travel_date"),
                route_type_toggle: true,
                submit_loading: true,
            },
            SearchFormProfile::Hyphenated => SearchFormSelectors {
                form: "#search-form",
                origin_id: "from-location",
                destination_id: "to-location",
                domestic_id: "domestic",
                international_id: "international",
                search_box: ".search-box",
                submit_button: r#"button[type="submit"]"#,
                future_date_id: None,
                route_type_toggle: false,
                submit_loading: false,
            },
        }
    }
}

/// Top-level configuration.
///
/// Every field has a default, so a config file only needs the values it
/// overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub timings: Timings,
    pub search_profile: SearchFormProfile,
}

impl UiConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: UiConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timings.float_interval_ms == 0 {
            return Err(ConfigError::Invalid("float_interval_ms must be positive"));
        }
        Ok(())
    }
}
