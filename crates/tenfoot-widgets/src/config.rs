#![forbid(unsafe_code)]

//! Navigation policy loaded from the environment.
//!
//! [`NavConfig`] gathers the knobs a host usually wants to expose to users:
//! WASD aliases, wrapping, the vertical-edge swallow, scroll behavior and the
//! search threshold. Detection is deterministic given the environment; tests
//! inject a lookup with [`NavConfig::from_env_with`].
//!
//! | Variable                   | Values                       |
//! |----------------------------|------------------------------|
//! | `TENFOOT_WASD`             | bool                         |
//! | `TENFOOT_WRAP_H`           | bool                         |
//! | `TENFOOT_WRAP_V`           | bool                         |
//! | `TENFOOT_SWALLOW_VERTICAL` | bool                         |
//! | `TENFOOT_SCROLL_PADDING`   | non-negative integer         |
//! | `TENFOOT_SCROLL_ALIGN`     | `nearest` / `center`         |
//! | `TENFOOT_SEARCH_MIN_SCORE` | number in `0.0..=1.0`        |
//!
//! Booleans accept `1/0/true/false/yes/no/on/off`.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::fuzzy::{DEFAULT_MIN_SCORE, FuzzyMatcher};
use crate::scroll::ScrollAlign;

const ENV_WASD: &str = "TENFOOT_WASD";
const ENV_WRAP_H: &str = "TENFOOT_WRAP_H";
const ENV_WRAP_V: &str = "TENFOOT_WRAP_V";
const ENV_SWALLOW_VERTICAL: &str = "TENFOOT_SWALLOW_VERTICAL";
const ENV_SCROLL_PADDING: &str = "TENFOOT_SCROLL_PADDING";
const ENV_SCROLL_ALIGN: &str = "TENFOOT_SCROLL_ALIGN";
const ENV_SEARCH_MIN_SCORE: &str = "TENFOOT_SEARCH_MIN_SCORE";

/// A rejected configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Not one of the accepted boolean spellings.
    InvalidBool {
        /// Variable name.
        key: &'static str,
        /// Raw value.
        value: String,
    },
    /// Not a number (or not one of the accepted names).
    InvalidNumber {
        /// Variable name.
        key: &'static str,
        /// Raw value.
        value: String,
    },
    /// Parsed, but outside the accepted range.
    OutOfRange {
        /// Variable name.
        key: &'static str,
        /// Raw value.
        value: String,
    },
}

impl ConfigError {
    /// The offending variable.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::InvalidBool { key, .. }
            | Self::InvalidNumber { key, .. }
            | Self::OutOfRange { key, .. } => key,
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBool { key, value } => {
                write!(f, "{key}: expected a boolean, got {value:?}")
            }
            Self::InvalidNumber { key, value } => {
                write!(f, "{key}: expected a number, got {value:?}")
            }
            Self::OutOfRange { key, value } => write!(f, "{key}: {value:?} is out of range"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Navigation and search policy.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NavConfig {
    /// Honor WASD aliases.
    pub enable_wasd: bool,
    /// Right/Left continue on adjacent rows.
    pub wrap_horizontal: bool,
    /// Up/Down re-enter from the opposite edge.
    pub wrap_vertical: bool,
    /// Up/Down boundary exits are handled even without a callback.
    pub swallow_vertical_edges: bool,
    /// Margin kept around a focused item when scrolling (nearest only).
    pub scroll_padding: u32,
    /// Scroll alignment for focus requests.
    pub scroll_align: ScrollAlign,
    /// Minimum fuzzy score for search results.
    pub search_min_score: f64,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            enable_wasd: true,
            wrap_horizontal: false,
            wrap_vertical: false,
            swallow_vertical_edges: true,
            scroll_padding: 0,
            scroll_align: ScrollAlign::Nearest,
            search_min_score: DEFAULT_MIN_SCORE,
        }
    }
}

impl NavConfig {
    /// Detect policy from the process environment.
    #[must_use]
    pub fn detect() -> Self {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Detect policy using a custom environment lookup (for tests).
    ///
    /// Unparsable values are logged and ignored; the default is kept.
    #[must_use]
    pub fn from_env_with<F>(get_env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let (config, errors) = collect(&get_env);
        for error in &errors {
            tenfoot_core::warn!(key = error.key(), %error, "ignoring invalid navigation setting");
        }
        config
    }

    /// Like [`from_env_with`](Self::from_env_with), but the first invalid
    /// value is an error.
    pub fn try_from_env_with<F>(get_env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let (config, errors) = collect(&get_env);
        match errors.into_iter().next() {
            Some(error) => Err(error),
            None => Ok(config),
        }
    }

    /// Matcher using this policy's threshold.
    #[must_use]
    pub fn matcher(&self) -> FuzzyMatcher {
        FuzzyMatcher::with_min_score(self.search_min_score)
    }

    /// Serialize policy to JSON (for diagnostics).
    #[must_use]
    pub fn to_json(&self) -> String {
        format!(
            concat!(
                r#"{{"enable_wasd":{},"wrap_horizontal":{},"wrap_vertical":{},"#,
                r#""swallow_vertical_edges":{},"scroll_padding":{},"scroll_align":"{}","#,
                r#""search_min_score":{}}}"#
            ),
            self.enable_wasd,
            self.wrap_horizontal,
            self.wrap_vertical,
            self.swallow_vertical_edges,
            self.scroll_padding,
            self.scroll_align.as_str(),
            self.search_min_score
        )
    }
}

fn collect<F>(get_env: &F) -> (NavConfig, Vec<ConfigError>)
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = NavConfig::default();
    let mut errors = Vec::new();

    let mut apply_bool = |key: &'static str, slot: &mut bool| {
        if let Some(value) = get_env(key) {
            match parse_bool(&value) {
                Some(parsed) => *slot = parsed,
                None => errors.push(ConfigError::InvalidBool { key, value }),
            }
        }
    };
    apply_bool(ENV_WASD, &mut config.enable_wasd);
    apply_bool(ENV_WRAP_H, &mut config.wrap_horizontal);
    apply_bool(ENV_WRAP_V, &mut config.wrap_vertical);
    apply_bool(ENV_SWALLOW_VERTICAL, &mut config.swallow_vertical_edges);

    if let Some(value) = get_env(ENV_SCROLL_PADDING) {
        match value.trim().parse::<i64>() {
            Ok(padding) => match u32::try_from(padding) {
                Ok(padding) => config.scroll_padding = padding,
                Err(_) => errors.push(ConfigError::OutOfRange {
                    key: ENV_SCROLL_PADDING,
                    value,
                }),
            },
            Err(_) => errors.push(ConfigError::InvalidNumber {
                key: ENV_SCROLL_PADDING,
                value,
            }),
        }
    }

    if let Some(value) = get_env(ENV_SCROLL_ALIGN) {
        match ScrollAlign::parse(&value) {
            Some(align) => config.scroll_align = align,
            None => errors.push(ConfigError::InvalidNumber {
                key: ENV_SCROLL_ALIGN,
                value,
            }),
        }
    }

    if let Some(value) = get_env(ENV_SEARCH_MIN_SCORE) {
        match value.trim().parse::<f64>() {
            Ok(score) if (0.0..=1.0).contains(&score) => config.search_min_score = score,
            Ok(_) => errors.push(ConfigError::OutOfRange {
                key: ENV_SEARCH_MIN_SCORE,
                value,
            }),
            Err(_) => errors.push(ConfigError::InvalidNumber {
                key: ENV_SEARCH_MIN_SCORE,
                value,
            }),
        }
    }

    (config, errors)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
