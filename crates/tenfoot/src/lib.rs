#![forbid(unsafe_code)]

//! Tenfoot public facade crate.
//!
//! This crate provides the stable, ergonomic surface area for hosts. It
//! re-exports the navigation and search types from the internal crates and
//! offers a lightweight prelude for day-to-day usage.

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use tenfoot_core::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, Modifiers, PasteEvent,
};
pub use tenfoot_core::geometry::Rect;
pub use tenfoot_core::input::{
    Direction, InputSource, InputTarget, NavInput, TextEntryProbe, classify_key,
};

// --- Widget re-exports -----------------------------------------------------

pub use tenfoot_widgets::config::{ConfigError, NavConfig};
pub use tenfoot_widgets::fuzzy::{FuzzyMatch, FuzzyMatcher, MatchTier, Ranked};
pub use tenfoot_widgets::library::{ColumnMeasure, LibraryOrder, order_library, sort_by_name};
pub use tenfoot_widgets::nav_grid::{
    Columns, FocusRequest, GridOptions, NavOutcome, NavigationGrid,
};
pub use tenfoot_widgets::scroll::{ScrollAlign, ScrollIntoView, ScrollOffset};
pub use tenfoot_widgets::search_overlay::{
    OverlayAction, OverlayFocus, OverlayFocusRequest, OverlayOutcome, SearchOverlay,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for tenfoot hosts.
#[derive(Debug)]
pub enum Error {
    /// Invalid navigation configuration.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "invalid configuration: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

/// Standard result type for tenfoot APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// Load the navigation policy from the process environment, rejecting
/// invalid values.
///
/// Use [`NavConfig::detect`] to ignore invalid values instead.
pub fn load_config() -> Result<NavConfig> {
    load_config_with(|key| std::env::var(key).ok())
}

/// [`load_config`] with an injected environment lookup.
pub fn load_config_with<F>(get_env: F) -> Result<NavConfig>
where
    F: Fn(&str) -> Option<String>,
{
    Ok(NavConfig::try_from_env_with(get_env)?)
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Columns, Direction, Error, Event, FocusRequest, FuzzyMatcher, GridOptions, KeyCode,
        KeyEvent, Modifiers, NavConfig, NavOutcome, NavigationGrid, OverlayAction,
        OverlayFocusRequest, Ranked, Result, ScrollIntoView, SearchOverlay,
    };

    pub use crate::{core, widgets};
}

pub use tenfoot_core as core;
pub use tenfoot_widgets as widgets;

#[cfg(feature = "tracing-json")]
pub use tenfoot_core::logging::init_json_subscriber;
