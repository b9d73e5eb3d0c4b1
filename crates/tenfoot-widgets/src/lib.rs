#![forbid(unsafe_code)]

//! Focus navigation and search for ten-foot interfaces.
//!
//! - [`nav_grid`]: spatial focus state machine over a flat item sequence.
//! - [`scroll`]: scroll-into-view requests attached to focus moves.
//! - [`fuzzy`]: tiered fuzzy scoring and ranking.
//! - [`search_overlay`]: query field plus a transient grid over ranked results.
//! - [`library`]: installed-first ordering and column measurement.
//! - [`config`]: navigation policy from the environment.
//!
//! Nothing here renders or owns platform focus. Every operation returns what
//! should happen next and leaves applying it to the host.

pub mod config;
pub mod fuzzy;
pub mod library;
pub mod nav_grid;
pub mod scroll;
pub mod search_overlay;

pub use config::{ConfigError, NavConfig};
pub use fuzzy::{FuzzyMatch, FuzzyMatcher, MatchTier, Ranked};
pub use library::{ColumnMeasure, LibraryOrder, order_library, sort_by_name};
pub use nav_grid::{
    Columns, FocusRequest, GridOptions, GridShape, NavOutcome, NavigationGrid, Step,
    TraversalFlags, compute_next_index,
};
pub use scroll::{ScrollAlign, ScrollIntoView, ScrollOffset};
pub use search_overlay::{
    OverlayAction, OverlayFocus, OverlayFocusRequest, OverlayOutcome, SearchOverlay,
};
