#![forbid(unsafe_code)]

//! Spatial focus navigation over a flat item sequence.
//!
//! A [`NavigationGrid`] owns the focus index of one screen's items. Items are
//! laid out row-major into a column count that may change between events
//! (responsive layouts), so the column count is resolved from [`Columns`] on
//! every key. Traversal itself is the pure [`compute_next_index`]; the grid
//! adds everything stateful around it:
//!
//! - alias gating (WASD ignored while a text field has focus),
//! - boundary callbacks when focus would leave the grid,
//! - the enabled flag used to suspend navigation under a modal,
//! - focus requests carrying a [`ScrollIntoView`] policy for the host.
//!
//! The grid never moves platform focus itself. Hosts apply the returned
//! [`FocusRequest`], typically by looking up the handle registered for the
//! index with [`NavigationGrid::register_handle`].
//!
//! # Example
//!
//! ```
//! use tenfoot_core::event::{KeyCode, KeyEvent};
//! use tenfoot_widgets::nav_grid::{GridOptions, NavigationGrid};
//!
//! let mut grid: NavigationGrid = NavigationGrid::new(9, 3, GridOptions::default());
//! let outcome = grid.handle_key(4, &KeyEvent::new(KeyCode::Right));
//! assert!(outcome.handled);
//! assert_eq!(outcome.next_index, 5);
//! assert_eq!(outcome.request.map(|r| r.index), Some(5));
//! ```

pub mod traverse;

use std::fmt;

use tenfoot_core::event::{Event, KeyEvent};
use tenfoot_core::input::{Direction, InputSource, NavInput, TextEntryProbe, classify_key};

use crate::config::NavConfig;
use crate::scroll::{ScrollAlign, ScrollIntoView};

pub use traverse::{GridShape, Step, TraversalFlags, compute_next_index};

/// Column count source.
pub enum Columns {
    /// A fixed number of columns. Zero is treated as 1.
    Fixed(usize),
    /// Re-measured on every key event. Non-positive values are treated as 1.
    Provider(Box<dyn Fn() -> isize>),
}

impl Columns {
    /// Wrap a measurement closure.
    pub fn provider(measure: impl Fn() -> isize + 'static) -> Self {
        Self::Provider(Box::new(measure))
    }

    /// Current column count, at least 1.
    #[must_use]
    pub fn resolve(&self) -> usize {
        match self {
            Self::Fixed(columns) => (*columns).max(1),
            Self::Provider(measure) => usize::try_from(measure()).unwrap_or(0).max(1),
        }
    }
}

impl From<usize> for Columns {
    fn from(columns: usize) -> Self {
        Self::Fixed(columns)
    }
}

impl fmt::Debug for Columns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(columns) => f.debug_tuple("Fixed").field(columns).finish(),
            Self::Provider(_) => f.write_str("Provider(..)"),
        }
    }
}

/// Behavior switches for a [`NavigationGrid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridOptions {
    /// Right/Left at a row edge continue on the adjacent row.
    pub wrap_horizontal: bool,
    /// Up/Down at the top/bottom edge re-enter from the opposite edge.
    pub wrap_vertical: bool,
    /// Honor WASD aliases (still suppressed while a text field has focus).
    pub enable_wasd: bool,
    /// When false every call is unhandled and has no effect.
    pub enabled: bool,
    /// First index of the second section, if any.
    pub section_break: Option<usize>,
    /// Report Up/Down boundary exits as handled even with no callback.
    pub swallow_vertical_edges: bool,
    /// Scroll policy attached to focus requests.
    pub scroll: ScrollIntoView,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            wrap_horizontal: false,
            wrap_vertical: false,
            enable_wasd: true,
            enabled: true,
            section_break: None,
            swallow_vertical_edges: true,
            scroll: ScrollIntoView::nearest(),
        }
    }
}

impl GridOptions {
    /// Map a navigation policy onto grid options.
    ///
    /// `enabled` and `section_break` are per-screen state and keep their
    /// defaults.
    #[must_use]
    pub fn from_config(config: &NavConfig) -> Self {
        let scroll = match config.scroll_align {
            ScrollAlign::Nearest => ScrollIntoView::nearest().with_padding(config.scroll_padding),
            ScrollAlign::Center => ScrollIntoView::centered(),
        };
        Self {
            wrap_horizontal: config.wrap_horizontal,
            wrap_vertical: config.wrap_vertical,
            enable_wasd: config.enable_wasd,
            swallow_vertical_edges: config.swallow_vertical_edges,
            scroll,
            ..Self::default()
        }
    }

    /// Set horizontal wrap.
    #[must_use]
    pub const fn wrap_horizontal(mut self, wrap: bool) -> Self {
        self.wrap_horizontal = wrap;
        self
    }

    /// Set vertical wrap.
    #[must_use]
    pub const fn wrap_vertical(mut self, wrap: bool) -> Self {
        self.wrap_vertical = wrap;
        self
    }

    /// Enable or disable WASD aliases.
    #[must_use]
    pub const fn enable_wasd(mut self, enable: bool) -> Self {
        self.enable_wasd = enable;
        self
    }

    /// Enable or suspend the grid.
    #[must_use]
    pub const fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set the section break index.
    #[must_use]
    pub const fn section_break(mut self, section_break: Option<usize>) -> Self {
        self.section_break = section_break;
        self
    }

    /// Set whether vertical boundary exits are swallowed.
    #[must_use]
    pub const fn swallow_vertical_edges(mut self, swallow: bool) -> Self {
        self.swallow_vertical_edges = swallow;
        self
    }

    /// Set the scroll policy.
    #[must_use]
    pub const fn scroll(mut self, scroll: ScrollIntoView) -> Self {
        self.scroll = scroll;
        self
    }

    fn traversal_flags(&self) -> TraversalFlags {
        TraversalFlags {
            wrap_horizontal: self.wrap_horizontal,
            wrap_vertical: self.wrap_vertical,
            section_break: self.section_break,
        }
    }
}

/// Ask the host to move platform focus to `index` and reveal it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FocusRequest {
    /// Item to focus.
    pub index: usize,
    /// How to bring it into view.
    pub scroll: ScrollIntoView,
}

/// Result of routing one input through a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavOutcome {
    /// Whether the host should suppress default handling of the key.
    pub handled: bool,
    /// Focus index after the event (the clamped current index if unchanged).
    pub next_index: usize,
    /// Present when the focus index changed.
    pub request: Option<FocusRequest>,
    /// Present when navigation reached the grid boundary in this direction.
    pub edge: Option<Direction>,
}

impl NavOutcome {
    fn unhandled(index: usize) -> Self {
        Self {
            handled: false,
            next_index: index,
            request: None,
            edge: None,
        }
    }

    /// Whether focus moved to a different item.
    #[must_use]
    pub const fn moved(&self) -> bool {
        self.request.is_some()
    }
}

type EdgeCallback = Box<dyn FnMut()>;

const fn edge_slot(direction: Direction) -> usize {
    match direction {
        Direction::Up => 0,
        Direction::Down => 1,
        Direction::Left => 2,
        Direction::Right => 3,
    }
}

/// Focus state machine for one screen's items.
///
/// `H` is the host's per-item handle type (a widget id, a DOM-like node
/// reference, ...). Grids that do not track handles use the default `()`.
pub struct NavigationGrid<H = ()> {
    item_count: usize,
    columns: Columns,
    options: GridOptions,
    focus_index: usize,
    edge_callbacks: [Option<EdgeCallback>; 4],
    text_entry: Option<Box<dyn TextEntryProbe>>,
    handles: Vec<Option<H>>,
}

impl<H> NavigationGrid<H> {
    /// Create a grid with a fixed column count and focus at index 0.
    pub fn new(item_count: usize, columns: usize, options: GridOptions) -> Self {
        Self::with_columns(item_count, Columns::Fixed(columns), options)
    }

    /// Create a grid over any column source.
    pub fn with_columns(item_count: usize, columns: Columns, options: GridOptions) -> Self {
        Self {
            item_count,
            columns,
            options,
            focus_index: 0,
            edge_callbacks: [None, None, None, None],
            text_entry: None,
            handles: Vec::new(),
        }
    }

    /// Invoke `callback` when navigation exits the grid toward `direction`
    /// (builder).
    #[must_use]
    pub fn on_navigate(mut self, direction: Direction, callback: impl FnMut() + 'static) -> Self {
        self.set_on_navigate(direction, callback);
        self
    }

    /// Install or replace a boundary callback.
    pub fn set_on_navigate(&mut self, direction: Direction, callback: impl FnMut() + 'static) {
        self.edge_callbacks[edge_slot(direction)] = Some(Box::new(callback));
    }

    /// Remove a boundary callback.
    pub fn clear_on_navigate(&mut self, direction: Direction) {
        self.edge_callbacks[edge_slot(direction)] = None;
    }

    /// Gate WASD aliases on a text-entry predicate (builder).
    #[must_use]
    pub fn with_text_entry_probe(mut self, probe: impl TextEntryProbe + 'static) -> Self {
        self.text_entry = Some(Box::new(probe));
        self
    }

    /// Number of items.
    #[must_use]
    pub const fn item_count(&self) -> usize {
        self.item_count
    }

    /// Current options.
    #[must_use]
    pub const fn options(&self) -> &GridOptions {
        &self.options
    }

    /// Current focus index, clamped to the live item count.
    #[must_use]
    pub fn focus_index(&self) -> usize {
        self.shape().clamp(self.focus_index)
    }

    /// Layout as of now, with the column count freshly resolved.
    #[must_use]
    pub fn shape(&self) -> GridShape {
        GridShape::new(self.item_count, self.columns.resolve())
    }

    /// Update the item count. Handles past the new end are dropped.
    pub fn set_item_count(&mut self, item_count: usize) {
        self.item_count = item_count;
        self.handles.truncate(item_count);
    }

    /// Replace the column source.
    pub fn set_columns(&mut self, columns: Columns) {
        self.columns = columns;
    }

    /// Update the section break.
    pub fn set_section_break(&mut self, section_break: Option<usize>) {
        self.options.section_break = section_break;
    }

    /// Enable or suspend the grid.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.options.enabled = enabled;
    }

    /// Replace all options at once.
    pub fn set_options(&mut self, options: GridOptions) {
        self.options = options;
    }

    /// Attach the host handle for `index`. Returns the handle it replaced.
    pub fn register_handle(&mut self, index: usize, handle: H) -> Option<H> {
        if index >= self.handles.len() {
            self.handles.resize_with(index + 1, || None);
        }
        self.handles[index].replace(handle)
    }

    /// Detach the handle for `index`.
    pub fn unregister_handle(&mut self, index: usize) -> Option<H> {
        self.handles.get_mut(index).and_then(Option::take)
    }

    /// Handle registered for `index`.
    #[must_use]
    pub fn handle(&self, index: usize) -> Option<&H> {
        self.handles.get(index).and_then(Option::as_ref)
    }

    /// Handle of the focused item.
    #[must_use]
    pub fn focused_handle(&self) -> Option<&H> {
        self.handle(self.focus_index())
    }

    /// Move focus to `index`, clamped into range.
    ///
    /// Returns `None` (and changes nothing) when the grid is empty or
    /// disabled.
    pub fn focus(&mut self, index: usize) -> Option<FocusRequest> {
        if !self.options.enabled || self.item_count == 0 {
            return None;
        }
        let index = index.min(self.item_count - 1);
        self.focus_index = index;
        Some(FocusRequest {
            index,
            scroll: self.options.scroll,
        })
    }

    /// Put focus back on the first item without requesting a move.
    pub fn reset_focus(&mut self) {
        self.focus_index = 0;
    }

    /// Route a canonical event, navigating from the grid's own focus index.
    pub fn handle_event(&mut self, event: &Event) -> NavOutcome {
        match event.as_key() {
            Some(key) => self.handle_key(self.focus_index, key),
            None => NavOutcome::unhandled(self.focus_index()),
        }
    }

    /// Classify `key` and navigate from `current`.
    ///
    /// Only directional input is consumed. Enter, Space and Escape are left
    /// to the host, which owns activation and dismissal.
    pub fn handle_key(&mut self, current: usize, key: &KeyEvent) -> NavOutcome {
        match classify_key(key) {
            Some(NavInput::Move { direction, source }) => {
                self.handle_direction(current, direction, source)
            }
            _ => NavOutcome::unhandled(self.shape().clamp(current)),
        }
    }

    /// Navigate from `current` toward `direction`.
    pub fn handle_direction(
        &mut self,
        current: usize,
        direction: Direction,
        source: InputSource,
    ) -> NavOutcome {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "nav_grid.handle_direction",
            from = current,
            direction = direction.as_str(),
            source = ?source,
            items = self.item_count
        )
        .entered();

        let shape = self.shape();
        let current = shape.clamp(current);

        if !self.options.enabled || shape.is_empty() {
            return NavOutcome::unhandled(current);
        }
        if source.is_alias() && !self.alias_allowed() {
            tenfoot_core::trace!(direction = direction.as_str(), "alias key suppressed");
            return NavOutcome::unhandled(current);
        }

        let step = compute_next_index(current, direction, shape, self.options.traversal_flags());
        match step {
            Step::Move(next) | Step::Wrap(next) | Step::SectionJump(next) => {
                if matches!(step, Step::SectionJump(_)) {
                    tenfoot_core::debug!(from = current, to = next, "section break jump");
                }
                self.focus_index = next;
                let request = (next != current).then_some(FocusRequest {
                    index: next,
                    scroll: self.options.scroll,
                });
                tenfoot_core::debug!(
                    from = current,
                    to = next,
                    direction = direction.as_str(),
                    source = ?source,
                    "focus moved"
                );
                NavOutcome {
                    handled: true,
                    next_index: next,
                    request,
                    edge: None,
                }
            }
            Step::Edge(direction) => self.exit(current, direction),
        }
    }

    fn alias_allowed(&self) -> bool {
        self.options.enable_wasd
            && !self
                .text_entry
                .as_ref()
                .is_some_and(|probe| probe.is_text_entry_focused())
    }

    fn exit(&mut self, current: usize, direction: Direction) -> NavOutcome {
        let callback = self.edge_callbacks[edge_slot(direction)].as_mut();
        let has_callback = callback.is_some();
        if let Some(callback) = callback {
            callback();
        }
        let handled =
            has_callback || (direction.is_vertical() && self.options.swallow_vertical_edges);
        tenfoot_core::debug!(
            at = current,
            direction = direction.as_str(),
            has_callback,
            handled,
            "boundary exit"
        );
        NavOutcome {
            handled,
            next_index: current,
            request: None,
            edge: Some(direction),
        }
    }
}

impl<H: fmt::Debug> fmt::Debug for NavigationGrid<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationGrid")
            .field("item_count", &self.item_count)
            .field("columns", &self.columns)
            .field("options", &self.options)
            .field("focus_index", &self.focus_index)
            .field("text_entry", &self.text_entry.is_some())
            .field("handles", &self.handles)
            .finish_non_exhaustive()
    }
}
