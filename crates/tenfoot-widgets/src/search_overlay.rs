#![forbid(unsafe_code)]

//! Search overlay coordination.
//!
//! The overlay pairs a query field with a transient [`NavigationGrid`] whose
//! items are the ranked search results. It owns the query text, re-ranks on
//! every edit, and moves focus between the field and the grid:
//!
//! | Focus  | Key                 | Effect                                          |
//! |--------|---------------------|-------------------------------------------------|
//! | field  | Down                | enter the grid at result 0 (if any)             |
//! | field  | Enter               | select result 0 (non-blank query, results only) |
//! | field  | Esc                 | close                                           |
//! | field  | text / Backspace    | edit the query                                  |
//! | grid   | Enter / Space       | select the focused result                       |
//! | grid   | Esc                 | close                                           |
//! | grid   | Up on the first row | back to the field                               |
//! | grid   | other directions    | grid navigation                                 |
//! | grid   | text / Backspace    | edit the query and return to the field          |
//!
//! Selections hand back the original candidate, borrowed from the slice the
//! overlay was opened over.

use tenfoot_core::event::{Event, KeyCode, KeyEvent};
use tenfoot_core::input::{Direction, InputSource, NavInput, classify_key};

use crate::fuzzy::{FuzzyMatcher, Ranked};
use crate::nav_grid::{Columns, FocusRequest, GridOptions, NavigationGrid};

/// Which part of the overlay holds focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OverlayFocus {
    /// The query text field.
    #[default]
    QueryField,
    /// A result in the grid.
    Results,
}

/// Something the host should act on.
#[derive(Debug, PartialEq)]
pub enum OverlayAction<'a, T> {
    /// The user picked a result.
    Select(Ranked<'a, T>),
    /// The user dismissed the overlay.
    Close,
}

/// Where the host should move platform focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayFocusRequest {
    /// Focus the query field.
    QueryField,
    /// Focus and reveal a result.
    Item(FocusRequest),
}

/// Result of routing one event through the overlay.
#[derive(Debug, PartialEq)]
pub struct OverlayOutcome<'a, T> {
    /// Whether the host should suppress default handling.
    pub handled: bool,
    /// Selection or dismissal, if the event produced one.
    pub action: Option<OverlayAction<'a, T>>,
    /// Focus move, if any.
    pub focus: Option<OverlayFocusRequest>,
}

impl<'a, T> OverlayOutcome<'a, T> {
    fn unhandled() -> Self {
        Self {
            handled: false,
            action: None,
            focus: None,
        }
    }

    fn consumed() -> Self {
        Self {
            handled: true,
            action: None,
            focus: None,
        }
    }

    fn action(action: OverlayAction<'a, T>) -> Self {
        Self {
            handled: true,
            action: Some(action),
            focus: None,
        }
    }

    fn focus(focus: OverlayFocusRequest) -> Self {
        Self {
            handled: true,
            action: None,
            focus: Some(focus),
        }
    }
}

/// Live search over a borrowed candidate list.
pub struct SearchOverlay<'a, T, L>
where
    L: Fn(&T) -> &str,
{
    candidates: &'a [T],
    label_of: L,
    matcher: FuzzyMatcher,
    query: String,
    results: Vec<Ranked<'a, T>>,
    focus: OverlayFocus,
    grid: Option<NavigationGrid>,
}

impl<'a, T, L> SearchOverlay<'a, T, L>
where
    L: Fn(&T) -> &str,
{
    /// Open an overlay over `candidates` with an empty query.
    ///
    /// `options.section_break` is ignored: results form a single section.
    pub fn new(candidates: &'a [T], label_of: L, columns: Columns, options: GridOptions) -> Self {
        let grid = NavigationGrid::with_columns(0, columns, options.section_break(None));
        let mut overlay = Self {
            candidates,
            label_of,
            matcher: FuzzyMatcher::default(),
            query: String::new(),
            results: Vec::new(),
            focus: OverlayFocus::QueryField,
            grid: Some(grid),
        };
        overlay.recompute();
        overlay
    }

    /// Rank with `matcher` instead of the default threshold (builder).
    #[must_use]
    pub fn with_matcher(mut self, matcher: FuzzyMatcher) -> Self {
        self.matcher = matcher;
        self.recompute();
        self
    }

    /// Whether the overlay is still open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.grid.is_some()
    }

    /// Current query text.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Current ranked results.
    #[must_use]
    pub fn results(&self) -> &[Ranked<'a, T>] {
        &self.results
    }

    /// Which part of the overlay holds focus.
    #[must_use]
    pub const fn focus(&self) -> OverlayFocus {
        self.focus
    }

    /// The result grid, while open.
    #[must_use]
    pub fn grid(&self) -> Option<&NavigationGrid> {
        self.grid.as_ref()
    }

    /// The focused result, when focus is in the grid.
    #[must_use]
    pub fn focused_result(&self) -> Option<Ranked<'a, T>> {
        match (self.focus, &self.grid) {
            (OverlayFocus::Results, Some(grid)) => self.results.get(grid.focus_index()).copied(),
            _ => None,
        }
    }

    /// Replace the query and re-rank.
    pub fn set_query(&mut self, query: impl Into<String>) {
        if !self.is_open() {
            return;
        }
        self.query = query.into();
        self.recompute();
    }

    /// Discard the grid and results. Later events are unhandled.
    pub fn close(&mut self) {
        self.grid = None;
        self.results.clear();
        self.focus = OverlayFocus::QueryField;
        tenfoot_core::debug!("search overlay closed");
    }

    /// Route a canonical event. Pastes append to the query.
    pub fn handle_event(&mut self, event: &Event) -> OverlayOutcome<'a, T> {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Paste(paste) if self.is_open() => {
                self.query.push_str(&paste.text);
                self.recompute();
                self.to_query_field()
            }
            _ => OverlayOutcome::unhandled(),
        }
    }

    /// Route a key event.
    pub fn handle_key(&mut self, key: &KeyEvent) -> OverlayOutcome<'a, T> {
        if !self.is_open() || key.is_release() {
            return OverlayOutcome::unhandled();
        }

        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "search_overlay.handle_key",
            key = ?key.code,
            focus = ?self.focus,
            results = self.results.len()
        )
        .entered();

        match self.focus {
            OverlayFocus::QueryField => self.handle_field_key(key),
            OverlayFocus::Results => self.handle_grid_key(key),
        }
    }

    fn handle_field_key(&mut self, key: &KeyEvent) -> OverlayOutcome<'a, T> {
        match key.code {
            KeyCode::Down if !key.has_command_modifier() => self.enter_grid(),
            KeyCode::Enter => {
                if self.query.trim().is_empty() {
                    return OverlayOutcome::unhandled();
                }
                match self.results.first() {
                    Some(&first) => OverlayOutcome::action(OverlayAction::Select(first)),
                    None => OverlayOutcome::unhandled(),
                }
            }
            KeyCode::Escape => {
                self.close();
                OverlayOutcome::action(OverlayAction::Close)
            }
            _ if self.edit_query(key) => OverlayOutcome::consumed(),
            _ => OverlayOutcome::unhandled(),
        }
    }

    fn handle_grid_key(&mut self, key: &KeyEvent) -> OverlayOutcome<'a, T> {
        let Some(grid) = self.grid.as_mut() else {
            return OverlayOutcome::unhandled();
        };
        match classify_key(key) {
            Some(NavInput::Enter | NavInput::Space) => match self.focused_result() {
                Some(result) => OverlayOutcome::action(OverlayAction::Select(result)),
                None => OverlayOutcome::unhandled(),
            },
            Some(NavInput::Escape) => {
                self.close();
                OverlayOutcome::action(OverlayAction::Close)
            }
            Some(NavInput::Move { direction, source }) => {
                let current = grid.focus_index();
                let first_row = grid.shape().row_of(current) == 0;
                let honored = !source.is_alias() || grid.options().enable_wasd;
                if direction == Direction::Up && first_row && honored {
                    return self.to_query_field();
                }
                let outcome = grid.handle_direction(current, direction, source);
                if outcome.handled {
                    return OverlayOutcome {
                        handled: true,
                        action: None,
                        focus: outcome.request.map(OverlayFocusRequest::Item),
                    };
                }
                if source == InputSource::Alias {
                    return self.type_from_grid(key);
                }
                OverlayOutcome::unhandled()
            }
            None => self.type_from_grid(key),
        }
    }

    fn enter_grid(&mut self) -> OverlayOutcome<'a, T> {
        let Some(grid) = self.grid.as_mut() else {
            return OverlayOutcome::unhandled();
        };
        match grid.focus(0) {
            Some(request) => {
                self.focus = OverlayFocus::Results;
                OverlayOutcome::focus(OverlayFocusRequest::Item(request))
            }
            None => OverlayOutcome::unhandled(),
        }
    }

    fn type_from_grid(&mut self, key: &KeyEvent) -> OverlayOutcome<'a, T> {
        if self.edit_query(key) {
            self.to_query_field()
        } else {
            OverlayOutcome::unhandled()
        }
    }

    fn to_query_field(&mut self) -> OverlayOutcome<'a, T> {
        self.focus = OverlayFocus::QueryField;
        OverlayOutcome::focus(OverlayFocusRequest::QueryField)
    }

    /// Apply a text-editing key to the query. Returns whether it applied.
    fn edit_query(&mut self, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('u') if key.ctrl() => self.query.clear(),
            KeyCode::Char(c) if !key.has_command_modifier() => self.query.push(c),
            KeyCode::Backspace if !key.has_command_modifier() => {
                if self.query.pop().is_none() {
                    return false;
                }
            }
            _ => return false,
        }
        self.recompute();
        true
    }

    fn recompute(&mut self) {
        self.results = self
            .matcher
            .search(self.candidates, &self.query, &self.label_of);
        if let Some(grid) = self.grid.as_mut() {
            grid.set_item_count(self.results.len());
            grid.reset_focus();
        }
        if self.results.is_empty() {
            self.focus = OverlayFocus::QueryField;
        }
        tenfoot_core::debug!(
            query = self.query.as_str(),
            count = self.results.len(),
            "search results updated"
        );
    }
}

impl<T, L> std::fmt::Debug for SearchOverlay<'_, T, L>
where
    L: Fn(&T) -> &str,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchOverlay")
            .field("candidates", &self.candidates.len())
            .field("query", &self.query)
            .field("results", &self.results.len())
            .field("focus", &self.focus)
            .field("open", &self.is_open())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tenfoot_core::event::{Modifiers, PasteEvent};

    static GAMES: [&str; 6] = [
        "Minecraft",
        "Terraria",
        "Counter-Strike 2",
        "Mine Blocks",
        "Hades",
        "Stardew Valley",
    ];

    type Label = for<'a> fn(&'a &'static str) -> &'a str;

    fn overlay(cols: usize) -> SearchOverlay<'static, &'static str, Label> {
        fn label<'x>(game: &'x &'static str) -> &'x str {
            game
        }
        SearchOverlay::new(
            &GAMES,
            label as Label,
            Columns::Fixed(cols),
            GridOptions::default(),
        )
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code)
    }

    fn type_text<T, L: Fn(&T) -> &str>(overlay: &mut SearchOverlay<'_, T, L>, text: &str) {
        for c in text.chars() {
            assert!(overlay.handle_key(&key(KeyCode::Char(c))).handled, "typing {c}");
        }
    }

    #[test]
    fn opens_with_every_candidate() {
        let overlay = overlay(3);
        assert!(overlay.is_open());
        assert_eq!(overlay.results().len(), GAMES.len());
        assert_eq!(overlay.focus(), OverlayFocus::QueryField);
        assert_eq!(overlay.grid().map(NavigationGrid::item_count), Some(6));
    }

    #[test]
    fn typing_reranks_and_wasd_is_text() {
        let mut overlay = overlay(3);
        type_text(&mut overlay, "mine");
        assert_eq!(overlay.query(), "mine");
        let names: Vec<&str> = overlay.results().iter().map(|r| *r.item).collect();
        assert_eq!(names, ["Minecraft", "Mine Blocks"]);
        assert_eq!(overlay.focus(), OverlayFocus::QueryField);

        assert!(overlay.handle_key(&key(KeyCode::Backspace)).handled);
        assert_eq!(overlay.query(), "min");
        let clear = key(KeyCode::Char('u')).with_modifiers(Modifiers::CTRL);
        assert!(overlay.handle_key(&clear).handled);
        assert_eq!(overlay.query(), "");
        assert!(!overlay.handle_key(&key(KeyCode::Backspace)).handled);
    }

    #[test]
    fn enter_selects_first_result_for_real_queries_only() {
        let mut overlay = overlay(3);
        assert_eq!(overlay.handle_key(&key(KeyCode::Enter)).action, None);
        overlay.set_query("   ");
        assert_eq!(overlay.handle_key(&key(KeyCode::Enter)).action, None);

        overlay.set_query("zzzz");
        assert!(overlay.results().is_empty());
        assert_eq!(overlay.handle_key(&key(KeyCode::Enter)).action, None);

        overlay.set_query("mine");
        let outcome = overlay.handle_key(&key(KeyCode::Enter));
        match outcome.action {
            Some(OverlayAction::Select(result)) => {
                assert!(std::ptr::eq(result.item, &GAMES[0]));
                assert_eq!(result.index, 0);
            }
            other => panic!("expected a selection, got {other:?}"),
        }
    }

    #[test]
    fn down_enters_grid_and_up_returns() {
        let mut overlay = overlay(3);
        let outcome = overlay.handle_key(&key(KeyCode::Down));
        assert!(matches!(
            outcome.focus,
            Some(OverlayFocusRequest::Item(FocusRequest { index: 0, .. }))
        ));
        assert_eq!(overlay.focus(), OverlayFocus::Results);

        let right = overlay.handle_key(&key(KeyCode::Right));
        assert!(matches!(
            right.focus,
            Some(OverlayFocusRequest::Item(FocusRequest { index: 1, .. }))
        ));
        let down = overlay.handle_key(&key(KeyCode::Down));
        assert!(matches!(
            down.focus,
            Some(OverlayFocusRequest::Item(FocusRequest { index: 4, .. }))
        ));
        // Second row: Up stays in the grid.
        let up = overlay.handle_key(&key(KeyCode::Up));
        assert!(matches!(
            up.focus,
            Some(OverlayFocusRequest::Item(FocusRequest { index: 1, .. }))
        ));
        // First row: Up goes back to the field.
        let up = overlay.handle_key(&key(KeyCode::Up));
        assert_eq!(up.focus, Some(OverlayFocusRequest::QueryField));
        assert_eq!(overlay.focus(), OverlayFocus::QueryField);
    }

    #[test]
    fn down_without_results_stays_in_field() {
        let mut overlay = overlay(3);
        overlay.set_query("qqqq");
        assert!(!overlay.handle_key(&key(KeyCode::Down)).handled);
        assert_eq!(overlay.focus(), OverlayFocus::QueryField);
    }

    #[test]
    fn grid_selection_returns_focused_candidate() {
        let mut overlay = overlay(2);
        overlay.handle_key(&key(KeyCode::Down));
        overlay.handle_key(&key(KeyCode::Char('d')));
        assert_eq!(overlay.focused_result().map(|r| r.index), Some(1));
        let outcome = overlay.handle_key(&key(KeyCode::Char(' ')));
        match outcome.action {
            Some(OverlayAction::Select(result)) => assert_eq!(*result.item, "Terraria"),
            other => panic!("expected a selection, got {other:?}"),
        }
        assert!(overlay.is_open());
    }

    #[test]
    fn typing_in_grid_returns_to_field() {
        let mut overlay = overlay(3);
        overlay.handle_key(&key(KeyCode::Down));
        let outcome = overlay.handle_key(&key(KeyCode::Char('h')));
        assert_eq!(outcome.focus, Some(OverlayFocusRequest::QueryField));
        assert_eq!(overlay.query(), "h");
        assert_eq!(overlay.focus(), OverlayFocus::QueryField);
    }

    #[test]
    fn escape_closes_from_either_side() {
        let mut overlay = overlay(3);
        let outcome = overlay.handle_key(&key(KeyCode::Escape));
        assert_eq!(outcome.action, Some(OverlayAction::Close));
        assert!(!overlay.is_open());
        assert!(overlay.results().is_empty());
        assert!(!overlay.handle_key(&key(KeyCode::Down)).handled);
        overlay.set_query("mine");
        assert!(overlay.results().is_empty());

        let mut overlay = self::overlay(3);
        overlay.handle_key(&key(KeyCode::Down));
        let outcome = overlay.handle_key(&key(KeyCode::Escape));
        assert_eq!(outcome.action, Some(OverlayAction::Close));
        assert!(overlay.grid().is_none());
    }

    #[test]
    fn query_change_resets_grid_focus() {
        let mut overlay = overlay(3);
        overlay.handle_key(&key(KeyCode::Down));
        overlay.handle_key(&key(KeyCode::Right));
        overlay.handle_key(&key(KeyCode::Right));
        overlay.set_query("a");
        assert_eq!(overlay.grid().map(NavigationGrid::focus_index), Some(0));
    }

    #[test]
    fn paste_appends_to_query() {
        let mut overlay = overlay(3);
        let outcome = overlay.handle_event(&Event::Paste(PasteEvent::bracketed("stardew")));
        assert!(outcome.handled);
        assert_eq!(overlay.query(), "stardew");
        assert_eq!(overlay.results().first().map(|r| *r.item), Some("Stardew Valley"));
        assert!(!overlay.handle_event(&Event::Focus(false)).handled);
    }

    #[test]
    fn matcher_threshold_applies() {
        let overlay = overlay(3).with_matcher(FuzzyMatcher::with_min_score(0.9));
        assert_eq!(overlay.results().len(), GAMES.len());
        let mut overlay = overlay;
        overlay.set_query("ra");
        assert!(overlay.results().iter().all(|r| r.score >= 0.9));
    }
}
