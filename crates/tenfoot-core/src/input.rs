#![forbid(unsafe_code)]

//! Input classification for directional navigation.
//!
//! Raw key events are normalized here, before any traversal logic runs:
//! arrow keys and their WASD aliases both become a [`Direction`], tagged with
//! the [`InputSource`] that produced them. Whether an alias may be honored is
//! a separate question answered by a [`TextEntryProbe`], so typing "d" into a
//! search field never moves a grid.

use crate::event::{KeyCode, KeyEvent};

/// A normalized navigation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward row 0.
    Up,
    /// Toward the last row.
    Down,
    /// Toward column 0.
    Left,
    /// Toward the last column.
    Right,
}

impl Direction {
    /// All four directions, in clockwise order from `Up`.
    pub const ALL: [Direction; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    /// Whether this direction moves between rows.
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Up | Self::Down)
    }

    /// The direction pointing the other way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Stable lowercase name, used in log fields.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// Which key family produced a [`Direction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputSource {
    /// Arrow keys (or a D-pad bridged onto them). Always honored.
    #[default]
    Arrow,
    /// WASD letter aliases. Honored only when enabled and no text field has focus.
    Alias,
}

impl InputSource {
    /// Whether this source is a letter alias.
    #[must_use]
    pub const fn is_alias(self) -> bool {
        matches!(self, Self::Alias)
    }
}

/// A key event reduced to what navigation cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavInput {
    /// A directional move.
    Move {
        /// Where to go.
        direction: Direction,
        /// Which key family asked for it.
        source: InputSource,
    },
    /// Enter/Return.
    Enter,
    /// The space bar.
    Space,
    /// Escape.
    Escape,
}

impl NavInput {
    /// The direction carried by a move, if any.
    #[must_use]
    pub const fn direction(self) -> Option<Direction> {
        match self {
            Self::Move { direction, .. } => Some(direction),
            _ => None,
        }
    }
}

/// Classify a key event.
///
/// Returns `None` for key releases, for anything held with Ctrl/Alt/Super
/// (those belong to host shortcuts), and for keys navigation does not use.
/// Shift is allowed so that an uppercase `W` still counts as an alias.
#[must_use]
pub fn classify_key(key: &KeyEvent) -> Option<NavInput> {
    if key.is_release() || key.has_command_modifier() {
        return None;
    }

    let arrow = |direction| NavInput::Move {
        direction,
        source: InputSource::Arrow,
    };
    let alias = |direction| NavInput::Move {
        direction,
        source: InputSource::Alias,
    };

    match key.code {
        KeyCode::Up => Some(arrow(Direction::Up)),
        KeyCode::Down => Some(arrow(Direction::Down)),
        KeyCode::Left => Some(arrow(Direction::Left)),
        KeyCode::Right => Some(arrow(Direction::Right)),
        KeyCode::Enter => Some(NavInput::Enter),
        KeyCode::Escape => Some(NavInput::Escape),
        KeyCode::Char(' ') => Some(NavInput::Space),
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'w' => Some(alias(Direction::Up)),
            's' => Some(alias(Direction::Down)),
            'a' => Some(alias(Direction::Left)),
            'd' => Some(alias(Direction::Right)),
            _ => None,
        },
        _ => None,
    }
}

/// The kind of element that currently holds the host's input focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputTarget {
    /// A free-text entry control (search box, rename field, ...).
    TextEntry,
    /// A navigable grid item.
    Item,
    /// Anything else, or nothing.
    #[default]
    Other,
}

impl InputTarget {
    /// Whether this target consumes typed characters.
    #[must_use]
    pub const fn is_text_entry(self) -> bool {
        matches!(self, Self::TextEntry)
    }
}

/// Answers "is a free-text entry control focused right now?".
///
/// Implemented for closures so hosts can pass their input-classification
/// utility directly.
pub trait TextEntryProbe {
    /// Whether letter keys currently belong to a text field.
    fn is_text_entry_focused(&self) -> bool;
}

impl<F> TextEntryProbe for F
where
    F: Fn() -> bool,
{
    fn is_text_entry_focused(&self) -> bool {
        self()
    }
}

impl TextEntryProbe for InputTarget {
    fn is_text_entry_focused(&self) -> bool {
        self.is_text_entry()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{KeyEventKind, Modifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code)
    }

    #[test]
    fn arrows_classify_as_arrow_moves() {
        let cases = [
            (KeyCode::Up, Direction::Up),
            (KeyCode::Down, Direction::Down),
            (KeyCode::Left, Direction::Left),
            (KeyCode::Right, Direction::Right),
        ];
        for (code, direction) in cases {
            assert_eq!(
                classify_key(&key(code)),
                Some(NavInput::Move {
                    direction,
                    source: InputSource::Arrow
                }),
                "{code:?}"
            );
        }
    }

    #[test]
    fn wasd_classifies_as_alias_in_either_case() {
        for (c, direction) in [
            ('w', Direction::Up),
            ('A', Direction::Left),
            ('s', Direction::Down),
            ('D', Direction::Right),
        ] {
            let event = key(KeyCode::Char(c)).with_modifiers(if c.is_uppercase() {
                Modifiers::SHIFT
            } else {
                Modifiers::NONE
            });
            assert_eq!(
                classify_key(&event),
                Some(NavInput::Move {
                    direction,
                    source: InputSource::Alias
                }),
                "{c}"
            );
        }
    }

    #[test]
    fn command_modifiers_are_left_to_the_host() {
        let ctrl_d = key(KeyCode::Char('d')).with_modifiers(Modifiers::CTRL);
        assert_eq!(classify_key(&ctrl_d), None);
        let alt_left = key(KeyCode::Left).with_modifiers(Modifiers::ALT);
        assert_eq!(classify_key(&alt_left), None);
    }

    #[test]
    fn releases_are_ignored_but_repeats_are_not() {
        let release = key(KeyCode::Down).with_kind(KeyEventKind::Release);
        assert_eq!(classify_key(&release), None);
        let repeat = key(KeyCode::Down).with_kind(KeyEventKind::Repeat);
        assert_eq!(
            classify_key(&repeat).and_then(NavInput::direction),
            Some(Direction::Down)
        );
    }

    #[test]
    fn confirm_and_cancel_keys() {
        assert_eq!(classify_key(&key(KeyCode::Enter)), Some(NavInput::Enter));
        assert_eq!(classify_key(&key(KeyCode::Char(' '))), Some(NavInput::Space));
        assert_eq!(classify_key(&key(KeyCode::Escape)), Some(NavInput::Escape));
        assert_eq!(classify_key(&key(KeyCode::Char('x'))), None);
        assert_eq!(classify_key(&key(KeyCode::Tab)), None);
    }

    #[test]
    fn probes_report_text_entry() {
        assert!(InputTarget::TextEntry.is_text_entry_focused());
        assert!(!InputTarget::Item.is_text_entry_focused());
        let focused = || true;
        assert!(focused.is_text_entry_focused());
    }

    #[test]
    fn direction_helpers() {
        assert!(Direction::Up.is_vertical());
        assert!(!Direction::Left.is_vertical());
        for direction in Direction::ALL {
            assert_eq!(direction.opposite().opposite(), direction);
        }
        assert_eq!(Direction::Right.as_str(), "right");
    }
}
