#![forbid(unsafe_code)]

//! Pure grid traversal.
//!
//! Items are a flat, linearly indexed sequence laid out row-major into
//! `columns` columns; the last row may be partial. [`compute_next_index`]
//! answers "where does focus go from here" without touching any state, so
//! every rule below can be tested in isolation.
//!
//! | Direction | In-grid move             | Edge with wrap                        |
//! |-----------|--------------------------|---------------------------------------|
//! | Right     | `i + 1`                  | first item of next row (not last row) |
//! | Left      | `i - 1`                  | last item of previous row (not row 0) |
//! | Down      | `min(i + cols, last)`    | same column, row 0                    |
//! | Up        | `i - cols`               | same column, last row (clamped)       |
//!
//! Up additionally honors a section break: from the first row of the second
//! section it jumps straight to the last item of the first section, before
//! any of the rules above are considered.

use tenfoot_core::input::Direction;

/// Dimensions of a grid: how many items, laid out in how many columns.
///
/// # Invariants
///
/// `columns >= 1`. Zero is coerced to one at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridShape {
    item_count: usize,
    columns: usize,
}

impl GridShape {
    /// Create a shape; `columns == 0` is treated as 1.
    #[must_use]
    pub const fn new(item_count: usize, columns: usize) -> Self {
        Self {
            item_count,
            columns: if columns == 0 { 1 } else { columns },
        }
    }

    /// Create a shape from a possibly non-positive measured column count.
    #[must_use]
    pub fn from_measured(item_count: usize, columns: isize) -> Self {
        Self::new(item_count, usize::try_from(columns).unwrap_or(1))
    }

    /// Number of items.
    #[must_use]
    pub const fn item_count(&self) -> usize {
        self.item_count
    }

    /// Number of columns (at least 1).
    #[must_use]
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// Whether the grid has no items.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.item_count == 0
    }

    /// Index of the last item, if any.
    #[must_use]
    pub const fn last_index(&self) -> Option<usize> {
        self.item_count.checked_sub(1)
    }

    /// Number of rows, counting a partial last row.
    #[must_use]
    pub const fn total_rows(&self) -> usize {
        self.item_count.div_ceil(self.columns)
    }

    /// Items in the last row (0 for an empty grid).
    #[must_use]
    pub const fn items_in_last_row(&self) -> usize {
        match self.total_rows() {
            0 => 0,
            rows => self.item_count - (rows - 1) * self.columns,
        }
    }

    /// Row of `index`.
    #[must_use]
    pub const fn row_of(&self, index: usize) -> usize {
        index / self.columns
    }

    /// Column of `index`.
    #[must_use]
    pub const fn col_of(&self, index: usize) -> usize {
        index % self.columns
    }

    /// Whether `index` sits at the right end of its row.
    ///
    /// In the last row this is the last item, not the last column.
    #[must_use]
    pub const fn is_last_in_row(&self, index: usize) -> bool {
        let col = self.col_of(index);
        if self.row_of(index) + 1 == self.total_rows() {
            col + 1 == self.items_in_last_row()
        } else {
            col + 1 == self.columns
        }
    }

    /// Clamp `index` into `[0, item_count - 1]` (0 for an empty grid).
    #[must_use]
    pub fn clamp(&self, index: usize) -> usize {
        match self.last_index() {
            Some(last) => index.min(last),
            None => 0,
        }
    }
}

/// Wrap and section rules applied during traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TraversalFlags {
    /// Right/Left at a row edge continue on the adjacent row.
    pub wrap_horizontal: bool,
    /// Up/Down at the top/bottom edge re-enter from the opposite edge.
    pub wrap_vertical: bool,
    /// First index of the second section, if the sequence is split in two.
    pub section_break: Option<usize>,
}

/// Result of one traversal step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// Ordinary in-grid move.
    Move(usize),
    /// Move produced by a wrap rule.
    Wrap(usize),
    /// Up from the first row of the second section.
    SectionJump(usize),
    /// No in-grid target: focus would leave the grid in this direction.
    Edge(Direction),
}

impl Step {
    /// The index focus lands on, unless this is an edge.
    #[must_use]
    pub const fn target(self) -> Option<usize> {
        match self {
            Self::Move(index) | Self::Wrap(index) | Self::SectionJump(index) => Some(index),
            Self::Edge(_) => None,
        }
    }

    /// Whether focus would leave the grid.
    #[must_use]
    pub const fn is_edge(self) -> bool {
        matches!(self, Self::Edge(_))
    }
}

/// Compute where focus goes from `current` in `direction`.
///
/// `current` is clamped into range first, so a stale index left over from a
/// larger item count still yields an in-range result. An empty grid always
/// reports an edge.
#[must_use]
pub fn compute_next_index(
    current: usize,
    direction: Direction,
    shape: GridShape,
    flags: TraversalFlags,
) -> Step {
    let Some(last) = shape.last_index() else {
        return Step::Edge(direction);
    };
    let current = current.min(last);
    let cols = shape.columns();
    let row = shape.row_of(current);
    let col = shape.col_of(current);
    let last_row = shape.total_rows() - 1;

    match direction {
        Direction::Right => {
            if !shape.is_last_in_row(current) {
                Step::Move(current + 1)
            } else if flags.wrap_horizontal && row < last_row {
                Step::Wrap((row + 1) * cols)
            } else {
                Step::Edge(direction)
            }
        }
        Direction::Left => {
            if col > 0 {
                Step::Move(current - 1)
            } else if flags.wrap_horizontal && row > 0 {
                Step::Wrap(row * cols - 1)
            } else {
                Step::Edge(direction)
            }
        }
        Direction::Down => {
            if row < last_row {
                Step::Move((current + cols).min(last))
            } else if flags.wrap_vertical {
                Step::Wrap(col)
            } else {
                Step::Edge(direction)
            }
        }
        Direction::Up => {
            if let Some(target) = section_jump(current, shape, flags.section_break) {
                Step::SectionJump(target)
            } else if row > 0 {
                Step::Move(current - cols)
            } else if flags.wrap_vertical {
                Step::Wrap((last_row * cols + col).min(last))
            } else {
                Step::Edge(direction)
            }
        }
    }
}

/// Up from the first row of the second section lands on the last item of
/// the first section.
fn section_jump(current: usize, shape: GridShape, section_break: Option<usize>) -> Option<usize> {
    let boundary = section_break.filter(|&b| b > 0)?;
    (current >= boundary && shape.row_of(current) == shape.row_of(boundary))
        .then(|| boundary - 1)
}
