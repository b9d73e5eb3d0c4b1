#![forbid(unsafe_code)]

//! Library screen adapters.
//!
//! The library grid shows installed games first and everything else after,
//! as one flat sequence. [`order_library`] produces that order and the
//! section break the grid needs; [`ColumnMeasure`] turns a live container
//! width into a column count.

use crate::nav_grid::{Columns, GridOptions};

/// Installed-first ordering of a library.
#[derive(Debug)]
pub struct LibraryOrder<'a, T> {
    items: Vec<&'a T>,
    source: Vec<usize>,
    installed: usize,
}

impl<'a, T> LibraryOrder<'a, T> {
    /// Items in display order.
    #[must_use]
    pub fn items(&self) -> &[&'a T] {
        &self.items
    }

    /// Item at display position `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&'a T> {
        self.items.get(index).copied()
    }

    /// Position in the original slice of the item shown at `index`.
    #[must_use]
    pub fn source_index(&self, index: usize) -> Option<usize> {
        self.source.get(index).copied()
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the library is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of installed items (the length of the first section).
    #[must_use]
    pub const fn installed_count(&self) -> usize {
        self.installed
    }

    /// First index of the not-installed section, when both sections exist.
    #[must_use]
    pub fn section_break(&self) -> Option<usize> {
        (self.installed > 0 && self.installed < self.items.len()).then_some(self.installed)
    }

    /// `base` with this library's section break applied.
    #[must_use]
    pub fn grid_options(&self, base: GridOptions) -> GridOptions {
        base.section_break(self.section_break())
    }
}

/// Stable-partition `items` into installed first, then the rest.
pub fn order_library<'a, T, F>(items: &'a [T], is_installed: F) -> LibraryOrder<'a, T>
where
    F: Fn(&T) -> bool,
{
    let (installed, rest): (Vec<_>, Vec<_>) =
        items.iter().enumerate().partition(|(_, item)| is_installed(*item));
    let installed_count = installed.len();
    let (source, items) = installed.into_iter().chain(rest).unzip();
    LibraryOrder {
        items,
        source,
        installed: installed_count,
    }
}

/// Sort by name, ignoring case. Equal names keep their order.
pub fn sort_by_name<T, F>(items: &mut [T], name_of: F)
where
    F: Fn(&T) -> &str,
{
    items.sort_by_cached_key(|item| name_of(item).to_lowercase());
}

/// Derives a column count from a container width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColumnMeasure {
    /// Width of one item.
    pub item_width: u32,
    /// Horizontal gap between items.
    pub gap: u32,
}

impl ColumnMeasure {
    /// Create a measure.
    #[must_use]
    pub const fn new(item_width: u32, gap: u32) -> Self {
        Self { item_width, gap }
    }

    /// How many items fit across `container_width`; at least 1.
    #[must_use]
    pub fn columns_for(&self, container_width: u32) -> usize {
        let pitch = u64::from(self.item_width) + u64::from(self.gap);
        if pitch == 0 {
            return 1;
        }
        let fit = (u64::from(container_width) + u64::from(self.gap)) / pitch;
        usize::try_from(fit).unwrap_or(usize::MAX).max(1)
    }

    /// A column source re-measuring `container_width` on every key event.
    pub fn provider(self, container_width: impl Fn() -> u32 + 'static) -> Columns {
        Columns::provider(move || {
            isize::try_from(self.columns_for(container_width())).unwrap_or(isize::MAX)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Debug, PartialEq)]
    struct Game {
        name: &'static str,
        installed: bool,
    }

    const fn game(name: &'static str, installed: bool) -> Game {
        Game { name, installed }
    }

    #[test]
    fn installed_first_preserving_order() {
        let games = [
            game("Celeste", false),
            game("Hades", true),
            game("Balatro", false),
            game("Outer Wilds", true),
        ];
        let order = order_library(&games, |g| g.installed);
        let names: Vec<_> = order.items().iter().map(|g| g.name).collect();
        assert_eq!(names, ["Hades", "Outer Wilds", "Celeste", "Balatro"]);
        assert_eq!(order.section_break(), Some(2));
        assert_eq!(order.installed_count(), 2);
        assert_eq!(order.source_index(0), Some(1));
        assert_eq!(order.get(3), Some(&games[2]));
        assert_eq!(order.get(4), None);
    }

    #[test]
    fn single_section_has_no_break() {
        let all_installed = [game("A", true), game("B", true)];
        assert_eq!(order_library(&all_installed, |g| g.installed).section_break(), None);
        let none_installed = [game("A", false)];
        assert_eq!(order_library(&none_installed, |g| g.installed).section_break(), None);
        let empty: [Game; 0] = [];
        let order = order_library(&empty, |g| g.installed);
        assert!(order.is_empty());
        assert_eq!(order.section_break(), None);
    }

    #[test]
    fn grid_options_pick_up_the_break() {
        let games = [game("A", true), game("B", false)];
        let options = order_library(&games, |g| g.installed).grid_options(GridOptions::default());
        assert_eq!(options.section_break, Some(1));
    }

    #[test]
    fn sort_by_name_ignores_case() {
        let mut names = vec!["zelda", "Among Us", "celeste", "Baba Is You"];
        sort_by_name(&mut names, |n| *n);
        assert_eq!(names, ["Among Us", "Baba Is You", "celeste", "zelda"]);
    }

    #[test]
    fn columns_fit_with_gaps() {
        let measure = ColumnMeasure::new(200, 16);
        // 3 * 200 + 2 * 16 = 632
        assert_eq!(measure.columns_for(632), 3);
        assert_eq!(measure.columns_for(631), 2);
        assert_eq!(measure.columns_for(0), 1);
        assert_eq!(ColumnMeasure::new(0, 0).columns_for(500), 1);
    }

    #[test]
    fn provider_tracks_width() {
        let width = Rc::new(Cell::new(632));
        let live = Rc::clone(&width);
        let columns = ColumnMeasure::new(200, 16).provider(move || live.get());
        assert_eq!(columns.resolve(), 3);
        width.set(1280);
        assert_eq!(columns.resolve(), 6);
    }
}
