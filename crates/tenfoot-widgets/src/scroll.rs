#![forbid(unsafe_code)]

//! Scroll-into-view requests.
//!
//! A navigation grid never scrolls anything itself. Each accepted move
//! carries a [`ScrollIntoView`] describing how the host should reveal the
//! newly focused item; hosts without a viewport simply ignore it. The
//! geometry is resolved here so every host computes the same offsets.
//!
//! # Policies
//!
//! - [`ScrollAlign::Nearest`]: scroll the minimum distance that fully reveals
//!   the item, grown by `padding` on every side. No-op when already visible.
//! - [`ScrollAlign::Center`]: center the item in the viewport. Useful when a
//!   focused card grows its chrome and would otherwise clip at an edge.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tenfoot_core::geometry::Rect;

/// How a focused item should be aligned within its scrollable ancestor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ScrollAlign {
    /// Minimum necessary scroll.
    #[default]
    Nearest,
    /// Center the item on each axis.
    Center,
}

impl ScrollAlign {
    /// Parse `nearest` / `center` (case-insensitive, `centre` accepted).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "nearest" | "near" => Some(Self::Nearest),
            "center" | "centre" => Some(Self::Center),
            _ => None,
        }
    }

    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Nearest => "nearest",
            Self::Center => "center",
        }
    }
}

/// A request to bring an item's bounds into view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ScrollIntoView {
    /// Alignment policy.
    pub align: ScrollAlign,
    /// Extra margin kept around the item (nearest alignment only).
    pub padding: u32,
}

impl ScrollIntoView {
    /// Minimum-scroll request with no padding.
    #[must_use]
    pub const fn nearest() -> Self {
        Self {
            align: ScrollAlign::Nearest,
            padding: 0,
        }
    }

    /// Centering request.
    #[must_use]
    pub const fn centered() -> Self {
        Self {
            align: ScrollAlign::Center,
            padding: 0,
        }
    }

    /// Set the padding margin (builder).
    #[must_use]
    pub const fn with_padding(mut self, padding: u32) -> Self {
        self.padding = padding;
        self
    }

    /// Compute the viewport origin that satisfies this request.
    ///
    /// `viewport` is the currently visible window and `item` the focused
    /// item's bounds, both in content coordinates. The returned origin never
    /// goes below zero; use [`ScrollOffset::clamp_to_content`] to bound it
    /// from above as well.
    #[must_use]
    pub fn resolve(&self, viewport: Rect, item: Rect) -> ScrollOffset {
        match self.align {
            ScrollAlign::Nearest => {
                let wanted = item.inflate(self.padding);
                if viewport.contains_rect(&wanted) {
                    return ScrollOffset::of(viewport);
                }
                ScrollOffset {
                    x: nearest_axis(
                        (viewport.x, viewport.right()),
                        (wanted.x, wanted.right()),
                    ),
                    y: nearest_axis(
                        (viewport.y, viewport.bottom()),
                        (wanted.y, wanted.bottom()),
                    ),
                }
            }
            ScrollAlign::Center => ScrollOffset {
                x: center_axis(viewport.width, item.x, item.width),
                y: center_axis(viewport.height, item.y, item.height),
            },
        }
    }
}

/// A resolved viewport origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ScrollOffset {
    /// New left edge of the viewport.
    pub x: u32,
    /// New top edge of the viewport.
    pub y: u32,
}

impl ScrollOffset {
    /// The current origin of `viewport`.
    #[must_use]
    pub const fn of(viewport: Rect) -> Self {
        Self {
            x: viewport.x,
            y: viewport.y,
        }
    }

    /// Whether applying this offset would move `viewport`.
    #[must_use]
    pub const fn moves(&self, viewport: Rect) -> bool {
        self.x != viewport.x || self.y != viewport.y
    }

    /// Bound the offset so the viewport stays inside the content.
    #[must_use]
    pub fn clamp_to_content(self, viewport: Rect, content_width: u32, content_height: u32) -> Self {
        Self {
            x: self.x.min(content_width.saturating_sub(viewport.width)),
            y: self.y.min(content_height.saturating_sub(viewport.height)),
        }
    }
}

/// Origin along one axis that reveals `want` inside `view`, both given as
/// `(start, end)` spans with exclusive ends.
fn nearest_axis(view: (u32, u32), want: (u32, u32)) -> u32 {
    let (view_start, view_end) = view;
    let (want_start, want_end) = want;
    let view_len = view_end - view_start;

    if want_start >= view_start && want_end <= view_end {
        return view_start;
    }
    // Items taller than the viewport (or above it) align to their start.
    if want_start < view_start || want_end - want_start > view_len {
        return want_start;
    }
    want_end - view_len
}

fn center_axis(view_len: u32, item_start: u32, item_len: u32) -> u32 {
    let item_center = item_start.saturating_add(item_len / 2);
    item_center.saturating_sub(view_len / 2)
}
