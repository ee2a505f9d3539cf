//! Booklet page ordering
//!
//! Computes the order in which pages must be printed so that the printed
//! sheets, stacked and folded once down the middle, read in sequence.
//!
//! ## Layout
//!
//! Each sheet carries four pages: two on the outer (front) side and two on
//! the inner (back) side. For an 8-page booklet:
//!
//! **Left-open:**
//! - Sheet 1: front [8, 1], back [2, 7]
//! - Sheet 2: front [6, 3], back [4, 5]
//!
//! **Right-open:**
//! - Sheet 1: front [1, 8], back [7, 2]
//! - Sheet 2: front [3, 6], back [5, 4]
//!
//! Page counts that are not a multiple of 4 are padded with blanks. Blanks
//! take the highest page numbers, so they land wherever those pages would.

use crate::types::{BookletError, Orientation, Result, Slot};

/// Pages carried by one folded sheet (two per side)
pub const PAGES_PER_SHEET: usize = 4;

/// Largest page count accepted by [`BookletPlan::try_new`]. Far beyond any
/// printable booklet.
pub const MAX_PAGE_COUNT: usize = 1 << 23;

// =============================================================================
// Emission Patterns
// =============================================================================

/// Position relative to the two traversal cursors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    Left,
    LeftInner,
    RightInner,
    Right,
}

impl Cursor {
    fn resolve(self, left: usize, right: usize) -> usize {
        match self {
            Cursor::Left => left,
            Cursor::LeftInner => left + 1,
            Cursor::RightInner => right - 1,
            Cursor::Right => right,
        }
    }
}

impl Orientation {
    /// Order in which one sheet's four pages are emitted:
    /// front-left, front-right, back-left, back-right.
    fn emission_pattern(self) -> [Cursor; PAGES_PER_SHEET] {
        match self {
            Orientation::LeftOpen => [
                Cursor::Right,
                Cursor::Left,
                Cursor::LeftInner,
                Cursor::RightInner,
            ],
            Orientation::RightOpen => [
                Cursor::Left,
                Cursor::Right,
                Cursor::RightInner,
                Cursor::LeftInner,
            ],
        }
    }
}

// =============================================================================
// Planning
// =============================================================================

/// Smallest multiple of 4 that holds `page_count` pages.
///
/// Counts within 3 of `usize::MAX` have no such multiple and clamp to the
/// largest representable one; validate with [`check_page_count`] first.
pub fn padded_page_count(page_count: usize) -> usize {
    page_count
        .checked_next_multiple_of(PAGES_PER_SHEET)
        .unwrap_or(usize::MAX - usize::MAX % PAGES_PER_SHEET)
}

/// Reject page counts above [`MAX_PAGE_COUNT`]
pub fn check_page_count(page_count: usize) -> Result<()> {
    if page_count > MAX_PAGE_COUNT {
        return Err(BookletError::TooManyPages {
            count: page_count,
            max: MAX_PAGE_COUNT,
        });
    }
    Ok(())
}

/// Raw print order over the padded index range `0..padded_page_count(n)`.
///
/// Indices at or above `page_count` stand for padding blanks. The caller is
/// responsible for keeping `page_count` sane, see [`check_page_count`].
pub fn raw_order(page_count: usize, orientation: Orientation) -> Vec<usize> {
    if page_count == 0 {
        return Vec::new();
    }

    let padded = padded_page_count(page_count);
    let pattern = orientation.emission_pattern();
    let mut order = Vec::with_capacity(padded);

    let mut left = 0;
    let mut right = padded - 1;
    while left < right {
        order.extend(pattern.iter().map(|cursor| cursor.resolve(left, right)));
        left += 2;
        right -= 2;
    }

    order
}

/// Print order for a booklet of `page_count` pages.
///
/// Returns an empty plan for zero pages.
pub fn plan(page_count: usize, orientation: Orientation) -> Vec<Slot> {
    raw_order(page_count, orientation)
        .into_iter()
        .map(|index| {
            if index < page_count {
                Slot::Page(index)
            } else {
                Slot::Blank
            }
        })
        .collect()
}

/// A computed booklet plan together with its page accounting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookletPlan {
    orientation: Orientation,
    page_count: usize,
    slots: Vec<Slot>,
}

impl BookletPlan {
    pub fn new(page_count: usize, orientation: Orientation) -> Self {
        Self {
            orientation,
            page_count,
            slots: plan(page_count, orientation),
        }
    }

    /// Like [`BookletPlan::new`], but fails for counts above [`MAX_PAGE_COUNT`]
    pub fn try_new(page_count: usize, orientation: Orientation) -> Result<Self> {
        check_page_count(page_count)?;
        Ok(Self::new(page_count, orientation))
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Number of source pages
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Number of output pages, blanks included
    pub fn padded_count(&self) -> usize {
        self.slots.len()
    }

    pub fn blank_count(&self) -> usize {
        self.padded_count() - self.page_count
    }

    pub fn sheet_count(&self) -> usize {
        self.slots.len() / PAGES_PER_SHEET
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Slots grouped per sheet: `[front-left, front-right, back-left, back-right]`
    pub fn sheets(&self) -> impl Iterator<Item = &[Slot]> {
        self.slots.chunks_exact(PAGES_PER_SHEET)
    }

    pub fn into_slots(self) -> Vec<Slot> {
        self.slots
    }
}
