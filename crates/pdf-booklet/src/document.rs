//! Document capabilities used by the booklet assembly loop
//!
//! The planner itself never touches a document. These traits describe the
//! minimum a backend has to provide so pages can be streamed out in plan
//! order; `crate::pdf` implements them on top of `lopdf`.

use crate::plan::BookletPlan;
use crate::types::*;
use std::path::Path;

/// Read side: page count and per-page geometry.
pub trait DocumentSource {
    fn page_count(&self) -> usize;

    /// Size of the page at `index`; fails for `index >= page_count()`
    fn page_size(&self, index: usize) -> Result<PageSize>;
}

/// Write side: accumulates pages in the order they are appended.
pub trait DocumentSink<S: DocumentSource + ?Sized> {
    /// Append a copy of `source` page `index`, preserving content and size
    fn append_page(&mut self, source: &S, index: usize) -> Result<()>;

    /// Append an empty page of the given size
    fn append_blank(&mut self, size: PageSize) -> Result<()>;

    /// Persist everything appended so far to `path`, creating missing
    /// parent directories. Nothing is left at `path` on failure.
    fn finish(self, path: &Path) -> Result<()>
    where
        Self: Sized;
}

/// Stream `source` into `sink` in booklet order.
///
/// Blank padding pages take the size of the first source page.
pub fn assemble_booklet<S, K>(
    source: &S,
    sink: &mut K,
    orientation: Orientation,
) -> Result<BookletPlan>
where
    S: DocumentSource + ?Sized,
    K: DocumentSink<S> + ?Sized,
{
    let page_count = source.page_count();
    if page_count == 0 {
        return Err(BookletError::NoPages);
    }

    let plan = BookletPlan::try_new(page_count, orientation)?;
    log::debug!(
        "Planned {} slots ({} blank) for {} pages, {}",
        plan.padded_count(),
        plan.blank_count(),
        page_count,
        orientation
    );

    let blank_size = source.page_size(0)?;
    for slot in plan.slots() {
        match *slot {
            Slot::Page(index) => sink.append_page(source, index)?,
            Slot::Blank => sink.append_blank(blank_size)?,
        }
    }

    Ok(plan)
}
