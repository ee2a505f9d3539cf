use crate::plan::{PAGES_PER_SHEET, check_page_count, padded_page_count};
use crate::types::*;

/// Calculate statistics for a booklet of `page_count` pages
pub fn calculate_statistics(page_count: usize) -> Result<BookletStatistics> {
    if page_count == 0 {
        return Err(BookletError::NoPages);
    }
    check_page_count(page_count)?;

    let output_pages = padded_page_count(page_count);
    let output_sheets = output_pages / PAGES_PER_SHEET;

    Ok(BookletStatistics {
        source_pages: page_count,
        output_pages,
        output_sheets,
        printed_sides: output_sheets * 2,
        blank_pages_added: output_pages - page_count,
    })
}
