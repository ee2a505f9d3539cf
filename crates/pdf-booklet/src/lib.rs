mod booklet;
pub mod document;
mod options;
pub mod pdf;
pub mod plan;
mod stats;
mod types;

pub use booklet::{BookletReport, make_booklet};
pub use document::{DocumentSink, DocumentSource, assemble_booklet};
pub use options::*;
pub use pdf::{PdfSink, PdfSource, load_pdf, save_pdf};
pub use plan::{
    BookletPlan, MAX_PAGE_COUNT, check_page_count, padded_page_count, plan, raw_order,
};
pub use stats::calculate_statistics;
pub use types::*;
