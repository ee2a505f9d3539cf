use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookletError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Input not found: {}", .0.display())]
    InputNotFound(PathBuf),
    #[error("Input PDF has 0 pages")]
    NoPages,
    #[error("Page count {count} exceeds the supported maximum of {max}")]
    TooManyPages { count: usize, max: usize },
    #[error("Page index {index} out of range for document with {count} pages")]
    PageOutOfRange { index: usize, count: usize },
    #[error("Cannot write output {}: {source}", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, BookletError>;

/// Which edge of the booklet is bound, i.e. which way it opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// US/EU style: the first outer spread reads `[last | first]`
    #[default]
    LeftOpen,
    /// Japanese style: the first outer spread reads `[first | last]`
    RightOpen,
}

impl Orientation {
    /// Label shown in run reports
    pub fn label(self) -> &'static str {
        match self {
            Orientation::LeftOpen => "LEFT-OPEN (US/EU)",
            Orientation::RightOpen => "RIGHT-OPEN (JP)",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One position in the output sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Zero-based index of a source page
    Page(usize),
    /// Padding filler
    Blank,
}

impl Slot {
    pub fn page_index(self) -> Option<usize> {
        match self {
            Slot::Page(index) => Some(index),
            Slot::Blank => None,
        }
    }

    pub fn is_blank(self) -> bool {
        matches!(self, Slot::Blank)
    }
}

impl fmt::Display for Slot {
    /// 1-based page number, or `-` for a blank
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Page(index) => write!(f, "{}", index + 1),
            Slot::Blank => f.write_str("-"),
        }
    }
}

/// Physical page size in PDF points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl PageSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for PageSize {
    /// US Letter
    fn default() -> Self {
        Self::new(612.0, 792.0)
    }
}

/// Statistics about a booklet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookletStatistics {
    /// Total number of source pages
    pub source_pages: usize,
    /// Output page count, padded to a multiple of 4
    pub output_pages: usize,
    /// Number of physical sheets
    pub output_sheets: usize,
    /// Number of printed sides (two per sheet)
    pub printed_sides: usize,
    /// Number of blank pages added for padding
    pub blank_pages_added: usize,
}
